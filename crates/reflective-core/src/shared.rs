//! Shared types: tenant context and the file/env backed core configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default agent ID when not specified (single-agent mode).
pub const DEFAULT_AGENT_ID: &str = "default";

/// Tenant context for per-user isolation of sessions and mood logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantContext {
    /// Unique tenant identifier (one chat user).
    pub tenant_id: String,
    /// Optional correlation id for request tracing.
    pub correlation_id: Option<String>,
    /// Agent instance ID. When None or empty, [`DEFAULT_AGENT_ID`] is used.
    #[serde(default)]
    pub agent_id: Option<String>,
}

impl TenantContext {
    pub fn new(tenant_id: impl Into<String>) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            correlation_id: None,
            agent_id: None,
        }
    }

    /// Resolved agent ID (never empty).
    pub fn resolved_agent_id(&self) -> &str {
        self.agent_id
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_AGENT_ID)
    }

    /// Key used by session stores: `{tenant}/{agent}`.
    pub fn session_key(&self) -> String {
        format!("{}/{}", self.tenant_id, self.resolved_agent_id())
    }
}

/// Deployment configuration loaded through the `config` crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Application identity shown in logs and the console banner.
    pub app_name: String,
    /// Path of the per-user `user_config.toml`.
    pub user_config_path: String,
    /// Optional custom catalog (TOML). When unset the built-in modes are used.
    #[serde(default)]
    pub modes_path: Option<String>,
    /// Maximum number of concerns kept per turn (older ones are dropped).
    #[serde(default = "default_max_concerns")]
    pub max_concerns: usize,
    /// Chat messages kept in each tenant's short-term memory.
    #[serde(default = "default_max_history")]
    pub max_history: usize,
}

fn default_max_concerns() -> usize {
    8
}

fn default_max_history() -> usize {
    crate::memory::DEFAULT_MAX_MESSAGES
}

impl CoreConfig {
    /// Load config from file and environment. Precedence: env `REFLECTIVE__*` > file
    /// (`REFLECTIVE_CONFIG` path, else `config/reflective.toml`) > defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path = std::env::var("REFLECTIVE_CONFIG")
            .unwrap_or_else(|_| "config/reflective.toml".to_string());
        Self::load_from(Path::new(&config_path))
    }

    /// Same as [`CoreConfig::load`] with an explicit file path (skipped when absent).
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .set_default("app_name", "Reflective")?
            .set_default("user_config_path", "user_config.toml")?
            .set_default("max_concerns", 8_i64)?
            .set_default("max_history", default_max_history() as i64)?;

        let builder = if path.exists() {
            builder.add_source(config::File::from(path))
        } else {
            builder
        };

        let built = builder
            .add_source(config::Environment::with_prefix("REFLECTIVE").separator("__"))
            .build()?;

        built.try_deserialize()
    }
}
