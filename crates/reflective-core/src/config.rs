//! Wellness configuration loaded from `.env`.
//!
//! Toggles for the turn coordinator: default personality mode, automatic mode switching,
//! the crisis guardrail, crisis resources, and the mood analytics window.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::CoreResult;

/// Mode a fresh session starts in.
pub const DEFAULT_MODE_ID: &str = "calm_coach";

fn default_true() -> bool {
    true
}

fn default_mode_id() -> String {
    DEFAULT_MODE_ID.to_string()
}

fn default_mood_window_days() -> u32 {
    7
}

/// Wellness configuration loaded from environment.
///
/// | Env | Default | Description |
/// |-----|---------|--------------|
/// | REFLECTIVE_DEFAULT_MODE | calm_coach | Mode a new session starts in. |
/// | REFLECTIVE_AUTO_SWITCH | true | Switch the session to the recommended mode each turn. |
/// | REFLECTIVE_CRISIS_GUARDRAIL | true | Move off modes that are unsafe for the detected urgency. |
/// | REFLECTIVE_CRISIS_RESOURCES_ENABLED | true | Attach hotline resources when crisis signals appear. |
/// | REFLECTIVE_MOOD_WINDOW_DAYS | 7 | Default analytics window (1–365). |
/// | REFLECTIVE_MODES_PATH | unset | Optional TOML catalog replacing the built-in modes. |
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WellnessConfig {
    /// REFLECTIVE_DEFAULT_MODE: initial mode id for new sessions.
    #[serde(default = "default_mode_id")]
    pub default_mode: String,
    /// REFLECTIVE_AUTO_SWITCH: apply the recommendation to the session when it is compatible.
    #[serde(default = "default_true")]
    pub auto_switch: bool,
    /// REFLECTIVE_CRISIS_GUARDRAIL: force the suggested alternative when the active mode is unsafe.
    #[serde(default = "default_true")]
    pub crisis_guardrail: bool,
    /// REFLECTIVE_CRISIS_RESOURCES_ENABLED: include the crisis resources message in turn plans.
    #[serde(default = "default_true")]
    pub crisis_resources_enabled: bool,
    /// REFLECTIVE_MOOD_WINDOW_DAYS: analytics window when the caller does not pass one.
    #[serde(default = "default_mood_window_days")]
    pub mood_window_days: u32,
    /// REFLECTIVE_MODES_PATH: custom catalog file.
    #[serde(default)]
    pub modes_path: Option<String>,
}

impl Default for WellnessConfig {
    fn default() -> Self {
        Self {
            default_mode: default_mode_id(),
            auto_switch: true,
            crisis_guardrail: true,
            crisis_resources_enabled: true,
            mood_window_days: default_mood_window_days(),
            modes_path: None,
        }
    }
}

impl WellnessConfig {
    /// Load toggles from environment. Unset or invalid => defaults (see struct field docs).
    pub fn from_env() -> Self {
        Self {
            default_mode: env_opt_string("REFLECTIVE_DEFAULT_MODE").unwrap_or_else(default_mode_id),
            auto_switch: env_bool("REFLECTIVE_AUTO_SWITCH", true),
            crisis_guardrail: env_bool("REFLECTIVE_CRISIS_GUARDRAIL", true),
            crisis_resources_enabled: env_bool("REFLECTIVE_CRISIS_RESOURCES_ENABLED", true),
            mood_window_days: env_mood_window_days(),
            modes_path: env_opt_string("REFLECTIVE_MODES_PATH"),
        }
    }
}

fn env_bool(name: &str, default: bool) -> bool {
    match std::env::var(name) {
        Ok(v) => {
            let v = v.trim();
            if v.is_empty() {
                default
            } else {
                v.eq_ignore_ascii_case("true") || v == "1"
            }
        }
        Err(_) => default,
    }
}

fn env_mood_window_days() -> u32 {
    match std::env::var("REFLECTIVE_MOOD_WINDOW_DAYS") {
        Ok(v) => v.trim().parse().unwrap_or(7).clamp(1, 365),
        Err(_) => 7,
    }
}

fn env_opt_string(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

// -----------------------------------------------------------------------------
// User configuration (user_config.toml)
// -----------------------------------------------------------------------------

/// Per-user settings stored locally in `user_config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct UserConfig {
    /// Name used when greeting the user.
    #[serde(default)]
    pub user_name: Option<String>,

    /// Preferred personality style (e.g. "calm", "mentor"); feeds the recommender's style bonus.
    #[serde(default)]
    pub preferred_style: Option<String>,

    /// Reply language hint carried on every turn plan.
    #[serde(default)]
    pub language: Option<String>,
}

impl UserConfig {
    /// Default path for the user configuration file.
    pub fn default_path() -> PathBuf {
        PathBuf::from("user_config.toml")
    }

    /// Load from `path`; a missing file yields the default config without creating it.
    pub fn load_from_path(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Save to `path`, creating the parent directory if needed.
    pub fn save_to_path(&self, path: &Path) -> CoreResult<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, content)?;
        Ok(())
    }

    /// Preferred style, trimmed; `None` when unset or blank.
    pub fn preferred_style(&self) -> Option<&str> {
        self.preferred_style
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_table() {
        let cfg = WellnessConfig::default();
        assert_eq!(cfg.default_mode, "calm_coach");
        assert!(cfg.auto_switch);
        assert!(cfg.crisis_guardrail);
        assert!(cfg.crisis_resources_enabled);
        assert_eq!(cfg.mood_window_days, 7);
        assert!(cfg.modes_path.is_none());
    }

    #[test]
    fn user_config_round_trips_through_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("user_config.toml");
        let cfg = UserConfig {
            user_name: Some("Sam".to_string()),
            preferred_style: Some("mentor".to_string()),
            language: None,
        };
        cfg.save_to_path(&path).unwrap();
        let loaded = UserConfig::load_from_path(&path).unwrap();
        assert_eq!(loaded, cfg);
        assert_eq!(loaded.preferred_style(), Some("mentor"));
    }

    #[test]
    fn missing_user_config_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = UserConfig::load_from_path(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded, UserConfig::default());
        assert!(!dir.path().join("absent.toml").exists());
    }

    #[test]
    fn blank_preferred_style_is_none() {
        let cfg = UserConfig {
            preferred_style: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(cfg.preferred_style(), None);
    }
}
