//! Per-session mode state: the active mode pointer over a shared catalog.
//!
//! One `ModeSession` per user/session. It performs no internal synchronization; callers that
//! share a session across tasks serialize access themselves (see the skills crate's store).

use indexmap::IndexMap;
use serde::Serialize;
use std::sync::Arc;

use super::catalog::{ModeCatalog, PersonalityMode, FALLBACK_PROMPT_CONTEXT};
use crate::config::DEFAULT_MODE_ID;
use crate::error::{CoreError, CoreResult};

/// Catalog summary for dashboards.
#[derive(Debug, Clone, Serialize)]
pub struct ModeStats {
    pub total_modes: usize,
    pub current_mode: String,
    pub available_modes: Vec<String>,
    pub mode_categories: IndexMap<String, Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct ModeSession {
    catalog: Arc<ModeCatalog>,
    current: String,
}

impl ModeSession {
    /// Session over `catalog`, starting in `calm_coach` (or the catalog's first mode if absent).
    pub fn new(catalog: Arc<ModeCatalog>) -> Self {
        Self::with_default(catalog, DEFAULT_MODE_ID)
    }

    /// Session starting in `default_mode`; an unknown default falls back to the first catalog mode.
    pub fn with_default(catalog: Arc<ModeCatalog>, default_mode: &str) -> Self {
        let current = if catalog.contains(default_mode) {
            default_mode.to_string()
        } else {
            let first = catalog
                .first()
                .map(|m| m.id.clone())
                .unwrap_or_else(|| default_mode.to_string());
            tracing::warn!(
                target: "reflective::modes",
                requested = default_mode,
                using = %first,
                "Default mode not in catalog"
            );
            first
        };
        Self { catalog, current }
    }

    pub fn catalog(&self) -> &Arc<ModeCatalog> {
        &self.catalog
    }

    /// Full catalog keyed by id.
    pub fn modes(&self) -> &IndexMap<String, PersonalityMode> {
        self.catalog.modes()
    }

    pub fn current_mode(&self) -> &str {
        &self.current
    }

    /// Switch to `id`. Unknown ids leave the session unchanged and return false.
    pub fn set_mode(&mut self, id: &str) -> bool {
        if self.catalog.contains(id) {
            if self.current != id {
                tracing::info!(
                    target: "reflective::modes",
                    from = %self.current,
                    to = id,
                    "Personality mode switched"
                );
            }
            self.current = id.to_string();
            true
        } else {
            tracing::warn!(target: "reflective::modes", mode = id, "Unknown personality mode");
            false
        }
    }

    /// Record for `id`, or for the active mode when `None`.
    pub fn mode_info(&self, id: Option<&str>) -> CoreResult<&PersonalityMode> {
        let target = id.unwrap_or(self.current.as_str());
        self.catalog
            .get(target)
            .ok_or_else(|| CoreError::ModeNotFound(target.to_string()))
    }

    /// Prompt block for `id` (or the active mode); the generic fallback when unknown.
    pub fn render_prompt_context(&self, id: Option<&str>) -> String {
        match self.mode_info(id) {
            Ok(mode) => mode.prompt_context(),
            Err(_) => FALLBACK_PROMPT_CONTEXT.to_string(),
        }
    }

    /// Friendly line announcing a change of mode.
    pub fn transition_message(&self, from: &str, to: &str) -> String {
        match (self.catalog.get(from), self.catalog.get(to)) {
            (Some(f), Some(t)) => format!(
                "Transitioning from {} {} to {} {} mode. {}",
                f.name, f.emoji, t.name, t.emoji, t.description
            ),
            (_, Some(t)) => format!("Switching to {} mode.", t.name),
            (_, None) => format!("Switching to {} mode.", to),
        }
    }

    pub fn stats(&self) -> ModeStats {
        ModeStats {
            total_modes: self.catalog.len(),
            current_mode: self.current.clone(),
            available_modes: self.catalog.ids(),
            mode_categories: self.catalog.categories(),
        }
    }
}
