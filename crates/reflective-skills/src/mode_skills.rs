//! Mode skills: switch, list, inspect, render, and validate personality modes for a tenant.
//!
//! Unknown mode ids are reported as `"success": false` with an error message; only malformed
//! payloads fail the call.

use reflective_core::{AgentSkill, TenantContext, UserContext};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::store::SessionStore;

type SkillResult = Result<Value, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Debug, Default, Deserialize)]
struct ModeArgs {
    #[serde(default)]
    mode: Option<String>,
}

fn mode_args(payload: Option<Value>) -> Result<ModeArgs, serde_json::Error> {
    match payload {
        Some(p) => serde_json::from_value(p),
        None => Ok(ModeArgs::default()),
    }
}

// ---------------------------------------------------------------------------
// Shared with chat_turn
// ---------------------------------------------------------------------------

pub(crate) fn switch_mode(store: &SessionStore, ctx: &TenantContext, mode: &str) -> Value {
    store.with_session(ctx, |session| {
        let previous = session.current_mode().to_string();
        let success = session.set_mode(mode);
        let current = session.current_mode().to_string();
        let mut out = json!({
            "success": success,
            "previous_mode": previous,
            "current_mode": current,
        });
        if !success {
            out["error"] = json!(format!("Mode '{}' not found", mode));
        } else if previous != current {
            out["transition_message"] = json!(session.transition_message(&previous, &current));
        }
        out
    })
}

pub(crate) fn list_modes(store: &SessionStore, ctx: &TenantContext) -> Value {
    store.with_session(ctx, |session| {
        let modes: Vec<Value> = session
            .modes()
            .values()
            .map(|m| {
                json!({
                    "id": m.id,
                    "name": m.name,
                    "emoji": m.emoji,
                    "description": m.description,
                    "category": m.role.category(),
                })
            })
            .collect();
        json!({
            "modes": modes,
            "current_mode": session.current_mode(),
            "stats": session.stats(),
        })
    })
}

fn with_header(skill: &str, mut body: Value) -> Value {
    body["status"] = json!("ok");
    body["skill"] = json!(skill);
    body
}

// ---------------------------------------------------------------------------
// switch_mode
// ---------------------------------------------------------------------------

pub struct SwitchMode {
    store: Arc<SessionStore>,
}

impl SwitchMode {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl AgentSkill for SwitchMode {
    fn name(&self) -> &str {
        "switch_mode"
    }

    async fn execute(&self, ctx: &TenantContext, payload: Option<Value>) -> SkillResult {
        let mode = mode_args(payload)?
            .mode
            .ok_or("switch_mode requires payload: { mode }")?;
        Ok(with_header(self.name(), switch_mode(&self.store, ctx, &mode)))
    }
}

// ---------------------------------------------------------------------------
// list_modes
// ---------------------------------------------------------------------------

pub struct ListModes {
    store: Arc<SessionStore>,
}

impl ListModes {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl AgentSkill for ListModes {
    fn name(&self) -> &str {
        "list_modes"
    }

    async fn execute(&self, ctx: &TenantContext, _payload: Option<Value>) -> SkillResult {
        Ok(with_header(self.name(), list_modes(&self.store, ctx)))
    }
}

// ---------------------------------------------------------------------------
// mode_info / mode_prompt
// ---------------------------------------------------------------------------

/// Full record of a mode (the tenant's current one when `mode` is omitted).
pub struct ModeInfo {
    store: Arc<SessionStore>,
}

impl ModeInfo {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl AgentSkill for ModeInfo {
    fn name(&self) -> &str {
        "mode_info"
    }

    async fn execute(&self, ctx: &TenantContext, payload: Option<Value>) -> SkillResult {
        let args = mode_args(payload)?;
        let body = self.store.with_session(ctx, |session| {
            match session.mode_info(args.mode.as_deref()) {
                Ok(mode) => json!({ "success": true, "mode": mode }),
                Err(e) => json!({ "success": false, "error": e.to_string() }),
            }
        });
        Ok(with_header(self.name(), body))
    }
}

/// Prompt context block for a mode; unknown ids get the generic fallback text.
pub struct ModePrompt {
    store: Arc<SessionStore>,
}

impl ModePrompt {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl AgentSkill for ModePrompt {
    fn name(&self) -> &str {
        "mode_prompt"
    }

    async fn execute(&self, ctx: &TenantContext, payload: Option<Value>) -> SkillResult {
        let args = mode_args(payload)?;
        let body = self.store.with_session(ctx, |session| {
            let mode = args
                .mode
                .clone()
                .unwrap_or_else(|| session.current_mode().to_string());
            json!({
                "mode": mode,
                "prompt_context": session.render_prompt_context(Some(mode.as_str())),
            })
        });
        Ok(with_header(self.name(), body))
    }
}

// ---------------------------------------------------------------------------
// validate_mode
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ValidateModeArgs {
    mode: String,
    #[serde(flatten)]
    context: UserContext,
}

/// Checks whether a mode suits the given user context (e.g. no playful mode in a crisis).
pub struct ValidateMode {
    store: Arc<SessionStore>,
}

impl ValidateMode {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl AgentSkill for ValidateMode {
    fn name(&self) -> &str {
        "validate_mode"
    }

    async fn execute(&self, _ctx: &TenantContext, payload: Option<Value>) -> SkillResult {
        let payload = payload.ok_or("validate_mode requires payload: { mode, urgency?, ... }")?;
        let args: ValidateModeArgs = serde_json::from_value(payload)?;
        let check = self
            .store
            .coordinator()
            .recommender()
            .validate_compatibility(&args.mode, &args.context);
        Ok(with_header(self.name(), json!({ "mode": args.mode, "check": check })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::store;

    #[tokio::test]
    async fn switch_reports_success_and_transition() {
        let store = store();
        let ctx = TenantContext::new("t");
        let skill = SwitchMode::new(Arc::clone(&store));

        let out = skill
            .execute(&ctx, Some(json!({ "mode": "wise_mentor" })))
            .await
            .unwrap();
        assert_eq!(out["success"], true);
        assert_eq!(out["previous_mode"], "calm_coach");
        assert_eq!(out["current_mode"], "wise_mentor");
        assert!(out["transition_message"].as_str().unwrap().contains("Wise Mentor"));

        let out = skill
            .execute(&ctx, Some(json!({ "mode": "nonexistent" })))
            .await
            .unwrap();
        assert_eq!(out["success"], false);
        assert_eq!(out["current_mode"], "wise_mentor");

        assert!(skill.execute(&ctx, None).await.is_err());
    }

    #[tokio::test]
    async fn list_includes_categories_and_current() {
        let out = ListModes::new(store())
            .execute(&TenantContext::new("t"), None)
            .await
            .unwrap();
        assert_eq!(out["modes"].as_array().unwrap().len(), 5);
        assert_eq!(out["current_mode"], "calm_coach");
        assert_eq!(out["stats"]["total_modes"], 5);
        assert_eq!(
            out["stats"]["mode_categories"]["supportive"],
            json!(["calm_coach", "wise_mentor"])
        );
    }

    #[tokio::test]
    async fn info_and_prompt_for_unknown_mode() {
        let store = store();
        let ctx = TenantContext::new("t");

        let info = ModeInfo::new(Arc::clone(&store))
            .execute(&ctx, Some(json!({ "mode": "ghost" })))
            .await
            .unwrap();
        assert_eq!(info["success"], false);
        assert_eq!(info["error"], "Mode 'ghost' not found");

        let info = ModeInfo::new(Arc::clone(&store))
            .execute(&ctx, None)
            .await
            .unwrap();
        assert_eq!(info["mode"]["id"], "calm_coach");

        let prompt = ModePrompt::new(store)
            .execute(&ctx, Some(json!({ "mode": "ghost" })))
            .await
            .unwrap();
        assert_eq!(prompt["prompt_context"], "Use a balanced, supportive approach.");
    }

    #[tokio::test]
    async fn validate_flags_playful_in_crisis() {
        let out = ValidateMode::new(store())
            .execute(
                &TenantContext::new("t"),
                Some(json!({ "mode": "playful_companion", "urgency": "crisis" })),
            )
            .await
            .unwrap();
        assert_eq!(out["check"]["compatible"], false);
        assert_eq!(out["check"]["suggested_alternative"], "calm_coach");
    }
}
