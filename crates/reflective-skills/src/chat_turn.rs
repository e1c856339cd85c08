//! Chat Turn skill: the per-message entry point of the chat layer.
//!
//! `#` commands (`#mood`, `#sos`, `#mode`, `#modes`, `#reflect`, `#todo`, `#remember`, `#show`)
//! are executed directly against the tenant's state. Any other message is recorded in the
//! tenant's short-term memory and planned by the
//! [`TurnCoordinator`](reflective_core::TurnCoordinator).

use chrono::Utc;
use reflective_core::memory::Importance;
use reflective_core::{AgentSkill, ChatCommand, TenantContext};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::memory_skills::{remember_important, save_reflection, show_memories};
use crate::mode_skills::{list_modes, switch_mode};
use crate::mood_skills::log_mood;
use crate::sos::{sos_body, sos_urgency};
use crate::store::SessionStore;
use crate::task_skills::{add_task, NewTaskArgs};

const SKILL_NAME: &str = "chat_turn";
const SHOW_LIMIT: usize = 5;

#[derive(Debug, Deserialize)]
struct ChatTurnArgs {
    message: String,
    #[serde(default)]
    concerns: Vec<String>,
    /// `#reflect` category.
    #[serde(default)]
    category: Option<String>,
    /// `#todo` priority and due date.
    #[serde(default)]
    priority: Option<String>,
    #[serde(default)]
    due_date: Option<String>,
    /// `#remember` importance.
    #[serde(default)]
    importance: Option<String>,
}

fn outcome(kind: &str, result: reflective_core::CoreResult<Value>) -> Value {
    match result {
        Ok(result) => json!({ "type": kind, "success": true, "result": result }),
        Err(e) => json!({ "type": kind, "success": false, "error": e.to_string() }),
    }
}

pub struct ChatTurn {
    store: Arc<SessionStore>,
}

impl ChatTurn {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }

    fn run_command(&self, ctx: &TenantContext, command: &ChatCommand, args: &ChatTurnArgs) -> Value {
        match command {
            ChatCommand::Mood { value, note } => outcome(
                "mood",
                log_mood(&self.store, ctx, value, note, Default::default(), Utc::now()),
            ),
            ChatCommand::Sos { text } => {
                let analyzer = self.store.coordinator().analyzer();
                let urgency = sos_urgency(analyzer, text, None);
                json!({ "type": "sos", "success": true, "result": sos_body(urgency) })
            }
            ChatCommand::Mode { id } => {
                let result = switch_mode(&self.store, ctx, id);
                let success = result["success"].clone();
                json!({ "type": "mode", "success": success, "result": result })
            }
            ChatCommand::Modes => {
                json!({ "type": "modes", "success": true, "result": list_modes(&self.store, ctx) })
            }
            ChatCommand::Reflect { text } => {
                let category = args.category.as_deref().unwrap_or_default();
                outcome("reflect", save_reflection(&self.store, ctx, text, category))
            }
            ChatCommand::Todo { title } => {
                let task = NewTaskArgs {
                    title: title.clone(),
                    priority: args.priority.clone(),
                    due_date: args.due_date.clone(),
                    ..NewTaskArgs::default()
                };
                outcome("todo", add_task(&self.store, ctx, task))
            }
            ChatCommand::Remember { text } => {
                let importance = args
                    .importance
                    .as_deref()
                    .and_then(Importance::parse)
                    .unwrap_or_default();
                outcome("remember", remember_important(&self.store, ctx, text, importance))
            }
            ChatCommand::Show => json!({
                "type": "show",
                "success": true,
                "result": show_memories(&self.store, ctx, "", SHOW_LIMIT),
            }),
            ChatCommand::Unknown { name } => json!({
                "type": "unknown",
                "success": false,
                "error": format!("Unknown command: #{}", name),
            }),
        }
    }
}

#[async_trait::async_trait]
impl AgentSkill for ChatTurn {
    fn name(&self) -> &str {
        SKILL_NAME
    }

    async fn execute(
        &self,
        ctx: &TenantContext,
        payload: Option<Value>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let payload = payload.ok_or("chat_turn requires payload: { message, concerns? }")?;
        let args: ChatTurnArgs = serde_json::from_value(payload)?;
        if args.message.trim().is_empty() {
            return Err("chat_turn requires a non-empty message".into());
        }

        if let Some(command) = ChatCommand::parse(&args.message) {
            let result = self.run_command(ctx, &command, &args);
            return Ok(json!({
                "status": "ok",
                "skill": SKILL_NAME,
                "command": command,
                "command_result": result,
            }));
        }

        let coordinator = Arc::clone(self.store.coordinator());
        let plan = self.store.with_state(ctx, |state| {
            coordinator.plan_turn_with_memory(
                &mut state.session,
                &mut state.memory,
                &args.message,
                &args.concerns,
            )
        });
        Ok(json!({
            "status": "ok",
            "skill": SKILL_NAME,
            "plan": plan,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::store;

    async fn turn(skill: &ChatTurn, ctx: &TenantContext, message: &str) -> Value {
        skill
            .execute(ctx, Some(json!({ "message": message })))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn plain_message_is_planned() {
        let skill = ChatTurn::new(store());
        let ctx = TenantContext::new("t");
        let out = turn(&skill, &ctx, "I am so happy and excited today!").await;
        assert_eq!(out["plan"]["active_mode"], "playful_companion");
        assert_eq!(out["plan"]["previous_mode"], "calm_coach");
        assert!(out["plan"]["prompt_context"]
            .as_str()
            .unwrap()
            .starts_with("PERSONALITY MODE: Playful Companion"));
        assert!(out.get("command").is_none());
    }

    #[tokio::test]
    async fn commands_act_on_tenant_state() {
        let store = store();
        let skill = ChatTurn::new(Arc::clone(&store));
        let ctx = TenantContext::new("t");

        let out = turn(&skill, &ctx, "#mood 3 tired after work").await;
        assert_eq!(out["command"]["command"], "mood");
        assert_eq!(out["command_result"]["success"], true);
        assert_eq!(store.with_mood(&ctx, |m| m.entries().len()), 1);

        let out = turn(&skill, &ctx, "#mood meh").await;
        assert_eq!(out["command_result"]["success"], false);

        let out = turn(&skill, &ctx, "#mode practical_helper").await;
        assert_eq!(out["command_result"]["success"], true);
        assert_eq!(
            store.with_session(&ctx, |s| s.current_mode().to_string()),
            "practical_helper"
        );

        let out = turn(&skill, &ctx, "#modes").await;
        assert_eq!(out["command_result"]["result"]["current_mode"], "practical_helper");

        let out = turn(&skill, &ctx, "#sos").await;
        assert_eq!(out["command_result"]["result"]["urgency"], "medium");

        let out = turn(&skill, &ctx, "#dance now").await;
        assert_eq!(out["command_result"]["type"], "unknown");
        assert_eq!(out["command_result"]["error"], "Unknown command: #dance");
    }

    #[tokio::test]
    async fn memory_and_task_commands() {
        let store = store();
        let skill = ChatTurn::new(Arc::clone(&store));
        let ctx = TenantContext::new("t");

        let out = skill
            .execute(
                &ctx,
                Some(json!({ "message": "#todo Do laundry", "priority": "high", "due_date": "2026-11-02" })),
            )
            .await
            .unwrap();
        assert_eq!(out["command_result"]["success"], true);
        assert_eq!(out["command_result"]["result"]["task"]["priority"], "high");
        assert_eq!(store.with_tasks(&ctx, |t| t.tasks(None, None).len()), 1);

        let out = turn(&skill, &ctx, "#todo").await;
        assert_eq!(out["command_result"]["success"], false);
        assert_eq!(out["command_result"]["error"], "task title must not be empty");

        let out = skill
            .execute(&ctx, Some(json!({ "message": "#reflect Mornings are easier", "category": "sleep" })))
            .await
            .unwrap();
        assert_eq!(out["command_result"]["result"]["reflection"]["category"], "sleep");

        let out = turn(&skill, &ctx, "#remember Sister visits on Friday").await;
        assert_eq!(out["command_result"]["result"]["memory"]["importance"], "medium");

        turn(&skill, &ctx, "Hi, my name is Jo").await;
        let out = turn(&skill, &ctx, "#show").await;
        let shown = &out["command_result"]["result"];
        assert_eq!(shown["profile"]["name"], "Jo");
        assert_eq!(shown["memory_stats"]["reflections"], 1);
        assert_eq!(shown["memory_stats"]["important_memories"], 1);
    }

    #[tokio::test]
    async fn plain_messages_build_short_term_context() {
        let skill = ChatTurn::new(store());
        let ctx = TenantContext::new("t");
        let out = turn(&skill, &ctx, "call me Robin").await;
        assert_eq!(out["plan"]["memory"]["user_name"], "Robin");
        assert!(out["plan"]["memory"]["memory_feedback"]
            .as_str()
            .unwrap()
            .starts_with("I've stored that your name is Robin."));

        let out = turn(&skill, &ctx, "rough day at work").await;
        assert_eq!(out["plan"]["memory"]["recent_context"], "Human: call me Robin");
        assert!(out["plan"]["memory"].get("learned").is_none());
    }

    #[tokio::test]
    async fn empty_message_is_rejected() {
        let skill = ChatTurn::new(store());
        let ctx = TenantContext::new("t");
        assert!(skill
            .execute(&ctx, Some(json!({ "message": "   " })))
            .await
            .is_err());
        assert!(skill.execute(&ctx, None).await.is_err());
    }
}
