//! Turn coordination and skill dispatch.
//!
//! [`TurnCoordinator`] turns one chat message into a [`TurnPlan`]. [`SkillRegistry`] routes
//! named JSON requests to [`AgentSkill`] implementations (see the `reflective-skills` crate).

mod turn;

pub use turn::{ChatCommand, TurnCoordinator, TurnMemory, TurnPlan};

use std::fmt;
use std::sync::Arc;

use crate::shared::TenantContext;

#[derive(Debug)]
struct UnknownSkill(String);

impl fmt::Display for UnknownSkill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown skill: {}", self.0)
    }
}

impl std::error::Error for UnknownSkill {}

/// Trait implemented by every capability exposed to the chat layer.
#[async_trait::async_trait]
pub trait AgentSkill: Send + Sync {
    /// Unique skill name for routing.
    fn name(&self) -> &str;

    /// Executes the skill with the given context and optional JSON payload.
    async fn execute(
        &self,
        ctx: &TenantContext,
        payload: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, Box<dyn std::error::Error + Send + Sync>>;
}

/// Registry of skills that can be dispatched by name.
pub struct SkillRegistry {
    skills: Vec<Arc<dyn AgentSkill>>,
}

impl SkillRegistry {
    pub fn new() -> Self {
        Self { skills: Vec::new() }
    }

    /// Adds a skill. A later skill with the same name is shadowed by the earlier one.
    pub fn register(&mut self, skill: Arc<dyn AgentSkill>) {
        self.skills.push(skill);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn AgentSkill>> {
        self.skills.iter().find(|s| s.name() == name).cloned()
    }

    /// Names of all registered skills, in registration order.
    pub fn skill_names(&self) -> Vec<String> {
        self.skills.iter().map(|s| s.name().to_string()).collect()
    }

    /// Runs the skill called `name`; unknown names are an error.
    pub async fn dispatch(
        &self,
        ctx: &TenantContext,
        name: &str,
        payload: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, Box<dyn std::error::Error + Send + Sync>> {
        let skill = self
            .get(name)
            .ok_or_else(|| UnknownSkill(name.to_string()))?;
        tracing::debug!(
            target: "reflective::skills",
            skill = name,
            tenant = %ctx.tenant_id,
            "Dispatching skill"
        );
        skill.execute(ctx, payload).await
    }
}

impl Default for SkillRegistry {
    fn default() -> Self {
        Self::new()
    }
}
