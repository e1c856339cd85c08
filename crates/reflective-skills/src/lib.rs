//! Wellness skills: JSON-in/JSON-out wrappers over the reflective core (modes, mood, memory,
//! tasks, chat turns), plus the per-tenant session store they share.

pub use reflective_core::{AgentSkill, SkillRegistry};

mod analyze_sentiment;
mod chat_turn;
mod memory_skills;
mod mode_skills;
mod mood_skills;
mod recommend_mode;
mod sos;
mod store;
mod task_skills;

pub use analyze_sentiment::AnalyzeSentiment;
pub use chat_turn::ChatTurn;
pub use memory_skills::{Journal, RecordReply, RememberImportant, SaveReflection, ShowMemories};
pub use mode_skills::{ListModes, ModeInfo, ModePrompt, SwitchMode, ValidateMode};
pub use mood_skills::{LogMood, MoodAnalyticsSkill};
pub use recommend_mode::RecommendMode;
pub use sos::Sos;
pub use store::{SessionStore, TenantState};
pub use task_skills::{
    AddTask, DeleteTask, ListTasks, SuggestDailyTasks, TaskAnalyticsSkill, UpdateTask, UpcomingTasks,
};

use std::sync::Arc;

/// Registry with every wellness skill registered over `store`.
pub fn wellness_registry(store: Arc<SessionStore>) -> SkillRegistry {
    let mut registry = SkillRegistry::new();
    registry.register(Arc::new(AnalyzeSentiment::new()));
    registry.register(Arc::new(RecommendMode::new(Arc::clone(&store))));
    registry.register(Arc::new(SwitchMode::new(Arc::clone(&store))));
    registry.register(Arc::new(ListModes::new(Arc::clone(&store))));
    registry.register(Arc::new(ModeInfo::new(Arc::clone(&store))));
    registry.register(Arc::new(ModePrompt::new(Arc::clone(&store))));
    registry.register(Arc::new(ValidateMode::new(Arc::clone(&store))));
    registry.register(Arc::new(LogMood::new(Arc::clone(&store))));
    registry.register(Arc::new(MoodAnalyticsSkill::new(Arc::clone(&store))));
    registry.register(Arc::new(SaveReflection::new(Arc::clone(&store))));
    registry.register(Arc::new(RememberImportant::new(Arc::clone(&store))));
    registry.register(Arc::new(ShowMemories::new(Arc::clone(&store))));
    registry.register(Arc::new(Journal::new(Arc::clone(&store))));
    registry.register(Arc::new(RecordReply::new(Arc::clone(&store))));
    registry.register(Arc::new(AddTask::new(Arc::clone(&store))));
    registry.register(Arc::new(ListTasks::new(Arc::clone(&store))));
    registry.register(Arc::new(UpdateTask::new(Arc::clone(&store))));
    registry.register(Arc::new(DeleteTask::new(Arc::clone(&store))));
    registry.register(Arc::new(TaskAnalyticsSkill::new(Arc::clone(&store))));
    registry.register(Arc::new(UpcomingTasks::new(Arc::clone(&store))));
    registry.register(Arc::new(SuggestDailyTasks::new()));
    registry.register(Arc::new(ChatTurn::new(store)));
    registry.register(Arc::new(Sos::new()));
    tracing::info!(
        target: "reflective::skills",
        skills = registry.skill_names().len(),
        "Wellness skills registered"
    );
    registry
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::SessionStore;
    use reflective_core::{ModeCatalog, TurnCoordinator, UserConfig, WellnessConfig};
    use std::sync::Arc;

    /// Store over the built-in catalog with default settings.
    pub fn store() -> Arc<SessionStore> {
        let coordinator =
            TurnCoordinator::new(ModeCatalog::builtin(), WellnessConfig::default(), UserConfig::default());
        Arc::new(SessionStore::new(Arc::new(coordinator)))
    }
}
