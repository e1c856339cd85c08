//! reflective-core: wellness assistant core (personality modes, recommender, sentiment, mood,
//! conversation memory, tasks).
//!
//! Given a user message, the core detects sentiment and crisis signals, picks the personality
//! mode best suited to the user's state, and renders the prompt context a reply generator
//! consumes. Skills in `reflective-skills` expose the same operations as JSON.

mod config;
mod error;
mod orchestrator;
mod shared;
pub mod crisis;
pub mod memory;
pub mod modes;
pub mod mood;
pub mod sentiment;
pub mod tasks;

// Shared + configuration
pub use config::{UserConfig, WellnessConfig, DEFAULT_MODE_ID};
pub use error::{CoreError, CoreResult};
pub use shared::{CoreConfig, TenantContext, DEFAULT_AGENT_ID};

// Personality modes
pub use modes::{
    CommunicationStyle, CompatibilityCheck, ModeCatalog, ModeRecommendation, ModeRecommender,
    ModeRole, ModeSession, ModeStats, PersonalityMode, UserContext, FALLBACK_PROMPT_CONTEXT,
};

// Signals
pub use crisis::{crisis_message, emergency_resources, sos_response, EmergencyResource, SosResponse};
pub use mood::{MoodAnalytics, MoodEntry, MoodLevel, MoodLogOutcome, MoodPatterns, MoodTracker};
pub use memory::{ConversationMemory, Speaker, UserFacts, UserProfile};
pub use tasks::{Task, TaskDraft, TaskTracker, TaskUpdate};
pub use sentiment::{
    Emotion, EmotionalSummary, MentalHealthIndicators, Sentiment, SentimentAnalyzer,
    SentimentResult, Urgency,
};

// Orchestration
pub use orchestrator::{
    AgentSkill, ChatCommand, SkillRegistry, TurnCoordinator, TurnMemory, TurnPlan,
};
