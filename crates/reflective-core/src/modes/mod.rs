//! Personality modes: catalog, per-session state, and the recommender.

mod builtin;
pub mod catalog;
pub mod recommender;
pub mod session;

pub use catalog::{CommunicationStyle, ModeCatalog, ModeRole, PersonalityMode, FALLBACK_PROMPT_CONTEXT};
pub use recommender::{
    CompatibilityCheck, ModeRecommendation, ModeRecommender, UserContext, DISTRESS_MOODS,
    FALLBACK_CONFIDENCE, FALLBACK_REASONING,
};
pub use session::{ModeSession, ModeStats};
