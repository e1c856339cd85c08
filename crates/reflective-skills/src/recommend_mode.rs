//! Recommend Mode skill: scores every personality mode against the user's state and returns
//! the winner with confidence, reasoning, and the full score table. Does not switch modes.

use reflective_core::{AgentSkill, TenantContext, UserContext};
use serde::Deserialize;
use std::sync::Arc;

use crate::store::SessionStore;

const SKILL_NAME: &str = "recommend_mode";

#[derive(Debug, Deserialize)]
struct RecommendModeArgs {
    /// When set, sentiment, urgency, and mood are derived from this message.
    #[serde(default)]
    text: Option<String>,
    #[serde(flatten)]
    context: UserContext,
}

pub struct RecommendMode {
    store: Arc<SessionStore>,
}

impl RecommendMode {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl AgentSkill for RecommendMode {
    fn name(&self) -> &str {
        SKILL_NAME
    }

    async fn execute(
        &self,
        _ctx: &TenantContext,
        payload: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, Box<dyn std::error::Error + Send + Sync>> {
        let args: RecommendModeArgs = match payload {
            Some(p) => serde_json::from_value(p)?,
            None => RecommendModeArgs {
                text: None,
                context: UserContext::default(),
            },
        };
        let coordinator = self.store.coordinator();

        let context = match args.text.as_deref() {
            Some(text) => {
                let analysis = coordinator.analyzer().analyze(text);
                let built = coordinator.build_context(&analysis, &args.context.concerns);
                match args.context.preferred_style {
                    Some(style) => built.with_preferred_style(style),
                    None => built,
                }
            }
            None => args.context,
        };

        let recommendation = coordinator.recommender().recommend(&context);
        Ok(serde_json::json!({
            "status": "ok",
            "skill": SKILL_NAME,
            "recommendation": recommendation,
            "context": context,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::store;
    use serde_json::json;

    #[tokio::test]
    async fn explicit_context() {
        let skill = RecommendMode::new(store());
        let out = skill
            .execute(
                &TenantContext::new("t"),
                Some(json!({
                    "mood": "sad",
                    "sentiment": "negative",
                    "urgency": "low",
                    "concerns": ["anxiety about work"]
                })),
            )
            .await
            .unwrap();
        assert_eq!(out["recommendation"]["recommended_mode"], "calm_coach");
        assert_eq!(out["recommendation"]["confidence"], 0.5);
        assert_eq!(out["recommendation"]["all_scores"]["calm_coach"], 4);
    }

    #[tokio::test]
    async fn context_from_text() {
        let skill = RecommendMode::new(store());
        let out = skill
            .execute(
                &TenantContext::new("t"),
                Some(json!({ "text": "I am so happy and excited!" })),
            )
            .await
            .unwrap();
        assert_eq!(out["context"]["sentiment"], "positive");
        assert_eq!(out["context"]["mood"], "happy");
        assert_eq!(out["recommendation"]["recommended_mode"], "playful_companion");
    }

    #[tokio::test]
    async fn no_payload_gives_zero_signal_default() {
        let out = RecommendMode::new(store())
            .execute(&TenantContext::new("t"), None)
            .await
            .unwrap();
        // Neutral + low urgency: assertive and practical tie at 1; catalog order wins.
        assert_eq!(out["recommendation"]["recommended_mode"], "assertive_buddy");
        assert!(out["recommendation"].get("error").is_none());
    }
}
