//! SOS skill: supportive reply plus hotline resources for an explicit help request.

use reflective_core::{sos_response, AgentSkill, SentimentAnalyzer, TenantContext, Urgency};
use serde::Deserialize;
use serde_json::{json, Value};

const SKILL_NAME: &str = "sos";

#[derive(Debug, Default, Deserialize)]
struct SosArgs {
    #[serde(default)]
    text: String,
    /// Caller-reported urgency; overrides what the text suggests.
    #[serde(default)]
    urgency: Option<Urgency>,
}

/// Urgency of an SOS request: the caller's value, else the text's, but never below medium.
pub(crate) fn sos_urgency(analyzer: &SentimentAnalyzer, text: &str, reported: Option<Urgency>) -> Urgency {
    reported.unwrap_or_else(|| analyzer.analyze(text).urgency_level.max(Urgency::Medium))
}

pub(crate) fn sos_body(urgency: Urgency) -> Value {
    let response = sos_response(urgency);
    json!({
        "message": response.message,
        "urgency": response.urgency,
        "resources": response.resources,
    })
}

#[derive(Default)]
pub struct Sos {
    analyzer: SentimentAnalyzer,
}

impl Sos {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl AgentSkill for Sos {
    fn name(&self) -> &str {
        SKILL_NAME
    }

    async fn execute(
        &self,
        ctx: &TenantContext,
        payload: Option<Value>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let args: SosArgs = match payload {
            Some(p) => serde_json::from_value(p)?,
            None => SosArgs::default(),
        };
        let urgency = sos_urgency(&self.analyzer, &args.text, args.urgency);
        tracing::warn!(
            target: "reflective::skills",
            tenant = %ctx.tenant_id,
            urgency = urgency.as_str(),
            "SOS skill invoked"
        );
        let mut out = sos_body(urgency);
        out["status"] = json!("ok");
        out["skill"] = json!(SKILL_NAME);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn urgency_from_text_with_medium_floor() {
        let skill = Sos::new();
        let ctx = TenantContext::new("t");

        let out = skill.execute(&ctx, None).await.unwrap();
        assert_eq!(out["urgency"], "medium");
        assert_eq!(out["resources"].as_array().unwrap().len(), 3);
        assert!(out["message"].as_str().unwrap().contains("okay to ask for help"));

        let out = skill
            .execute(&ctx, Some(json!({ "text": "I'm having a panic attack" })))
            .await
            .unwrap();
        assert_eq!(out["urgency"], "high");
        assert!(out["message"].as_str().unwrap().contains("emergency services"));
    }

    #[tokio::test]
    async fn reported_urgency_wins() {
        let out = Sos::new()
            .execute(
                &TenantContext::new("t"),
                Some(json!({ "text": "I'm having a panic attack", "urgency": "low" })),
            )
            .await
            .unwrap();
        assert_eq!(out["urgency"], "low");
    }
}
