//! Analyze Sentiment skill: sentiment, emotions, urgency, and mental-health indicators for one
//! message, or per-message results plus an emotional summary for a batch.

use reflective_core::{AgentSkill, SentimentAnalyzer, TenantContext};
use serde::Deserialize;

const SKILL_NAME: &str = "analyze_sentiment";

/// Batches beyond this many messages keep only the newest ones.
const MAX_BATCH: usize = 50;

#[derive(Debug, Deserialize)]
struct AnalyzeSentimentArgs {
    #[serde(default)]
    text: Option<String>,
    /// Several messages, oldest first.
    #[serde(default)]
    messages: Vec<String>,
}

#[derive(Default)]
pub struct AnalyzeSentiment {
    analyzer: SentimentAnalyzer,
}

impl AnalyzeSentiment {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl AgentSkill for AnalyzeSentiment {
    fn name(&self) -> &str {
        SKILL_NAME
    }

    async fn execute(
        &self,
        _ctx: &TenantContext,
        payload: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, Box<dyn std::error::Error + Send + Sync>> {
        let payload = payload.ok_or("analyze_sentiment requires payload: { text } or { messages }")?;
        let args: AnalyzeSentimentArgs = serde_json::from_value(payload)?;

        if let Some(text) = args.text {
            let result = self.analyzer.analyze(&text);
            return Ok(serde_json::json!({
                "status": "ok",
                "skill": SKILL_NAME,
                "result": result,
            }));
        }

        if args.messages.is_empty() {
            return Err("analyze_sentiment requires a non-empty text or messages".into());
        }
        let skip = args.messages.len().saturating_sub(MAX_BATCH);
        let results = self.analyzer.analyze_batch(&args.messages[skip..]);
        let summary = self.analyzer.emotional_summary(&results);
        Ok(serde_json::json!({
            "status": "ok",
            "skill": SKILL_NAME,
            "results": results,
            "summary": summary,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn single_text() {
        let out = AnalyzeSentiment::new()
            .execute(
                &TenantContext::new("t"),
                Some(json!({ "text": "I am so sad and I want to end it all" })),
            )
            .await
            .unwrap();
        assert_eq!(out["result"]["urgency_level"], "crisis");
        assert_eq!(out["result"]["overall_sentiment"], "negative");
    }

    #[tokio::test]
    async fn batch_has_summary() {
        let out = AnalyzeSentiment::new()
            .execute(
                &TenantContext::new("t"),
                Some(json!({ "messages": ["I am happy", "I am so sad"] })),
            )
            .await
            .unwrap();
        assert_eq!(out["results"].as_array().unwrap().len(), 2);
        assert_eq!(out["summary"]["total_messages"], 2);
    }

    #[tokio::test]
    async fn missing_payload_is_an_error() {
        let skill = AnalyzeSentiment::new();
        assert!(skill.execute(&TenantContext::new("t"), None).await.is_err());
        assert!(skill
            .execute(&TenantContext::new("t"), Some(json!({})))
            .await
            .is_err());
    }
}
