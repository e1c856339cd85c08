//! Mood skills: log a 1–10 mood with an optional note, and report window analytics and patterns.

use chrono::{DateTime, Utc};
use reflective_core::mood::MAX_WINDOW_DAYS;
use reflective_core::{AgentSkill, CoreResult, TenantContext};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::sync::Arc;

use crate::store::SessionStore;

type SkillResult = Result<Value, Box<dyn std::error::Error + Send + Sync>>;

pub(crate) fn log_mood(
    store: &SessionStore,
    ctx: &TenantContext,
    mood: &str,
    note: &str,
    context: Map<String, Value>,
    at: DateTime<Utc>,
) -> CoreResult<Value> {
    let outcome = store.with_mood(ctx, |tracker| tracker.log_mood_at(mood, note, context, at))?;
    Ok(json!({
        "success": true,
        "mood_entry": outcome.mood_entry,
        "insights": outcome.insights,
    }))
}

// ---------------------------------------------------------------------------
// log_mood
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct LogMoodArgs {
    /// Number ("7", "6.5") or label ("good").
    mood: Value,
    #[serde(default)]
    note: String,
    #[serde(default)]
    context: Map<String, Value>,
    /// Defaults to now.
    #[serde(default)]
    timestamp: Option<DateTime<Utc>>,
}

pub struct LogMood {
    store: Arc<SessionStore>,
}

impl LogMood {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl AgentSkill for LogMood {
    fn name(&self) -> &str {
        "log_mood"
    }

    async fn execute(&self, ctx: &TenantContext, payload: Option<Value>) -> SkillResult {
        let payload = payload.ok_or("log_mood requires payload: { mood, note?, context? }")?;
        let args: LogMoodArgs = serde_json::from_value(payload)?;
        let mood = match &args.mood {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let mut out = log_mood(
            &self.store,
            ctx,
            &mood,
            &args.note,
            args.context,
            args.timestamp.unwrap_or_else(Utc::now),
        )?;
        out["status"] = json!("ok");
        out["skill"] = json!(self.name());
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// mood_analytics
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
struct MoodAnalyticsArgs {
    #[serde(default)]
    days: Option<u32>,
    /// Also include time-of-day, weekday, and note-theme patterns.
    #[serde(default)]
    include_patterns: bool,
    /// End of the window; defaults to now.
    #[serde(default)]
    as_of: Option<DateTime<Utc>>,
}

pub struct MoodAnalyticsSkill {
    store: Arc<SessionStore>,
}

impl MoodAnalyticsSkill {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl AgentSkill for MoodAnalyticsSkill {
    fn name(&self) -> &str {
        "mood_analytics"
    }

    async fn execute(&self, ctx: &TenantContext, payload: Option<Value>) -> SkillResult {
        let args: MoodAnalyticsArgs = match payload {
            Some(p) => serde_json::from_value(p)?,
            None => MoodAnalyticsArgs::default(),
        };
        let days = args
            .days
            .unwrap_or(self.store.coordinator().wellness().mood_window_days)
            .clamp(1, MAX_WINDOW_DAYS);
        let now = args.as_of.unwrap_or_else(Utc::now);

        let (analytics, patterns) = self.store.with_mood(ctx, |tracker| {
            let patterns = args.include_patterns.then(|| tracker.patterns_at(days, now));
            (tracker.analytics_at(days, now), patterns)
        });

        let mut out = json!({
            "status": "ok",
            "skill": self.name(),
            "analytics": analytics,
        });
        if let Some(p) = patterns {
            out["patterns"] = json!(p);
        }
        Ok(out)
    }
}
