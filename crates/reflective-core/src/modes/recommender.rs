//! Mode recommender: weighted point scoring of every catalog mode against a user context.
//!
//! Scoring is integer point accumulation per mode:
//!
//! | Signal | Points |
//! |--------|--------|
//! | negative sentiment or mood in {sad, depressed, anxious} | nurturing +3, reflective +2 |
//! | otherwise positive sentiment | playful +3 |
//! | otherwise | motivational +1 |
//! | urgency high or crisis | nurturing +3 |
//! | urgency low | practical +1 |
//! | concern token found inside a specialty (per concern, per specialty) | +1 |
//! | preferred style in mode name / else in description | +2 / +1 |
//!
//! The strictly highest score wins; ties go to the first mode in catalog order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::builtin::builtin_default_mode;
use super::catalog::{ModeCatalog, ModeRole, PersonalityMode};
use crate::config::DEFAULT_MODE_ID;
use crate::error::{CoreError, CoreResult};
use crate::sentiment::{Sentiment, SentimentResult, Urgency};

/// Mood labels that count as distress regardless of the sentiment label.
pub const DISTRESS_MOODS: [&str; 3] = ["sad", "depressed", "anxious"];

/// Confidence reported on the fallback path.
pub const FALLBACK_CONFIDENCE: f64 = 0.5;

/// Reasoning reported on the fallback path.
pub const FALLBACK_REASONING: &str = "Default recommendation due to analysis error";

// ---------------------------------------------------------------------------
// UserContext
// ---------------------------------------------------------------------------

/// Snapshot of the user's state for one recommendation. Built per request, then dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserContext {
    #[serde(default)]
    pub mood: String,
    #[serde(default)]
    pub concerns: Vec<String>,
    #[serde(default)]
    pub urgency: Urgency,
    #[serde(default)]
    pub preferred_style: Option<String>,
    #[serde(default)]
    pub sentiment: Sentiment,
}

impl UserContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sentiment, urgency, and the dominant emotion's mood word from an analysis.
    pub fn from_sentiment(result: &SentimentResult) -> Self {
        Self {
            mood: result
                .dominant_emotion()
                .map(|e| e.mood_label().to_string())
                .unwrap_or_default(),
            sentiment: result.overall_sentiment,
            urgency: result.urgency_level,
            ..Self::default()
        }
    }

    pub fn with_mood(mut self, mood: impl Into<String>) -> Self {
        self.mood = mood.into();
        self
    }

    pub fn with_concerns<I, S>(mut self, concerns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.concerns = concerns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = urgency;
        self
    }

    pub fn with_sentiment(mut self, sentiment: Sentiment) -> Self {
        self.sentiment = sentiment;
        self
    }

    pub fn with_preferred_style(mut self, style: impl Into<String>) -> Self {
        self.preferred_style = Some(style.into());
        self
    }

    /// Negative sentiment or a distress mood label.
    pub fn is_distressed(&self) -> bool {
        if self.sentiment == Sentiment::Negative {
            return true;
        }
        let mood = self.mood.trim().to_lowercase();
        DISTRESS_MOODS.contains(&mood.as_str())
    }

    /// Lowercased, trimmed preferred style; `None` when blank.
    fn preferred_style_lower(&self) -> Option<String> {
        self.preferred_style
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// Winning mode plus the score trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeRecommendation {
    pub recommended_mode: String,
    pub mode_info: PersonalityMode,
    /// Winner score over the sum of all scores; 0 when nothing matched.
    pub confidence: f64,
    pub reasoning: String,
    pub all_scores: IndexMap<String, u32>,
    /// Fault detail; set only when the fallback recommendation was used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Guardrail verdict for a (mode, context) pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityCheck {
    pub compatible: bool,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_alternative: Option<String>,
}

// ---------------------------------------------------------------------------
// ModeRecommender
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ModeRecommender {
    catalog: Arc<ModeCatalog>,
}

impl ModeRecommender {
    pub fn new(catalog: Arc<ModeCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Arc<ModeCatalog> {
        &self.catalog
    }

    /// Raw points per mode, in catalog order. Pure.
    pub fn score_modes(&self, ctx: &UserContext) -> IndexMap<String, u32> {
        self.catalog
            .modes()
            .values()
            .map(|mode| (mode.id.clone(), score_mode(mode, ctx)))
            .collect()
    }

    /// Scores and picks a winner, or fails when there is nothing to pick from.
    pub fn try_recommend(&self, ctx: &UserContext) -> CoreResult<ModeRecommendation> {
        let scores = self.score_modes(ctx);

        let mut winner: Option<(&String, u32)> = None;
        for (id, &score) in &scores {
            match winner {
                Some((_, best)) if score <= best => {}
                _ => winner = Some((id, score)),
            }
        }
        let (winner_id, winner_score) =
            winner.ok_or_else(|| CoreError::InvalidCatalog("catalog has no modes".to_string()))?;

        let mode = self
            .catalog
            .get(winner_id)
            .cloned()
            .ok_or_else(|| CoreError::ModeNotFound(winner_id.clone()))?;

        let total: u32 = scores.values().sum();
        let confidence = if total == 0 {
            0.0
        } else {
            f64::from(winner_score) / f64::from(total)
        };

        tracing::debug!(
            target: "reflective::recommender",
            scores = ?scores,
            winner = %mode.id,
            confidence,
            "Scored personality modes"
        );

        Ok(ModeRecommendation {
            recommended_mode: mode.id.clone(),
            reasoning: self.explain(&mode, ctx),
            mode_info: mode,
            confidence,
            all_scores: scores,
            error: None,
        })
    }

    /// Best mode for `ctx`. Never fails: internal faults yield the default mode at 0.5 confidence.
    pub fn recommend(&self, ctx: &UserContext) -> ModeRecommendation {
        match self.try_recommend(ctx) {
            Ok(rec) => rec,
            Err(e) => {
                tracing::warn!(
                    target: "reflective::recommender",
                    error = %e,
                    "Mode recommendation failed; using default mode"
                );
                let mode = self.fallback_mode();
                ModeRecommendation {
                    recommended_mode: mode.id.clone(),
                    mode_info: mode,
                    confidence: FALLBACK_CONFIDENCE,
                    reasoning: FALLBACK_REASONING.to_string(),
                    all_scores: IndexMap::new(),
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Bullet-style rationale naming the signals that favored `mode`. Does not affect scoring.
    pub fn explain(&self, mode: &PersonalityMode, ctx: &UserContext) -> String {
        let mut parts = vec![format!("Recommended {} because:", mode.name)];

        if ctx.is_distressed() {
            match mode.role {
                ModeRole::Nurturing => parts.push(
                    "- Your current emotional state would benefit from gentle, patient support"
                        .to_string(),
                ),
                ModeRole::Reflective => parts.push(
                    "- Reflective questions can help you make sense of what you are feeling"
                        .to_string(),
                ),
                _ => {}
            }
        } else if ctx.sentiment == Sentiment::Positive {
            if mode.role == ModeRole::Playful {
                parts.push(
                    "- Your positive mood aligns well with an uplifting, optimistic approach"
                        .to_string(),
                );
            }
        } else if mode.role == ModeRole::Motivational {
            parts.push("- A steady, encouraging push can help you keep moving".to_string());
        }

        match ctx.urgency {
            Urgency::High | Urgency::Crisis if mode.role == ModeRole::Nurturing => parts.push(
                "- The urgency of your situation calls for immediate, focused support".to_string(),
            ),
            Urgency::Low if mode.role == ModeRole::Practical => {
                parts.push("- Things feel manageable, so concrete next steps fit well".to_string())
            }
            _ => {}
        }

        let matched = matched_specialties(mode, &ctx.concerns);
        if !matched.is_empty() {
            parts.push(format!("- Your concerns relate to: {}", matched.join(", ")));
        }

        if let Some(style) = ctx.preferred_style_lower() {
            if mode.name.to_lowercase().contains(&style)
                || mode.description.to_lowercase().contains(&style)
            {
                parts.push(format!("- It matches your preferred style: {}", style));
            }
        }

        let top: Vec<&str> = mode.specialties.iter().take(3).map(String::as_str).collect();
        parts.push(format!("- This mode specializes in: {}", top.join(", ")));

        parts.join("\n")
    }

    /// Guardrail: a playful mode during a crisis is flagged. The suggested alternative is the
    /// first nurturing mode, else the first non-playful one, else none.
    pub fn validate_compatibility(&self, mode_id: &str, ctx: &UserContext) -> CompatibilityCheck {
        let Some(mode) = self.catalog.get(mode_id) else {
            return CompatibilityCheck {
                compatible: false,
                reason: "Mode does not exist".to_string(),
                suggested_alternative: None,
            };
        };

        if ctx.urgency == Urgency::Crisis && mode.role == ModeRole::Playful {
            // Only ids present in this catalog are suggested.
            let alternative = self
                .catalog
                .first_with_role(ModeRole::Nurturing)
                .or_else(|| self.catalog.modes().values().find(|m| m.role != ModeRole::Playful))
                .map(|m| m.id.clone());
            return CompatibilityCheck {
                compatible: false,
                reason: "Playful approach may not be appropriate for crisis situations".to_string(),
                suggested_alternative: alternative,
            };
        }

        CompatibilityCheck {
            compatible: true,
            reason: "Mode is appropriate for current context".to_string(),
            suggested_alternative: None,
        }
    }

    /// Default mode of this catalog, else the first mode, else the built-in calm coach.
    fn fallback_mode(&self) -> PersonalityMode {
        self.catalog
            .get(DEFAULT_MODE_ID)
            .or_else(|| self.catalog.first())
            .cloned()
            .unwrap_or_else(builtin_default_mode)
    }
}

fn score_mode(mode: &PersonalityMode, ctx: &UserContext) -> u32 {
    let mut score = 0;

    if ctx.is_distressed() {
        score += match mode.role {
            ModeRole::Nurturing => 3,
            ModeRole::Reflective => 2,
            _ => 0,
        };
    } else if ctx.sentiment == Sentiment::Positive {
        if mode.role == ModeRole::Playful {
            score += 3;
        }
    } else if mode.role == ModeRole::Motivational {
        score += 1;
    }

    match ctx.urgency {
        Urgency::High | Urgency::Crisis if mode.role == ModeRole::Nurturing => score += 3,
        Urgency::Low if mode.role == ModeRole::Practical => score += 1,
        _ => {}
    }

    for concern in &ctx.concerns {
        let concern = concern.to_lowercase();
        let tokens: Vec<&str> = concern.split_whitespace().collect();
        for specialty in &mode.specialties {
            let specialty = specialty.to_lowercase();
            if tokens.iter().any(|t| specialty.contains(t)) {
                score += 1;
            }
        }
    }

    if let Some(style) = ctx.preferred_style_lower() {
        if mode.name.to_lowercase().contains(&style) {
            score += 2;
        } else if mode.description.to_lowercase().contains(&style) {
            score += 1;
        }
    }

    score
}

/// Specialties of `mode` hit by at least one concern token.
fn matched_specialties<'a>(mode: &'a PersonalityMode, concerns: &[String]) -> Vec<&'a str> {
    let tokens: Vec<String> = concerns
        .iter()
        .flat_map(|c| {
            c.to_lowercase()
                .split_whitespace()
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect();
    mode.specialties
        .iter()
        .filter(|s| {
            let s = s.to_lowercase();
            tokens.iter().any(|t| s.contains(t.as_str()))
        })
        .map(String::as_str)
        .collect()
}
