//! Mood tracking: 1–10 mood log with per-entry insights, window analytics, and patterns.
//!
//! Entries live in memory for the lifetime of the tracker; persistence belongs to the caller.

mod analytics;

pub use analytics::{
    DailySummary, HourlyPattern, MoodAnalytics, MoodDistribution, MoodPatterns, MoodTrend,
    ThemePattern, WeeklyPattern,
};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::sentiment::SentimentAnalyzer;

/// Mood labels on the 1–10 scale, index + 1 = value.
pub const MOOD_LABELS: [&str; 10] = [
    "terrible", "very_bad", "bad", "poor", "okay", "good", "very_good", "great", "excellent",
    "amazing",
];

const NOTE_THEMES: [(&str, &[&str]); 6] = [
    ("work_stress", &["work", "job", "boss", "deadline", "meeting", "colleague"]),
    ("relationship", &["friend", "family", "partner", "relationship", "argue", "fight"]),
    ("health", &["tired", "sick", "pain", "sleep", "energy", "health"]),
    ("achievement", &["accomplished", "proud", "success", "goal", "achievement"]),
    ("anxiety", &["worried", "anxious", "nervous", "scared", "panic"]),
    ("gratitude", &["thankful", "grateful", "blessed", "appreciate"]),
];

/// Longest analytics window in days. Longer requests are clamped to it.
pub const MAX_WINDOW_DAYS: u32 = 365;

const POSITIVE_NOTE_WORDS: [&str; 6] = ["good", "great", "happy", "love", "wonderful", "amazing"];
const NEGATIVE_NOTE_WORDS: [&str; 6] = ["bad", "terrible", "hate", "awful", "sad", "angry"];

// ---------------------------------------------------------------------------
// Mood level
// ---------------------------------------------------------------------------

/// Coarse band of a mood value: low (1–3), moderate (4–6), high (7–10).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodLevel {
    Low,
    Moderate,
    High,
}

impl MoodLevel {
    pub fn from_value(value: u8) -> Self {
        match value {
            0..=3 => MoodLevel::Low,
            4..=6 => MoodLevel::Moderate,
            _ => MoodLevel::High,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MoodLevel::Low => "low",
            MoodLevel::Moderate => "moderate",
            MoodLevel::High => "high",
        }
    }

    pub fn suggestions(&self) -> &'static [&'static str] {
        match self {
            MoodLevel::Low => &[
                "Consider reaching out to a friend or family member",
                "Try some gentle breathing exercises",
                "Take a short walk if possible",
                "Listen to calming music",
                "Consider professional support if feelings persist",
            ],
            MoodLevel::Moderate => &[
                "Practice gratitude by listing 3 things you're thankful for",
                "Engage in a creative activity",
                "Connect with nature",
                "Do some light exercise or stretching",
                "Journal about your thoughts and feelings",
            ],
            MoodLevel::High => &[
                "Share your positive energy with others",
                "Reflect on what's contributing to your good mood",
                "Plan something nice for your future self",
                "Practice mindfulness to stay present",
                "Consider helping someone else who might need support",
            ],
        }
    }

    pub fn encouragement(&self) -> &'static str {
        match self {
            MoodLevel::Low => "I'm here for you. It's okay to have difficult days - they don't last forever. You're stronger than you know.",
            MoodLevel::Moderate => "You're doing well by checking in with yourself. Every small step towards wellness matters.",
            MoodLevel::High => "It's wonderful to see you feeling good! Remember to appreciate these positive moments.",
        }
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteSentiment {
    pub polarity: f64,
    pub subjectivity: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteAnalysis {
    pub themes: Vec<String>,
    pub word_count: usize,
    pub has_positive_words: bool,
    pub has_negative_words: bool,
}

/// One logged mood.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: Uuid,
    pub mood_value: u8,
    pub mood_label: String,
    #[serde(default)]
    pub note: String,
    pub timestamp: DateTime<Utc>,
    /// Free-form caller context (triggers, activities).
    #[serde(default)]
    pub context: serde_json::Map<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note_sentiment: Option<NoteSentiment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note_analysis: Option<NoteAnalysis>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodInsights {
    pub level: MoodLevel,
    pub suggestions: Vec<String>,
    pub encouragement: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note_analysis: Option<NoteAnalysis>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodLogOutcome {
    pub mood_entry: MoodEntry,
    pub insights: MoodInsights,
}

// ---------------------------------------------------------------------------
// Tracker
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct MoodTracker {
    entries: Vec<MoodEntry>,
    analyzer: SentimentAnalyzer,
}

impl MoodTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[MoodEntry] {
        &self.entries
    }

    /// Log a mood given as a number ("7", "6.5") or label ("good").
    pub fn log_mood(
        &mut self,
        mood: &str,
        note: &str,
        context: serde_json::Map<String, serde_json::Value>,
    ) -> CoreResult<MoodLogOutcome> {
        self.log_mood_at(mood, note, context, Utc::now())
    }

    pub fn log_mood_at(
        &mut self,
        mood: &str,
        note: &str,
        context: serde_json::Map<String, serde_json::Value>,
        at: DateTime<Utc>,
    ) -> CoreResult<MoodLogOutcome> {
        let value = parse_mood_value(mood).ok_or_else(|| CoreError::InvalidMood(mood.to_string()))?;
        let note = note.trim();
        let (note_sentiment, note_analysis) = if note.is_empty() {
            (None, None)
        } else {
            let s = self.analyzer.analyze(note);
            (
                Some(NoteSentiment {
                    polarity: s.polarity,
                    subjectivity: s.subjectivity,
                }),
                Some(analyze_note(note)),
            )
        };

        let entry = MoodEntry {
            id: Uuid::new_v4(),
            mood_value: value,
            mood_label: mood_label(value).to_string(),
            note: note.to_string(),
            timestamp: at,
            context,
            note_sentiment,
            note_analysis: note_analysis.clone(),
        };

        let level = MoodLevel::from_value(value);
        let insights = MoodInsights {
            level,
            suggestions: level.suggestions().iter().map(|s| s.to_string()).collect(),
            encouragement: level.encouragement().to_string(),
            note_analysis,
        };

        tracing::info!(
            target: "reflective::mood",
            mood_value = value,
            level = level.as_str(),
            has_note = !entry.note.is_empty(),
            "Mood logged"
        );

        self.entries.push(entry.clone());
        Ok(MoodLogOutcome {
            mood_entry: entry,
            insights,
        })
    }

    /// Entries with `start <= timestamp <= end`, oldest first.
    pub fn entries_in_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<&MoodEntry> {
        let mut out: Vec<&MoodEntry> = self
            .entries
            .iter()
            .filter(|e| e.timestamp >= start && e.timestamp <= end)
            .collect();
        out.sort_by_key(|e| e.timestamp);
        out
    }

    pub fn analytics(&self, days: u32) -> MoodAnalytics {
        self.analytics_at(days, Utc::now())
    }

    /// Analytics for the `days` window ending at `now`, `days` clamped to 1..=[`MAX_WINDOW_DAYS`].
    pub fn analytics_at(&self, days: u32, now: DateTime<Utc>) -> MoodAnalytics {
        let days = clamp_window(days);
        let entries = self.window(days, now);
        analytics::summarize(&entries, days)
    }

    pub fn patterns(&self, days: u32) -> MoodPatterns {
        self.patterns_at(days, Utc::now())
    }

    pub fn patterns_at(&self, days: u32, now: DateTime<Utc>) -> MoodPatterns {
        let days = clamp_window(days);
        let entries = self.window(days, now);
        analytics::patterns(&entries, days)
    }

    fn window(&self, days: u32, now: DateTime<Utc>) -> Vec<&MoodEntry> {
        let start = now
            .checked_sub_signed(Duration::days(i64::from(days)))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        self.entries_in_range(start, now)
    }
}

fn clamp_window(days: u32) -> u32 {
    days.clamp(1, MAX_WINDOW_DAYS)
}

/// Numeric input in 1..=10 (fractions truncate) or one of [`MOOD_LABELS`].
pub fn parse_mood_value(mood: &str) -> Option<u8> {
    let s = mood.trim().to_lowercase();
    if let Ok(v) = s.parse::<f64>() {
        if !v.is_finite() {
            return None;
        }
        let v = v.trunc();
        return if (1.0..=10.0).contains(&v) { Some(v as u8) } else { None };
    }
    MOOD_LABELS
        .iter()
        .position(|label| *label == s)
        .map(|i| (i + 1) as u8)
}

pub fn mood_label(value: u8) -> &'static str {
    MOOD_LABELS
        .get(usize::from(value).wrapping_sub(1))
        .copied()
        .unwrap_or("unknown")
}

/// Themes and tone words found in a mood note.
pub fn analyze_note(note: &str) -> NoteAnalysis {
    let lower = note.to_lowercase();
    NoteAnalysis {
        themes: NOTE_THEMES
            .iter()
            .filter(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
            .map(|(theme, _)| theme.to_string())
            .collect(),
        word_count: note.split_whitespace().count(),
        has_positive_words: POSITIVE_NOTE_WORDS.iter().any(|w| lower.contains(w)),
        has_negative_words: NEGATIVE_NOTE_WORDS.iter().any(|w| lower.contains(w)),
    }
}
