//! Rule-based sentiment, emotion, and urgency signals for user messages.

mod analyzer;
mod lexicon;

pub use analyzer::SentimentAnalyzer;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

/// Overall sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }

    /// Unknown or empty input => neutral.
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "positive" => Sentiment::Positive,
            "negative" => Sentiment::Negative,
            _ => Sentiment::Neutral,
        }
    }
}

/// Coarse severity of the user's stated state. Ordered low < medium < high < crisis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    #[default]
    Low,
    Medium,
    High,
    Crisis,
}

impl Urgency {
    pub const ALL: [Urgency; 4] = [Urgency::Low, Urgency::Medium, Urgency::High, Urgency::Crisis];

    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
            Urgency::Crisis => "crisis",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(Urgency::Low),
            "medium" => Some(Urgency::Medium),
            "high" => Some(Urgency::High),
            "crisis" => Some(Urgency::Crisis),
            _ => None,
        }
    }

    #[inline]
    pub fn is_elevated(&self) -> bool {
        matches!(self, Urgency::High | Urgency::Crisis)
    }
}

/// Basic emotions tracked by the keyword lexicon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Joy,
    Sadness,
    Anger,
    Fear,
    Disgust,
    Surprise,
    Trust,
    Anticipation,
}

impl Emotion {
    pub const ALL: [Emotion; 8] = [
        Emotion::Joy,
        Emotion::Sadness,
        Emotion::Anger,
        Emotion::Fear,
        Emotion::Disgust,
        Emotion::Surprise,
        Emotion::Trust,
        Emotion::Anticipation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Joy => "joy",
            Emotion::Sadness => "sadness",
            Emotion::Anger => "anger",
            Emotion::Fear => "fear",
            Emotion::Disgust => "disgust",
            Emotion::Surprise => "surprise",
            Emotion::Trust => "trust",
            Emotion::Anticipation => "anticipation",
        }
    }

    /// Contributes to the negative side of polarity.
    pub fn is_negative(&self) -> bool {
        matches!(self, Emotion::Sadness | Emotion::Fear | Emotion::Anger | Emotion::Disgust)
    }

    /// Contributes to the positive side of polarity.
    pub fn is_positive(&self) -> bool {
        matches!(self, Emotion::Joy | Emotion::Trust | Emotion::Anticipation)
    }

    /// Mood label used when building a recommender context from a dominant emotion.
    pub fn mood_label(&self) -> &'static str {
        match self {
            Emotion::Joy => "happy",
            Emotion::Sadness => "sad",
            Emotion::Anger => "angry",
            Emotion::Fear => "anxious",
            Emotion::Disgust => "upset",
            Emotion::Surprise => "surprised",
            Emotion::Trust => "calm",
            Emotion::Anticipation => "hopeful",
        }
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Phrases matched per mental-health indicator category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentalHealthIndicators {
    pub depression_signs: Vec<String>,
    pub anxiety_signs: Vec<String>,
    pub stress_indicators: Vec<String>,
    pub positive_coping: Vec<String>,
    pub support_seeking: Vec<String>,
    pub crisis_indicators: Vec<String>,
}

/// Full analysis of one message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub overall_sentiment: Sentiment,
    /// -1.0 (negative) ..= 1.0 (positive).
    pub polarity: f64,
    /// 0.0 (factual) ..= 1.0 (emotional).
    pub subjectivity: f64,
    /// Per-emotion score in 0.0..=1.0, in lexicon order. Empty for empty input.
    pub emotions: IndexMap<Emotion, f64>,
    pub mental_health_indicators: MentalHealthIndicators,
    pub urgency_level: Urgency,
    pub insights: Vec<String>,
    pub confidence: f64,
}

impl SentimentResult {
    /// Result for empty or whitespace-only text.
    pub fn empty() -> Self {
        Self {
            overall_sentiment: Sentiment::Neutral,
            polarity: 0.0,
            subjectivity: 0.0,
            emotions: IndexMap::new(),
            mental_health_indicators: MentalHealthIndicators::default(),
            urgency_level: Urgency::Low,
            insights: vec!["No text provided for analysis".to_string()],
            confidence: 0.0,
        }
    }

    /// Highest scoring emotion with a score above zero; first in lexicon order on ties.
    pub fn dominant_emotion(&self) -> Option<Emotion> {
        dominant(&self.emotions)
    }

    /// Crisis urgency or any crisis phrase.
    pub fn has_crisis_signals(&self) -> bool {
        self.urgency_level == Urgency::Crisis
            || !self.mental_health_indicators.crisis_indicators.is_empty()
    }
}

/// Aggregate over several analyses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionalSummary {
    pub average_emotions: IndexMap<Emotion, f64>,
    pub average_polarity: f64,
    pub average_subjectivity: f64,
    pub urgency_distribution: IndexMap<Urgency, usize>,
    pub total_messages: usize,
    pub dominant_emotion: Option<Emotion>,
}

fn dominant(emotions: &IndexMap<Emotion, f64>) -> Option<Emotion> {
    let mut best: Option<(Emotion, f64)> = None;
    for (&emotion, &score) in emotions {
        if score <= 0.0 {
            continue;
        }
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((emotion, score)),
        }
    }
    best.map(|(e, _)| e)
}
