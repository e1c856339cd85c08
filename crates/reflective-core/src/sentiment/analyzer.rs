//! Lexicon-based sentiment analyzer.
//!
//! Polarity comes from the balance of positive (joy, trust, anticipation) and negative
//! (sadness, fear, anger, disgust) keyword mass after intensity modifiers and negation.
//! Subjectivity is the share of emotional and intensifying words.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use super::lexicon::{self, CONTRACTIONS};
use super::{dominant, Emotion, EmotionalSummary, MentalHealthIndicators, Sentiment, SentimentResult, Urgency};

static PUNCT_RUNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [(r"!{2,}", "!"), (r"\?{2,}", "?"), (r"\.{3,}", "...")]
        .into_iter()
        .filter_map(|(pattern, replacement)| Regex::new(pattern).ok().map(|re| (re, replacement)))
        .collect()
});

/// Polarity at or beyond this magnitude decides the overall label on its own.
const POLARITY_THRESHOLD: f64 = 0.3;

/// Emotions above this score are named in the insights.
const DOMINANT_EMOTION_THRESHOLD: f64 = 0.3;

#[derive(Debug, Clone, Default)]
pub struct SentimentAnalyzer;

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, text: &str) -> SentimentResult {
        if text.trim().is_empty() {
            return SentimentResult::empty();
        }

        let cleaned = preprocess(text);
        let words: Vec<&str> = cleaned.split_whitespace().map(trim_word).collect();

        let raw = raw_emotion_scores(&words);
        let emotions = normalize(&raw, words.len());
        let polarity = polarity(&raw);
        let subjectivity = subjectivity(&words);
        let indicators = detect_indicators(&cleaned);
        let urgency = detect_urgency(&cleaned);
        let overall = classify(polarity, &emotions);
        let insights = insights(overall, &emotions, &indicators, urgency);
        let max_emotion = emotions.values().copied().fold(0.0, f64::max);
        let confidence = ((subjectivity + max_emotion) / 2.0).min(1.0);

        tracing::debug!(
            target: "reflective::sentiment",
            sentiment = overall.as_str(),
            urgency = urgency.as_str(),
            polarity,
            "Analyzed message"
        );

        SentimentResult {
            overall_sentiment: overall,
            polarity,
            subjectivity,
            emotions,
            mental_health_indicators: indicators,
            urgency_level: urgency,
            insights,
            confidence,
        }
    }

    pub fn analyze_batch<S: AsRef<str>>(&self, texts: &[S]) -> Vec<SentimentResult> {
        texts.iter().map(|t| self.analyze(t.as_ref())).collect()
    }

    /// Averages over several analyses; `None` when there is nothing to summarize.
    pub fn emotional_summary(&self, results: &[SentimentResult]) -> Option<EmotionalSummary> {
        if results.is_empty() {
            return None;
        }
        let count = results.len() as f64;

        let mut totals: IndexMap<Emotion, f64> = IndexMap::new();
        let mut urgency_distribution: IndexMap<Urgency, usize> =
            Urgency::ALL.iter().map(|u| (*u, 0)).collect();
        let mut polarity = 0.0;
        let mut subjectivity = 0.0;

        for r in results {
            for (emotion, score) in &r.emotions {
                *totals.entry(*emotion).or_insert(0.0) += score;
            }
            polarity += r.polarity;
            subjectivity += r.subjectivity;
            *urgency_distribution.entry(r.urgency_level).or_insert(0) += 1;
        }

        let average_emotions: IndexMap<Emotion, f64> =
            totals.into_iter().map(|(e, t)| (e, t / count)).collect();
        let dominant_emotion = dominant(&average_emotions);

        Some(EmotionalSummary {
            average_emotions,
            average_polarity: polarity / count,
            average_subjectivity: subjectivity / count,
            urgency_distribution,
            total_messages: results.len(),
            dominant_emotion,
        })
    }
}

/// Lowercase, collapse punctuation runs, expand contractions.
fn preprocess(text: &str) -> String {
    let mut out = text.to_lowercase().replace('\u{2019}', "'");
    for (re, replacement) in PUNCT_RUNS.iter() {
        out = re.replace_all(&out, *replacement).into_owned();
    }
    for (contraction, expansion) in CONTRACTIONS {
        out = out.replace(contraction, expansion);
    }
    out
}

fn trim_word(word: &str) -> &str {
    word.trim_matches(|c: char| !c.is_alphanumeric())
}

/// The word is a keyword or a keyword plus one inflection suffix ("sadness", "worried").
fn is_emotion_word(word: &str, emotion: Emotion) -> bool {
    !word.is_empty()
        && lexicon::emotion_keywords(emotion).iter().any(|k| {
            word.strip_prefix(k)
                .is_some_and(|rest| rest.is_empty() || lexicon::INFLECTIONS.contains(&rest))
        })
}

/// Unnormalized per-emotion sums; may be negative when negated.
fn raw_emotion_scores(words: &[&str]) -> IndexMap<Emotion, f64> {
    Emotion::ALL
        .iter()
        .map(|&emotion| {
            let mut score = 0.0;
            for (i, word) in words.iter().enumerate() {
                if !is_emotion_word(word, emotion) {
                    continue;
                }
                let mut base = 1.0;
                if i > 0 {
                    if let Some(m) = lexicon::intensity_modifier(words[i - 1]) {
                        if m < 0.0 {
                            base = -base;
                        } else {
                            base *= m;
                        }
                    }
                }
                score += base;
            }
            (emotion, score)
        })
        .collect()
}

fn normalize(raw: &IndexMap<Emotion, f64>, word_count: usize) -> IndexMap<Emotion, f64> {
    let scale = (word_count as f64 / 10.0).max(1.0);
    raw.iter()
        .map(|(&e, &s)| (e, (s / scale).clamp(0.0, 1.0)))
        .collect()
}

fn polarity(raw: &IndexMap<Emotion, f64>) -> f64 {
    let positive: f64 = raw.iter().filter(|(e, _)| e.is_positive()).map(|(_, s)| s).sum();
    let negative: f64 = raw.iter().filter(|(e, _)| e.is_negative()).map(|(_, s)| s).sum();
    let mass = (positive.abs() + negative.abs()).max(1.0);
    ((positive - negative) / mass).clamp(-1.0, 1.0)
}

fn subjectivity(words: &[&str]) -> f64 {
    let non_empty = words.iter().filter(|w| !w.is_empty()).count();
    if non_empty == 0 {
        return 0.0;
    }
    let charged = words
        .iter()
        .filter(|w| {
            Emotion::ALL.iter().any(|&e| is_emotion_word(w, e))
                || lexicon::intensity_modifier(w).is_some_and(|m| m > 0.0)
        })
        .count();
    (charged as f64 / non_empty as f64 * 2.0).min(1.0)
}

fn matches(text: &str, phrases: &[&str]) -> Vec<String> {
    phrases
        .iter()
        .filter(|p| text.contains(*p))
        .map(|p| p.to_string())
        .collect()
}

fn detect_indicators(text: &str) -> MentalHealthIndicators {
    MentalHealthIndicators {
        depression_signs: matches(text, lexicon::DEPRESSION_SIGNS),
        anxiety_signs: matches(text, lexicon::ANXIETY_SIGNS),
        stress_indicators: matches(text, lexicon::STRESS_INDICATORS),
        positive_coping: matches(text, lexicon::POSITIVE_COPING),
        support_seeking: matches(text, lexicon::SUPPORT_SEEKING),
        crisis_indicators: matches(text, lexicon::CRISIS_INDICATORS),
    }
}

fn detect_urgency(text: &str) -> Urgency {
    let any = |phrases: &[&str]| phrases.iter().any(|p| text.contains(p));
    if any(lexicon::CRISIS_URGENCY) {
        Urgency::Crisis
    } else if any(lexicon::HIGH_URGENCY) {
        Urgency::High
    } else if any(lexicon::MEDIUM_URGENCY) {
        Urgency::Medium
    } else {
        Urgency::Low
    }
}

fn classify(polarity: f64, emotions: &IndexMap<Emotion, f64>) -> Sentiment {
    if polarity >= POLARITY_THRESHOLD {
        return Sentiment::Positive;
    }
    if polarity <= -POLARITY_THRESHOLD {
        return Sentiment::Negative;
    }
    match dominant(emotions) {
        Some(e) if e.is_negative() => Sentiment::Negative,
        Some(e) if e.is_positive() => Sentiment::Positive,
        _ => Sentiment::Neutral,
    }
}

fn insights(
    sentiment: Sentiment,
    emotions: &IndexMap<Emotion, f64>,
    indicators: &MentalHealthIndicators,
    urgency: Urgency,
) -> Vec<String> {
    let mut out = Vec::new();

    out.push(
        match sentiment {
            Sentiment::Negative => "The message expresses negative emotions or concerns",
            Sentiment::Positive => "The message expresses positive emotions or experiences",
            Sentiment::Neutral => "The message has a neutral emotional tone",
        }
        .to_string(),
    );

    let strong: Vec<&str> = emotions
        .iter()
        .filter(|(_, &s)| s > DOMINANT_EMOTION_THRESHOLD)
        .map(|(e, _)| e.as_str())
        .collect();
    if !strong.is_empty() {
        out.push(format!("Dominant emotions detected: {}", strong.join(", ")));
    }

    if !indicators.crisis_indicators.is_empty() {
        out.push("⚠️ Crisis indicators detected - immediate support may be needed".to_string());
    } else if !indicators.depression_signs.is_empty() {
        out.push("Signs of depression detected".to_string());
    } else if !indicators.anxiety_signs.is_empty() {
        out.push("Signs of anxiety detected".to_string());
    }

    if !indicators.positive_coping.is_empty() {
        out.push("✅ Positive coping strategies mentioned".to_string());
    }
    if !indicators.support_seeking.is_empty() {
        out.push("User appears to be seeking support or help".to_string());
    }

    match urgency {
        Urgency::Crisis => out.push("🚨 CRISIS LEVEL: Immediate intervention may be required".to_string()),
        Urgency::High => out.push("High urgency: User needs prompt support".to_string()),
        Urgency::Medium => out.push("Medium urgency: User would benefit from support".to_string()),
        Urgency::Low => {}
    }

    out
}
