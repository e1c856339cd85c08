//! Keyword and phrase lists. Phrases are written after contraction expansion
//! ("cannot", "do not"), because matching runs on preprocessed text.

use super::Emotion;

pub(crate) fn emotion_keywords(emotion: Emotion) -> &'static [&'static str] {
    match emotion {
        Emotion::Joy => &[
            "happy", "joyful", "excited", "thrilled", "elated", "cheerful", "delighted", "pleased",
            "content", "glad", "euphoric", "blissful", "overjoyed", "ecstatic", "wonderful",
            "amazing", "fantastic",
        ],
        Emotion::Sadness => &[
            "sad", "depressed", "down", "blue", "melancholy", "gloomy", "dejected", "despondent",
            "heartbroken", "miserable", "sorrowful", "grief", "mourn", "weep", "cry", "tearful",
            "devastated",
        ],
        Emotion::Anger => &[
            "angry", "mad", "furious", "rage", "irritated", "annoyed", "frustrated", "outraged",
            "livid", "enraged", "hostile", "resentful", "bitter", "aggravated", "pissed", "irate",
        ],
        Emotion::Fear => &[
            "afraid", "scared", "terrified", "frightened", "anxious", "worried", "nervous",
            "panic", "phobia", "dread", "alarmed", "apprehensive", "uneasy", "concerned",
            "stressed", "overwhelmed",
        ],
        Emotion::Disgust => &[
            "disgusted", "revolted", "repulsed", "sickened", "nauseated", "appalled", "horrified",
            "repelled", "grossed", "offended",
        ],
        Emotion::Surprise => &[
            "surprised", "shocked", "amazed", "astonished", "stunned", "bewildered", "startled",
            "astounded", "flabbergasted",
        ],
        Emotion::Trust => &[
            "trust", "confident", "secure", "safe", "comfortable", "reassured", "certain",
            "believing", "faith", "reliable",
        ],
        Emotion::Anticipation => &[
            "excited", "eager", "hopeful", "optimistic", "expectant", "anticipating", "pumped",
        ],
    }
}

/// Endings an emotion keyword may carry and still count.
pub(crate) const INFLECTIONS: &[&str] = &["s", "es", "d", "ed", "ing", "ly", "ness", "er", "est"];

/// Multiplier applied to an emotion word by the word before it. Negative means negation.
pub(crate) fn intensity_modifier(word: &str) -> Option<f64> {
    let m = match word {
        "very" => 1.5,
        "extremely" | "incredibly" => 2.0,
        "absolutely" | "ultra" => 1.8,
        "completely" => 1.7,
        "totally" | "super" => 1.6,
        "really" | "so" => 1.4,
        "quite" => 1.3,
        "pretty" => 1.2,
        "slightly" => 0.7,
        "somewhat" => 0.8,
        "barely" => 0.5,
        "hardly" | "scarcely" => 0.4,
        "not" | "no" | "never" | "nothing" | "nobody" | "nowhere" => -1.0,
        _ => return None,
    };
    Some(m)
}

pub(crate) const CONTRACTIONS: [(&str, &str); 8] = [
    ("won't", "will not"),
    ("can't", "cannot"),
    ("n't", " not"),
    ("'re", " are"),
    ("'ve", " have"),
    ("'ll", " will"),
    ("'d", " would"),
    ("'m", " am"),
];

pub(crate) const DEPRESSION_SIGNS: &[&str] = &[
    "hopeless", "worthless", "empty", "numb", "exhausted", "cannot sleep", "no energy",
    "do not care", "giving up", "pointless", "useless", "burden",
];

pub(crate) const ANXIETY_SIGNS: &[&str] = &[
    "panic", "racing thoughts", "cannot breathe", "heart racing", "sweating", "shaking", "dizzy",
    "nauseous", "restless", "on edge", "jumpy",
];

pub(crate) const STRESS_INDICATORS: &[&str] = &[
    "overwhelmed", "pressure", "deadline", "too much", "cannot handle", "breaking point",
    "stressed out", "burned out", "exhausted",
];

pub(crate) const POSITIVE_COPING: &[&str] = &[
    "meditation", "exercise", "therapy", "counseling", "support group", "self care",
    "journaling", "mindfulness", "breathing exercises", "talking to someone",
];

pub(crate) const SUPPORT_SEEKING: &[&str] = &[
    "need help", "talk to someone", "therapist", "counselor", "support", "advice", "guidance",
    "professional help",
];

pub(crate) const CRISIS_INDICATORS: &[&str] = &[
    "end it all", "cannot go on", "no point", "better off dead", "hurt myself", "suicide",
    "suicidal", "kill myself", "end my life",
];

pub(crate) const CRISIS_URGENCY: &[&str] = &[
    "end it all", "cannot go on", "hurt myself", "kill myself", "suicide", "suicidal",
    "end my life", "no point living",
];

pub(crate) const HIGH_URGENCY: &[&str] = &[
    "emergency", "urgent", "crisis", "immediate help", "cannot breathe", "panic attack",
    "breaking down",
];

pub(crate) const MEDIUM_URGENCY: &[&str] = &[
    "really struggling", "need help", "cannot handle", "breaking point", "overwhelmed",
    "desperate",
];
