//! Emergency resources, SOS replies, and the crisis message attached to risky turns.

use serde::{Deserialize, Serialize};

use crate::sentiment::{SentimentResult, Urgency};

/// A hotline or support organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyResource {
    pub name: String,
    pub phone: String,
    pub description: String,
    pub website: String,
}

/// Reply to an explicit `#sos` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SosResponse {
    pub message: String,
    pub urgency: Urgency,
    pub resources: Vec<EmergencyResource>,
}

const RESOURCES: [(&str, &str, &str, &str); 3] = [
    (
        "988 Suicide & Crisis Lifeline",
        "988",
        "24/7 crisis support",
        "https://988lifeline.org",
    ),
    (
        "Crisis Text Line",
        "Text HOME to 741741",
        "24/7 text-based crisis support",
        "https://www.crisistextline.org",
    ),
    (
        "NAMI (National Alliance on Mental Illness)",
        "1-800-950-NAMI",
        "Mental health information and support",
        "https://www.nami.org",
    ),
];

pub fn emergency_resources() -> Vec<EmergencyResource> {
    RESOURCES
        .iter()
        .map(|(name, phone, description, website)| EmergencyResource {
            name: name.to_string(),
            phone: phone.to_string(),
            description: description.to_string(),
            website: website.to_string(),
        })
        .collect()
}

/// Supportive SOS reply; high and crisis urgency point to emergency services first.
pub fn sos_response(urgency: Urgency) -> SosResponse {
    let message = if urgency.is_elevated() {
        "🚨 I'm here for you. If you're in immediate danger, please contact emergency services \
         (911, 988 Suicide & Crisis Lifeline). You're not alone - there are people who want to help. \
         Would you like me to provide some immediate coping strategies?"
    } else {
        "💙 I hear that you're going through a difficult time. Remember that it's okay to ask for help. \
         I'm here to listen and support you. Would you like to talk about what's on your mind or \
         explore some coping techniques together?"
    };
    tracing::warn!(target: "reflective::crisis", urgency = urgency.as_str(), "SOS requested");
    SosResponse {
        message: message.to_string(),
        urgency,
        resources: emergency_resources(),
    }
}

/// Resources message shown alongside a reply when the analysis carries crisis signals.
pub fn crisis_message(result: &SentimentResult) -> Option<String> {
    if !result.has_crisis_signals() {
        return None;
    }
    let mut lines = vec![
        "It sounds like you are going through something really painful. You deserve support right now.".to_string(),
        "If you are in immediate danger, please call 911 or your local emergency number.".to_string(),
    ];
    for r in emergency_resources() {
        lines.push(format!("- {}: {} ({})", r.name, r.phone, r.website));
    }
    Some(lines.join("\n"))
}
