//! Personal facts picked out of chat messages and merged into the user's profile.
//!
//! Only explicit phrasings count: `store this: <fact>`, `my name is <name>`, `call me <name>`.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

const STORE_PREFIXES: [&str; 2] = ["store this:", "store this :"];

static NAME_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [r"my name is ([a-z\s]+)", r"call me ([a-z\s]+)"]
        .iter()
        .filter_map(|p| Regex::new(p).ok())
        .collect()
});

/// Facts found in one message. Empty when the message matched no pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFacts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pets: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub support_preferences: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl UserFacts {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.pets.is_empty()
            && self.support_preferences.is_empty()
            && self.notes.is_empty()
    }

    /// Acknowledgement sentence for what was stored, `None` when nothing was.
    pub fn feedback(&self) -> Option<String> {
        let mut parts = Vec::new();
        if let Some(name) = &self.name {
            parts.push(format!(
                "I've stored that your name is {}. This will help me personalize our conversations.",
                name
            ));
        }
        if !self.pets.is_empty() {
            parts.push(format!("I've stored that your pet's name is {}.", self.pets.join(", ")));
        }
        if !self.support_preferences.is_empty() {
            parts.push(format!(
                "I've stored your support preference: {}.",
                self.support_preferences.join(", ")
            ));
        }
        if !self.notes.is_empty() {
            parts.push(format!("I've stored this note: {}.", self.notes.join(", ")));
        }
        (!parts.is_empty()).then(|| parts.join(" "))
    }
}

/// Accumulated facts about one user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub pets: Vec<String>,
    #[serde(default)]
    pub support_preferences: Vec<String>,
    #[serde(default)]
    pub notes: Vec<String>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

impl UserProfile {
    /// Merge `facts`: the name is replaced, lists gain the values they do not already hold.
    pub fn merge(&mut self, facts: &UserFacts, at: DateTime<Utc>) {
        if facts.is_empty() {
            return;
        }
        if let Some(name) = &facts.name {
            self.name = Some(name.clone());
        }
        merge_unique(&mut self.pets, &facts.pets);
        merge_unique(&mut self.support_preferences, &facts.support_preferences);
        merge_unique(&mut self.notes, &facts.notes);
        self.last_updated = Some(at);
    }

    /// Facts stored under `category` (`name`, `pets`, `support_preferences`, `notes`).
    pub fn category(&self, category: &str) -> Vec<String> {
        match category {
            "name" => self.name.iter().cloned().collect(),
            "pets" => self.pets.clone(),
            "support_preferences" => self.support_preferences.clone(),
            "notes" => self.notes.clone(),
            _ => Vec::new(),
        }
    }

    /// Number of stored facts, the name counting as one.
    pub fn fact_count(&self) -> usize {
        usize::from(self.name.is_some())
            + self.pets.len()
            + self.support_preferences.len()
            + self.notes.len()
    }
}

fn merge_unique(into: &mut Vec<String>, values: &[String]) {
    for v in values {
        if !into.contains(v) {
            into.push(v.clone());
        }
    }
}

/// Facts stated in `message`.
pub fn extract_user_facts(message: &str) -> UserFacts {
    let lower = message.trim().to_lowercase();
    let mut facts = UserFacts::default();

    if let Some(fact) = STORE_PREFIXES.iter().find_map(|p| lower.strip_prefix(p)) {
        let fact = fact.trim();
        if fact.is_empty() {
            return facts;
        }
        let pet_name = (fact.contains("dog") || fact.contains("cat"))
            .then(|| fact.split_once("name is"))
            .flatten()
            .map(|(_, name)| title_case(name.trim()));
        if let Some(name) = pet_name {
            facts.pets.push(name);
        } else if let Some((_, activity)) =
            fact.split_once("like").or_else(|| fact.split_once("enjoy"))
        {
            facts.support_preferences.push(activity.trim().to_string());
        } else {
            facts.notes.push(fact.to_string());
        }
        return facts;
    }

    // Later patterns win, so "call me" overrides "my name is" in the same message.
    for re in NAME_PATTERNS.iter() {
        if let Some(m) = re.captures(&lower).and_then(|c| c.get(1)) {
            let name = title_case(m.as_str().trim());
            if name.chars().count() > 1 {
                facts.name = Some(name);
            }
        }
    }
    facts
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
