//! Per-user conversation memory.
//!
//! Short term: a bounded buffer of recent chat messages, oldest dropped first.
//! Long term: profile facts, reflections, important memories, and journal entries, kept in
//! memory for the lifetime of the value. Recall is keyword overlap, not embeddings.

mod facts;

pub use facts::{extract_user_facts, UserFacts, UserProfile};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};

/// Messages kept in the short-term buffer by default.
pub const DEFAULT_MAX_MESSAGES: usize = 20;
/// Messages rendered by [`ConversationMemory::short_term_context`].
pub const SHORT_TERM_CONTEXT_MESSAGES: usize = 10;
/// Query words shorter than this are ignored by recall.
const MIN_QUERY_WORD: usize = 3;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    Human,
    Ai,
}

impl Speaker {
    pub fn label(&self) -> &'static str {
        match self {
            Speaker::Human => "Human",
            Speaker::Ai => "AI",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub speaker: Speaker,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    Low,
    #[default]
    Medium,
    High,
}

impl Importance {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(Importance::Low),
            "medium" => Some(Importance::Medium),
            "high" => Some(Importance::High),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reflection {
    pub id: Uuid,
    pub content: String,
    pub category: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportantMemory {
    pub id: Uuid,
    pub content: String,
    pub importance: Importance,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: Uuid,
    pub text: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryKind {
    Reflection,
    ImportantMemory,
    UserProfile,
}

/// One recalled long-term memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryHit {
    pub content: String,
    pub kind: MemoryKind,
    /// Distinct query words found in the content.
    pub score: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryStats {
    pub short_term_messages: usize,
    pub max_messages: usize,
    pub reflections: usize,
    pub important_memories: usize,
    pub journal_entries: usize,
    pub profile_facts: usize,
}

// ---------------------------------------------------------------------------
// ConversationMemory
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ConversationMemory {
    history: VecDeque<ChatMessage>,
    max_messages: usize,
    profile: UserProfile,
    reflections: Vec<Reflection>,
    important: Vec<ImportantMemory>,
    journal: Vec<JournalEntry>,
}

impl Default for ConversationMemory {
    fn default() -> Self {
        Self::with_max_messages(DEFAULT_MAX_MESSAGES)
    }
}

impl ConversationMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer holding at most `max` messages (at least one).
    pub fn with_max_messages(max: usize) -> Self {
        let max = max.max(1);
        Self {
            history: VecDeque::with_capacity(max),
            max_messages: max,
            profile: UserProfile::default(),
            reflections: Vec::new(),
            important: Vec::new(),
            journal: Vec::new(),
        }
    }

    // -- short term --------------------------------------------------------

    pub fn add_message(&mut self, speaker: Speaker, content: &str) {
        self.add_message_at(speaker, content, Utc::now());
    }

    pub fn add_message_at(&mut self, speaker: Speaker, content: &str, at: DateTime<Utc>) {
        self.history.push_back(ChatMessage {
            speaker,
            content: content.to_string(),
            timestamp: at,
        });
        while self.history.len() > self.max_messages {
            self.history.pop_front();
        }
    }

    /// Record one user message and the reply to it.
    pub fn add_exchange(&mut self, human: &str, ai: &str) {
        self.add_message(Speaker::Human, human);
        self.add_message(Speaker::Ai, ai);
    }

    pub fn history(&self) -> impl Iterator<Item = &ChatMessage> {
        self.history.iter()
    }

    /// Last [`SHORT_TERM_CONTEXT_MESSAGES`] messages as `Human: ...` / `AI: ...` lines.
    pub fn short_term_context(&self) -> String {
        let skip = self.history.len().saturating_sub(SHORT_TERM_CONTEXT_MESSAGES);
        self.history
            .iter()
            .skip(skip)
            .map(|m| format!("{}: {}", m.speaker.label(), m.content))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn clear_short_term(&mut self) {
        self.history.clear();
        tracing::debug!(target: "reflective::memory", "Short-term memory cleared");
    }

    // -- profile -----------------------------------------------------------

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Extract facts from a user message and merge them into the profile.
    pub fn learn_from_message(&mut self, message: &str) -> UserFacts {
        let facts = extract_user_facts(message);
        if !facts.is_empty() {
            self.profile.merge(&facts, Utc::now());
            tracing::info!(
                target: "reflective::memory",
                facts = self.profile.fact_count(),
                "User profile updated"
            );
        }
        facts
    }

    // -- long term ---------------------------------------------------------

    pub fn save_reflection(&mut self, content: &str, category: &str) -> CoreResult<Reflection> {
        self.save_reflection_at(content, category, Utc::now())
    }

    /// Store a reflection. A blank category becomes `general`.
    pub fn save_reflection_at(
        &mut self,
        content: &str,
        category: &str,
        at: DateTime<Utc>,
    ) -> CoreResult<Reflection> {
        let content = non_empty(content, "reflection")?;
        let category = match category.trim() {
            "" => "general",
            c => c,
        };
        let reflection = Reflection {
            id: Uuid::new_v4(),
            content,
            category: category.to_string(),
            timestamp: at,
        };
        tracing::info!(target: "reflective::memory", category = %reflection.category, "Reflection saved");
        self.reflections.push(reflection.clone());
        Ok(reflection)
    }

    /// Reflections newest first, optionally only one category.
    pub fn reflections(&self, category: Option<&str>, limit: usize) -> Vec<&Reflection> {
        let mut out: Vec<&Reflection> = self
            .reflections
            .iter()
            .filter(|r| category.map_or(true, |c| r.category == c))
            .collect();
        out.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        out.truncate(limit);
        out
    }

    pub fn remember_important(
        &mut self,
        content: &str,
        importance: Importance,
    ) -> CoreResult<ImportantMemory> {
        self.remember_important_at(content, importance, Utc::now())
    }

    pub fn remember_important_at(
        &mut self,
        content: &str,
        importance: Importance,
        at: DateTime<Utc>,
    ) -> CoreResult<ImportantMemory> {
        let memory = ImportantMemory {
            id: Uuid::new_v4(),
            content: non_empty(content, "memory")?,
            importance,
            timestamp: at,
        };
        tracing::info!(target: "reflective::memory", importance = ?importance, "Important memory saved");
        self.important.push(memory.clone());
        Ok(memory)
    }

    pub fn important_memories(&self) -> &[ImportantMemory] {
        &self.important
    }

    pub fn save_journal_entry(&mut self, text: &str) -> CoreResult<JournalEntry> {
        self.save_journal_entry_at(text, Utc::now())
    }

    pub fn save_journal_entry_at(&mut self, text: &str, at: DateTime<Utc>) -> CoreResult<JournalEntry> {
        let entry = JournalEntry {
            id: Uuid::new_v4(),
            text: non_empty(text, "journal entry")?,
            date: at,
        };
        self.journal.push(entry.clone());
        Ok(entry)
    }

    pub fn latest_journal_entry(&self) -> Option<&JournalEntry> {
        self.journal.iter().max_by_key(|e| e.date)
    }

    /// Long-term memories sharing words with `query`, best match first (newest on ties).
    /// A query with no usable words returns the newest memories.
    pub fn relevant_memories(&self, query: &str, limit: usize) -> Vec<MemoryHit> {
        let words: HashSet<String> = query
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| w.chars().count() >= MIN_QUERY_WORD)
            .map(str::to_lowercase)
            .collect();
        let score = |content: &str| {
            let lower = content.to_lowercase();
            words.iter().filter(|w| lower.contains(w.as_str())).count()
        };

        let profile_time = self.profile.last_updated;
        let profile_facts = self
            .profile
            .name
            .iter()
            .map(|n| format!("name: {}", n))
            .chain(self.profile.pets.iter().map(|p| format!("pet: {}", p)))
            .chain(
                self.profile
                    .support_preferences
                    .iter()
                    .map(|p| format!("support preference: {}", p)),
            )
            .chain(self.profile.notes.iter().map(|n| format!("note: {}", n)))
            .map(|content| (content, MemoryKind::UserProfile, profile_time));

        let mut hits: Vec<MemoryHit> = self
            .reflections
            .iter()
            .map(|r| (r.content.clone(), MemoryKind::Reflection, Some(r.timestamp)))
            .chain(
                self.important
                    .iter()
                    .map(|m| (m.content.clone(), MemoryKind::ImportantMemory, Some(m.timestamp))),
            )
            .chain(profile_facts)
            .map(|(content, kind, timestamp)| MemoryHit {
                score: score(&content),
                content,
                kind,
                timestamp,
            })
            .filter(|hit| words.is_empty() || hit.score > 0)
            .collect();
        hits.sort_by(|a, b| b.score.cmp(&a.score).then(b.timestamp.cmp(&a.timestamp)));
        hits.truncate(limit);
        hits
    }

    pub fn stats(&self) -> MemoryStats {
        MemoryStats {
            short_term_messages: self.history.len(),
            max_messages: self.max_messages,
            reflections: self.reflections.len(),
            important_memories: self.important.len(),
            journal_entries: self.journal.len(),
            profile_facts: self.profile.fact_count(),
        }
    }
}

fn non_empty(content: &str, what: &str) -> CoreResult<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(CoreError::EmptyContent(what.to_string()));
    }
    Ok(trimmed.to_string())
}
