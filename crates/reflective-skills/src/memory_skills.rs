//! Memory skills: reflections, important memories, journal, recall, and recording replies in the
//! tenant's short-term buffer.

use reflective_core::memory::Importance;
use reflective_core::{AgentSkill, CoreResult, Speaker, TenantContext};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::store::SessionStore;

type SkillResult = Result<Value, Box<dyn std::error::Error + Send + Sync>>;

const SHOW_LIMIT: usize = 5;

// ---------------------------------------------------------------------------
// Shared with chat_turn
// ---------------------------------------------------------------------------

pub(crate) fn save_reflection(
    store: &SessionStore,
    ctx: &TenantContext,
    content: &str,
    category: &str,
) -> CoreResult<Value> {
    let reflection = store.with_memory(ctx, |m| m.save_reflection(content, category))?;
    Ok(json!({ "saved": true, "reflection": reflection }))
}

pub(crate) fn remember_important(
    store: &SessionStore,
    ctx: &TenantContext,
    content: &str,
    importance: Importance,
) -> CoreResult<Value> {
    let memory = store.with_memory(ctx, |m| m.remember_important(content, importance))?;
    Ok(json!({ "saved": true, "memory": memory }))
}

/// Profile, recent reflections, recalled memories, and counts.
pub(crate) fn show_memories(
    store: &SessionStore,
    ctx: &TenantContext,
    query: &str,
    limit: usize,
) -> Value {
    store.with_memory(ctx, |m| {
        json!({
            "profile": m.profile(),
            "recent_reflections": m.reflections(None, limit),
            "memories": m.relevant_memories(query, limit),
            "memory_stats": m.stats(),
        })
    })
}

fn parse_importance(raw: Option<&str>) -> Result<Importance, String> {
    match raw {
        None => Ok(Importance::default()),
        Some(s) => Importance::parse(s).ok_or_else(|| format!("unknown importance '{}'", s)),
    }
}

// ---------------------------------------------------------------------------
// save_reflection
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ReflectionArgs {
    content: String,
    #[serde(default)]
    category: String,
}

pub struct SaveReflection {
    store: Arc<SessionStore>,
}

impl SaveReflection {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl AgentSkill for SaveReflection {
    fn name(&self) -> &str {
        "save_reflection"
    }

    async fn execute(&self, ctx: &TenantContext, payload: Option<Value>) -> SkillResult {
        let payload = payload.ok_or("save_reflection requires payload: { content, category? }")?;
        let args: ReflectionArgs = serde_json::from_value(payload)?;
        let mut out = save_reflection(&self.store, ctx, &args.content, &args.category)?;
        out["status"] = json!("ok");
        out["skill"] = json!(self.name());
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// remember_important
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RememberArgs {
    content: String,
    /// low | medium | high; defaults to medium.
    #[serde(default)]
    importance: Option<String>,
}

pub struct RememberImportant {
    store: Arc<SessionStore>,
}

impl RememberImportant {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl AgentSkill for RememberImportant {
    fn name(&self) -> &str {
        "remember_important"
    }

    async fn execute(&self, ctx: &TenantContext, payload: Option<Value>) -> SkillResult {
        let payload = payload.ok_or("remember_important requires payload: { content, importance? }")?;
        let args: RememberArgs = serde_json::from_value(payload)?;
        let importance = parse_importance(args.importance.as_deref())?;
        let mut out = remember_important(&self.store, ctx, &args.content, importance)?;
        out["status"] = json!("ok");
        out["skill"] = json!(self.name());
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// show_memories
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
struct ShowArgs {
    #[serde(default)]
    query: String,
    #[serde(default)]
    limit: Option<usize>,
    /// Also return the profile facts stored under this category.
    #[serde(default)]
    category: Option<String>,
}

pub struct ShowMemories {
    store: Arc<SessionStore>,
}

impl ShowMemories {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl AgentSkill for ShowMemories {
    fn name(&self) -> &str {
        "show_memories"
    }

    async fn execute(&self, ctx: &TenantContext, payload: Option<Value>) -> SkillResult {
        let args: ShowArgs = match payload {
            Some(p) => serde_json::from_value(p)?,
            None => ShowArgs::default(),
        };
        let limit = args.limit.unwrap_or(SHOW_LIMIT);
        let mut out = json!({
            "status": "ok",
            "skill": self.name(),
            "memories": show_memories(&self.store, ctx, &args.query, limit),
        });
        if let Some(category) = args.category {
            let facts = self.store.with_memory(ctx, |m| m.profile().category(&category));
            out["category"] = json!(category);
            out["facts"] = json!(facts);
        }
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// journal
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
struct JournalArgs {
    #[serde(default)]
    text: Option<String>,
}

/// Saves `{ text }` as a journal entry; without text returns the latest entry.
pub struct Journal {
    store: Arc<SessionStore>,
}

impl Journal {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl AgentSkill for Journal {
    fn name(&self) -> &str {
        "journal"
    }

    async fn execute(&self, ctx: &TenantContext, payload: Option<Value>) -> SkillResult {
        let args: JournalArgs = match payload {
            Some(p) => serde_json::from_value(p)?,
            None => JournalArgs::default(),
        };
        let body = match args.text {
            Some(text) => {
                let entry = self.store.with_memory(ctx, |m| m.save_journal_entry(&text))?;
                json!({ "success": true, "saved": true, "entry": entry })
            }
            None => match self.store.with_memory(ctx, |m| m.latest_journal_entry().cloned()) {
                Some(entry) => json!({ "success": true, "entry": entry }),
                None => json!({ "success": false, "error": "No journal entries found." }),
            },
        };
        let mut out = body;
        out["status"] = json!("ok");
        out["skill"] = json!(self.name());
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// record_reply
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ReplyArgs {
    message: String,
}

/// Appends the generated reply to the tenant's short-term buffer.
pub struct RecordReply {
    store: Arc<SessionStore>,
}

impl RecordReply {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl AgentSkill for RecordReply {
    fn name(&self) -> &str {
        "record_reply"
    }

    async fn execute(&self, ctx: &TenantContext, payload: Option<Value>) -> SkillResult {
        let payload = payload.ok_or("record_reply requires payload: { message }")?;
        let args: ReplyArgs = serde_json::from_value(payload)?;
        if args.message.trim().is_empty() {
            return Err("record_reply requires a non-empty message".into());
        }
        let stats = self.store.with_memory(ctx, |m| {
            m.add_message(Speaker::Ai, args.message.trim());
            m.stats()
        });
        Ok(json!({
            "status": "ok",
            "skill": self.name(),
            "short_term_messages": stats.short_term_messages,
        }))
    }
}
