//! Task skills over the tenant's [`TaskTracker`](reflective_core::TaskTracker).
//!
//! Unrecognized priority, category, or impact strings on creation fall back to the defaults;
//! on update and listing they are rejected.

use chrono::Utc;
use reflective_core::tasks::{
    parse_due_date, TaskCategory, TaskPriority, TaskStatus, WellnessImpact,
};
use reflective_core::{AgentSkill, CoreResult, TaskDraft, TaskTracker, TaskUpdate, TenantContext};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

use crate::store::SessionStore;

type SkillResult = Result<Value, Box<dyn std::error::Error + Send + Sync>>;

const ANALYTICS_DAYS: u32 = 30;
const UPCOMING_DAYS: u32 = 7;

// ---------------------------------------------------------------------------
// Shared with chat_turn
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub(crate) struct NewTaskArgs {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub wellness_impact: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
}

impl NewTaskArgs {
    fn into_draft(self) -> TaskDraft {
        TaskDraft {
            description: self.description,
            priority: self
                .priority
                .as_deref()
                .and_then(TaskPriority::parse)
                .unwrap_or_default(),
            category: self
                .category
                .as_deref()
                .and_then(TaskCategory::parse)
                .unwrap_or_default(),
            wellness_impact: self
                .wellness_impact
                .as_deref()
                .and_then(WellnessImpact::parse)
                .unwrap_or_default(),
            due_date: self.due_date.as_deref().and_then(parse_due_date),
            ..TaskDraft::new(self.title)
        }
    }
}

pub(crate) fn add_task(store: &SessionStore, ctx: &TenantContext, args: NewTaskArgs) -> CoreResult<Value> {
    let created = store.with_tasks(ctx, |t| t.add_task(args.into_draft()))?;
    Ok(json!({
        "success": true,
        "task": created.task,
        "motivation": created.motivation,
        "wellness_tip": created.wellness_tip,
    }))
}

fn parse_id(raw: &str) -> Result<Uuid, String> {
    Uuid::parse_str(raw.trim()).map_err(|_| format!("invalid task id '{}'", raw))
}

fn parse_field<T>(raw: Option<&str>, what: &str, parse: fn(&str) -> Option<T>) -> Result<Option<T>, String> {
    raw.map(|s| parse(s).ok_or_else(|| format!("unknown {} '{}'", what, s)))
        .transpose()
}

// ---------------------------------------------------------------------------
// add_task
// ---------------------------------------------------------------------------

pub struct AddTask {
    store: Arc<SessionStore>,
}

impl AddTask {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl AgentSkill for AddTask {
    fn name(&self) -> &str {
        "add_task"
    }

    async fn execute(&self, ctx: &TenantContext, payload: Option<Value>) -> SkillResult {
        let payload = payload.ok_or(
            "add_task requires payload: { title, description?, priority?, category?, wellness_impact?, due_date? }",
        )?;
        let args: NewTaskArgs = serde_json::from_value(payload)?;
        let mut out = add_task(&self.store, ctx, args)?;
        out["status"] = json!("ok");
        out["skill"] = json!(self.name());
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// list_tasks
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
struct ListArgs {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    category: Option<String>,
}

pub struct ListTasks {
    store: Arc<SessionStore>,
}

impl ListTasks {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl AgentSkill for ListTasks {
    fn name(&self) -> &str {
        "list_tasks"
    }

    async fn execute(&self, ctx: &TenantContext, payload: Option<Value>) -> SkillResult {
        let args: ListArgs = match payload {
            Some(p) => serde_json::from_value(p)?,
            None => ListArgs::default(),
        };
        let status = parse_field(args.status.as_deref(), "status", TaskStatus::parse)?;
        let category = parse_field(args.category.as_deref(), "category", TaskCategory::parse)?;
        let tasks = self.store.with_tasks(ctx, |t| {
            t.tasks(status, category).into_iter().cloned().collect::<Vec<_>>()
        });
        Ok(json!({
            "status": "ok",
            "skill": self.name(),
            "count": tasks.len(),
            "tasks": tasks,
        }))
    }
}

// ---------------------------------------------------------------------------
// update_task
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct UpdateArgs {
    task_id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    priority: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    due_date: Option<String>,
    #[serde(default)]
    wellness_impact: Option<String>,
}

impl UpdateArgs {
    fn into_update(self) -> Result<(Uuid, TaskUpdate), String> {
        let due_date = match self.due_date.as_deref() {
            None => None,
            Some(raw) => Some(parse_due_date(raw).ok_or_else(|| format!("unrecognized due date '{}'", raw))?),
        };
        let update = TaskUpdate {
            title: self.title,
            description: self.description,
            priority: parse_field(self.priority.as_deref(), "priority", TaskPriority::parse)?,
            category: parse_field(self.category.as_deref(), "category", TaskCategory::parse)?,
            status: parse_field(self.status.as_deref(), "status", TaskStatus::parse)?,
            due_date,
            wellness_impact: parse_field(
                self.wellness_impact.as_deref(),
                "wellness impact",
                WellnessImpact::parse,
            )?,
        };
        Ok((parse_id(&self.task_id)?, update))
    }
}

pub struct UpdateTask {
    store: Arc<SessionStore>,
}

impl UpdateTask {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl AgentSkill for UpdateTask {
    fn name(&self) -> &str {
        "update_task"
    }

    async fn execute(&self, ctx: &TenantContext, payload: Option<Value>) -> SkillResult {
        let payload = payload.ok_or("update_task requires payload: { task_id, ...fields }")?;
        let args: UpdateArgs = serde_json::from_value(payload)?;
        let (id, update) = args.into_update()?;
        let updated = self.store.with_tasks(ctx, |t| t.update_task(id, update))?;
        let mut out = json!({
            "status": "ok",
            "skill": self.name(),
            "success": true,
            "task": updated.task,
        });
        if let Some(celebration) = updated.celebration {
            out["celebration"] = json!(celebration);
        }
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// delete_task
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct DeleteArgs {
    task_id: String,
}

pub struct DeleteTask {
    store: Arc<SessionStore>,
}

impl DeleteTask {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl AgentSkill for DeleteTask {
    fn name(&self) -> &str {
        "delete_task"
    }

    async fn execute(&self, ctx: &TenantContext, payload: Option<Value>) -> SkillResult {
        let payload = payload.ok_or("delete_task requires payload: { task_id }")?;
        let args: DeleteArgs = serde_json::from_value(payload)?;
        let id = parse_id(&args.task_id)?;
        let deleted = self.store.with_tasks(ctx, |t| t.delete_task(id));
        Ok(json!({
            "status": "ok",
            "skill": self.name(),
            "deleted": deleted,
        }))
    }
}

// ---------------------------------------------------------------------------
// task_analytics / upcoming_tasks
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
struct DaysArgs {
    #[serde(default)]
    days: Option<u32>,
}

fn days_arg(payload: Option<Value>, default: u32) -> Result<u32, serde_json::Error> {
    let args: DaysArgs = match payload {
        Some(p) => serde_json::from_value(p)?,
        None => DaysArgs::default(),
    };
    Ok(args.days.unwrap_or(default))
}

pub struct TaskAnalyticsSkill {
    store: Arc<SessionStore>,
}

impl TaskAnalyticsSkill {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl AgentSkill for TaskAnalyticsSkill {
    fn name(&self) -> &str {
        "task_analytics"
    }

    async fn execute(&self, ctx: &TenantContext, payload: Option<Value>) -> SkillResult {
        let days = days_arg(payload, ANALYTICS_DAYS)?;
        let analytics = self.store.with_tasks(ctx, |t| t.analytics(days));
        Ok(json!({
            "status": "ok",
            "skill": self.name(),
            "analytics": analytics,
        }))
    }
}

pub struct UpcomingTasks {
    store: Arc<SessionStore>,
}

impl UpcomingTasks {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl AgentSkill for UpcomingTasks {
    fn name(&self) -> &str {
        "upcoming_tasks"
    }

    async fn execute(&self, ctx: &TenantContext, payload: Option<Value>) -> SkillResult {
        let days = days_arg(payload, UPCOMING_DAYS)?;
        let upcoming = self.store.with_tasks(ctx, |t| t.upcoming(days));
        Ok(json!({
            "status": "ok",
            "skill": self.name(),
            "upcoming_tasks": upcoming,
        }))
    }
}

// ---------------------------------------------------------------------------
// suggest_daily_tasks
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
struct SuggestArgs {
    #[serde(default)]
    mood: Option<String>,
}

/// Stateless: wellness activity ideas for today, weighted by an optional mood word.
pub struct SuggestDailyTasks;

impl SuggestDailyTasks {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SuggestDailyTasks {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl AgentSkill for SuggestDailyTasks {
    fn name(&self) -> &str {
        "suggest_daily_tasks"
    }

    async fn execute(&self, _ctx: &TenantContext, payload: Option<Value>) -> SkillResult {
        let args: SuggestArgs = match payload {
            Some(p) => serde_json::from_value(p)?,
            None => SuggestArgs::default(),
        };
        let today = Utc::now().date_naive();
        let suggestions = TaskTracker::suggest_daily_tasks(args.mood.as_deref(), today);
        Ok(json!({
            "status": "ok",
            "skill": self.name(),
            "daily_suggestions": suggestions,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::store;

    #[tokio::test]
    async fn add_then_complete_celebrates() {
        let store = store();
        let ctx = TenantContext::new("t");

        let out = AddTask::new(Arc::clone(&store))
            .execute(
                &ctx,
                Some(json!({
                    "title": "Go for a walk",
                    "category": "exercise",
                    "priority": "someday",
                    "due_date": "2026-05-01",
                })),
            )
            .await
            .unwrap();
        assert_eq!(out["task"]["category"], "exercise");
        assert_eq!(out["task"]["priority"], "medium");
        assert_eq!(out["task"]["tags"], json!(["exercise"]));
        assert!(out["task"]["due_date"].as_str().unwrap().starts_with("2026-05-01"));
        let id = out["task"]["id"].as_str().unwrap().to_string();

        let update = UpdateTask::new(Arc::clone(&store));
        let out = update
            .execute(&ctx, Some(json!({ "task_id": id, "status": "completed" })))
            .await
            .unwrap();
        assert_eq!(out["task"]["status"], "completed");
        assert!(out["celebration"]
            .as_str()
            .unwrap()
            .ends_with("Your body and mind are stronger for it!"));

        let err = update
            .execute(&ctx, Some(json!({ "task_id": id, "status": "done" })))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "unknown status 'done'");
    }

    #[tokio::test]
    async fn list_filters_and_delete() {
        let store = store();
        let ctx = TenantContext::new("t");
        let add = AddTask::new(Arc::clone(&store));
        let first = add
            .execute(&ctx, Some(json!({ "title": "Call mom", "category": "social" })))
            .await
            .unwrap();
        add.execute(&ctx, Some(json!({ "title": "Pay rent", "priority": "urgent" })))
            .await
            .unwrap();

        let list = ListTasks::new(Arc::clone(&store));
        let out = list.execute(&ctx, None).await.unwrap();
        assert_eq!(out["count"], 2);
        assert_eq!(out["tasks"][0]["title"], "Pay rent");

        let out = list
            .execute(&ctx, Some(json!({ "category": "social" })))
            .await
            .unwrap();
        assert_eq!(out["count"], 1);
        assert!(list
            .execute(&ctx, Some(json!({ "category": "chores" })))
            .await
            .is_err());

        let delete = DeleteTask::new(Arc::clone(&store));
        let id = first["task"]["id"].clone();
        let out = delete.execute(&ctx, Some(json!({ "task_id": id }))).await.unwrap();
        assert_eq!(out["deleted"], true);
        let out = delete.execute(&ctx, Some(json!({ "task_id": id }))).await.unwrap();
        assert_eq!(out["deleted"], false);
        assert!(delete
            .execute(&ctx, Some(json!({ "task_id": "nope" })))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn analytics_and_upcoming_default_windows() {
        let store = store();
        let ctx = TenantContext::new("t");
        let out = TaskAnalyticsSkill::new(Arc::clone(&store))
            .execute(&ctx, None)
            .await
            .unwrap();
        assert_eq!(out["analytics"]["period"], "Last 30 days");
        assert_eq!(out["analytics"]["message"], "No tasks found for this period");

        let out = TaskAnalyticsSkill::new(Arc::clone(&store))
            .execute(&ctx, Some(json!({ "days": u32::MAX })))
            .await
            .unwrap();
        assert_eq!(out["analytics"]["period"], "Last 365 days");

        let out = UpcomingTasks::new(store).execute(&ctx, None).await.unwrap();
        assert_eq!(out["upcoming_tasks"], json!([]));
    }

    #[tokio::test]
    async fn daily_suggestions_follow_mood() {
        let ctx = TenantContext::new("t");
        let out = SuggestDailyTasks::new()
            .execute(&ctx, Some(json!({ "mood": "anxious" })))
            .await
            .unwrap();
        let priority = &out["daily_suggestions"]["suggestions"]["priority"];
        assert_eq!(priority[0], "Practice 5 minutes of meditation");
        assert_eq!(out["daily_suggestions"]["tip"].as_str().map(str::is_empty), Some(false));
    }
}
