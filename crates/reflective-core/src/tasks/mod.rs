//! Wellness-oriented task list: priorities, categories, expected wellness impact, due dates,
//! completion analytics, and daily suggestions.

mod advice;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::mood::MAX_WINDOW_DAYS;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl TaskPriority {
    pub fn rank(&self) -> u8 {
        match self {
            TaskPriority::Low => 1,
            TaskPriority::Medium => 2,
            TaskPriority::High => 3,
            TaskPriority::Urgent => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
            TaskPriority::Urgent => "urgent",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(TaskPriority::Low),
            "medium" => Some(TaskPriority::Medium),
            "high" => Some(TaskPriority::High),
            "urgent" => Some(TaskPriority::Urgent),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskCategory {
    SelfCare,
    Mindfulness,
    Exercise,
    Social,
    Work,
    #[default]
    Personal,
    Health,
    Learning,
    Creative,
    Household,
}

impl TaskCategory {
    pub const ALL: [TaskCategory; 10] = [
        TaskCategory::SelfCare,
        TaskCategory::Mindfulness,
        TaskCategory::Exercise,
        TaskCategory::Social,
        TaskCategory::Work,
        TaskCategory::Personal,
        TaskCategory::Health,
        TaskCategory::Learning,
        TaskCategory::Creative,
        TaskCategory::Household,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskCategory::SelfCare => "self_care",
            TaskCategory::Mindfulness => "mindfulness",
            TaskCategory::Exercise => "exercise",
            TaskCategory::Social => "social",
            TaskCategory::Work => "work",
            TaskCategory::Personal => "personal",
            TaskCategory::Health => "health",
            TaskCategory::Learning => "learning",
            TaskCategory::Creative => "creative",
            TaskCategory::Household => "household",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TaskCategory::SelfCare => "Self-care and wellness activities",
            TaskCategory::Mindfulness => "Mindfulness and meditation practices",
            TaskCategory::Exercise => "Physical activity and movement",
            TaskCategory::Social => "Social connections and relationships",
            TaskCategory::Work => "Work and professional tasks",
            TaskCategory::Personal => "Personal goals and projects",
            TaskCategory::Health => "Health and medical appointments",
            TaskCategory::Learning => "Learning and skill development",
            TaskCategory::Creative => "Creative activities and hobbies",
            TaskCategory::Household => "Home and daily maintenance",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WellnessImpact {
    Positive,
    #[default]
    Neutral,
    Challenging,
}

impl WellnessImpact {
    pub fn as_str(&self) -> &'static str {
        match self {
            WellnessImpact::Positive => "positive",
            WellnessImpact::Neutral => "neutral",
            WellnessImpact::Challenging => "challenging",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Some(WellnessImpact::Positive),
            "neutral" => Some(WellnessImpact::Neutral),
            "challenging" => Some(WellnessImpact::Challenging),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Some(TaskStatus::Pending),
            "in_progress" => Some(TaskStatus::InProgress),
            "completed" => Some(TaskStatus::Completed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effort {
    Low,
    Medium,
    High,
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Input for [`TaskTracker::add_task`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    pub category: TaskCategory,
    pub wellness_impact: WellnessImpact,
    pub due_date: Option<DateTime<Utc>>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    pub category: TaskCategory,
    pub wellness_impact: WellnessImpact,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
    pub estimated_effort: Effort,
    pub wellness_suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskCreated {
    pub task: Task,
    pub motivation: String,
    pub wellness_tip: String,
}

/// Field changes for [`TaskTracker::update_task`]. `None` leaves a field alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<TaskPriority>,
    pub category: Option<TaskCategory>,
    pub status: Option<TaskStatus>,
    pub due_date: Option<DateTime<Utc>>,
    pub wellness_impact: Option<WellnessImpact>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskUpdated {
    pub task: Task,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub celebration: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskAnalytics {
    pub period: String,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub completion_rate: f64,
    pub category_breakdown: IndexMap<String, usize>,
    pub priority_breakdown: IndexMap<String, usize>,
    pub wellness_impact_breakdown: IndexMap<String, usize>,
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpcomingTask {
    #[serde(flatten)]
    pub task: Task,
    /// Whole days from now until due; negative when overdue.
    pub days_until_due: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySuggestions {
    pub date: NaiveDate,
    pub suggestions: IndexMap<String, Vec<String>>,
    pub tip: String,
}

// ---------------------------------------------------------------------------
// Tracker
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct TaskTracker {
    tasks: Vec<Task>,
    celebrations: usize,
}

impl TaskTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_task(&mut self, draft: TaskDraft) -> CoreResult<TaskCreated> {
        self.add_task_at(draft, Utc::now())
    }

    pub fn add_task_at(&mut self, draft: TaskDraft, at: DateTime<Utc>) -> CoreResult<TaskCreated> {
        let title = draft.title.trim().to_string();
        if title.is_empty() {
            return Err(CoreError::EmptyContent("task title".to_string()));
        }
        let description = draft.description.trim().to_string();
        let text = format!("{} {}", title, description);
        let task = Task {
            id: Uuid::new_v4(),
            tags: advice::tags(&text),
            estimated_effort: advice::effort(&text),
            wellness_suggestions: advice::wellness_suggestions(draft.category, draft.wellness_impact),
            title,
            description,
            priority: draft.priority,
            category: draft.category,
            wellness_impact: draft.wellness_impact,
            status: TaskStatus::Pending,
            created_at: at,
            due_date: draft.due_date,
            completed_at: None,
            updated_at: None,
        };

        tracing::info!(
            target: "reflective::tasks",
            category = task.category.as_str(),
            priority = task.priority.as_str(),
            "Task added"
        );

        let created = TaskCreated {
            motivation: advice::motivation(&task),
            wellness_tip: advice::wellness_tip(task.category).to_string(),
            task: task.clone(),
        };
        self.tasks.push(task);
        Ok(created)
    }

    pub fn get(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Tasks matching the filters, highest priority first, then earliest due (undated last).
    pub fn tasks(&self, status: Option<TaskStatus>, category: Option<TaskCategory>) -> Vec<&Task> {
        let mut out: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|t| status.map_or(true, |s| t.status == s))
            .filter(|t| category.map_or(true, |c| t.category == c))
            .collect();
        out.sort_by(|a, b| {
            b.priority
                .rank()
                .cmp(&a.priority.rank())
                .then_with(|| match (a.due_date, b.due_date) {
                    (Some(x), Some(y)) => x.cmp(&y),
                    (Some(_), None) => std::cmp::Ordering::Less,
                    (None, Some(_)) => std::cmp::Ordering::Greater,
                    (None, None) => std::cmp::Ordering::Equal,
                })
        });
        out
    }

    pub fn update_task(&mut self, id: Uuid, update: TaskUpdate) -> CoreResult<TaskUpdated> {
        self.update_task_at(id, update, Utc::now())
    }

    /// Apply `update`. Moving into `completed` stamps `completed_at`; any completed status in
    /// the update earns a celebration.
    pub fn update_task_at(
        &mut self,
        id: Uuid,
        update: TaskUpdate,
        at: DateTime<Utc>,
    ) -> CoreResult<TaskUpdated> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| CoreError::TaskNotFound(id.to_string()))?;

        if let Some(title) = update.title.map(|t| t.trim().to_string()) {
            if title.is_empty() {
                return Err(CoreError::EmptyContent("task title".to_string()));
            }
            task.title = title;
        }
        if let Some(description) = update.description {
            task.description = description.trim().to_string();
        }
        if let Some(priority) = update.priority {
            task.priority = priority;
        }
        if let Some(category) = update.category {
            task.category = category;
        }
        if let Some(impact) = update.wellness_impact {
            task.wellness_impact = impact;
        }
        if let Some(due) = update.due_date {
            task.due_date = Some(due);
        }
        if let Some(status) = update.status {
            if status == TaskStatus::Completed && task.status != TaskStatus::Completed {
                task.completed_at = Some(at);
            }
            task.status = status;
        }
        task.updated_at = Some(at);

        let celebration = if update.status == Some(TaskStatus::Completed) {
            let text = advice::celebration(task, self.celebrations);
            self.celebrations += 1;
            Some(text)
        } else {
            None
        };
        tracing::info!(target: "reflective::tasks", task = %id, completed = celebration.is_some(), "Task updated");
        Ok(TaskUpdated {
            task: task.clone(),
            celebration,
        })
    }

    /// Remove a task. Returns whether it existed.
    pub fn delete_task(&mut self, id: Uuid) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        before != self.tasks.len()
    }

    pub fn analytics(&self, days: u32) -> TaskAnalytics {
        self.analytics_at(days, Utc::now())
    }

    /// Completion analytics over tasks created in the last `days` (clamped to 1..=365).
    pub fn analytics_at(&self, days: u32, now: DateTime<Utc>) -> TaskAnalytics {
        let days = days.clamp(1, MAX_WINDOW_DAYS);
        let start = now - Duration::days(i64::from(days));
        let period_tasks: Vec<&Task> = self.tasks.iter().filter(|t| t.created_at >= start).collect();
        let period = format!("Last {} days", days);

        if period_tasks.is_empty() {
            return TaskAnalytics {
                period,
                total_tasks: 0,
                completed_tasks: 0,
                completion_rate: 0.0,
                category_breakdown: IndexMap::new(),
                priority_breakdown: IndexMap::new(),
                wellness_impact_breakdown: IndexMap::new(),
                insights: Vec::new(),
                recommendations: Vec::new(),
                message: Some("No tasks found for this period".to_string()),
            };
        }

        let completed: Vec<&Task> = period_tasks
            .iter()
            .copied()
            .filter(|t| t.status == TaskStatus::Completed)
            .collect();
        let total = period_tasks.len();
        let rate = completed.len() as f64 / total as f64;

        let mut category_breakdown: IndexMap<String, usize> = IndexMap::new();
        let mut priority_breakdown: IndexMap<String, usize> = IndexMap::new();
        let mut wellness_impact_breakdown: IndexMap<String, usize> = IndexMap::new();
        for t in &period_tasks {
            *category_breakdown.entry(t.category.as_str().to_string()).or_default() += 1;
            *priority_breakdown.entry(t.priority.as_str().to_string()).or_default() += 1;
            *wellness_impact_breakdown
                .entry(t.wellness_impact.as_str().to_string())
                .or_default() += 1;
        }
        let self_care = category_breakdown.get("self_care").copied().unwrap_or(0);

        TaskAnalytics {
            period,
            total_tasks: total,
            completed_tasks: completed.len(),
            completion_rate: rate,
            insights: advice::insights(&period_tasks, &completed, &category_breakdown),
            recommendations: advice::recommendations(total, rate, self_care),
            category_breakdown,
            priority_breakdown,
            wellness_impact_breakdown,
            message: None,
        }
    }

    pub fn upcoming(&self, days: u32) -> Vec<UpcomingTask> {
        self.upcoming_at(days, Utc::now())
    }

    /// Pending tasks due within `days` of `now`, overdue ones included, soonest first.
    pub fn upcoming_at(&self, days: u32, now: DateTime<Utc>) -> Vec<UpcomingTask> {
        let end = now + Duration::days(i64::from(days.min(MAX_WINDOW_DAYS)));
        let mut out: Vec<UpcomingTask> = self
            .tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Pending)
            .filter_map(|t| {
                let due = t.due_date?;
                (due <= end).then(|| UpcomingTask {
                    task: t.clone(),
                    days_until_due: (due - now).num_days(),
                })
            })
            .collect();
        out.sort_by_key(|u| u.task.due_date);
        out
    }

    /// Daily wellness suggestions, with a `priority` group when `mood` is recognized.
    pub fn suggest_daily_tasks(mood: Option<&str>, date: NaiveDate) -> DailySuggestions {
        DailySuggestions {
            date,
            suggestions: advice::daily_suggestions(mood),
            tip: advice::DAILY_TIP.to_string(),
        }
    }
}

/// Accepts RFC 3339, `YYYY-MM-DD`, `YYYY-MM-DD HH:MM`, `MM/DD/YYYY`, or `DD/MM/YYYY` (UTC).
pub fn parse_due_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    ["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 10, 9, 0, 0).unwrap()
    }

    fn draft(title: &str, priority: TaskPriority, due_in_days: Option<i64>) -> TaskDraft {
        TaskDraft {
            priority,
            due_date: due_in_days.map(|d| now() + Duration::days(d)),
            ..TaskDraft::new(title)
        }
    }

    #[test]
    fn add_task_fills_derived_fields() {
        let mut tracker = TaskTracker::new();
        let created = tracker
            .add_task_at(
                TaskDraft {
                    description: "quick stretch before work".into(),
                    category: TaskCategory::Exercise,
                    wellness_impact: WellnessImpact::Challenging,
                    ..TaskDraft::new("  Morning walk ")
                },
                now(),
            )
            .unwrap();
        let task = &created.task;
        assert_eq!(task.title, "Morning walk");
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.tags, vec!["exercise"]);
        assert_eq!(task.estimated_effort, Effort::Low);
        assert_eq!(task.wellness_suggestions[0], "Start slowly and listen to your body");
        assert!(created.motivation.ends_with("Be gentle with yourself as you work on this."));
        assert!(created.wellness_tip.starts_with("Listen to your body"));

        assert!(matches!(
            tracker.add_task(TaskDraft::new("   ")),
            Err(CoreError::EmptyContent(_))
        ));
    }

    #[test]
    fn listing_orders_by_priority_then_due() {
        let mut tracker = TaskTracker::new();
        for d in [
            draft("later", TaskPriority::Medium, Some(5)),
            draft("undated", TaskPriority::Medium, None),
            draft("sooner", TaskPriority::Medium, Some(1)),
            draft("urgent", TaskPriority::Urgent, None),
        ] {
            tracker.add_task_at(d, now()).unwrap();
        }
        let titles: Vec<&str> = tracker.tasks(None, None).iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["urgent", "sooner", "later", "undated"]);
        assert!(tracker.tasks(Some(TaskStatus::Completed), None).is_empty());
        assert_eq!(tracker.tasks(None, Some(TaskCategory::Personal)).len(), 4);
    }

    #[test]
    fn completing_stamps_and_celebrates() {
        let mut tracker = TaskTracker::new();
        let id = tracker
            .add_task_at(
                TaskDraft {
                    category: TaskCategory::SelfCare,
                    ..TaskDraft::new("Bubble bath")
                },
                now(),
            )
            .unwrap()
            .task
            .id;

        let done_at = now() + Duration::hours(3);
        let updated = tracker
            .update_task_at(
                id,
                TaskUpdate {
                    status: Some(TaskStatus::Completed),
                    ..TaskUpdate::default()
                },
                done_at,
            )
            .unwrap();
        assert_eq!(updated.task.completed_at, Some(done_at));
        let celebration = updated.celebration.unwrap();
        assert!(celebration.starts_with("Fantastic! You completed 'Bubble bath'!"));
        assert!(celebration.ends_with("thank you for this self-care!"));

        let renamed = tracker
            .update_task(
                id,
                TaskUpdate {
                    title: Some("Long bath".into()),
                    ..TaskUpdate::default()
                },
            )
            .unwrap();
        assert!(renamed.celebration.is_none());
        assert_eq!(renamed.task.completed_at, Some(done_at));

        let missing = Uuid::new_v4();
        assert!(matches!(
            tracker.update_task(missing, TaskUpdate::default()),
            Err(CoreError::TaskNotFound(_))
        ));
        assert!(tracker.delete_task(id));
        assert!(!tracker.delete_task(id));
    }

    #[test]
    fn analytics_over_window() {
        let mut tracker = TaskTracker::new();
        assert_eq!(
            tracker.analytics_at(30, now()).message.as_deref(),
            Some("No tasks found for this period")
        );

        let mut ids = Vec::new();
        for (title, category, impact) in [
            ("a", TaskCategory::Work, WellnessImpact::Neutral),
            ("b", TaskCategory::Work, WellnessImpact::Positive),
            ("c", TaskCategory::SelfCare, WellnessImpact::Positive),
            ("d", TaskCategory::Social, WellnessImpact::Neutral),
        ] {
            let d = TaskDraft {
                category,
                wellness_impact: impact,
                ..TaskDraft::new(title)
            };
            ids.push(tracker.add_task_at(d, now() - Duration::days(2)).unwrap().task.id);
        }
        tracker
            .add_task_at(TaskDraft::new("old"), now() - Duration::days(60))
            .unwrap();
        for id in &ids[1..] {
            tracker
                .update_task_at(
                    *id,
                    TaskUpdate {
                        status: Some(TaskStatus::Completed),
                        ..TaskUpdate::default()
                    },
                    now(),
                )
                .unwrap();
        }

        let a = tracker.analytics_at(30, now());
        assert_eq!(a.period, "Last 30 days");
        assert_eq!(a.total_tasks, 4);
        assert_eq!(a.completed_tasks, 3);
        assert!((a.completion_rate - 0.75).abs() < 1e-9);
        assert_eq!(a.category_breakdown["work"], 2);
        assert_eq!(a.priority_breakdown["medium"], 4);
        assert_eq!(a.insights[0], "Good job! You're making solid progress on your tasks.");
        assert_eq!(a.insights[1], "Your most common task category is 'work'.");
        assert_eq!(a.insights[2], "You completed 2 wellness-positive tasks!");
        assert_eq!(a.recommendations.len(), 3);

        assert_eq!(tracker.analytics_at(u32::MAX, now()).total_tasks, 5);
    }

    #[test]
    fn upcoming_keeps_pending_due_soon() {
        let mut tracker = TaskTracker::new();
        for d in [
            draft("overdue", TaskPriority::Low, Some(-2)),
            draft("soon", TaskPriority::Low, Some(3)),
            draft("far", TaskPriority::Low, Some(30)),
            draft("undated", TaskPriority::Low, None),
        ] {
            tracker.add_task_at(d, now()).unwrap();
        }
        let upcoming = tracker.upcoming_at(7, now());
        let got: Vec<(&str, i64)> = upcoming
            .iter()
            .map(|u| (u.task.title.as_str(), u.days_until_due))
            .collect();
        assert_eq!(got, vec![("overdue", -2), ("soon", 3)]);

        let json = serde_json::to_value(&upcoming[1]).unwrap();
        assert_eq!(json["title"], "soon");
        assert_eq!(json["days_until_due"], 3);
    }

    #[test]
    fn due_dates_in_common_formats() {
        let midnight = Utc.with_ymd_and_hms(2026, 4, 12, 0, 0, 0).unwrap();
        assert_eq!(parse_due_date("2026-04-12"), Some(midnight));
        assert_eq!(parse_due_date("04/12/2026"), Some(midnight));
        assert_eq!(parse_due_date("25/12/2026").map(|d| d.date_naive().to_string()), Some("2026-12-25".into()));
        assert_eq!(
            parse_due_date("2026-04-12T08:30:00Z"),
            Some(Utc.with_ymd_and_hms(2026, 4, 12, 8, 30, 0).unwrap())
        );
        assert_eq!(
            parse_due_date("2026-04-12 17:45"),
            Some(Utc.with_ymd_and_hms(2026, 4, 12, 17, 45, 0).unwrap())
        );
        assert_eq!(parse_due_date("next tuesday"), None);
    }

    #[test]
    fn parsing_enums() {
        assert_eq!(TaskPriority::parse("URGENT"), Some(TaskPriority::Urgent));
        assert_eq!(TaskCategory::parse("self_care"), Some(TaskCategory::SelfCare));
        assert_eq!(TaskCategory::parse("chores"), None);
        assert_eq!(WellnessImpact::parse("positive"), Some(WellnessImpact::Positive));
        assert_eq!(TaskStatus::parse("in_progress"), Some(TaskStatus::InProgress));
        assert_eq!(TaskCategory::Household.description(), "Home and daily maintenance");
    }
}
