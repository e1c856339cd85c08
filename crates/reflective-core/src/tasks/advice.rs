//! Wording attached to tasks: tags, effort, suggestions, motivation, tips, celebrations,
//! analytics insights, and the daily suggestion sheet.

use indexmap::IndexMap;

use super::{Effort, Task, TaskCategory, TaskPriority, WellnessImpact};

const TAG_KEYWORDS: [(&str, &[&str]); 8] = [
    ("exercise", &["exercise", "workout", "gym", "run", "walk", "bike"]),
    ("meditation", &["meditate", "mindfulness", "breathe", "calm"]),
    ("social", &["call", "meet", "friend", "family", "visit"]),
    ("creative", &["draw", "write", "paint", "music", "create"]),
    ("learning", &["study", "learn", "read", "course", "skill"]),
    ("health", &["doctor", "appointment", "medicine", "therapy"]),
    ("urgent", &["urgent", "asap", "deadline", "important"]),
    ("relaxing", &["relax", "rest", "sleep", "break", "vacation"]),
];

const HIGH_EFFORT: [&str; 6] = ["project", "complete", "finish", "major", "big", "complex"];
const LOW_EFFORT: [&str; 6] = ["quick", "simple", "easy", "call", "email", "check"];

const CELEBRATIONS: [&str; 5] = [
    "Fantastic! You completed '{}'! Take a moment to appreciate your accomplishment.",
    "Well done! Finishing '{}' shows your dedication and strength.",
    "Awesome job completing '{}'! You're making great progress.",
    "Congratulations on finishing '{}'! Your effort is paying off.",
    "You did it! '{}' is complete. Feel proud of your achievement!",
];

pub(crate) fn tags(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    TAG_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(tag, _)| tag.to_string())
        .collect()
}

pub(crate) fn effort(text: &str) -> Effort {
    let lower = text.to_lowercase();
    if HIGH_EFFORT.iter().any(|k| lower.contains(k)) {
        Effort::High
    } else if LOW_EFFORT.iter().any(|k| lower.contains(k)) {
        Effort::Low
    } else {
        Effort::Medium
    }
}

/// At most three suggestions: category ones first, then ones for the expected impact.
pub(crate) fn wellness_suggestions(category: TaskCategory, impact: WellnessImpact) -> Vec<String> {
    let by_category: &[&str] = match category {
        TaskCategory::SelfCare => &[
            "Set a peaceful environment before starting",
            "Practice self-compassion throughout",
            "Celebrate completing this self-care activity",
        ],
        TaskCategory::Work => &[
            "Take breaks every hour",
            "Practice deep breathing if you feel stressed",
            "Remember that your worth isn't tied to productivity",
        ],
        TaskCategory::Exercise => &[
            "Start slowly and listen to your body",
            "Focus on how movement makes you feel",
            "Celebrate any movement, no matter how small",
        ],
        TaskCategory::Social => &[
            "Be present and engaged",
            "Practice active listening",
            "It's okay if social interactions feel challenging",
        ],
        _ => &[],
    };
    let by_impact: &[&str] = match impact {
        WellnessImpact::Challenging => &[
            "Break this task into smaller, manageable steps",
            "Plan a self-care activity for after completion",
            "Remember it's okay to ask for help",
        ],
        WellnessImpact::Positive => &[
            "Savor the positive feelings this task brings",
            "Notice how accomplishing this improves your mood",
        ],
        WellnessImpact::Neutral => &[],
    };
    by_category
        .iter()
        .chain(by_impact)
        .take(3)
        .map(|s| s.to_string())
        .collect()
}

pub(crate) fn motivation(task: &Task) -> String {
    let base = match task.category {
        TaskCategory::SelfCare => "Taking care of yourself is not selfish, it's essential!",
        TaskCategory::Exercise => "Every step counts towards a healthier, happier you!",
        TaskCategory::Social => "Connection is a fundamental human need. Great choice!",
        TaskCategory::Mindfulness => "A few moments of mindfulness can transform your entire day.",
        TaskCategory::Creative => "Creativity feeds the soul. Enjoy this creative journey!",
        TaskCategory::Work => "Approach this with intention and remember to take breaks.",
        TaskCategory::Learning => "Learning is growing. Your mind will thank you!",
        TaskCategory::Health => "Prioritizing your health is an act of self-love.",
        TaskCategory::Personal | TaskCategory::Household => {
            "You've got this! Every task completed is progress made."
        }
    };
    if task.priority == TaskPriority::Urgent {
        format!("{} Remember to breathe and take it one step at a time.", base)
    } else if task.wellness_impact == WellnessImpact::Challenging {
        format!("{} Be gentle with yourself as you work on this.", base)
    } else {
        base.to_string()
    }
}

pub(crate) fn wellness_tip(category: TaskCategory) -> &'static str {
    match category {
        TaskCategory::Work => {
            "Remember: You are not your productivity. Take breaks and be kind to yourself."
        }
        TaskCategory::SelfCare => {
            "Self-care isn't selfish, it's how you show up better for everything else."
        }
        TaskCategory::Exercise => {
            "Listen to your body. The goal is to feel good, not to punish yourself."
        }
        TaskCategory::Social => {
            "Quality over quantity. One meaningful connection is worth more than many shallow ones."
        }
        TaskCategory::Mindfulness => {
            "Start small. Even 3 minutes of mindfulness can shift your entire day."
        }
        TaskCategory::Creative => {
            "There's no wrong way to be creative. Enjoy the process, not just the outcome."
        }
        TaskCategory::Health => {
            "Small, consistent actions in health create the biggest transformations."
        }
        TaskCategory::Learning => {
            "Learning is a gift you give yourself. Be patient with the process."
        }
        TaskCategory::Personal | TaskCategory::Household => {
            "Remember to be patient and kind with yourself through this task."
        }
    }
}

/// Celebration for a completed task. `turn` rotates through the wordings.
pub(crate) fn celebration(task: &Task, turn: usize) -> String {
    let template = CELEBRATIONS[turn % CELEBRATIONS.len()];
    let mut out = template.replace("{}", &task.title);
    match task.category {
        TaskCategory::SelfCare => out.push_str(" Your future self will thank you for this self-care!"),
        TaskCategory::Exercise => out.push_str(" Your body and mind are stronger for it!"),
        TaskCategory::Social => out.push_str(" Connection and relationships matter so much!"),
        _ => {}
    }
    out
}

pub(crate) fn insights(tasks: &[&Task], completed: &[&Task], by_category: &IndexMap<String, usize>) -> Vec<String> {
    let rate = completed.len() as f64 / tasks.len().max(1) as f64;
    let mut out = vec![if rate >= 0.8 {
        "Excellent! You're completing most of your tasks."
    } else if rate >= 0.6 {
        "Good job! You're making solid progress on your tasks."
    } else if rate >= 0.4 {
        "You're making progress, but there's room to improve completion rates."
    } else {
        "Consider breaking larger tasks into smaller, more manageable steps."
    }
    .to_string()];

    // First category reaching the highest count, in order of first appearance.
    let mut top: Option<(&String, usize)> = None;
    for (category, &count) in by_category {
        if top.map_or(true, |(_, best)| count > best) {
            top = Some((category, count));
        }
    }
    if let Some((category, _)) = top {
        out.push(format!("Your most common task category is '{}'.", category));
    }

    let positive = completed
        .iter()
        .filter(|t| t.wellness_impact == WellnessImpact::Positive)
        .count();
    if positive > 0 {
        out.push(format!("You completed {} wellness-positive tasks!", positive));
    }
    out
}

pub(crate) fn recommendations(total: usize, rate: f64, self_care: usize) -> Vec<String> {
    let mut out: Vec<&str> = Vec::new();
    if rate < 0.5 {
        out.extend([
            "Consider breaking large tasks into smaller, manageable steps",
            "Set realistic deadlines that account for your schedule",
            "Focus on completing 2-3 important tasks rather than many small ones",
        ]);
    }
    if total > 0 && (self_care as f64 / total as f64) < 0.2 {
        out.push("Consider adding more self-care tasks to maintain balance");
    }
    out.extend([
        "Celebrate each completed task, no matter how small",
        "Use the task completion as an opportunity for mindfulness",
        "Remember that productivity doesn't define your worth",
    ]);
    out.into_iter().take(5).map(str::to_string).collect()
}

pub(crate) const DAILY_TIP: &str =
    "Pick just 1-2 activities that feel good to you today. Small actions create big changes!";

/// Suggestion groups, plus a `priority` group picked for `mood` when it is recognized.
pub(crate) fn daily_suggestions(mood: Option<&str>) -> IndexMap<String, Vec<String>> {
    let groups: [(&str, [&str; 3]); 5] = [
        (
            "self_care",
            [
                "Take 5 deep breaths mindfully",
                "Write down 3 things you're grateful for",
                "Do something kind for yourself",
            ],
        ),
        (
            "movement",
            ["Take a 10-minute walk", "Do gentle stretches", "Dance to your favorite song"],
        ),
        (
            "connection",
            ["Text a friend to check in", "Call a family member", "Smile at a stranger"],
        ),
        (
            "mindfulness",
            [
                "Practice 5 minutes of meditation",
                "Eat one meal mindfully",
                "Notice 5 things you can see, 4 you can hear, 3 you can touch",
            ],
        ),
        (
            "creativity",
            ["Doodle or draw for 10 minutes", "Write in a journal", "Try a new recipe"],
        ),
    ];
    let mut out: IndexMap<String, Vec<String>> = groups
        .iter()
        .map(|(name, items)| (name.to_string(), items.iter().map(|s| s.to_string()).collect()))
        .collect();

    let priority = match mood.map(|m| m.trim().to_lowercase()).as_deref() {
        Some("stressed" | "anxious") => Some(["mindfulness", "self_care"]),
        Some("sad" | "lonely") => Some(["connection", "movement"]),
        Some("bored" | "restless") => Some(["creativity", "movement"]),
        _ => None,
    };
    if let Some(keys) = priority {
        let merged: Vec<String> = keys
            .iter()
            .filter_map(|k| out.get(*k))
            .flatten()
            .cloned()
            .collect();
        out.insert("priority".to_string(), merged);
    }
    out
}
