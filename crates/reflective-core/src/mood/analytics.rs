//! Window analytics and time/theme patterns over mood entries.

use chrono::{Datelike, NaiveDate, Timelike, Weekday};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{MoodEntry, MoodLevel};

/// Slope magnitude (mood points per entry) separating a trend from noise.
const TREND_SLOPE: f64 = 0.1;

/// Sample standard deviation above which moods count as variable.
const VARIABLE_STD_DEV: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodTrend {
    Improving,
    Declining,
    Stable,
    InsufficientData,
}

impl MoodTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoodTrend::Improving => "improving",
            MoodTrend::Declining => "declining",
            MoodTrend::Stable => "stable",
            MoodTrend::InsufficientData => "insufficient_data",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodDistribution {
    pub low: usize,
    pub moderate: usize,
    pub high: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub entries: usize,
    pub average_mood: f64,
    pub min: u8,
    pub max: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodAnalytics {
    pub period: String,
    pub total_entries: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_mood: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood_trend: Option<MoodTrend>,
    #[serde(default)]
    pub mood_distribution: MoodDistribution,
    #[serde(default)]
    pub daily_summary: Vec<DailySummary>,
    #[serde(default)]
    pub insights: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HourlyPattern {
    pub best_time: Option<String>,
    pub worst_time: Option<String>,
    pub hourly_averages: IndexMap<u32, f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklyPattern {
    pub best_day: Option<String>,
    pub worst_day: Option<String>,
    pub daily_averages: IndexMap<String, f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemePattern {
    /// Themes ordered by how often they appear in notes.
    pub common_themes: Vec<String>,
    /// Average mood of entries mentioning the theme minus the window average.
    pub theme_impact: IndexMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodPatterns {
    pub period: String,
    pub time_of_day: HourlyPattern,
    pub day_of_week: WeeklyPattern,
    pub note_themes: ThemePattern,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn period(days: u32) -> String {
    format!("Last {} days", days)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Least-squares slope of mood value over entry index.
pub(crate) fn trend(values: &[f64]) -> MoodTrend {
    if values.len() < 2 {
        return MoodTrend::InsufficientData;
    }
    let xs: Vec<f64> = (0..values.len()).map(|i| i as f64).collect();
    let x_mean = mean(&xs);
    let y_mean = mean(values);
    let (num, den) = xs
        .iter()
        .zip(values)
        .fold((0.0, 0.0), |(num, den), (x, y)| {
            (num + (x - x_mean) * (y - y_mean), den + (x - x_mean).powi(2))
        });
    let slope = if den == 0.0 { 0.0 } else { num / den };
    if slope > TREND_SLOPE {
        MoodTrend::Improving
    } else if slope < -TREND_SLOPE {
        MoodTrend::Declining
    } else {
        MoodTrend::Stable
    }
}

fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    var.sqrt()
}

pub(crate) fn summarize(entries: &[&MoodEntry], days: u32) -> MoodAnalytics {
    if entries.is_empty() {
        return MoodAnalytics {
            period: period(days),
            total_entries: 0,
            average_mood: None,
            mood_trend: None,
            mood_distribution: MoodDistribution::default(),
            daily_summary: Vec::new(),
            insights: Vec::new(),
            recommendations: Vec::new(),
            message: Some("No mood entries found for this period".to_string()),
        };
    }

    let values: Vec<f64> = entries.iter().map(|e| f64::from(e.mood_value)).collect();
    let average = mean(&values);
    let trend = trend(&values);

    let mut distribution = MoodDistribution::default();
    for e in entries {
        match MoodLevel::from_value(e.mood_value) {
            MoodLevel::Low => distribution.low += 1,
            MoodLevel::Moderate => distribution.moderate += 1,
            MoodLevel::High => distribution.high += 1,
        }
    }

    MoodAnalytics {
        period: period(days),
        total_entries: entries.len(),
        average_mood: Some(average),
        mood_trend: Some(trend),
        mood_distribution: distribution,
        daily_summary: daily_summary(entries),
        insights: insights(average, trend, sample_std_dev(&values)),
        recommendations: recommendations(average, trend),
        message: None,
    }
}

fn daily_summary(entries: &[&MoodEntry]) -> Vec<DailySummary> {
    let mut by_day: IndexMap<NaiveDate, Vec<u8>> = IndexMap::new();
    for e in entries {
        by_day.entry(e.timestamp.date_naive()).or_default().push(e.mood_value);
    }
    by_day.sort_keys();
    by_day
        .into_iter()
        .map(|(date, values)| {
            let as_f64: Vec<f64> = values.iter().map(|v| f64::from(*v)).collect();
            DailySummary {
                date,
                entries: values.len(),
                average_mood: mean(&as_f64),
                min: values.iter().copied().min().unwrap_or(0),
                max: values.iter().copied().max().unwrap_or(0),
            }
        })
        .collect()
}

fn insights(average: f64, trend: MoodTrend, std_dev: f64) -> Vec<String> {
    let mut out = Vec::new();
    out.push(
        if average >= 7.0 {
            "Your overall mood has been quite positive recently!"
        } else if average >= 5.0 {
            "Your mood has been moderate - there's room for improvement."
        } else {
            "Your mood has been lower recently - consider additional support."
        }
        .to_string(),
    );
    out.push(
        match trend {
            MoodTrend::Improving => "Great news! Your mood trend is improving over time.",
            MoodTrend::Declining => {
                "Your mood seems to be declining - it might be worth exploring what's changed."
            }
            MoodTrend::Stable | MoodTrend::InsufficientData => {
                "Your mood has been relatively stable."
            }
        }
        .to_string(),
    );
    out.push(
        if std_dev > VARIABLE_STD_DEV {
            "Your mood varies quite a bit - tracking patterns might help identify triggers."
        } else {
            "Your mood has been fairly consistent."
        }
        .to_string(),
    );
    out
}

fn recommendations(average: f64, trend: MoodTrend) -> Vec<String> {
    let mut out: Vec<&str> = Vec::new();
    if average < 5.0 {
        out.extend([
            "Consider establishing a daily self-care routine",
            "Practice mindfulness or meditation",
            "Connect with supportive friends or family",
            "Consider speaking with a mental health professional",
        ]);
    }
    if trend == MoodTrend::Declining {
        out.extend([
            "Reflect on recent changes in your life",
            "Ensure you're getting adequate sleep",
            "Review your stress management strategies",
            "Consider adjusting your daily routine",
        ]);
    }
    out.push("Keep logging your mood to track progress");
    out.into_iter().map(str::to_string).collect()
}

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

pub(crate) fn patterns(entries: &[&MoodEntry], days: u32) -> MoodPatterns {
    if entries.is_empty() {
        return MoodPatterns {
            period: period(days),
            time_of_day: HourlyPattern::default(),
            day_of_week: WeeklyPattern::default(),
            note_themes: ThemePattern::default(),
            message: Some("Not enough data for pattern analysis".to_string()),
        };
    }
    MoodPatterns {
        period: period(days),
        time_of_day: hourly(entries),
        day_of_week: weekly(entries),
        note_themes: themes(entries),
        message: None,
    }
}

/// First key with the highest / lowest value.
fn best_and_worst<K: Clone>(averages: &IndexMap<K, f64>) -> (Option<K>, Option<K>) {
    let mut best: Option<(&K, f64)> = None;
    let mut worst: Option<(&K, f64)> = None;
    for (k, &v) in averages {
        if best.map_or(true, |(_, b)| v > b) {
            best = Some((k, v));
        }
        if worst.map_or(true, |(_, w)| v < w) {
            worst = Some((k, v));
        }
    }
    (best.map(|(k, _)| k.clone()), worst.map(|(k, _)| k.clone()))
}

fn hourly(entries: &[&MoodEntry]) -> HourlyPattern {
    let mut by_hour: IndexMap<u32, Vec<f64>> = IndexMap::new();
    for e in entries {
        by_hour
            .entry(e.timestamp.hour())
            .or_default()
            .push(f64::from(e.mood_value));
    }
    by_hour.sort_keys();
    let averages: IndexMap<u32, f64> = by_hour.iter().map(|(h, v)| (*h, mean(v))).collect();
    let (best, worst) = best_and_worst(&averages);
    HourlyPattern {
        best_time: best.map(|h| format!("{}:00", h)),
        worst_time: worst.map(|h| format!("{}:00", h)),
        hourly_averages: averages,
    }
}

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn weekly(entries: &[&MoodEntry]) -> WeeklyPattern {
    let mut by_day: IndexMap<u32, Vec<f64>> = IndexMap::new();
    for e in entries {
        by_day
            .entry(e.timestamp.weekday().num_days_from_monday())
            .or_default()
            .push(f64::from(e.mood_value));
    }
    by_day.sort_keys();
    let averages: IndexMap<String, f64> = by_day
        .iter()
        .filter_map(|(d, v)| {
            WEEK.get(*d as usize)
                .map(|day| (weekday_name(*day).to_string(), mean(v)))
        })
        .collect();
    let (best_day, worst_day) = best_and_worst(&averages);
    WeeklyPattern {
        best_day,
        worst_day,
        daily_averages: averages,
    }
}

fn themes(entries: &[&MoodEntry]) -> ThemePattern {
    let overall = mean(
        &entries
            .iter()
            .map(|e| f64::from(e.mood_value))
            .collect::<Vec<_>>(),
    );
    let mut by_theme: IndexMap<String, Vec<f64>> = IndexMap::new();
    for e in entries {
        if let Some(analysis) = &e.note_analysis {
            for theme in &analysis.themes {
                by_theme
                    .entry(theme.clone())
                    .or_default()
                    .push(f64::from(e.mood_value));
            }
        }
    }
    // Stable sort keeps first-seen order among equally common themes.
    let mut ordered: Vec<(String, Vec<f64>)> = by_theme.into_iter().collect();
    ordered.sort_by(|a, b| b.1.len().cmp(&a.1.len()));

    ThemePattern {
        common_themes: ordered.iter().map(|(t, _)| t.clone()).collect(),
        theme_impact: ordered
            .iter()
            .map(|(t, v)| (t.clone(), round2(mean(v) - overall)))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mood::MoodTracker;
    use chrono::{TimeZone, Utc};

    #[test]
    fn trend_from_slope() {
        assert_eq!(trend(&[5.0]), MoodTrend::InsufficientData);
        assert_eq!(trend(&[3.0, 5.0, 7.0]), MoodTrend::Improving);
        assert_eq!(trend(&[8.0, 6.0, 4.0]), MoodTrend::Declining);
        assert_eq!(trend(&[5.0, 5.0, 5.0, 5.0]), MoodTrend::Stable);
        assert_eq!(trend(&[5.0, 5.1]), MoodTrend::Stable);
    }

    #[test]
    fn std_dev_is_sample_based() {
        assert_eq!(sample_std_dev(&[4.0]), 0.0);
        assert!((sample_std_dev(&[2.0, 4.0]) - 2f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn empty_window_reports_message() {
        let tracker = MoodTracker::new();
        let a = tracker.analytics(7);
        assert_eq!(a.total_entries, 0);
        assert_eq!(a.period, "Last 7 days");
        assert_eq!(a.message.as_deref(), Some("No mood entries found for this period"));
        let json = serde_json::to_value(&a).unwrap();
        assert!(json.get("average_mood").is_none());

        let p = tracker.patterns(30);
        assert_eq!(p.message.as_deref(), Some("Not enough data for pattern analysis"));
    }

    #[test]
    fn declining_low_week_gets_support_recommendations() {
        let mut tracker = MoodTracker::new();
        let now = Utc.with_ymd_and_hms(2026, 5, 10, 20, 0, 0).unwrap();
        for (i, mood) in ["6", "5", "3", "2"].iter().enumerate() {
            let at = now - chrono::Duration::days(4 - i as i64);
            tracker.log_mood_at(mood, "", Default::default(), at).unwrap();
        }
        // Outside the window.
        tracker
            .log_mood_at("10", "", Default::default(), now - chrono::Duration::days(30))
            .unwrap();

        let a = tracker.analytics_at(7, now);
        assert_eq!(a.total_entries, 4);
        assert_eq!(a.average_mood, Some(4.0));
        assert_eq!(a.mood_trend, Some(MoodTrend::Declining));
        assert_eq!(a.mood_distribution, MoodDistribution { low: 2, moderate: 2, high: 0 });
        assert_eq!(a.daily_summary.len(), 4);
        assert_eq!(a.daily_summary[0].date, NaiveDate::from_ymd_opt(2026, 5, 6).unwrap());
        assert_eq!(a.insights[0], "Your mood has been lower recently - consider additional support.");
        assert!(a.insights[1].contains("declining"));
        assert_eq!(a.recommendations.len(), 9);
        assert_eq!(
            a.recommendations.last().map(String::as_str),
            Some("Keep logging your mood to track progress")
        );
    }

    #[test]
    fn daily_summary_groups_by_date() {
        let mut tracker = MoodTracker::new();
        let day = |h: u32| Utc.with_ymd_and_hms(2026, 5, 9, h, 0, 0).unwrap();
        tracker.log_mood_at("4", "", Default::default(), day(8)).unwrap();
        tracker.log_mood_at("8", "", Default::default(), day(21)).unwrap();
        let a = tracker.analytics_at(7, day(23));
        assert_eq!(a.daily_summary.len(), 1);
        let d = &a.daily_summary[0];
        assert_eq!((d.entries, d.min, d.max), (2, 4, 8));
        assert_eq!(d.average_mood, 6.0);
        assert_eq!(a.recommendations, vec!["Keep logging your mood to track progress"]);
        assert!(a.insights[2].contains("varies"));
    }

    #[test]
    fn patterns_find_best_hour_day_and_themes() {
        let mut tracker = MoodTracker::new();
        // 2026-05-04 is a Monday.
        let at = |d: u32, h: u32| Utc.with_ymd_and_hms(2026, 5, d, h, 0, 0).unwrap();
        tracker
            .log_mood_at("3", "Stressful meeting at work", Default::default(), at(4, 9))
            .unwrap();
        tracker
            .log_mood_at("8", "Grateful for my family", Default::default(), at(9, 18))
            .unwrap();
        tracker
            .log_mood_at("4", "Deadline at work again", Default::default(), at(5, 9))
            .unwrap();

        let p = tracker.patterns_at(30, at(10, 0));
        assert_eq!(p.time_of_day.best_time.as_deref(), Some("18:00"));
        assert_eq!(p.time_of_day.worst_time.as_deref(), Some("9:00"));
        assert_eq!(p.day_of_week.best_day.as_deref(), Some("Saturday"));
        assert_eq!(p.day_of_week.worst_day.as_deref(), Some("Monday"));
        assert_eq!(p.note_themes.common_themes[0], "work_stress");
        assert_eq!(p.note_themes.theme_impact["work_stress"], -1.5);
        assert!(p.note_themes.theme_impact["gratitude"] > 0.0);
    }
}
