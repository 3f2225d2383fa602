use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::mood::Mood;
use crate::models::mood_level::MoodLevel;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelCount {
    pub level: MoodLevel,
    pub emoji: &'static str,
    pub description: &'static str,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodSummary {
    pub total_entries: i64,
    pub average_level: Option<f64>,
    /// One entry per level, lowest first, including zero counts.
    pub distribution: Vec<LevelCount>,
    pub dominant_level: Option<MoodLevel>,
    pub current_streak: i32,
    pub longest_streak: i32,
}

pub fn summarize(moods: &[Mood], today: NaiveDate) -> MoodSummary {
    let distribution: Vec<LevelCount> = MoodLevel::ALL
        .into_iter()
        .map(|level| LevelCount {
            level,
            emoji: level.emoji(),
            description: level.description(),
            count: moods.iter().filter(|m| m.mood_level == level).count() as i64,
        })
        .collect();

    let average_level = if moods.is_empty() {
        None
    } else {
        let sum: i64 = moods.iter().map(|m| i64::from(m.mood_level.value())).sum();
        Some(sum as f64 / moods.len() as f64)
    };

    // Ties go to the happier level
    let dominant_level = distribution
        .iter()
        .filter(|c| c.count > 0)
        .max_by_key(|c| (c.count, c.level))
        .map(|c| c.level);

    let dates: BTreeSet<NaiveDate> = moods.iter().map(|m| m.date).collect();

    MoodSummary {
        total_entries: moods.len() as i64,
        average_level,
        distribution,
        dominant_level,
        current_streak: current_streak(&dates, today),
        longest_streak: longest_streak(&dates),
    }
}

/// Consecutive logged days ending today. A missing entry for today does not
/// break the streak yet; counting then starts from yesterday.
fn current_streak(dates: &BTreeSet<NaiveDate>, today: NaiveDate) -> i32 {
    // pred_opt is None at NaiveDate::MIN, which ends the walk
    let mut check_date = if dates.contains(&today) {
        Some(today)
    } else {
        today.pred_opt()
    };

    let mut streak = 0i32;
    while let Some(date) = check_date.filter(|d| dates.contains(d)) {
        streak += 1;
        check_date = date.pred_opt();
    }
    streak
}

fn longest_streak(dates: &BTreeSet<NaiveDate>) -> i32 {
    let mut longest = 0i32;
    let mut streak = 0i32;
    let mut prev_date: Option<NaiveDate> = None;

    for date in dates {
        streak = match prev_date {
            Some(prev) if prev.succ_opt() == Some(*date) => streak + 1,
            _ => 1,
        };
        longest = longest.max(streak);
        prev_date = Some(*date);
    }
    longest
}
