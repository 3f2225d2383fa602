use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::mood_level::MoodLevel;

/// A daily check-in. `id` is 0 until the record has been persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Mood {
    #[serde(default)]
    pub id: i64,
    /// Calendar day, `yyyy-MM-dd` on the wire and in storage.
    pub date: NaiveDate,
    pub mood_level: MoodLevel,
    #[serde(default)]
    pub note: String,
    /// Creation instant in milliseconds since the Unix epoch.
    #[serde(default = "now_millis")]
    pub timestamp: i64,
}

impl Mood {
    pub fn new(date: NaiveDate, mood_level: MoodLevel, note: impl Into<String>) -> Self {
        Self {
            id: 0,
            date,
            mood_level,
            note: note.into(),
            timestamp: now_millis(),
        }
    }
}

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Dates outside years 0001-9999 render with a sign or extra digits under
/// `%F`, which breaks text ordering of the `date` column.
pub fn is_storable_date(date: NaiveDate) -> bool {
    (1..=9999).contains(&date.year())
}

pub const DATE_RANGE_MESSAGE: &str = "Date must be between 0001-01-01 and 9999-12-31";
