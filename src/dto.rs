//! # MindfulMe — Request/Response DTOs
//!
//! API contract types that are not domain models themselves.
//!
//! Conventions:
//! - `*Request`  → deserialized from client JSON body
//! - `*Query`    → deserialized from query params
//! - `*Response` → serialized to client JSON
//! - Field validation is expressed via `validator` derive macros

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::mood::{is_storable_date, DATE_RANGE_MESSAGE};
use crate::models::mood_level::MoodLevel;

fn validate_storable_date(date: &NaiveDate) -> Result<(), ValidationError> {
    if is_storable_date(*date) {
        return Ok(());
    }
    let mut err = ValidationError::new("date_out_of_range");
    err.message = Some(DATE_RANGE_MESSAGE.into());
    Err(err)
}

// ============================================================================
// Common
// ============================================================================

/// Standard delete confirmation
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
    pub id: i64,
}

// ============================================================================
// Mood
// ============================================================================

/// POST /api/moods
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMoodRequest {
    /// Day of the check-in. Default: today.
    #[validate(custom = "validate_storable_date")]
    pub date: Option<NaiveDate>,

    /// 1 (very sad) to 5 (very happy)
    #[validate(range(min = 1, max = 5, message = "Mood level must be 1-5"))]
    pub mood_level: i32,

    #[validate(length(max = 1000, message = "Note must be at most 1000 characters"))]
    pub note: Option<String>,
}

/// PUT /api/moods/:id
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMoodRequest {
    #[validate(range(min = 1, max = 5, message = "Mood level must be 1-5"))]
    pub mood_level: Option<i32>,

    #[validate(length(max = 1000, message = "Note must be at most 1000 characters"))]
    pub note: Option<String>,
}

/// GET /api/moods and GET /api/moods/summary query params
#[derive(Debug, Default, Deserialize, Validate)]
pub struct MoodRangeQuery {
    #[validate(custom = "validate_storable_date")]
    pub start_date: Option<NaiveDate>,
    #[validate(custom = "validate_storable_date")]
    pub end_date: Option<NaiveDate>,
}

impl MoodRangeQuery {
    /// Both bounds, neither, or an error when only one was given.
    pub fn bounds(&self) -> Result<Option<(NaiveDate, NaiveDate)>, String> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => Ok(Some((start, end))),
            (None, None) => Ok(None),
            _ => Err("start_date and end_date must be given together".into()),
        }
    }

    /// Bounds with defaults: the 30 days ending `today`.
    pub fn bounds_or_last_30_days(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let end = self.end_date.unwrap_or(today);
        let start = self.start_date.unwrap_or_else(|| {
            end.checked_sub_signed(Duration::days(29))
                .unwrap_or(NaiveDate::MIN)
        });
        (start, end)
    }
}

/// GET /api/mood-levels
#[derive(Debug, Serialize)]
pub struct MoodLevelResponse {
    pub value: i32,
    pub emoji: &'static str,
    pub description: &'static str,
}

impl From<MoodLevel> for MoodLevelResponse {
    fn from(level: MoodLevel) -> Self {
        Self {
            value: level.value(),
            emoji: level.emoji(),
            description: level.description(),
        }
    }
}

// ============================================================================
// System
// ============================================================================

/// GET /health
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}
