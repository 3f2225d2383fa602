use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Quote {
    pub id: String,
    pub content: String,
    pub author: String,
    /// The day this quote was last shown as quote of the day.
    pub date_received: NaiveDate,
    #[serde(default)]
    pub is_favorite: bool,
}
