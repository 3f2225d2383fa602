//! Persistence contracts for moods and quotes.
//!
//! Handlers only see these traits; the SQLite implementations live beside
//! them. Single-item lookups return `Ok(None)` when nothing matches.

pub mod mood;
pub mod quote;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::AppResult;
use crate::models::mood::Mood;
use crate::models::quote::Quote;

pub use mood::SqliteMoodRepository;
pub use quote::SqliteQuoteRepository;

#[async_trait]
pub trait MoodRepository: Send + Sync {
    /// Inserts a new mood (`id == 0`) or replaces the one with the same id.
    /// Returns the stored record. Duplicate dates are accepted.
    async fn insert_mood(&self, mood: &Mood) -> AppResult<Mood>;

    /// Moods dated within `[start_date, end_date]`, oldest first.
    async fn get_moods_by_date_range(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> AppResult<Vec<Mood>>;

    /// Most recently created mood for `date`.
    async fn get_mood_by_date(&self, date: NaiveDate) -> AppResult<Option<Mood>>;

    async fn get_mood_by_id(&self, id: i64) -> AppResult<Option<Mood>>;

    /// Every stored mood, newest first.
    async fn get_all_moods(&self) -> AppResult<Vec<Mood>>;

    /// Removes the record matching `mood.id`. Returns false if nothing was removed.
    async fn delete_mood(&self, mood: &Mood) -> AppResult<bool>;
}

#[async_trait]
pub trait QuoteRepository: Send + Sync {
    /// The quote selected for today. Repeated calls on the same day return
    /// the same quote.
    async fn get_quote_of_the_day(&self) -> AppResult<Quote>;

    async fn get_all_quotes(&self) -> AppResult<Vec<Quote>>;

    async fn get_favorite_quotes(&self) -> AppResult<Vec<Quote>>;

    /// Flips `is_favorite` and returns the updated quote.
    /// Fails with `AppError::NotFound` for an unknown id.
    async fn toggle_favorite(&self, quote_id: &str) -> AppResult<Quote>;

    async fn get_quote_by_id(&self, id: &str) -> AppResult<Option<Quote>>;
}
