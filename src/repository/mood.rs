use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqlitePool;

use super::MoodRepository;
use crate::error::{AppError, AppResult};
use crate::models::mood::{is_storable_date, Mood, DATE_RANGE_MESSAGE};

const MOOD_COLUMNS: &str = "id, date, mood_level, note, timestamp";

pub struct SqliteMoodRepository {
    pool: SqlitePool,
}

impl SqliteMoodRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MoodRepository for SqliteMoodRepository {
    async fn insert_mood(&self, mood: &Mood) -> AppResult<Mood> {
        if !is_storable_date(mood.date) {
            return Err(AppError::Validation(DATE_RANGE_MESSAGE.into()));
        }

        // NULL id lets SQLite assign the next rowid
        let stored = sqlx::query_as::<_, Mood>(&format!(
            r#"
            INSERT INTO moods (id, date, mood_level, note, timestamp)
            VALUES (NULLIF(?1, 0), ?2, ?3, ?4, ?5)
            ON CONFLICT(id) DO UPDATE SET
                date = excluded.date,
                mood_level = excluded.mood_level,
                note = excluded.note,
                timestamp = excluded.timestamp
            RETURNING {MOOD_COLUMNS}
            "#
        ))
        .bind(mood.id)
        .bind(mood.date)
        .bind(mood.mood_level)
        .bind(&mood.note)
        .bind(mood.timestamp)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(mood_id = stored.id, date = %stored.date, "Mood stored");
        Ok(stored)
    }

    async fn get_moods_by_date_range(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> AppResult<Vec<Mood>> {
        let moods = sqlx::query_as::<_, Mood>(&format!(
            r#"
            SELECT {MOOD_COLUMNS} FROM moods
            WHERE date BETWEEN ?1 AND ?2
            ORDER BY date ASC, timestamp ASC, id ASC
            "#
        ))
        .bind(start_date)
        .bind(end_date)
        .fetch_all(&self.pool)
        .await?;

        Ok(moods)
    }

    async fn get_mood_by_date(&self, date: NaiveDate) -> AppResult<Option<Mood>> {
        let mood = sqlx::query_as::<_, Mood>(&format!(
            r#"
            SELECT {MOOD_COLUMNS} FROM moods
            WHERE date = ?1
            ORDER BY timestamp DESC, id DESC
            LIMIT 1
            "#
        ))
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(mood)
    }

    async fn get_mood_by_id(&self, id: i64) -> AppResult<Option<Mood>> {
        let mood = sqlx::query_as::<_, Mood>(&format!(
            "SELECT {MOOD_COLUMNS} FROM moods WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(mood)
    }

    async fn get_all_moods(&self) -> AppResult<Vec<Mood>> {
        let moods = sqlx::query_as::<_, Mood>(&format!(
            "SELECT {MOOD_COLUMNS} FROM moods ORDER BY date DESC, timestamp DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(moods)
    }

    async fn delete_mood(&self, mood: &Mood) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM moods WHERE id = ?1")
            .bind(mood.id)
            .execute(&self.pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::debug!(mood_id = mood.id, "Mood deleted");
        }
        Ok(deleted)
    }
}
