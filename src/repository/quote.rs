use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use sqlx::SqlitePool;
use tokio::sync::Mutex;

use super::QuoteRepository;
use crate::error::{AppError, AppResult};
use crate::models::quote::Quote;
use crate::quotes::{bundled, QuoteSource, RemoteQuote};

const QUOTE_COLUMNS: &str = "id, content, author, date_received, is_favorite";

/// Quote store backed by SQLite.
///
/// The quote of the day is chosen once per date and recorded in
/// `quote_selections`, so a past date keeps its quote even after that quote
/// is shown again later. On a new day the remote source is asked first and
/// the bundled collection covers for it when it is missing or failing.
pub struct SqliteQuoteRepository {
    pool: SqlitePool,
    source: Option<Arc<dyn QuoteSource>>,
    // Serializes select-or-create so concurrent first calls agree on one quote.
    selection_lock: Mutex<()>,
}

impl SqliteQuoteRepository {
    pub fn new(pool: SqlitePool, source: Option<Arc<dyn QuoteSource>>) -> Self {
        Self {
            pool,
            source,
            selection_lock: Mutex::new(()),
        }
    }

    /// Quote of the day for an arbitrary date.
    pub async fn quote_for_date(&self, date: NaiveDate) -> AppResult<Quote> {
        let _guard = self.selection_lock.lock().await;

        if let Some(existing) = self.find_selected_on(date).await? {
            return Ok(existing);
        }

        let candidate = self.next_candidate(date).await;
        let stored = self.store_received(&candidate, date).await?;
        tracing::info!(quote_id = %stored.id, date = %date, "Selected quote of the day");
        Ok(stored)
    }

    async fn next_candidate(&self, date: NaiveDate) -> RemoteQuote {
        let Some(source) = self.source.as_ref() else {
            return bundled::pick_for_date(date).into();
        };

        match source.fetch_quote().await {
            Ok(quote) => quote,
            Err(e) => {
                tracing::warn!(error = %e, "Quote API unavailable, using bundled quote");
                bundled::pick_for_date(date).into()
            }
        }
    }

    async fn find_selected_on(&self, date: NaiveDate) -> AppResult<Option<Quote>> {
        let quote = sqlx::query_as::<_, Quote>(
            r#"
            SELECT q.id, q.content, q.author, q.date_received, q.is_favorite
            FROM quote_selections s
            JOIN quotes q ON q.id = s.quote_id
            WHERE s.date = ?1
            "#,
        )
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(quote)
    }

    /// Upserts by id and records the pick for `date`. A quote seen before
    /// keeps its favorite flag.
    async fn store_received(&self, quote: &RemoteQuote, date: NaiveDate) -> AppResult<Quote> {
        let mut tx = self.pool.begin().await?;

        let stored = sqlx::query_as::<_, Quote>(&format!(
            r#"
            INSERT INTO quotes (id, content, author, date_received, is_favorite)
            VALUES (?1, ?2, ?3, ?4, 0)
            ON CONFLICT(id) DO UPDATE SET
                content = excluded.content,
                author = excluded.author,
                date_received = excluded.date_received
            RETURNING {QUOTE_COLUMNS}
            "#
        ))
        .bind(&quote.id)
        .bind(&quote.content)
        .bind(&quote.author)
        .bind(date)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO quote_selections (date, quote_id) VALUES (?1, ?2)")
            .bind(date)
            .bind(&stored.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(stored)
    }
}

#[async_trait]
impl QuoteRepository for SqliteQuoteRepository {
    async fn get_quote_of_the_day(&self) -> AppResult<Quote> {
        self.quote_for_date(Local::now().date_naive()).await
    }

    async fn get_all_quotes(&self) -> AppResult<Vec<Quote>> {
        let quotes = sqlx::query_as::<_, Quote>(&format!(
            "SELECT {QUOTE_COLUMNS} FROM quotes ORDER BY date_received DESC, rowid DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(quotes)
    }

    async fn get_favorite_quotes(&self) -> AppResult<Vec<Quote>> {
        let quotes = sqlx::query_as::<_, Quote>(&format!(
            r#"
            SELECT {QUOTE_COLUMNS} FROM quotes
            WHERE is_favorite = 1
            ORDER BY date_received DESC, rowid DESC
            "#
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(quotes)
    }

    async fn toggle_favorite(&self, quote_id: &str) -> AppResult<Quote> {
        let quote = sqlx::query_as::<_, Quote>(&format!(
            r#"
            UPDATE quotes SET is_favorite = NOT is_favorite
            WHERE id = ?1
            RETURNING {QUOTE_COLUMNS}
            "#
        ))
        .bind(quote_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Quote {} not found", quote_id)))?;

        tracing::debug!(quote_id = %quote.id, is_favorite = quote.is_favorite, "Toggled favorite");
        Ok(quote)
    }

    async fn get_quote_by_id(&self, id: &str) -> AppResult<Option<Quote>> {
        let quote = sqlx::query_as::<_, Quote>(&format!(
            "SELECT {QUOTE_COLUMNS} FROM quotes WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(quote)
    }
}
