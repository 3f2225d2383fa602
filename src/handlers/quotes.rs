use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::{AppError, AppResult};
use crate::models::quote::Quote;
use crate::AppState;

pub async fn quote_of_the_day(State(state): State<AppState>) -> AppResult<Json<Quote>> {
    Ok(Json(state.quotes.get_quote_of_the_day().await?))
}

pub async fn list_quotes(State(state): State<AppState>) -> AppResult<Json<Vec<Quote>>> {
    Ok(Json(state.quotes.get_all_quotes().await?))
}

pub async fn list_favorite_quotes(State(state): State<AppState>) -> AppResult<Json<Vec<Quote>>> {
    Ok(Json(state.quotes.get_favorite_quotes().await?))
}

pub async fn get_quote(
    State(state): State<AppState>,
    Path(quote_id): Path<String>,
) -> AppResult<Json<Quote>> {
    let quote = state
        .quotes
        .get_quote_by_id(&quote_id)
        .await?
        .ok_or(AppError::NotFound("Quote not found".into()))?;

    Ok(Json(quote))
}

pub async fn toggle_favorite(
    State(state): State<AppState>,
    Path(quote_id): Path<String>,
) -> AppResult<Json<Quote>> {
    Ok(Json(state.quotes.toggle_favorite(&quote_id).await?))
}
