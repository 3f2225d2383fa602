use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use chrono::{Local, NaiveDate};
use validator::Validate;

use crate::dto::{
    CreateMoodRequest, DeleteResponse, MoodLevelResponse, MoodRangeQuery, UpdateMoodRequest,
};
use crate::error::{AppError, AppResult};
use crate::models::mood::{is_storable_date, Mood, DATE_RANGE_MESSAGE};
use crate::models::mood_level::MoodLevel;
use crate::services::mood_summary::{summarize, MoodSummary};
use crate::AppState;

pub async fn list_mood_levels() -> Json<Vec<MoodLevelResponse>> {
    Json(MoodLevel::ALL.into_iter().map(MoodLevelResponse::from).collect())
}

pub async fn list_moods(
    State(state): State<AppState>,
    query: Result<Query<MoodRangeQuery>, QueryRejection>,
) -> AppResult<Json<Vec<Mood>>> {
    let Query(query) = query?;
    query.validate()?;

    let moods = match query.bounds().map_err(AppError::Validation)? {
        Some((start, end)) => state.moods.get_moods_by_date_range(start, end).await?,
        None => state.moods.get_all_moods().await?,
    };

    Ok(Json(moods))
}

pub async fn create_mood(
    State(state): State<AppState>,
    body: Result<Json<CreateMoodRequest>, JsonRejection>,
) -> AppResult<Json<Mood>> {
    let Json(body) = body?;
    body.validate()?;

    let date = body.date.unwrap_or_else(|| Local::now().date_naive());
    let level = MoodLevel::try_from(body.mood_level)?;
    let mood = Mood::new(date, level, body.note.unwrap_or_default());

    let stored = state.moods.insert_mood(&mood).await?;
    tracing::info!(
        mood_id = stored.id,
        date = %stored.date,
        level = stored.mood_level.value(),
        "Mood logged"
    );

    Ok(Json(stored))
}

pub async fn get_mood_by_date(
    State(state): State<AppState>,
    date: Result<Path<NaiveDate>, PathRejection>,
) -> AppResult<Json<Mood>> {
    let Path(date) = date?;
    if !is_storable_date(date) {
        return Err(AppError::Validation(DATE_RANGE_MESSAGE.into()));
    }

    let mood = state
        .moods
        .get_mood_by_date(date)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No mood logged for {}", date)))?;

    Ok(Json(mood))
}

pub async fn update_mood(
    State(state): State<AppState>,
    mood_id: Result<Path<i64>, PathRejection>,
    body: Result<Json<UpdateMoodRequest>, JsonRejection>,
) -> AppResult<Json<Mood>> {
    let Path(mood_id) = mood_id?;
    let Json(body) = body?;
    body.validate()?;

    let mut mood = state
        .moods
        .get_mood_by_id(mood_id)
        .await?
        .ok_or(AppError::NotFound("Mood not found".into()))?;

    if let Some(value) = body.mood_level {
        mood.mood_level = MoodLevel::try_from(value)?;
    }
    if let Some(note) = body.note {
        mood.note = note;
    }

    let stored = state.moods.insert_mood(&mood).await?;
    Ok(Json(stored))
}

pub async fn delete_mood(
    State(state): State<AppState>,
    mood_id: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<DeleteResponse>> {
    let Path(mood_id) = mood_id?;
    let mood = state
        .moods
        .get_mood_by_id(mood_id)
        .await?
        .ok_or(AppError::NotFound("Mood not found".into()))?;

    let deleted = state.moods.delete_mood(&mood).await?;
    Ok(Json(DeleteResponse {
        deleted,
        id: mood_id,
    }))
}

pub async fn get_mood_summary(
    State(state): State<AppState>,
    query: Result<Query<MoodRangeQuery>, QueryRejection>,
) -> AppResult<Json<MoodSummary>> {
    let Query(query) = query?;
    query.validate()?;

    let today = Local::now().date_naive();
    let (start, end) = query.bounds_or_last_30_days(today);
    if start > end {
        return Err(AppError::Validation(
            "start_date must not be after end_date".into(),
        ));
    }

    let moods = state.moods.get_moods_by_date_range(start, end).await?;
    Ok(Json(summarize(&moods, end.min(today))))
}
