//! HTTP handlers for shot evaluation and history

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use shared::{RawShotInput, ShotLogEntry, MAX_SHOTS};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    services::shot::LoggedShot,
    AppState,
};

/// Query parameters for listing history
#[derive(Debug, Deserialize, Validate)]
pub struct ListShotsQuery {
    #[validate(range(min = 1, max = 12))]
    pub limit: Option<usize>,
}

/// Evaluate a shot from raw form fields and log it
pub async fn evaluate_shot(
    State(state): State<AppState>,
    Json(input): Json<RawShotInput>,
) -> AppResult<Json<LoggedShot>> {
    let shots = state.shots.clone();
    let logged = off_runtime(move || shots.evaluate(&input)).await?;
    Ok(Json(logged))
}

/// List logged shots, newest first
pub async fn list_shots(
    State(state): State<AppState>,
    Query(query): Query<ListShotsQuery>,
) -> AppResult<Json<Vec<ShotLogEntry>>> {
    query.validate().map_err(|_| AppError::Validation {
        field: "limit".to_string(),
        message: format!("limit must be between 1 and {}", MAX_SHOTS),
    })?;

    let mut shots = state.shots.history()?;
    if let Some(limit) = query.limit {
        shots.truncate(limit);
    }
    Ok(Json(shots))
}

/// Get the most recent shot
pub async fn latest_shot(State(state): State<AppState>) -> AppResult<Json<ShotLogEntry>> {
    let shot = state.shots.latest()?;
    Ok(Json(shot))
}

/// Clear the shot history
pub async fn clear_shots(State(state): State<AppState>) -> AppResult<StatusCode> {
    let shots = state.shots.clone();
    off_runtime(move || shots.clear()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Run a call that writes the history file on the blocking pool
async fn off_runtime<T, F>(call: F) -> AppResult<T>
where
    F: FnOnce() -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(call)
        .await
        .map_err(|e| AppError::Internal(format!("history task failed: {}", e)))?
}
