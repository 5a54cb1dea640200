//! Exercise handlers

use crate::{error::ApiResult, extractors::Payload, AppState};
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use tracker_core::{CreateExercise, ExerciseLog, ExerciseResponse, LogQuery, TrackerError};

pub async fn create(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Payload(req): Payload<CreateExercise>,
) -> ApiResult<Json<ExerciseResponse>> {
    let (user, exercise) = state.tracker.add_exercise(&user_id, &req).await?;
    Ok(Json(ExerciseResponse::new(&user, &exercise)))
}

pub async fn logs(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    query: Result<Query<LogQuery>, QueryRejection>,
) -> ApiResult<Json<ExerciseLog>> {
    let Query(query) = query.map_err(|e| TrackerError::validation(e.body_text()))?;
    let log = state.tracker.user_log(&user_id, &query).await?;
    Ok(Json(log))
}
