//! User handlers

use crate::{error::ApiResult, extractors::Payload, AppState};
use axum::{extract::State, Json};
use tracker_core::{CreateUser, User};

pub async fn create(
    State(state): State<AppState>,
    Payload(req): Payload<CreateUser>,
) -> ApiResult<Json<User>> {
    let user = state.tracker.create_user(req.username.as_deref()).await?;
    Ok(Json(user))
}

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let users = state.tracker.list_users().await?;
    Ok(Json(users))
}
