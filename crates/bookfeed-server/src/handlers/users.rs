//! User handlers

use axum::extract::{Path, State};
use axum::Json;
use bookfeed_core::{NewUser, User};

use super::ApiError;
use crate::AppState;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(state.users.list().await?))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<User>, ApiError> {
    let user = state
        .users
        .get(id)
        .await?
        .ok_or(ApiError::NotFound("User not found"))?;
    Ok(Json(user))
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<NewUser>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.users.create(req).await?))
}
