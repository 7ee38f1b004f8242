//! Review handlers

use axum::extract::{Path, State};
use axum::Json;
use bookfeed_core::{NewReview, Review};

use super::ApiError;
use crate::AppState;

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<NewReview>,
) -> Result<Json<Review>, ApiError> {
    Ok(Json(state.reviews.create(req).await?))
}

pub async fn list_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<Review>>, ApiError> {
    Ok(Json(state.reviews.list_by_user(user_id).await?))
}

pub async fn list_by_book(
    State(state): State<AppState>,
    Path(book_id): Path<i64>,
) -> Result<Json<Vec<Review>>, ApiError> {
    Ok(Json(state.reviews.list_by_book(book_id).await?))
}
