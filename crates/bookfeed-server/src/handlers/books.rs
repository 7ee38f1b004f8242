//! Book handlers

use axum::extract::{Path, State};
use axum::Json;
use bookfeed_core::{Book, NewBook};

use super::ApiError;
use crate::AppState;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Book>>, ApiError> {
    Ok(Json(state.books.list().await?))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Book>, ApiError> {
    let book = state
        .books
        .get(id)
        .await?
        .ok_or(ApiError::NotFound("Book not found"))?;
    Ok(Json(book))
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<NewBook>,
) -> Result<Json<Book>, ApiError> {
    Ok(Json(state.books.create(req).await?))
}
