//! Follow and newsfeed handlers

use axum::extract::{Path, Query, State};
use axum::Json;
use bookfeed_core::{FollowEdge, Review};
use serde::Deserialize;

use super::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct FollowParams {
    follower_id: i64,
}

/// Returns the created edge, or JSON `null` when already following.
pub async fn follow(
    State(state): State<AppState>,
    Path(followee_id): Path<i64>,
    Query(params): Query<FollowParams>,
) -> Result<Json<Option<FollowEdge>>, ApiError> {
    let edge = state.follows.follow(params.follower_id, followee_id).await?;
    Ok(Json(edge))
}

pub async fn unfollow(
    State(state): State<AppState>,
    Path(followee_id): Path<i64>,
    Query(params): Query<FollowParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .follows
        .unfollow(params.follower_id, followee_id)
        .await?;
    Ok(Json(serde_json::json!({ "status": "ok" })))
}

pub async fn newsfeed(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<Review>>, ApiError> {
    Ok(Json(state.follows.newsfeed(user_id).await?))
}
