//! HTTP handlers

pub mod books;
pub mod error;
pub mod follows;
pub mod reviews;
pub mod users;

pub use error::ApiError;

use axum::Json;

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
