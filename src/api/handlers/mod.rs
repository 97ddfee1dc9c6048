pub mod auth;
pub mod catalog;
pub mod library;
pub mod player;
pub mod profiles;
pub mod search;

use axum::{http::StatusCode, Json};
use serde_json::{json, Value};

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
