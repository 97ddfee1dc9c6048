//! Watchlist and watch-progress endpoints for the active profile

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    api::AppState,
    error::{AppError, AppResult},
    models::{Content, WatchHistoryItem},
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistChange {
    pub content_id: String,
    pub in_watchlist: bool,
    /// False when the call found the watchlist already in the requested state
    pub changed: bool,
}

#[derive(Debug, Deserialize)]
pub struct ProgressRequest {
    pub progress: f64,
}

fn ensure_known(state: &AppState, content_id: &str) -> AppResult<()> {
    match state.catalog.get(content_id) {
        Some(_) => Ok(()),
        None => Err(AppError::ContentNotFound(content_id.to_string())),
    }
}

/// Watchlist titles in the order they were added
pub async fn get_watchlist(State(state): State<AppState>) -> Json<Vec<Content>> {
    let inner = state.inner.read().await;
    Json(inner.session.watchlist_content(&state.catalog))
}

pub async fn add_to_watchlist(
    State(state): State<AppState>,
    Path(content_id): Path<String>,
) -> AppResult<Json<WatchlistChange>> {
    ensure_known(&state, &content_id)?;

    let changed = state
        .update_session(|session| session.add_to_watchlist(&content_id))
        .await?;
    Ok(Json(WatchlistChange {
        content_id,
        in_watchlist: true,
        changed,
    }))
}

pub async fn remove_from_watchlist(
    State(state): State<AppState>,
    Path(content_id): Path<String>,
) -> AppResult<Json<WatchlistChange>> {
    let changed = state
        .update_session(|session| session.remove_from_watchlist(&content_id))
        .await?;
    Ok(Json(WatchlistChange {
        content_id,
        in_watchlist: false,
        changed,
    }))
}

pub async fn update_progress(
    State(state): State<AppState>,
    Path(content_id): Path<String>,
    Json(request): Json<ProgressRequest>,
) -> AppResult<Json<WatchHistoryItem>> {
    ensure_known(&state, &content_id)?;

    let entry = state
        .update_session(|session| {
            session
                .update_watch_progress(&content_id, request.progress)
                .cloned()
        })
        .await?;
    Ok(Json(entry))
}

pub async fn continue_watching(State(state): State<AppState>) -> Json<Vec<Content>> {
    let inner = state.inner.read().await;
    Json(inner.session.continue_watching(&state.catalog))
}
