use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{
    api::AppState,
    error::{AppError, AppResult},
    models::{Content, ContentType, SearchFilters},
    services::BrowseState,
};

/// Query string of `GET /search`; `genre` is a comma-separated list.
///
/// Blank values of any filter mean no constraint.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    pub genre: Option<String>,
    #[serde(rename = "type")]
    pub content_type: Option<String>,
    pub year: Option<String>,
    pub rating: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl SearchParams {
    pub fn filters(&self) -> AppResult<SearchFilters> {
        let genre = self.genre.as_deref().map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|g| !g.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        });

        let content_type = non_blank(&self.content_type)
            .map(str::parse::<ContentType>)
            .transpose()
            .map_err(AppError::InvalidInput)?;
        let year = non_blank(&self.year)
            .map(|raw| {
                raw.parse::<i32>()
                    .map_err(|_| AppError::InvalidInput(format!("invalid year: {raw}")))
            })
            .transpose()?;

        Ok(SearchFilters {
            genre: genre.filter(|g| !g.is_empty()),
            content_type,
            year,
            rating: non_blank(&self.rating).map(str::to_string),
        })
    }
}

/// Runs a search after the configured simulated latency
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<Content>>> {
    let filters = params.filters()?;
    tokio::time::sleep(state.config.search_latency()).await;

    let mut inner = state.inner.write().await;
    let results = inner.browse.search(&state.catalog, &params.q, filters).to_vec();
    Ok(Json(results))
}

pub async fn search_state(State(state): State<AppState>) -> Json<BrowseState> {
    Json(state.inner.read().await.browse.clone())
}

/// Replaces the filters; re-runs the search if a query is active
pub async fn set_filters(
    State(state): State<AppState>,
    Json(filters): Json<SearchFilters>,
) -> Json<BrowseState> {
    let mut inner = state.inner.write().await;
    inner.browse.set_filters(&state.catalog, filters);
    Json(inner.browse.clone())
}

pub async fn clear_search(State(state): State<AppState>) -> StatusCode {
    state.inner.write().await.browse.clear();
    StatusCode::NO_CONTENT
}
