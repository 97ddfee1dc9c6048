use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    api::AppState,
    error::{AppError, AppResult},
    models::{CarouselSection, Content},
    services::recommendations::get_recommendations,
};

/// Every title in catalog order
pub async fn list_catalog(State(state): State<AppState>) -> Json<Vec<Content>> {
    Json(state.catalog.all().to_vec())
}

pub async fn featured(State(state): State<AppState>) -> AppResult<Json<Content>> {
    state
        .catalog
        .featured()
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::ContentNotFound("featured".to_string()))
}

pub async fn sections(State(state): State<AppState>) -> Json<Vec<CarouselSection>> {
    Json(state.catalog.sections().to_vec())
}

pub async fn get_title(
    State(state): State<AppState>,
    Path(content_id): Path<String>,
) -> AppResult<Json<Content>> {
    state
        .catalog
        .get(&content_id)
        .cloned()
        .map(Json)
        .ok_or(AppError::ContentNotFound(content_id))
}

/// Up to ten titles sharing a genre; unknown ids give an empty list
pub async fn recommendations(
    State(state): State<AppState>,
    Path(content_id): Path<String>,
) -> Json<Vec<Content>> {
    Json(get_recommendations(&state.catalog, &content_id))
}
