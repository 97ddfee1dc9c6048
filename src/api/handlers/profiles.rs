use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::{
    api::AppState,
    error::{AppError, AppResult},
    models::{ProfilePatch, UserProfile},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfileRequest {
    pub name: String,
    #[serde(default)]
    pub is_kid: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchProfileRequest {
    pub profile_id: String,
}

pub async fn list_profiles(State(state): State<AppState>) -> AppResult<Json<Vec<UserProfile>>> {
    let inner = state.inner.read().await;
    let user = inner.session.user().ok_or(AppError::NotAuthenticated)?;
    Ok(Json(user.profiles.clone()))
}

pub async fn create_profile(
    State(state): State<AppState>,
    Json(request): Json<CreateProfileRequest>,
) -> AppResult<(StatusCode, Json<UserProfile>)> {
    let profile = state
        .update_session(|session| session.add_profile(&request.name, request.is_kid).cloned())
        .await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// Selects the active profile; unknown ids leave the session untouched
pub async fn switch_profile(
    State(state): State<AppState>,
    Json(request): Json<SwitchProfileRequest>,
) -> AppResult<Json<UserProfile>> {
    let profile = state
        .update_session(|session| session.switch_profile(&request.profile_id).cloned())
        .await?;
    Ok(Json(profile))
}

pub async fn update_active_profile(
    State(state): State<AppState>,
    Json(patch): Json<ProfilePatch>,
) -> AppResult<Json<UserProfile>> {
    if patch.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(AppError::InvalidInput("profile name cannot be empty".to_string()));
    }

    let profile = state
        .update_session(|session| session.update_profile(patch).cloned())
        .await?;
    Ok(Json(profile))
}
