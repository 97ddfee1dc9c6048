use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::{
    api::{AppState, AppStateInner},
    error::{AppError, AppResult},
    models::Content,
    services::{
        playback::{format_time, SKIP_SECONDS},
        MediaElement, PlaybackSurface, PlayerState, Quality, SimulatedMedia,
    },
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenPlayerRequest {
    pub content_id: String,
}

#[derive(Debug, Deserialize)]
pub struct MetadataRequest {
    pub duration: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeUpdateRequest {
    pub current_time: f64,
}

#[derive(Debug, Deserialize)]
pub struct SeekRequest {
    pub time: f64,
}

/// Skip offset in seconds; omitted means one step forward
#[derive(Debug, Deserialize)]
pub struct SkipRequest {
    #[serde(default = "default_skip")]
    pub seconds: f64,
}

fn default_skip() -> f64 {
    SKIP_SECONDS
}

#[derive(Debug, Deserialize)]
pub struct VolumeRequest {
    pub volume: f64,
}

#[derive(Debug, Deserialize)]
pub struct QualityRequest {
    pub quality: Quality,
}

#[derive(Debug, Deserialize)]
pub struct SpeedRequest {
    pub speed: f64,
}

/// Player state plus the clock labels shown in the control bar
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    #[serde(flatten)]
    pub state: PlayerState,
    pub current_time_label: String,
    pub duration_label: String,
}

impl From<&PlayerState> for PlayerView {
    fn from(state: &PlayerState) -> Self {
        Self {
            current_time_label: format_time(state.current_time),
            duration_label: format_time(state.duration),
            state: state.clone(),
        }
    }
}

/// Applies `f` to the open player and returns the resulting state
async fn with_player<F>(state: &AppState, f: F) -> AppResult<Json<PlayerView>>
where
    F: FnOnce(&mut PlaybackSurface<SimulatedMedia>) -> AppResult<()>,
{
    let mut inner = state.inner.write().await;
    let player = inner.player_mut()?;
    f(player)?;
    Ok(Json(PlayerView::from(player.state())))
}

/// Opens a player for a title, resuming from the active profile's partial progress
pub async fn open_player(
    State(state): State<AppState>,
    Json(request): Json<OpenPlayerRequest>,
) -> AppResult<(StatusCode, Json<PlayerView>)> {
    let content = state
        .catalog
        .get(&request.content_id)
        .cloned()
        .ok_or_else(|| AppError::ContentNotFound(request.content_id.clone()))?;

    let mut inner = state.inner.write().await;
    let resume_at = inner
        .session
        .active_profile()
        .and_then(|p| p.history_entry(&content.id))
        .filter(|entry| entry.is_in_progress())
        .map(|entry| entry.progress);
    let content = Content {
        watch_progress: resume_at,
        ..content
    };

    inner.browse.set_currently_watching(Some(content.clone()));
    let player = inner
        .player
        .insert(PlaybackSurface::open(content, SimulatedMedia::new()));
    tracing::info!(content_id = %request.content_id, ?resume_at, "Player opened");
    Ok((StatusCode::CREATED, Json(PlayerView::from(player.state()))))
}

pub async fn get_player(State(state): State<AppState>) -> AppResult<Json<PlayerView>> {
    let inner = state.inner.read().await;
    let player = inner.player.as_ref().ok_or(AppError::NoActivePlayer)?;
    Ok(Json(PlayerView::from(player.state())))
}

pub async fn close_player(State(state): State<AppState>) -> StatusCode {
    let mut inner = state.inner.write().await;
    inner.player = None;
    inner.browse.set_currently_watching(None);
    StatusCode::NO_CONTENT
}

/// `loadedmetadata` from the host: the duration is now known
pub async fn loaded_metadata(
    State(state): State<AppState>,
    Json(request): Json<MetadataRequest>,
) -> AppResult<Json<PlayerView>> {
    if !request.duration.is_finite() || request.duration <= 0.0 {
        return Err(AppError::InvalidInput(
            "duration must be a positive number".to_string(),
        ));
    }

    with_player(&state, |player| {
        player.media_mut().load_metadata(request.duration);
        player.on_loaded_metadata();
        Ok(())
    })
    .await
}

/// `timeupdate` from the host: records progress on the active profile.
///
/// Player and session are only changed once the progress is stored.
pub async fn time_update(
    State(state): State<AppState>,
    Json(request): Json<TimeUpdateRequest>,
) -> AppResult<Json<PlayerView>> {
    if !request.current_time.is_finite() {
        return Err(AppError::InvalidInput(
            "currentTime must be a finite number".to_string(),
        ));
    }

    let mut guard = state.inner.write().await;
    let AppStateInner {
        session, player, ..
    } = &mut *guard;
    let live = player.as_mut().ok_or(AppError::NoActivePlayer)?;

    let mut staged_player = live.clone();
    let mut staged_session = session.clone();
    staged_player
        .media_mut()
        .set_current_time(request.current_time);
    if staged_player.on_time_update(&mut staged_session)?.is_some() {
        state.persist(&staged_session).await?;
    }

    *session = staged_session;
    *live = staged_player;
    Ok(Json(PlayerView::from(live.state())))
}

pub async fn toggle_play(State(state): State<AppState>) -> AppResult<Json<PlayerView>> {
    with_player(&state, |player| {
        player.toggle_play();
        Ok(())
    })
    .await
}

pub async fn seek(
    State(state): State<AppState>,
    Json(request): Json<SeekRequest>,
) -> AppResult<Json<PlayerView>> {
    with_player(&state, |player| player.seek(request.time).map(|_| ())).await
}

pub async fn skip(
    State(state): State<AppState>,
    Json(request): Json<SkipRequest>,
) -> AppResult<Json<PlayerView>> {
    with_player(&state, |player| player.skip(request.seconds).map(|_| ())).await
}

pub async fn set_volume(
    State(state): State<AppState>,
    Json(request): Json<VolumeRequest>,
) -> AppResult<Json<PlayerView>> {
    with_player(&state, |player| player.set_volume(request.volume).map(|_| ())).await
}

pub async fn toggle_mute(State(state): State<AppState>) -> AppResult<Json<PlayerView>> {
    with_player(&state, |player| {
        player.toggle_mute();
        Ok(())
    })
    .await
}

pub async fn toggle_fullscreen(State(state): State<AppState>) -> AppResult<Json<PlayerView>> {
    with_player(&state, |player| {
        player.toggle_fullscreen();
        Ok(())
    })
    .await
}

pub async fn set_quality(
    State(state): State<AppState>,
    Json(request): Json<QualityRequest>,
) -> AppResult<Json<PlayerView>> {
    with_player(&state, |player| {
        player.set_quality(request.quality);
        Ok(())
    })
    .await
}

pub async fn toggle_subtitles(State(state): State<AppState>) -> AppResult<Json<PlayerView>> {
    with_player(&state, |player| {
        player.toggle_subtitles();
        Ok(())
    })
    .await
}

pub async fn set_speed(
    State(state): State<AppState>,
    Json(request): Json<SpeedRequest>,
) -> AppResult<Json<PlayerView>> {
    with_player(&state, |player| player.set_playback_speed(request.speed).map(|_| ())).await
}
