use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::{
    api::AppState,
    error::AppResult,
    services::{Credentials, SessionSnapshot, SessionState, SessionStatus},
};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Session as seen by clients: the persisted snapshot plus its lifecycle state
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub status: SessionStatus,
    #[serde(flatten)]
    pub snapshot: SessionSnapshot,
}

impl From<&SessionState> for SessionResponse {
    fn from(session: &SessionState) -> Self {
        Self {
            status: session.status(),
            snapshot: session.snapshot(),
        }
    }
}

/// Signs in through the mock credential gate after the simulated delay
pub async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> AppResult<Json<SessionResponse>> {
    tokio::time::sleep(state.config.auth_latency()).await;

    let session = state
        .update_session(|session| {
            session.login(&credentials)?;
            Ok(SessionResponse::from(&*session))
        })
        .await?;
    Ok(Json(session))
}

pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<SessionResponse>)> {
    tokio::time::sleep(state.config.auth_latency()).await;

    let session = state
        .update_session(|session| {
            session.register(&request.name, &request.email, &request.password)?;
            Ok(SessionResponse::from(&*session))
        })
        .await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// Signs out, closing any open player and dropping the stored snapshot
pub async fn logout(State(state): State<AppState>) -> AppResult<StatusCode> {
    state.sign_out().await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn session(State(state): State<AppState>) -> Json<SessionResponse> {
    Json(SessionResponse::from(&state.inner.read().await.session))
}
