use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    catalog::Catalog,
    config::Config,
    error::{AppError, AppResult},
    services::{BrowseState, PlaybackSurface, SessionState, SimulatedMedia},
    storage::{
        snapshot::{load_session, save_session},
        MemorySnapshotStore, SnapshotKey, SnapshotStore,
    },
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub inner: Arc<RwLock<AppStateInner>>,
    pub snapshots: Arc<dyn SnapshotStore>,
    pub config: Arc<Config>,
}

/// Inner state that can be modified
#[derive(Default)]
pub struct AppStateInner {
    pub session: SessionState,
    pub browse: BrowseState,
    pub player: Option<PlaybackSurface<SimulatedMedia>>,
}

impl AppStateInner {
    pub fn player_mut(&mut self) -> AppResult<&mut PlaybackSurface<SimulatedMedia>> {
        self.player.as_mut().ok_or(AppError::NoActivePlayer)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Demo catalog, in-memory snapshots and no simulated latency
    pub fn new() -> Self {
        Self::with_parts(
            Catalog::mock(),
            Arc::new(MemorySnapshotStore::new()),
            Config::without_latency(),
        )
    }

    /// State with a signed-out session
    pub fn with_parts(catalog: Catalog, snapshots: Arc<dyn SnapshotStore>, config: Config) -> Self {
        Self {
            catalog: Arc::new(catalog),
            inner: Arc::new(RwLock::new(AppStateInner::default())),
            snapshots,
            config: Arc::new(config),
        }
    }

    /// State whose session is rebuilt from the stored snapshot, if one exists
    pub async fn restore(
        catalog: Catalog,
        snapshots: Arc<dyn SnapshotStore>,
        config: Config,
    ) -> AppResult<Self> {
        let state = Self::with_parts(catalog, snapshots, config);

        if let Some(snapshot) = load_session(state.snapshots.as_ref()).await? {
            let session = SessionState::from_snapshot(snapshot);
            tracing::info!(
                store = state.snapshots.name(),
                status = ?session.status(),
                "Session restored from snapshot"
            );
            state.inner.write().await.session = session;
        }

        Ok(state)
    }

    /// Writes the session snapshot
    pub async fn persist(&self, session: &SessionState) -> AppResult<()> {
        save_session(self.snapshots.as_ref(), &session.snapshot()).await
    }

    /// Applies `f` to a copy of the session and swaps it in once the snapshot is written.
    ///
    /// If `f` or the write fails, the live session is left as it was.
    pub async fn update_session<T, F>(&self, f: F) -> AppResult<T>
    where
        F: FnOnce(&mut SessionState) -> AppResult<T>,
    {
        let mut inner = self.inner.write().await;
        let mut staged = inner.session.clone();
        let value = f(&mut staged)?;
        self.persist(&staged).await?;
        inner.session = staged;
        Ok(value)
    }

    /// Drops the stored snapshot, then signs out and closes the player
    pub async fn sign_out(&self) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        self.snapshots.remove(&SnapshotKey::AuthSession).await?;
        inner.session.logout();
        inner.player = None;
        inner.browse.set_currently_watching(None);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::session::{Credentials, DEMO_EMAIL, DEMO_PASSWORD};
    use crate::services::SessionStatus;

    #[tokio::test]
    async fn test_restore_without_snapshot_is_signed_out() {
        let state = AppState::restore(
            Catalog::mock(),
            Arc::new(MemorySnapshotStore::new()),
            Config::without_latency(),
        )
        .await
        .unwrap();

        assert_eq!(
            state.inner.read().await.session.status(),
            SessionStatus::SignedOut
        );
    }

    #[tokio::test]
    async fn test_persist_then_restore() {
        let store: Arc<dyn SnapshotStore> = Arc::new(MemorySnapshotStore::new());
        let state = AppState::with_parts(Catalog::mock(), store.clone(), Config::without_latency());

        {
            let mut inner = state.inner.write().await;
            inner
                .session
                .login(&Credentials::new(DEMO_EMAIL, DEMO_PASSWORD))
                .unwrap();
            inner.session.switch_profile("profile-2").unwrap();
            state.persist(&inner.session).await.unwrap();
        }

        let restored = AppState::restore(Catalog::mock(), store, Config::without_latency())
            .await
            .unwrap();
        let inner = restored.inner.read().await;
        assert_eq!(inner.session.active_profile().unwrap().id, "profile-2");
    }

    /// Store whose writes fail once `broken` is set
    #[derive(Default)]
    struct FlakyStore {
        broken: std::sync::atomic::AtomicBool,
        inner: MemorySnapshotStore,
    }

    #[async_trait::async_trait]
    impl SnapshotStore for FlakyStore {
        async fn get(&self, key: &SnapshotKey) -> AppResult<Option<String>> {
            self.inner.get(key).await
        }

        async fn set(&self, key: &SnapshotKey, value: String) -> AppResult<()> {
            if self.broken.load(std::sync::atomic::Ordering::SeqCst) {
                return Err(AppError::Internal("disk full".to_string()));
            }
            self.inner.set(key, value).await
        }

        async fn remove(&self, key: &SnapshotKey) -> AppResult<()> {
            self.inner.remove(key).await
        }

        fn name(&self) -> &'static str {
            "flaky"
        }
    }

    #[tokio::test]
    async fn test_failed_write_keeps_live_session() {
        let store = Arc::new(FlakyStore::default());
        let state = AppState::with_parts(Catalog::mock(), store.clone(), Config::without_latency());

        state
            .update_session(|s| s.login(&Credentials::new(DEMO_EMAIL, DEMO_PASSWORD)).map(|_| ()))
            .await
            .unwrap();

        store.broken.store(true, std::sync::atomic::Ordering::SeqCst);
        let result = state
            .update_session(|s| s.add_to_watchlist("m-1"))
            .await;
        assert!(matches!(result, Err(AppError::Internal(_))));

        let inner = state.inner.read().await;
        assert!(inner.session.active_profile().unwrap().watchlist.is_empty());
    }

    #[tokio::test]
    async fn test_failed_mutation_is_not_written() {
        let store: Arc<dyn SnapshotStore> = Arc::new(MemorySnapshotStore::new());
        let state = AppState::with_parts(Catalog::mock(), store.clone(), Config::without_latency());

        let result = state
            .update_session(|s| s.login(&Credentials::new("x@x.com", "nope")).map(|_| ()))
            .await;
        assert!(matches!(result, Err(AppError::InvalidCredentials)));
        assert!(load_session(store.as_ref()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_sign_out_clears_snapshot_and_player() {
        let store: Arc<dyn SnapshotStore> = Arc::new(MemorySnapshotStore::new());
        let state = AppState::with_parts(Catalog::mock(), store.clone(), Config::without_latency());
        state
            .update_session(|s| s.login(&Credentials::new(DEMO_EMAIL, DEMO_PASSWORD)).map(|_| ()))
            .await
            .unwrap();
        {
            let mut inner = state.inner.write().await;
            let content = state.catalog.get("m-1").cloned().unwrap();
            inner.browse.set_currently_watching(Some(content.clone()));
            inner.player = Some(PlaybackSurface::open(content, SimulatedMedia::new()));
        }

        state.sign_out().await.unwrap();

        let inner = state.inner.read().await;
        assert_eq!(inner.session.status(), SessionStatus::SignedOut);
        assert!(inner.player.is_none());
        assert!(inner.browse.currently_watching.is_none());
        assert!(load_session(store.as_ref()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_player_required() {
        let state = AppState::new();
        let mut inner = state.inner.write().await;
        assert!(matches!(inner.player_mut(), Err(AppError::NoActivePlayer)));
    }
}
