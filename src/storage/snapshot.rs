use std::{collections::HashMap, fmt::Display, path::PathBuf};

use tokio::sync::RwLock;

use crate::{error::AppResult, services::session::SessionSnapshot};

/// Keys of the local key/value snapshot namespace
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SnapshotKey {
    /// `{user, isAuthenticated, activeProfile}`
    AuthSession,
}

impl Display for SnapshotKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotKey::AuthSession => write!(f, "auth-storage"),
        }
    }
}

/// Opaque key/value persistence for session snapshots
#[async_trait::async_trait]
pub trait SnapshotStore: Send + Sync {
    async fn get(&self, key: &SnapshotKey) -> AppResult<Option<String>>;

    async fn set(&self, key: &SnapshotKey, value: String) -> AppResult<()>;

    async fn remove(&self, key: &SnapshotKey) -> AppResult<()>;

    /// Name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Reads the stored session, if any
pub async fn load_session(store: &dyn SnapshotStore) -> AppResult<Option<SessionSnapshot>> {
    match store.get(&SnapshotKey::AuthSession).await? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Overwrites the stored session
pub async fn save_session(store: &dyn SnapshotStore, snapshot: &SessionSnapshot) -> AppResult<()> {
    let raw = serde_json::to_string(snapshot)?;
    store.set(&SnapshotKey::AuthSession, raw).await?;
    tracing::debug!(
        store = store.name(),
        authenticated = snapshot.is_authenticated,
        "Session snapshot written"
    );
    Ok(())
}

/// One JSON file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    dir: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &SnapshotKey) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait::async_trait]
impl SnapshotStore for FileSnapshotStore {
    async fn get(&self, key: &SnapshotKey) -> AppResult<Option<String>> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &SnapshotKey, value: String) -> AppResult<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        // readers only ever see a complete file
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, value).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn remove(&self, key: &SnapshotKey) -> AppResult<()> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

/// Process-local store, used in tests
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl SnapshotStore for MemorySnapshotStore {
    async fn get(&self, key: &SnapshotKey) -> AppResult<Option<String>> {
        Ok(self.entries.read().await.get(&key.to_string()).cloned())
    }

    async fn set(&self, key: &SnapshotKey, value: String) -> AppResult<()> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &SnapshotKey) -> AppResult<()> {
        self.entries.write().await.remove(&key.to_string());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
