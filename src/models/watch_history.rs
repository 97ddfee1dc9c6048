use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Progress at or above which a title counts as finished
pub const COMPLETION_THRESHOLD: f64 = 0.9;

/// One entry of a profile's watch history.
///
/// `completed` is never stored on its own: it is derived from `progress`
/// on every read and every deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "WatchHistoryRecord", from = "WatchHistoryRecord")]
pub struct WatchHistoryItem {
    pub content_id: String,
    pub progress: f64,
    pub watched_at: DateTime<Utc>,
}

impl WatchHistoryItem {
    pub fn new(content_id: impl Into<String>, progress: f64, watched_at: DateTime<Utc>) -> Self {
        Self {
            content_id: content_id.into(),
            progress,
            watched_at,
        }
    }

    pub fn completed(&self) -> bool {
        self.progress >= COMPLETION_THRESHOLD
    }

    /// Started but not finished
    pub fn is_in_progress(&self) -> bool {
        self.progress > 0.0 && self.progress < COMPLETION_THRESHOLD
    }
}

/// Wire form of a history entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WatchHistoryRecord {
    content_id: String,
    watched_at: DateTime<Utc>,
    progress: f64,
    #[serde(default)]
    completed: bool,
}

impl From<WatchHistoryItem> for WatchHistoryRecord {
    fn from(item: WatchHistoryItem) -> Self {
        let completed = item.completed();
        Self {
            content_id: item.content_id,
            watched_at: item.watched_at,
            progress: item.progress,
            completed,
        }
    }
}

impl From<WatchHistoryRecord> for WatchHistoryItem {
    fn from(record: WatchHistoryRecord) -> Self {
        // the stored flag is ignored; progress is authoritative
        Self {
            content_id: record.content_id,
            progress: record.progress,
            watched_at: record.watched_at,
        }
    }
}
