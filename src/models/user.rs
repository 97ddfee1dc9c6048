use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::WatchHistoryItem;

/// Maximum number of viewing profiles under one account
pub const MAX_PROFILES: usize = 5;

/// Subscription tier of an account
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Subscription {
    Basic,
    Premium,
    Family,
}

/// Streaming quality preference
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PreferredQuality {
    #[default]
    #[serde(rename = "auto")]
    Auto,
    #[serde(rename = "720p")]
    Hd720,
    #[serde(rename = "1080p")]
    Hd1080,
    #[serde(rename = "4K")]
    Uhd4k,
}

/// Account-wide viewing preferences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub language: String,
    pub subtitles: bool,
    pub autoplay: bool,
    pub quality: PreferredQuality,
    pub notifications: bool,
    pub maturity_rating: String,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            subtitles: false,
            autoplay: true,
            quality: PreferredQuality::Auto,
            notifications: true,
            maturity_rating: "PG-13".to_string(),
        }
    }
}

/// A viewing persona with its own watchlist and history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub is_kid: bool,
    pub language: String,
    /// Highest content rating this profile may watch
    pub maturity_rating: String,
    #[serde(default)]
    pub watchlist: Vec<String>,
    #[serde(default)]
    pub watch_history: Vec<WatchHistoryItem>,
}

impl UserProfile {
    /// Creates an empty profile; kid profiles are capped at `G`, others at `R`
    pub fn new(id: impl Into<String>, name: impl Into<String>, is_kid: bool) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            avatar: String::new(),
            is_kid,
            language: "en".to_string(),
            maturity_rating: if is_kid { "G" } else { "R" }.to_string(),
            watchlist: Vec::new(),
            watch_history: Vec::new(),
        }
    }

    pub fn is_in_watchlist(&self, content_id: &str) -> bool {
        self.watchlist.iter().any(|id| id == content_id)
    }

    /// Appends the id unless already present. Returns whether it was added.
    pub fn add_to_watchlist(&mut self, content_id: &str) -> bool {
        if self.is_in_watchlist(content_id) {
            return false;
        }
        self.watchlist.push(content_id.to_string());
        true
    }

    /// Removes the id if present. Returns whether it was removed.
    pub fn remove_from_watchlist(&mut self, content_id: &str) -> bool {
        let before = self.watchlist.len();
        self.watchlist.retain(|id| id != content_id);
        self.watchlist.len() != before
    }

    pub fn history_entry(&self, content_id: &str) -> Option<&WatchHistoryItem> {
        self.watch_history.iter().find(|item| item.content_id == content_id)
    }

    /// Updates the existing history entry in place, or appends a new one
    pub fn record_progress(&mut self, content_id: &str, progress: f64, watched_at: DateTime<Utc>) {
        if let Some(existing) = self
            .watch_history
            .iter_mut()
            .find(|item| item.content_id == content_id)
        {
            existing.progress = progress;
            existing.watched_at = watched_at;
        } else {
            self.watch_history
                .push(WatchHistoryItem::new(content_id, progress, watched_at));
        }
    }

    /// Merges the set fields of a patch into this profile
    pub fn apply(&mut self, patch: ProfilePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(avatar) = patch.avatar {
            self.avatar = avatar;
        }
        if let Some(is_kid) = patch.is_kid {
            self.is_kid = is_kid;
        }
        if let Some(language) = patch.language {
            self.language = language;
        }
        if let Some(maturity_rating) = patch.maturity_rating {
            self.maturity_rating = maturity_rating;
        }
    }
}

/// Partial update of a profile's descriptive fields
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub is_kid: Option<bool>,
    pub language: Option<String>,
    pub maturity_rating: Option<String>,
}

/// A signed-in account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub subscription: Subscription,
    pub preferences: UserPreferences,
    pub profiles: Vec<UserProfile>,
    /// Id of the selected profile; always one of `profiles` when set
    #[serde(default)]
    pub active_profile: Option<String>,
}

impl User {
    pub fn profile(&self, profile_id: &str) -> Option<&UserProfile> {
        self.profiles.iter().find(|p| p.id == profile_id)
    }

    pub fn active_profile(&self) -> Option<&UserProfile> {
        self.active_profile.as_deref().and_then(|id| self.profile(id))
    }

    pub fn active_profile_mut(&mut self) -> Option<&mut UserProfile> {
        let id = self.active_profile.as_deref()?;
        self.profiles.iter_mut().find(|p| p.id == id)
    }

    pub fn can_add_profile(&self) -> bool {
        self.profiles.len() < MAX_PROFILES
    }
}
