use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    catalog::Catalog,
    error::{AppError, AppResult},
    models::{
        Content, ProfilePatch, Subscription, User, UserPreferences, UserProfile, WatchHistoryItem,
        MAX_PROFILES,
    },
};

use super::{continue_watching::continue_watching, playback::WatchProgressSink};

pub const DEMO_EMAIL: &str = "demo@streamflix.com";
pub const DEMO_PASSWORD: &str = "demo123";

const DEFAULT_AVATAR: &str =
    "https://images.pexels.com/photos/220453/pexels-photo-220453.jpeg?auto=compress&cs=tinysrgb&w=100&h=100";
const KIDS_AVATAR: &str =
    "https://images.pexels.com/photos/1416736/pexels-photo-1416736.jpeg?auto=compress&cs=tinysrgb&w=100&h=100";

/// Login request
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    fn is_demo_account(&self) -> bool {
        self.email == DEMO_EMAIL && self.password == DEMO_PASSWORD
    }
}

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    SignedOut,
    SignedInNoProfile,
    SignedInActiveProfile,
}

/// Persisted view of the session
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub active_profile: Option<UserProfile>,
}

fn profile_with_avatar(id: &str, name: &str, is_kid: bool) -> UserProfile {
    UserProfile {
        avatar: if is_kid { KIDS_AVATAR } else { DEFAULT_AVATAR }.to_string(),
        ..UserProfile::new(id, name, is_kid)
    }
}

/// The account every successful demo login signs into
pub fn demo_user() -> User {
    User {
        id: "1".to_string(),
        name: "John Doe".to_string(),
        email: "john@example.com".to_string(),
        avatar: DEFAULT_AVATAR.to_string(),
        subscription: Subscription::Premium,
        preferences: UserPreferences::default(),
        profiles: vec![
            profile_with_avatar("profile-1", "John", false),
            profile_with_avatar("profile-2", "Kids", true),
        ],
        active_profile: Some("profile-1".to_string()),
    }
}

/// Signed-in user, their profiles and the active profile.
///
/// All mutation goes through these methods; the active profile always
/// refers to one of the user's profiles.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    user: Option<User>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a session from a stored snapshot.
    ///
    /// A snapshot whose active profile is not one of its user's profiles
    /// comes back with no profile selected.
    pub fn from_snapshot(snapshot: SessionSnapshot) -> Self {
        if !snapshot.is_authenticated {
            return Self::new();
        }

        let Some(mut user) = snapshot.user else {
            return Self::new();
        };

        let active_id = snapshot
            .active_profile
            .map(|p| p.id)
            .or_else(|| user.active_profile.take());
        user.active_profile = active_id.filter(|id| user.profile(id).is_some());

        Self { user: Some(user) }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            user: self.user.clone(),
            is_authenticated: self.user.is_some(),
            active_profile: self.active_profile().cloned(),
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn active_profile(&self) -> Option<&UserProfile> {
        self.user.as_ref().and_then(User::active_profile)
    }

    pub fn status(&self) -> SessionStatus {
        match &self.user {
            None => SessionStatus::SignedOut,
            Some(user) if user.active_profile().is_some() => SessionStatus::SignedInActiveProfile,
            Some(_) => SessionStatus::SignedInNoProfile,
        }
    }

    /// Signs in through the mock credential gate.
    ///
    /// On failure the session is left exactly as it was.
    pub fn login(&mut self, credentials: &Credentials) -> AppResult<&User> {
        if !credentials.is_demo_account() {
            tracing::warn!(email = %credentials.email, "Login rejected");
            return Err(AppError::InvalidCredentials);
        }

        let user = demo_user();
        tracing::info!(user_id = %user.id, active_profile = ?user.active_profile, "User signed in");
        Ok(self.user.insert(user))
    }

    /// Creates a fresh account from the demo template with a single profile
    pub fn register(&mut self, name: &str, email: &str, _password: &str) -> AppResult<&User> {
        let name = name.trim();
        let email = email.trim();
        if name.is_empty() || email.is_empty() {
            return Err(AppError::InvalidInput(
                "name and email are required".to_string(),
            ));
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            profiles: vec![profile_with_avatar("profile-1", name, false)],
            active_profile: Some("profile-1".to_string()),
            ..demo_user()
        };

        tracing::info!(user_id = %user.id, "User registered");
        Ok(self.user.insert(user))
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            tracing::info!(user_id = %user.id, "User signed out");
        }
    }

    /// Selects a profile. Unknown ids leave the state untouched.
    pub fn switch_profile(&mut self, profile_id: &str) -> AppResult<&UserProfile> {
        let user = self.user.as_mut().ok_or(AppError::NotAuthenticated)?;
        if user.profile(profile_id).is_none() {
            tracing::warn!(profile_id, "Switch to unknown profile ignored");
            return Err(AppError::ProfileNotFound(profile_id.to_string()));
        }

        user.active_profile = Some(profile_id.to_string());
        tracing::info!(profile_id, "Active profile switched");
        user.active_profile()
            .ok_or_else(|| AppError::ProfileNotFound(profile_id.to_string()))
    }

    /// Adds a profile to the account without selecting it
    pub fn add_profile(&mut self, name: &str, is_kid: bool) -> AppResult<&UserProfile> {
        let user = self.user.as_mut().ok_or(AppError::NotAuthenticated)?;
        if !user.can_add_profile() {
            return Err(AppError::ProfileLimitReached(MAX_PROFILES));
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidInput("profile name is required".to_string()));
        }

        let id = (user.profiles.len() + 1..)
            .map(|n| format!("profile-{n}"))
            .find(|candidate| user.profile(candidate).is_none())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        user.profiles.push(profile_with_avatar(&id, name, is_kid));
        tracing::info!(profile_id = %id, is_kid, "Profile added");
        Ok(&user.profiles[user.profiles.len() - 1])
    }

    pub fn update_profile(&mut self, patch: ProfilePatch) -> AppResult<&UserProfile> {
        let profile = self.active_profile_mut()?;
        profile.apply(patch);
        Ok(&*profile)
    }

    /// Returns whether the id was newly added
    pub fn add_to_watchlist(&mut self, content_id: &str) -> AppResult<bool> {
        Ok(self.active_profile_mut()?.add_to_watchlist(content_id))
    }

    /// Returns whether the id was present
    pub fn remove_from_watchlist(&mut self, content_id: &str) -> AppResult<bool> {
        Ok(self.active_profile_mut()?.remove_from_watchlist(content_id))
    }

    /// Upserts the active profile's history entry for `content_id`.
    ///
    /// Non-finite progress is rejected; everything else is clamped to `[0, 1]`.
    pub fn update_watch_progress(
        &mut self,
        content_id: &str,
        progress: f64,
    ) -> AppResult<&WatchHistoryItem> {
        if !progress.is_finite() {
            return Err(AppError::InvalidInput(format!(
                "progress must be a finite number, got {progress}"
            )));
        }

        let profile = self.active_profile_mut()?;
        profile.record_progress(content_id, progress.clamp(0.0, 1.0), Utc::now());
        profile
            .history_entry(content_id)
            .ok_or_else(|| AppError::Internal("history entry missing after upsert".to_string()))
    }

    pub fn watch_history(&self) -> &[WatchHistoryItem] {
        self.active_profile()
            .map(|p| p.watch_history.as_slice())
            .unwrap_or_default()
    }

    /// The active profile's watchlist resolved against the catalog
    pub fn watchlist_content(&self, catalog: &Catalog) -> Vec<Content> {
        self.active_profile()
            .map(|profile| {
                profile
                    .watchlist
                    .iter()
                    .filter_map(|id| catalog.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn continue_watching(&self, catalog: &Catalog) -> Vec<Content> {
        continue_watching(catalog, self.watch_history())
    }

    fn active_profile_mut(&mut self) -> AppResult<&mut UserProfile> {
        self.user
            .as_mut()
            .and_then(User::active_profile_mut)
            .ok_or(AppError::NoActiveProfile)
    }
}

impl WatchProgressSink for SessionState {
    fn report_progress(&mut self, content_id: &str, progress: f64) -> AppResult<()> {
        self.update_watch_progress(content_id, progress).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::COMPLETION_THRESHOLD;

    fn signed_in() -> SessionState {
        let mut session = SessionState::new();
        session
            .login(&Credentials::new(DEMO_EMAIL, DEMO_PASSWORD))
            .unwrap();
        session
    }

    #[test]
    fn test_demo_login_selects_default_profile() {
        let session = signed_in();
        assert_eq!(session.status(), SessionStatus::SignedInActiveProfile);
        assert_eq!(session.active_profile().unwrap().id, "profile-1");
    }

    #[test]
    fn test_bad_login_stays_signed_out() {
        let mut session = SessionState::new();
        let result = session.login(&Credentials::new("x@x.com", "bad"));
        assert!(matches!(result, Err(AppError::InvalidCredentials)));
        assert_eq!(session.status(), SessionStatus::SignedOut);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_logout_clears_everything() {
        let mut session = signed_in();
        session.logout();
        assert_eq!(session.status(), SessionStatus::SignedOut);
        assert!(session.active_profile().is_none());
        assert_eq!(session.snapshot(), SessionSnapshot::default());
    }

    #[test]
    fn test_switch_profile() {
        let mut session = signed_in();
        assert_eq!(session.switch_profile("profile-2").unwrap().name, "Kids");
        assert_eq!(session.active_profile().unwrap().id, "profile-2");
    }

    #[test]
    fn test_switch_to_unknown_profile_is_noop() {
        let mut session = signed_in();
        let result = session.switch_profile("profile-9");
        assert!(matches!(result, Err(AppError::ProfileNotFound(id)) if id == "profile-9"));
        assert_eq!(session.active_profile().unwrap().id, "profile-1");
    }

    #[test]
    fn test_switch_profile_requires_sign_in() {
        let mut session = SessionState::new();
        assert!(matches!(
            session.switch_profile("profile-1"),
            Err(AppError::NotAuthenticated)
        ));
    }

    #[test]
    fn test_watchlist_requires_active_profile() {
        let mut session = SessionState::new();
        assert!(matches!(
            session.add_to_watchlist("m-1"),
            Err(AppError::NoActiveProfile)
        ));
        assert!(matches!(
            session.update_watch_progress("m-1", 0.5),
            Err(AppError::NoActiveProfile)
        ));
    }

    #[test]
    fn test_watchlist_is_per_profile() {
        let mut session = signed_in();
        assert!(session.add_to_watchlist("m-1").unwrap());
        assert!(!session.add_to_watchlist("m-1").unwrap());

        session.switch_profile("profile-2").unwrap();
        assert!(session.active_profile().unwrap().watchlist.is_empty());

        session.switch_profile("profile-1").unwrap();
        assert!(session.remove_from_watchlist("m-1").unwrap());
        assert!(session.active_profile().unwrap().watchlist.is_empty());
    }

    #[test]
    fn test_progress_upsert_and_completion() {
        let mut session = signed_in();
        assert!(!session.update_watch_progress("m-1", 0.5).unwrap().completed());
        let entry = session
            .update_watch_progress("m-1", COMPLETION_THRESHOLD)
            .unwrap();
        assert!(entry.completed());
        assert_eq!(session.watch_history().len(), 1);
    }

    #[test]
    fn test_progress_is_clamped_and_nan_rejected() {
        let mut session = signed_in();
        assert_eq!(session.update_watch_progress("m-1", 1.7).unwrap().progress, 1.0);
        assert_eq!(session.update_watch_progress("m-2", -0.3).unwrap().progress, 0.0);
        assert!(matches!(
            session.update_watch_progress("m-3", f64::NAN),
            Err(AppError::InvalidInput(_))
        ));
        assert_eq!(session.watch_history().len(), 2);
    }

    #[test]
    fn test_register_creates_single_active_profile() {
        let mut session = SessionState::new();
        let user = session
            .register("Ana", "ana@example.com", "secret")
            .unwrap();
        assert_eq!(user.profiles.len(), 1);
        assert_eq!(user.profiles[0].name, "Ana");
        assert_eq!(session.active_profile().unwrap().id, "profile-1");

        assert!(matches!(
            session.register("", "ana@example.com", "x"),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_add_profile_limit() {
        let mut session = signed_in();
        for name in ["A", "B", "C"] {
            session.add_profile(name, false).unwrap();
        }
        let ids: Vec<String> = session
            .user()
            .unwrap()
            .profiles
            .iter()
            .map(|p| p.id.clone())
            .collect();
        assert_eq!(ids[4], "profile-5");
        assert!(matches!(
            session.add_profile("D", false),
            Err(AppError::ProfileLimitReached(5))
        ));
    }

    #[test]
    fn test_update_profile_changes_active_only() {
        let mut session = signed_in();
        session
            .update_profile(ProfilePatch {
                name: Some("Johnny".to_string()),
                ..Default::default()
            })
            .unwrap();

        let user = session.user().unwrap();
        assert_eq!(user.profiles[0].name, "Johnny");
        assert_eq!(user.profiles[1].name, "Kids");
    }

    #[test]
    fn test_watchlist_content_and_continue_watching() {
        let catalog = Catalog::mock();
        let mut session = signed_in();
        session.add_to_watchlist("t-2").unwrap();
        session.add_to_watchlist("unknown").unwrap();
        session.add_to_watchlist("m-1").unwrap();
        session.update_watch_progress("cw-2", 0.4).unwrap();
        session.update_watch_progress("cw-3", 0.95).unwrap();

        let watchlist: Vec<String> = session
            .watchlist_content(&catalog)
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(watchlist, vec!["t-2", "m-1"]);

        let rail = session.continue_watching(&catalog);
        assert_eq!(rail.len(), 1);
        assert_eq!(rail[0].watch_progress, Some(0.4));
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut session = signed_in();
        session.switch_profile("profile-2").unwrap();
        session.add_to_watchlist("t-3").unwrap();

        let snapshot = session.snapshot();
        assert!(snapshot.is_authenticated);
        assert_eq!(snapshot.active_profile.as_ref().unwrap().id, "profile-2");

        let restored = SessionState::from_snapshot(snapshot);
        assert_eq!(restored.active_profile().unwrap().watchlist, vec!["t-3"]);
    }

    #[test]
    fn test_snapshot_with_foreign_profile_is_dropped() {
        let mut snapshot = signed_in().snapshot();
        snapshot.active_profile = Some(UserProfile::new("profile-x", "Ghost", false));

        let restored = SessionState::from_snapshot(snapshot);
        assert_eq!(restored.status(), SessionStatus::SignedInNoProfile);
    }
}
