mod content;
mod search;
mod user;
mod watch_history;

pub use content::{CarouselSection, Content, ContentType};
pub use search::SearchFilters;
pub use user::{
    PreferredQuality, ProfilePatch, Subscription, User, UserPreferences, UserProfile, MAX_PROFILES,
};
pub use watch_history::{WatchHistoryItem, COMPLETION_THRESHOLD};
