pub mod browse;
pub mod continue_watching;
pub mod playback;
pub mod recommendations;
pub mod session;
pub mod title_search;

pub use browse::BrowseState;
pub use playback::{MediaElement, PlaybackSurface, PlayerState, Quality, SimulatedMedia};
pub use session::{Credentials, SessionSnapshot, SessionState, SessionStatus};
