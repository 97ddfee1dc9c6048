//! Playback surface.
//!
//! Holds the transient UI state of one open player and forwards commands to
//! a [`MediaElement`], which does the actual decoding and rendering. Time
//! updates are reported to a [`WatchProgressSink`] as fractional progress.

use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    models::Content,
};

/// Seconds moved by the skip-back / skip-forward buttons
pub const SKIP_SECONDS: f64 = 10.0;

const MAX_PLAYBACK_SPEED: f64 = 4.0;

/// Native media primitive the player drives
#[cfg_attr(test, mockall::automock)]
pub trait MediaElement {
    fn play(&mut self);
    fn pause(&mut self);
    fn current_time(&self) -> f64;
    fn set_current_time(&mut self, time: f64);
    /// Known once metadata has loaded
    fn duration(&self) -> Option<f64>;
    fn set_volume(&mut self, volume: f64);
    fn set_playback_rate(&mut self, rate: f64);
    fn request_fullscreen(&mut self);
    fn exit_fullscreen(&mut self);
}

/// Receiver of progress reports from time-update events
pub trait WatchProgressSink {
    fn report_progress(&mut self, content_id: &str, progress: f64) -> AppResult<()>;
}

/// Selectable stream quality
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Quality {
    #[serde(rename = "auto")]
    Auto,
    #[serde(rename = "480p")]
    Sd480,
    #[serde(rename = "720p")]
    Hd720,
    #[default]
    #[serde(rename = "1080p")]
    Hd1080,
    #[serde(rename = "4K")]
    Uhd4k,
}

/// Observable player state
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    pub content_id: String,
    pub playing: bool,
    pub current_time: f64,
    pub duration: f64,
    pub volume: f64,
    pub muted: bool,
    pub fullscreen: bool,
    pub quality: Quality,
    pub subtitles_on: bool,
    pub playback_speed: f64,
}

impl PlayerState {
    fn for_content(content_id: &str) -> Self {
        Self {
            content_id: content_id.to_string(),
            playing: false,
            current_time: 0.0,
            duration: 0.0,
            volume: 1.0,
            muted: false,
            fullscreen: false,
            quality: Quality::default(),
            subtitles_on: false,
            playback_speed: 1.0,
        }
    }

    /// Fraction of the title played, once the duration is known
    pub fn progress(&self) -> Option<f64> {
        (self.duration > 0.0).then(|| (self.current_time / self.duration).clamp(0.0, 1.0))
    }
}

fn finite(value: f64, what: &str) -> AppResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AppError::InvalidInput(format!("{what} must be a finite number")))
    }
}

/// One open player bound to one title
#[derive(Debug, Clone)]
pub struct PlaybackSurface<M> {
    content: Content,
    media: M,
    state: PlayerState,
    last_volume: f64,
}

impl<M: MediaElement> PlaybackSurface<M> {
    pub fn open(content: Content, media: M) -> Self {
        let state = PlayerState::for_content(&content.id);
        tracing::debug!(content_id = %content.id, "Player opened");
        Self {
            content,
            media,
            state,
            last_volume: 1.0,
        }
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    /// Reads the duration and resumes at the title's saved progress, if any
    pub fn on_loaded_metadata(&mut self) {
        self.state.duration = self
            .media
            .duration()
            .filter(|d| d.is_finite() && *d > 0.0)
            .unwrap_or(0.0);

        if let Some(progress) = self.content.watch_progress.filter(|p| *p > 0.0) {
            let resume_at = progress.min(1.0) * self.state.duration;
            self.media.set_current_time(resume_at);
            self.state.current_time = resume_at;
        }
    }

    /// Syncs the current time and reports progress. Returns the reported value.
    pub fn on_time_update(&mut self, sink: &mut dyn WatchProgressSink) -> AppResult<Option<f64>> {
        self.state.current_time = self.media.current_time();
        let Some(progress) = self.state.progress() else {
            return Ok(None);
        };

        sink.report_progress(&self.content.id, progress)?;
        Ok(Some(progress))
    }

    pub fn toggle_play(&mut self) -> bool {
        if self.state.playing {
            self.media.pause();
        } else {
            self.media.play();
        }
        self.state.playing = !self.state.playing;
        self.state.playing
    }

    /// Moves to `time`, clamped to `[0, duration]`
    pub fn seek(&mut self, time: f64) -> AppResult<f64> {
        let time = finite(time, "seek time")?.clamp(0.0, self.state.duration);
        self.media.set_current_time(time);
        self.state.current_time = time;
        Ok(time)
    }

    /// Moves by `delta` seconds from the media's current position
    pub fn skip(&mut self, delta: f64) -> AppResult<f64> {
        let delta = finite(delta, "skip offset")?;
        self.seek(self.media.current_time() + delta)
    }

    /// Sets the volume within `[0, 1]`; any audible level unmutes
    pub fn set_volume(&mut self, volume: f64) -> AppResult<f64> {
        let volume = finite(volume, "volume")?.clamp(0.0, 1.0);
        self.media.set_volume(volume);
        self.state.volume = volume;
        if volume > 0.0 {
            self.last_volume = volume;
            self.state.muted = false;
        } else {
            self.state.muted = true;
        }
        Ok(volume)
    }

    /// Swaps between silence and the last audible volume
    pub fn toggle_mute(&mut self) -> bool {
        if self.state.muted {
            self.media.set_volume(self.last_volume);
            self.state.volume = self.last_volume;
            self.state.muted = false;
        } else {
            self.media.set_volume(0.0);
            self.state.muted = true;
        }
        self.state.muted
    }

    pub fn toggle_fullscreen(&mut self) -> bool {
        if self.state.fullscreen {
            self.media.exit_fullscreen();
        } else {
            self.media.request_fullscreen();
        }
        self.state.fullscreen = !self.state.fullscreen;
        self.state.fullscreen
    }

    pub fn set_quality(&mut self, quality: Quality) {
        self.state.quality = quality;
    }

    pub fn toggle_subtitles(&mut self) -> bool {
        self.state.subtitles_on = !self.state.subtitles_on;
        self.state.subtitles_on
    }

    pub fn set_playback_speed(&mut self, speed: f64) -> AppResult<f64> {
        let speed = finite(speed, "playback speed")?;
        if speed <= 0.0 || speed > MAX_PLAYBACK_SPEED {
            return Err(AppError::InvalidInput(format!(
                "playback speed must be in (0, {MAX_PLAYBACK_SPEED}]"
            )));
        }
        self.media.set_playback_rate(speed);
        self.state.playback_speed = speed;
        Ok(speed)
    }
}

/// Headless media element whose clock is driven by the host.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulatedMedia {
    current_time: f64,
    duration: Option<f64>,
    volume: f64,
    playback_rate: f64,
    playing: bool,
    fullscreen: bool,
}

impl SimulatedMedia {
    pub fn new() -> Self {
        Self {
            volume: 1.0,
            playback_rate: 1.0,
            ..Self::default()
        }
    }

    pub fn load_metadata(&mut self, duration: f64) {
        self.duration = Some(duration);
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }
}

impl MediaElement for SimulatedMedia {
    fn play(&mut self) {
        self.playing = true;
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn current_time(&self) -> f64 {
        self.current_time
    }

    fn set_current_time(&mut self, time: f64) {
        self.current_time = time;
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.playback_rate = rate;
    }

    fn request_fullscreen(&mut self) {
        self.fullscreen = true;
    }

    fn exit_fullscreen(&mut self) {
        self.fullscreen = false;
    }
}

/// Renders seconds as `m:ss`, or `h:mm:ss` from one hour up
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    let (hours, minutes, secs) = (total / 3600, (total % 3600) / 60, total % 60);

    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContentType;
    use mockall::predicate::eq;

    #[derive(Default)]
    struct RecordingSink {
        reports: Vec<(String, f64)>,
    }

    impl WatchProgressSink for RecordingSink {
        fn report_progress(&mut self, content_id: &str, progress: f64) -> AppResult<()> {
            self.reports.push((content_id.to_string(), progress));
            Ok(())
        }
    }

    fn inception() -> Content {
        Content::new("cw-2", "Inception", ContentType::Movie)
    }

    fn loaded(duration: f64) -> PlaybackSurface<SimulatedMedia> {
        let mut media = SimulatedMedia::new();
        media.load_metadata(duration);
        let mut surface = PlaybackSurface::open(inception(), media);
        surface.on_loaded_metadata();
        surface
    }

    #[test]
    fn test_initial_state() {
        let surface = PlaybackSurface::open(inception(), SimulatedMedia::new());
        let state = surface.state();
        assert!(!state.playing);
        assert_eq!(state.volume, 1.0);
        assert_eq!(state.quality, Quality::Hd1080);
        assert_eq!(state.progress(), None);
    }

    #[test]
    fn test_toggle_play_drives_media() {
        let mut media = MockMediaElement::new();
        media.expect_play().times(1).return_const(());
        media.expect_pause().times(1).return_const(());

        let mut surface = PlaybackSurface::open(inception(), media);
        assert!(surface.toggle_play());
        assert!(!surface.toggle_play());
    }

    #[test]
    fn test_seek_clamps_to_duration() {
        let mut media = MockMediaElement::new();
        media.expect_duration().return_const(Some(100.0));
        media
            .expect_set_current_time()
            .with(eq(100.0))
            .times(1)
            .return_const(());
        media
            .expect_set_current_time()
            .with(eq(0.0))
            .times(1)
            .return_const(());

        let mut surface = PlaybackSurface::open(inception(), media);
        surface.on_loaded_metadata();
        assert_eq!(surface.seek(250.0).unwrap(), 100.0);
        assert_eq!(surface.seek(-5.0).unwrap(), 0.0);
        assert!(surface.seek(f64::NAN).is_err());
    }

    #[test]
    fn test_skip_is_clamped() {
        let mut surface = loaded(30.0);
        assert_eq!(surface.skip(SKIP_SECONDS).unwrap(), 10.0);
        assert_eq!(surface.skip(SKIP_SECONDS * 3.0).unwrap(), 30.0);
        assert_eq!(surface.skip(-100.0).unwrap(), 0.0);
    }

    #[test]
    fn test_volume_and_mute() {
        let mut surface = loaded(60.0);
        surface.set_volume(0.4).unwrap();
        assert!(surface.toggle_mute());
        assert_eq!(surface.media_mut().volume(), 0.0);

        assert!(!surface.toggle_mute());
        assert_eq!(surface.media_mut().volume(), 0.4);
        assert_eq!(surface.state().volume, 0.4);
    }

    #[test]
    fn test_zero_volume_mutes_and_unmute_restores_last_audible() {
        let mut surface = loaded(60.0);
        surface.set_volume(0.7).unwrap();
        surface.set_volume(0.0).unwrap();
        assert!(surface.state().muted);

        surface.toggle_mute();
        assert!(!surface.state().muted);
        assert_eq!(surface.state().volume, 0.7);

        surface.toggle_mute();
        surface.set_volume(0.2).unwrap();
        assert!(!surface.state().muted);
    }

    #[test]
    fn test_time_update_reports_progress() {
        let mut surface = loaded(200.0);
        surface.media_mut().set_current_time(50.0);

        let mut sink = RecordingSink::default();
        assert_eq!(surface.on_time_update(&mut sink).unwrap(), Some(0.25));
        assert_eq!(sink.reports, vec![("cw-2".to_string(), 0.25)]);
        assert_eq!(surface.state().current_time, 50.0);
    }

    #[test]
    fn test_time_update_before_metadata_reports_nothing() {
        let mut surface = PlaybackSurface::open(inception(), SimulatedMedia::new());
        let mut sink = RecordingSink::default();
        assert_eq!(surface.on_time_update(&mut sink).unwrap(), None);
        assert!(sink.reports.is_empty());
    }

    #[test]
    fn test_resume_from_saved_progress() {
        let content = Content {
            watch_progress: Some(0.5),
            ..inception()
        };
        let mut media = SimulatedMedia::new();
        media.load_metadata(120.0);

        let mut surface = PlaybackSurface::open(content, media);
        surface.on_loaded_metadata();
        assert_eq!(surface.state().current_time, 60.0);
        assert_eq!(surface.media_mut().current_time(), 60.0);
    }

    #[test]
    fn test_fullscreen_toggle() {
        let mut media = MockMediaElement::new();
        media.expect_request_fullscreen().times(1).return_const(());
        media.expect_exit_fullscreen().times(1).return_const(());

        let mut surface = PlaybackSurface::open(inception(), media);
        assert!(surface.toggle_fullscreen());
        assert!(!surface.toggle_fullscreen());
    }

    #[test]
    fn test_playback_speed_bounds() {
        let mut surface = loaded(60.0);
        assert_eq!(surface.set_playback_speed(1.5).unwrap(), 1.5);
        assert!(surface.set_playback_speed(0.0).is_err());
        assert!(surface.set_playback_speed(8.0).is_err());
        assert_eq!(surface.state().playback_speed, 1.5);
    }

    #[test]
    fn test_quality_and_subtitles() {
        let mut surface = loaded(60.0);
        surface.set_quality(Quality::Uhd4k);
        assert!(surface.toggle_subtitles());
        assert_eq!(surface.state().quality, Quality::Uhd4k);
        assert_eq!(serde_json::to_string(&Quality::Sd480).unwrap(), "\"480p\"");
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(75.9), "1:15");
        assert_eq!(format_time(3725.0), "1:02:05");
        assert_eq!(format_time(f64::NAN), "0:00");
    }
}
