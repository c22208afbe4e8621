use std::time::Duration;

use pocket_video_player_common::PlayerError;

pub mod mpv;
pub mod source;

pub use mpv::{EngineOptions, MpvEngine};
pub use source::MediaSource;

/// Notification polled out of the engine on the UI tick.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Playback ran off the end of the current media.
    EndReached,
    PositionChanged(Duration),
    /// A new media item was loaded; carries its location.
    MediaChanged(String),
    /// The engine is gone or unusable. Fatal.
    Error(String),
}

/// The embedded playback engine, as seen from the shell.
///
/// Decoding, rendering and the engine's own threading are opaque; the shell
/// only issues transport commands and drains notifications. All calls happen
/// on the UI update loop.
pub trait PlaybackEngine {
    fn play(&mut self, source: &MediaSource) -> Result<(), PlayerError>;
    fn pause(&mut self) -> Result<(), PlayerError>;
    fn resume(&mut self) -> Result<(), PlayerError>;
    fn seek(&mut self, position: Duration) -> Result<(), PlayerError>;
    /// `level` is a percentage in `[0, 100]`.
    fn set_volume(&mut self, level: f64) -> Result<(), PlayerError>;
    fn set_mute(&mut self, mute: bool) -> Result<(), PlayerError>;
    /// Total length of the current media, once the engine knows it.
    fn duration(&mut self) -> Result<Option<Duration>, PlayerError>;
    /// Natural pixel size of the current video track, once known.
    fn video_size(&mut self) -> Result<Option<(u32, u32)>, PlayerError>;
    fn poll_events(&mut self) -> Vec<EngineEvent>;
    /// Dispose the native handle. Further calls are undefined.
    fn shutdown(&mut self);
}

/// Engine that swallows every command.
///
/// Stands in when the real engine failed to start, so the shell can still
/// come up and show the failure instead of dying on the spot.
#[derive(Debug, Default)]
pub struct NullEngine;

impl PlaybackEngine for NullEngine {
    fn play(&mut self, _source: &MediaSource) -> Result<(), PlayerError> {
        Ok(())
    }

    fn pause(&mut self) -> Result<(), PlayerError> {
        Ok(())
    }

    fn resume(&mut self) -> Result<(), PlayerError> {
        Ok(())
    }

    fn seek(&mut self, _position: Duration) -> Result<(), PlayerError> {
        Ok(())
    }

    fn set_volume(&mut self, _level: f64) -> Result<(), PlayerError> {
        Ok(())
    }

    fn set_mute(&mut self, _mute: bool) -> Result<(), PlayerError> {
        Ok(())
    }

    fn duration(&mut self) -> Result<Option<Duration>, PlayerError> {
        Ok(None)
    }

    fn video_size(&mut self) -> Result<Option<(u32, u32)>, PlayerError> {
        Ok(None)
    }

    fn poll_events(&mut self) -> Vec<EngineEvent> {
        Vec::new()
    }

    fn shutdown(&mut self) {}
}
