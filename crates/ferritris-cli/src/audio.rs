use std::fmt;

use ferritris_engine::GameEvent;
use serde::{Deserialize, Serialize};

/// Upper bound of the stored volume scale.
pub const MAX_VOLUME: u8 = 100;

/// Volume change per key press.
const VOLUME_STEP: u8 = 5;

/// Player-facing audio settings, owned by the front-end.
///
/// The game core never sees these; it emits [`GameEvent`]s and this layer
/// decides how loud they are. Muting suppresses playback to zero without
/// altering the stored volume, so unmuting restores the previous level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioSettings {
    /// Stored volume in `0..=100`.
    pub volume: u8,
    pub muted: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            volume: MAX_VOLUME,
            muted: false,
        }
    }
}

impl AudioSettings {
    /// Returns the settings with the volume clamped into range.
    #[must_use]
    pub fn clamped(mut self) -> Self {
        self.volume = self.volume.min(MAX_VOLUME);
        self
    }

    /// Playback volume in `0.0..=1.0`; zero while muted.
    #[must_use]
    pub fn effective_volume(self) -> f32 {
        if self.muted {
            0.0
        } else {
            f32::from(self.volume) / f32::from(MAX_VOLUME)
        }
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    pub fn step_up(&mut self) {
        self.volume = self.volume.saturating_add(VOLUME_STEP).min(MAX_VOLUME);
    }

    pub fn step_down(&mut self) {
        self.volume = self.volume.saturating_sub(VOLUME_STEP);
    }

    pub fn set_volume(&mut self, volume: u8) {
        self.volume = volume.min(MAX_VOLUME);
    }
}

/// Discrete sound cues the front-end can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Rotate,
    SoftDrop,
    HardDrop,
    LineClear,
    LevelUp,
    UiClick,
}

/// Playback boundary.
///
/// Implementations receive each cue with the effective volume already
/// applied. Every sink is optional: the game runs headless with
/// [`NullSink`] and loses nothing but sound.
pub trait SoundSink: fmt::Debug {
    /// Plays `cue` at `volume` in `0.0..=1.0`.
    fn play(&mut self, cue: SoundCue, volume: f32);
}

/// Sink that discards every cue.
#[derive(Debug, Default)]
pub struct NullSink;

impl SoundSink for NullSink {
    fn play(&mut self, _cue: SoundCue, _volume: f32) {}
}

/// Maps a game event to the cue it should sound as.
#[must_use]
pub fn cue_for_event(event: GameEvent) -> SoundCue {
    match event {
        GameEvent::PieceRotated => SoundCue::Rotate,
        GameEvent::SoftDropped => SoundCue::SoftDrop,
        GameEvent::HardDropped => SoundCue::HardDrop,
        GameEvent::LinesCleared { .. } => SoundCue::LineClear,
        GameEvent::LevelUp => SoundCue::LevelUp,
    }
}
