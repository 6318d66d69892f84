//! Sound cue vocabulary
//!
//! The simulation emits discrete cues; an audio collaborator decides what
//! they sound like and when to actually play them. `LogSink` is the headless
//! stand-in used by the demo binary.

/// Discrete sound events emitted by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    /// Menu level navigation
    LevelSelect,
    /// Destructible brick hit (and destroyed)
    BrickHitSoft,
    /// Solid brick hit
    BrickHitSolid,
    /// Ball bounced off the paddle
    PaddleBounce,
    /// Paddle caught a power-up
    PowerUpCollected,
    /// Session ended; stop everything still playing
    AllSoundsStop,
}

/// Playback seam implemented by the audio collaborator
pub trait AudioSink {
    fn play(&mut self, cue: AudioCue);
}

/// Headless sink that logs cues instead of playing them
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, cue: AudioCue) {
        log::debug!("audio cue: {cue:?}");
    }
}
