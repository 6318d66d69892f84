//! Brickfall - a classic brick-breaker arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (collisions, power-ups, game state)
//! - `input`: Key table shared with the windowing layer
//! - `audio`: Sound cue vocabulary consumed by the playback layer
//! - `settings`: Player preferences

pub mod audio;
pub mod input;
pub mod settings;
pub mod sim;

pub use audio::{AudioCue, AudioSink};
pub use input::{InputState, Key};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use glam::{Vec2, Vec3};

    /// Default play area dimensions (pixels)
    pub const PLAY_WIDTH: f32 = 800.0;
    pub const PLAY_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_SIZE: Vec2 = Vec2::new(100.0, 20.0);
    pub const PADDLE_SPEED: f32 = 500.0;
    /// Width gained per pad-size-increase power-up
    pub const PADDLE_WIDEN_AMOUNT: f32 = 50.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 12.5;
    pub const INITIAL_BALL_VELOCITY: Vec2 = Vec2::new(100.0, -350.0);
    /// Velocity multiplier applied by the speed power-up
    pub const SPEED_BOOST: f32 = 1.2;
    /// Steering strength of an off-center paddle bounce
    pub const BOUNCE_STRENGTH: f32 = 2.0;

    /// Power-up defaults
    pub const POWERUP_SIZE: Vec2 = Vec2::new(60.0, 20.0);
    pub const POWERUP_FALL_VELOCITY: Vec2 = Vec2::new(0.0, 150.0);

    /// Screen shake duration after a solid-brick hit (seconds)
    pub const SHAKE_DURATION: f32 = 0.05;

    /// Lives at session start
    pub const STARTING_LIVES: u32 = 3;

    /// Neutral tint for untinted bodies
    pub const WHITE: Vec3 = Vec3::ONE;
}
