//! Game entities and session state
//!
//! Everything the renderer reads each frame lives here: positions, sizes,
//! tints, destroyed flags, and the visual-effect timers. The session object
//! is constructed explicitly and passed into every subsystem call; there are
//! no ambient globals.

use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::level::Level;
use super::powerup::PowerUp;
use crate::audio::AudioCue;
use crate::consts::*;

/// Current mode of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Level-select screen, ball parked on the paddle
    Menu,
    /// Active gameplay
    Active,
    /// Board cleared, waiting for acknowledgement
    Win,
}

/// A static rectangular obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub color: Vec3,
    /// Solid bricks are never destroyed and never drop power-ups
    pub solid: bool,
    pub destroyed: bool,
}

impl Brick {
    pub fn new(pos: Vec2, size: Vec2, color: Vec3, solid: bool) -> Self {
        Self {
            pos,
            size,
            color,
            solid,
            destroyed: false,
        }
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// Top-left corner of the bounding square
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Vec3,
    /// Riding on the paddle, not yet launched
    pub stuck: bool,
    /// Re-sticks to the paddle on its next bounce
    pub sticky: bool,
    /// Destroys destructible bricks without bouncing off them
    pub pass_through: bool,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel,
            radius,
            color: WHITE,
            stuck: true,
            sticky: false,
            pass_through: false,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.radius)
    }

    /// Advance one frame, reflecting off the side and top play-area edges.
    ///
    /// The bottom edge is the loss boundary and is left to the state machine.
    pub fn advance(&mut self, dt: f32, width: f32) {
        if self.stuck {
            return;
        }
        self.pos += self.vel * dt;
        if self.pos.x <= 0.0 {
            self.vel.x = -self.vel.x;
            self.pos.x = 0.0;
        } else if self.pos.x + self.radius * 2.0 >= width {
            self.vel.x = -self.vel.x;
            self.pos.x = width - self.radius * 2.0;
        }
        if self.pos.y <= 0.0 {
            self.vel.y = -self.vel.y;
            self.pos.y = 0.0;
        }
    }

    /// Park the ball at `pos` for the next serve, dropping every power-up
    /// state it carried.
    pub fn reset(&mut self, pos: Vec2, vel: Vec2) {
        self.pos = pos;
        self.vel = vel;
        self.stuck = true;
        self.sticky = false;
        self.pass_through = false;
        self.color = WHITE;
    }
}

/// The player's paddle, horizontal movement only
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub color: Vec3,
}

impl Paddle {
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }
}

/// Visual-effect flags consumed by the rendering collaborator
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Effects {
    /// Screen shake, retriggered (not stacked) by solid-brick hits
    pub shake: bool,
    /// Seconds of shake remaining
    pub shake_time: f32,
    pub confuse: bool,
    pub chaos: bool,
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Play area dimensions (pixels)
    pub width: f32,
    pub height: f32,
    pub phase: GamePhase,
    pub lives: u32,
    /// Index into `levels` of the level in play
    pub level_index: usize,
    pub levels: Vec<Level>,
    pub paddle: Paddle,
    pub ball: Ball,
    /// In-flight and still-timing power-ups
    pub power_ups: Vec<PowerUp>,
    pub effects: Effects,
    /// Session seed for reproducible power-up drops
    pub seed: u64,
    #[serde(skip, default = "default_rng")]
    pub(crate) rng: Pcg32,
    /// Sound cues emitted this frame, drained by the audio collaborator
    #[serde(skip)]
    cues: Vec<AudioCue>,
}

fn default_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

impl GameState {
    /// Create a new session with the given play-area size and seed.
    pub fn new(width: f32, height: f32, seed: u64) -> Self {
        let paddle_pos = Vec2::new(width / 2.0 - PADDLE_SIZE.x / 2.0, height - PADDLE_SIZE.y);
        let ball_pos = paddle_pos + Vec2::new(PADDLE_SIZE.x / 2.0 - BALL_RADIUS, -BALL_RADIUS * 2.0);
        Self {
            width,
            height,
            phase: GamePhase::Menu,
            lives: STARTING_LIVES,
            level_index: 0,
            levels: Vec::new(),
            paddle: Paddle {
                pos: paddle_pos,
                size: PADDLE_SIZE,
                color: WHITE,
            },
            ball: Ball::new(ball_pos, INITIAL_BALL_VELOCITY, BALL_RADIUS),
            power_ups: Vec::new(),
            effects: Effects::default(),
            seed,
            rng: Pcg32::seed_from_u64(seed),
            cues: Vec::new(),
        }
    }

    /// Add a level built from a tile-code grid. Levels tile the top half of
    /// the play area.
    pub fn add_level(&mut self, grid: Vec<Vec<u32>>) {
        self.levels
            .push(Level::from_grid(grid, self.width, self.height / 2.0));
    }

    /// The level currently in play
    pub fn level(&self) -> Option<&Level> {
        self.levels.get(self.level_index)
    }

    pub fn level_mut(&mut self) -> Option<&mut Level> {
        self.levels.get_mut(self.level_index)
    }

    /// Reload the active level from its source grid and restock lives.
    pub fn reset_level(&mut self) {
        let (width, height) = (self.width, self.height / 2.0);
        if let Some(level) = self.levels.get_mut(self.level_index) {
            level.rebuild(width, height);
        }
        self.lives = STARTING_LIVES;
    }

    /// Put paddle and ball back at the serve position and force-clear every
    /// power-up effect, independent of any still-running timers.
    pub fn reset_player(&mut self) {
        self.paddle.size = PADDLE_SIZE;
        self.paddle.pos = Vec2::new(
            self.width / 2.0 - PADDLE_SIZE.x / 2.0,
            self.height - PADDLE_SIZE.y,
        );
        let ball_pos =
            self.paddle.pos + Vec2::new(PADDLE_SIZE.x / 2.0 - BALL_RADIUS, -BALL_RADIUS * 2.0);
        self.ball.reset(ball_pos, INITIAL_BALL_VELOCITY);
        self.effects.chaos = false;
        self.effects.confuse = false;
        self.paddle.color = WHITE;
    }

    /// Queue a sound cue for the audio collaborator.
    pub(crate) fn emit(&mut self, cue: AudioCue) {
        self.cues.push(cue);
    }

    /// Drain the sound cues emitted since the last call.
    pub fn drain_cues(&mut self) -> Vec<AudioCue> {
        std::mem::take(&mut self.cues)
    }
}
