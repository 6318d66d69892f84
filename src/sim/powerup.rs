//! Power-up lifecycle: spawn, fall, activation, timed revert
//!
//! Power-ups drop probabilistically from destroyed bricks and fall toward
//! the paddle. Once caught, an effect lasts for a kind-specific duration;
//! reverting is deferred while another activated power-up of the same kind
//! is still running, and consumed entries stay in the collection until their
//! timer runs out.

use glam::{Vec2, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::GameState;
use crate::consts::*;

/// The closed set of power-up kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Ball speed boost, instantaneous
    Speed,
    /// Ball re-sticks to the paddle after the next bounce
    Sticky,
    /// Ball destroys destructible bricks without bouncing
    PassThrough,
    /// Wider paddle, instantaneous
    PadSizeIncrease,
    /// Visual confusion effect
    Confuse,
    /// Visual chaos effect
    Chaos,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 6] = [
        PowerUpKind::Speed,
        PowerUpKind::Sticky,
        PowerUpKind::PassThrough,
        PowerUpKind::PadSizeIncrease,
        PowerUpKind::Confuse,
        PowerUpKind::Chaos,
    ];

    /// One drop per `chance` destroyed bricks on average. The negative kinds
    /// drop five times as often.
    fn chance(self) -> u32 {
        match self {
            PowerUpKind::Speed
            | PowerUpKind::Sticky
            | PowerUpKind::PassThrough
            | PowerUpKind::PadSizeIncrease => 75,
            PowerUpKind::Confuse | PowerUpKind::Chaos => 15,
        }
    }

    /// Seconds the effect lasts once activated. Zero means the effect is
    /// instantaneous and never reverts.
    pub fn duration(self) -> f32 {
        match self {
            PowerUpKind::Speed | PowerUpKind::PadSizeIncrease => 0.0,
            PowerUpKind::Sticky => 20.0,
            PowerUpKind::PassThrough => 15.0,
            PowerUpKind::Confuse | PowerUpKind::Chaos => 10.0,
        }
    }

    /// Tint of the falling pickup
    fn tint(self) -> Vec3 {
        match self {
            PowerUpKind::Speed => Vec3::new(0.5, 0.5, 1.0),
            PowerUpKind::Sticky => Vec3::new(1.0, 0.5, 1.0),
            PowerUpKind::PassThrough => Vec3::new(0.5, 1.0, 0.5),
            PowerUpKind::PadSizeIncrease => Vec3::new(1.0, 0.6, 0.4),
            PowerUpKind::Confuse => Vec3::new(1.0, 0.3, 0.3),
            PowerUpKind::Chaos => Vec3::new(0.9, 0.25, 0.25),
        }
    }
}

/// A falling pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub color: Vec3,
    /// Seconds remaining once activated
    pub duration: f32,
    /// Currently affecting gameplay
    pub activated: bool,
    /// Off-screen or consumed; removed once no longer activated
    pub destroyed: bool,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, pos: Vec2) -> Self {
        Self {
            kind,
            pos,
            size: POWERUP_SIZE,
            vel: POWERUP_FALL_VELOCITY,
            color: kind.tint(),
            duration: kind.duration(),
            activated: false,
            destroyed: false,
        }
    }
}

/// Roll an independent drop for every kind at a destroyed brick's position.
pub fn spawn_power_ups(state: &mut GameState, pos: Vec2) {
    for kind in PowerUpKind::ALL {
        if state.rng.random_range(0..kind.chance()) == 0 {
            state.power_ups.push(PowerUp::new(kind, pos));
        }
    }
}

/// Apply a power-up's gameplay effect.
pub fn activate_power_up(state: &mut GameState, kind: PowerUpKind) {
    match kind {
        PowerUpKind::Speed => state.ball.vel *= SPEED_BOOST,
        PowerUpKind::Sticky => {
            state.ball.sticky = true;
            state.paddle.color = Vec3::new(1.0, 0.5, 1.0);
        }
        PowerUpKind::PassThrough => {
            state.ball.pass_through = true;
            state.ball.color = Vec3::new(1.0, 0.5, 0.5);
        }
        PowerUpKind::PadSizeIncrease => state.paddle.size.x += PADDLE_WIDEN_AMOUNT,
        // Confuse and chaos exclude each other at activation time only; an
        // already-active effect is never force-cleared here
        PowerUpKind::Confuse => {
            if !state.effects.chaos {
                state.effects.confuse = true;
            }
        }
        PowerUpKind::Chaos => {
            if !state.effects.confuse {
                state.effects.chaos = true;
            }
        }
    }
}

/// Advance falls and countdowns, then sweep out entries that are both
/// destroyed and no longer timing.
pub fn update_power_ups(state: &mut GameState, dt: f32) {
    for i in 0..state.power_ups.len() {
        let vel = state.power_ups[i].vel;
        state.power_ups[i].pos += vel * dt;

        if !state.power_ups[i].activated {
            continue;
        }
        state.power_ups[i].duration -= dt;
        if state.power_ups[i].duration > 0.0 {
            continue;
        }

        state.power_ups[i].activated = false;
        let kind = state.power_ups[i].kind;
        if other_power_up_active(&state.power_ups, kind) {
            // A concurrent power-up of the same kind keeps the effect alive
            continue;
        }
        match kind {
            PowerUpKind::Sticky => {
                state.ball.sticky = false;
                state.paddle.color = WHITE;
            }
            PowerUpKind::PassThrough => {
                state.ball.pass_through = false;
                state.ball.color = WHITE;
            }
            PowerUpKind::Confuse => state.effects.confuse = false,
            PowerUpKind::Chaos => state.effects.chaos = false,
            // Instantaneous kinds have nothing to revert
            PowerUpKind::Speed | PowerUpKind::PadSizeIncrease => {}
        }
    }

    // Second pass: consumed-but-still-timing entries survive the sweep
    state.power_ups.retain(|p| !(p.destroyed && !p.activated));
}

/// Whether any activated power-up of `kind` remains in the collection.
fn other_power_up_active(power_ups: &[PowerUp], kind: PowerUpKind) -> bool {
    power_ups.iter().any(|p| p.activated && p.kind == kind)
}
