//! Per-frame simulation step
//!
//! Fixed update order every frame: advance the ball, resolve collisions,
//! advance power-ups, tick the shake timer, then check the loss and win
//! conditions. Input is processed separately so the windowing layer decides
//! when to sample its key table.

use glam::Vec2;

use super::collision::{Direction, aabb_overlap, ball_rect_collision};
use super::powerup::{PowerUpKind, activate_power_up, spawn_power_ups, update_power_ups};
use super::state::{GamePhase, GameState};
use crate::audio::AudioCue;
use crate::consts::*;
use crate::input::{InputState, Key};

/// Apply one frame of player input.
pub fn process_input(state: &mut GameState, input: &mut InputState, dt: f32) {
    match state.phase {
        GamePhase::Menu => {
            if input.consume(Key::Confirm) {
                state.phase = GamePhase::Active;
            }
            if input.consume(Key::NextLevel) {
                state.level_index = (state.level_index + 1) % state.levels.len().max(1);
                state.emit(AudioCue::LevelSelect);
            }
            if input.consume(Key::PrevLevel) {
                let count = state.levels.len().max(1);
                state.level_index = (state.level_index + count - 1) % count;
                state.emit(AudioCue::LevelSelect);
            }
        }
        GamePhase::Active => {
            let velocity = PADDLE_SPEED * dt;
            if input.is_held(Key::Left) && state.paddle.pos.x >= 0.0 {
                state.paddle.pos.x -= velocity;
                if state.ball.stuck {
                    state.ball.pos.x -= velocity;
                }
            }
            if input.is_held(Key::Right) && state.paddle.pos.x + state.paddle.size.x <= state.width
            {
                state.paddle.pos.x += velocity;
                if state.ball.stuck {
                    state.ball.pos.x += velocity;
                }
            }
            if input.is_held(Key::Launch) {
                state.ball.stuck = false;
            }
        }
        GamePhase::Win => {
            if input.consume(Key::Confirm) {
                state.effects.chaos = false;
                state.phase = GamePhase::Menu;
            }
        }
    }
}

/// Advance the simulation by `dt` seconds of caller-measured frame time.
pub fn update(state: &mut GameState, dt: f32) {
    state.ball.advance(dt, state.width);
    do_collisions(state);
    update_power_ups(state, dt);

    // Shake is retriggered, not stacked; the timer tracks the latest hit
    if state.effects.shake_time > 0.0 {
        state.effects.shake_time -= dt;
        if state.effects.shake_time <= 0.0 {
            state.effects.shake = false;
        }
    }

    // Loss and win only apply to a session in play
    if state.phase != GamePhase::Active {
        return;
    }

    // Ball past the bottom edge costs a life
    if state.ball.pos.y >= state.height {
        state.lives = state.lives.saturating_sub(1);
        if state.lives == 0 {
            state.reset_level();
            state.phase = GamePhase::Menu;
            state.emit(AudioCue::AllSoundsStop);
        }
        state.reset_player();
    }

    if state.phase == GamePhase::Active && state.level().is_some_and(|l| l.is_completed()) {
        // The board resets before the player acknowledges the win screen
        state.reset_level();
        state.reset_player();
        state.effects.chaos = true;
        state.phase = GamePhase::Win;
    }
}

/// Detect and resolve this frame's ball and power-up contacts.
fn do_collisions(state: &mut GameState) {
    let mut destroyed_bricks: Vec<Vec2> = Vec::new();
    let mut solid_hits = 0u32;

    {
        let ball = &mut state.ball;
        if let Some(level) = state.levels.get_mut(state.level_index) {
            for brick in level.bricks.iter_mut() {
                if brick.destroyed {
                    continue;
                }
                let Some(contact) =
                    ball_rect_collision(ball.center(), ball.radius, brick.pos, brick.size)
                else {
                    continue;
                };

                if !brick.solid {
                    brick.destroyed = true;
                    destroyed_bricks.push(brick.pos);
                } else {
                    state.effects.shake_time = SHAKE_DURATION;
                    state.effects.shake = true;
                    solid_hits += 1;
                }

                // Pass-through skips resolution against destructible bricks;
                // the brick is gone but the ball keeps its course
                if ball.pass_through && !brick.solid {
                    continue;
                }
                if contact.dir.is_horizontal() {
                    ball.vel.x = -ball.vel.x;
                    let penetration = ball.radius - contact.diff.x.abs();
                    if contact.dir == Direction::Left {
                        ball.pos.x += penetration;
                    } else {
                        ball.pos.x -= penetration;
                    }
                } else {
                    ball.vel.y = -ball.vel.y;
                    let penetration = ball.radius - contact.diff.y.abs();
                    if contact.dir == Direction::Up {
                        ball.pos.y += penetration;
                    } else {
                        ball.pos.y -= penetration;
                    }
                }
            }
        }
    }

    for _ in 0..solid_hits {
        state.emit(AudioCue::BrickHitSolid);
    }
    for pos in destroyed_bricks {
        state.emit(AudioCue::BrickHitSoft);
        spawn_power_ups(state, pos);
    }

    // Ball vs paddle, only while in free flight
    if !state.ball.stuck {
        let contact = ball_rect_collision(
            state.ball.center(),
            state.ball.radius,
            state.paddle.pos,
            state.paddle.size,
        );
        if contact.is_some() {
            // Steer by where the paddle was struck, conserving total speed
            let distance = state.ball.center().x - state.paddle.center_x();
            let percentage = distance / (state.paddle.size.x / 2.0);
            let old_speed = state.ball.vel.length();
            state.ball.vel.x = INITIAL_BALL_VELOCITY.x * percentage * BOUNCE_STRENGTH;
            state.ball.vel = state.ball.vel.normalize_or_zero() * old_speed;
            // Always send the ball back up so it cannot burrow into the paddle
            state.ball.vel.y = -state.ball.vel.y.abs();
            state.ball.stuck = state.ball.sticky;
            state.emit(AudioCue::PaddleBounce);
        }
    }

    // Power-ups: cull at the bottom edge, activate on paddle catch
    let paddle_pos = state.paddle.pos;
    let paddle_size = state.paddle.size;
    let height = state.height;
    let mut caught: Vec<PowerUpKind> = Vec::new();
    for power_up in &mut state.power_ups {
        if power_up.destroyed {
            continue;
        }
        if power_up.pos.y >= height {
            power_up.destroyed = true;
        }
        if aabb_overlap(paddle_pos, paddle_size, power_up.pos, power_up.size) {
            caught.push(power_up.kind);
            power_up.destroyed = true;
            power_up.activated = true;
        }
    }
    for kind in caught {
        activate_power_up(state, kind);
        state.emit(AudioCue::PowerUpCollected);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::powerup::PowerUp;

    const DT: f32 = 1.0 / 60.0;

    /// Session with one destructible brick in the far top-left cell
    fn session() -> GameState {
        let mut state = GameState::new(800.0, 600.0, 7);
        state.add_level(vec![vec![2, 0, 0, 0]]);
        state
    }

    fn launch(state: &mut GameState) {
        let mut input = InputState::new();
        input.press(Key::Confirm);
        process_input(state, &mut input, DT);
        input.release(Key::Confirm);
        input.press(Key::Launch);
        process_input(state, &mut input, DT);
    }

    #[test]
    fn test_launch_then_free_flight() {
        let mut state = session();
        assert_eq!(state.phase, GamePhase::Menu);

        launch(&mut state);
        assert_eq!(state.phase, GamePhase::Active);
        assert!(!state.ball.stuck);

        // With no further input the ball travels by velocity * dt
        let before = state.ball.pos;
        let vel = state.ball.vel;
        update(&mut state, DT);
        assert_eq!(state.ball.pos, before + vel * DT);
    }

    #[test]
    fn test_menu_level_cycle_is_edge_triggered() {
        let mut state = session();
        state.add_level(vec![vec![2]]);
        let mut input = InputState::new();

        input.press(Key::NextLevel);
        process_input(&mut state, &mut input, DT);
        assert_eq!(state.level_index, 1);

        // Still held: no further cycling until released and pressed again
        process_input(&mut state, &mut input, DT);
        assert_eq!(state.level_index, 1);

        input.release(Key::NextLevel);
        input.press(Key::NextLevel);
        process_input(&mut state, &mut input, DT);
        assert_eq!(state.level_index, 0);

        input.release(Key::NextLevel);
        input.press(Key::PrevLevel);
        process_input(&mut state, &mut input, DT);
        assert_eq!(state.level_index, 1);
        assert!(
            state
                .drain_cues()
                .iter()
                .all(|&c| c == AudioCue::LevelSelect)
        );
    }

    #[test]
    fn test_paddle_movement_carries_stuck_ball() {
        let mut state = session();
        state.phase = GamePhase::Active;
        let mut input = InputState::new();
        input.press(Key::Right);

        let paddle_before = state.paddle.pos.x;
        let ball_before = state.ball.pos.x;
        process_input(&mut state, &mut input, DT);
        let moved = PADDLE_SPEED * DT;
        assert_eq!(state.paddle.pos.x, paddle_before + moved);
        assert_eq!(state.ball.pos.x, ball_before + moved);
    }

    #[test]
    fn test_solid_brick_bounce_and_shake() {
        let mut state = GameState::new(800.0, 600.0, 7);
        // One solid brick and one destructible, each 200x300, so the level
        // is not trivially complete
        state.add_level(vec![vec![1, 0, 0, 2]]);
        state.phase = GamePhase::Active;

        // Ball just below the solid brick's bottom edge (y = 300), moving up
        state.ball.stuck = false;
        state.ball.pos = Vec2::new(87.5, 299.0);
        state.ball.vel = Vec2::new(0.0, -100.0);

        update(&mut state, DT);
        assert!(state.ball.vel.y > 0.0);
        assert!(state.effects.shake);
        // The timer was armed this frame and already ticked down once
        assert!(state.effects.shake_time > 0.0);
        assert!(state.effects.shake_time < SHAKE_DURATION);
        assert!(!state.level().unwrap().bricks[0].destroyed);
        assert!(state.drain_cues().contains(&AudioCue::BrickHitSolid));

        // No hits afterwards: the timer runs out and the flag clears
        state.ball.vel = Vec2::ZERO;
        update(&mut state, SHAKE_DURATION + 0.01);
        assert!(!state.effects.shake);
    }

    #[test]
    fn test_shake_is_retriggered_not_stacked() {
        let mut state = GameState::new(800.0, 600.0, 7);
        state.add_level(vec![vec![1, 0, 0, 2]]);
        state.phase = GamePhase::Active;
        state.effects.shake = true;
        state.effects.shake_time = 0.002;

        state.ball.stuck = false;
        state.ball.pos = Vec2::new(87.5, 299.0);
        state.ball.vel = Vec2::new(0.0, -100.0);

        update(&mut state, 0.001);
        // A fresh hit rewinds the timer to the full duration, nothing sums
        assert!(state.effects.shake_time <= SHAKE_DURATION);
        assert!(state.effects.shake_time > SHAKE_DURATION - 0.002);
        assert!(state.effects.shake);
    }

    #[test]
    fn test_pass_through_destroys_without_bounce() {
        let mut state = GameState::new(800.0, 600.0, 7);
        state.add_level(vec![vec![2, 2]]);
        state.phase = GamePhase::Active;

        state.ball.stuck = false;
        state.ball.pass_through = true;
        state.ball.pos = Vec2::new(187.5, 299.0);
        state.ball.vel = Vec2::new(0.0, -100.0);

        update(&mut state, DT);
        assert!(state.level().unwrap().bricks[0].destroyed);
        // No resolution: the ball keeps flying into the destroyed brick
        assert!(state.ball.vel.y < 0.0);
        assert!(state.drain_cues().contains(&AudioCue::BrickHitSoft));
    }

    #[test]
    fn test_paddle_bounce_steers_and_conserves_speed() {
        let mut state = session();
        state.phase = GamePhase::Active;
        state.ball.stuck = false;

        // Falling onto the left half of the paddle
        state.ball.pos = Vec2::new(
            state.paddle.pos.x + 10.0,
            state.paddle.pos.y - state.ball.radius * 2.0 + 1.0,
        );
        state.ball.vel = Vec2::new(50.0, 200.0);
        let speed_before = state.ball.vel.length();

        update(&mut state, DT);
        assert!(state.ball.vel.y < 0.0);
        assert!((state.ball.vel.length() - speed_before).abs() < 1e-3);
        // Left-of-center contact sends the ball leftward
        assert!(state.ball.vel.x < 0.0);
        assert!(state.drain_cues().contains(&AudioCue::PaddleBounce));
    }

    #[test]
    fn test_sticky_paddle_recaptures_ball() {
        let mut state = session();
        state.phase = GamePhase::Active;
        state.ball.stuck = false;
        state.ball.sticky = true;
        state.ball.pos = Vec2::new(
            state.paddle.center_x() - state.ball.radius,
            state.paddle.pos.y - state.ball.radius * 2.0 + 1.0,
        );
        state.ball.vel = Vec2::new(0.0, 200.0);

        update(&mut state, DT);
        assert!(state.ball.stuck);
    }

    #[test]
    fn test_life_lost_resets_player_but_not_level() {
        let mut state = session();
        state.phase = GamePhase::Active;
        state.ball.stuck = false;
        state.ball.pos.y = 610.0;
        state.ball.sticky = true;
        state.effects.confuse = true;

        update(&mut state, DT);
        assert_eq!(state.phase, GamePhase::Active);
        assert_eq!(state.lives, STARTING_LIVES - 1);
        // Hard reset: effects are force-cleared regardless of timers
        assert!(state.ball.stuck);
        assert!(!state.ball.sticky);
        assert!(!state.effects.confuse);
    }

    #[test]
    fn test_last_life_reloads_level_and_returns_to_menu() {
        let mut state = session();
        state.phase = GamePhase::Active;
        state.lives = 1;
        state.level_mut().unwrap().bricks[0].destroyed = true;

        // One destructible brick destroyed would normally complete the
        // level, but the loss path runs first and leaves Active
        state.ball.stuck = false;
        state.ball.pos.y = 610.0;

        update(&mut state, DT);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.lives, STARTING_LIVES);
        assert!(!state.level().unwrap().bricks[0].destroyed);
        assert!(state.ball.stuck);
        assert!(state.drain_cues().contains(&AudioCue::AllSoundsStop));
    }

    #[test]
    fn test_win_resets_board_before_acknowledgement() {
        let mut state = session();
        state.phase = GamePhase::Active;
        state.level_mut().unwrap().bricks[0].destroyed = true;

        update(&mut state, DT);
        assert_eq!(state.phase, GamePhase::Win);
        assert!(state.effects.chaos);
        // The player sees the win screen over a freshly rebuilt board
        assert!(!state.level().unwrap().bricks[0].destroyed);
        assert!(state.ball.stuck);

        // Acknowledge: chaos clears and the session returns to the menu
        let mut input = InputState::new();
        input.press(Key::Confirm);
        process_input(&mut state, &mut input, DT);
        assert_eq!(state.phase, GamePhase::Menu);
        assert!(!state.effects.chaos);
    }

    #[test]
    fn test_power_up_catch_activates() {
        let mut state = session();
        state.phase = GamePhase::Active;
        let mut power_up = PowerUp::new(PowerUpKind::Sticky, state.paddle.pos);
        power_up.vel = Vec2::ZERO;
        state.power_ups.push(power_up);

        update(&mut state, DT);
        assert!(state.ball.sticky);
        assert_eq!(state.power_ups.len(), 1);
        assert!(state.power_ups[0].activated);
        assert!(state.power_ups[0].destroyed);
        assert!(state.drain_cues().contains(&AudioCue::PowerUpCollected));
    }

    #[test]
    fn test_power_up_falls_past_bottom() {
        let mut state = session();
        state.phase = GamePhase::Active;
        state
            .power_ups
            .push(PowerUp::new(PowerUpKind::Speed, Vec2::new(0.0, 600.0)));
        let vel_before = state.ball.vel;

        update(&mut state, DT);
        // Marked destroyed without activating, then swept the same frame
        assert!(state.power_ups.is_empty());
        assert_eq!(state.ball.vel, vel_before);
    }
}
