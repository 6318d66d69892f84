//! Brickfall entry point
//!
//! Headless demo: loads the classic level set, launches the ball, and lets a
//! scripted paddle chase it, logging what happens. A windowing/rendering
//! collaborator plugs in the same way: feed `InputState`, call
//! `process_input` and `update` once per frame, drain the cues.

use std::path::Path;

use brickfall::audio::LogSink;
use brickfall::consts::{PLAY_HEIGHT, PLAY_WIDTH};
use brickfall::sim::{GamePhase, GameState, parse_grid, process_input, update};
use brickfall::{AudioSink, InputState, Key, Settings};

const LEVEL_STANDARD: &str = "\
5 5 5 5 5 5 5 5 5 5 5 5
5 5 5 5 5 5 5 5 5 5 5 5
4 4 4 4 4 4 4 4 4 4 4 4
4 4 4 4 4 4 4 4 4 4 4 4
3 3 3 3 3 3 3 3 3 3 3 3
2 2 2 2 2 2 2 2 2 2 2 2";

const LEVEL_SMALL_GAPS: &str = "\
0 5 5 5 5 5 5 5 5 5 5 0
5 5 0 4 4 4 4 4 4 0 5 5
4 0 4 4 1 3 3 1 4 4 0 4
3 3 3 0 3 3 3 3 0 3 3 3
0 2 2 2 2 0 0 2 2 2 2 0";

const LEVEL_SPACE_INVADER: &str = "\
0 0 3 0 0 0 0 0 0 3 0 0
0 0 0 3 0 0 0 0 3 0 0 0
0 0 3 3 3 3 3 3 3 3 0 0
0 3 3 2 3 3 3 3 2 3 3 0
3 3 3 3 3 3 3 3 3 3 3 3
3 0 3 3 3 3 3 3 3 3 0 3
3 0 3 0 0 0 0 0 0 3 0 3
0 0 0 3 3 0 0 3 3 0 0 0";

const LEVEL_BOUNCE_GALORE: &str = "\
1 0 1 0 1 0 1 0 1 0 1 0
0 2 0 3 0 4 0 5 0 4 0 3
1 0 1 0 1 0 1 0 1 0 1 0
0 5 0 4 0 3 0 2 0 3 0 4
1 0 1 0 1 0 1 0 1 0 1 0";

const FRAME_DT: f32 = 1.0 / 60.0;
const MAX_FRAMES: u32 = 60 * 180;

fn main() {
    env_logger::init();

    let settings = Settings::load(Path::new("brickfall_settings.json"));

    let mut state = GameState::new(PLAY_WIDTH, PLAY_HEIGHT, 0x5EED);
    for text in [
        LEVEL_STANDARD,
        LEVEL_SMALL_GAPS,
        LEVEL_SPACE_INVADER,
        LEVEL_BOUNCE_GALORE,
    ] {
        state.add_level(parse_grid(text));
    }

    let mut input = InputState::new();
    let mut audio = LogSink;

    // Start the first level and release the ball
    input.press(Key::Confirm);
    process_input(&mut state, &mut input, FRAME_DT);
    input.release(Key::Confirm);
    input.press(Key::Launch);

    let mut shaking = false;
    for frame in 0..MAX_FRAMES {
        // Scripted paddle: chase the ball
        input.release(Key::Left);
        input.release(Key::Right);
        let ball_x = state.ball.center().x;
        let paddle_x = state.paddle.center_x();
        if ball_x < paddle_x - 5.0 {
            input.press(Key::Left);
        } else if ball_x > paddle_x + 5.0 {
            input.press(Key::Right);
        }

        process_input(&mut state, &mut input, FRAME_DT);
        update(&mut state, FRAME_DT);
        for cue in state.drain_cues() {
            audio.play(cue);
        }

        if settings.effective_screen_shake() && state.effects.shake != shaking {
            shaking = state.effects.shake;
            if shaking {
                log::debug!("screen shake");
            }
        }

        match state.phase {
            GamePhase::Win => {
                log::info!(
                    "level {} cleared after {frame} frames",
                    state.level_index + 1
                );
                return;
            }
            GamePhase::Menu => {
                log::info!("out of lives after {frame} frames");
                return;
            }
            GamePhase::Active => {}
        }
    }

    let bricks_left = state.level().map_or(0, |l| {
        l.bricks.iter().filter(|b| !b.solid && !b.destroyed).count()
    });
    log::info!(
        "demo ended with {} lives and {bricks_left} bricks left",
        state.lives
    );
}
