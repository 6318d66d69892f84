//! Frame-stepped game simulation
//!
//! All gameplay logic lives here, with no rendering or platform
//! dependencies:
//! - Driven by a caller-supplied delta time, one step per frame
//! - Seeded RNG only
//! - Single-threaded; every mutation goes through the session object

pub mod collision;
pub mod level;
pub mod powerup;
pub mod state;
pub mod tick;

pub use collision::{Contact, Direction, aabb_overlap, ball_rect_collision, vector_direction};
pub use level::{Level, parse_grid};
pub use powerup::{PowerUp, PowerUpKind, activate_power_up, spawn_power_ups, update_power_ups};
pub use state::{Ball, Brick, Effects, GamePhase, GameState, Paddle};
pub use tick::{process_input, update};
