//! Collision detection between the ball and axis-aligned bodies
//!
//! Detection only: these functions classify an intersection and hand back the
//! data the state machine needs to resolve it (reflection axis, penetration
//! vector). They never mutate game state.

use glam::Vec2;

/// Compass axis a collision resolves along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Unit vector for this direction (screen coordinates, +y points down)
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Right => Vec2::new(1.0, 0.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// A ball-rectangle contact
///
/// `diff` is the raw vector from the ball center to the closest point on the
/// rectangle; the caller derives penetration depth from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub dir: Direction,
    pub diff: Vec2,
}

/// Axis-aligned overlap test between two rectangles.
///
/// Bounds are inclusive: rectangles touching exactly at an edge collide.
pub fn aabb_overlap(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    let overlap_x = a_pos.x + a_size.x >= b_pos.x && b_pos.x + b_size.x >= a_pos.x;
    let overlap_y = a_pos.y + a_size.y >= b_pos.y && b_pos.y + b_size.y >= a_pos.y;
    overlap_x && overlap_y
}

/// Circle-vs-rectangle test via the clamped closest point.
///
/// Returns `None` when the closest point on the rectangle is at least
/// `radius` away from the ball center. The bound is strict (`<`, not `<=`) so
/// a contact that resolution just pushed out to exactly touching does not
/// re-trigger on the next frame.
pub fn ball_rect_collision(
    center: Vec2,
    radius: f32,
    rect_pos: Vec2,
    rect_size: Vec2,
) -> Option<Contact> {
    let half_extents = rect_size / 2.0;
    let rect_center = rect_pos + half_extents;
    // Clamp the center-to-center vector to the box to find the closest point
    let difference = center - rect_center;
    let clamped = difference.clamp(-half_extents, half_extents);
    let closest = rect_center + clamped;
    let diff = closest - center;

    if diff.length() < radius {
        Some(Contact {
            dir: vector_direction(diff),
            diff,
        })
    } else {
        None
    }
}

/// Classify which compass direction a vector points.
///
/// Maximum dot product against up/right/down/left, tested in that order with
/// a strict comparison, so an exact diagonal resolves to the earlier entry.
pub fn vector_direction(target: Vec2) -> Direction {
    const COMPASS: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];
    let normalized = target.normalize_or_zero();
    let mut best = Direction::Up;
    let mut max = 0.0;
    for dir in COMPASS {
        let dot = normalized.dot(dir.unit());
        if dot > max {
            max = dot;
            best = dir;
        }
    }
    best
}
