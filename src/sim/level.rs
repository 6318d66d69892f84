//! Level grid loading
//!
//! A level is a rectangular matrix of tile codes tiled uniformly over the
//! target play area. Malformed input is not an error: the caller just
//! observes a level with zero bricks.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::state::Brick;

/// Tint for solid (indestructible) bricks
const SOLID_TINT: Vec3 = Vec3::new(0.8, 0.8, 0.7);

/// A playfield of bricks built from a grid of tile codes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Level {
    pub bricks: Vec<Brick>,
    /// Source grid, kept so a reset can rebuild the brick list wholesale
    grid: Vec<Vec<u32>>,
}

impl Level {
    /// Build a level from a tile-code grid.
    ///
    /// Code 0 is an empty cell, 1 a solid brick, 2..=5 a destructible brick
    /// with a code-specific tint (codes past 5 fall back to white). An empty
    /// or ragged grid yields an empty level.
    pub fn from_grid(grid: Vec<Vec<u32>>, width: f32, height: f32) -> Self {
        let mut level = Self {
            bricks: Vec::new(),
            grid,
        };
        level.rebuild(width, height);
        level
    }

    /// Parse the whitespace-separated text format, then build.
    pub fn from_text(text: &str, width: f32, height: f32) -> Self {
        Self::from_grid(parse_grid(text), width, height)
    }

    /// Replace the brick collection from the stored source grid.
    pub fn rebuild(&mut self, width: f32, height: f32) {
        self.bricks.clear();

        let rows = self.grid.len();
        if rows == 0 {
            return;
        }
        let cols = self.grid[0].len();
        if cols == 0 || self.grid.iter().any(|row| row.len() != cols) {
            return;
        }

        // Uniform tiling: cells stretch to fill the target area
        let unit = Vec2::new(width / cols as f32, height / rows as f32);
        for (y, row) in self.grid.iter().enumerate() {
            for (x, &code) in row.iter().enumerate() {
                let pos = unit * Vec2::new(x as f32, y as f32);
                match code {
                    0 => {}
                    1 => self.bricks.push(Brick::new(pos, unit, SOLID_TINT, true)),
                    code => self
                        .bricks
                        .push(Brick::new(pos, unit, tile_tint(code), false)),
                }
            }
        }
    }

    /// A level is complete once every destructible brick is destroyed.
    pub fn is_completed(&self) -> bool {
        self.bricks.iter().all(|b| b.solid || b.destroyed)
    }
}

fn tile_tint(code: u32) -> Vec3 {
    match code {
        2 => Vec3::new(0.2, 0.6, 1.0),
        3 => Vec3::new(0.0, 0.7, 0.0),
        4 => Vec3::new(0.8, 0.8, 0.4),
        5 => Vec3::new(1.0, 0.5, 0.0),
        _ => crate::consts::WHITE,
    }
}

/// Parse rows of whitespace-separated tile codes, one row per line.
///
/// Blank lines are skipped. Any token that is not a non-negative integer
/// makes the whole grid malformed and the result empty.
pub fn parse_grid(text: &str) -> Vec<Vec<u32>> {
    let mut grid = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let row: Result<Vec<u32>, _> = line.split_whitespace().map(str::parse).collect();
        match row {
            Ok(row) => grid.push(row),
            Err(_) => return Vec::new(),
        }
    }
    grid
}
