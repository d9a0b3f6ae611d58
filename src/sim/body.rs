//! Shared physics body for players and enemies
//!
//! Collision samples a single representative point against the tile grid,
//! one axis at a time. This is coarse on purpose: a fast diagonal body can
//! clip a wall corner within one tick, and level layouts rely on that feel.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::room::{TileGrid, cell};

/// Downward acceleration with terminal velocity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gravity {
    pub accel: f32,
    pub max_fall: f32,
}

/// Position, velocity and facing of a moving entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Position in tile units (y grows downward)
    pub pos: Vec2,
    pub vel: Vec2,
    /// -1 = left, +1 = right
    pub facing: i8,
    /// Standing on a solid tile
    pub grounded: bool,
}

impl Body {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            facing: 1,
            grounded: false,
        }
    }

    #[inline]
    pub fn facing_sign(&self) -> f32 {
        if self.facing < 0 { -1.0 } else { 1.0 }
    }

    pub fn turn_around(&mut self) {
        self.facing = if self.facing < 0 { 1 } else { -1 };
    }

    /// Point the body toward a horizontal offset (no change when zero)
    pub fn face_toward(&mut self, dx: f32) {
        if dx > 0.0 {
            self.facing = 1;
        } else if dx < 0.0 {
            self.facing = -1;
        }
    }

    #[inline]
    pub fn distance_to(&self, other: Vec2) -> f32 {
        self.pos.distance(other)
    }

    pub fn apply_gravity(&mut self, dt: f32, gravity: Gravity) {
        self.vel.y = (self.vel.y + gravity.accel * dt).min(gravity.max_fall);
    }

    /// Horizontal step. Returns false when the move was rejected by a solid tile.
    pub fn step_horizontal(&mut self, dt: f32, grid: &TileGrid) -> bool {
        let new_x = self.pos.x + self.vel.x * dt;
        if grid.is_solid(cell(new_x), cell(self.pos.y)) {
            self.vel.x = 0.0;
            false
        } else {
            self.pos.x = new_x;
            true
        }
    }

    /// Vertical step with floor snapping and ceiling bumps
    pub fn step_vertical(&mut self, dt: f32, grid: &TileGrid) {
        let new_y = self.pos.y + self.vel.y * dt;
        let col = cell(self.pos.x);
        self.grounded = grid.is_solid(col, cell(self.pos.y + 1.0));

        if self.vel.y > 0.0 {
            if grid.is_solid(col, cell(new_y)) {
                self.pos.y = self.pos.y.floor();
                self.vel.y = 0.0;
                self.grounded = true;
            } else {
                self.pos.y = new_y;
            }
        } else if self.vel.y < 0.0 {
            if grid.is_solid(col, cell(new_y)) {
                self.vel.y = 0.0;
                self.pos.y = (cell(new_y) + 1) as f32;
            } else {
                self.pos.y = new_y;
            }
        }
    }

    pub fn clamp_to(&mut self, grid: &TileGrid) {
        self.pos = grid.clamp(self.pos);
    }

    /// One full integration step: gravity, horizontal, vertical, clamp
    pub fn integrate(&mut self, dt: f32, grid: &TileGrid, gravity: Option<Gravity>) {
        if let Some(gravity) = gravity {
            self.apply_gravity(dt, gravity);
        }
        self.step_horizontal(dt, grid);
        self.step_vertical(dt, grid);
        self.clamp_to(grid);
    }

    /// Solid tile directly left (-1) or right (+1) of the body, if any
    pub fn adjacent_wall(&self, grid: &TileGrid) -> Option<i8> {
        let (x, y) = (cell(self.pos.x), cell(self.pos.y));
        if grid.is_solid(x - 1, y) {
            Some(-1)
        } else if grid.is_solid(x + 1, y) {
            Some(1)
        } else {
            None
        }
    }
}
