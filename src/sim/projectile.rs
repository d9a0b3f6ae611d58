//! Projectiles
//!
//! Three flavors share one contract: advance against the room grid and
//! deactivate on contact with a solid tile or on leaving the room. A
//! deactivated projectile never moves or collides again.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::room::TileGrid;
use crate::tuning::ProjectileTuning;

/// Who fired the projectile and how it flies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Player shot, straight line
    Player,
    /// Flyer drop, falls under gravity
    Dropped,
    /// Turret shot, straight horizontal line
    Turret,
}

impl ProjectileKind {
    #[inline]
    pub fn has_gravity(self) -> bool {
        matches!(self, ProjectileKind::Dropped)
    }

    /// Whether this projectile damages the player
    #[inline]
    pub fn is_hostile(self) -> bool {
        !matches!(self, ProjectileKind::Player)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub pos: Vec2,
    pub vel: Vec2,
    active: bool,
}

impl Projectile {
    pub fn new(kind: ProjectileKind, pos: Vec2, vel: Vec2) -> Self {
        Self {
            kind,
            pos,
            vel,
            active: true,
        }
    }

    pub fn player_shot(pos: Vec2, dir: Vec2, speed: f32) -> Self {
        Self::new(ProjectileKind::Player, pos, dir.normalize_or_zero() * speed)
    }

    pub fn dropped(pos: Vec2, speed: f32) -> Self {
        Self::new(ProjectileKind::Dropped, pos, Vec2::new(0.0, speed))
    }

    pub fn turret_shot(pos: Vec2, dir_x: f32, speed: f32) -> Self {
        Self::new(ProjectileKind::Turret, pos, Vec2::new(dir_x.signum() * speed, 0.0))
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Integrate one tick; deactivates on solid or out-of-bounds contact
    pub fn advance(&mut self, dt: f32, grid: &TileGrid, tuning: &ProjectileTuning) {
        if !self.active {
            return;
        }
        if self.kind.has_gravity() {
            self.vel.y = (self.vel.y + tuning.gravity * dt).min(tuning.max_fall_speed);
        }
        self.pos += self.vel * dt;
        if !grid.contains(self.pos) || grid.is_solid_at(self.pos) {
            self.active = false;
        }
    }

    /// Active and within `radius` of `target`
    pub fn hits(&self, target: Vec2, radius: f32) -> bool {
        self.active && self.pos.distance(target) < radius
    }

    pub fn sprite(&self) -> char {
        match self.kind {
            ProjectileKind::Player if self.vel.x == 0.0 => '|',
            ProjectileKind::Player => '-',
            ProjectileKind::Dropped => 'v',
            ProjectileKind::Turret => '~',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::room::{RoomBuilder, RoomId};

    const DT: f32 = 1.0 / 30.0;

    fn grid_room() -> crate::sim::room::Room {
        RoomBuilder::new(RoomId(0), "range", 20, 10).enclosed().build()
    }

    #[test]
    fn test_player_shot_stops_at_wall() {
        let room = grid_room();
        let tuning = ProjectileTuning::default();
        let mut shot = Projectile::player_shot(Vec2::new(10.0, 5.0), Vec2::X, tuning.player_speed);
        let mut ticks = 0;
        while shot.is_active() && ticks < 100 {
            shot.advance(DT, room.grid(), &tuning);
            assert_eq!(shot.pos.y, 5.0);
            ticks += 1;
        }
        assert!(!shot.is_active());
        assert!(shot.pos.x >= 19.0);
    }

    #[test]
    fn test_dropped_accelerates_downward() {
        let room = grid_room();
        let tuning = ProjectileTuning::default();
        let mut drop = Projectile::dropped(Vec2::new(5.0, 2.0), tuning.drop_speed);
        drop.advance(DT, room.grid(), &tuning);
        let v1 = drop.vel.y;
        drop.advance(DT, room.grid(), &tuning);
        assert!(drop.vel.y > v1);
        assert_eq!(drop.pos.x, 5.0);
    }

    #[test]
    fn test_turret_shot_has_no_gravity() {
        let room = grid_room();
        let tuning = ProjectileTuning::default();
        let mut shot = Projectile::turret_shot(Vec2::new(10.0, 5.0), -3.0, tuning.turret_speed);
        assert_eq!(shot.vel, Vec2::new(-tuning.turret_speed, 0.0));
        shot.advance(DT, room.grid(), &tuning);
        assert_eq!(shot.vel.y, 0.0);
        assert!(shot.pos.x < 10.0);
    }

    #[test]
    fn test_deactivated_projectile_is_frozen() {
        let room = grid_room();
        let tuning = ProjectileTuning::default();
        let mut shot = Projectile::player_shot(Vec2::new(10.0, 5.0), Vec2::X, 20.0);
        shot.deactivate();
        let before = shot.clone();
        for _ in 0..10 {
            shot.advance(DT, room.grid(), &tuning);
        }
        assert_eq!(shot, before);
        assert!(!shot.hits(shot.pos, 10.0));
    }

    #[test]
    fn test_leaving_bounds_deactivates() {
        let room = RoomBuilder::new(RoomId(0), "open", 10, 10).build();
        let tuning = ProjectileTuning::default();
        let mut shot = Projectile::player_shot(Vec2::new(5.0, 0.2), -Vec2::Y, 20.0);
        shot.advance(DT, room.grid(), &tuning);
        assert!(!shot.is_active());
    }
}
