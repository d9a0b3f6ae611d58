//! Enemy AI variants
//!
//! One update contract, four behaviors. The variant and its private timers
//! live in [`Behavior`], chosen once at construction and dispatched with a
//! `match` each tick. Enemies never remove themselves: the collision pass in
//! `tick` drops them once health reaches zero.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, Gravity};
use super::projectile::Projectile;
use super::room::{TileGrid, cell};
use crate::tuning::{EnemyTuning, ProjectileTuning};

/// Enemy type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Ground patrol that turns at walls and ledges
    Walker,
    /// Airborne patrol that bobs and drops bombs
    Flyer,
    /// Large health pool, chases the player; defeating it wins the run
    Boss,
    /// Stationary gun firing horizontally at the player
    Turret,
}

impl EnemyKind {
    pub fn sprite(self) -> char {
        match self {
            EnemyKind::Walker => 'M',
            EnemyKind::Flyer => 'F',
            EnemyKind::Boss => 'B',
            EnemyKind::Turret => 'T',
        }
    }

    pub fn max_health(self, tuning: &EnemyTuning) -> u32 {
        match self {
            EnemyKind::Walker => tuning.walker_health,
            EnemyKind::Flyer => tuning.flyer_health,
            EnemyKind::Boss => tuning.boss_health,
            EnemyKind::Turret => tuning.turret_health,
        }
    }
}

/// Per-variant AI state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Behavior {
    Walker,
    Flyer {
        /// Drives the vertical bob
        bob_timer: f32,
        drop_timer: f32,
    },
    Boss,
    Turret {
        fire_timer: f32,
    },
}

impl Behavior {
    fn for_kind(kind: EnemyKind) -> Self {
        match kind {
            EnemyKind::Walker => Behavior::Walker,
            EnemyKind::Flyer => Behavior::Flyer {
                bob_timer: 0.0,
                drop_timer: 0.0,
            },
            EnemyKind::Boss => Behavior::Boss,
            EnemyKind::Turret => Behavior::Turret { fire_timer: 0.0 },
        }
    }

    pub fn kind(&self) -> EnemyKind {
        match self {
            Behavior::Walker => EnemyKind::Walker,
            Behavior::Flyer { .. } => EnemyKind::Flyer,
            Behavior::Boss => EnemyKind::Boss,
            Behavior::Turret { .. } => EnemyKind::Turret,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub body: Body,
    behavior: Behavior,
    health: u32,
    max_health: u32,
    /// Tick of the most recent hit
    last_damaged: Option<u64>,
    /// Simulated seconds since the most recent hit (health bar display only)
    since_damaged: Option<f32>,
    /// Projectiles in flight, owned by this enemy
    pub projectiles: Vec<Projectile>,
}

impl Enemy {
    pub fn new(kind: EnemyKind, x: f32, y: f32, tuning: &EnemyTuning) -> Self {
        let max_health = kind.max_health(tuning);
        Self {
            body: Body::new(x, y),
            behavior: Behavior::for_kind(kind),
            health: max_health,
            max_health,
            last_damaged: None,
            since_damaged: None,
            projectiles: Vec::new(),
        }
    }

    #[inline]
    pub fn kind(&self) -> EnemyKind {
        self.behavior.kind()
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }

    pub fn last_damaged(&self) -> Option<u64> {
        self.last_damaged
    }

    /// Subtract health (floored at zero) and stamp the hit time
    pub fn take_damage(&mut self, amount: u32, now: u64) {
        self.health = self.health.saturating_sub(amount);
        self.last_damaged = Some(now);
        self.since_damaged = Some(0.0);
    }

    /// Whether the health bar should be drawn, given the display window in seconds
    pub fn health_bar_visible(&self, window: f32) -> bool {
        self.since_damaged.is_some_and(|t| t <= window)
    }

    pub fn sprite(&self) -> char {
        self.kind().sprite()
    }

    /// Run one tick of AI and physics, then advance owned projectiles.
    /// `target` is the player position.
    pub fn update(
        &mut self,
        dt: f32,
        grid: &TileGrid,
        target: Vec2,
        tuning: &EnemyTuning,
        projectiles: &ProjectileTuning,
    ) {
        if let Some(t) = &mut self.since_damaged {
            *t += dt;
        }
        let gravity = Gravity {
            accel: tuning.gravity,
            max_fall: tuning.max_fall_speed,
        };

        match &mut self.behavior {
            Behavior::Walker => {
                update_walker(&mut self.body, dt, grid, tuning);
                self.body.integrate(dt, grid, Some(gravity));
            }
            Behavior::Flyer {
                bob_timer,
                drop_timer,
            } => {
                *bob_timer += dt;
                *drop_timer += dt;
                update_flyer(&mut self.body, *bob_timer, dt, grid, tuning);
                if *drop_timer >= tuning.flyer_drop_interval {
                    *drop_timer = 0.0;
                    let origin = self.body.pos + Vec2::Y;
                    self.projectiles
                        .push(Projectile::dropped(origin, projectiles.drop_speed));
                }
            }
            Behavior::Boss => {
                let dx = target.x - self.body.pos.x;
                if dx.abs() > tuning.boss_proximity {
                    self.body.face_toward(dx);
                    self.body.vel.x = self.body.facing_sign() * tuning.boss_speed;
                } else {
                    self.body.vel.x = 0.0;
                }
                self.body.integrate(dt, grid, Some(gravity));
            }
            Behavior::Turret { fire_timer } => {
                self.body.vel.x = 0.0;
                self.body.integrate(dt, grid, Some(gravity));
                *fire_timer += dt;
                if *fire_timer >= tuning.turret_fire_interval {
                    *fire_timer = 0.0;
                    if self.body.distance_to(target) <= tuning.turret_range {
                        self.body.face_toward(target.x - self.body.pos.x);
                        let dir = self.body.facing_sign();
                        let origin = self.body.pos + Vec2::new(dir, 0.0);
                        self.projectiles
                            .push(Projectile::turret_shot(origin, dir, projectiles.turret_speed));
                    }
                }
            }
        }

        for shot in &mut self.projectiles {
            shot.advance(dt, grid, projectiles);
        }
    }

    /// Drop deactivated projectiles
    pub fn purge_projectiles(&mut self) {
        self.projectiles.retain(Projectile::is_active);
    }
}

/// Patrol: turn around when the next cell is a wall or has no floor under it
fn update_walker(body: &mut Body, dt: f32, grid: &TileGrid, tuning: &EnemyTuning) {
    let dir = body.facing_sign();
    let next_x = cell(body.pos.x + tuning.walker_speed * dir * dt);
    let row = cell(body.pos.y);
    if grid.is_solid(next_x, row) || !grid.is_solid(next_x, row + 1) {
        body.turn_around();
        body.vel.x = 0.0;
    } else {
        body.vel.x = tuning.walker_speed * dir;
    }
}

/// Horizontal patrol with a sinusoidal bob and no gravity
fn update_flyer(body: &mut Body, bob_timer: f32, dt: f32, grid: &TileGrid, tuning: &EnemyTuning) {
    body.vel.x = tuning.flyer_speed * body.facing_sign();
    body.vel.y = (bob_timer * tuning.flyer_bob_frequency).sin() * tuning.flyer_bob_speed;

    let next_x = body.pos.x + body.vel.x * dt;
    if grid.is_solid(cell(next_x), cell(body.pos.y)) {
        body.turn_around();
    } else {
        body.pos.x = next_x;
    }

    let next_y = body.pos.y + body.vel.y * dt;
    if !grid.is_solid(cell(body.pos.x), cell(next_y)) {
        body.pos.y = next_y;
    }
    body.clamp_to(grid);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::room::{Room, RoomBuilder, RoomId, Tile};

    const DT: f32 = 1.0 / 30.0;

    fn hall() -> Room {
        RoomBuilder::new(RoomId(0), "hall", 40, 12).enclosed().build()
    }

    fn step(enemy: &mut Enemy, room: &Room, target: Vec2) {
        enemy.update(
            DT,
            room.grid(),
            target,
            &EnemyTuning::default(),
            &ProjectileTuning::default(),
        );
    }

    #[test]
    fn test_walker_turns_at_ledge() {
        // floor only under columns 0..=10, pit beyond
        let room = RoomBuilder::new(RoomId(0), "ledge", 20, 12)
            .fill_row(11, 0..11, Tile::Wall)
            .build();
        let mut walker = Enemy::new(EnemyKind::Walker, 10.95, 10.0, &EnemyTuning::default());
        assert_eq!(walker.body.facing, 1);
        step(&mut walker, &room, Vec2::ZERO);
        assert_eq!(walker.body.facing, -1);
        assert!(walker.body.pos.x <= 10.95);
        assert!(room.grid().is_solid(cell(walker.body.pos.x), 11));
    }

    #[test]
    fn test_walker_turns_at_wall() {
        let room = hall();
        let mut walker = Enemy::new(EnemyKind::Walker, 38.9, 10.0, &EnemyTuning::default());
        step(&mut walker, &room, Vec2::ZERO);
        assert_eq!(walker.body.facing, -1);
        for _ in 0..30 {
            step(&mut walker, &room, Vec2::ZERO);
        }
        assert!(walker.body.pos.x < 38.0);
    }

    #[test]
    fn test_flyer_ignores_gravity_and_drops_bombs() {
        let room = hall();
        let tuning = EnemyTuning::default();
        let mut flyer = Enemy::new(EnemyKind::Flyer, 20.0, 4.0, &tuning);
        let ticks = (tuning.flyer_drop_interval / DT).ceil() as usize + 1;
        let mut dropped = 0;
        for _ in 0..ticks {
            step(&mut flyer, &room, Vec2::ZERO);
            dropped = dropped.max(flyer.projectiles.len());
        }
        assert!((flyer.body.pos.y - 4.0).abs() < 2.0);
        assert_eq!(dropped, 1);
        assert!(flyer.projectiles.iter().all(|p| p.vel.x == 0.0));
    }

    #[test]
    fn test_boss_chases_then_holds() {
        let room = hall();
        let mut boss = Enemy::new(EnemyKind::Boss, 30.0, 10.0, &EnemyTuning::default());
        step(&mut boss, &room, Vec2::new(10.0, 10.0));
        assert_eq!(boss.body.facing, -1);
        assert!(boss.body.pos.x < 30.0);

        let x = boss.body.pos.x;
        step(&mut boss, &room, Vec2::new(x - 1.0, 10.0));
        assert_eq!(boss.body.pos.x, x);
    }

    #[test]
    fn test_turret_fires_toward_player_in_range() {
        let room = hall();
        let tuning = EnemyTuning::default();
        let mut turret = Enemy::new(EnemyKind::Turret, 30.0, 10.0, &tuning);
        let ticks = (tuning.turret_fire_interval / DT).ceil() as usize + 1;
        for _ in 0..ticks {
            step(&mut turret, &room, Vec2::new(20.0, 10.0));
        }
        assert_eq!(turret.projectiles.len(), 1);
        assert!(turret.projectiles[0].vel.x < 0.0);
        assert_eq!(turret.projectiles[0].vel.y, 0.0);
        assert_eq!(turret.body.pos.x, 30.0);
    }

    #[test]
    fn test_turret_holds_fire_out_of_range() {
        let room = RoomBuilder::new(RoomId(0), "long", 80, 12).enclosed().build();
        let tuning = EnemyTuning::default();
        let mut turret = Enemy::new(EnemyKind::Turret, 70.0, 10.0, &tuning);
        for _ in 0..(30 * 10) {
            turret.update(
                DT,
                room.grid(),
                Vec2::new(5.0, 10.0),
                &tuning,
                &ProjectileTuning::default(),
            );
            assert!(turret.projectiles.is_empty());
        }
    }

    #[test]
    fn test_damage_floors_at_zero() {
        let mut walker = Enemy::new(EnemyKind::Walker, 5.0, 5.0, &EnemyTuning::default());
        walker.take_damage(5, 100);
        assert_eq!(walker.health(), 0);
        assert!(walker.is_defeated());
        assert_eq!(walker.last_damaged(), Some(100));
        walker.take_damage(u32::MAX, 101);
        assert_eq!(walker.health(), 0);
    }

    #[test]
    fn test_health_bar_window_follows_simulated_time() {
        let room = hall();
        let tuning = EnemyTuning::default();
        let mut turret = Enemy::new(EnemyKind::Turret, 30.0, 10.0, &tuning);
        assert!(!turret.health_bar_visible(tuning.health_bar_window));
        turret.take_damage(1, 7);
        assert!(turret.health_bar_visible(tuning.health_bar_window));

        // same window whatever the step size
        let far = Vec2::new(-100.0, 10.0);
        let ptuning = ProjectileTuning::default();
        for _ in 0..4 {
            turret.update(0.5, room.grid(), far, &tuning, &ptuning);
        }
        assert!(turret.health_bar_visible(tuning.health_bar_window));
        turret.update(0.5, room.grid(), far, &tuning, &ptuning);
        assert!(!turret.health_bar_visible(tuning.health_bar_window));
    }

    #[test]
    fn test_flyer_reverses_at_wall() {
        let room = hall();
        let tuning = EnemyTuning::default();
        let mut flyer = Enemy::new(EnemyKind::Flyer, 38.5, 5.0, &tuning);
        assert_eq!(flyer.body.facing, 1);
        for _ in 0..5 {
            step(&mut flyer, &room, Vec2::ZERO);
        }
        assert_eq!(flyer.body.facing, -1);
        for _ in 0..30 {
            step(&mut flyer, &room, Vec2::ZERO);
        }
        assert!(flyer.body.pos.x < 38.0);
        assert!(!room.grid().is_solid_at(flyer.body.pos));
    }
}
