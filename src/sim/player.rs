//! The player avatar
//!
//! Movement, jumping, aiming, melee, ranged fire and dash are independent
//! flags and timers rather than one exclusive state enum. Input intents mutate
//! the flags; [`Player::update`] integrates physics once per tick.

use std::collections::BTreeSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, Gravity};
use super::enemy::Enemy;
use super::projectile::Projectile;
use super::room::TileGrid;
use crate::tuning::{PlayerTuning, ProjectileTuning};

/// Unlockable capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Ability {
    DoubleJump,
    Dash,
    WallJump,
}

/// Set of unlocked abilities
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Abilities(BTreeSet<Ability>);

impl Abilities {
    /// Unlock an ability. Returns false if it was already unlocked.
    pub fn grant(&mut self, ability: Ability) -> bool {
        self.0.insert(ability)
    }

    #[inline]
    pub fn has(&self, ability: Ability) -> bool {
        self.0.contains(&ability)
    }

    pub fn iter(&self) -> impl Iterator<Item = Ability> + '_ {
        self.0.iter().copied()
    }
}

/// Firing direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Aim {
    #[default]
    Horizontal,
    Up,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    health: u32,
    max_health: u32,
    score: u64,
    ammo: u32,
    pub abilities: Abilities,

    moving_left: bool,
    moving_right: bool,
    aim: Aim,

    attack_cooldown: f32,
    attack_time: f32,
    dash_time: f32,
    dash_cooldown: f32,
    /// Direction locked in when the dash started
    dash_dir: i8,
    /// Jumps taken since last touching ground (double jump)
    air_jumps_used: u8,

    /// Shots in flight, owned by the player
    pub projectiles: Vec<Projectile>,
}

/// Count a timer down toward zero
#[inline]
fn countdown(timer: &mut f32, dt: f32) {
    if *timer > 0.0 {
        *timer = (*timer - dt).max(0.0);
    }
}

impl Player {
    pub fn new(x: f32, y: f32, tuning: &PlayerTuning) -> Self {
        Self {
            body: Body::new(x, y),
            health: tuning.max_health,
            max_health: tuning.max_health,
            score: 0,
            ammo: tuning.starting_ammo,
            abilities: Abilities::default(),
            moving_left: false,
            moving_right: false,
            aim: Aim::Horizontal,
            attack_cooldown: 0.0,
            attack_time: 0.0,
            dash_time: 0.0,
            dash_cooldown: 0.0,
            dash_dir: 1,
            air_jumps_used: 0,
            projectiles: Vec::new(),
        }
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn ammo(&self) -> u32 {
        self.ammo
    }

    pub fn aim(&self) -> Aim {
        self.aim
    }

    pub fn is_attacking(&self) -> bool {
        self.attack_time > 0.0
    }

    pub fn is_dashing(&self) -> bool {
        self.dash_time > 0.0
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    pub fn attack_cooldown(&self) -> f32 {
        self.attack_cooldown
    }

    pub fn dash_cooldown(&self) -> f32 {
        self.dash_cooldown
    }

    pub fn pos(&self) -> Vec2 {
        self.body.pos
    }

    // === Movement intent ===

    pub fn start_move_left(&mut self) {
        self.moving_left = true;
        self.body.facing = -1;
    }

    pub fn stop_move_left(&mut self) {
        self.moving_left = false;
    }

    pub fn start_move_right(&mut self) {
        self.moving_right = true;
        self.body.facing = 1;
    }

    pub fn stop_move_right(&mut self) {
        self.moving_right = false;
    }

    /// Apply held movement flags. Facing changes only when a direction is newly pressed.
    pub fn set_movement(&mut self, left: bool, right: bool) {
        match (left, self.moving_left) {
            (true, false) => self.start_move_left(),
            (false, true) => self.stop_move_left(),
            _ => {}
        }
        match (right, self.moving_right) {
            (true, false) => self.start_move_right(),
            (false, true) => self.stop_move_right(),
            _ => {}
        }
    }

    pub fn set_aim_up(&mut self, up: bool) {
        self.aim = if up { Aim::Up } else { Aim::Horizontal };
    }

    // === Jump ===

    /// Jump pressed: ground jump, then wall jump, then double jump
    pub fn start_jump(&mut self, grid: &TileGrid, tuning: &PlayerTuning) {
        if self.is_dashing() {
            return;
        }
        if self.body.grounded {
            self.body.vel.y = -tuning.jump_force;
            self.body.grounded = false;
            return;
        }
        if self.abilities.has(Ability::WallJump) {
            if let Some(side) = self.body.adjacent_wall(grid) {
                self.body.vel.y = -tuning.jump_force;
                self.body.facing = -side;
                self.body.vel.x = -(side as f32) * tuning.wall_jump_kick;
                return;
            }
        }
        if self.abilities.has(Ability::DoubleJump) && self.air_jumps_used < tuning.air_jumps {
            self.air_jumps_used += 1;
            self.body.vel.y = -tuning.jump_force;
        }
    }

    /// Jump released: cut the rise short for variable jump height
    pub fn stop_jump(&mut self, tuning: &PlayerTuning) {
        if self.body.vel.y < 0.0 {
            self.body.vel.y *= tuning.jump_release_multiplier;
        }
    }

    // === Combat ===

    /// Melee swing: one instantaneous hit-scan against enemies in front.
    /// Returns how many enemies were hit.
    pub fn start_attack(
        &mut self,
        enemies: &mut [Enemy],
        now: u64,
        tuning: &PlayerTuning,
    ) -> usize {
        if self.attack_cooldown > 0.0 {
            return 0;
        }
        self.attack_time = tuning.attack_duration;
        self.attack_cooldown = tuning.attack_cooldown;

        let facing = self.body.facing_sign();
        let mut hits = 0;
        for enemy in enemies.iter_mut().filter(|e| !e.is_defeated()) {
            let delta = enemy.body.pos - self.body.pos;
            if delta.length() > tuning.attack_range {
                continue;
            }
            // behind the player beyond the tolerance
            if delta.x * facing < -tuning.attack_behind_tolerance {
                continue;
            }
            if delta.y.abs() < tuning.attack_vertical_band {
                enemy.take_damage(tuning.attack_damage, now);
                hits += 1;
            }
        }
        hits
    }

    /// Fire one projectile if there is ammo. Returns whether a shot was fired.
    pub fn shoot(&mut self, tuning: &ProjectileTuning) -> bool {
        if self.ammo == 0 {
            return false;
        }
        let shot = match self.aim {
            Aim::Up => Projectile::player_shot(self.body.pos, -Vec2::Y, tuning.player_speed),
            Aim::Horizontal => {
                let dir = Vec2::new(self.body.facing_sign(), 0.0);
                Projectile::player_shot(self.body.pos + dir, dir, tuning.player_speed)
            }
        };
        self.projectiles.push(shot);
        self.ammo -= 1;
        true
    }

    /// Start a dash in the facing direction. Returns whether the dash started.
    pub fn start_dash(&mut self, tuning: &PlayerTuning) -> bool {
        if !self.abilities.has(Ability::Dash) || self.dash_cooldown > 0.0 || self.is_dashing() {
            return false;
        }
        self.dash_time = tuning.dash_duration;
        self.dash_cooldown = tuning.dash_cooldown;
        self.dash_dir = self.body.facing;
        self.body.vel = Vec2::new(self.dash_dir as f32 * tuning.dash_speed, 0.0);
        true
    }

    // === Stats ===

    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    pub fn heal(&mut self, amount: u32) {
        self.health = self.health.saturating_add(amount).min(self.max_health);
    }

    /// Raise max health and heal by the same amount
    pub fn increase_max_health(&mut self, amount: u32) {
        self.max_health = self.max_health.saturating_add(amount);
        self.health = self.health.saturating_add(amount).min(self.max_health);
    }

    pub fn add_ammo(&mut self, amount: u32) {
        self.ammo = self.ammo.saturating_add(amount);
    }

    pub fn add_score(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    /// Shove the player horizontally unless the destination tile is solid
    pub fn knockback(&mut self, dx: f32, grid: &TileGrid) {
        let target = self.body.pos + Vec2::new(dx, 0.0);
        if !grid.is_solid_at(target) {
            self.body.pos = target;
        }
        self.body.clamp_to(grid);
    }

    /// Drop every projectile in flight
    pub fn clear_projectiles(&mut self) {
        self.projectiles.clear();
    }

    // === Simulation ===

    /// Advance timers, movement and physics by one tick
    pub fn update(&mut self, dt: f32, grid: &TileGrid, tuning: &PlayerTuning) {
        countdown(&mut self.attack_cooldown, dt);
        countdown(&mut self.attack_time, dt);
        countdown(&mut self.dash_cooldown, dt);

        if self.is_dashing() {
            countdown(&mut self.dash_time, dt);
            self.body.vel = Vec2::new(self.dash_dir as f32 * tuning.dash_speed, 0.0);
            self.body.integrate(dt, grid, None);
        } else {
            match (self.moving_left, self.moving_right) {
                (true, false) => self.body.vel.x = -tuning.move_speed,
                (false, true) => self.body.vel.x = tuning.move_speed,
                _ => {
                    let friction = if self.body.grounded {
                        tuning.ground_friction
                    } else {
                        tuning.air_friction
                    };
                    self.body.vel.x *= friction;
                    if self.body.vel.x.abs() < tuning.stop_threshold {
                        self.body.vel.x = 0.0;
                    }
                }
            }
            let gravity = Gravity {
                accel: tuning.gravity,
                max_fall: tuning.max_fall_speed,
            };
            self.body.integrate(dt, grid, Some(gravity));
        }

        if self.body.grounded {
            self.air_jumps_used = 0;
        }
    }

    /// Advance every shot in flight
    pub fn advance_projectiles(&mut self, dt: f32, grid: &TileGrid, tuning: &ProjectileTuning) {
        for shot in &mut self.projectiles {
            shot.advance(dt, grid, tuning);
        }
    }

    /// Drop deactivated shots
    pub fn purge_projectiles(&mut self) {
        self.projectiles.retain(Projectile::is_active);
    }

    pub fn sprite(&self) -> char {
        if self.is_attacking() { '⚔' } else { '@' }
    }
}
