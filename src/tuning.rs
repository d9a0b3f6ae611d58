//! Data-driven game balance
//!
//! Every gameplay constant lives here so balance passes never touch the
//! simulation code. All values are in tiles and seconds. Tuning files are
//! JSON; missing fields fall back to the authored defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SimResult;

/// Player movement and combat tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub gravity: f32,
    pub max_fall_speed: f32,
    pub move_speed: f32,
    pub jump_force: f32,
    /// Applied to upward velocity when jump is released early
    pub jump_release_multiplier: f32,
    pub ground_friction: f32,
    pub air_friction: f32,
    /// Horizontal speed below which friction snaps to a full stop
    pub stop_threshold: f32,
    pub max_health: u32,
    pub starting_ammo: u32,
    pub attack_cooldown: f32,
    pub attack_duration: f32,
    pub attack_range: f32,
    pub attack_damage: u32,
    /// How far behind the player an enemy may be and still get hit
    pub attack_behind_tolerance: f32,
    /// Half-height of the band an enemy must be inside to get hit
    pub attack_vertical_band: f32,
    pub dash_speed: f32,
    pub dash_duration: f32,
    pub dash_cooldown: f32,
    /// Horizontal push away from the wall on a wall jump
    pub wall_jump_kick: f32,
    /// Extra jumps per airtime granted by the double-jump ability
    pub air_jumps: u8,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            gravity: 25.0,
            max_fall_speed: 20.0,
            move_speed: 12.0,
            jump_force: 18.0,
            jump_release_multiplier: 0.5,
            ground_friction: 0.3,
            air_friction: 0.95,
            stop_threshold: 0.5,
            max_health: 5,
            starting_ammo: 0,
            attack_cooldown: 0.5,
            attack_duration: 0.12,
            attack_range: 3.5,
            attack_damage: 2,
            attack_behind_tolerance: 0.5,
            attack_vertical_band: 2.0,
            dash_speed: 30.0,
            dash_duration: 0.15,
            dash_cooldown: 0.6,
            wall_jump_kick: 12.0,
            air_jumps: 1,
        }
    }
}

/// Enemy AI tuning shared by all variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub gravity: f32,
    pub max_fall_speed: f32,
    pub walker_speed: f32,
    pub flyer_speed: f32,
    /// Angular frequency of the flyer's vertical bob (radians per second)
    pub flyer_bob_frequency: f32,
    /// Peak vertical bob speed (tiles per second)
    pub flyer_bob_speed: f32,
    pub flyer_drop_interval: f32,
    pub boss_speed: f32,
    /// Boss stops chasing once the player is this close horizontally
    pub boss_proximity: f32,
    pub turret_fire_interval: f32,
    pub turret_range: f32,
    pub contact_damage: u32,
    pub contact_radius: f32,
    pub knockback: f32,
    pub walker_health: u32,
    pub flyer_health: u32,
    pub boss_health: u32,
    pub turret_health: u32,
    /// How long a health bar stays visible after a hit
    pub health_bar_window: f32,
    pub defeat_score: u64,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            gravity: 25.0,
            max_fall_speed: 20.0,
            walker_speed: 5.0,
            flyer_speed: 5.0,
            flyer_bob_frequency: 3.0,
            flyer_bob_speed: 3.0,
            flyer_drop_interval: 2.0,
            boss_speed: 2.5,
            boss_proximity: 3.0,
            turret_fire_interval: 1.5,
            turret_range: 30.0,
            contact_damage: 1,
            contact_radius: 1.5,
            knockback: 2.0,
            walker_health: 1,
            flyer_health: 2,
            boss_health: 10,
            turret_health: 3,
            health_bar_window: 2.0,
            defeat_score: 50,
        }
    }
}

/// Projectile tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    pub player_speed: f32,
    pub turret_speed: f32,
    /// Initial downward speed of a flyer drop
    pub drop_speed: f32,
    pub gravity: f32,
    pub max_fall_speed: f32,
    pub hit_radius: f32,
    pub damage: u32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            player_speed: 20.0,
            turret_speed: 12.0,
            drop_speed: 2.0,
            gravity: 25.0,
            max_fall_speed: 20.0,
            hit_radius: 1.0,
            damage: 1,
        }
    }
}

/// Room graph, pickup and scoring tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldTuning {
    pub transition_cooldown: f32,
    pub pickup_radius: f32,
    pub heal_amount: u32,
    pub ammo_amount: u32,
    pub max_health_upgrade: u32,
    pub health_score: u64,
    pub ammo_score: u64,
    pub upgrade_score: u64,
    pub ability_score: u64,
    pub coin_score: u64,
}

impl Default for WorldTuning {
    fn default() -> Self {
        Self {
            transition_cooldown: 0.5,
            pickup_radius: 1.5,
            heal_amount: 1,
            ammo_amount: 5,
            max_health_upgrade: 1,
            health_score: 10,
            ammo_score: 10,
            upgrade_score: 100,
            ability_score: 100,
            coin_score: 25,
        }
    }
}

/// Complete balance sheet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player: PlayerTuning,
    pub enemy: EnemyTuning,
    pub projectile: ProjectileTuning,
    pub world: WorldTuning,
}

impl Tuning {
    /// Parse tuning from JSON. Omitted fields keep their defaults.
    pub fn from_json(json: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> SimResult<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Read tuning from a file, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(tuning) => tuning,
            Err(err) => {
                log::warn!(
                    "Using default tuning ({}): {}",
                    path.as_ref().display(),
                    err
                );
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "player": { "move_speed": 8.0 } }"#).unwrap();
        assert_eq!(tuning.player.move_speed, 8.0);
        assert_eq!(tuning.player.jump_force, 18.0);
        assert_eq!(tuning.enemy, EnemyTuning::default());
    }

    #[test]
    fn test_empty_json_is_default() {
        let tuning = Tuning::from_json("{}").unwrap();
        assert_eq!(tuning, Tuning::default());
    }

    #[test]
    fn test_invalid_json_is_error() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SimError::InvalidTuning(_)));
    }

    #[test]
    fn test_negative_damage_is_rejected() {
        let err = Tuning::from_json(r#"{ "player": { "attack_damage": -1 } }"#).unwrap_err();
        assert!(matches!(err, SimError::InvalidTuning(_)));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let tuning = Tuning::load_or_default("/definitely/not/here/tuning.json");
        assert_eq!(tuning, Tuning::default());
    }

    #[test]
    fn test_json_round_trip_preserves_edits() {
        let mut tuning = Tuning::default();
        tuning.enemy.turret_range = 12.0;
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }
}
