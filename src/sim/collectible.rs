//! Collectible items

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::player::Ability;

/// Item types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectibleKind {
    /// Restores health (capped at max)
    Health,
    /// Adds projectile ammo
    Ammo,
    /// Raises max health and heals by the same amount
    MaxHealthUpgrade,
    DoubleJump,
    Dash,
    WallJump,
    /// Score only
    Coin,
}

impl CollectibleKind {
    /// Ability unlocked by this item, if any
    pub fn ability(self) -> Option<Ability> {
        match self {
            CollectibleKind::DoubleJump => Some(Ability::DoubleJump),
            CollectibleKind::Dash => Some(Ability::Dash),
            CollectibleKind::WallJump => Some(Ability::WallJump),
            _ => None,
        }
    }

    pub fn sprite(self) -> char {
        match self {
            CollectibleKind::Health => '♥',
            CollectibleKind::Ammo => '*',
            CollectibleKind::MaxHealthUpgrade => '+',
            CollectibleKind::DoubleJump => '^',
            CollectibleKind::Dash => '»',
            CollectibleKind::WallJump => '¦',
            CollectibleKind::Coin => 'o',
        }
    }
}

/// A single-use pickup at a fixed position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub kind: CollectibleKind,
    pub pos: Vec2,
}

impl Collectible {
    pub fn new(kind: CollectibleKind, x: f32, y: f32) -> Self {
        Self {
            kind,
            pos: Vec2::new(x, y),
        }
    }
}
