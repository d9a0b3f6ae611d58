//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - No randomness (enemy timers are fixed intervals)
//! - Stable iteration order (authored entity order, rooms sorted by id)
//! - No rendering or platform dependencies

pub mod body;
pub mod collectible;
pub mod enemy;
pub mod layouts;
pub mod player;
pub mod projectile;
pub mod room;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod world;

pub use body::{Body, Gravity};
pub use collectible::{Collectible, CollectibleKind};
pub use enemy::{Enemy, EnemyKind};
pub use layouts::build_world;
pub use player::{Abilities, Ability, Aim, Player};
pub use projectile::{Projectile, ProjectileKind};
pub use room::{ExitGap, Exits, Room, RoomBuilder, RoomId, Tile, TileGrid};
pub use snapshot::Snapshot;
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
pub use world::{Direction, Transition, World};
