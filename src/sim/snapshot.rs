//! Read-only view of the simulation for renderers
//!
//! A snapshot covers the current room only and owns all of its data, so the
//! renderer never borrows into the live state.

use glam::Vec2;
use serde::Serialize;

use super::collectible::CollectibleKind;
use super::enemy::EnemyKind;
use super::player::{Ability, Aim};
use super::projectile::ProjectileKind;
use super::room::RoomId;
use super::state::{GamePhase, GameState};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub tick: u64,
    pub room: RoomView,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub collectibles: Vec<CollectibleView>,
    pub projectiles: Vec<ProjectileView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomView {
    pub id: RoomId,
    pub name: String,
    /// Glyph rows, top to bottom
    pub tiles: Vec<String>,
}

/// Player position plus HUD values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub facing: i8,
    pub sprite: char,
    pub aim: Aim,
    pub attacking: bool,
    pub dashing: bool,
    pub health: u32,
    pub max_health: u32,
    pub score: u64,
    pub ammo: u32,
    pub abilities: Vec<Ability>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnemyView {
    pub kind: EnemyKind,
    pub sprite: char,
    pub pos: Vec2,
    pub health: u32,
    pub max_health: u32,
    /// Recently damaged, so the bar should be drawn
    pub show_health_bar: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectibleView {
    pub kind: CollectibleKind,
    pub sprite: char,
    pub pos: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectileView {
    pub kind: ProjectileKind,
    pub sprite: char,
    pub pos: Vec2,
}

impl GameState {
    /// Capture the current room and HUD
    pub fn snapshot(&self) -> Snapshot {
        let room = self.world.current_room();
        let now = self.time_ticks;
        let window = self.tuning.enemy.health_bar_window;

        let player = &self.player;
        let player_view = PlayerView {
            pos: player.pos(),
            facing: player.body.facing,
            sprite: player.sprite(),
            aim: player.aim(),
            attacking: player.is_attacking(),
            dashing: player.is_dashing(),
            health: player.health(),
            max_health: player.max_health(),
            score: player.score(),
            ammo: player.ammo(),
            abilities: player.abilities.iter().collect(),
        };

        let enemies = room
            .enemies
            .iter()
            .map(|e| EnemyView {
                kind: e.kind(),
                sprite: e.sprite(),
                pos: e.body.pos,
                health: e.health(),
                max_health: e.max_health(),
                show_health_bar: e.health_bar_visible(window),
            })
            .collect();

        let collectibles = room
            .collectibles
            .iter()
            .map(|c| CollectibleView {
                kind: c.kind,
                sprite: c.kind.sprite(),
                pos: c.pos,
            })
            .collect();

        let projectiles = player
            .projectiles
            .iter()
            .chain(room.enemies.iter().flat_map(|e| e.projectiles.iter()))
            .filter(|p| p.is_active())
            .map(|p| ProjectileView {
                kind: p.kind,
                sprite: p.sprite(),
                pos: p.pos,
            })
            .collect();

        Snapshot {
            phase: self.phase,
            tick: now,
            room: RoomView {
                id: room.id,
                name: room.name.clone(),
                tiles: room.grid().rows(),
            },
            player: player_view,
            enemies,
            collectibles,
            projectiles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemy::Enemy;
    use crate::sim::layouts;
    use crate::sim::player::Player;
    use crate::sim::room::RoomBuilder;
    use crate::sim::tick::{TickInput, tick};
    use crate::sim::world::World;
    use crate::tuning::Tuning;

    #[test]
    fn test_snapshot_of_start_room() {
        let state = GameState::new(Tuning::default()).unwrap();
        let snap = state.snapshot();
        assert_eq!(snap.phase, GamePhase::Menu);
        assert_eq!(snap.room.id, layouts::START);
        assert_eq!(snap.room.tiles.len(), layouts::ROOM_HEIGHT as usize);
        let width = layouts::ROOM_WIDTH as usize;
        assert!(snap.room.tiles.iter().all(|row| row.chars().count() == width));
        assert_eq!(snap.player.health, snap.player.max_health);
        assert_eq!(snap.enemies.len(), state.world.current_room().enemies.len());
        assert!(snap.enemies.iter().all(|e| !e.show_health_bar));
        assert!(snap.projectiles.is_empty());
    }

    #[test]
    fn test_health_bar_window() {
        let tuning = Tuning::default();
        let turret = Enemy::new(EnemyKind::Turret, 50.0, 18.0, &tuning.enemy);
        let room = RoomBuilder::new(RoomId(0), "range", 60, 20)
            .enclosed()
            .enemy(turret)
            .build();
        let world = World::new(vec![room], RoomId(0)).unwrap();
        let player = Player::new(10.0, 18.0, &tuning.player);
        let mut state = GameState::with_world(world, player, tuning);

        state.world.current_room_mut().enemies[0].take_damage(0, 0);
        assert!(state.snapshot().enemies[0].show_health_bar);

        // 2 s at a 15 Hz step
        let step = 1.0 / 15.0;
        for _ in 0..29 {
            tick(&mut state, &TickInput::default(), step);
        }
        assert!(state.snapshot().enemies[0].show_health_bar);
        for _ in 0..2 {
            tick(&mut state, &TickInput::default(), step);
        }
        assert!(!state.snapshot().enemies[0].show_health_bar);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(Tuning::default()).unwrap();
        let json = serde_json::to_value(state.snapshot()).unwrap();
        assert_eq!(json["phase"], "Menu");
        assert_eq!(json["room"]["name"], "Start");
        assert!(json["player"]["abilities"].as_array().unwrap().is_empty());
    }
}
