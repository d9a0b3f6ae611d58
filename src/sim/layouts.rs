//! Authored room layouts and the world graph
//!
//! Every room is built by a pure factory function. Side exits open the wall
//! over the three rows just above the floor; vertical exits open a span of
//! the ceiling or floor.
//!
//! ```text
//!                 [4 Flyer] -- [6 Arena] -- [2 Ability]
//!                     |
//! [5 Treasure] -- [0 Start] -- [1 Challenge] -- [3 Boss]
//! ```
//! (Flyer sits above Challenge.)

use std::ops::Range;

use super::collectible::CollectibleKind::*;
use super::enemy::{Enemy, EnemyKind};
use super::room::{Room, RoomBuilder, RoomId};
use super::world::World;
use crate::error::SimResult;
use crate::tuning::EnemyTuning;

pub const ROOM_WIDTH: i32 = 60;
pub const ROOM_HEIGHT: i32 = 20;

pub const START: RoomId = RoomId(0);
pub const CHALLENGE: RoomId = RoomId(1);
pub const ABILITY: RoomId = RoomId(2);
pub const BOSS: RoomId = RoomId(3);
pub const FLYER: RoomId = RoomId(4);
pub const TREASURE: RoomId = RoomId(5);
pub const ARENA: RoomId = RoomId(6);

/// Player spawn in the start room
pub const PLAYER_SPAWN: (f32, f32) = (5.0, 15.0);

/// Rows opened in side walls for left/right exits
const SIDE_DOOR: Range<i32> = 16..19;
/// Columns opened between Challenge (ceiling) and Flyer (floor)
const SHAFT: Range<i32> = 50..58;

fn shell(id: RoomId, name: &str) -> RoomBuilder {
    RoomBuilder::new(id, name, ROOM_WIDTH, ROOM_HEIGHT).enclosed()
}

pub fn start_room(tuning: &EnemyTuning) -> Room {
    shell(START, "Start")
        .left_exit(TREASURE, SIDE_DOOR)
        .right_exit(CHALLENGE, SIDE_DOOR)
        .platform(15, 10..20)
        .platform(10, 22..37)
        .enemy(Enemy::new(EnemyKind::Walker, 25.0, 18.0, tuning))
        .collectible(Health, 15.0, 14.0)
        .collectible(Health, 35.0, 18.0)
        .collectible(Ammo, 29.0, 9.0)
        .build()
}

pub fn challenge_room(tuning: &EnemyTuning) -> Room {
    shell(CHALLENGE, "Challenge")
        .left_exit(START, SIDE_DOOR)
        .right_exit(BOSS, SIDE_DOOR)
        .up_exit(FLYER, SHAFT)
        .platform(16, 5..12)
        .platform(13, 15..22)
        .platform(10, 25..32)
        .platform(13, 35..42)
        // ascending route to the shaft
        .platform(10, 45..52)
        .platform(7, 50..57)
        .platform(4, 45..52)
        .enemy(Enemy::new(EnemyKind::Walker, 18.0, 12.0, tuning))
        .enemy(Enemy::new(EnemyKind::Walker, 38.0, 12.0, tuning))
        .enemy(Enemy::new(EnemyKind::Turret, 28.0, 9.0, tuning))
        .collectible(Health, 18.0, 12.0)
        .collectible(Health, 53.0, 6.0)
        .collectible(Ammo, 8.0, 15.0)
        .collectible(Ammo, 28.0, 18.0)
        .collectible(Coin, 48.0, 3.0)
        .build()
}

pub fn boss_room(tuning: &EnemyTuning) -> Room {
    shell(BOSS, "Boss")
        .left_exit(CHALLENGE, SIDE_DOOR)
        .platform(15, 10..15)
        .platform(15, 45..50)
        .enemy(Enemy::new(EnemyKind::Boss, 30.0, 17.0, tuning))
        .enemy(Enemy::new(EnemyKind::Flyer, 15.0, 8.0, tuning))
        .enemy(Enemy::new(EnemyKind::Flyer, 45.0, 10.0, tuning))
        .collectible(Health, 5.0, 18.0)
        .collectible(Health, 55.0, 18.0)
        .collectible(Ammo, 12.0, 14.0)
        .collectible(Ammo, 47.0, 14.0)
        .build()
}

pub fn flyer_room(tuning: &EnemyTuning) -> Room {
    shell(FLYER, "Flyer")
        .down_exit(CHALLENGE, SHAFT)
        .right_exit(ARENA, SIDE_DOOR)
        // landing ledge over part of the shaft; the rest drops back down
        .platform(18, 54..58)
        .platform(14, 44..50)
        .platform(17, 1..12)
        .platform(14, 15..25)
        .platform(11, 28..38)
        .enemy(Enemy::new(EnemyKind::Flyer, 20.0, 8.0, tuning))
        .enemy(Enemy::new(EnemyKind::Flyer, 33.0, 6.0, tuning))
        .enemy(Enemy::new(EnemyKind::Flyer, 8.0, 10.0, tuning))
        .collectible(Ammo, 5.0, 16.0)
        .collectible(Ammo, 20.0, 13.0)
        .collectible(Ammo, 33.0, 10.0)
        .collectible(Health, 18.0, 13.0)
        .collectible(Coin, 46.0, 13.0)
        .build()
}

pub fn treasure_room(_tuning: &EnemyTuning) -> Room {
    shell(TREASURE, "Treasure")
        .right_exit(START, SIDE_DOOR)
        // stepped pedestal
        .block(15, 27..33)
        .block(14, 28..32)
        .block(13, 29..31)
        .platform(15, 10..18)
        .platform(15, 42..50)
        .platform(9, 5..12)
        .platform(9, 48..55)
        .collectible(MaxHealthUpgrade, 30.0, 12.0)
        .collectible(Health, 14.0, 14.0)
        .collectible(Health, 46.0, 14.0)
        .collectible(Coin, 8.0, 8.0)
        .collectible(Coin, 51.0, 8.0)
        .collectible(Ammo, 25.0, 18.0)
        .collectible(Ammo, 35.0, 18.0)
        .collectible(Ammo, 10.0, 18.0)
        .build()
}

pub fn arena_room(tuning: &EnemyTuning) -> Room {
    shell(ARENA, "Arena")
        .left_exit(FLYER, SIDE_DOOR)
        .right_exit(ABILITY, SIDE_DOOR)
        .platform(16, 25..35)
        .platform(13, 5..13)
        .platform(13, 47..55)
        .enemy(Enemy::new(EnemyKind::Walker, 10.0, 18.0, tuning))
        .enemy(Enemy::new(EnemyKind::Walker, 50.0, 18.0, tuning))
        .enemy(Enemy::new(EnemyKind::Walker, 30.0, 15.0, tuning))
        .enemy(Enemy::new(EnemyKind::Flyer, 15.0, 5.0, tuning))
        .enemy(Enemy::new(EnemyKind::Flyer, 45.0, 7.0, tuning))
        .collectible(Health, 8.0, 12.0)
        .collectible(Health, 51.0, 12.0)
        .collectible(Ammo, 30.0, 15.0)
        .collectible(Ammo, 20.0, 18.0)
        .collectible(Ammo, 40.0, 18.0)
        .build()
}

pub fn ability_room(tuning: &EnemyTuning) -> Room {
    let stairs = (0..5).fold(shell(ABILITY, "Ability"), |room, i| {
        room.platform(18 - i, 10 + i * 3..13 + i * 3)
    });
    stairs
        .left_exit(ARENA, SIDE_DOOR)
        .platform(8, 25..35)
        .platform(12, 40..46)
        .enemy(Enemy::new(EnemyKind::Turret, 55.0, 18.0, tuning))
        .collectible(DoubleJump, 30.0, 7.0)
        .collectible(Dash, 43.0, 11.0)
        .collectible(WallJump, 22.0, 13.0)
        .collectible(Ammo, 15.0, 16.0)
        .collectible(Health, 12.0, 17.0)
        .build()
}

/// Build the full authored world, starting in the start room
pub fn build_world(tuning: &EnemyTuning) -> SimResult<World> {
    World::new(
        vec![
            start_room(tuning),
            challenge_room(tuning),
            ability_room(tuning),
            boss_room(tuning),
            flyer_room(tuning),
            treasure_room(tuning),
            arena_room(tuning),
        ],
        START,
    )
}
