//! Room graph and room transitions
//!
//! The world owns every room. Only the current room is simulated; the others
//! stay frozen exactly as the player left them.

use serde::{Deserialize, Serialize};

use super::collectible::{Collectible, CollectibleKind};
use super::player::Player;
use super::room::{ExitGap, Room, RoomId};
use crate::error::{SimError, SimResult};
use crate::tuning::WorldTuning;

/// Which edge of the room the player left through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// A completed room change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: RoomId,
    pub to: RoomId,
    pub direction: Direction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    /// Sorted by id
    rooms: Vec<Room>,
    /// Index into `rooms`
    current: usize,
    /// Seconds until another transition may fire
    transition_cooldown: f32,
}

impl World {
    /// Assemble a world, validating that every neighbor link resolves
    pub fn new(mut rooms: Vec<Room>, start: RoomId) -> SimResult<Self> {
        rooms.sort_by_key(|r| r.id);
        if let Some(pair) = rooms.windows(2).find(|pair| pair[0].id == pair[1].id) {
            return Err(SimError::DuplicateRoom(pair[0].id));
        }
        let world = Self {
            rooms,
            current: 0,
            transition_cooldown: 0.0,
        };
        for room in &world.rooms {
            if let Some(neighbor) = room.exits.iter().find(|id| world.index_of(*id).is_none()) {
                return Err(SimError::UnknownRoom {
                    room: room.id,
                    neighbor,
                });
            }
        }
        let current = world
            .index_of(start)
            .ok_or(SimError::MissingStartRoom(start))?;
        Ok(Self { current, ..world })
    }

    fn index_of(&self, id: RoomId) -> Option<usize> {
        self.rooms.binary_search_by_key(&id, |r| r.id).ok()
    }

    pub fn current_id(&self) -> RoomId {
        self.rooms[self.current].id
    }

    pub fn current_room(&self) -> &Room {
        &self.rooms[self.current]
    }

    pub fn current_room_mut(&mut self) -> &mut Room {
        &mut self.rooms[self.current]
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.index_of(id).map(|i| &self.rooms[i])
    }

    pub fn room_ids(&self) -> impl Iterator<Item = RoomId> + '_ {
        self.rooms.iter().map(|r| r.id)
    }

    pub fn transition_cooldown(&self) -> f32 {
        self.transition_cooldown
    }

    /// Count down the transition cooldown
    pub fn update(&mut self, dt: f32) {
        self.transition_cooldown = (self.transition_cooldown - dt).max(0.0);
    }

    /// Move the player to a neighboring room when they cross an exit.
    /// Checked right, left, up, down; at most one transition per call.
    pub fn check_room_transition(
        &mut self,
        player: &mut Player,
        tuning: &WorldTuning,
    ) -> Option<Transition> {
        if self.transition_cooldown > 0.0 {
            return None;
        }

        let room = self.current_room();
        let pos = player.body.pos;
        let (width, height) = (room.width() as f32, room.height() as f32);
        let within = |gap: Option<ExitGap>| gap.is_none_or(|g| g.contains(pos.x));

        let (to, direction) = if let Some(to) = room.exits.right.filter(|_| pos.x >= width - 2.0) {
            (to, Direction::Right)
        } else if let Some(to) = room.exits.left.filter(|_| pos.x <= 1.0) {
            (to, Direction::Left)
        } else if let Some(to) = room
            .exits
            .up
            .filter(|_| pos.y <= 1.0 && within(room.ceiling_gap))
        {
            (to, Direction::Up)
        } else if let Some(to) = room
            .exits
            .down
            .filter(|_| pos.y >= height - 2.0 && within(room.floor_gap))
        {
            (to, Direction::Down)
        } else {
            return None;
        };

        let from = room.id;
        self.current = self.index_of(to)?;
        self.transition_cooldown = tuning.transition_cooldown;

        let next = self.current_room();
        match direction {
            Direction::Right => player.body.pos.x = 2.0,
            Direction::Left => player.body.pos.x = (next.width() - 3) as f32,
            Direction::Up => player.body.pos.y = (next.height() - 3) as f32,
            Direction::Down => player.body.pos.y = 2.0,
        }
        let grid = next.grid();
        player.body.clamp_to(grid);
        player.clear_projectiles();

        log::info!("Room {} -> {} ({:?})", from, to, direction);
        Some(Transition {
            from,
            to,
            direction,
        })
    }

    /// Pick up every collectible in the current room within reach of the player
    pub fn check_collectibles(
        &mut self,
        player: &mut Player,
        tuning: &WorldTuning,
    ) -> Vec<CollectibleKind> {
        let room = self.current_room_mut();
        let reach = tuning.pickup_radius;
        let (taken, kept): (Vec<Collectible>, Vec<Collectible>) = room
            .collectibles
            .drain(..)
            .partition(|c| player.body.distance_to(c.pos) < reach);
        room.collectibles = kept;

        taken
            .into_iter()
            .map(|item| {
                apply_collectible(player, item.kind, tuning);
                item.kind
            })
            .collect()
    }
}

/// Apply an item's effect and award its score
pub fn apply_collectible(player: &mut Player, kind: CollectibleKind, tuning: &WorldTuning) {
    let score = match kind {
        CollectibleKind::Health => {
            player.heal(tuning.heal_amount);
            tuning.health_score
        }
        CollectibleKind::Ammo => {
            player.add_ammo(tuning.ammo_amount);
            tuning.ammo_score
        }
        CollectibleKind::MaxHealthUpgrade => {
            player.increase_max_health(tuning.max_health_upgrade);
            tuning.upgrade_score
        }
        CollectibleKind::DoubleJump | CollectibleKind::Dash | CollectibleKind::WallJump => {
            if let Some(ability) = kind.ability() {
                player.abilities.grant(ability);
            }
            tuning.ability_score
        }
        CollectibleKind::Coin => tuning.coin_score,
    };
    player.add_score(score);
    log::debug!("Collected {:?} (+{})", kind, score);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::player::Ability;
    use crate::sim::room::RoomBuilder;
    use crate::tuning::PlayerTuning;

    fn corridor(id: u8, left: Option<u8>, right: Option<u8>) -> Room {
        let mut b = RoomBuilder::new(RoomId(id), "corridor", 60, 20).enclosed();
        if let Some(l) = left {
            b = b.left_exit(RoomId(l), 16..19);
        }
        if let Some(r) = right {
            b = b.right_exit(RoomId(r), 16..19);
        }
        b.build()
    }

    fn pair() -> World {
        World::new(vec![corridor(0, None, Some(1)), corridor(1, Some(0), None)], RoomId(0)).unwrap()
    }

    #[test]
    fn test_unknown_neighbor_is_rejected() {
        let err = World::new(vec![corridor(0, None, Some(7))], RoomId(0)).unwrap_err();
        assert!(matches!(
            err,
            SimError::UnknownRoom {
                room: RoomId(0),
                neighbor: RoomId(7)
            }
        ));
    }

    #[test]
    fn test_missing_start_and_duplicates_are_rejected() {
        let err = World::new(vec![corridor(0, None, None)], RoomId(3)).unwrap_err();
        assert!(matches!(err, SimError::MissingStartRoom(RoomId(3))));
        let err = World::new(vec![corridor(0, None, None), corridor(0, None, None)], RoomId(0))
            .unwrap_err();
        assert!(matches!(err, SimError::DuplicateRoom(RoomId(0))));
    }

    #[test]
    fn test_right_exit_and_cooldown() {
        let tuning = WorldTuning::default();
        let mut world = pair();
        let mut player = Player::new(59.0, 17.0, &PlayerTuning::default());

        let t = world.check_room_transition(&mut player, &tuning).unwrap();
        assert_eq!(t.to, RoomId(1));
        assert_eq!(t.direction, Direction::Right);
        assert_eq!(world.current_id(), RoomId(1));
        assert_eq!(player.pos().x, 2.0);
        assert_eq!(world.transition_cooldown(), tuning.transition_cooldown);

        // standing on the shared boundary does nothing while cooling down
        player.body.pos.x = 1.0;
        assert!(world.check_room_transition(&mut player, &tuning).is_none());
        world.update(1.0);
        let t = world.check_room_transition(&mut player, &tuning).unwrap();
        assert_eq!(t.direction, Direction::Left);
        assert_eq!(player.pos().x, 57.0);
    }

    #[test]
    fn test_up_exit_respects_ceiling_gap() {
        let hub = RoomBuilder::new(RoomId(0), "hub", 60, 20)
            .enclosed()
            .up_exit(RoomId(1), 50..58)
            .build();
        let attic = RoomBuilder::new(RoomId(1), "attic", 60, 20)
            .enclosed()
            .down_exit(RoomId(0), 50..58)
            .build();
        let tuning = WorldTuning::default();
        let mut world = World::new(vec![hub, attic], RoomId(0)).unwrap();
        let mut player = Player::new(20.0, 1.0, &PlayerTuning::default());
        assert!(world.check_room_transition(&mut player, &tuning).is_none());

        player.body.pos.x = 52.0;
        let t = world.check_room_transition(&mut player, &tuning).unwrap();
        assert_eq!(t.direction, Direction::Up);
        assert_eq!(player.pos().y, 17.0);

        world.update(1.0);
        player.body.pos.y = 18.5;
        let t = world.check_room_transition(&mut player, &tuning).unwrap();
        assert_eq!(t.direction, Direction::Down);
        assert_eq!(world.current_id(), RoomId(0));
        assert_eq!(player.pos().y, 2.0);
    }

    #[test]
    fn test_collectibles_only_in_reach() {
        let room = RoomBuilder::new(RoomId(0), "stash", 20, 10)
            .enclosed()
            .collectible(CollectibleKind::Ammo, 5.0, 5.0)
            .collectible(CollectibleKind::Dash, 5.5, 5.0)
            .collectible(CollectibleKind::Coin, 15.0, 5.0)
            .build();
        let tuning = WorldTuning::default();
        let mut world = World::new(vec![room], RoomId(0)).unwrap();
        let mut player = Player::new(5.0, 5.0, &PlayerTuning::default());

        let got = world.check_collectibles(&mut player, &tuning);
        assert_eq!(got, vec![CollectibleKind::Ammo, CollectibleKind::Dash]);
        assert_eq!(player.ammo(), tuning.ammo_amount);
        assert!(player.abilities.has(Ability::Dash));
        assert_eq!(player.score(), tuning.ammo_score + tuning.ability_score);
        assert_eq!(world.current_room().collectibles.len(), 1);

        // single use
        assert!(world.check_collectibles(&mut player, &tuning).is_empty());
    }
}
