//! Game state and phase machine
//!
//! Everything the tick advances lives here. The state is plain data
//! (serializable) so two runs fed the same inputs stay identical.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collectible::CollectibleKind;
use super::enemy::EnemyKind;
use super::layouts::{self, PLAYER_SPAWN};
use super::player::Player;
use super::room::RoomId;
use super::world::World;
use crate::error::SimResult;
use crate::tuning::Tuning;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the start intent
    Menu,
    /// Active gameplay
    Playing,
    /// Player died
    GameOver,
    /// Boss defeated
    Victory,
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Victory)
    }
}

/// Something that happened during a tick, for the outer loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player health reached zero (ends the run)
    PlayerDied,
    /// The boss was removed (ends the run)
    BossDefeated,
    RoomEntered { from: RoomId, to: RoomId },
    EnemyDefeated { kind: EnemyKind },
    ItemCollected { kind: CollectibleKind },
    PlayerDamaged { amount: u32 },
}

impl GameEvent {
    /// Whether this event ends the Playing phase
    pub fn is_terminal(self) -> bool {
        matches!(self, GameEvent::PlayerDied | GameEvent::BossDefeated)
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub world: World,
    pub player: Player,
    /// Simulation tick counter (Playing ticks only)
    pub time_ticks: u64,
    /// Events raised by the most recent tick
    pub events: Vec<GameEvent>,
    /// Jump held on the previous tick, for edge detection
    pub(crate) jump_held: bool,
    /// World as authored, restored on restart
    pristine: World,
    spawn: Vec2,
}

impl GameState {
    /// Fresh run in the authored world, waiting in the menu
    pub fn new(tuning: Tuning) -> SimResult<Self> {
        let world = layouts::build_world(&tuning.enemy)?;
        let (x, y) = PLAYER_SPAWN;
        let player = Player::new(x, y, &tuning.player);
        let mut state = Self::with_world(world, player, tuning);
        state.phase = GamePhase::Menu;
        Ok(state)
    }

    /// Run in a custom world, already playing
    pub fn with_world(world: World, player: Player, tuning: Tuning) -> Self {
        Self {
            spawn: player.pos(),
            pristine: world.clone(),
            tuning,
            phase: GamePhase::Playing,
            world,
            player,
            time_ticks: 0,
            events: Vec::new(),
            jump_held: false,
        }
    }

    pub fn current_room_id(&self) -> RoomId {
        self.world.current_id()
    }

    /// Leave the menu
    pub fn start_run(&mut self) {
        if self.phase == GamePhase::Menu {
            log::info!("Run started in room {}", self.world.current_id());
            self.phase = GamePhase::Playing;
        }
    }

    /// Discard the run and return to the menu with the world as authored
    pub fn reset_to_menu(&mut self) {
        self.world = self.pristine.clone();
        self.player = Player::new(self.spawn.x, self.spawn.y, &self.tuning.player);
        self.phase = GamePhase::Menu;
        self.time_ticks = 0;
        self.events.clear();
        self.jump_held = false;
        log::info!("Back to menu");
    }

    /// Take the events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Enter a terminal phase. GameOver wins if both fire together.
    pub(crate) fn resolve_terminal(&mut self) {
        if self.events.contains(&GameEvent::PlayerDied) {
            log::info!("Player died at tick {} (score {})", self.time_ticks, self.player.score());
            self.phase = GamePhase::GameOver;
        } else if self.events.contains(&GameEvent::BossDefeated) {
            log::info!("Boss defeated at tick {} (score {})", self.time_ticks, self.player.score());
            self.phase = GamePhase::Victory;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_waits_in_menu() {
        let state = GameState::new(Tuning::default()).unwrap();
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.current_room_id(), layouts::START);
        assert_eq!(state.player.health(), state.tuning.player.max_health);
        assert_eq!(state.player.ammo(), 0);
    }

    #[test]
    fn test_reset_restores_world_and_player() {
        let mut state = GameState::new(Tuning::default()).unwrap();
        state.start_run();
        state.world.current_room_mut().collectibles.clear();
        state.player.add_score(500);
        state.player.body.pos.x = 30.0;
        state.phase = GamePhase::GameOver;

        state.reset_to_menu();
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.player.score(), 0);
        assert_eq!(state.player.pos(), Vec2::new(PLAYER_SPAWN.0, PLAYER_SPAWN.1));
        assert!(!state.world.current_room().collectibles.is_empty());
    }

    #[test]
    fn test_game_over_beats_victory() {
        let mut state = GameState::new(Tuning::default()).unwrap();
        state.start_run();
        state.events = vec![GameEvent::BossDefeated, GameEvent::PlayerDied];
        state.resolve_terminal();
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_drain_events_empties_queue() {
        let mut state = GameState::new(Tuning::default()).unwrap();
        state.events.push(GameEvent::PlayerDamaged { amount: 1 });
        assert_eq!(state.drain_events().len(), 1);
        assert!(state.events.is_empty());
        assert!(GameEvent::PlayerDied.is_terminal());
        assert!(!GameEvent::PlayerDamaged { amount: 1 }.is_terminal());
    }
}
