//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Only the
//! current room is simulated.

use serde::{Deserialize, Serialize};

use super::enemy::{Enemy, EnemyKind};
use super::player::Player;
use super::state::{GameEvent, GamePhase, GameState};

/// Input intents for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Held
    pub move_left: bool,
    /// Held
    pub move_right: bool,
    /// Held; press and release edges are derived from the previous tick
    pub jump: bool,
    /// Held
    pub aim_up: bool,
    /// Edge-triggered melee swing
    pub attack: bool,
    /// Edge-triggered ranged shot
    pub shoot: bool,
    /// Edge-triggered dash
    pub dash: bool,
    /// Leave the menu
    pub start: bool,
    /// Back to the menu from GameOver/Victory
    pub restart: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    match state.phase {
        GamePhase::Menu if input.start => state.start_run(),
        GamePhase::Menu => return,
        GamePhase::GameOver | GamePhase::Victory => {
            if input.restart {
                state.reset_to_menu();
            }
            return;
        }
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    apply_input(state, input);
    step_physics(state, dt);
    resolve_collisions(state);
    collect_items(state);
    remove_defeated(state);
    purge_projectiles(state);

    if state.player.is_dead() {
        state.events.push(GameEvent::PlayerDied);
    }
    state.resolve_terminal();
    if state.phase.is_terminal() {
        return;
    }

    state.world.update(dt);
    if let Some(t) = state
        .world
        .check_room_transition(&mut state.player, &state.tuning.world)
    {
        state.events.push(GameEvent::RoomEntered {
            from: t.from,
            to: t.to,
        });
    }
}

fn apply_input(state: &mut GameState, input: &TickInput) {
    let GameState {
        tuning,
        world,
        player,
        time_ticks,
        jump_held,
        ..
    } = state;
    let (grid, enemies, _) = world.current_room_mut().split_mut();

    player.set_movement(input.move_left, input.move_right);
    player.set_aim_up(input.aim_up);

    match (input.jump, *jump_held) {
        (true, false) => player.start_jump(grid, &tuning.player),
        (false, true) => player.stop_jump(&tuning.player),
        _ => {}
    }
    *jump_held = input.jump;

    if input.dash {
        player.start_dash(&tuning.player);
    }
    if input.attack {
        let hits = player.start_attack(enemies, *time_ticks, &tuning.player);
        if hits > 0 {
            log::debug!("Melee hit {} enemies", hits);
        }
    }
    if input.shoot {
        player.shoot(&tuning.projectile);
    }
}

/// Player, then enemies (which chase the player's new position)
fn step_physics(state: &mut GameState, dt: f32) {
    let GameState {
        tuning,
        world,
        player,
        ..
    } = state;
    let (grid, enemies, _) = world.current_room_mut().split_mut();

    player.update(dt, grid, &tuning.player);
    player.advance_projectiles(dt, grid, &tuning.projectile);

    let target = player.pos();
    for enemy in enemies.iter_mut().filter(|e| !e.is_defeated()) {
        enemy.update(dt, grid, target, &tuning.enemy, &tuning.projectile);
    }
}

fn damage_player(player: &mut Player, amount: u32, events: &mut Vec<GameEvent>) {
    if amount == 0 || player.is_dead() {
        return;
    }
    player.take_damage(amount);
    events.push(GameEvent::PlayerDamaged { amount });
}

/// Enemy contact, hostile projectiles, then player shots
fn resolve_collisions(state: &mut GameState) {
    let GameState {
        tuning,
        world,
        player,
        time_ticks,
        events,
        ..
    } = state;
    let now = *time_ticks;
    let (grid, enemies, _) = world.current_room_mut().split_mut();
    let hit_radius = tuning.projectile.hit_radius;

    for enemy in enemies.iter().filter(|e| !e.is_defeated()) {
        if player.body.distance_to(enemy.body.pos) >= tuning.enemy.contact_radius {
            continue;
        }
        damage_player(player, tuning.enemy.contact_damage, events);
        let away = player.pos().x - enemy.body.pos.x;
        let dir = if away == 0.0 {
            -player.body.facing_sign()
        } else {
            away.signum()
        };
        player.knockback(dir * tuning.enemy.knockback, grid);
    }

    let hostile = enemies
        .iter_mut()
        .flat_map(|e| e.projectiles.iter_mut())
        .filter(|s| s.kind.is_hostile());
    for shot in hostile {
        if shot.hits(player.pos(), hit_radius) {
            shot.deactivate();
            damage_player(player, tuning.projectile.damage, events);
        }
    }

    for shot in player.projectiles.iter_mut().filter(|s| s.is_active()) {
        // first living enemy in reach takes the hit
        if let Some(enemy) = enemies
            .iter_mut()
            .find(|e| !e.is_defeated() && shot.hits(e.body.pos, hit_radius))
        {
            enemy.take_damage(tuning.projectile.damage, now);
            shot.deactivate();
        }
    }
}

fn collect_items(state: &mut GameState) {
    let GameState {
        tuning,
        world,
        player,
        events,
        ..
    } = state;
    for kind in world.check_collectibles(player, &tuning.world) {
        events.push(GameEvent::ItemCollected { kind });
    }
}

/// Remove enemies at zero health, award score and raise defeat events
fn remove_defeated(state: &mut GameState) {
    let GameState {
        tuning,
        world,
        player,
        events,
        ..
    } = state;
    let room = world.current_room_mut();
    if !room.enemies.iter().any(Enemy::is_defeated) {
        return;
    }

    let (defeated, alive): (Vec<Enemy>, Vec<Enemy>) =
        room.enemies.drain(..).partition(Enemy::is_defeated);
    room.enemies = alive;

    for enemy in defeated {
        let kind = enemy.kind();
        player.add_score(tuning.enemy.defeat_score);
        log::debug!("{:?} defeated in room {}", kind, room.id);
        events.push(GameEvent::EnemyDefeated { kind });
        if kind == EnemyKind::Boss {
            events.push(GameEvent::BossDefeated);
        }
    }
}

fn purge_projectiles(state: &mut GameState) {
    state.player.purge_projectiles();
    for enemy in &mut state.world.current_room_mut().enemies {
        enemy.purge_projectiles();
    }
}
