//! Room Crawler headless runner
//!
//! Drives the simulation with seeded pseudo-random input for a fixed number
//! of ticks, logs what happens and prints the final snapshot as JSON.
//!
//! Usage: `room-crawler [ticks] [seed] [tuning.json]`

use std::error::Error;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use room_crawler::Tuning;
use room_crawler::consts::SIM_DT;
use room_crawler::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

const DEFAULT_TICKS: u64 = 30 * 120;
const DEFAULT_SEED: u64 = 12345;

/// Held intents change slowly so the player actually travels
struct Pilot {
    rng: Pcg32,
    dir: i8,
    jump: bool,
    aim_up: bool,
}

impl Pilot {
    fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            dir: 1,
            jump: false,
            aim_up: false,
        }
    }

    fn next_input(&mut self, phase: GamePhase) -> TickInput {
        if self.rng.random_bool(0.04) {
            self.dir = match self.rng.random_range(0..4) {
                0 => -1,
                1 => 0,
                _ => 1,
            };
        }
        if self.rng.random_bool(0.1) {
            self.jump = !self.jump;
        }
        if self.rng.random_bool(0.05) {
            self.aim_up = !self.aim_up;
        }
        TickInput {
            move_left: self.dir < 0,
            move_right: self.dir > 0,
            jump: self.jump,
            aim_up: self.aim_up,
            attack: self.rng.random_bool(0.08),
            shoot: self.rng.random_bool(0.03),
            dash: self.rng.random_bool(0.02),
            start: phase == GamePhase::Menu,
            restart: phase.is_terminal(),
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let ticks = match args.next() {
        Some(arg) => arg.parse()?,
        None => DEFAULT_TICKS,
    };
    let seed = match args.next() {
        Some(arg) => arg.parse()?,
        None => DEFAULT_SEED,
    };
    let tuning = match args.next() {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };

    log::info!("Room Crawler (headless) - {} ticks, seed {}", ticks, seed);

    let mut state = GameState::new(tuning)?;
    let mut pilot = Pilot::new(seed);
    let mut runs = 0u32;

    for _ in 0..ticks {
        let input = pilot.next_input(state.phase);
        if input.start {
            runs += 1;
        }
        tick(&mut state, &input, SIM_DT);

        for event in state.drain_events() {
            match event {
                GameEvent::PlayerDied | GameEvent::BossDefeated => {
                    log::info!("Run {} ended: {:?}", runs, event)
                }
                GameEvent::RoomEntered { .. } => log::debug!("{:?}", event),
                _ => log::trace!("{:?}", event),
            }
        }
    }

    log::info!(
        "Finished in phase {:?} after {} runs (score {})",
        state.phase,
        runs,
        state.player.score()
    );
    println!("{}", serde_json::to_string_pretty(&state.snapshot())?);
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        log::error!("{}", err);
        eprintln!("room-crawler: {}", err);
        std::process::exit(1);
    }
}
