//! Room Crawler - a side-scrolling action game over a graph of rooms
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, combat, room graph, game state)
//! - `tuning`: Data-driven game balance
//! - `error`: Configuration errors
//!
//! Rendering and raw input live outside this crate. They feed [`sim::TickInput`]
//! into [`sim::tick`] and draw from [`sim::Snapshot`].

pub mod error;
pub mod sim;
pub mod tuning;

pub use error::{SimError, SimResult};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (30 Hz)
    pub const SIM_DT: f32 = 1.0 / 30.0;
}
