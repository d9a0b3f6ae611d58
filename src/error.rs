//! Error types
//!
//! The simulation itself is closed-world and never fails at runtime. Errors
//! only surface while loading tuning data or assembling the room graph.

use crate::sim::RoomId;

/// Errors raised while configuring a simulation
#[derive(thiserror::Error, Debug)]
pub enum SimError {
    /// A neighbor link points at a room that is not part of the graph
    #[error("room {room} links to unknown room {neighbor}")]
    UnknownRoom { room: RoomId, neighbor: RoomId },

    /// The start room is not part of the graph
    #[error("start room {0} does not exist")]
    MissingStartRoom(RoomId),

    /// Two rooms were registered under the same id
    #[error("room id {0} is used more than once")]
    DuplicateRoom(RoomId),

    /// Tuning JSON could not be parsed
    #[error("invalid tuning: {0}")]
    InvalidTuning(#[from] serde_json::Error),

    /// Tuning file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type used by configuration entry points
pub type SimResult<T> = Result<T, SimError>;
