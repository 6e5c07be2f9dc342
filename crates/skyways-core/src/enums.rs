//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Flight phase, derived each tick from geometry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlightPhase {
    /// Away from the cruise altitude: climbing to it, or settling down onto it.
    #[default]
    Climbing,
    /// Holding the cruise altitude.
    Cruising,
    /// Inside the descent radius of the destination.
    Descending,
}

/// How per-tick systems distribute their work.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    /// Single pass on the calling thread.
    Sequential,
    /// Single pass on one background task, joined before the next stage.
    Deferred,
    /// Disjoint chunks processed concurrently.
    #[default]
    Parallel,
}

/// Whether the engine advances time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    #[default]
    Running,
    Paused,
}
