//! Control commands sent to the simulation.
//!
//! Commands are queued and applied at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::ExecutionMode;

/// All runtime controls.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimCommand {
    /// Stop advancing time.
    Pause,
    /// Resume advancing time.
    Resume,
    /// Set time scale (1.0 = normal, 2.0 = double).
    SetTimeScale { scale: f64 },
    /// Switch the execution strategy for subsequent ticks.
    SetExecutionMode { mode: ExecutionMode },
}
