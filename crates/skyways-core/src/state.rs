//! Simulation snapshot: the complete visible state produced after each tick.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::types::{Planet, SimTime};

/// Complete simulation state returned by `SimulationEngine::tick`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub time: SimTime,
    pub run_state: RunState,
    pub execution_mode: ExecutionMode,
    pub population: PopulationView,
    pub planet: Planet,
    pub airports: Vec<AirportView>,
    pub guides: Vec<GuideView>,
    pub planes: Vec<PlaneView>,
    pub explosions: Vec<ExplosionView>,
    /// Events raised during this tick only.
    pub events: Vec<SimEvent>,
    pub stats: FlightStats,
}

/// Live pair count against the cap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationView {
    pub current: u32,
    pub max: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirportView {
    pub index: u32,
    pub position: Vec3,
    pub next_spawn_time: f64,
}

/// A guide as seen by renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuideView {
    pub id: u64,
    pub plane: u64,
    pub position: Vec3,
    pub rotation: Quat,
    pub phase: FlightPhase,
    pub end_point: Vec3,
    pub target_altitude: f32,
    /// Threat position while an alert is active.
    pub alert: Option<Vec3>,
    pub just_spawned: bool,
    pub should_despawn: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaneView {
    pub id: u64,
    pub guide: u64,
    pub position: Vec3,
    pub rotation: Quat,
    pub angular_velocity: Vec3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplosionView {
    pub id: u64,
    pub position: Vec3,
    /// Seconds since the explosion appeared.
    pub age: f64,
}

/// Cumulative flight counters since engine start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightStats {
    pub spawned: u64,
    pub landed: u64,
    /// Planes lost to mid-air collisions.
    pub collided: u64,
}
