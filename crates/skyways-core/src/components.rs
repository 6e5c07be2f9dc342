//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Flight logic lives in `skyways-flight`; per-tick systems in `skyways-sim`.

use glam::Vec3;
use hecs::Entity;
use serde::{Deserialize, Serialize};

use crate::config::StabilizerGains;

/// A departure point on the planet surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    /// Slot in the deterministic surface placement.
    pub index: u32,
    /// Elapsed time at which the next flight may depart.
    pub next_spawn_time: f64,
}

/// Where a guide is heading and how high it cruises.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuidePath {
    /// Destination surface point (world coordinates).
    pub end_point: Vec3,
    /// Cruise height above the surface.
    pub target_altitude: f32,
}

/// Marks the kinematic half of a flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Guide {
    /// The physically simulated plane paired with this guide.
    pub plane: Entity,
}

/// Collision-avoidance directive. Present only while a threat is close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub threat_position: Vec3,
}

/// Velocity state integrated by the physics collaborator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Tether velocity plus `fall_velocity`, as integrated last step.
    pub linear_velocity: Vec3,
    pub angular_velocity: Vec3,
    /// Velocity accumulated from radial gravity. Persists between steps.
    pub fall_velocity: Vec3,
}

/// Steers a plane toward its guide's orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stabilizer {
    pub guide: Entity,
    pub gains: StabilizerGains,
}

/// Transient explosion actor left by a mid-air collision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Explosion {
    /// Elapsed time at which the explosion appeared.
    pub start_time: f64,
}

/// Remove this guide and its plane at the next flush point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShouldDespawn;

/// Instantiated at the last flush; excluded from movement, physics and
/// collisions until the next flush copies the guide transform onto the plane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JustSpawned;
