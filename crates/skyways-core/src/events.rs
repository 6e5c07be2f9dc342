//! Events emitted by the simulation for renderers and debuggers.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Lifecycle events produced during one tick.
///
/// Entity handles are exported as `hecs::Entity::to_bits` values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A guide/plane pair left an airport.
    FlightSpawned {
        guide: u64,
        plane: u64,
        origin_airport: u32,
        end_point: Vec3,
        target_altitude: f32,
    },
    /// A guide reached its end point and was removed.
    FlightLanded { guide: u64, position: Vec3 },
    /// Two planes touched in flight.
    MidAirCollision { plane_a: u64, plane_b: u64, contact: Vec3 },
}
