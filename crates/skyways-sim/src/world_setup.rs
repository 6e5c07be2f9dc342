//! Entity spawn factories for setting up the simulation world.
//!
//! Creates airports at startup, and guide/plane pairs and explosions when
//! the flush point instantiates them.

use glam::Vec3;
use hecs::{Entity, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use skyways_core::components::*;
use skyways_core::config::{FlightParams, SimConfig, StabilizerGains};
use skyways_core::enums::FlightPhase;
use skyways_core::types::{Planet, Transform};
use skyways_flight::geometry::{angle_between, any_perpendicular, look_rotation, tangent_component};
use skyways_flight::sphere::fibonacci_sphere;

/// Per-airport spawn RNG. Each airport draws from its own ChaCha stream so
/// departures do not depend on the order airports are processed in.
#[derive(Debug, Clone)]
pub struct AirportRng(pub ChaCha8Rng);

/// Everything needed to instantiate one guide/plane pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightPlan {
    pub origin_airport: u32,
    /// Shared initial transform of guide and plane.
    pub transform: Transform,
    pub path: GuidePath,
}

/// Place `config.airport_count` airports over the planet surface.
///
/// Returns airport positions in index order.
pub fn setup_airports(
    world: &mut World,
    planet: &Planet,
    config: &SimConfig,
    rng: &mut ChaCha8Rng,
) -> Vec<Vec3> {
    let directions = fibonacci_sphere(config.airport_count as usize);
    let mut positions = Vec::with_capacity(directions.len());

    for (index, direction) in directions.into_iter().enumerate() {
        let position = planet.surface_point(direction);
        let rotation = look_rotation(any_perpendicular(direction), direction);
        let next_spawn_time =
            rng.gen_range(config.initial_spawn_delay_min..=config.initial_spawn_delay_max);

        let mut stream = ChaCha8Rng::seed_from_u64(config.seed);
        stream.set_stream(index as u64 + 1);

        world.spawn((
            Airport {
                index: index as u32,
                next_spawn_time,
            },
            Transform::new(position, rotation),
            AirportRng(stream),
        ));
        positions.push(position);
    }

    log::info!("Placed {} airports on planet of radius {}", positions.len(), planet.radius);
    positions
}

/// Build the departure of a flight from `origin` to `destination`.
///
/// The flight starts `spawn_height` above the origin, facing along the
/// surface toward the destination, and cruises at a random fraction of the
/// great-circle distance between the two airports.
pub fn plan_flight(
    origin_airport: u32,
    origin: Vec3,
    destination: Vec3,
    planet: &Planet,
    params: &FlightParams,
    rng: &mut ChaCha8Rng,
) -> FlightPlan {
    let up = planet.up_at(origin);
    let position = origin + up * params.spawn_height;

    let forward = tangent_component(destination - position, up)
        .try_normalize()
        .unwrap_or_else(|| any_perpendicular(up));

    let distance = planet.radius * angle_between(up, planet.up_at(destination));
    let target_altitude = rng.gen_range(
        params.altitude_fraction_min * distance..=params.altitude_fraction_max * distance,
    );

    FlightPlan {
        origin_airport,
        transform: Transform::new(position, look_rotation(forward, up)),
        path: GuidePath {
            end_point: destination,
            target_altitude,
        },
    }
}

/// Instantiate a guide and its plane, fully placed and marked `JustSpawned`.
pub fn spawn_flight(world: &mut World, plan: &FlightPlan, gains: StabilizerGains) -> (Entity, Entity) {
    let guide = world.reserve_entity();
    let plane = world.spawn((
        plan.transform,
        Body::default(),
        Stabilizer { guide, gains },
        JustSpawned,
    ));
    world.spawn_at(
        guide,
        (
            plan.transform,
            plan.path,
            Guide { plane },
            FlightPhase::default(),
            JustSpawned,
        ),
    );
    (guide, plane)
}

/// Spawn an explosion actor at `position`.
pub fn spawn_explosion(world: &mut World, position: Vec3, start_time: f64) -> Entity {
    world.spawn((Transform::from_position(position), Explosion { start_time }))
}
