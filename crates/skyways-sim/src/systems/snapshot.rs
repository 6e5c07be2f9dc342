//! Snapshot system: queries the ECS world and builds a complete SimSnapshot.
//!
//! Read-only: it never modifies the world.

use hecs::World;

use skyways_core::components::*;
use skyways_core::enums::*;
use skyways_core::events::SimEvent;
use skyways_core::state::*;
use skyways_core::types::{Planet, SimTime, Transform};

/// Engine-level state copied into every snapshot.
#[derive(Debug, Clone, Copy)]
pub struct SnapshotHeader {
    pub time: SimTime,
    pub run_state: RunState,
    pub execution_mode: ExecutionMode,
    pub population: PopulationView,
    pub planet: Planet,
    pub stats: FlightStats,
}

/// Build a complete SimSnapshot from the current world state.
pub fn build_snapshot(world: &World, header: &SnapshotHeader, events: Vec<SimEvent>) -> SimSnapshot {
    SimSnapshot {
        time: header.time,
        run_state: header.run_state,
        execution_mode: header.execution_mode,
        population: header.population,
        planet: header.planet,
        airports: build_airports(world),
        guides: build_guides(world),
        planes: build_planes(world),
        explosions: build_explosions(world, header.time.elapsed_secs),
        events,
        stats: header.stats,
    }
}

fn build_airports(world: &World) -> Vec<AirportView> {
    let mut airports: Vec<AirportView> = world
        .query::<(&Airport, &Transform)>()
        .iter()
        .map(|(_, (airport, transform))| AirportView {
            index: airport.index,
            position: transform.position,
            next_spawn_time: airport.next_spawn_time,
        })
        .collect();
    airports.sort_by_key(|a| a.index);
    airports
}

fn build_guides(world: &World) -> Vec<GuideView> {
    let mut guides: Vec<GuideView> = world
        .query::<(
            &Transform,
            &GuidePath,
            &Guide,
            &FlightPhase,
            Option<&Alert>,
            Option<&JustSpawned>,
            Option<&ShouldDespawn>,
        )>()
        .iter()
        .map(
            |(entity, (transform, path, guide, phase, alert, just_spawned, should_despawn))| {
                GuideView {
                    id: entity.to_bits().get(),
                    plane: guide.plane.to_bits().get(),
                    position: transform.position,
                    rotation: transform.rotation,
                    phase: *phase,
                    end_point: path.end_point,
                    target_altitude: path.target_altitude,
                    alert: alert.map(|a| a.threat_position),
                    just_spawned: just_spawned.is_some(),
                    should_despawn: should_despawn.is_some(),
                }
            },
        )
        .collect();
    guides.sort_by_key(|g| g.id);
    guides
}

fn build_planes(world: &World) -> Vec<PlaneView> {
    let mut planes: Vec<PlaneView> = world
        .query::<(&Transform, &Body, &Stabilizer)>()
        .iter()
        .map(|(entity, (transform, body, stabilizer))| PlaneView {
            id: entity.to_bits().get(),
            guide: stabilizer.guide.to_bits().get(),
            position: transform.position,
            rotation: transform.rotation,
            angular_velocity: body.angular_velocity,
        })
        .collect();
    planes.sort_by_key(|p| p.id);
    planes
}

fn build_explosions(world: &World, elapsed: f64) -> Vec<ExplosionView> {
    let mut explosions: Vec<ExplosionView> = world
        .query::<(&Transform, &Explosion)>()
        .iter()
        .map(|(entity, (transform, explosion))| ExplosionView {
            id: entity.to_bits().get(),
            position: transform.position,
            age: elapsed - explosion.start_time,
        })
        .collect();
    explosions.sort_by_key(|e| e.id);
    explosions
}
