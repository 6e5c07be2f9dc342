//! Flush point: the one place per tick where the world changes shape.
//!
//! Applies the tick's mutation log, removes marked pairs, settles the pairs
//! instantiated at the previous flush, and instantiates new flights and
//! explosions.

use hecs::{Entity, World};

use skyways_core::components::*;
use skyways_core::config::StabilizerGains;
use skyways_core::events::SimEvent;
use skyways_core::state::FlightStats;
use skyways_core::types::Transform;

use crate::mutation::{DespawnReason, Mutation, MutationLog};
use crate::population::PopulationCounter;
use crate::world_setup::{self, FlightPlan};

/// Apply `log` and update the world's population. Uses a pre-allocated
/// buffer to avoid per-tick allocation.
pub fn flush(
    world: &mut World,
    log: MutationLog,
    population: &PopulationCounter,
    gains: StabilizerGains,
    events: &mut Vec<SimEvent>,
    stats: &mut FlightStats,
    despawn_buffer: &mut Vec<Entity>,
) {
    let mut spawns: Vec<FlightPlan> = Vec::new();
    let mut explosions = Vec::new();

    // 1. Apply the log.
    for mutation in log {
        match mutation {
            Mutation::SetAlert {
                guide,
                threat_position,
            } => {
                let _ = world.insert_one(guide, Alert { threat_position });
            }
            Mutation::ClearAlert { guide } => {
                let _ = world.remove_one::<Alert>(guide);
            }
            Mutation::MarkDespawn { guide, reason } => {
                mark_despawn(world, guide, reason, events, stats);
            }
            Mutation::SpawnFlight(plan) => spawns.push(plan),
            Mutation::SpawnExplosion {
                position,
                start_time,
            } => explosions.push((position, start_time)),
        }
    }

    // 2. Despawn marked pairs.
    despawn_buffer.clear();
    let mut released = 0u32;
    for (guide, pair) in world.query::<&Guide>().with::<&ShouldDespawn>().iter() {
        despawn_buffer.push(guide);
        despawn_buffer.push(pair.plane);
        released += 1;
    }
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    if released > 0 {
        population.release(released);
        log::debug!("Despawned {} flights", released);
    }

    // 3. Settle the pairs instantiated at the previous flush.
    fix_up_spawned(world);

    // 4. Instantiate new flights and explosions.
    for plan in &spawns {
        let (guide, plane) = world_setup::spawn_flight(world, plan, gains);
        stats.spawned += 1;
        events.push(SimEvent::FlightSpawned {
            guide: guide.to_bits().get(),
            plane: plane.to_bits().get(),
            origin_airport: plan.origin_airport,
            end_point: plan.path.end_point,
            target_altitude: plan.path.target_altitude,
        });
        log::debug!(
            "Flight {:?} departed airport {} (altitude {:.2})",
            guide,
            plan.origin_airport,
            plan.path.target_altitude
        );
    }
    for (position, start_time) in explosions {
        world_setup::spawn_explosion(world, position, start_time);
    }
}

/// Tag a live guide with `ShouldDespawn`. A guide marked twice in one tick
/// is counted once.
fn mark_despawn(
    world: &mut World,
    guide: Entity,
    reason: DespawnReason,
    events: &mut Vec<SimEvent>,
    stats: &mut FlightStats,
) {
    if world.get::<&ShouldDespawn>(guide).is_ok() {
        return;
    }
    let Ok(position) = world.get::<&Transform>(guide).map(|t| t.position) else {
        return;
    };
    if world.insert_one(guide, ShouldDespawn).is_err() {
        return;
    }

    match reason {
        DespawnReason::Landed => {
            stats.landed += 1;
            events.push(SimEvent::FlightLanded {
                guide: guide.to_bits().get(),
                position,
            });
        }
        DespawnReason::Collided => stats.collided += 1,
    }
}

/// Copy each new plane's guide transform onto it, zero its velocities, and
/// clear `JustSpawned` from every entity.
pub fn fix_up_spawned(world: &mut World) {
    let fixups: Vec<(Entity, Option<Transform>)> = world
        .query::<&Stabilizer>()
        .with::<&JustSpawned>()
        .iter()
        .map(|(plane, stabilizer)| {
            let guide_transform = world.get::<&Transform>(stabilizer.guide).ok().map(|t| *t);
            (plane, guide_transform)
        })
        .collect();

    for (plane, guide_transform) in fixups {
        if let Ok((transform, body)) = world.query_one_mut::<(&mut Transform, &mut Body)>(plane) {
            if let Some(guide_transform) = guide_transform {
                *transform = guide_transform;
            }
            *body = Body::default();
        }
    }

    let marked: Vec<Entity> = world
        .query::<&JustSpawned>()
        .iter()
        .map(|(entity, _)| entity)
        .collect();
    for entity in marked {
        let _ = world.remove_one::<JustSpawned>(entity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn plan() -> FlightPlan {
        FlightPlan {
            origin_airport: 2,
            transform: Transform::from_position(Vec3::new(0.0, 101.0, 0.0)),
            path: GuidePath {
                end_point: Vec3::new(100.0, 0.0, 0.0),
                target_altitude: 2.0,
            },
        }
    }

    #[test]
    fn test_spawn_then_fix_up_next_flush() {
        let mut world = World::new();
        let population = PopulationCounter::new(10);
        let mut events = Vec::new();
        let mut stats = FlightStats::default();
        let mut buffer = Vec::new();

        let mut log = MutationLog::new();
        log.push(Mutation::SpawnFlight(plan()));
        population.try_reserve();
        population.commit();
        flush(&mut world, log, &population, StabilizerGains::default(), &mut events, &mut stats, &mut buffer);

        assert_eq!(stats.spawned, 1);
        assert_eq!(events.len(), 1);
        assert_eq!(world.query::<&JustSpawned>().iter().count(), 2);

        // The plane drifted; the next flush snaps it back onto its guide.
        let (guide, pair) = {
            let mut q = world.query::<&Guide>();
            let (g, pair) = q.iter().next().unwrap();
            (g, *pair)
        };
        {
            let mut body = world.get::<&mut Body>(pair.plane).unwrap();
            body.angular_velocity = Vec3::ONE;
            body.fall_velocity = Vec3::NEG_Y;
        }
        world.get::<&mut Transform>(pair.plane).unwrap().position = Vec3::ZERO;

        flush(&mut world, MutationLog::new(), &population, StabilizerGains::default(), &mut events, &mut stats, &mut buffer);
        assert_eq!(world.query::<&JustSpawned>().iter().count(), 0);
        assert_eq!(
            world.get::<&Transform>(pair.plane).unwrap().position,
            world.get::<&Transform>(guide).unwrap().position
        );
        assert_eq!(*world.get::<&Body>(pair.plane).unwrap(), Body::default());
    }

    #[test]
    fn test_despawn_releases_population_once() {
        let mut world = World::new();
        let population = PopulationCounter::new(10);
        population.try_reserve();
        population.commit();
        let (guide, plane) = world_setup::spawn_flight(&mut world, &plan(), StabilizerGains::default());

        let mut events = Vec::new();
        let mut stats = FlightStats::default();
        let mut buffer = Vec::new();
        let mut log = MutationLog::new();
        for reason in [DespawnReason::Collided, DespawnReason::Collided] {
            log.push(Mutation::MarkDespawn { guide, reason });
        }
        flush(&mut world, log, &population, StabilizerGains::default(), &mut events, &mut stats, &mut buffer);

        assert!(!world.contains(guide));
        assert!(!world.contains(plane));
        assert_eq!(population.current(), 0);
        assert_eq!(stats.collided, 1, "double-marked guide counts once");
    }

    #[test]
    fn test_clear_alert_and_landing_event() {
        let mut world = World::new();
        let population = PopulationCounter::new(10);
        population.try_reserve();
        population.commit();
        let (guide, _plane) = world_setup::spawn_flight(&mut world, &plan(), StabilizerGains::default());
        world
            .insert_one(guide, Alert { threat_position: Vec3::ZERO })
            .unwrap();

        let mut events = Vec::new();
        let mut stats = FlightStats::default();
        let mut buffer = Vec::new();
        let mut log = MutationLog::new();
        log.push(Mutation::ClearAlert { guide });
        flush(&mut world, log, &population, StabilizerGains::default(), &mut events, &mut stats, &mut buffer);
        assert!(world.get::<&Alert>(guide).is_err());

        let mut log = MutationLog::new();
        log.push(Mutation::MarkDespawn {
            guide,
            reason: DespawnReason::Landed,
        });
        flush(&mut world, log, &population, StabilizerGains::default(), &mut events, &mut stats, &mut buffer);
        assert_eq!(stats.landed, 1);
        assert!(matches!(events.last(), Some(SimEvent::FlightLanded { .. })));
    }

    #[test]
    fn test_dangling_mutations_are_noops() {
        let mut world = World::new();
        let population = PopulationCounter::new(10);
        let ghost = world.spawn((Transform::default(),));
        world.despawn(ghost).unwrap();

        let mut log = MutationLog::new();
        log.push(Mutation::ClearAlert { guide: ghost });
        log.push(Mutation::MarkDespawn {
            guide: ghost,
            reason: DespawnReason::Landed,
        });
        let mut events = Vec::new();
        let mut stats = FlightStats::default();
        let mut buffer = Vec::new();
        flush(&mut world, log, &population, StabilizerGains::default(), &mut events, &mut stats, &mut buffer);
        assert_eq!(stats, FlightStats::default());
        assert!(events.is_empty());
    }
}
