//! Guide movement: advances every settled guide by one tick.
//!
//! Guides with an alert steer away from their threat; all others follow the
//! navigation calculator. A guide that has reached its end point is marked
//! for despawn instead of moving.

use glam::Vec3;
use hecs::{Entity, World};

use skyways_core::components::{Alert, GuidePath, JustSpawned, ShouldDespawn};
use skyways_core::config::FlightParams;
use skyways_core::enums::FlightPhase;
use skyways_core::types::{Planet, Transform};
use skyways_flight::{calculate_next, evasive_step};

use crate::execution::Executor;
use crate::mutation::{DespawnReason, Mutation, MutationLog};

/// Per-guide work item.
#[derive(Debug, Clone, Copy)]
pub struct GuideItem {
    pub entity: Entity,
    pub transform: Transform,
    pub path: GuidePath,
    pub phase: FlightPhase,
    pub alert: Option<Vec3>,
}

pub struct MovementContext<'a> {
    pub planet: Planet,
    pub params: &'a FlightParams,
    pub dt: f32,
}

/// Move all guides, avoidance guides first, and write the new state back.
pub fn run(world: &mut World, executor: &Executor, ctx: &MovementContext) -> MutationLog {
    let mut items: Vec<GuideItem> = world
        .query::<(&Transform, &GuidePath, &FlightPhase, Option<&Alert>)>()
        .without::<&ShouldDespawn>()
        .without::<&JustSpawned>()
        .iter()
        .map(|(entity, (transform, path, phase, alert))| GuideItem {
            entity,
            transform: *transform,
            path: *path,
            phase: *phase,
            alert: alert.map(|a| a.threat_position),
        })
        .collect();
    items.sort_by_key(|item| item.alert.is_none());

    let log = executor.run(&mut items, |item, log| advance(item, ctx, log));

    for item in &items {
        if let Ok((transform, phase)) =
            world.query_one_mut::<(&mut Transform, &mut FlightPhase)>(item.entity)
        {
            *transform = item.transform;
            *phase = item.phase;
        }
    }

    log
}

/// Advance one guide. Positions are converted to planet-centred space for
/// the flight math and back to world space afterwards.
pub fn advance(item: &mut GuideItem, ctx: &MovementContext, log: &mut MutationLog) {
    let planet = &ctx.planet;
    let params = ctx.params;
    let position = planet.local(item.transform.position);
    let end_point = planet.local(item.path.end_point);

    if position.distance(end_point) <= params.landing_tolerance {
        log.push(Mutation::MarkDespawn {
            guide: item.entity,
            reason: DespawnReason::Landed,
        });
        return;
    }

    if position.length() < planet.radius {
        log::warn!(
            "Guide {:?} is below the planet surface (altitude {:.3})",
            item.entity,
            position.length() - planet.radius
        );
    }

    match item.alert {
        Some(threat) => {
            let step = evasive_step(
                position,
                item.transform.rotation,
                planet.local(threat),
                params.speed,
                ctx.dt,
                params,
            );
            item.transform = Transform::new(planet.world(step.position), step.rotation);
            if step.clear_alert {
                log.push(Mutation::ClearAlert { guide: item.entity });
            }
        }
        None => {
            let path = GuidePath {
                end_point,
                ..item.path
            };
            let step = calculate_next(
                position,
                item.transform.rotation,
                &path,
                params.speed,
                planet.radius,
                ctx.dt,
                params,
            );
            item.transform = Transform::new(planet.world(step.position), step.rotation);
            item.phase = step.phase;
        }
    }
}
