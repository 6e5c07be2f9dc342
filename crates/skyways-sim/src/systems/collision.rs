//! Collision resolution: planes that touch are destroyed and leave an explosion.
//!
//! Pairs that were instantiated at the last flush are skipped; the grace
//! tick lets the fix-up place them before they can collide.

use hecs::{Entity, World};

use skyways_core::components::{JustSpawned, Stabilizer};
use skyways_core::events::SimEvent;

use crate::execution::Executor;
use crate::mutation::{DespawnReason, Mutation, MutationLog};
use crate::physics::CollisionEvent;

#[derive(Debug, Clone, Copy)]
pub struct ContactItem {
    pub event: CollisionEvent,
    /// Set when the contact was acted on.
    pub resolved: bool,
}

pub struct CollisionContext<'a> {
    pub world: &'a World,
    pub elapsed: f64,
    pub despawn_on_collision: bool,
    pub spawn_explosions: bool,
}

/// Resolve this tick's contacts. Returns the mutations and one
/// `MidAirCollision` event per resolved contact.
pub fn run(
    executor: &Executor,
    contacts: &[CollisionEvent],
    ctx: &CollisionContext,
) -> (MutationLog, Vec<SimEvent>) {
    let mut items: Vec<ContactItem> = contacts
        .iter()
        .map(|&event| ContactItem {
            event,
            resolved: false,
        })
        .collect();

    let log = executor.run(&mut items, |item, log| resolve(item, ctx, log));

    let events = items
        .iter()
        .filter(|item| item.resolved)
        .map(|item| SimEvent::MidAirCollision {
            plane_a: item.event.a.to_bits().get(),
            plane_b: item.event.b.to_bits().get(),
            contact: item.event.contact,
        })
        .collect();
    (log, events)
}

fn just_spawned(world: &World, entity: Entity) -> bool {
    world.get::<&JustSpawned>(entity).is_ok()
}

pub fn resolve(item: &mut ContactItem, ctx: &CollisionContext, log: &mut MutationLog) {
    let world = ctx.world;
    let CollisionEvent { a, b, contact } = item.event;
    if just_spawned(world, a) || just_spawned(world, b) {
        return;
    }
    let (Ok(guide_a), Ok(guide_b)) = (
        world.get::<&Stabilizer>(a).map(|s| s.guide),
        world.get::<&Stabilizer>(b).map(|s| s.guide),
    ) else {
        return;
    };
    if just_spawned(world, guide_a) || just_spawned(world, guide_b) {
        return;
    }

    item.resolved = true;
    if ctx.despawn_on_collision {
        for guide in [guide_a, guide_b] {
            log.push(Mutation::MarkDespawn {
                guide,
                reason: DespawnReason::Collided,
            });
        }
    }
    if ctx.spawn_explosions {
        log.push(Mutation::SpawnExplosion {
            position: contact,
            start_time: ctx.elapsed,
        });
    }
}
