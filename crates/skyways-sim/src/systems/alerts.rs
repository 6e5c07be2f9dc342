//! Proximity alerts: turns trigger overlaps into avoidance directives.

use hecs::World;

use skyways_core::components::{Alert, Stabilizer};
use skyways_core::types::Transform;

use crate::execution::Executor;
use crate::mutation::{Mutation, MutationLog};
use crate::physics::TriggerEvent;

/// Emit a `SetAlert` for each guide whose plane overlaps another plane.
pub fn run(world: &World, executor: &Executor, triggers: &[TriggerEvent]) -> MutationLog {
    let mut items = triggers.to_vec();
    executor.run(&mut items, |event, log| detect(world, event, log))
}

/// Each side of the overlap is told about the other plane's position.
/// Overlaps involving anything other than two stabilized planes are ignored.
pub fn detect(world: &World, event: &TriggerEvent, log: &mut MutationLog) {
    let (Ok(stab_a), Ok(stab_b)) = (
        world.get::<&Stabilizer>(event.a),
        world.get::<&Stabilizer>(event.b),
    ) else {
        return;
    };
    let (Ok(pos_a), Ok(pos_b)) = (
        world.get::<&Transform>(event.a).map(|t| t.position),
        world.get::<&Transform>(event.b).map(|t| t.position),
    ) else {
        return;
    };

    log.push(Mutation::SetAlert {
        guide: stab_a.guide,
        threat_position: pos_b,
    });
    log.push(Mutation::SetAlert {
        guide: stab_b.guide,
        threat_position: pos_a,
    });
}

/// Apply the alert log at the stage barrier so movement sees this tick's
/// alerts. Anything else in the log is returned for the flush point.
pub fn apply_barrier(world: &mut World, log: MutationLog) -> MutationLog {
    let mut deferred = MutationLog::new();
    for mutation in log {
        match mutation {
            Mutation::SetAlert {
                guide,
                threat_position,
            } => {
                // Dangling guide: nothing to alert.
                let _ = world.insert_one(guide, Alert { threat_position });
            }
            other => deferred.push(other),
        }
    }
    deferred
}
