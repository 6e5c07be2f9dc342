//! Per-tick stages that operate on the simulation world.
//!
//! Stages collect the component data they need into items, hand the items
//! to the `Executor`, and write the results back serially. Structural
//! changes are returned as a `MutationLog` for the flush point.

pub mod alerts;
pub mod cleanup;
pub mod collision;
pub mod explosion;
pub mod guide_movement;
pub mod snapshot;
pub mod spawner;
pub mod stabilization;
