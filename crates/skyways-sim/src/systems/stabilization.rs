//! Stabilization: steers each plane's angular velocity toward its guide's
//! freshly computed orientation.

use glam::{Quat, Vec3};
use hecs::{Entity, World};

use skyways_core::components::{Body, JustSpawned, Stabilizer};
use skyways_core::config::StabilizerGains;
use skyways_core::types::Transform;
use skyways_flight::stabilize;

use crate::execution::Executor;

#[derive(Debug, Clone, Copy)]
pub struct PlaneItem {
    pub entity: Entity,
    pub rotation: Quat,
    pub angular_velocity: Vec3,
    pub gains: StabilizerGains,
    /// Guide orientation; `None` when the guide no longer exists.
    pub target: Option<Quat>,
}

pub fn run(world: &mut World, executor: &Executor, dt: f32) {
    let mut items: Vec<PlaneItem> = world
        .query::<(&Transform, &Body, &Stabilizer)>()
        .without::<&JustSpawned>()
        .iter()
        .map(|(entity, (transform, body, stabilizer))| PlaneItem {
            entity,
            rotation: transform.rotation,
            angular_velocity: body.angular_velocity,
            gains: stabilizer.gains,
            target: world
                .get::<&Transform>(stabilizer.guide)
                .ok()
                .map(|t| t.rotation),
        })
        .collect();

    let log = executor.run(&mut items, |item, _log| {
        if let Some(target) = item.target {
            item.angular_velocity =
                stabilize(item.rotation, target, item.angular_velocity, &item.gains, dt);
        }
    });
    debug_assert!(log.is_empty(), "stabilization records no mutations");

    for item in &items {
        if let Ok(body) = world.query_one_mut::<&mut Body>(item.entity) {
            body.angular_velocity = item.angular_velocity;
        }
    }
}
