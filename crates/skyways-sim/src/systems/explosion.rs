//! Removes explosions once their lifetime has passed.

use hecs::{Entity, World};

use skyways_core::components::Explosion;

pub fn run(world: &mut World, elapsed: f64, duration: f64, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();
    for (entity, explosion) in world.query_mut::<&Explosion>() {
        if elapsed - explosion.start_time >= duration {
            despawn_buffer.push(entity);
        }
    }
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    use crate::world_setup::spawn_explosion;

    #[test]
    fn test_explosion_expires_after_duration() {
        let mut world = World::new();
        let mut buffer = Vec::new();
        let boom = spawn_explosion(&mut world, Vec3::ZERO, 2.0);

        run(&mut world, 2.5, 1.0, &mut buffer);
        assert!(world.contains(boom), "explosion should live for its full duration");

        run(&mut world, 3.0, 1.0, &mut buffer);
        assert!(!world.contains(boom));
    }
}
