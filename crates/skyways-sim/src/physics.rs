//! Minimal rigid-body collaborator for planes.
//!
//! Planes are tethered to their guides: linear velocity is driven toward the
//! guide position on top of any fall accumulated from radial gravity, and
//! rotation is integrated from the angular velocity the stabilizer wrote. Overlap detection uses a uniform grid hash and emits
//! trigger (proximity) and contact (collision) events sorted by entity bits.

use std::collections::HashMap;

use glam::Vec3;
use hecs::{Entity, World};

use skyways_core::components::{Body, JustSpawned, Stabilizer};
use skyways_core::config::SimConfig;
use skyways_core::types::{Planet, Transform};
use skyways_flight::stabilizer::integrate_rotation;

/// Two planes' proximity triggers overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerEvent {
    pub a: Entity,
    pub b: Entity,
}

/// Two planes' bodies touch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    pub a: Entity,
    pub b: Entity,
    /// Midpoint between the two bodies.
    pub contact: Vec3,
}

/// Events produced by one physics step.
#[derive(Debug, Clone, Default)]
pub struct PhysicsEvents {
    pub triggers: Vec<TriggerEvent>,
    pub contacts: Vec<CollisionEvent>,
}

type Cell = (i32, i32, i32);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsWorld {
    pub tether_rate: f32,
    pub gravity_acceleration: f32,
    pub body_radius: f32,
    pub trigger_radius: f32,
}

impl PhysicsWorld {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            tether_rate: config.tether_rate,
            gravity_acceleration: config.gravity_acceleration,
            body_radius: config.body_radius,
            trigger_radius: config.trigger_radius,
        }
    }

    /// Integrate every settled plane and report overlaps.
    pub fn step(&self, world: &mut World, planet: &Planet, dt: f32) -> PhysicsEvents {
        self.integrate(world, planet, dt);
        self.detect_overlaps(world)
    }

    fn integrate(&self, world: &mut World, planet: &Planet, dt: f32) {
        let tethers: Vec<(Entity, Option<Vec3>)> = world
            .query::<&Stabilizer>()
            .without::<&JustSpawned>()
            .iter()
            .map(|(plane, stabilizer)| {
                let guide_position = world
                    .get::<&Transform>(stabilizer.guide)
                    .ok()
                    .map(|t| t.position);
                (plane, guide_position)
            })
            .collect();

        // A rate above 1/dt would overshoot the guide in one step.
        let rate = if dt > 0.0 {
            self.tether_rate.min(1.0 / dt)
        } else {
            self.tether_rate
        };

        for (plane, guide_position) in tethers {
            let Ok((transform, body)) = world.query_one_mut::<(&mut Transform, &mut Body)>(plane)
            else {
                continue;
            };
            if self.gravity_acceleration != 0.0 {
                body.fall_velocity -= planet.up_at(transform.position) * self.gravity_acceleration * dt;
            }
            // The tether is recomputed every step; the fall keeps building.
            let tether = guide_position.map_or(Vec3::ZERO, |target| (target - transform.position) * rate);
            body.linear_velocity = tether + body.fall_velocity;
            transform.position += body.linear_velocity * dt;
            transform.rotation = integrate_rotation(transform.rotation, body.angular_velocity, dt);
        }
    }

    fn detect_overlaps(&self, world: &World) -> PhysicsEvents {
        let mut events = PhysicsEvents::default();

        let bodies: Vec<(Entity, Vec3)> = world
            .query::<(&Transform, &Stabilizer)>()
            .without::<&JustSpawned>()
            .iter()
            .map(|(entity, (transform, _))| (entity, transform.position))
            .collect();

        let trigger_reach = 2.0 * self.trigger_radius;
        let contact_reach = 2.0 * self.body_radius;
        let cell_size = trigger_reach.max(contact_reach);
        if cell_size <= 0.0 || bodies.len() < 2 {
            return events;
        }

        let cell_of = |p: Vec3| -> Cell {
            let c = (p / cell_size).floor();
            (c.x as i32, c.y as i32, c.z as i32)
        };

        let mut grid: HashMap<Cell, Vec<usize>> = HashMap::new();
        for (i, (_, position)) in bodies.iter().enumerate() {
            grid.entry(cell_of(*position)).or_default().push(i);
        }

        for (i, &(entity_a, pos_a)) in bodies.iter().enumerate() {
            let (cx, cy, cz) = cell_of(pos_a);
            for dx in -1..=1 {
                for dy in -1..=1 {
                    for dz in -1..=1 {
                        let Some(members) = grid.get(&(cx + dx, cy + dy, cz + dz)) else {
                            continue;
                        };
                        for &j in members {
                            if j <= i {
                                continue;
                            }
                            let (entity_b, pos_b) = bodies[j];
                            let distance = pos_a.distance(pos_b);
                            let (a, b) = ordered(entity_a, entity_b);
                            if distance < trigger_reach {
                                events.triggers.push(TriggerEvent { a, b });
                            }
                            if distance < contact_reach {
                                events.contacts.push(CollisionEvent {
                                    a,
                                    b,
                                    contact: (pos_a + pos_b) * 0.5,
                                });
                            }
                        }
                    }
                }
            }
        }

        events.triggers.sort_by_key(|e| pair_key(e.a, e.b));
        events.contacts.sort_by_key(|e| pair_key(e.a, e.b));
        events
    }
}

fn ordered(a: Entity, b: Entity) -> (Entity, Entity) {
    if a.to_bits() <= b.to_bits() {
        (a, b)
    } else {
        (b, a)
    }
}

fn pair_key(a: Entity, b: Entity) -> (u64, u64) {
    (a.to_bits().get(), b.to_bits().get())
}
