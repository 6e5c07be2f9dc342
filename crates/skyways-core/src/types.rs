//! Fundamental geometric and simulation types.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// The sphere every actor flies around.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    pub center: Vec3,
    pub radius: f32,
}

/// Position and orientation of an actor.
///
/// Local +Z is forward and local +Y is up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Planet {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Express a world position relative to the planet center.
    pub fn local(&self, world: Vec3) -> Vec3 {
        world - self.center
    }

    /// Convert a planet-centred position back to world space.
    pub fn world(&self, local: Vec3) -> Vec3 {
        local + self.center
    }

    /// Height of a world position above the surface (negative underground).
    pub fn altitude_of(&self, world: Vec3) -> f32 {
        self.local(world).length() - self.radius
    }

    /// Outward surface normal under a world position.
    pub fn up_at(&self, world: Vec3) -> Vec3 {
        self.local(world).normalize_or(Vec3::Y)
    }

    /// Surface point along the given direction from the center.
    pub fn surface_point(&self, direction: Vec3) -> Vec3 {
        self.center + direction.normalize_or(Vec3::Y) * self.radius
    }
}

impl Default for Planet {
    fn default() -> Self {
        Self::new(Vec3::ZERO, crate::constants::DEFAULT_PLANET_RADIUS)
    }
}

impl Transform {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self::new(position, Quat::IDENTITY)
    }

    /// World-space forward (local +Z).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// World-space up (local +Y).
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::from_position(Vec3::ZERO)
    }
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}
