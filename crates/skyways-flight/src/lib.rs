//! Flight math for SKYWAYS.
//!
//! Pure functions with no ECS dependency: phase selection and bounded-turn
//! navigation over the planet, evasive steering, the orientation
//! stabilizer, and surface sampling. Positions passed in are relative to
//! the planet center.

pub mod avoidance;
pub mod geometry;
pub mod navigation;
pub mod sphere;
pub mod stabilizer;

pub use avoidance::{evasive_step, AvoidanceStep};
pub use navigation::{calculate_next, NavStep};
pub use stabilizer::stabilize;

#[cfg(test)]
mod tests;
