//! Simulation engine for SKYWAYS.
//!
//! Owns the hecs ECS world, runs the per-tick stages under the selected
//! execution strategy, and produces `SimSnapshot`s.

pub mod engine;
pub mod execution;
pub mod mutation;
pub mod physics;
pub mod population;
pub mod systems;
pub mod world_setup;

pub use engine::SimulationEngine;
pub use skyways_core as core;
