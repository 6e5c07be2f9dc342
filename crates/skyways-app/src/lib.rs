//! SKYWAYS headless application.
//!
//! Runs the simulation engine on a fixed-rate game loop thread and exposes
//! a small control surface for sending commands and reading snapshots.

pub mod control;
pub mod game_loop;
pub mod state;

pub use skyways_core as core;
