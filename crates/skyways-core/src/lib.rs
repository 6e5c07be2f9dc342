//! Core types and definitions for the SKYWAYS simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometric types, components, commands, state snapshots, events,
//! constants, and the process-wide configuration.
//! It contains no simulation logic.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
