//! Buffered structural changes applied at the tick's flush point.
//!
//! Stages never add, remove or re-tag entities directly. They append to a
//! `MutationLog`, and the engine applies the log serially.

use glam::Vec3;
use hecs::Entity;

use crate::world_setup::FlightPlan;

/// Why a guide is being removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DespawnReason {
    Landed,
    Collided,
}

/// A single deferred change to the world.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// Attach or overwrite a guide's alert. Applied at the alert barrier.
    SetAlert { guide: Entity, threat_position: Vec3 },
    ClearAlert { guide: Entity },
    MarkDespawn { guide: Entity, reason: DespawnReason },
    SpawnFlight(FlightPlan),
    SpawnExplosion { position: Vec3, start_time: f64 },
}

/// Ordered list of mutations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MutationLog {
    entries: Vec<Mutation>,
}

/// The log written by one partition, tagged with its chunk index.
#[derive(Debug, Default)]
pub struct ChunkLog {
    pub index: usize,
    pub log: MutationLog,
}

impl MutationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mutation: Mutation) {
        self.entries.push(mutation);
    }

    /// Move every entry of `other` to the end of this log.
    pub fn append(&mut self, mut other: MutationLog) {
        self.entries.append(&mut other.entries);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Mutation> {
        self.entries.iter()
    }

    /// Concatenate per-chunk logs in chunk-index order.
    pub fn merge(mut chunks: Vec<ChunkLog>) -> Self {
        chunks.sort_by_key(|chunk| chunk.index);
        let mut merged = Self::new();
        for chunk in chunks {
            merged.append(chunk.log);
        }
        merged
    }
}

impl IntoIterator for MutationLog {
    type Item = Mutation;
    type IntoIter = std::vec::IntoIter<Mutation>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Extend<Mutation> for MutationLog {
    fn extend<I: IntoIterator<Item = Mutation>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}
