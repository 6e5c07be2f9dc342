//! Bounded count of live guide/plane pairs.
//!
//! Spawners running concurrently reserve slots with an atomic
//! check-and-increment; the reservations are folded into the running
//! total once per tick. Despawns release slots at the flush point.

use std::sync::atomic::{AtomicU32, Ordering};

#[derive(Debug)]
pub struct PopulationCounter {
    max: u32,
    /// Committed live pairs.
    current: AtomicU32,
    /// Slots reserved since the last commit.
    pending: AtomicU32,
}

impl PopulationCounter {
    pub fn new(max: u32) -> Self {
        Self {
            max,
            current: AtomicU32::new(0),
            pending: AtomicU32::new(0),
        }
    }

    /// Claim one slot if `current + pending < max`.
    pub fn try_reserve(&self) -> bool {
        let current = self.current.load(Ordering::Acquire);
        self.pending
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |pending| {
                (current.saturating_add(pending) < self.max).then_some(pending + 1)
            })
            .is_ok()
    }

    /// Fold this tick's reservations into the total. Returns how many there were.
    pub fn commit(&self) -> u32 {
        let reserved = self.pending.swap(0, Ordering::AcqRel);
        self.current.fetch_add(reserved, Ordering::AcqRel);
        reserved
    }

    /// Return `count` slots after despawns.
    pub fn release(&self, count: u32) {
        let _ = self
            .current
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                Some(current.saturating_sub(count))
            });
    }

    pub fn current(&self) -> u32 {
        self.current.load(Ordering::Acquire)
    }

    pub fn pending(&self) -> u32 {
        self.pending.load(Ordering::Acquire)
    }

    pub fn max(&self) -> u32 {
        self.max
    }
}
