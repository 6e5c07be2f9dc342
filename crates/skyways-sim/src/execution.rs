//! Execution strategies for per-tick stages.
//!
//! Every stage is written once as an item closure. `Executor::run` decides
//! whether the items are processed inline, as one task on the rayon pool,
//! or in parallel chunks. The returned log is in item order for all three.

use rayon::prelude::*;

use skyways_core::enums::ExecutionMode;

use crate::mutation::{ChunkLog, MutationLog};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Executor {
    pub mode: ExecutionMode,
    /// Items per chunk in `Parallel` mode.
    pub partition_size: usize,
}

impl Executor {
    pub fn new(mode: ExecutionMode, partition_size: usize) -> Self {
        Self {
            mode,
            partition_size: partition_size.max(1),
        }
    }

    /// Apply `f` to every item and collect the mutations it records.
    ///
    /// `f` may only read shared state; anything structural goes in the log.
    pub fn run<T, F>(&self, items: &mut [T], f: F) -> MutationLog
    where
        T: Send,
        F: Fn(&mut T, &mut MutationLog) + Sync,
    {
        match self.mode {
            ExecutionMode::Sequential => run_pass(items, &f),
            ExecutionMode::Deferred => {
                // One task on the shared pool; the scope joins it before returning.
                let mut log = MutationLog::new();
                rayon::scope(|scope| {
                    scope.spawn(|_| log = run_pass(items, &f));
                });
                log
            }
            ExecutionMode::Parallel => {
                let chunks: Vec<ChunkLog> = items
                    .par_chunks_mut(self.partition_size)
                    .enumerate()
                    .map(|(index, chunk)| ChunkLog {
                        index,
                        log: run_pass(chunk, &f),
                    })
                    .collect();
                MutationLog::merge(chunks)
            }
        }
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new(
            ExecutionMode::default(),
            skyways_core::constants::DEFAULT_PARTITION_SIZE,
        )
    }
}

fn run_pass<T, F>(items: &mut [T], f: &F) -> MutationLog
where
    F: Fn(&mut T, &mut MutationLog),
{
    let mut log = MutationLog::new();
    for item in items.iter_mut() {
        f(item, &mut log);
    }
    log
}
