//! Replay sequences: the single path by which commands are produced.
//!
//! The live random-mode workers, the queue producer and the script emitter
//! all obtain their commands here, which is what keeps a live run and an
//! emitted script byte-for-byte consistent.

use crate::generator::CommandGenerator;
use fuzz_core::{Command, GenerationConfig};

/// Seed of a worker's stream: `base + worker`, wrapping on overflow.
pub fn worker_seed(base_seed: u64, worker: u32) -> u64 {
    base_seed.wrapping_add(u64::from(worker))
}

/// The ordered, finite command sequence of one worker.
///
/// Building is restartable: the same arguments always reproduce the same
/// commands.
#[derive(Debug, Clone)]
pub struct ReplaySequence<'a> {
    config: &'a GenerationConfig,
    base_seed: u64,
    worker: u32,
    count: u64,
}

impl<'a> ReplaySequence<'a> {
    pub fn new(config: &'a GenerationConfig, base_seed: u64, worker: u32, count: u64) -> Self {
        Self {
            config,
            base_seed,
            worker,
            count,
        }
    }

    pub fn worker(&self) -> u32 {
        self.worker
    }

    pub fn seed(&self) -> u64 {
        worker_seed(self.base_seed, self.worker)
    }

    pub fn len(&self) -> u64 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Lazily generate the sequence.
    pub fn iter(&self) -> ReplayIter {
        ReplayIter {
            generator: CommandGenerator::new(self.config.clone(), self.seed()),
            remaining: self.count,
        }
    }

    /// Generate the whole sequence eagerly.
    pub fn build(&self) -> Vec<Command> {
        self.iter().collect()
    }
}

impl IntoIterator for &ReplaySequence<'_> {
    type Item = Command;
    type IntoIter = ReplayIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a [`ReplaySequence`].
pub struct ReplayIter {
    generator: CommandGenerator,
    remaining: u64,
}

impl Iterator for ReplayIter {
    type Item = Command;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.generator.next_command())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ReplayIter {}
