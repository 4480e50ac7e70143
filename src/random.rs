//! Injectable randomness
//!
//! Random photo selection and mock score assignment both draw from a
//! `RandomSource`, so tests can pin the sequence with a seed.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

pub trait RandomSource: Send + Sync {
    /// Uniform integer in `low..=high`.
    fn between(&self, low: u32, high: u32) -> u32;

    /// Uniform index into a collection of `len` items. `len` must be non-zero.
    fn index(&self, len: usize) -> usize {
        self.between(0, len.saturating_sub(1) as u32) as usize
    }
}

/// Thread-local OS-seeded generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn between(&self, low: u32, high: u32) -> u32 {
        rand::rng().random_range(low..=high)
    }
}

/// Deterministic generator for reproducible runs.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn between(&self, low: u32, high: u32) -> u32 {
        self.rng.lock().random_range(low..=high)
    }
}

pub type SharedRandom = Arc<dyn RandomSource>;

pub fn thread_random() -> SharedRandom {
    Arc::new(ThreadRandom)
}
