//! Random sources for quiz selection.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Picks an index uniformly from `0..len`.
///
/// Callers never pass `len == 0`.
pub trait RandomSource {
    fn pick_index(&mut self, len: usize) -> usize;
}

/// Draws from the thread-local generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick_index(&mut self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Reproducible sequence from a fixed seed.
#[derive(Debug, Clone)]
pub struct SeededRandom(StdRng);

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl RandomSource for SeededRandom {
    fn pick_index(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }
}

/// Builds the configured source: seeded when a seed is given, thread-local otherwise.
pub fn from_seed(seed: Option<u64>) -> Box<dyn RandomSource + Send> {
    match seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(ThreadRandom),
    }
}
