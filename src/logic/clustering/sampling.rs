//! Random sample source for centroid seeding

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform indices. Any `rand::Rng` is one; tests may script it.
pub trait SampleSource {
    /// Uniform index in `0..len`. Callers guarantee `len > 0`.
    fn sample_index(&mut self, len: usize) -> usize;
}

impl<R: Rng> SampleSource for R {
    fn sample_index(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}

/// Fixed seed for reproducible runs, OS entropy otherwise
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}
