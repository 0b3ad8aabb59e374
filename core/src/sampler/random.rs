//! Random Sampling Context

use super::*;
use crate::rng::*;

/// A sampling context backed by independent uniform random numbers. The
/// sub-sequence structure is tracked but does not change the values.
#[derive(Clone)]
pub struct RandomSamplingContext {
    /// The random number generator.
    rng: RNG,

    /// Dimension of the current sub-sequence.
    dimension: usize,

    /// Sample count of the current sub-sequence.
    sample_count: usize,
}

impl RandomSamplingContext {
    /// Create a new `RandomSamplingContext`.
    ///
    /// * `seed` - Sequence index used to seed the generator.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: RNG::new(seed),
            dimension: 0,
            sample_count: 0,
        }
    }

    /// Returns the dimension and sample count of the current sub-sequence.
    pub fn current_split(&self) -> (usize, usize) {
        (self.dimension, self.sample_count)
    }
}

impl SamplingContext for RandomSamplingContext {
    fn split_in_place(&mut self, dimension: usize, sample_count: usize) {
        debug_assert!(dimension > 0 && sample_count > 0);
        self.dimension = dimension;
        self.sample_count = sample_count;
    }

    fn next_1d(&mut self) -> Float {
        self.rng.uniform_float()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
