//! Sampling Contexts

mod fixed;
mod random;

use crate::geometry::*;
use crate::pbrt::*;

// Re-export
pub use fixed::*;
pub use random::*;

/// A source of uniform samples that is partitioned into sub-sequences.
///
/// Callers announce the shape of the next sub-sequence with `split_in_place()`
/// and then draw from it. The order of these calls is part of the rendering
/// contract: two runs issuing the same calls against equally seeded contexts
/// see the same values.
pub trait SamplingContext {
    /// Starts a new sub-sequence of `sample_count` samples, each with
    /// `dimension` values, replacing the current one.
    ///
    /// * `dimension`    - Number of values per sample.
    /// * `sample_count` - Number of samples in the sub-sequence.
    fn split_in_place(&mut self, dimension: usize, sample_count: usize);

    /// Returns the next value in [0, 1).
    fn next_1d(&mut self) -> Float;

    /// Returns the next pair of values in [0, 1)^2.
    fn next_2d(&mut self) -> Point2f {
        let x = self.next_1d();
        let y = self.next_1d();
        Point2f::new(x, y)
    }
}
