//! Fixed Sampling Context

use super::*;

/// A sampling event recorded by `FixedSamplingContext`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SamplingEvent {
    /// A call to `split_in_place(dimension, sample_count)`.
    Split(usize, usize),

    /// A value handed out by `next_1d()`.
    Draw(Float),
}

/// A sampling context that replays a fixed list of values, wrapping around
/// at the end, and records every call made on it. Used for deterministic
/// tests and debugging of sample consumption order.
#[derive(Clone, Debug, Default)]
pub struct FixedSamplingContext {
    /// Values to hand out.
    values: Vec<Float>,

    /// Index of the next value.
    next: usize,

    /// Calls made so far.
    events: Vec<SamplingEvent>,
}

impl FixedSamplingContext {
    /// Create a new `FixedSamplingContext`.
    ///
    /// * `values` - Values to hand out in order, each in [0, 1).
    pub fn new(values: Vec<Float>) -> Self {
        debug_assert!(values.iter().all(|v| (0.0..1.0).contains(v)));
        Self {
            values,
            next: 0,
            events: vec![],
        }
    }

    /// Returns the recorded calls.
    pub fn events(&self) -> &[SamplingEvent] {
        &self.events
    }

    /// Returns the number of values handed out so far.
    pub fn draw_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, SamplingEvent::Draw(_)))
            .count()
    }
}

impl SamplingContext for FixedSamplingContext {
    fn split_in_place(&mut self, dimension: usize, sample_count: usize) {
        self.events.push(SamplingEvent::Split(dimension, sample_count));
    }

    fn next_1d(&mut self) -> Float {
        let v = if self.values.is_empty() {
            0.5
        } else {
            let v = self.values[self.next % self.values.len()];
            self.next += 1;
            v
        };
        self.events.push(SamplingEvent::Draw(v));
        v
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
