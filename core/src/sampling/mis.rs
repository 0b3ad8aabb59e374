//! Multiple Importance Sampling

use crate::pbrt::*;

/// Power-2 heuristic over three strategies: `a² / (a² + b² + c²)`, or zero
/// when all densities are zero.
///
/// * `a` - Density of the strategy that produced the sample.
/// * `b` - Density of the second strategy.
/// * `c` - Density of the third strategy.
#[inline]
pub fn mis_power2(a: Float, b: Float, c: Float) -> Float {
    let a2 = a * a;
    let denom = a2 + b * b + c * c;
    if denom == 0.0 {
        0.0
    } else {
        a2 / denom
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
