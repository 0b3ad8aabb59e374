//! Common

use num_traits::Num;
use std::ops::{Mul, Neg};

/// Use 64-bit precision for floating point numbers.
pub type Float = f64;

/// Infinty (∞)
pub const INFINITY: Float = Float::INFINITY;

/// PI (π)
pub const PI: Float = std::f64::consts::PI;

/// 2*PI (2π)
pub const TWO_PI: Float = PI * 2.0;

/// Returns the absolute value of a number.
///
/// * `n` - The number.
#[inline(always)]
pub fn abs<T>(n: T) -> T
where
    T: Num + Neg<Output = T> + PartialOrd + Copy,
{
    if n < T::zero() {
        -n
    } else {
        n
    }
}

/// Returns the minimum of 2 numbers.
///
/// * `a` - First number.
/// * `b` - Second number.
#[inline(always)]
pub fn min<T>(a: T, b: T) -> T
where
    T: Num + PartialOrd + Copy,
{
    if a < b {
        a
    } else {
        b
    }
}

/// Returns the maximum of 2 numbers.
///
/// * `a` - First number.
/// * `b` - Second number.
#[inline(always)]
pub fn max<T>(a: T, b: T) -> T
where
    T: Num + PartialOrd + Copy,
{
    if a > b {
        a
    } else {
        b
    }
}

/// Returns the square of a value.
///
/// * `v` - The value.
#[inline(always)]
pub fn square<T: Mul<T, Output = T> + Copy>(v: T) -> T {
    v * v
}

/// Returns true if two floating point values are equal within a relative
/// tolerance. Values smaller than 1 are compared using an absolute tolerance.
///
/// * `a`   - First value.
/// * `b`   - Second value.
/// * `eps` - Tolerance.
#[inline]
pub fn feq(a: Float, b: Float, eps: Float) -> bool {
    abs(a - b) <= eps * max(1.0, max(abs(a), abs(b)))
}

/// Return the cosine of an angle.
///
/// * `theta` - The angle in radians.
#[inline(always)]
pub fn cos(theta: Float) -> Float {
    theta.cos()
}

/// Return the sine of an angle.
///
/// * `theta` - The angle in radians.
#[inline(always)]
pub fn sin(theta: Float) -> Float {
    theta.sin()
}

/// Implements a quadratic equation solver.
pub struct Quadratic {}

impl Quadratic {
    /// Solve the quadratic equation a * x ^ 2  + b * x + c = 0 and return the
    /// roots in increasing order.
    ///
    /// * `a` - Coefficient of x ^ 2 term.
    /// * `b` - Coefficient of x term.
    /// * `c` - Coefficient of constant term.
    pub fn solve(a: Float, b: Float, c: Float) -> Option<(Float, Float)> {
        if a == 0.0 {
            return None;
        }

        // Find quadratic discriminant
        let discrim = b * b - 4.0 * a * c;
        if discrim < 0.0 {
            None
        } else {
            let root_discrim = discrim.sqrt();

            // Compute quadratic `t` values.
            let q = if b < 0.0 {
                -0.5 * (b - root_discrim)
            } else {
                -0.5 * (b + root_discrim)
            };
            if q == 0.0 {
                return Some((0.0, 0.0));
            }

            let mut t0 = q / a;
            let mut t1 = c / q;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            Some((t0, t1))
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quadratic_roots() {
        assert_eq!(Quadratic::solve(1.0, -3.0, 2.0), Some((1.0, 2.0)));
        assert_eq!(Quadratic::solve(1.0, 0.0, 1.0), None);
        assert_eq!(Quadratic::solve(0.0, 1.0, 1.0), None);
        assert_eq!(Quadratic::solve(1.0, 0.0, 0.0), Some((0.0, 0.0)));
    }

    #[test]
    fn feq_relative_and_absolute() {
        assert!(feq(1.0e6, 1.0e6 + 1.0e-4, 1.0e-9));
        assert!(!feq(1.0e6, 1.0e6 + 1.0, 1.0e-9));
        assert!(feq(0.0, 1.0e-10, 1.0e-9));
        assert!(!feq(0.0, 1.0e-8, 1.0e-9));
    }
}
