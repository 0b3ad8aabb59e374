//! Bump Shaders

use core::geometry::*;
use core::interaction::*;
use core::material::*;
use core::pbrt::*;

/// Tilts the shading normal by a random amount in the tangent plane, using
/// the sample value as the displacement gradient.
#[derive(Copy, Clone, Debug)]
pub struct JitterBumpShader {
    /// Maximum tangent-plane offset of the perturbed normal.
    amplitude: Float,
}

impl JitterBumpShader {
    /// Create a new `JitterBumpShader`.
    ///
    /// * `amplitude` - Maximum tangent-plane offset of the normal. Clamped to
    ///                 be non-negative.
    pub fn new(amplitude: Float) -> Self {
        Self {
            amplitude: max(amplitude, 0.0),
        }
    }
}

impl BumpShader for JitterBumpShader {
    fn evaluate(&self, point: &mut ShadingPoint, s: Point2f) {
        let basis = *point.shading_basis();
        let du = self.amplitude * (2.0 * s.x - 1.0);
        let dv = self.amplitude * (2.0 * s.y - 1.0);
        let n = basis.normal() + basis.tangent_u() * du + basis.tangent_v() * dv;

        match Basis3f::from_normal_tangent(n, basis.tangent_u()) {
            Ok(bumped) => point.set_shading_basis(bumped),
            Err(e) => warn!("Bump shading skipped: {e}"),
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
