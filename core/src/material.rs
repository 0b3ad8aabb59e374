//! Material

use crate::geometry::*;
use crate::interaction::*;
use std::sync::Arc;

/// Material trait provides common behavior.
///
/// Subsurface transport only connects points that carry the same material
/// instance, so materials are compared by allocation rather than by value.
/// Two materials with identical parameters are still distinct.
pub trait Material: Send + Sync {
    /// Returns the material name. Used for logging and debugging.
    fn name(&self) -> &str;

    /// Returns the shader used to perturb the shading basis at hit points,
    /// if the material has one.
    fn bump_shader(&self) -> Option<&dyn BumpShader> {
        None
    }
}

/// Atomic reference counted `Material`.
pub type ArcMaterial = Arc<dyn Material>;

/// Returns true if both references point to the same material instance.
///
/// * `a` - First material.
/// * `b` - Second material.
#[inline]
pub fn same_material(a: &ArcMaterial, b: &ArcMaterial) -> bool {
    // Compare data pointers only; vtable pointers are not unique per type.
    std::ptr::eq(
        Arc::as_ptr(a) as *const u8,
        Arc::as_ptr(b) as *const u8,
    )
}

/// Perturbs the shading basis of a hit point, e.g. by bump or normal mapping.
/// Called for its side effect on `point`.
pub trait BumpShader: Send + Sync {
    /// Updates the shading basis at the hit point.
    ///
    /// * `point` - The hit point to update.
    /// * `s`     - 2-D sample value.
    fn evaluate(&self, point: &mut ShadingPoint, s: Point2f);
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
