//! Planes

use core::geometry::*;
use core::pbrt::*;
use core::shape::*;

/// An infinite plane through a point.
#[derive(Clone, Debug)]
pub struct Plane {
    /// A point on the plane.
    pub point: Point3f,

    /// Unit normal of the front side.
    pub normal: Vector3f,

    /// Unit tangent used to orient shading bases.
    pub tangent: Vector3f,
}

impl Plane {
    /// Create a new plane.
    ///
    /// * `point`  - A point on the plane.
    /// * `normal` - Normal of the front side. It will be normalized.
    pub fn new(point: Point3f, normal: Vector3f) -> Result<Self, String> {
        if point.has_nans() {
            return Err(format!("Invalid plane point {point}"));
        }
        let basis = Basis3f::from_normal(normal).map_err(|e| format!("Invalid plane: {e}"))?;
        Ok(Self {
            point,
            normal: basis.normal(),
            tangent: basis.tangent_u(),
        })
    }

    /// Returns the plane `y = height` facing +y.
    ///
    /// * `height` - Height of the plane.
    pub fn horizontal(height: Float) -> Self {
        Self {
            point: Point3f::new(0.0, height, 0.0),
            normal: Vector3f::Y_AXIS,
            tangent: Vector3f::X_AXIS,
        }
    }
}

impl Shape for Plane {
    fn get_type(&self) -> &'static str {
        "plane"
    }

    fn intersect(&self, r: &ShadingRay) -> Option<ShapeHit> {
        let denom = self.normal.dot(&r.d);
        if abs(denom) < 1.0e-12 {
            // Ray is parallel to the plane.
            return None;
        }

        let t = self.normal.dot(&(self.point - r.o)) / denom;
        if !r.contains(t) {
            return None;
        }

        Some(ShapeHit {
            t,
            n: self.normal,
            dpdu: self.tangent,
        })
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
