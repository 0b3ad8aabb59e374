//! Spheres

use core::geometry::*;
use core::pbrt::*;
use core::shape::*;

/// A sphere with an arbitrary center.
#[derive(Clone, Debug)]
pub struct Sphere {
    /// Center of the sphere.
    pub center: Point3f,

    /// Radius of sphere.
    pub radius: Float,

    /// Indicates whether the surface normals point inwards.
    pub reverse_orientation: bool,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// * `center`              - Center of the sphere.
    /// * `radius`              - Radius of sphere.
    /// * `reverse_orientation` - Indicates whether their surface normal directions
    ///                           should be reversed from the default
    pub fn new(center: Point3f, radius: Float, reverse_orientation: bool) -> Result<Self, String> {
        if center.has_nans() {
            return Err(format!("Invalid sphere center {center}"));
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err(format!("Invalid sphere radius {radius}"));
        }
        Ok(Self {
            center,
            radius,
            reverse_orientation,
        })
    }
}

impl Shape for Sphere {
    fn get_type(&self) -> &'static str {
        "sphere"
    }

    /// Returns the nearest intersection in the ray's extent. A ray starting
    /// inside the sphere reports the far hit.
    ///
    /// * `r` - The ray.
    fn intersect(&self, r: &ShadingRay) -> Option<ShapeHit> {
        // Compute quadratic sphere coefficients.
        let oc = r.o - self.center;
        let a = r.d.length_squared();
        let b = 2.0 * oc.dot(&r.d);
        let c = oc.length_squared() - self.radius * self.radius;

        // Solve quadratic equation for t values.
        let (t0, t1) = Quadratic::solve(a, b, c)?;

        // Check t0 and t1 for nearest intersection.
        let t_shape_hit = if r.contains(t0) {
            t0
        } else if r.contains(t1) {
            t1
        } else {
            return None;
        };

        let p_hit = r.at(t_shape_hit) - self.center;
        let mut n = (p_hit / self.radius).normalize();
        if self.reverse_orientation {
            n = -n;
        }

        // Tangent along increasing azimuth; arbitrary at the poles.
        let mut dpdu = vector3(-p_hit.y, p_hit.x, 0.0);
        if dpdu.length_squared() == 0.0 {
            dpdu = Vector3f::X_AXIS;
        }

        Some(ShapeHit {
            t: t_shape_hit,
            n,
            dpdu: dpdu.normalize(),
        })
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
