//! Orthonormal Basis

use super::common::*;
use super::vector3::*;
use crate::pbrt::*;

/// An orthonormal 3-D frame made of a normal and two tangent directions.
///
/// Local coordinates `(x, y, z)` map to `x * tangent_u + y * normal + z * tangent_v`
/// which makes the local y-axis the normal.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Basis3f {
    /// The normal (local y-axis).
    normal: Vector3f,

    /// First tangent (local x-axis).
    tangent_u: Vector3f,

    /// Second tangent (local z-axis).
    tangent_v: Vector3f,
}

impl Default for Basis3f {
    /// Returns the world frame with the normal along +y.
    fn default() -> Self {
        Self::new(Vector3f::Y_AXIS, Vector3f::X_AXIS, Vector3f::Z_AXIS)
    }
}

impl Basis3f {
    /// Creates a basis from three vectors that are already orthonormal. The
    /// vectors are stored as given.
    ///
    /// * `normal`    - The normal.
    /// * `tangent_u` - First tangent.
    /// * `tangent_v` - Second tangent.
    pub fn new(normal: Vector3f, tangent_u: Vector3f, tangent_v: Vector3f) -> Self {
        Self {
            normal,
            tangent_u,
            tangent_v,
        }
    }

    /// Builds a basis around a normal, picking the tangents by zeroing one
    /// coordinate of the normal and swapping the remaining two.
    ///
    /// * `n` - The normal. It will be normalized.
    pub fn from_normal(n: Vector3f) -> Result<Self, String> {
        if !n.is_finite() || n.length_squared() == 0.0 {
            return Err(format!("Cannot build a basis around normal {n}"));
        }

        let normal = n.normalize();
        let tangent_u = if abs(normal.x) > abs(normal.y) {
            vector3(-normal.z, 0.0, normal.x) / (normal.x * normal.x + normal.z * normal.z).sqrt()
        } else {
            vector3(0.0, normal.z, -normal.y) / (normal.y * normal.y + normal.z * normal.z).sqrt()
        };
        let tangent_v = tangent_u.cross(&normal);

        Ok(Self::new(normal, tangent_u, tangent_v))
    }

    /// Builds a basis around a normal and a hint for the first tangent. The
    /// tangent is made orthogonal to the normal.
    ///
    /// * `n` - The normal. It will be normalized.
    /// * `u` - First tangent hint.
    pub fn from_normal_tangent(n: Vector3f, u: Vector3f) -> Result<Self, String> {
        if !n.is_finite() || n.length_squared() == 0.0 {
            return Err(format!("Cannot build a basis around normal {n}"));
        }

        let normal = n.normalize();
        let t = u - u.project(&normal);
        if !t.is_finite() || t.length_squared() < 1.0e-20 {
            // Tangent hint is degenerate; fall back to an arbitrary frame.
            return Self::from_normal(normal);
        }

        let tangent_u = t.normalize();
        let tangent_v = tangent_u.cross(&normal);
        Ok(Self::new(normal, tangent_u, tangent_v))
    }

    /// Returns the normal.
    #[inline]
    pub fn normal(&self) -> Vector3f {
        self.normal
    }

    /// Returns the first tangent.
    #[inline]
    pub fn tangent_u(&self) -> Vector3f {
        self.tangent_u
    }

    /// Returns the second tangent.
    #[inline]
    pub fn tangent_v(&self) -> Vector3f {
        self.tangent_v
    }

    /// Transforms a vector from local coordinates to the parent frame.
    ///
    /// * `v` - Vector in local coordinates.
    #[inline]
    pub fn transform_to_parent(&self, v: &Vector3f) -> Vector3f {
        self.tangent_u * v.x + self.normal * v.y + self.tangent_v * v.z
    }

    /// Transforms a vector from the parent frame to local coordinates.
    ///
    /// * `v` - Vector in parent coordinates.
    #[inline]
    pub fn transform_to_local(&self, v: &Vector3f) -> Vector3f {
        vector3(self.tangent_u.dot(v), self.normal.dot(v), self.tangent_v.dot(v))
    }

    /// Returns true if all three vectors are unit length and pairwise
    /// orthogonal within the given tolerance.
    ///
    /// * `eps` - Tolerance.
    pub fn is_orthonormal(&self, eps: Float) -> bool {
        feq(self.normal.length(), 1.0, eps)
            && feq(self.tangent_u.length(), 1.0, eps)
            && feq(self.tangent_v.length(), 1.0, eps)
            && abs(self.normal.dot(&self.tangent_u)) <= eps
            && abs(self.normal.dot(&self.tangent_v)) <= eps
            && abs(self.tangent_u.dot(&self.tangent_v)) <= eps
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
