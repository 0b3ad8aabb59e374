//! Rays

use super::{Point3f, Vector3f};
use crate::pbrt::{Float, INFINITY};
use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Visibility flags carried by rays so that shading can tell what kind
    /// of query produced a hit.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct VisibilityFlags: u32 {
        /// Rays leaving the camera.
        const CAMERA_RAY = 1 << 0;

        /// Rays cast only to find intersections, never shaded as visible.
        const PROBE_RAY = 1 << 1;
    }
}

/// A ray with a finite parametric extent used during shading.
#[derive(Copy, Clone)]
pub struct ShadingRay {
    /// Origin.
    pub o: Point3f,

    /// Direction.
    pub d: Vector3f,

    /// Minimum extent of the ray.
    pub t_min: Float,

    /// Maximum extent of the ray.
    pub t_max: Float,

    /// Time value.
    pub time: Float,

    /// Kind of query this ray was cast for.
    pub flags: VisibilityFlags,

    /// Number of scattering events along the path leading to this ray.
    pub depth: usize,
}

impl ShadingRay {
    /// Returns a new ray.
    ///
    /// * `o`     - Origin.
    /// * `d`     - Direction.
    /// * `t_min` - Minimum extent of the ray.
    /// * `t_max` - Maximum extent of the ray.
    /// * `time`  - Time value.
    /// * `flags` - Visibility flags.
    /// * `depth` - Path depth.
    pub fn new(
        o: Point3f,
        d: Vector3f,
        t_min: Float,
        t_max: Float,
        time: Float,
        flags: VisibilityFlags,
        depth: usize,
    ) -> Self {
        Self {
            o,
            d,
            t_min,
            t_max,
            time,
            flags,
            depth,
        }
    }

    /// Returns true if either coordinate is NaN.
    pub fn has_nans(&self) -> bool {
        self.o.has_nans() || self.d.has_nans() || self.t_min.is_nan() || self.t_max.is_nan()
    }

    /// Get position along the ray at given parameter.
    ///
    /// * `t` - Parameter to evaluate.
    #[inline]
    pub fn at(&self, t: Float) -> Point3f {
        self.o + self.d * t
    }

    /// Returns true if the parameter lies inside the ray's extent.
    ///
    /// * `t` - Parameter to test.
    #[inline]
    pub fn contains(&self, t: Float) -> bool {
        t >= self.t_min && t < self.t_max
    }
}

impl Default for ShadingRay {
    /// Returns a default value for `ShadingRay`.
    fn default() -> Self {
        Self {
            o: Point3f::default(),
            d: Vector3f::default(),
            t_min: 0.0,
            t_max: INFINITY,
            time: 0.0,
            flags: VisibilityFlags::CAMERA_RAY,
            depth: 0,
        }
    }
}

impl fmt::Debug for ShadingRay {
    /// Display the ray parameters.
    ///
    /// * `f` - Formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShadingRay")
            .field("o", &self.o)
            .field("d", &self.d)
            .field("t_min", &self.t_min)
            .field("t_max", &self.t_max)
            .field("time", &self.time)
            .field("flags", &self.flags)
            .field("depth", &self.depth)
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::super::{Point3, Vector3};
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn has_nans() {
        let nan_point = Point3::new(Float::NAN, Float::NAN, Float::NAN);
        let point = Point3::new(0.0, 0.0, 0.0);
        let vector = Vector3::new(1.0, 0.0, 0.0);
        let flags = VisibilityFlags::PROBE_RAY;

        assert!(ShadingRay::new(nan_point, vector, 0.0, 1.0, 0.0, flags, 0).has_nans());
        assert!(ShadingRay::new(point, vector, 0.0, Float::NAN, 0.0, flags, 0).has_nans());
        assert!(!ShadingRay::new(point, vector, 0.0, 1.0, 0.0, flags, 0).has_nans());
    }

    #[test]
    fn contains_is_half_open() {
        let r = ShadingRay::new(
            Point3::zero(),
            Vector3::new(0.0, 0.0, 1.0),
            0.0,
            2.0,
            0.0,
            VisibilityFlags::PROBE_RAY,
            1,
        );
        assert!(r.contains(0.0));
        assert!(r.contains(1.999));
        assert!(!r.contains(2.0));
        assert!(!r.contains(-0.1));
    }

    prop_range!(range_f64, f64, -100.0..100.0f64);

    prop_point3!(
        point3_f64,
        f64,
        -100.0..100.0f64,
        -100.0..100.0f64,
        -100.0..100.0f64
    );

    prop_vector3!(
        vector3_f64,
        f64,
        -100.0..100.0f64,
        -100.0..100.0f64,
        -100.0..100.0f64
    );

    proptest! {
        #[test]
        fn at_f64(o in point3_f64(), d in vector3_f64(), t in range_f64()) {
            let r = ShadingRay::new(o, d, 0.0, INFINITY, 0.0, VisibilityFlags::PROBE_RAY, 0);
            prop_assert_eq!(r.at(t), o + d * t);
        }
    }
}
