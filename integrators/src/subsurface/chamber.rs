//! Probe Chamber

use core::geometry::*;
use core::pbrt::*;

/// The chord of the sphere of radius `rmax` around the outgoing point that a
/// probe ray travels along.
///
/// The chord passes through the sample offset in the tangent plane of the
/// sampling basis and runs parallel to its normal, from `entry` above the
/// plane to `exit` below it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ProbeChamber {
    /// Where the probe ray starts.
    pub entry: Point3f,

    /// Where the probe ray ends.
    pub exit: Point3f,

    /// Half the chord length.
    pub half_height: Float,

    /// Direction of the probe ray; the negated basis normal.
    pub direction: Vector3f,
}

impl ProbeChamber {
    /// Returns the chamber for a sample offset, or `None` if the offset lies
    /// outside the sphere.
    ///
    /// * `center` - The outgoing point.
    /// * `basis`  - The sampling basis.
    /// * `point`  - Sample offset in the tangent plane of `basis`.
    /// * `rmax2`  - Square of the sphere radius.
    pub fn new(center: Point3f, basis: &Basis3f, point: Point2f, rmax2: Float) -> Option<Self> {
        let radius2 = point.length_squared();
        if radius2 > rmax2 {
            return None;
        }

        // Height of the sample point on the hemisphere of radius rmax.
        let h = (rmax2 - radius2).sqrt();

        let entry = center + basis.transform_to_parent(&vector3(point.x, h, point.y));
        let exit = center + basis.transform_to_parent(&vector3(point.x, -h, point.y));
        debug_assert!(feq(exit.distance(entry), 2.0 * h, 1.0e-9));

        Some(Self {
            entry,
            exit,
            half_height: h,
            direction: -basis.normal(),
        })
    }

    /// Returns the chord length.
    pub fn length(&self) -> Float {
        2.0 * self.half_height
    }

    /// Returns a probe ray spanning the whole chord.
    ///
    /// * `time`  - Time value.
    /// * `depth` - Path depth of the probe ray.
    pub fn probe_ray(&self, time: Float, depth: usize) -> ShadingRay {
        ShadingRay::new(
            self.entry,
            self.direction,
            0.0,
            self.length(),
            time,
            VisibilityFlags::PROBE_RAY,
            depth,
        )
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
