//! Scene

use crate::geometry::*;
use crate::interaction::*;

/// Finds the nearest intersection of a ray with scene geometry.
///
/// Implementations must be safe for concurrent read-only queries.
pub trait Intersector: Send + Sync {
    /// Traces the ray and writes the nearest hit with parametric distance in
    /// `[ray.t_min, ray.t_max)` into `out`. Returns `false` if there is none.
    ///
    /// * `ray`    - The ray to trace.
    /// * `out`    - Receives the hit.
    /// * `parent` - The hit the ray was spawned from, used to avoid
    ///              reporting the same surface again.
    fn trace(&self, ray: &ShadingRay, out: &mut ShadingPoint, parent: Option<&ShadingPoint>) -> bool;
}
