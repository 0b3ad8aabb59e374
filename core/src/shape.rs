//! Shapes

use crate::geometry::*;
use crate::pbrt::*;
use std::sync::Arc;

/// Geometric details of a ray/shape intersection.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShapeHit {
    /// Parametric distance along the ray.
    pub t: Float,

    /// Unit geometric normal on the front side.
    pub n: Vector3f,

    /// Tangent hint used to orient the shading basis.
    pub dpdu: Vector3f,
}

/// Shape common functions
pub trait Shape: Send + Sync {
    /// Returns the shape type. Usually these are behind ArcShape and harder to
    /// debug. So this will be helpful.
    fn get_type(&self) -> &'static str;

    /// Returns the nearest intersection with parametric distance in
    /// `[r.t_min, r.t_max)`. If there is no intersection, `None` is returned.
    ///
    /// * `r` - The ray.
    fn intersect(&self, r: &ShadingRay) -> Option<ShapeHit>;

    /// Returns `true` if a ray-shape intersection succeeds; otherwise `false`.
    ///
    /// * `r` - The ray.
    fn intersect_p(&self, r: &ShadingRay) -> bool {
        self.intersect(r).is_some()
    }
}

/// Atomic reference counted `Shape`.
pub type ArcShape = Arc<dyn Shape>;
