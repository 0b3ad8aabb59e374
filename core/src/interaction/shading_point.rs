//! Shading Points

use crate::geometry::*;
use crate::material::*;
use crate::pbrt::*;
use std::fmt;

/// Side of a surface that a ray hit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum ObjectSide {
    /// The side the geometric normal points to.
    #[default]
    Front,

    /// The side opposite the geometric normal.
    Back,
}

impl ObjectSide {
    /// Returns the other side.
    pub fn flip(&self) -> Self {
        match self {
            Self::Front => Self::Back,
            Self::Back => Self::Front,
        }
    }
}

/// Geometry and material state at a ray/scene intersection.
///
/// Points are written in place by an `Intersector` so that callers can reuse
/// the same storage across many traces. `clear()` resets a point to the
/// no-hit state.
#[derive(Clone, Default)]
pub struct ShadingPoint {
    /// Whether this point holds a hit.
    hit: bool,

    /// The ray that produced this point.
    ray: ShadingRay,

    /// Parametric distance of the hit along `ray`.
    distance: Float,

    /// Hit position.
    point: Point3f,

    /// Geometric normal, always on the front side.
    geometric_normal: Vector3f,

    /// Shading basis; may be perturbed by a bump shader.
    shading_basis: Basis3f,

    /// Side of the surface that was hit.
    side: ObjectSide,

    /// Material assigned to the front side.
    front_material: Option<ArcMaterial>,

    /// Material assigned to the back side.
    back_material: Option<ArcMaterial>,

    /// Index of the primitive that was hit, used to skip self-intersections.
    primitive_index: Option<usize>,
}

impl ShadingPoint {
    /// Creates a shading point for a known surface position, e.g. the
    /// outgoing point of a subsurface query.
    ///
    /// * `ray`             - The ray that reached the point.
    /// * `distance`        - Parametric distance along the ray.
    /// * `geometric_normal` - Geometric normal.
    /// * `shading_basis`   - Shading basis.
    /// * `side`            - Side of the surface that was hit.
    /// * `front_material`  - Material on the front side.
    /// * `back_material`   - Material on the back side.
    /// * `primitive_index` - Index of the primitive in its aggregate.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        ray: ShadingRay,
        distance: Float,
        geometric_normal: Vector3f,
        shading_basis: Basis3f,
        side: ObjectSide,
        front_material: Option<ArcMaterial>,
        back_material: Option<ArcMaterial>,
        primitive_index: Option<usize>,
    ) -> Self {
        Self {
            hit: true,
            point: ray.at(distance),
            ray,
            distance,
            geometric_normal,
            shading_basis,
            side,
            front_material,
            back_material,
            primitive_index,
        }
    }

    /// Resets the point to the no-hit state, dropping material references.
    pub fn clear(&mut self) {
        self.hit = false;
        self.distance = 0.0;
        self.front_material = None;
        self.back_material = None;
        self.primitive_index = None;
    }

    /// Returns true if the point holds a hit.
    #[inline]
    pub fn hit(&self) -> bool {
        self.hit
    }

    /// Returns the ray that produced this point.
    #[inline]
    pub fn ray(&self) -> &ShadingRay {
        &self.ray
    }

    /// Returns the parametric distance along the ray.
    #[inline]
    pub fn distance(&self) -> Float {
        self.distance
    }

    /// Returns the hit position.
    #[inline]
    pub fn point(&self) -> Point3f {
        self.point
    }

    /// Returns the time of the ray that produced this point.
    #[inline]
    pub fn time(&self) -> Float {
        self.ray.time
    }

    /// Returns the geometric normal.
    #[inline]
    pub fn geometric_normal(&self) -> Vector3f {
        self.geometric_normal
    }

    /// Returns the shading basis.
    #[inline]
    pub fn shading_basis(&self) -> &Basis3f {
        &self.shading_basis
    }

    /// Returns the shading normal.
    #[inline]
    pub fn shading_normal(&self) -> Vector3f {
        self.shading_basis.normal()
    }

    /// Replaces the shading basis.
    ///
    /// * `basis` - The new basis.
    pub fn set_shading_basis(&mut self, basis: Basis3f) {
        self.shading_basis = basis;
    }

    /// Returns the side of the surface that was hit.
    #[inline]
    pub fn side(&self) -> ObjectSide {
        self.side
    }

    /// Returns the primitive index.
    #[inline]
    pub fn primitive_index(&self) -> Option<usize> {
        self.primitive_index
    }

    /// Returns the material on the side that was hit.
    pub fn material(&self) -> Option<&ArcMaterial> {
        match self.side {
            ObjectSide::Front => self.front_material.as_ref(),
            ObjectSide::Back => self.back_material.as_ref(),
        }
    }

    /// Returns the material on the side opposite to the one that was hit.
    pub fn opposite_material(&self) -> Option<&ArcMaterial> {
        match self.side {
            ObjectSide::Front => self.back_material.as_ref(),
            ObjectSide::Back => self.front_material.as_ref(),
        }
    }
}

impl fmt::Debug for ShadingPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShadingPoint")
            .field("hit", &self.hit)
            .field("distance", &self.distance)
            .field("point", &self.point)
            .field("geometric_normal", &self.geometric_normal)
            .field("shading_basis", &self.shading_basis)
            .field("side", &self.side)
            .field("front_material", &self.front_material.as_ref().map(|m| m.name().to_string()))
            .field("back_material", &self.back_material.as_ref().map(|m| m.name().to_string()))
            .field("primitive_index", &self.primitive_index)
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct Named(&'static str);

    impl Material for Named {
        fn name(&self) -> &str {
            self.0
        }
    }

    fn point_on(side: ObjectSide) -> ShadingPoint {
        let front: ArcMaterial = Arc::new(Named("front"));
        let back: ArcMaterial = Arc::new(Named("back"));
        let ray = ShadingRay::new(
            Point3f::new(0.0, 1.0, 0.0),
            vector3(0.0, -1.0, 0.0),
            0.0,
            2.0,
            0.5,
            VisibilityFlags::PROBE_RAY,
            1,
        );
        ShadingPoint::new(
            ray,
            1.0,
            Vector3f::Y_AXIS,
            Basis3f::default(),
            side,
            Some(front),
            Some(back),
            Some(3),
        )
    }

    #[test]
    fn new_places_point_on_ray() {
        let sp = point_on(ObjectSide::Front);
        assert!(sp.hit());
        assert_eq!(sp.point(), Point3f::ZERO);
        assert_eq!(sp.time(), 0.5);
        assert_eq!(sp.ray().depth, 1);
        assert_eq!(sp.shading_normal(), Vector3f::Y_AXIS);
        assert_eq!(sp.primitive_index(), Some(3));
    }

    #[test]
    fn materials_follow_side() {
        let sp = point_on(ObjectSide::Front);
        assert_eq!(sp.material().unwrap().name(), "front");
        assert_eq!(sp.opposite_material().unwrap().name(), "back");

        let sp = point_on(ObjectSide::Back);
        assert_eq!(sp.material().unwrap().name(), "back");
        assert_eq!(sp.opposite_material().unwrap().name(), "front");
    }

    #[test]
    fn clear_resets_hit() {
        let mut sp = point_on(ObjectSide::Front);
        sp.clear();
        assert!(!sp.hit());
        assert!(sp.material().is_none());
        assert!(sp.primitive_index().is_none());
    }

    #[test]
    fn flip_side() {
        assert_eq!(ObjectSide::Front.flip(), ObjectSide::Back);
        assert_eq!(ObjectSide::Back.flip(), ObjectSide::Front);
    }
}
