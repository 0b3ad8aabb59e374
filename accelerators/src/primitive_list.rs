//! Primitive List

use core::geometry::*;
use core::interaction::*;
use core::material::*;
use core::pbrt::*;
use core::scene::*;
use core::shape::*;
use core::stats::*;
use core::{stat_counter, stat_inc, stat_percent, stat_register_fns};
use std::sync::Arc;

stat_counter!("Intersections/Primitive tests", PRIMITIVE_TESTS, list_stats_primitive_tests);
stat_percent!(
    "Intersections/Traces with a hit",
    TRACE_HITS,
    TRACES,
    list_stats_trace_hits
);

stat_register_fns!(list_stats_primitive_tests, list_stats_trace_hits);

/// Minimum parametric distance for hits along a ray spawned from a previous
/// hit.
pub const SELF_HIT_EPSILON: Float = 1.0e-7;

/// GeometricPrimitive represents a single shape in a scene.
#[derive(Clone)]
pub struct GeometricPrimitive {
    /// The shape.
    pub shape: ArcShape,

    /// The material on the front side.
    pub front_material: Option<ArcMaterial>,

    /// The material on the back side.
    pub back_material: Option<ArcMaterial>,
}

impl GeometricPrimitive {
    /// Create a new geometric primitive with the same material on both sides.
    ///
    /// * `shape`    - The shape.
    /// * `material` - The material.
    pub fn new(shape: ArcShape, material: ArcMaterial) -> Self {
        Self {
            shape,
            front_material: Some(Arc::clone(&material)),
            back_material: Some(material),
        }
    }

    /// Create a new geometric primitive with distinct materials per side.
    ///
    /// * `shape`          - The shape.
    /// * `front_material` - The material on the front side.
    /// * `back_material`  - The material on the back side.
    pub fn two_sided(
        shape: ArcShape,
        front_material: Option<ArcMaterial>,
        back_material: Option<ArcMaterial>,
    ) -> Self {
        Self {
            shape,
            front_material,
            back_material,
        }
    }
}

/// A flat list of primitives tested one by one.
#[derive(Clone, Default)]
pub struct PrimitiveList {
    /// The primitives.
    primitives: Vec<GeometricPrimitive>,
}

impl PrimitiveList {
    /// Create a new `PrimitiveList`.
    ///
    /// * `primitives` - The primitives.
    pub fn new(primitives: Vec<GeometricPrimitive>) -> Self {
        register_stats();

        debug!("Creating primitive list with {} primitives", primitives.len());
        Self { primitives }
    }

    /// Returns the number of primitives.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Returns true if there are no primitives.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}

impl Intersector for PrimitiveList {
    /// Writes the nearest hit into `out`. When a parent hit is given, hits
    /// closer than `SELF_HIT_EPSILON` are ignored on every primitive so that
    /// surfaces coincident with the parent are not found again.
    ///
    /// * `ray`    - The ray to trace.
    /// * `out`    - Receives the hit.
    /// * `parent` - The hit the ray was spawned from.
    fn trace(&self, ray: &ShadingRay, out: &mut ShadingPoint, parent: Option<&ShadingPoint>) -> bool {
        out.clear();
        stat_inc!(TRACES, 1);

        let mut r = *ray;
        if parent.is_some() {
            r.t_min = max(r.t_min, SELF_HIT_EPSILON);
        }
        let mut nearest: Option<(usize, ShapeHit)> = None;

        for (i, prim) in self.primitives.iter().enumerate() {
            stat_inc!(PRIMITIVE_TESTS, 1);

            if let Some(hit) = prim.shape.intersect(&r) {
                r.t_max = hit.t;
                nearest = Some((i, hit));
            }
        }

        let Some((i, hit)) = nearest else {
            return false;
        };

        let prim = &self.primitives[i];
        let shading_basis = match Basis3f::from_normal_tangent(hit.n, hit.dpdu) {
            Ok(basis) => basis,
            Err(e) => {
                warn!("Skipping hit on {}: {e}", prim.shape.get_type());
                return false;
            }
        };

        let side = if hit.n.dot(&ray.d) < 0.0 {
            ObjectSide::Front
        } else {
            ObjectSide::Back
        };

        *out = ShadingPoint::new(
            *ray,
            hit.t,
            hit.n,
            shading_basis,
            side,
            prim.front_material.clone(),
            prim.back_material.clone(),
            Some(i),
        );

        stat_inc!(TRACE_HITS, 1);
        true
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
