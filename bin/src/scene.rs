//! Synthetic scenes

use accelerators::*;
use core::app::SceneKind;
use core::geometry::*;
use core::interaction::*;
use core::material::*;
use core::pbrt::*;
use shapes::*;
use std::sync::Arc;

/// A scene together with the outgoing point to sample from.
pub struct ProbeScene {
    /// Scene geometry.
    pub primitives: PrimitiveList,

    /// The outgoing point, at the origin facing +y.
    pub outgoing_point: ShadingPoint,
}

impl ProbeScene {
    /// Builds a scene where every surface uses the given material.
    ///
    /// * `kind`     - The scene.
    /// * `radius`   - Sphere radius or slab thickness.
    /// * `material` - The material.
    pub fn new(kind: SceneKind, radius: Float, material: &ArcMaterial) -> Result<Self, String> {
        let primitives = match kind {
            SceneKind::Plane => vec![GeometricPrimitive::new(
                Arc::new(Plane::horizontal(0.0)),
                Arc::clone(material),
            )],
            SceneKind::Sphere => {
                let sphere = Sphere::new(Point3f::new(0.0, -radius, 0.0), radius, false)?;
                vec![GeometricPrimitive::new(Arc::new(sphere), Arc::clone(material))]
            }
            SceneKind::Slab => {
                if !radius.is_finite() || radius <= 0.0 {
                    return Err(format!("Invalid slab thickness {radius}"));
                }
                let bottom = Plane::new(Point3f::new(0.0, -radius, 0.0), vector3(0.0, -1.0, 0.0))?;
                vec![
                    GeometricPrimitive::new(Arc::new(Plane::horizontal(0.0)), Arc::clone(material)),
                    GeometricPrimitive::new(Arc::new(bottom), Arc::clone(material)),
                ]
            }
        };

        let camera_ray = ShadingRay::new(
            Point3f::new(0.0, 1.0, 0.0),
            vector3(0.0, -1.0, 0.0),
            0.0,
            INFINITY,
            0.0,
            VisibilityFlags::CAMERA_RAY,
            0,
        );
        let outgoing_point = ShadingPoint::new(
            camera_ray,
            1.0,
            Vector3f::Y_AXIS,
            Basis3f::from_normal_tangent(Vector3f::Y_AXIS, Vector3f::X_AXIS)?,
            ObjectSide::Front,
            Some(Arc::clone(material)),
            Some(Arc::clone(material)),
            Some(0),
        );

        Ok(Self {
            primitives: PrimitiveList::new(primitives),
            outgoing_point,
        })
    }
}
