//! Shading Context

use crate::geometry::*;
use crate::interaction::*;
use crate::material::*;
use crate::scene::*;

/// Services available to shading code: scene queries and shader execution.
#[derive(Copy, Clone)]
pub struct ShadingContext<'a> {
    /// The scene intersector.
    intersector: &'a dyn Intersector,
}

impl<'a> ShadingContext<'a> {
    /// Create a new `ShadingContext`.
    ///
    /// * `intersector` - The scene intersector.
    pub fn new(intersector: &'a dyn Intersector) -> Self {
        Self { intersector }
    }

    /// Returns the scene intersector.
    pub fn intersector(&self) -> &'a dyn Intersector {
        self.intersector
    }

    /// Runs a bump shader at a hit point.
    ///
    /// * `shader` - The shader.
    /// * `point`  - The hit point to update.
    /// * `s`      - 2-D sample value.
    pub fn execute_bump(&self, shader: &dyn BumpShader, point: &mut ShadingPoint, s: Point2f) {
        trace!("Bump shading at {} with sample {}", point.point(), s);
        shader.evaluate(point, s);
    }
}
