//! Bidirectional scattering surface reflectance distribution function.

use crate::geometry::*;
use crate::pbrt::*;
use crate::sampler::*;

/// A sample drawn from a diffusion profile.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BSSRDFSample {
    /// Offset in the tangent plane of the sampling basis.
    point: Point2f,

    /// Square of the radius beyond which the profile is treated as zero.
    rmax2: Float,

    /// The spectral channel the sample was drawn for.
    channel: usize,
}

impl BSSRDFSample {
    /// Create a new `BSSRDFSample`.
    ///
    /// * `point`   - Offset in the tangent plane of the sampling basis.
    /// * `rmax2`   - Square of the maximum radius of the profile.
    /// * `channel` - Spectral channel.
    pub fn new(point: Point2f, rmax2: Float, channel: usize) -> Self {
        Self {
            point,
            rmax2,
            channel,
        }
    }

    /// Returns the offset in the tangent plane.
    #[inline]
    pub fn point(&self) -> Point2f {
        self.point
    }

    /// Returns the square of the maximum radius.
    #[inline]
    pub fn rmax2(&self) -> Float {
        self.rmax2
    }

    /// Returns the spectral channel.
    #[inline]
    pub fn channel(&self) -> usize {
        self.channel
    }
}

/// A radial diffusion profile that can be importance sampled.
pub trait BSSRDF: Send + Sync {
    /// Per shading point inputs of the profile.
    type Data;

    /// Draws a sample offset from the profile. Returns `None` when the profile
    /// declines to sample, e.g. because every channel has zero contribution.
    ///
    /// * `sampling_context` - Source of sample values.
    /// * `data`             - Profile inputs.
    fn sample(&self, sampling_context: &mut dyn SamplingContext, data: &Self::Data) -> Option<BSSRDFSample>;

    /// Returns the PDF of the profile with respect to area, at a given radius.
    ///
    /// * `data`    - Profile inputs.
    /// * `channel` - Spectral channel.
    /// * `radius`  - Distance from the outgoing point.
    fn evaluate_pdf(&self, data: &Self::Data, channel: usize, radius: Float) -> Float;
}
