//! Gaussian Diffusion Profile

use core::bssrdf::*;
use core::geometry::*;
use core::pbrt::*;
use core::sampler::*;

/// Ratio of `rmax²` to the variance. The profile keeps about 99.8% of its
/// energy inside `rmax`.
pub const RMAX2_CONSTANT: Float = 12.46;

/// Number of spectral channels carried by the profile inputs.
pub const CHANNEL_COUNT: usize = 3;

/// Inputs of the Gaussian diffusion profile at a shading point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GaussianBSSRDFInputs {
    /// Variance of the radial Gaussian.
    variance: Float,

    /// Square of the radius beyond which the profile is zero.
    rmax2: Float,

    /// Diffuse reflectance per channel, used to pick the sampled channel.
    reflectance: [Float; CHANNEL_COUNT],
}

impl GaussianBSSRDFInputs {
    /// Create new `GaussianBSSRDFInputs`.
    ///
    /// * `variance`    - Variance of the radial Gaussian.
    /// * `reflectance` - Diffuse reflectance per channel in [0, 1].
    pub fn new(variance: Float, reflectance: [Float; CHANNEL_COUNT]) -> Result<Self, String> {
        if !variance.is_finite() || variance <= 0.0 {
            return Err(format!("Gaussian profile variance must be positive, got {variance}"));
        }
        if let Some(r) = reflectance.iter().find(|r| !(0.0..=1.0).contains(*r)) {
            return Err(format!("Gaussian profile reflectance must be in [0, 1], got {r}"));
        }

        Ok(Self {
            variance,
            rmax2: RMAX2_CONSTANT * variance,
            reflectance,
        })
    }

    /// Returns the variance.
    pub fn variance(&self) -> Float {
        self.variance
    }

    /// Returns the square of the maximum radius.
    pub fn rmax2(&self) -> Float {
        self.rmax2
    }

    /// Returns the reflectance per channel.
    pub fn reflectance(&self) -> [Float; CHANNEL_COUNT] {
        self.reflectance
    }
}

/// A radially symmetric Gaussian diffusion profile truncated at `rmax`.
#[derive(Copy, Clone, Debug, Default)]
pub struct GaussianBSSRDF;

impl GaussianBSSRDF {
    /// Returns the fraction of the untruncated profile's energy inside `rmax`.
    ///
    /// * `data` - Profile inputs.
    fn truncation(data: &GaussianBSSRDFInputs) -> Float {
        1.0 - (-data.rmax2 / (2.0 * data.variance)).exp()
    }

    /// Picks a channel with probability proportional to its reflectance.
    ///
    /// * `reflectance` - Reflectance per channel.
    /// * `u`           - Sample value in [0, 1).
    fn pick_channel(reflectance: &[Float; CHANNEL_COUNT], u: Float) -> Option<usize> {
        let total: Float = reflectance.iter().sum();
        if total <= 0.0 {
            return None;
        }

        let mut cdf = 0.0;
        let target = u * total;
        for (i, r) in reflectance.iter().enumerate() {
            cdf += r;
            if target < cdf {
                return Some(i);
            }
        }

        // `u` close to 1 with rounding; take the last non-zero channel.
        reflectance.iter().rposition(|r| *r > 0.0)
    }
}

impl BSSRDF for GaussianBSSRDF {
    type Data = GaussianBSSRDFInputs;

    /// Draws three values: one for the channel and two for the radius and
    /// the angle of the offset.
    ///
    /// * `sampling_context` - Source of sample values.
    /// * `data`             - Profile inputs.
    fn sample(&self, sampling_context: &mut dyn SamplingContext, data: &Self::Data) -> Option<BSSRDFSample> {
        sampling_context.split_in_place(3, 1);
        let u = sampling_context.next_1d();
        let s = sampling_context.next_2d();

        let channel = Self::pick_channel(&data.reflectance, u)?;

        // Invert the CDF of the truncated radial Gaussian.
        let r2 = -2.0 * data.variance * (1.0 - s.x * Self::truncation(data)).ln();
        let radius = r2.max(0.0).sqrt();
        let phi = TWO_PI * s.y;

        Some(BSSRDFSample::new(
            Point2f::new(radius * cos(phi), radius * sin(phi)),
            data.rmax2,
            channel,
        ))
    }

    fn evaluate_pdf(&self, data: &Self::Data, channel: usize, radius: Float) -> Float {
        debug_assert!(channel < CHANNEL_COUNT);
        if radius * radius > data.rmax2 {
            return 0.0;
        }

        let v = data.variance;
        (-radius * radius / (2.0 * v)).exp() / (TWO_PI * v * Self::truncation(data))
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use core::rng::*;
    use float_cmp::*;

    #[test]
    fn inputs_validate() {
        assert!(GaussianBSSRDFInputs::new(0.0, [0.5; 3]).is_err());
        assert!(GaussianBSSRDFInputs::new(-1.0, [0.5; 3]).is_err());
        assert!(GaussianBSSRDFInputs::new(Float::NAN, [0.5; 3]).is_err());
        assert!(GaussianBSSRDFInputs::new(1.0, [0.5, 1.5, 0.0]).is_err());

        let inputs = GaussianBSSRDFInputs::new(0.5, [0.5; 3]).unwrap();
        assert!(approx_eq!(f64, inputs.rmax2(), 6.23, epsilon = 1.0e-12));
    }

    #[test]
    fn zero_reflectance_declines() {
        let inputs = GaussianBSSRDFInputs::new(1.0, [0.0; 3]).unwrap();
        let mut ctx = FixedSamplingContext::new(vec![0.3, 0.4, 0.5]);
        assert!(GaussianBSSRDF.sample(&mut ctx, &inputs).is_none());
        assert_eq!(ctx.events()[0], SamplingEvent::Split(3, 1));
        assert_eq!(ctx.draw_count(), 3);
    }

    #[test]
    fn channel_follows_reflectance() {
        let r = [0.0, 0.5, 0.5];
        assert_eq!(GaussianBSSRDF::pick_channel(&r, 0.0), Some(1));
        assert_eq!(GaussianBSSRDF::pick_channel(&r, 0.49), Some(1));
        assert_eq!(GaussianBSSRDF::pick_channel(&r, 0.51), Some(2));
        assert_eq!(GaussianBSSRDF::pick_channel(&[0.2, 0.0, 0.0], 0.999), Some(0));
    }

    #[test]
    fn pdf_is_zero_beyond_rmax() {
        let inputs = GaussianBSSRDFInputs::new(1.0, [0.5; 3]).unwrap();
        let rmax = inputs.rmax2().sqrt();
        assert!(GaussianBSSRDF.evaluate_pdf(&inputs, 0, rmax * 0.99) > 0.0);
        assert_eq!(GaussianBSSRDF.evaluate_pdf(&inputs, 0, rmax * 1.01), 0.0);
    }

    #[test]
    fn pdf_integrates_to_one() {
        // Midpoint rule over the disk of radius rmax in polar coordinates.
        let inputs = GaussianBSSRDFInputs::new(0.25, [0.5; 3]).unwrap();
        let rmax = inputs.rmax2().sqrt();
        let n = 10_000;
        let dr = rmax / n as Float;
        let integral: Float = (0..n)
            .map(|i| {
                let r = (i as Float + 0.5) * dr;
                GaussianBSSRDF.evaluate_pdf(&inputs, 0, r) * TWO_PI * r * dr
            })
            .sum();
        assert!(approx_eq!(f64, integral, 1.0, epsilon = 1.0e-4));
    }

    #[test]
    fn samples_stay_inside_rmax() {
        let mut rng = RNG::new(3);
        for _ in 0..512 {
            let v = 0.01 + 9.99 * rng.uniform_float();
            let values = vec![rng.uniform_float(), rng.uniform_float(), rng.uniform_float()];
            let inputs = GaussianBSSRDFInputs::new(v, [0.2, 0.3, 0.4]).unwrap();
            let mut ctx = FixedSamplingContext::new(values);
            let sample = GaussianBSSRDF.sample(&mut ctx, &inputs).unwrap();
            assert!(sample.point().length_squared() <= sample.rmax2() * (1.0 + 1.0e-12));
            assert!(sample.channel() < CHANNEL_COUNT);
        }
    }
}
