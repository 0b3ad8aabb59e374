//! Sampling Basis Selection

use core::geometry::*;
use core::pbrt::*;

/// Axis along which a diffusion profile sample is projected onto the surface.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SamplingAxis {
    /// Project along the shading normal.
    Normal,

    /// Project along the first shading tangent.
    TangentU,

    /// Project along the second shading tangent.
    TangentV,
}

impl SamplingAxis {
    /// Returns the probability with which the axis is selected.
    pub fn pdf(&self) -> Float {
        match self {
            Self::Normal => 0.5,
            Self::TangentU | Self::TangentV => 0.25,
        }
    }
}

/// Picks the projection axis and returns it together with a basis whose
/// normal is that axis, and the selection probability.
///
/// The shading basis `(n, u, v)` becomes `(n, u, v)` for the normal axis,
/// `(u, v, n)` for the first tangent and `(v, n, u)` for the second.
///
/// * `shading_basis` - Shading basis at the outgoing point.
/// * `s`             - Sample value in [0, 1).
pub fn pick_sampling_basis(shading_basis: &Basis3f, s: Float) -> (SamplingAxis, Basis3f, Float) {
    let n = shading_basis.normal();
    let u = shading_basis.tangent_u();
    let v = shading_basis.tangent_v();

    let (axis, basis) = if s <= 0.5 {
        (SamplingAxis::Normal, Basis3f::new(n, u, v))
    } else if s <= 0.75 {
        (SamplingAxis::TangentU, Basis3f::new(u, v, n))
    } else {
        (SamplingAxis::TangentV, Basis3f::new(v, n, u))
    };

    (axis, basis, axis.pdf())
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use core::rng::*;

    #[test]
    fn boundaries_are_inclusive() {
        let b = Basis3f::default();
        assert_eq!(pick_sampling_basis(&b, 0.0).0, SamplingAxis::Normal);
        assert_eq!(pick_sampling_basis(&b, 0.5).0, SamplingAxis::Normal);
        assert_eq!(pick_sampling_basis(&b, 0.500001).0, SamplingAxis::TangentU);
        assert_eq!(pick_sampling_basis(&b, 0.75).0, SamplingAxis::TangentU);
        assert_eq!(pick_sampling_basis(&b, 0.750001).0, SamplingAxis::TangentV);
        assert_eq!(pick_sampling_basis(&b, 0.999).0, SamplingAxis::TangentV);
    }

    #[test]
    fn permutations() {
        let b = Basis3f::default();
        let (n, u, v) = (b.normal(), b.tangent_u(), b.tangent_v());

        let (_, basis, pdf) = pick_sampling_basis(&b, 0.25);
        assert_eq!((basis.normal(), basis.tangent_u(), basis.tangent_v()), (n, u, v));
        assert_eq!(pdf, 0.5);

        let (_, basis, pdf) = pick_sampling_basis(&b, 0.6);
        assert_eq!((basis.normal(), basis.tangent_u(), basis.tangent_v()), (u, v, n));
        assert_eq!(pdf, 0.25);

        let (_, basis, pdf) = pick_sampling_basis(&b, 0.9);
        assert_eq!((basis.normal(), basis.tangent_u(), basis.tangent_v()), (v, n, u));
        assert_eq!(pdf, 0.25);
    }

    #[test]
    fn selection_frequencies() {
        let b = Basis3f::default();
        let mut rng = RNG::new(11);
        let n = 100_000;
        let mut counts = [0usize; 3];
        for _ in 0..n {
            match pick_sampling_basis(&b, rng.uniform_float()).0 {
                SamplingAxis::Normal => counts[0] += 1,
                SamplingAxis::TangentU => counts[1] += 1,
                SamplingAxis::TangentV => counts[2] += 1,
            }
        }
        let freq: Vec<Float> = counts.iter().map(|c| *c as Float / n as Float).collect();
        assert!(abs(freq[0] - 0.5) < 0.01);
        assert!(abs(freq[1] - 0.25) < 0.01);
        assert!(abs(freq[2] - 0.25) < 0.01);
    }

    fn unit_vector3(rng: &mut RNG) -> Vector3f {
        loop {
            let v = vector3(
                2.0 * rng.uniform_float() - 1.0,
                2.0 * rng.uniform_float() - 1.0,
                2.0 * rng.uniform_float() - 1.0,
            );
            if v.length_squared() > 1.0e-4 {
                return v.normalize();
            }
        }
    }

    #[test]
    fn bases_are_orthonormal() {
        let mut rng = RNG::new(23);
        for _ in 0..512 {
            let shading_basis = Basis3f::from_normal(unit_vector3(&mut rng)).unwrap();
            let (axis, basis, pdf) = pick_sampling_basis(&shading_basis, rng.uniform_float());
            assert!(basis.is_orthonormal(1.0e-9));
            assert_eq!(pdf, axis.pdf());
        }
    }
}
