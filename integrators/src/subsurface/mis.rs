//! Subsurface MIS Weights

use super::*;
use core::bssrdf::*;
use core::geometry::*;
use core::pbrt::*;
use core::sampling::*;

/// Returns the power-2 MIS weight of the strategy that produced an incoming
/// point, against the two other projection axes.
///
/// The densities of the other strategies are evaluated for the same
/// displacement from the outgoing point, using the axes of `basis` (the
/// sampling basis after permutation by `pick_sampling_basis`).
///
/// * `bssrdf`          - The diffusion profile.
/// * `data`            - Profile inputs.
/// * `channel`         - Spectral channel of the sample.
/// * `basis`           - The sampling basis.
/// * `axis`            - Axis the sample was projected along.
/// * `sample_pdf`      - Density of the sample under `axis`.
/// * `outgoing_point`  - Outgoing position.
/// * `incoming_point`  - Incoming position.
/// * `incoming_normal` - Shading normal at the incoming position.
#[allow(clippy::too_many_arguments)]
pub fn compute_mis_weight<B: BSSRDF + ?Sized>(
    bssrdf: &B,
    data: &B::Data,
    channel: usize,
    basis: &Basis3f,
    axis: SamplingAxis,
    sample_pdf: Float,
    outgoing_point: Point3f,
    incoming_point: Point3f,
    incoming_normal: Vector3f,
) -> Float {
    // TODO: Validate the 2.0 factors numerically against a reference integrator.

    let d = incoming_point - outgoing_point;
    let pdf_along = |a: Vector3f, scale: Float| {
        let r = d.project(&a).length();
        scale * bssrdf.evaluate_pdf(data, channel, r) * a.abs_dot(&incoming_normal)
    };

    match axis {
        SamplingAxis::Normal => {
            let pdf_u = pdf_along(basis.tangent_u(), 0.25);
            let pdf_v = pdf_along(basis.tangent_v(), 0.25);
            mis_power2(2.0 * sample_pdf, pdf_u, pdf_v)
        }
        SamplingAxis::TangentU => {
            let pdf_n = pdf_along(basis.normal(), 0.5);
            let pdf_v = pdf_along(basis.tangent_v(), 0.25);
            mis_power2(sample_pdf, 2.0 * pdf_n, pdf_v)
        }
        SamplingAxis::TangentV => {
            let pdf_n = pdf_along(basis.normal(), 0.5);
            let pdf_u = pdf_along(basis.tangent_u(), 0.25);
            mis_power2(sample_pdf, 2.0 * pdf_n, pdf_u)
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
