//! Subsurface Sampler

use super::*;
use core::bssrdf::*;
use core::geometry::*;
use core::interaction::*;
use core::material::*;
use core::pbrt::*;
use core::sampler::*;
use core::shading_context::*;
use core::stats::*;
use core::{stat_counter, stat_dist, stat_float_distribution, stat_inc, stat_percent, stat_register_fns};

stat_counter!("Subsurface/Samples", SAMPLES, subsurface_stats_samples);
stat_counter!("Subsurface/Rejected samples", REJECTED_SAMPLES, subsurface_stats_rejected);
stat_percent!(
    "Subsurface/Probe hits on the outgoing material",
    REPORTED_HITS,
    PROBE_HITS,
    subsurface_stats_reported_hits,
);
stat_float_distribution!(
    "Subsurface/Sample probability",
    SAMPLE_PROBABILITY,
    subsurface_stats_probability
);

stat_register_fns!(
    subsurface_stats_samples,
    subsurface_stats_rejected,
    subsurface_stats_reported_hits,
    subsurface_stats_probability,
);

/// Receives the incoming points found by `SubsurfaceSampler::sample()`.
pub trait SubsurfaceVisitor {
    /// Called once per reported incoming point, synchronously from within
    /// `sample()`.
    ///
    /// * `sample`         - The diffusion profile sample.
    /// * `incoming_point` - The incoming point.
    /// * `probability`    - MIS weighted probability of the incoming point.
    fn visit(&mut self, sample: &BSSRDFSample, incoming_point: &ShadingPoint, probability: Float);
}

impl<F> SubsurfaceVisitor for F
where
    F: FnMut(&BSSRDFSample, &ShadingPoint, Float),
{
    fn visit(&mut self, sample: &BSSRDFSample, incoming_point: &ShadingPoint, probability: Float) {
        self(sample, incoming_point, probability)
    }
}

/// Finds incoming points for subsurface transport by projecting diffusion
/// profile samples onto the surface with probe rays.
pub struct SubsurfaceSampler<'a> {
    /// Shading services; must outlive the sampler.
    shading_context: &'a ShadingContext<'a>,
}

impl<'a> SubsurfaceSampler<'a> {
    /// Create a new `SubsurfaceSampler`.
    ///
    /// * `shading_context` - Shading services.
    pub fn new(shading_context: &'a ShadingContext<'a>) -> Self {
        register_stats();

        Self { shading_context }
    }

    /// Samples the diffusion profile at an outgoing point and reports every
    /// probe ray hit on the outgoing point's material to the visitor.
    ///
    /// Sample values are consumed in this order: whatever `bssrdf.sample()`
    /// draws, one 2-D value for the projection axis, then one 2-D value per
    /// reported hit whose material has a bump shader.
    ///
    /// * `sampling_context` - Source of sample values.
    /// * `outgoing_point`   - The outgoing point.
    /// * `bssrdf`           - The diffusion profile.
    /// * `bssrdf_data`      - Profile inputs at the outgoing point.
    /// * `visitor`          - Receives the incoming points.
    pub fn sample<B, V>(
        &self,
        sampling_context: &mut dyn SamplingContext,
        outgoing_point: &ShadingPoint,
        bssrdf: &B,
        bssrdf_data: &B::Data,
        visitor: &mut V,
    ) where
        B: BSSRDF + ?Sized,
        V: SubsurfaceVisitor + ?Sized,
    {
        stat_inc!(SAMPLES, 1);

        // Sample the diffusion profile.
        let Some(bssrdf_sample) = bssrdf.sample(sampling_context, bssrdf_data) else {
            stat_inc!(REJECTED_SAMPLES, 1);
            return;
        };

        // Reject points too far away.
        let point = bssrdf_sample.point();
        let radius2 = point.length_squared();
        let rmax2 = bssrdf_sample.rmax2();
        if radius2 > rmax2 {
            debug!("Rejecting subsurface sample with r² = {radius2} > rmax² = {rmax2}");
            stat_inc!(REJECTED_SAMPLES, 1);
            return;
        }

        // Evaluate the PDF of the diffusion profile.
        let radius = radius2.sqrt();
        let bssrdf_sample_pdf = bssrdf.evaluate_pdf(bssrdf_data, bssrdf_sample.channel(), radius);

        // Pick a sampling basis.
        sampling_context.split_in_place(1, 1);
        let s = sampling_context.next_2d();
        let (sampling_axis, sampling_basis, sampling_basis_pdf) =
            pick_sampling_basis(outgoing_point.shading_basis(), s.x);

        // Build a probe ray inscribed inside the sphere of radius rmax.
        let Some(chamber) = ProbeChamber::new(outgoing_point.point(), &sampling_basis, point, rmax2) else {
            return;
        };
        let mut probe_ray = chamber.probe_ray(outgoing_point.time(), outgoing_point.ray().depth + 1);

        let Some(outgoing_material) = outgoing_point.material() else {
            debug!("Outgoing point has no material");
            return;
        };

        let intersector = self.shading_context.intersector();
        let mut shading_points = [ShadingPoint::default(), ShadingPoint::default()];
        let mut shading_point_index = 0;
        let mut has_parent = false;

        // Trace the ray and visit all intersections found inside the sphere.
        loop {
            let (first, second) = shading_points.split_at_mut(1);
            let (incoming_point, parent_point) = if shading_point_index == 0 {
                (&mut first[0], &second[0])
            } else {
                (&mut second[0], &first[0])
            };
            let parent = has_parent.then_some(parent_point);

            incoming_point.clear();
            if !intersector.trace(&probe_ray, incoming_point, parent) {
                break;
            }
            stat_inc!(PROBE_HITS, 1);

            // Retrieve the front side material at the hit point.
            let incoming_material = match incoming_point.side() {
                ObjectSide::Back => incoming_point.opposite_material(),
                ObjectSide::Front => incoming_point.material(),
            };

            // Only consider hit points with the same material as the outgoing point.
            if incoming_material.is_some_and(|m| same_material(m, outgoing_material)) {
                if let Some(shader) = outgoing_material.bump_shader() {
                    sampling_context.split_in_place(1, 1);
                    let s = sampling_context.next_2d();
                    self.shading_context.execute_bump(shader, incoming_point, s);
                }

                let incoming_normal = incoming_point.shading_normal();
                let dot_nn = sampling_basis.normal().abs_dot(&incoming_normal);
                let mut probability = bssrdf_sample_pdf * sampling_basis_pdf * dot_nn;

                probability /= compute_mis_weight(
                    bssrdf,
                    bssrdf_data,
                    bssrdf_sample.channel(),
                    &sampling_basis,
                    sampling_axis,
                    probability,
                    outgoing_point.point(),
                    incoming_point.point(),
                    incoming_normal,
                );

                trace!(
                    "Subsurface hit at {} along {:?} with probability {probability}",
                    incoming_point.point(),
                    sampling_axis
                );
                stat_inc!(REPORTED_HITS, 1);
                stat_dist!(SAMPLE_PROBABILITY, probability);

                visitor.visit(&bssrdf_sample, incoming_point, probability);
            }

            // Move the ray's origin past the hit surface.
            probe_ray.o = incoming_point.point();
            probe_ray.t_max = (chamber.exit - probe_ray.o).length();

            // Swap the current and parent shading points.
            has_parent = true;
            shading_point_index = 1 - shading_point_index;
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use accelerators::*;
    use core::report_stats;
    use core::rng::*;
    use core::scene::*;
    use float_cmp::*;
    use materials::*;
    use shapes::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Profile that always returns the same offset.
    struct FixedOffset {
        point: Point2f,
        rmax2: Float,
        pdf: Float,
    }

    impl FixedOffset {
        fn new(x: Float, y: Float, rmax2: Float) -> Self {
            Self {
                point: Point2f::new(x, y),
                rmax2,
                pdf: 0.8,
            }
        }
    }

    impl BSSRDF for FixedOffset {
        type Data = ();

        fn sample(&self, ctx: &mut dyn SamplingContext, _data: &()) -> Option<BSSRDFSample> {
            ctx.split_in_place(2, 1);
            let _ = ctx.next_2d();
            Some(BSSRDFSample::new(self.point, self.rmax2, 0))
        }

        fn evaluate_pdf(&self, _data: &(), _channel: usize, radius: Float) -> Float {
            if radius * radius <= self.rmax2 {
                self.pdf
            } else {
                0.0
            }
        }
    }

    /// Profile that never samples.
    struct Declining;

    impl BSSRDF for Declining {
        type Data = ();

        fn sample(&self, _ctx: &mut dyn SamplingContext, _data: &()) -> Option<BSSRDFSample> {
            None
        }

        fn evaluate_pdf(&self, _data: &(), _channel: usize, _radius: Float) -> Float {
            1.0
        }
    }

    /// Bump shader that counts its invocations.
    struct CountingBump(Arc<AtomicUsize>);

    impl BumpShader for CountingBump {
        fn evaluate(&self, _point: &mut ShadingPoint, _s: Point2f) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct TestMaterial {
        bump: Option<CountingBump>,
    }

    impl TestMaterial {
        fn plain() -> ArcMaterial {
            Arc::new(Self { bump: None })
        }

        fn bumped(counter: &Arc<AtomicUsize>) -> ArcMaterial {
            Arc::new(Self {
                bump: Some(CountingBump(Arc::clone(counter))),
            })
        }
    }

    impl Material for TestMaterial {
        fn name(&self) -> &str {
            "test"
        }

        fn bump_shader(&self) -> Option<&dyn BumpShader> {
            self.bump.as_ref().map(|b| b as &dyn BumpShader)
        }
    }

    /// Outgoing point at the origin with the world basis.
    fn outgoing_point(material: &ArcMaterial) -> ShadingPoint {
        outgoing_point_on(ObjectSide::Front, material, material)
    }

    /// Outgoing point at the origin with distinct materials per side.
    fn outgoing_point_on(side: ObjectSide, front: &ArcMaterial, back: &ArcMaterial) -> ShadingPoint {
        let ray = ShadingRay::new(
            Point3f::new(0.0, 1.0, 0.0),
            vector3(0.0, -1.0, 0.0),
            0.0,
            INFINITY,
            0.0,
            VisibilityFlags::CAMERA_RAY,
            2,
        );
        ShadingPoint::new(
            ray,
            1.0,
            Vector3f::Y_AXIS,
            Basis3f::default(),
            side,
            Some(Arc::clone(front)),
            Some(Arc::clone(back)),
            Some(0),
        )
    }

    fn plane_scene(material: &ArcMaterial) -> PrimitiveList {
        PrimitiveList::new(vec![GeometricPrimitive::new(
            Arc::new(Plane::horizontal(0.0)),
            Arc::clone(material),
        )])
    }

    /// Runs one sample and returns the reported hits with their probabilities.
    fn run<B: BSSRDF>(
        scene: &dyn Intersector,
        ctx: &mut dyn SamplingContext,
        outgoing: &ShadingPoint,
        bssrdf: &B,
        data: &B::Data,
    ) -> Vec<(BSSRDFSample, ShadingPoint, Float)> {
        let shading_context = ShadingContext::new(scene);
        let sampler = SubsurfaceSampler::new(&shading_context);
        let mut visits = vec![];
        let mut visitor = |s: &BSSRDFSample, p: &ShadingPoint, prob: Float| visits.push((*s, p.clone(), prob));
        sampler.sample(ctx, outgoing, bssrdf, data, &mut visitor);
        visits
    }

    #[test]
    fn plane_reports_one_hit() {
        let material = TestMaterial::plain();
        let scene = plane_scene(&material);
        let mut ctx = FixedSamplingContext::new(vec![0.25]);
        let bssrdf = FixedOffset::new(0.1, 0.1, 1.0);

        let visits = run(&scene, &mut ctx, &outgoing_point(&material), &bssrdf, &());

        assert_eq!(visits.len(), 1);
        let (sample, incoming, probability) = &visits[0];
        assert!(approx_eq!(f64, incoming.point().x, 0.1, epsilon = 1.0e-12));
        assert!(approx_eq!(f64, incoming.point().y, 0.0, epsilon = 1.0e-12));
        assert!(approx_eq!(f64, incoming.point().z, 0.1, epsilon = 1.0e-12));
        assert!(sample.point().length_squared() <= sample.rmax2());

        // Normal axis with the incoming normal along it: no competing strategy.
        assert!(*probability > 0.0);
        assert!(approx_eq!(f64, *probability, 0.8 * 0.5, epsilon = 1.0e-12));
    }

    #[test]
    fn probe_ray_properties() {
        let material = TestMaterial::plain();
        let scene = plane_scene(&material);
        let mut ctx = FixedSamplingContext::new(vec![0.25]);
        let visits = run(&scene, &mut ctx, &outgoing_point(&material), &FixedOffset::new(0.1, 0.1, 1.0), &());

        let ray = visits[0].1.ray();
        let h = (1.0 - 0.02 as Float).sqrt();
        assert!(ray.flags.contains(VisibilityFlags::PROBE_RAY));
        assert_eq!(ray.depth, 3);
        assert_eq!(ray.d, vector3(0.0, -1.0, 0.0));
        assert!(approx_eq!(f64, ray.t_max, 2.0 * h, epsilon = 1.0e-12));
        assert!(approx_eq!(f64, ray.o.y, h, epsilon = 1.0e-12));
    }

    #[test]
    fn out_of_range_sample_is_rejected() {
        let material = TestMaterial::plain();
        let scene = plane_scene(&material);
        let mut ctx = FixedSamplingContext::new(vec![0.25]);
        let visits = run(&scene, &mut ctx, &outgoing_point(&material), &FixedOffset::new(1.0, 0.5, 1.0), &());

        assert!(visits.is_empty());
        // Only the profile's own draws were consumed.
        assert_eq!(ctx.draw_count(), 2);
    }

    #[test]
    fn declined_sample_has_no_visits() {
        let material = TestMaterial::plain();
        let scene = plane_scene(&material);
        let mut ctx = FixedSamplingContext::new(vec![0.25]);
        let visits = run(&scene, &mut ctx, &outgoing_point(&material), &Declining, &());

        assert!(visits.is_empty());
        assert_eq!(ctx.draw_count(), 0);
    }

    #[test]
    fn empty_scene_has_no_visits() {
        let material = TestMaterial::plain();
        let scene = PrimitiveList::new(vec![]);
        for s in [0.25, 0.6, 0.9] {
            let mut ctx = FixedSamplingContext::new(vec![s]);
            let visits = run(&scene, &mut ctx, &outgoing_point(&material), &FixedOffset::new(0.1, 0.1, 1.0), &());
            assert!(visits.is_empty());
        }
    }

    #[test]
    fn foreign_material_is_skipped() {
        let counter = Arc::new(AtomicUsize::new(0));
        let skin = TestMaterial::plain();
        let marble = TestMaterial::bumped(&counter);
        let scene = PrimitiveList::new(vec![
            GeometricPrimitive::new(Arc::new(Plane::horizontal(0.3)), Arc::clone(&marble)),
            GeometricPrimitive::new(Arc::new(Plane::horizontal(0.0)), Arc::clone(&skin)),
        ]);
        let mut ctx = FixedSamplingContext::new(vec![0.25]);
        let visits = run(&scene, &mut ctx, &outgoing_point(&skin), &FixedOffset::new(0.1, 0.1, 1.0), &());

        assert_eq!(visits.len(), 1);
        let incoming = &visits[0].1;
        assert_eq!(incoming.primitive_index(), Some(1));
        assert!(approx_eq!(f64, incoming.point().y, 0.0, epsilon = 1.0e-12));
        assert!(same_material(incoming.material().unwrap(), &skin));

        // The ray advanced past the foreign hit before finding this one.
        assert!(approx_eq!(f64, incoming.ray().o.y, 0.3, epsilon = 1.0e-12));
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn equal_but_distinct_materials_are_skipped() {
        let outgoing_material = TestMaterial::plain();
        let other = TestMaterial::plain();
        let scene = plane_scene(&other);
        let mut ctx = FixedSamplingContext::new(vec![0.25]);
        let visits = run(
            &scene,
            &mut ctx,
            &outgoing_point(&outgoing_material),
            &FixedOffset::new(0.1, 0.1, 1.0),
            &(),
        );
        assert!(visits.is_empty());
    }

    #[test]
    fn sample_value_order() {
        let counter = Arc::new(AtomicUsize::new(0));
        let material = TestMaterial::bumped(&counter);
        let scene = plane_scene(&material);
        let mut ctx = FixedSamplingContext::new(vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6]);
        let visits = run(&scene, &mut ctx, &outgoing_point(&material), &FixedOffset::new(0.1, 0.1, 1.0), &());

        assert_eq!(visits.len(), 1);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(
            ctx.events(),
            &[
                SamplingEvent::Split(2, 1),
                SamplingEvent::Draw(0.1),
                SamplingEvent::Draw(0.2),
                SamplingEvent::Split(1, 1),
                SamplingEvent::Draw(0.3),
                SamplingEvent::Draw(0.4),
                SamplingEvent::Split(1, 1),
                SamplingEvent::Draw(0.5),
                SamplingEvent::Draw(0.6),
            ]
        );
    }

    #[test]
    fn tangent_probe_crosses_sphere() {
        let material = TestMaterial::plain();
        let sphere = Sphere::new(Point3f::new(0.0, -1.0, 0.0), 1.0, false).unwrap();
        let scene = PrimitiveList::new(vec![GeometricPrimitive::new(Arc::new(sphere), Arc::clone(&material))]);

        // First tangent: the probe runs along -x at y = -0.3, z = 0.1.
        let mut ctx = FixedSamplingContext::new(vec![0.6]);
        let visits = run(&scene, &mut ctx, &outgoing_point(&material), &FixedOffset::new(0.1, -0.3, 1.0), &());

        assert_eq!(visits.len(), 2);
        assert_eq!(visits[0].1.side(), ObjectSide::Front);
        assert_eq!(visits[1].1.side(), ObjectSide::Back);
        assert!(approx_eq!(f64, visits[0].1.point().x, 0.5f64.sqrt(), epsilon = 1.0e-9));
        assert!(approx_eq!(f64, visits[1].1.point().x, -(0.5f64.sqrt()), epsilon = 1.0e-9));
        for (_, p, probability) in visits.iter() {
            assert!(approx_eq!(f64, p.point().y, -0.3, epsilon = 1.0e-9));
            assert!(probability.is_finite() && *probability > 0.0);
        }
    }

    #[test]
    fn collector_and_gaussian_profile() {
        let inputs = GaussianBSSRDFInputs::new(0.05, [0.8, 0.5, 0.2]).unwrap();
        let material: ArcMaterial = Arc::new(TranslucentMaterial::new("wax", inputs));
        let scene = plane_scene(&material);
        let shading_context = ShadingContext::new(&scene);
        let sampler = SubsurfaceSampler::new(&shading_context);
        let outgoing = outgoing_point(&material);

        let mut ctx = RandomSamplingContext::new(5);
        let mut collector = SubsurfaceSampleCollector::new(64);
        for _ in 0..256 {
            sampler.sample(&mut ctx, &outgoing, &GaussianBSSRDF, &inputs, &mut collector);
        }

        // Only normal projections can reach the plane.
        assert!(collector.is_full());
        assert!(collector.overflow() > 0);
        for hit in collector.hits() {
            assert!(approx_eq!(f64, hit.point.y, 0.0, epsilon = 1.0e-9));
            let r2 = hit.point.x * hit.point.x + hit.point.z * hit.point.z;
            assert!(r2 <= inputs.rmax2());
            assert!(hit.probability > 0.0);
            assert!(hit.channel < CHANNEL_COUNT);
        }
    }

    #[test]
    fn statistics_are_reported() {
        let material = TestMaterial::plain();
        let scene = plane_scene(&material);
        for _ in 0..3 {
            let mut ctx = FixedSamplingContext::new(vec![0.25]);
            run(&scene, &mut ctx, &outgoing_point(&material), &FixedOffset::new(0.1, 0.1, 1.0), &());
        }

        report_stats!();
        let accum = stats_accumulator().lock().unwrap();
        assert!(accum.counter("Subsurface/Samples") >= 3);
        let (reported, hits) = accum.percentage("Subsurface/Probe hits on the outgoing material");
        assert!(reported >= 3 && hits >= reported);
    }

    #[test]
    fn coincident_planes_terminate() {
        let material = TestMaterial::plain();
        let scene = PrimitiveList::new(vec![
            GeometricPrimitive::new(Arc::new(Plane::horizontal(0.0)), Arc::clone(&material)),
            GeometricPrimitive::new(Arc::new(Plane::horizontal(0.0)), Arc::clone(&material)),
        ]);
        let mut ctx = FixedSamplingContext::new(vec![0.25]);
        let visits = run(&scene, &mut ctx, &outgoing_point(&material), &FixedOffset::new(0.1, 0.1, 1.0), &());

        assert_eq!(visits.len(), 1);
        assert_eq!(visits[0].1.primitive_index(), Some(0));
    }

    fn two_sided_sphere(front: &ArcMaterial, back: &ArcMaterial) -> PrimitiveList {
        let sphere = Sphere::new(Point3f::new(0.0, -1.0, 0.0), 1.0, false).unwrap();
        PrimitiveList::new(vec![GeometricPrimitive::two_sided(
            Arc::new(sphere),
            Some(Arc::clone(front)),
            Some(Arc::clone(back)),
        )])
    }

    #[test]
    fn back_side_hits_use_front_material() {
        let skin = TestMaterial::plain();
        let other = TestMaterial::plain();
        let scene = two_sided_sphere(&skin, &other);

        let mut ctx = FixedSamplingContext::new(vec![0.6]);
        let outgoing = outgoing_point_on(ObjectSide::Front, &skin, &other);
        let visits = run(&scene, &mut ctx, &outgoing, &FixedOffset::new(0.1, -0.3, 1.0), &());

        assert_eq!(visits.len(), 2);
        assert_eq!(visits[0].1.side(), ObjectSide::Front);
        assert_eq!(visits[1].1.side(), ObjectSide::Back);
        assert!(same_material(visits[1].1.material().unwrap(), &other));
        assert!(same_material(visits[1].1.opposite_material().unwrap(), &skin));
    }

    #[test]
    fn back_outgoing_material_rejects_front_material_hits() {
        let skin = TestMaterial::plain();
        let other = TestMaterial::plain();
        let scene = two_sided_sphere(&skin, &other);

        // The outgoing material is the back one; every hit resolves to the front one.
        let mut ctx = FixedSamplingContext::new(vec![0.6]);
        let outgoing = outgoing_point_on(ObjectSide::Back, &skin, &other);
        let visits = run(&scene, &mut ctx, &outgoing, &FixedOffset::new(0.1, -0.3, 1.0), &());
        assert!(visits.is_empty());
    }

    #[test]
    fn visits_stay_within_support() {
        let material = TestMaterial::plain();
        let scene = plane_scene(&material);
        let outgoing = outgoing_point(&material);
        let mut rng = RNG::new(41);

        for _ in 0..512 {
            let x = 3.0 * rng.uniform_float() - 1.5;
            let y = 3.0 * rng.uniform_float() - 1.5;
            let mut ctx = FixedSamplingContext::new(vec![rng.uniform_float()]);
            let visits = run(&scene, &mut ctx, &outgoing, &FixedOffset::new(x, y, 1.0), &());

            for (sample, _, probability) in visits.iter() {
                assert!(sample.point().length_squared() <= sample.rmax2());
                assert!(*probability >= 0.0);
            }
            if x * x + y * y > 1.0 {
                assert!(visits.is_empty());
            }
        }
    }
}
