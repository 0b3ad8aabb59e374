//! Parallel probing

use super::scene::ProbeScene;
use core::interaction::*;
use core::pbrt::*;
use core::report_stats;
use core::sampler::*;
use core::shading_context::*;
use core::stats::*;
use indicatif::{ProgressBar, ProgressStyle};
use integrators::*;
use materials::*;

/// Number of samples per batch of work.
pub const BATCH_SIZE: usize = 1024;

/// Aggregated results of a batch of samples.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BatchSummary {
    /// Samples taken.
    pub samples: usize,

    /// Incoming points reported.
    pub visits: usize,

    /// Sum of the probabilities of the incoming points kept.
    pub probability_sum: Float,

    /// Largest distance between the outgoing point and a kept incoming point.
    pub max_distance: Float,

    /// Incoming points not kept because the collector was full.
    pub dropped: usize,
}

impl BatchSummary {
    /// Summarizes the incoming points kept by a collector. Points with a
    /// non-finite probability are counted as visits but left out of the
    /// probability sum.
    ///
    /// * `samples`        - Samples taken.
    /// * `collector`      - The collector.
    /// * `outgoing_point` - The outgoing point.
    pub fn from_collector(
        samples: usize,
        collector: &SubsurfaceSampleCollector,
        outgoing_point: &ShadingPoint,
    ) -> Self {
        let kept = collector.hits();
        Self {
            samples,
            visits: kept.len() + collector.overflow(),
            probability_sum: kept
                .iter()
                .map(|h| h.probability)
                .filter(|p| p.is_finite())
                .sum(),
            max_distance: kept
                .iter()
                .map(|h| h.point.distance(outgoing_point.point()))
                .fold(0.0, max),
            dropped: collector.overflow(),
        }
    }

    /// Merges another summary into this one.
    ///
    /// * `other` - The other summary.
    pub fn merge(&mut self, other: &Self) {
        self.samples += other.samples;
        self.visits += other.visits;
        self.probability_sum += other.probability_sum;
        self.max_distance = max(self.max_distance, other.max_distance);
        self.dropped += other.dropped;
    }
}

/// Runs samples of the Gaussian profile at the scene's outgoing point.
pub struct Probe<'a> {
    /// The scene.
    scene: &'a ProbeScene,

    /// Inputs of the diffusion profile.
    inputs: GaussianBSSRDFInputs,

    /// Incoming points kept per batch.
    keep: usize,
}

impl<'a> Probe<'a> {
    /// Create a new `Probe`.
    ///
    /// * `scene`  - The scene.
    /// * `inputs` - Inputs of the diffusion profile.
    /// * `keep`   - Incoming points kept per batch.
    pub fn new(scene: &'a ProbeScene, inputs: GaussianBSSRDFInputs, keep: usize) -> Self {
        Self { scene, inputs, keep }
    }

    /// Runs one batch of samples.
    ///
    /// * `seed`    - Seed of the batch's sampling context.
    /// * `samples` - Number of samples.
    pub fn run_batch(&self, seed: u64, samples: usize) -> BatchSummary {
        let shading_context = ShadingContext::new(&self.scene.primitives);
        let sampler = SubsurfaceSampler::new(&shading_context);
        let outgoing_point = &self.scene.outgoing_point;

        let mut sampling_context = RandomSamplingContext::new(seed);
        let mut collector = SubsurfaceSampleCollector::new(self.keep);
        for _ in 0..samples {
            sampler.sample(
                &mut sampling_context,
                outgoing_point,
                &GaussianBSSRDF,
                &self.inputs,
                &mut collector,
            );
        }

        BatchSummary::from_collector(samples, &collector, outgoing_point)
    }

    /// Runs `samples` samples split in batches over `n_threads` workers and
    /// returns the merged summary. Batches are merged in order so the result
    /// does not depend on the number of threads.
    ///
    /// * `samples`   - Number of samples.
    /// * `seed`      - Base seed; batch `i` uses `seed + i`.
    /// * `n_threads` - Number of worker threads.
    /// * `quiet`     - Hide the progress bar.
    pub fn run(&self, samples: usize, seed: u64, n_threads: usize, quiet: bool) -> Result<BatchSummary, String> {
        let batch_count = (samples + BATCH_SIZE - 1) / BATCH_SIZE;
        info!("Probing {samples} samples in {batch_count} batches on {n_threads} threads");

        let progress = if quiet {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(batch_count as u64)
        };
        let style = ProgressStyle::with_template("{msg} [{wide_bar}] {pos}/{len} ({elapsed_precise}|{eta_precise})")
            .map_err(|e| format!("Invalid progress template: {e}"))?;
        progress.set_style(style);
        progress.set_message("Sampling");

        let mut summaries = vec![BatchSummary::default(); batch_count];

        std::thread::scope(|scope| -> Result<(), String> {
            let (tx, rx) = crossbeam_channel::bounded::<usize>(n_threads);
            let (result_tx, result_rx) = crossbeam_channel::unbounded::<(usize, BatchSummary)>();

            // Spawn worker threads.
            for _ in 0..n_threads {
                let rxc = rx.clone();
                let result_txc = result_tx.clone();
                let progress = &progress;
                scope.spawn(move || {
                    for batch_idx in rxc.iter() {
                        let n = min(BATCH_SIZE, samples - batch_idx * BATCH_SIZE);
                        let summary = self.run_batch(seed.wrapping_add(batch_idx as u64), n);
                        if result_txc.send((batch_idx, summary)).is_err() {
                            break;
                        }
                        progress.inc(1);
                    }
                    report_stats!();
                });
            }
            drop(rx); // Drop extra rx since we've cloned one for each woker.
            drop(result_tx);

            // Send work.
            for batch_idx in 0..batch_count {
                tx.send(batch_idx).map_err(|e| format!("Failed to queue batch {batch_idx}: {e}"))?;
            }
            drop(tx);

            for (batch_idx, summary) in result_rx.iter() {
                summaries[batch_idx] = summary;
            }
            Ok(())
        })?;

        progress.finish_with_message("Sampling complete");

        let mut total = BatchSummary::default();
        for summary in summaries.iter() {
            total.merge(summary);
        }
        Ok(total)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
