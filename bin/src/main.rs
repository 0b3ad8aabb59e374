#[macro_use]
extern crate log;

mod probe;
mod scene;

use core::app::*;
use core::material::*;
use core::stats::*;
use core::{print_stats, report_stats};
use materials::*;
use probe::*;
use scene::*;
use std::process::ExitCode;
use std::sync::Arc;

fn main() -> ExitCode {
    // Initialize `env_logger`.
    env_logger::init();

    match run(options()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(options: &Options) -> Result<(), String> {
    let inputs = GaussianBSSRDFInputs::new(options.variance, [0.8, 0.5, 0.3])?;
    let mut material = TranslucentMaterial::new("probe", inputs);
    if options.bump > 0.0 {
        material = material.with_bump(Box::new(JitterBumpShader::new(options.bump)));
    }
    let material: ArcMaterial = Arc::new(material);
    let scene = ProbeScene::new(options.scene, options.radius, &material)?;

    let probe = Probe::new(&scene, inputs, options.keep);
    let summary = probe.run(options.samples, options.seed, options.threads(), options.quiet)?;

    report_stats!();

    if !options.quiet {
        let kept = summary.visits - summary.dropped;
        let mean = if kept > 0 {
            summary.probability_sum / kept as f64
        } else {
            0.0
        };
        info!("{} of {} incoming points kept", kept, summary.visits);
        println!(
            "{:?}: {} samples, {} visits, mean probability {:.6}, max distance {:.6} (rmax {:.6})",
            options.scene,
            summary.samples,
            summary.visits,
            mean,
            summary.max_distance,
            inputs.rmax2().sqrt(),
        );
        print_stats!();
    }

    Ok(())
}
