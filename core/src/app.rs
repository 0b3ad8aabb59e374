//! Application related stuff

use crate::pbrt::Float;
use clap::{Parser, ValueEnum};
use std::sync::OnceLock;

/// Returns the options parsed from the command line on first use.
pub fn options() -> &'static Options {
    static OPTIONS: OnceLock<Options> = OnceLock::new();
    OPTIONS.get_or_init(Options::parse)
}

/// Synthetic scenes to probe.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SceneKind {
    /// An infinite plane through the outgoing point.
    Plane,

    /// A sphere touching the outgoing point from below.
    Sphere,

    /// Two parallel planes bounding a slab below the outgoing point.
    Slab,
}

/// Program options.
#[derive(Parser, Clone, Debug)]
#[clap(author, version, about = "Probe subsurface scattering samples over a synthetic scene.", long_about = None)]
pub struct Options {
    /// Number of threads to use for sampling.
    #[clap(
        long = "nthreads",
        short = 't',
        value_name = "NUM",
        default_value_t = 1,
        help = "Use specified number of threads for sampling."
    )]
    n_threads: usize,

    /// Number of subsurface samples.
    #[clap(
        long,
        short = 'n',
        value_name = "NUM",
        default_value_t = 65536,
        help = "Number of subsurface samples to take."
    )]
    pub samples: usize,

    /// Base seed of the sampling contexts.
    #[clap(long, short = 's', value_name = "NUM", default_value_t = 0, help = "Seed for the random sampling contexts.")]
    pub seed: u64,

    /// The scene.
    #[clap(long, value_enum, default_value_t = SceneKind::Plane, help = "Scene to probe.")]
    pub scene: SceneKind,

    /// Variance of the Gaussian diffusion profile.
    #[clap(
        long,
        value_name = "FLOAT",
        default_value_t = 0.05,
        help = "Variance of the Gaussian diffusion profile."
    )]
    pub variance: Float,

    /// Sphere radius or slab thickness.
    #[clap(
        long,
        value_name = "FLOAT",
        default_value_t = 1.0,
        help = "Radius of the sphere scene or thickness of the slab scene."
    )]
    pub radius: Float,

    /// Incoming points kept per batch.
    #[clap(
        long,
        short = 'k',
        value_name = "NUM",
        default_value_t = 256,
        help = "Maximum number of incoming points kept per batch."
    )]
    pub keep: usize,

    /// Amplitude of the normal jitter applied at incoming points.
    #[clap(
        long,
        value_name = "FLOAT",
        default_value_t = 0.0,
        help = "Jitter the shading normal at incoming points by this amplitude (0 disables bump shading)."
    )]
    pub bump: Float,

    /// Suppress all text output other than error messages.
    #[clap(long, help = "Suppress all text output other than error messages.")]
    pub quiet: bool,
}

impl Options {
    /// Returns the number of threads to use.
    pub fn threads(&self) -> usize {
        let max_threads = num_cpus::get();
        match self.n_threads {
            0 => {
                warn!("Invalid nthreads");
                1
            }
            n if n > max_threads => {
                warn!("Num threads > max logical CPUs {}", max_threads);
                max_threads
            }
            n => n,
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
