//! Core

extern crate bitflags;
#[macro_use]
extern crate hexf;
#[macro_use]
extern crate log;

// Geometry first so the property test macros are visible to later modules.
#[macro_use]
pub mod geometry;

// Re-export.
pub mod app;
pub mod bssrdf;
pub mod interaction;
pub mod material;
pub mod pbrt;
pub mod rng;
pub mod sampler;
pub mod sampling;
pub mod scene;
pub mod shading_context;
pub mod shape;
pub mod stats;
