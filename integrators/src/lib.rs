//! Integrators

#[macro_use]
extern crate log;

mod subsurface;

// Re-export.
pub use subsurface::*;
