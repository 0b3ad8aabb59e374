//! Sampling

mod mis;

// Re-export
pub use mis::*;
