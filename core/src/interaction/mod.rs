//! Interactions

mod shading_point;

// Re-export
pub use shading_point::*;
