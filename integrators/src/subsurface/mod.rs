//! Subsurface Scattering

mod basis;
mod chamber;
mod collector;
mod mis;
mod sampler;

// Re-export
pub use basis::*;
pub use chamber::*;
pub use collector::*;
pub use mis::*;
pub use sampler::*;
