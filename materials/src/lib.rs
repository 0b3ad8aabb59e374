//! Materials

#[macro_use]
extern crate log;

mod bump;
mod gaussian;
mod translucent;

// Re-export
pub use bump::*;
pub use gaussian::*;
pub use translucent::*;
