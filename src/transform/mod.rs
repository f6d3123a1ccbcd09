//! Transformations from user input to engine input.

mod expand;
mod stock;

pub use expand::*;
pub use stock::*;
