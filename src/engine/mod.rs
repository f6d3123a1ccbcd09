//! Shelf packing engine.

mod order;
mod shelf;

pub use order::order_parts;
pub use shelf::{pack, PackingEngine};
