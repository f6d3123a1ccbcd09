//! Layout validation.

mod validate;

pub use validate::*;
