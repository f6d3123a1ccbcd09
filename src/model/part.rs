//! Part definitions: the pieces to be cut from stock sheets.

use crate::error::{NestError, Result};
use serde::{Deserialize, Serialize};

/// A single physical piece to be cut.
///
/// `width` always runs along the sheet's horizontal axis and `depth` along the
/// row-height axis; parts are never rotated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    /// Display label. May repeat across parts.
    pub name: String,
    /// Horizontal size in mm.
    pub width: f64,
    /// Vertical size in mm.
    pub depth: f64,
}

impl Part {
    /// Create a new part, rejecting dimensions that are not positive and finite.
    pub fn new(name: impl Into<String>, width: f64, depth: f64) -> Result<Self> {
        let name = name.into();
        if !(width > 0.0 && depth > 0.0 && width.is_finite() && depth.is_finite()) {
            return Err(NestError::InvalidPart { name, width, depth });
        }
        Ok(Self { name, width, depth })
    }

    /// Footprint area.
    pub fn area(&self) -> f64 {
        self.width * self.depth
    }

    /// Check whether the part fits a sheet of the given size without rotation.
    pub fn fits_within(&self, sheet_width: f64, sheet_height: f64) -> bool {
        use crate::config::float_cmp::fits;

        fits(sheet_width, self.width) && fits(sheet_height, self.depth)
    }
}

/// A user-entered part row with a quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartSpec {
    pub name: String,
    pub width: f64,
    pub depth: f64,
    pub quantity: u32,
}

impl PartSpec {
    /// Create a new part row.
    pub fn new(name: impl Into<String>, width: f64, depth: f64, quantity: u32) -> Self {
        Self {
            name: name.into(),
            width,
            depth,
            quantity,
        }
    }
}
