//! Stock sizes and the candidates evaluated by the selector.

use crate::config::{LABEL_3X6, LABEL_4X8, NOMINAL_3X6, NOMINAL_4X8};
use crate::error::{NestError, Result};
use serde::{Deserialize, Serialize};

/// A nominal stock panel size as sold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockSize {
    pub label: String,
    /// Nominal width in mm.
    pub width: f64,
    /// Nominal height in mm.
    pub height: f64,
    /// Fixed price per sheet, used when the material does not price this size.
    pub price: Option<f64>,
}

impl StockSize {
    /// Create a new stock size.
    pub fn new(label: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            label: label.into(),
            width,
            height,
            price: None,
        }
    }

    /// Set a fixed per-sheet price.
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    /// Standard 3x6 and 4x8 panels.
    pub fn standard() -> Vec<StockSize> {
        vec![
            StockSize::new(LABEL_3X6, NOMINAL_3X6.0, NOMINAL_3X6.1),
            StockSize::new(LABEL_4X8, NOMINAL_4X8.0, NOMINAL_4X8.1),
        ]
    }

    /// Build a packing candidate with the trim margin removed.
    pub fn to_candidate(&self, trim_margin: f64, unit_price: f64) -> Result<Candidate> {
        if trim_margin < 0.0 {
            return Err(NestError::InvalidDimension {
                what: "trim margin".to_string(),
                requirement: "non-negative",
                value: trim_margin,
            });
        }
        let candidate = Candidate::new(
            self.label.clone(),
            self.width - trim_margin,
            self.height - trim_margin,
            unit_price,
        );
        candidate.validate()?;
        Ok(candidate)
    }
}

/// One stock configuration under evaluation, with usable (net) dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub label: String,
    pub sheet_width: f64,
    pub sheet_height: f64,
    /// Cost per sheet. Zero means the size is not offered for the material.
    pub unit_price: f64,
}

impl Candidate {
    /// Create a new candidate.
    pub fn new(
        label: impl Into<String>,
        sheet_width: f64,
        sheet_height: f64,
        unit_price: f64,
    ) -> Self {
        Self {
            label: label.into(),
            sheet_width,
            sheet_height,
            unit_price,
        }
    }

    /// Check that the sheet dimensions are positive and the price non-negative.
    pub fn validate(&self) -> Result<()> {
        if !(self.sheet_width > 0.0) {
            return Err(NestError::InvalidDimension {
                what: format!("sheet width of '{}'", self.label),
                requirement: "positive",
                value: self.sheet_width,
            });
        }
        if !(self.sheet_height > 0.0) {
            return Err(NestError::InvalidDimension {
                what: format!("sheet height of '{}'", self.label),
                requirement: "positive",
                value: self.sheet_height,
            });
        }
        if !(self.unit_price >= 0.0) {
            return Err(NestError::InvalidDimension {
                what: format!("unit price of '{}'", self.label),
                requirement: "non-negative",
                value: self.unit_price,
            });
        }
        Ok(())
    }

    /// Whether this candidate takes part in cost comparison.
    pub fn is_priced(&self) -> bool {
        self.unit_price > 0.0
    }

    /// Sheet area.
    pub fn area(&self) -> f64 {
        self.sheet_width * self.sheet_height
    }
}
