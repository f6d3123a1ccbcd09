//! Material master table: board materials and their per-size prices.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A board material offered in one or more stock sizes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Material {
    /// Intended use (e.g. "substrate").
    pub usage: String,
    pub name: String,
    /// Board thickness in mm.
    pub thickness: f64,
    /// Price per sheet keyed by stock label.
    pub prices: BTreeMap<String, f64>,
}

impl Material {
    /// Create a new material with no prices.
    pub fn new(usage: impl Into<String>, name: impl Into<String>, thickness: f64) -> Self {
        Self {
            usage: usage.into(),
            name: name.into(),
            thickness,
            prices: BTreeMap::new(),
        }
    }

    /// Add a per-sheet price for a stock label.
    pub fn with_price(mut self, label: impl Into<String>, price: f64) -> Self {
        self.prices.insert(label.into(), price);
        self
    }

    /// Price for the given stock label, if the material lists one.
    pub fn price_for(&self, label: &str) -> Option<f64> {
        self.prices.get(label).copied()
    }
}

/// Ordered list of materials, looked up by name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MaterialTable {
    pub materials: Vec<Material>,
}

impl MaterialTable {
    /// Create a table from a list of materials.
    pub fn new(materials: Vec<Material>) -> Self {
        Self { materials }
    }

    /// The built-in table shipped with the tool.
    pub fn builtin() -> Self {
        use crate::config::{LABEL_3X6, LABEL_4X8};

        Self::new(vec![
            Material::new("substrate", "Poly board (white)", 2.5)
                .with_price(LABEL_3X6, 4500.0)
                .with_price(LABEL_4X8, 7200.0),
            Material::new("substrate", "Lauan lumber core", 15.0)
                .with_price(LABEL_3X6, 2250.0)
                .with_price(LABEL_4X8, 3600.0),
        ])
    }

    /// Find a material by exact name.
    pub fn find(&self, name: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.name == name)
    }

    /// First material in the table.
    pub fn first(&self) -> Option<&Material> {
        self.materials.first()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}
