//! A nesting job: everything the caller supplies for one computation.

use crate::config::{NestConfig, Unit};
use crate::error::{NestError, Result};
use serde::{Deserialize, Serialize};

use super::{Material, MaterialTable, PartSpec, StockSize};

/// Caller-owned input for one nesting run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Job {
    pub config: NestConfig,
    /// Unit the job file was written in; all stored values are already in mm.
    pub unit: Unit,
    pub materials: MaterialTable,
    /// Selected material name. `None` selects the first material of the table.
    pub material: Option<String>,
    pub stock: Vec<StockSize>,
    pub parts: Vec<PartSpec>,
}

impl Job {
    /// A job with the built-in material table, standard stock and no parts.
    pub fn new() -> Self {
        Self {
            materials: MaterialTable::builtin(),
            stock: StockSize::standard(),
            ..Default::default()
        }
    }

    /// Add a part row.
    pub fn with_part(mut self, part: PartSpec) -> Self {
        self.parts.push(part);
        self
    }

    /// Resolve the selected material.
    pub fn selected_material(&self) -> Result<Option<&Material>> {
        match &self.material {
            Some(name) => self
                .materials
                .find(name)
                .map(Some)
                .ok_or_else(|| NestError::UnknownMaterial { name: name.clone() }),
            None => Ok(self.materials.first()),
        }
    }

    /// Total number of physical parts requested.
    pub fn part_count(&self) -> usize {
        self.parts.iter().map(|p| p.quantity as usize).sum()
    }
}
