//! Validation of packed layouts against the geometric invariants.

use crate::config::float_cmp::fits;
use crate::model::{PackingResult, Placement, Sheet};
use serde::Serialize;

/// Validation result with warnings.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationResult {
    /// Whether validation passed.
    pub passed: bool,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Error messages.
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Create a passing result.
    pub fn ok() -> Self {
        Self {
            passed: true,
            ..Default::default()
        }
    }

    /// Add a warning.
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Add an error.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.passed = false;
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.warnings.extend(other.warnings);
        self.errors.extend(other.errors);
        if !other.passed {
            self.passed = false;
        }
    }
}

/// Validate a whole layout. `expected_parts` is the number of parts that were packed.
pub fn validate_result(result: &PackingResult, expected_parts: usize) -> ValidationResult {
    let mut validation = ValidationResult::ok();

    let placed = result.placement_count();
    if placed != expected_parts {
        validation.add_error(format!(
            "Layout holds {} part(s), expected {}",
            placed, expected_parts
        ));
    }

    for (idx, sheet) in result.sheets.iter().enumerate() {
        if sheet.id != idx + 1 {
            validation.add_error(format!(
                "Sheet at position {} has id {}",
                idx + 1,
                sheet.id
            ));
        }
        validation.merge(validate_sheet(sheet, result.sheet_width, result.sheet_height));
    }

    validation
}

/// Validate a single sheet.
pub fn validate_sheet(sheet: &Sheet, sheet_width: f64, sheet_height: f64) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if sheet.placement_count() == 0 {
        result.add_warning(format!("Sheet {}: No parts placed", sheet.id));
    }

    for (row_idx, row) in sheet.rows.iter().enumerate() {
        for placement in &row.placements {
            if !fits(row.height, placement.height) {
                result.add_error(format!(
                    "Sheet {}, Row {}: {} is deeper than the row ({} > {})",
                    sheet.id,
                    row_idx + 1,
                    placement.name,
                    placement.height,
                    row.height
                ));
            }
        }
    }

    for placement in sheet.placements() {
        if !placement.is_within(sheet_width, sheet_height) {
            result.add_error(format!(
                "Sheet {}: {} at ({}, {}) extends beyond sheet bounds ({} x {})",
                sheet.id, placement.name, placement.x, placement.y, sheet_width, sheet_height
            ));
        }
    }

    let placements: Vec<&Placement> = sheet.placements().collect();
    for (i, j) in find_overlaps(&placements) {
        result.add_error(format!(
            "Sheet {}: {} overlaps {}",
            sheet.id, placements[i].name, placements[j].name
        ));
    }

    result
}

/// Index pairs of overlapping placements.
pub fn find_overlaps(placements: &[&Placement]) -> Vec<(usize, usize)> {
    let mut overlaps = Vec::new();

    for i in 0..placements.len() {
        for j in i + 1..placements.len() {
            if placements[i].overlaps(placements[j]) {
                overlaps.push((i, j));
            }
        }
    }

    overlaps
}
