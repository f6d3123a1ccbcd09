//! First-fit decreasing shelf packer.
//!
//! Parts are laid left to right in horizontal rows. A row's height is fixed by
//! its first part; later parts join the first row that is deep enough and has
//! width left. When no row accepts a part, a new row is opened on top of the
//! used height of the first sheet with room, and failing that a new sheet is
//! started. Parts are never rotated.

use crate::config::float_cmp::fits;
use crate::config::{FillOrder, NestConfig, OversizePolicy, SortOrder};
use crate::error::{NestError, OversizedPart, Result};
use crate::model::{PackingResult, Part, Sheet};

use super::order::order_parts;

/// Packing engine parameterized by kerf and strategy knobs. Holds no state between runs.
#[derive(Debug, Clone, PartialEq)]
pub struct PackingEngine {
    /// Blade kerf added after every placement and every row.
    pub kerf: f64,
    pub sort_order: SortOrder,
    pub fill_order: FillOrder,
    pub oversize_policy: OversizePolicy,
}

impl Default for PackingEngine {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_KERF)
    }
}

impl PackingEngine {
    /// Create an engine with the given kerf and default strategies.
    pub fn new(kerf: f64) -> Self {
        Self {
            kerf,
            sort_order: SortOrder::default(),
            fill_order: FillOrder::default(),
            oversize_policy: OversizePolicy::default(),
        }
    }

    /// Create an engine from a run configuration.
    pub fn from_config(config: &NestConfig) -> Self {
        Self {
            kerf: config.kerf,
            sort_order: config.sort_order,
            fill_order: config.fill_order,
            oversize_policy: config.oversize_policy,
        }
    }

    pub fn with_sort_order(mut self, sort_order: SortOrder) -> Self {
        self.sort_order = sort_order;
        self
    }

    pub fn with_fill_order(mut self, fill_order: FillOrder) -> Self {
        self.fill_order = fill_order;
        self
    }

    pub fn with_oversize_policy(mut self, oversize_policy: OversizePolicy) -> Self {
        self.oversize_policy = oversize_policy;
        self
    }

    /// Pack `parts` onto sheets of `sheet_width` x `sheet_height`.
    ///
    /// An empty part list yields zero sheets. Under [`OversizePolicy::Reject`]
    /// any part larger than the sheet fails the whole run with
    /// [`NestError::OversizedParts`]; under [`OversizePolicy::Allow`] such parts
    /// are placed anyway and overflow the sheet rectangle.
    pub fn pack(
        &self,
        parts: &[Part],
        sheet_width: f64,
        sheet_height: f64,
    ) -> Result<PackingResult> {
        check_dimensions(sheet_width, sheet_height, self.kerf)?;

        if self.oversize_policy == OversizePolicy::Reject {
            let oversized: Vec<OversizedPart> = parts
                .iter()
                .filter(|p| !p.fits_within(sheet_width, sheet_height))
                .map(|p| OversizedPart {
                    name: p.name.clone(),
                    width: p.width,
                    depth: p.depth,
                })
                .collect();
            if !oversized.is_empty() {
                return Err(NestError::OversizedParts {
                    sheet_width,
                    sheet_height,
                    parts: oversized,
                });
            }
        }

        let mut sheets: Vec<Sheet> = Vec::new();
        for part in order_parts(parts, self.sort_order) {
            let placed = match self.fill_order {
                FillOrder::RowsFirst => {
                    self.place_in_rows(&mut sheets, part, sheet_width)
                        || self.place_in_new_row(&mut sheets, part, sheet_height)
                }
                FillOrder::SheetBySheet => {
                    self.place_sheet_by_sheet(&mut sheets, part, sheet_width, sheet_height)
                }
            };

            if !placed {
                let mut sheet = Sheet::new(sheets.len() + 1);
                sheet.open_row(&part.name, part.width, part.depth, self.kerf);
                sheets.push(sheet);
            }
        }

        Ok(PackingResult {
            sheet_width,
            sheet_height,
            sheets,
        })
    }

    /// First existing row, over all sheets, that accepts the part.
    fn place_in_rows(&self, sheets: &mut [Sheet], part: &Part, sheet_width: f64) -> bool {
        let row = sheets
            .iter_mut()
            .flat_map(|s| s.rows.iter_mut())
            .find(|r| r.accepts(part.width, part.depth, sheet_width));

        match row {
            Some(row) => {
                row.place(&part.name, part.width, part.depth, self.kerf);
                true
            }
            None => false,
        }
    }

    /// New row on the first sheet with enough height left.
    fn place_in_new_row(&self, sheets: &mut [Sheet], part: &Part, sheet_height: f64) -> bool {
        match sheets
            .iter_mut()
            .find(|s| fits(sheet_height - s.used_height, part.depth))
        {
            Some(sheet) => {
                sheet.open_row(&part.name, part.width, part.depth, self.kerf);
                true
            }
            None => false,
        }
    }

    fn place_sheet_by_sheet(
        &self,
        sheets: &mut [Sheet],
        part: &Part,
        sheet_width: f64,
        sheet_height: f64,
    ) -> bool {
        for sheet in sheets.iter_mut() {
            if self.place_in_rows(std::slice::from_mut(sheet), part, sheet_width)
                || self.place_in_new_row(std::slice::from_mut(sheet), part, sheet_height)
            {
                return true;
            }
        }
        false
    }
}

/// Reject non-positive sheet sizes and negative kerf.
fn check_dimensions(sheet_width: f64, sheet_height: f64, kerf: f64) -> Result<()> {
    if !(sheet_width > 0.0) {
        return Err(NestError::InvalidDimension {
            what: "sheet width".to_string(),
            requirement: "positive",
            value: sheet_width,
        });
    }
    if !(sheet_height > 0.0) {
        return Err(NestError::InvalidDimension {
            what: "sheet height".to_string(),
            requirement: "positive",
            value: sheet_height,
        });
    }
    if !(kerf >= 0.0) {
        return Err(NestError::InvalidDimension {
            what: "kerf".to_string(),
            requirement: "non-negative",
            value: kerf,
        });
    }
    Ok(())
}

/// Pack with the default strategies and return the sheets.
pub fn pack(parts: &[Part], sheet_width: f64, sheet_height: f64, kerf: f64) -> Result<Vec<Sheet>> {
    Ok(PackingEngine::new(kerf)
        .pack(parts, sheet_width, sheet_height)?
        .sheets)
}
