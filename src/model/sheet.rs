//! Sheet layout: rows (shelves) of placed parts.

use serde::{Deserialize, Serialize};

/// A part positioned on a sheet. `(x, y)` is the bottom-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Placement {
    /// Get the right edge X coordinate.
    pub fn x_max(&self) -> f64 {
        self.x + self.width
    }

    /// Get the top edge Y coordinate.
    pub fn y_max(&self) -> f64 {
        self.y + self.height
    }

    /// Footprint area.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Check whether two placements overlap (touching edges do not count).
    pub fn overlaps(&self, other: &Placement) -> bool {
        use crate::config::EPS;

        let x_overlap = self.x < other.x_max() - EPS && other.x < self.x_max() - EPS;
        let y_overlap = self.y < other.y_max() - EPS && other.y < self.y_max() - EPS;
        x_overlap && y_overlap
    }

    /// Check whether the placement lies inside a `width` x `height` sheet.
    pub fn is_within(&self, width: f64, height: f64) -> bool {
        use crate::config::float_cmp::in_range;

        in_range(self.x, 0.0, width)
            && in_range(self.y, 0.0, height)
            && in_range(self.x_max(), 0.0, width)
            && in_range(self.y_max(), 0.0, height)
    }
}

/// A horizontal shelf within a sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// Offset of the row's bottom edge.
    pub y: f64,
    /// Fixed at creation to the depth of the first part.
    pub height: f64,
    /// Consumed width including one kerf per placement.
    pub used_width: f64,
    pub placements: Vec<Placement>,
}

impl Row {
    /// Open a row at `y` holding `name` as its first part.
    pub fn open(y: f64, name: &str, width: f64, depth: f64, kerf: f64) -> Self {
        Self {
            y,
            height: depth,
            used_width: width + kerf,
            placements: vec![Placement {
                name: name.to_string(),
                x: 0.0,
                y,
                width,
                height: depth,
            }],
        }
    }

    /// Check whether a part can join this row on a sheet of `sheet_width`.
    pub fn accepts(&self, width: f64, depth: f64, sheet_width: f64) -> bool {
        use crate::config::float_cmp::fits;

        fits(self.height, depth) && fits(sheet_width - self.used_width, width)
    }

    /// Append a part at the current end of the row.
    pub fn place(&mut self, name: &str, width: f64, depth: f64, kerf: f64) {
        self.placements.push(Placement {
            name: name.to_string(),
            x: self.used_width,
            y: self.y,
            width,
            height: depth,
        });
        self.used_width += width + kerf;
    }
}

/// One physical stock panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    /// 1-based, in creation order.
    pub id: usize,
    /// Consumed height including one kerf per row.
    pub used_height: f64,
    pub rows: Vec<Row>,
}

impl Sheet {
    /// Create an empty sheet.
    pub fn new(id: usize) -> Self {
        Self {
            id,
            used_height: 0.0,
            rows: Vec::new(),
        }
    }

    /// Open a new row at the current used height and place the part in it.
    pub fn open_row(&mut self, name: &str, width: f64, depth: f64, kerf: f64) {
        self.rows
            .push(Row::open(self.used_height, name, width, depth, kerf));
        self.used_height += depth + kerf;
    }

    /// Iterate over all placements in row order.
    pub fn placements(&self) -> impl Iterator<Item = &Placement> {
        self.rows.iter().flat_map(|r| r.placements.iter())
    }

    /// Number of parts on this sheet.
    pub fn placement_count(&self) -> usize {
        self.rows.iter().map(|r| r.placements.len()).sum()
    }

    /// Total area covered by parts.
    pub fn used_area(&self) -> f64 {
        self.placements().map(Placement::area).sum()
    }
}

/// Output of one packing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackingResult {
    pub sheet_width: f64,
    pub sheet_height: f64,
    pub sheets: Vec<Sheet>,
}

impl PackingResult {
    /// Number of sheets used.
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Number of parts placed over all sheets.
    pub fn placement_count(&self) -> usize {
        self.sheets.iter().map(Sheet::placement_count).sum()
    }

    /// Material cost at the given unit price.
    pub fn cost(&self, unit_price: f64) -> f64 {
        self.sheet_count() as f64 * unit_price
    }

    /// Area of one sheet.
    pub fn sheet_area(&self) -> f64 {
        self.sheet_width * self.sheet_height
    }

    /// Fraction of a sheet's area covered by parts, in `0.0..=1.0` for valid layouts.
    pub fn utilization(&self, sheet: &Sheet) -> f64 {
        let area = self.sheet_area();
        if area <= 0.0 {
            return 0.0;
        }
        sheet.used_area() / area
    }

    /// Overall utilization across all sheets.
    pub fn total_utilization(&self) -> f64 {
        let total = self.sheet_area() * self.sheet_count() as f64;
        if total <= 0.0 {
            return 0.0;
        }
        self.sheets.iter().map(Sheet::used_area).sum::<f64>() / total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::float_cmp::approx_eq;

    fn placement(x: f64, y: f64, w: f64, h: f64) -> Placement {
        Placement {
            name: "P".to_string(),
            x,
            y,
            width: w,
            height: h,
        }
    }

    // ==================== Placement tests ====================

    #[test]
    fn test_overlap_detected() {
        let a = placement(0.0, 0.0, 100.0, 100.0);
        let b = placement(50.0, 50.0, 100.0, 100.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = placement(0.0, 0.0, 100.0, 100.0);
        let b = placement(100.0, 0.0, 100.0, 100.0);
        let c = placement(0.0, 100.0, 100.0, 100.0);
        assert!(!a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_is_within() {
        assert!(placement(0.0, 0.0, 1810.0, 900.0).is_within(1810.0, 900.0));
        assert!(!placement(10.0, 0.0, 1810.0, 900.0).is_within(1810.0, 900.0));
    }

    // ==================== Row tests ====================

    #[test]
    fn test_row_open_and_place() {
        let mut row = Row::open(453.0, "B-1", 600.0, 300.0, 3.0);
        assert_eq!(row.used_width, 603.0);
        assert!(row.accepts(600.0, 300.0, 1810.0));
        row.place("B-2", 600.0, 300.0, 3.0);
        assert_eq!(row.placements[1].x, 603.0);
        assert_eq!(row.placements[1].y, 453.0);
        assert_eq!(row.used_width, 1206.0);
    }

    #[test]
    fn test_row_rejects_deeper_part() {
        let row = Row::open(0.0, "B-1", 600.0, 300.0, 3.0);
        assert!(!row.accepts(100.0, 301.0, 1810.0));
    }

    #[test]
    fn test_row_rejects_when_full() {
        let row = Row::open(0.0, "A-1", 1500.0, 300.0, 3.0);
        assert!(!row.accepts(400.0, 100.0, 1810.0));
    }

    // ==================== Sheet tests ====================

    #[test]
    fn test_sheet_open_row_advances_height() {
        let mut sheet = Sheet::new(1);
        sheet.open_row("A", 900.0, 450.0, 3.0);
        sheet.open_row("B", 600.0, 300.0, 3.0);
        assert_eq!(sheet.used_height, 756.0);
        assert_eq!(sheet.rows[1].y, 453.0);
        assert_eq!(sheet.placement_count(), 2);
    }

    #[test]
    fn test_result_cost_and_utilization() {
        let mut sheet = Sheet::new(1);
        sheet.open_row("A", 500.0, 500.0, 0.0);
        let result = PackingResult {
            sheet_width: 1000.0,
            sheet_height: 1000.0,
            sheets: vec![sheet],
        };
        assert_eq!(result.cost(2250.0), 2250.0);
        assert!(approx_eq(result.utilization(&result.sheets[0]), 0.25));
        assert!(approx_eq(result.total_utilization(), 0.25));
    }
}
