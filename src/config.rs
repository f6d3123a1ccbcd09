//! Configuration constants and settings for the nesting engine.

use serde::{Deserialize, Serialize};

/// Floating-point comparison epsilon.
pub const EPS: f64 = 0.0001;

/// Default blade kerf in mm.
pub const DEFAULT_KERF: f64 = 3.0;

/// Default trim margin removed from nominal stock dimensions, in mm.
pub const DEFAULT_TRIM_MARGIN: f64 = 10.0;

/// Conversion factor: inch to mm.
pub const CONV_INCH_MM: f64 = 25.4;

/// Label of the standard 3x6 (saburoku) panel.
pub const LABEL_3X6: &str = "3x6";

/// Label of the standard 4x8 (shihachi) panel.
pub const LABEL_4X8: &str = "4x8";

/// Nominal 3x6 panel size in mm (width, height).
pub const NOMINAL_3X6: (f64, f64) = (1820.0, 910.0);

/// Nominal 4x8 panel size in mm (width, height).
pub const NOMINAL_4X8: (f64, f64) = (2424.0, 1212.0);

/// Unit of measurement used in job files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Unit {
    #[default]
    Millimeters,
    Inches,
}

impl Unit {
    /// Parse unit from a job file `Unit=` value.
    pub fn from_unit_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "mm" => Some(Unit::Millimeters),
            "inch" | "in" => Some(Unit::Inches),
            _ => None,
        }
    }

    /// Get the conversion factor to convert from this unit to millimeters.
    pub fn to_mm_factor(&self) -> f64 {
        match self {
            Unit::Millimeters => 1.0,
            Unit::Inches => CONV_INCH_MM,
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unit::Millimeters => write!(f, "mm"),
            Unit::Inches => write!(f, "inch"),
        }
    }
}

/// Order in which parts are fed to the shelf packer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    /// Descending by width, then by depth.
    #[default]
    WidthDepth,
    /// Descending by depth, then by width.
    DepthWidth,
    /// Keep the caller's order (user-specified priority).
    Input,
}

impl SortOrder {
    /// Parse from a job file `Sort=` value.
    pub fn from_sort_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "width-depth" | "width" => Some(SortOrder::WidthDepth),
            "depth-width" | "depth" => Some(SortOrder::DepthWidth),
            "input" | "none" => Some(SortOrder::Input),
            _ => None,
        }
    }
}

/// What the packer does with a part that exceeds the sheet in either dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OversizePolicy {
    /// Refuse to pack and report every offending part.
    #[default]
    Reject,
    /// Place the part anyway; the placement overflows the sheet rectangle.
    Allow,
}

impl OversizePolicy {
    /// Parse from a job file `Oversize=` value.
    pub fn from_policy_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "reject" => Some(OversizePolicy::Reject),
            "allow" => Some(OversizePolicy::Allow),
            _ => None,
        }
    }
}

/// Where the packer looks before opening a new row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FillOrder {
    /// Try every existing row on every sheet, then a new row on any sheet.
    #[default]
    RowsFirst,
    /// Finish each sheet (its rows, then a new row) before moving to the next.
    SheetBySheet,
}

impl FillOrder {
    /// Parse from a job file `Fill=` value.
    pub fn from_fill_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "rows-first" => Some(FillOrder::RowsFirst),
            "sheet-by-sheet" => Some(FillOrder::SheetBySheet),
            _ => None,
        }
    }
}

/// How quantity rows are expanded into individually named parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PartNaming {
    /// `Shelf A-1`, `Shelf A-2`, ...
    #[default]
    Indexed,
    /// Every unit keeps the row name.
    Plain,
}

impl PartNaming {
    /// Parse from a job file `Naming=` value.
    pub fn from_naming_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "indexed" => Some(PartNaming::Indexed),
            "plain" => Some(PartNaming::Plain),
            _ => None,
        }
    }
}

/// Stock selection policy.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SelectionMode {
    /// Compare all offered stock sizes and pick the cheapest.
    #[default]
    Auto,
    /// Use the stock size with this label.
    Fixed(String),
}

impl SelectionMode {
    /// Parse from a job file `Mode=` value. Anything other than `auto` is a label.
    pub fn from_mode_str(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("auto") {
            SelectionMode::Auto
        } else {
            SelectionMode::Fixed(s.to_string())
        }
    }
}

impl std::fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionMode::Auto => write!(f, "auto"),
            SelectionMode::Fixed(label) => write!(f, "fixed ({})", label),
        }
    }
}

/// Nesting run configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NestConfig {
    /// Blade kerf in mm.
    pub kerf: f64,
    /// Trim margin subtracted from nominal stock dimensions, in mm.
    pub trim_margin: f64,
    /// Part ordering fed to the packer.
    pub sort_order: SortOrder,
    /// Row search order.
    pub fill_order: FillOrder,
    /// Oversized part handling.
    pub oversize_policy: OversizePolicy,
    /// Quantity expansion naming.
    pub naming: PartNaming,
    /// Stock selection policy.
    pub mode: SelectionMode,
}

impl Default for NestConfig {
    fn default() -> Self {
        Self {
            kerf: DEFAULT_KERF,
            trim_margin: DEFAULT_TRIM_MARGIN,
            sort_order: SortOrder::default(),
            fill_order: FillOrder::default(),
            oversize_policy: OversizePolicy::default(),
            naming: PartNaming::default(),
            mode: SelectionMode::default(),
        }
    }
}

impl NestConfig {
    /// Create a configuration with the given kerf and defaults elsewhere.
    pub fn with_kerf(kerf: f64) -> Self {
        Self {
            kerf,
            ..Default::default()
        }
    }
}

/// Utility functions for floating-point comparisons.
pub mod float_cmp {
    use super::EPS;

    /// Check if two floats are approximately equal.
    #[inline]
    pub fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    /// Check if `needed` fits into `available` with epsilon tolerance.
    #[inline]
    pub fn fits(available: f64, needed: f64) -> bool {
        available + EPS >= needed
    }

    /// Check if a is in range [min, max] with epsilon tolerance.
    #[inline]
    pub fn in_range(a: f64, min: f64, max: f64) -> bool {
        a >= min - EPS && a <= max + EPS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_parsing() {
        assert_eq!(Unit::from_unit_str("mm"), Some(Unit::Millimeters));
        assert_eq!(Unit::from_unit_str(" Inch "), Some(Unit::Inches));
        assert_eq!(Unit::from_unit_str("cm"), None);
        assert_eq!(Unit::Inches.to_mm_factor(), CONV_INCH_MM);
    }

    #[test]
    fn test_selection_mode_parsing() {
        assert_eq!(SelectionMode::from_mode_str("AUTO"), SelectionMode::Auto);
        assert_eq!(SelectionMode::from_mode_str(""), SelectionMode::Auto);
        assert_eq!(
            SelectionMode::from_mode_str("4x8"),
            SelectionMode::Fixed("4x8".to_string())
        );
    }

    #[test]
    fn test_sort_order_parsing() {
        assert_eq!(
            SortOrder::from_sort_str("depth-width"),
            Some(SortOrder::DepthWidth)
        );
        assert_eq!(SortOrder::from_sort_str("input"), Some(SortOrder::Input));
        assert_eq!(SortOrder::from_sort_str("area"), None);
    }

    #[test]
    fn test_default_config() {
        let config = NestConfig::default();
        assert_eq!(config.kerf, 3.0);
        assert_eq!(config.trim_margin, 10.0);
        assert_eq!(config.oversize_policy, OversizePolicy::Reject);
        assert_eq!(config.mode, SelectionMode::Auto);
    }

    #[test]
    fn test_fits_tolerance() {
        assert!(float_cmp::fits(600.0, 600.0));
        assert!(float_cmp::fits(599.99995, 600.0));
        assert!(!float_cmp::fits(599.0, 600.0));
    }
}
