//! DXF (Drawing Exchange Format) generator for sheet layouts.
//!
//! Produces one AutoCAD R12 drawing per sheet: the sheet boundary, each part as
//! a filled outline, and a name/size label at the part's center.

use crate::model::{PackingResult, Placement, Sheet};
use std::fmt::Write;

/// Layer names used in generated drawings.
const LAYER_SHEET: &str = "SHEET";
const LAYER_PARTS: &str = "PARTS";
const LAYER_FILL: &str = "FILL";
const LAYER_LABELS: &str = "LABELS";

/// DXF layer colors (AutoCAD color indices)
pub struct DxfColors {
    pub sheet: i32,  // Sheet boundary
    pub parts: i32,  // Part outlines
    pub fill: i32,   // Part fill
    pub labels: i32, // Name and size text
}

impl Default for DxfColors {
    fn default() -> Self {
        Self {
            sheet: 5,   // Blue
            parts: 7,   // White/black
            fill: 42,   // Light brown (burlywood)
            labels: 5,  // Blue
        }
    }
}

/// DXF writer for generating AutoCAD-compatible drawings.
pub struct DxfWriter {
    output: String,
}

impl Default for DxfWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl DxfWriter {
    pub fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    /// Get the generated DXF content.
    pub fn into_string(self) -> String {
        self.output
    }

    /// Write a DXF group code and value. Codes are right-aligned to three columns.
    fn write_group(&mut self, code: i32, value: &str) {
        writeln!(self.output, "{:>3}", code).unwrap();
        writeln!(self.output, "{}", value).unwrap();
    }

    /// Write a DXF group code with integer value (right-aligned in 6 chars).
    fn write_group_int(&mut self, code: i32, value: i32) {
        writeln!(self.output, "{:>3}", code).unwrap();
        writeln!(self.output, "{:>6}", value).unwrap();
    }

    /// Format a coordinate with 3 decimal places, rounding half away from zero.
    fn format_coord(value: f64) -> String {
        let scaled = value * 1000.0;
        let rounded = if scaled >= 0.0 {
            (scaled + 0.5).floor()
        } else {
            (scaled - 0.5).ceil()
        };
        format!("{:.3}", rounded / 1000.0)
    }

    /// Write the DXF header section with the drawing extents.
    pub fn write_header(&mut self, width: f64, height: f64) {
        self.write_group(0, "SECTION");
        self.write_group(2, "HEADER");

        self.write_group(9, "$ACADVER");
        self.write_group(1, "AC1009");

        self.write_group(9, "$INSUNITS");
        self.write_group_int(70, 4); // millimeters

        self.write_group(9, "$EXTMIN");
        self.write_group(10, "0.000");
        self.write_group(20, "0.000");

        self.write_group(9, "$EXTMAX");
        self.write_group(10, &Self::format_coord(width));
        self.write_group(20, &Self::format_coord(height));

        self.write_group(0, "ENDSEC");
    }

    /// Write the tables section with layer definitions.
    pub fn write_tables(&mut self, layers: &[(&str, i32)]) {
        self.write_group(0, "SECTION");
        self.write_group(2, "TABLES");

        self.write_group(0, "TABLE");
        self.write_group(2, "LTYPE");
        self.write_group_int(70, 1);
        self.write_group(0, "LTYPE");
        self.write_group(2, "CONTINUOUS");
        self.write_group_int(70, 64);
        self.write_group(3, "Solid line");
        self.write_group_int(72, 65);
        self.write_group_int(73, 0);
        self.write_group(40, "0.0");
        self.write_group(0, "ENDTAB");

        self.write_group(0, "TABLE");
        self.write_group(2, "LAYER");
        self.write_group_int(70, layers.len() as i32);
        for (name, color) in layers {
            self.write_layer(name, *color);
        }
        self.write_group(0, "ENDTAB");

        self.write_group(0, "ENDSEC");
    }

    /// Write a layer definition.
    fn write_layer(&mut self, name: &str, color: i32) {
        self.write_group(0, "LAYER");
        self.write_group(2, name);
        self.write_group_int(70, 64);
        self.write_group(62, &color.to_string());
        self.write_group(6, "CONTINUOUS");
    }

    /// Begin the entities section.
    pub fn begin_entities(&mut self) {
        self.write_group(0, "SECTION");
        self.write_group(2, "ENTITIES");
    }

    /// End the entities section and write EOF.
    pub fn end_entities(&mut self) {
        self.write_group(0, "ENDSEC");
        self.write_group(0, "EOF");
    }

    /// Write a LINE entity.
    pub fn write_line_entity(
        &mut self,
        layer: &str,
        color: i32,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    ) {
        self.write_group(0, "LINE");
        self.write_group(8, layer);
        self.write_group(62, &color.to_string());
        self.write_group(10, &Self::format_coord(x1));
        self.write_group(20, &Self::format_coord(y1));
        self.write_group(30, "0.000");
        self.write_group(11, &Self::format_coord(x2));
        self.write_group(21, &Self::format_coord(y2));
        self.write_group(31, "0.000");
    }

    /// Write a closed rectangle as four LINE entities.
    pub fn write_rectangle(
        &mut self,
        layer: &str,
        color: i32,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) {
        let (x2, y2) = (x + width, y + height);
        self.write_line_entity(layer, color, x, y, x2, y);
        self.write_line_entity(layer, color, x2, y, x2, y2);
        self.write_line_entity(layer, color, x2, y2, x, y2);
        self.write_line_entity(layer, color, x, y2, x, y);
    }

    /// Write a SOLID entity (filled rectangle).
    pub fn write_solid_entity(
        &mut self,
        layer: &str,
        color: i32,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) {
        self.write_group(0, "SOLID");
        self.write_group(8, layer);
        self.write_group(62, &color.to_string());
        self.write_group(10, &Self::format_coord(x));
        self.write_group(20, &Self::format_coord(y));
        self.write_group(30, "0.000");
        self.write_group(11, &Self::format_coord(x + width));
        self.write_group(21, &Self::format_coord(y));
        self.write_group(31, "0.000");
        // SOLID vertices 3 and 4 are swapped relative to polygon order.
        self.write_group(12, &Self::format_coord(x));
        self.write_group(22, &Self::format_coord(y + height));
        self.write_group(32, "0.000");
        self.write_group(13, &Self::format_coord(x + width));
        self.write_group(23, &Self::format_coord(y + height));
        self.write_group(33, "0.000");
    }

    /// Write a centered TEXT entity.
    pub fn write_text_entity(
        &mut self,
        layer: &str,
        color: i32,
        x: f64,
        y: f64,
        height: f64,
        text: &str,
    ) {
        self.write_group(0, "TEXT");
        self.write_group(8, layer);
        self.write_group(62, &color.to_string());
        self.write_group(10, &Self::format_coord(x));
        self.write_group(20, &Self::format_coord(y));
        self.write_group(30, "0.000");
        self.write_group(40, &Self::format_coord(height));
        self.write_group(1, text);
        self.write_group_int(72, 1); // center
        self.write_group(11, &Self::format_coord(x));
        self.write_group(21, &Self::format_coord(y));
        self.write_group(31, "0.000");
    }
}

/// Label text height for a part: a fraction of its smaller side, capped.
fn label_height(placement: &Placement) -> f64 {
    (placement.width.min(placement.height) / 8.0).clamp(5.0, 40.0)
}

/// Draw one part: fill, outline, then name and size labels.
fn draw_placement(dxf: &mut DxfWriter, placement: &Placement, colors: &DxfColors) {
    let (x, y, w, h) = (placement.x, placement.y, placement.width, placement.height);
    dxf.write_solid_entity(LAYER_FILL, colors.fill, x, y, w, h);
    dxf.write_rectangle(LAYER_PARTS, colors.parts, x, y, w, h);

    let text_height = label_height(placement);
    let cx = x + w / 2.0;
    let cy = y + h / 2.0;
    dxf.write_text_entity(
        LAYER_LABELS,
        colors.labels,
        cx,
        cy + text_height * 0.75,
        text_height,
        &placement.name,
    );
    dxf.write_text_entity(
        LAYER_LABELS,
        colors.labels,
        cx,
        cy - text_height * 0.75,
        text_height,
        &format!("{} x {}", placement.width, placement.height),
    );
}

/// Generate the drawing of one sheet of a layout.
pub fn generate_sheet_dxf(result: &PackingResult, sheet: &Sheet) -> String {
    let colors = DxfColors::default();
    let mut dxf = DxfWriter::new();

    dxf.write_header(result.sheet_width, result.sheet_height);
    dxf.write_tables(&[
        (LAYER_SHEET, colors.sheet),
        (LAYER_PARTS, colors.parts),
        (LAYER_FILL, colors.fill),
        (LAYER_LABELS, colors.labels),
    ]);

    dxf.begin_entities();
    dxf.write_rectangle(
        LAYER_SHEET,
        colors.sheet,
        0.0,
        0.0,
        result.sheet_width,
        result.sheet_height,
    );
    for placement in sheet.placements() {
        draw_placement(&mut dxf, placement, &colors);
    }
    dxf.end_entities();

    dxf.into_string()
}

/// Generate one drawing per sheet, paired with the sheet id.
pub fn generate_dxf(result: &PackingResult) -> Vec<(usize, String)> {
    result
        .sheets
        .iter()
        .map(|sheet| (sheet.id, generate_sheet_dxf(result, sheet)))
        .collect()
}
