//! Output generators: text report, JSON and DXF drawings.

mod dxf;
mod report;

pub use dxf::{generate_dxf, generate_sheet_dxf, DxfWriter};
pub use report::{format_amount, generate_json, generate_report};
