//! Plain-text estimate and cutting list.

use crate::plan::Plan;
use std::fmt::Write;

/// Format a monetary amount rounded to whole units with thousands separators.
pub fn format_amount(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Generate the estimate summary followed by the per-sheet cutting list.
pub fn generate_report(plan: &Plan) -> String {
    let selection = &plan.selection;
    let layout = &selection.layout;
    let mut out = String::new();

    let material = match &plan.material {
        Some(m) => format!("{} ({} mm)", m.name, m.thickness),
        None => "(none)".to_string(),
    };
    writeln!(out, "{:<12} {}", "Material:", material).unwrap();
    writeln!(
        out,
        "{:<12} {} ({} x {} mm)",
        "Stock:", selection.label, layout.sheet_width, layout.sheet_height
    )
    .unwrap();
    writeln!(out, "{:<12} {} mm", "Kerf:", plan.kerf).unwrap();
    writeln!(out, "{:<12} {}", "Parts:", plan.part_count).unwrap();
    writeln!(out, "{:<12} {}", "Sheets:", selection.sheet_count).unwrap();
    writeln!(out, "{:<12} {}", "Unit price:", format_amount(selection.unit_price)).unwrap();
    writeln!(out, "{:<12} {}", "Total cost:", format_amount(selection.total_cost)).unwrap();

    if selection.evaluated.len() > 1 {
        writeln!(out).unwrap();
        writeln!(out, "Candidates:").unwrap();
        for summary in &selection.evaluated {
            let marker = if summary.label == selection.label {
                "  (selected)"
            } else {
                ""
            };
            writeln!(
                out,
                "  {:<8} {:>3} sheet(s) {:>10}{}",
                summary.label,
                summary.sheet_count,
                format_amount(summary.total_cost),
                marker
            )
            .unwrap();
        }
    }

    let total = layout.sheet_count();
    for sheet in &layout.sheets {
        writeln!(out).unwrap();
        writeln!(
            out,
            "Sheet {}/{}: {} part(s), utilization {:.1}%",
            sheet.id,
            total,
            sheet.placement_count(),
            layout.utilization(sheet) * 100.0
        )
        .unwrap();
        for p in sheet.placements() {
            writeln!(
                out,
                "  {:<10} {} x {} at ({}, {})",
                p.name, p.width, p.height, p.x, p.y
            )
            .unwrap();
        }
    }

    out
}

/// Serialize the whole plan as pretty-printed JSON, newline terminated.
pub fn generate_json(plan: &Plan) -> serde_json::Result<String> {
    let mut json = serde_json::to_string_pretty(plan)?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Job, PartSpec};
    use crate::plan::plan_job;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(999.0), "999");
        assert_eq!(format_amount(3600.0), "3,600");
        assert_eq!(format_amount(1234567.4), "1,234,567");
        assert_eq!(format_amount(-4500.0), "-4,500");
    }

    #[test]
    fn test_generate_json() {
        let job = Job::new().with_part(PartSpec::new("Shelf", 900.0, 450.0, 2));
        let plan = plan_job(&job).unwrap();
        let json = generate_json(&plan).unwrap();
        assert!(json.ends_with("}\n"));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["part_count"], 2);
        assert_eq!(value["selection"]["label"], plan.selection.label.as_str());
    }
}
