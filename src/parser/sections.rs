//! Section-specific parsers for the job file format.

use crate::config::{
    FillOrder, NestConfig, OversizePolicy, PartNaming, SelectionMode, SortOrder, Unit,
};
use crate::error::{NestError, Result};
use crate::model::{Material, PartSpec, StockSize};

/// A section body line with its 1-based line number in the file.
pub type NumberedLine<'a> = (usize, &'a str);

/// Parse a key=value pair from a line.
pub fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();
    Some((key, value))
}

/// Check whether a line carries no data (blank or comment).
pub fn is_blank_or_comment(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line.starts_with(';') || line.starts_with('#')
}

/// Iterate over the key=value entries of a section, skipping blanks and comments.
fn entries<'a>(
    lines: &'a [NumberedLine<'a>],
) -> impl Iterator<Item = Result<(usize, &'a str, &'a str)>> + 'a {
    lines
        .iter()
        .filter(|(_, line)| !is_blank_or_comment(line))
        .map(|&(line_no, line)| {
            parse_key_value(line)
                .map(|(k, v)| (line_no, k, v))
                .ok_or_else(|| NestError::InvalidValue {
                    line: line_no,
                    field: line.trim().to_string(),
                    expected: "Key=Value".to_string(),
                    value: line.trim().to_string(),
                })
        })
}

fn invalid(line: usize, field: &str, expected: &str, value: &str) -> NestError {
    NestError::InvalidValue {
        line,
        field: field.to_string(),
        expected: expected.to_string(),
        value: value.to_string(),
    }
}

fn missing(section: &str, field: &str) -> NestError {
    NestError::MissingField {
        section: section.to_string(),
        field: field.to_string(),
    }
}

/// Parse a float value.
pub fn parse_number(line: usize, field: &str, value: &str) -> Result<f64> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| invalid(line, field, "a number", value))
}

/// Parse a non-negative integer value.
pub fn parse_count(line: usize, field: &str, value: &str) -> Result<u32> {
    value
        .parse::<u32>()
        .map_err(|_| invalid(line, field, "a non-negative integer", value))
}

/// Settings from the [Job] section.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JobSettings {
    pub config: NestConfig,
    pub unit: Unit,
    pub material: Option<String>,
}

/// Parse the [Job] section. Length values are converted to mm.
pub fn parse_job_section(lines: &[NumberedLine<'_>]) -> Result<JobSettings> {
    let mut settings = JobSettings::default();
    // Lengths are scaled after the whole section is read, since Unit may come last.
    let mut kerf = None;
    let mut trim = None;

    for entry in entries(lines) {
        let (line_no, key, value) = entry?;
        match key.to_ascii_lowercase().as_str() {
            "kerf" => kerf = Some(parse_number(line_no, key, value)?),
            "trim" => trim = Some(parse_number(line_no, key, value)?),
            "mode" => settings.config.mode = SelectionMode::from_mode_str(value),
            "material" if !value.is_empty() => settings.material = Some(value.to_string()),
            "material" => settings.material = None,
            "unit" => {
                settings.unit = Unit::from_unit_str(value)
                    .ok_or_else(|| invalid(line_no, key, "mm or inch", value))?;
            }
            "sort" => {
                settings.config.sort_order = SortOrder::from_sort_str(value).ok_or_else(|| {
                    invalid(line_no, key, "width-depth, depth-width or input", value)
                })?;
            }
            "fill" => {
                settings.config.fill_order = FillOrder::from_fill_str(value)
                    .ok_or_else(|| invalid(line_no, key, "rows-first or sheet-by-sheet", value))?;
            }
            "oversize" => {
                settings.config.oversize_policy = OversizePolicy::from_policy_str(value)
                    .ok_or_else(|| invalid(line_no, key, "reject or allow", value))?;
            }
            "naming" => {
                settings.config.naming = PartNaming::from_naming_str(value)
                    .ok_or_else(|| invalid(line_no, key, "indexed or plain", value))?;
            }
            _ => tracing::debug!("Ignoring unknown key '{}' in [Job] at line {}", key, line_no),
        }
    }

    let factor = settings.unit.to_mm_factor();
    if let Some(kerf) = kerf {
        settings.config.kerf = kerf * factor;
    }
    if let Some(trim) = trim {
        settings.config.trim_margin = trim * factor;
    }

    Ok(settings)
}

/// Parse a [Material] section. Prices are given as `Price.<stock label>=<value>`.
pub fn parse_material(lines: &[NumberedLine<'_>], unit: Unit) -> Result<Material> {
    let mut name = None;
    let mut material = Material::default();

    for entry in entries(lines) {
        let (line_no, key, value) = entry?;
        let lower = key.to_ascii_lowercase();
        if let Some(label) = lower.strip_prefix("price.") {
            // Keep the label as written.
            let label = &key[key.len() - label.len()..];
            let price = parse_number(line_no, key, value)?;
            if price < 0.0 {
                return Err(invalid(line_no, key, "a non-negative price", value));
            }
            material.prices.insert(label.to_string(), price);
            continue;
        }
        match lower.as_str() {
            "name" => name = Some(value.to_string()),
            "usage" => material.usage = value.to_string(),
            "thickness" => {
                material.thickness = parse_number(line_no, key, value)? * unit.to_mm_factor()
            }
            _ => tracing::debug!(
                "Ignoring unknown key '{}' in [Material] at line {}",
                key,
                line_no
            ),
        }
    }

    material.name = name
        .filter(|n| !n.is_empty())
        .ok_or_else(|| missing("Material", "Name"))?;
    Ok(material)
}

/// Parse a [Stock] section.
pub fn parse_stock(lines: &[NumberedLine<'_>], unit: Unit) -> Result<StockSize> {
    let mut label = None;
    let mut width = None;
    let mut height = None;
    let mut price = None;

    for entry in entries(lines) {
        let (line_no, key, value) = entry?;
        match key.to_ascii_lowercase().as_str() {
            "label" => label = Some(value.to_string()),
            "width" => width = Some(parse_number(line_no, key, value)?),
            "height" => height = Some(parse_number(line_no, key, value)?),
            "price" => {
                let p = parse_number(line_no, key, value)?;
                if p < 0.0 {
                    return Err(invalid(line_no, key, "a non-negative price", value));
                }
                price = Some(p);
            }
            _ => tracing::debug!(
                "Ignoring unknown key '{}' in [Stock] at line {}",
                key,
                line_no
            ),
        }
    }

    let factor = unit.to_mm_factor();
    Ok(StockSize {
        label: label
            .filter(|l| !l.is_empty())
            .ok_or_else(|| missing("Stock", "Label"))?,
        width: width.ok_or_else(|| missing("Stock", "Width"))? * factor,
        height: height.ok_or_else(|| missing("Stock", "Height"))? * factor,
        price,
    })
}

/// Parse a [Part] section. `index` is the 1-based position used for unnamed parts.
pub fn parse_part(lines: &[NumberedLine<'_>], unit: Unit, index: usize) -> Result<PartSpec> {
    let mut name = None;
    let mut width = None;
    let mut depth = None;
    let mut quantity = 1;

    for entry in entries(lines) {
        let (line_no, key, value) = entry?;
        match key.to_ascii_lowercase().as_str() {
            "name" => name = Some(value.to_string()),
            "width" => width = Some(parse_number(line_no, key, value)?),
            "depth" => depth = Some(parse_number(line_no, key, value)?),
            "quantity" | "qty" => quantity = parse_count(line_no, key, value)?,
            _ => tracing::debug!(
                "Ignoring unknown key '{}' in [Part] at line {}",
                key,
                line_no
            ),
        }
    }

    let factor = unit.to_mm_factor();
    Ok(PartSpec {
        name: name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| format!("Part {}", index)),
        width: width.ok_or_else(|| missing("Part", "Width"))? * factor,
        depth: depth.ok_or_else(|| missing("Part", "Depth"))? * factor,
        quantity,
    })
}
