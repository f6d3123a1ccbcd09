//! Job file parser.
//!
//! A job file is INI-style: `[Section]` headers followed by `Key=Value` lines.
//! `;` and `#` start comment lines.
//!
//! ```text
//! [Job]
//! Kerf=3
//! Mode=auto
//! Material=Lauan lumber core
//!
//! [Part]
//! Name=Shelf A
//! Width=900
//! Depth=450
//! Quantity=4
//! ```

use crate::error::{NestError, Result};
use crate::model::{Job, MaterialTable, StockSize};
use std::fs;
use std::path::Path;

use super::sections::*;

/// Job file parser.
pub struct JobParser {
    /// File content as lines.
    lines: Vec<String>,
    /// Section indices: (name, header_line, end_line).
    sections: Vec<(String, usize, usize)>,
}

impl JobParser {
    /// Create a new parser from file content.
    pub fn new(content: &str) -> Self {
        let lines: Vec<String> = content.lines().map(|s| s.to_string()).collect();
        let sections = Self::find_sections(&lines);
        Self { lines, sections }
    }

    /// Find all sections and their line ranges.
    fn find_sections(lines: &[String]) -> Vec<(String, usize, usize)> {
        let mut sections = Vec::new();
        let mut current_section: Option<(String, usize)> = None;

        for (i, line) in lines.iter().enumerate() {
            let trimmed = line.trim();
            if trimmed.starts_with('[') && trimmed.ends_with(']') {
                if let Some((name, start)) = current_section.take() {
                    sections.push((name, start, i - 1));
                }
                let section_name = trimmed[1..trimmed.len() - 1].trim().to_string();
                current_section = Some((section_name, i));
            }
        }

        if let Some((name, start)) = current_section {
            sections.push((name, start, lines.len() - 1));
        }

        sections
    }

    /// Body lines of every section called `name`, with 1-based line numbers.
    fn sections_named(&self, name: &str) -> Vec<Vec<NumberedLine<'_>>> {
        self.sections
            .iter()
            .filter(|(n, _, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, start, end)| {
                (*start + 1..=*end)
                    .map(|i| (i + 1, self.lines[i].as_str()))
                    .collect()
            })
            .collect()
    }

    /// Parse the whole job.
    pub fn parse(&self) -> Result<Job> {
        let part_sections = self.sections_named("Part");
        if part_sections.is_empty() {
            return Err(NestError::NoPartSection);
        }

        let settings = match self.sections_named("Job").first() {
            Some(lines) => parse_job_section(lines)?,
            None => JobSettings::default(),
        };
        let unit = settings.unit;

        let materials = self
            .sections_named("Material")
            .iter()
            .map(|lines| parse_material(lines, unit))
            .collect::<Result<Vec<_>>>()?;
        let stock = self
            .sections_named("Stock")
            .iter()
            .map(|lines| parse_stock(lines, unit))
            .collect::<Result<Vec<_>>>()?;
        let parts = part_sections
            .iter()
            .enumerate()
            .map(|(idx, lines)| parse_part(lines, unit, idx + 1))
            .collect::<Result<Vec<_>>>()?;

        Ok(Job {
            config: settings.config,
            unit,
            materials: if materials.is_empty() {
                MaterialTable::builtin()
            } else {
                MaterialTable::new(materials)
            },
            material: settings.material,
            stock: if stock.is_empty() {
                StockSize::standard()
            } else {
                stock
            },
            parts,
        })
    }
}

/// Parse job file content.
pub fn parse_job_str(content: &str) -> Result<Job> {
    JobParser::new(content).parse()
}

/// Read and parse a job file.
pub fn parse_job_file(path: &Path) -> Result<Job> {
    if !path.exists() {
        return Err(NestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Err(NestError::EmptyFile {
            path: path.to_path_buf(),
        });
    }

    parse_job_str(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SelectionMode;
    use crate::model::PartSpec;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "\
; shelf boards for the entrance cabinet
[Job]
Kerf=3
Mode=auto
Material=Lauan lumber core

[Part]
Name=Shelf A
Width=900
Depth=450
Quantity=4

[Part]
Name=Shelf B
Width=600
Depth=300
Quantity=6
";

    #[test]
    fn test_find_sections() {
        let parser = JobParser::new(SAMPLE);
        let names: Vec<&str> = parser.sections.iter().map(|(n, _, _)| n.as_str()).collect();
        assert_eq!(names, ["Job", "Part", "Part"]);
        assert_eq!(parser.sections[0].1, 1);
        assert_eq!(parser.sections[0].2, 5);
    }

    #[test]
    fn test_parse_sample() {
        let job = parse_job_str(SAMPLE).unwrap();
        assert_eq!(job.config.kerf, 3.0);
        assert_eq!(job.config.mode, SelectionMode::Auto);
        assert_eq!(job.material.as_deref(), Some("Lauan lumber core"));
        assert_eq!(
            job.parts,
            vec![
                PartSpec::new("Shelf A", 900.0, 450.0, 4),
                PartSpec::new("Shelf B", 600.0, 300.0, 6),
            ]
        );
        // Defaults fill in materials and stock.
        assert_eq!(job.materials, MaterialTable::builtin());
        assert_eq!(job.stock, StockSize::standard());
    }

    #[test]
    fn test_parse_custom_stock_and_material() {
        let content = "\
[Material]
Name=MDF
Thickness=18
Price.custom=1800

[Stock]
Label=custom
Width=2000
Height=1000

[Part]
Width=500
Depth=400
";
        let job = parse_job_str(content).unwrap();
        assert_eq!(job.materials.materials.len(), 1);
        assert_eq!(job.materials.materials[0].price_for("custom"), Some(1800.0));
        assert_eq!(job.stock, vec![StockSize::new("custom", 2000.0, 1000.0)]);
        assert_eq!(job.parts[0].name, "Part 1");
    }

    #[test]
    fn test_no_part_section() {
        let content = "[Job]\nKerf=3\n";
        assert!(matches!(
            parse_job_str(content),
            Err(NestError::NoPartSection)
        ));
    }

    #[test]
    fn test_error_line_number_is_file_line() {
        let content = "[Job]\nKerf=3\n\n[Part]\nWidth=abc\nDepth=10\n";
        match parse_job_str(content).unwrap_err() {
            NestError::InvalidValue { line, .. } => assert_eq!(line, 5),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_file() {
        let err = parse_job_file(Path::new("/nonexistent/cabinet.job")).unwrap_err();
        assert!(matches!(err, NestError::FileNotFound { .. }));
    }
}
