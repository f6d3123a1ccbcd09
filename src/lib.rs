//! panel-nest - Shelf nesting of rectangular wood panels onto stock sheets.
//!
//! Parts are packed without rotation into horizontal rows on each sheet, with a
//! blade kerf between neighbours, using a greedy first-fit-decreasing shelf
//! heuristic. Every offered stock size is packed and the cheapest one is chosen
//! (or a fixed size on request).
//!
//! # Example
//!
//! ```no_run
//! use panel_nest::{generate_report, plan_job_file};
//! use std::path::Path;
//!
//! let plan = plan_job_file(Path::new("cabinet.job")).unwrap();
//! println!("{}", generate_report(&plan));
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod generator;
pub mod model;
pub mod parser;
pub mod plan;
pub mod selection;
pub mod transform;
pub mod validation;

// Re-exports for convenience
pub use config::{FillOrder, NestConfig, OversizePolicy, PartNaming, SelectionMode, SortOrder, Unit};
pub use engine::{pack, PackingEngine};
pub use error::{NestError, Result};
pub use generator::{generate_dxf, generate_json, generate_report};
pub use model::{
    Candidate, Job, Material, MaterialTable, PackingResult, Part, PartSpec, Placement, Row, Sheet,
    StockSize,
};
pub use parser::{parse_job_file, parse_job_str};
pub use plan::{plan_job, Plan};
pub use selection::{select_best, CandidateSelector, SelectionResult};
pub use validation::{validate_result, ValidationResult};

/// Read a job file and plan it.
pub fn plan_job_file(input_path: &std::path::Path) -> Result<Plan> {
    let job = parse_job_file(input_path)?;
    tracing::debug!(
        "Parsed {} part row(s), {} stock size(s), {} material(s)",
        job.parts.len(),
        job.stock.len(),
        job.materials.materials.len()
    );
    plan_job(&job)
}
