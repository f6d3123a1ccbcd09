//! End-to-end planning: job input to a validated, costed layout.

use crate::engine::PackingEngine;
use crate::error::Result;
use crate::model::{Candidate, Job, Material};
use crate::selection::{CandidateSelector, SelectionResult};
use crate::transform::{build_candidates, expand_quantities};
use crate::validation::{validate_result, ValidationResult};
use serde::Serialize;
use tracing::{debug, info, warn};

/// A finished cutting plan.
#[derive(Debug, Clone, Serialize)]
pub struct Plan {
    /// Material the candidates were priced with.
    pub material: Option<Material>,
    pub kerf: f64,
    /// Number of physical parts after quantity expansion.
    pub part_count: usize,
    /// Every stock candidate offered to the selector, net of trim.
    pub candidates: Vec<Candidate>,
    pub selection: SelectionResult,
    pub validation: ValidationResult,
}

/// Plan a job: expand parts, price candidates, select stock and validate the layout.
pub fn plan_job(job: &Job) -> Result<Plan> {
    let parts = expand_quantities(&job.parts, job.config.naming)?;
    if parts.is_empty() {
        warn!("No parts to pack");
    }
    debug!("Expanded {} part row(s) into {} part(s)", job.parts.len(), parts.len());

    let material = job.selected_material()?.cloned();
    let candidates = build_candidates(&job.stock, material.as_ref(), job.config.trim_margin)?;
    for candidate in &candidates {
        debug!(
            "Candidate {}: {} x {} mm at {}",
            candidate.label, candidate.sheet_width, candidate.sheet_height, candidate.unit_price
        );
    }

    let selector = CandidateSelector::new(PackingEngine::from_config(&job.config));
    let selection = selector.select(&parts, &candidates, &job.config.mode)?;
    info!(
        "Selected {}: {} sheet(s), total cost {}",
        selection.label, selection.sheet_count, selection.total_cost
    );

    let validation = validate_result(&selection.layout, parts.len());
    for warning in &validation.warnings {
        warn!("{}", warning);
    }
    for error in &validation.errors {
        warn!("{}", error);
    }

    Ok(Plan {
        material,
        kerf: job.config.kerf,
        part_count: parts.len(),
        candidates,
        selection,
        validation,
    })
}
