//! Selection of the winning stock size across candidates.

use crate::config::SelectionMode;
use crate::engine::PackingEngine;
use crate::error::{NestError, Result};
use crate::model::{Candidate, PackingResult, Part, Sheet};
use serde::Serialize;

/// Outcome of packing one candidate, kept for comparison tables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateSummary {
    pub label: String,
    pub sheet_count: usize,
    pub unit_price: f64,
    pub total_cost: f64,
}

/// The chosen candidate and its layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionResult {
    pub label: String,
    pub unit_price: f64,
    /// Engine output for the winning candidate, unmodified.
    pub layout: PackingResult,
    pub sheet_count: usize,
    pub total_cost: f64,
    /// Every candidate that was packed, in candidate order (winner included).
    pub evaluated: Vec<CandidateSummary>,
}

impl SelectionResult {
    fn new(candidate: &Candidate, layout: PackingResult, evaluated: Vec<CandidateSummary>) -> Self {
        Self {
            label: candidate.label.clone(),
            unit_price: candidate.unit_price,
            sheet_count: layout.sheet_count(),
            total_cost: layout.cost(candidate.unit_price),
            layout,
            evaluated,
        }
    }

    /// Sheets of the winning layout.
    pub fn sheets(&self) -> &[Sheet] {
        &self.layout.sheets
    }
}

/// Runs the packing engine per candidate and applies the selection policy.
#[derive(Debug, Clone, Default)]
pub struct CandidateSelector {
    engine: PackingEngine,
}

impl CandidateSelector {
    pub fn new(engine: PackingEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &PackingEngine {
        &self.engine
    }

    /// Pick one candidate according to `mode`.
    pub fn select(
        &self,
        parts: &[Part],
        candidates: &[Candidate],
        mode: &SelectionMode,
    ) -> Result<SelectionResult> {
        if candidates.is_empty() {
            return Err(NestError::NoEligibleCandidate {
                reason: "no stock sizes given".to_string(),
            });
        }
        match mode {
            SelectionMode::Auto => self.select_auto(parts, candidates),
            SelectionMode::Fixed(label) => self.select_fixed(parts, candidates, label),
        }
    }

    fn select_fixed(
        &self,
        parts: &[Part],
        candidates: &[Candidate],
        label: &str,
    ) -> Result<SelectionResult> {
        let candidate = candidates
            .iter()
            .find(|c| c.label == label)
            .ok_or_else(|| NestError::UnknownCandidate {
                label: label.to_string(),
            })?;
        candidate.validate()?;

        let layout = self.pack(parts, candidate)?;
        let summary = summarize(candidate, &layout);
        Ok(SelectionResult::new(candidate, layout, vec![summary]))
    }

    /// Cheapest priced candidate. When no priced candidate can hold the parts,
    /// the unpriced ones are compared by fewest sheets, then smallest stock.
    fn select_auto(&self, parts: &[Part], candidates: &[Candidate]) -> Result<SelectionResult> {
        for candidate in candidates {
            candidate.validate()?;
        }

        let (priced, unpriced): (Vec<&Candidate>, Vec<&Candidate>) =
            candidates.iter().partition(|c| c.is_priced());

        let mut evaluated = Vec::with_capacity(candidates.len());
        let mut first_oversize: Option<NestError> = None;

        let mut best = self.best_of(parts, &priced, true, &mut evaluated, &mut first_oversize)?;
        if best.is_none() {
            best = self.best_of(parts, &unpriced, false, &mut evaluated, &mut first_oversize)?;
        }

        match best {
            Some((candidate, layout)) => Ok(SelectionResult::new(candidate, layout, evaluated)),
            None => Err(first_oversize.unwrap_or_else(|| NestError::NoEligibleCandidate {
                reason: "no candidate could be packed".to_string(),
            })),
        }
    }

    /// Pack every candidate of `pool` and keep the best one. Candidates too small
    /// for some part are skipped, remembering the first such error.
    fn best_of<'c>(
        &self,
        parts: &[Part],
        pool: &[&'c Candidate],
        by_cost: bool,
        evaluated: &mut Vec<CandidateSummary>,
        first_oversize: &mut Option<NestError>,
    ) -> Result<Option<(&'c Candidate, PackingResult)>> {
        let mut best: Option<(&'c Candidate, PackingResult)> = None;

        for &candidate in pool {
            let layout = match self.pack(parts, candidate) {
                Ok(layout) => layout,
                Err(err @ NestError::OversizedParts { .. }) => {
                    if first_oversize.is_none() {
                        *first_oversize = Some(err);
                    }
                    continue;
                }
                Err(err) => return Err(err),
            };
            evaluated.push(summarize(candidate, &layout));

            let better = match &best {
                None => true,
                Some((current, current_layout)) if by_cost => {
                    layout.cost(candidate.unit_price) < current_layout.cost(current.unit_price)
                }
                Some((current, current_layout)) => {
                    let (count, current_count) =
                        (layout.sheet_count(), current_layout.sheet_count());
                    count < current_count
                        || (count == current_count && candidate.area() < current.area())
                }
            };
            if better {
                best = Some((candidate, layout));
            }
        }

        Ok(best)
    }

    fn pack(&self, parts: &[Part], candidate: &Candidate) -> Result<PackingResult> {
        self.engine
            .pack(parts, candidate.sheet_width, candidate.sheet_height)
    }
}

fn summarize(candidate: &Candidate, layout: &PackingResult) -> CandidateSummary {
    CandidateSummary {
        label: candidate.label.clone(),
        sheet_count: layout.sheet_count(),
        unit_price: candidate.unit_price,
        total_cost: layout.cost(candidate.unit_price),
    }
}

/// Select a candidate with a default-strategy engine at the given kerf.
pub fn select_best(
    parts: &[Part],
    candidates: &[Candidate],
    kerf: f64,
    mode: &SelectionMode,
) -> Result<SelectionResult> {
    CandidateSelector::new(PackingEngine::new(kerf)).select(parts, candidates, mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OversizePolicy;
    use pretty_assertions::assert_eq;

    fn shelf_parts() -> Vec<Part> {
        let mut parts = Vec::new();
        for i in 1..=2 {
            parts.push(Part::new(format!("A-{}", i), 900.0, 450.0).unwrap());
        }
        for i in 1..=6 {
            parts.push(Part::new(format!("B-{}", i), 600.0, 300.0).unwrap());
        }
        parts
    }

    fn standard_candidates() -> Vec<Candidate> {
        vec![
            Candidate::new("3x6", 1810.0, 900.0, 2250.0),
            Candidate::new("4x8", 2414.0, 1202.0, 3600.0),
        ]
    }

    // ==================== Auto mode ====================

    #[test]
    fn test_auto_picks_cheapest() {
        let result = select_best(
            &shelf_parts(),
            &standard_candidates(),
            3.0,
            &SelectionMode::Auto,
        )
        .unwrap();

        assert_eq!(result.label, "4x8");
        assert_eq!(result.sheet_count, 1);
        assert_eq!(result.total_cost, 3600.0);
        assert_eq!(
            result.evaluated,
            vec![
                CandidateSummary {
                    label: "3x6".to_string(),
                    sheet_count: 2,
                    unit_price: 2250.0,
                    total_cost: 4500.0,
                },
                CandidateSummary {
                    label: "4x8".to_string(),
                    sheet_count: 1,
                    unit_price: 3600.0,
                    total_cost: 3600.0,
                },
            ]
        );
    }

    #[test]
    fn test_auto_selected_cost_is_minimal() {
        let result = select_best(
            &shelf_parts(),
            &standard_candidates(),
            3.0,
            &SelectionMode::Auto,
        )
        .unwrap();
        assert!(result
            .evaluated
            .iter()
            .all(|s| result.total_cost <= s.total_cost));
    }

    #[test]
    fn test_auto_tie_keeps_first_candidate() {
        let candidates = vec![
            Candidate::new("first", 1810.0, 900.0, 1000.0),
            Candidate::new("second", 1810.0, 900.0, 1000.0),
        ];
        let result =
            select_best(&shelf_parts(), &candidates, 3.0, &SelectionMode::Auto).unwrap();
        assert_eq!(result.label, "first");
    }

    #[test]
    fn test_auto_skips_unpriced_when_priced_exist() {
        let mut candidates = standard_candidates();
        candidates.push(Candidate::new("custom", 3000.0, 1500.0, 0.0));
        let result =
            select_best(&shelf_parts(), &candidates, 3.0, &SelectionMode::Auto).unwrap();
        assert_eq!(result.label, "4x8");
        assert_eq!(result.evaluated.len(), 2);
    }

    #[test]
    fn test_auto_unpriced_prefers_fewer_sheets_then_smaller_area() {
        let candidates = vec![
            Candidate::new("big", 2414.0, 1202.0, 0.0),
            Candidate::new("small", 1810.0, 900.0, 0.0),
            Candidate::new("bigger", 3000.0, 1500.0, 0.0),
        ];
        let result =
            select_best(&shelf_parts(), &candidates, 3.0, &SelectionMode::Auto).unwrap();
        // "big" and "bigger" both need one sheet; "big" is smaller.
        assert_eq!(result.label, "big");
        assert_eq!(result.total_cost, 0.0);
    }

    #[test]
    fn test_auto_skips_candidate_too_small_for_a_part() {
        let parts = vec![Part::new("Long", 2000.0, 400.0).unwrap()];
        let result =
            select_best(&parts, &standard_candidates(), 3.0, &SelectionMode::Auto).unwrap();
        assert_eq!(result.label, "4x8");
    }

    #[test]
    fn test_auto_all_candidates_too_small() {
        let parts = vec![Part::new("Top", 3000.0, 2000.0).unwrap()];
        let err =
            select_best(&parts, &standard_candidates(), 3.0, &SelectionMode::Auto).unwrap_err();
        match err {
            NestError::OversizedParts { sheet_width, .. } => assert_eq!(sheet_width, 1810.0),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_auto_falls_back_to_unpriced_when_priced_too_small() {
        let parts = vec![Part::new("Top", 3000.0, 1400.0).unwrap()];
        let mut candidates = standard_candidates();
        candidates.push(Candidate::new("custom", 3050.0, 1500.0, 0.0));
        let result = select_best(&parts, &candidates, 3.0, &SelectionMode::Auto).unwrap();
        assert_eq!(result.label, "custom");
        assert_eq!(result.sheet_count, 1);
        assert_eq!(result.total_cost, 0.0);
        assert_eq!(result.evaluated.len(), 1);
    }

    #[test]
    fn test_auto_unpriced_fallback_fewest_sheets_then_area() {
        let parts = vec![
            Part::new("Top", 2500.0, 1000.0).unwrap(),
            Part::new("Side", 2500.0, 1000.0).unwrap(),
        ];
        let mut candidates = standard_candidates();
        candidates.push(Candidate::new("long", 2600.0, 1100.0, 0.0));
        candidates.push(Candidate::new("huge", 2600.0, 2100.0, 0.0));
        candidates.push(Candidate::new("huger", 3000.0, 2100.0, 0.0));
        let result = select_best(&parts, &candidates, 3.0, &SelectionMode::Auto).unwrap();
        // "long" needs two sheets, "huge" and "huger" one; "huge" is smaller.
        assert_eq!(result.label, "huge");
        assert_eq!(result.sheet_count, 1);
        assert_eq!(result.evaluated.len(), 3);
    }

    #[test]
    fn test_auto_allow_oversize_still_selects() {
        let parts = vec![Part::new("Top", 2000.0, 2000.0).unwrap()];
        let engine = PackingEngine::new(3.0).with_oversize_policy(OversizePolicy::Allow);
        let result = CandidateSelector::new(engine)
            .select(&parts, &standard_candidates(), &SelectionMode::Auto)
            .unwrap();
        assert_eq!(result.label, "3x6");
        assert_eq!(result.sheet_count, 1);
    }

    #[test]
    fn test_no_candidates() {
        let err = select_best(&shelf_parts(), &[], 3.0, &SelectionMode::Auto).unwrap_err();
        assert!(matches!(err, NestError::NoEligibleCandidate { .. }));
    }

    #[test]
    fn test_invalid_candidate_rejected() {
        let candidates = vec![Candidate::new("broken", 0.0, 900.0, 100.0)];
        let err =
            select_best(&shelf_parts(), &candidates, 3.0, &SelectionMode::Auto).unwrap_err();
        assert!(matches!(err, NestError::InvalidDimension { .. }));
    }

    #[test]
    fn test_empty_parts_zero_sheets() {
        let result =
            select_best(&[], &standard_candidates(), 3.0, &SelectionMode::Auto).unwrap();
        assert_eq!(result.sheet_count, 0);
        assert_eq!(result.total_cost, 0.0);
        assert_eq!(result.label, "3x6");
    }

    // ==================== Fixed mode ====================

    #[test]
    fn test_fixed_returns_requested_candidate() {
        let mode = SelectionMode::Fixed("3x6".to_string());
        let result = select_best(&shelf_parts(), &standard_candidates(), 3.0, &mode).unwrap();
        assert_eq!(result.label, "3x6");
        assert_eq!(result.sheet_count, 2);
        assert_eq!(result.total_cost, 4500.0);
        assert_eq!(result.evaluated.len(), 1);
    }

    #[test]
    fn test_fixed_layout_is_engine_output() {
        let mode = SelectionMode::Fixed("3x6".to_string());
        let result = select_best(&shelf_parts(), &standard_candidates(), 3.0, &mode).unwrap();
        let direct = PackingEngine::new(3.0)
            .pack(&shelf_parts(), 1810.0, 900.0)
            .unwrap();
        assert_eq!(result.layout, direct);
    }

    #[test]
    fn test_fixed_ignores_other_invalid_candidates() {
        let mut candidates = standard_candidates();
        candidates.push(Candidate::new("broken", 0.0, 900.0, 100.0));
        let mode = SelectionMode::Fixed("3x6".to_string());
        let result = select_best(&shelf_parts(), &candidates, 3.0, &mode).unwrap();
        assert_eq!(result.label, "3x6");
        assert_eq!(result.sheet_count, 2);
    }

    #[test]
    fn test_fixed_invalid_requested_candidate() {
        let candidates = vec![Candidate::new("broken", 0.0, 900.0, 100.0)];
        let mode = SelectionMode::Fixed("broken".to_string());
        let err = select_best(&shelf_parts(), &candidates, 3.0, &mode).unwrap_err();
        assert!(matches!(err, NestError::InvalidDimension { .. }));
    }

    #[test]
    fn test_fixed_unknown_label() {
        let mode = SelectionMode::Fixed("5x10".to_string());
        let err = select_best(&shelf_parts(), &standard_candidates(), 3.0, &mode).unwrap_err();
        assert!(matches!(err, NestError::UnknownCandidate { .. }));
    }
}
