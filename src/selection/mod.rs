//! Stock candidate evaluation and selection.

mod selector;

pub use selector::{select_best, CandidateSelector, CandidateSummary, SelectionResult};
