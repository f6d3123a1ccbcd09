//! Data model for parts, sheets, and stock candidates.

mod candidate;
mod job;
mod material;
mod part;
mod sheet;

pub use candidate::{Candidate, StockSize};
pub use job::Job;
pub use material::{Material, MaterialTable};
pub use part::{Part, PartSpec};
pub use sheet::{PackingResult, Placement, Row, Sheet};
