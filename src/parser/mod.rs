//! Job file parser module.

mod job;
mod sections;

pub use job::{parse_job_file, parse_job_str, JobParser};
pub use sections::*;
