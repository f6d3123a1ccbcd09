//! Error types for panel nesting.

use std::path::PathBuf;
use thiserror::Error;

/// Error codes for nesting runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// File not found (-1)
    FileNotFound = -1,
    /// Empty file (-2)
    EmptyFile = -2,
    /// General parse error (-3)
    ParseError = -3,
    /// No [Part] section found (-11)
    NoPartSection = -11,
    /// Non-positive sheet dimension or negative kerf (E100)
    InvalidDimension = 100,
    /// Non-positive part dimension (E101)
    InvalidPart = 101,
    /// Part larger than the sheet (E200)
    OversizedPart = 200,
    /// No candidate stock size qualifies (E201)
    NoEligibleCandidate = 201,
    /// Requested stock label or material does not exist (E202)
    InvalidConfiguration = 202,
}

/// A part that cannot fit on a sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct OversizedPart {
    pub name: String,
    pub width: f64,
    pub depth: f64,
}

impl std::fmt::Display for OversizedPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} x {})", self.name, self.width, self.depth)
    }
}

/// Main error type for nesting.
#[derive(Debug, Error)]
pub enum NestError {
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Empty file: {path}")]
    EmptyFile { path: PathBuf },

    #[error("No [Part] section found in file")]
    NoPartSection,

    #[error("Missing required field '{field}' in section [{section}]")]
    MissingField { section: String, field: String },

    #[error("Invalid value for '{field}' at line {line}: expected {expected}, got '{value}'")]
    InvalidValue {
        line: usize,
        field: String,
        expected: String,
        value: String,
    },

    #[error("Invalid dimension: {what} must be {requirement}, got {value}")]
    InvalidDimension {
        what: String,
        requirement: &'static str,
        value: f64,
    },

    #[error("Invalid part '{name}': dimensions must be positive, got {width} x {depth}")]
    InvalidPart {
        name: String,
        width: f64,
        depth: f64,
    },

    #[error("{} part(s) do not fit a {sheet_width} x {sheet_height} sheet: {}", parts.len(), format_parts(parts))]
    OversizedParts {
        sheet_width: f64,
        sheet_height: f64,
        parts: Vec<OversizedPart>,
    },

    #[error("No eligible stock candidate: {reason}")]
    NoEligibleCandidate { reason: String },

    #[error("Unknown stock size: {label}")]
    UnknownCandidate { label: String },

    #[error("Unknown material: {name}")]
    UnknownMaterial { name: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_parts(parts: &[OversizedPart]) -> String {
    parts
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl NestError {
    /// Get the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            NestError::FileNotFound { .. } => ErrorCode::FileNotFound,
            NestError::EmptyFile { .. } => ErrorCode::EmptyFile,
            NestError::NoPartSection => ErrorCode::NoPartSection,
            NestError::MissingField { .. } => ErrorCode::ParseError,
            NestError::InvalidValue { .. } => ErrorCode::ParseError,
            NestError::InvalidDimension { .. } => ErrorCode::InvalidDimension,
            NestError::InvalidPart { .. } => ErrorCode::InvalidPart,
            NestError::OversizedParts { .. } => ErrorCode::OversizedPart,
            NestError::NoEligibleCandidate { .. } => ErrorCode::NoEligibleCandidate,
            NestError::UnknownCandidate { .. } => ErrorCode::InvalidConfiguration,
            NestError::UnknownMaterial { .. } => ErrorCode::InvalidConfiguration,
            NestError::Io(_) => ErrorCode::FileNotFound,
        }
    }

    /// Get the numeric error code value.
    pub fn code_value(&self) -> i32 {
        self.code() as i32
    }
}

/// Result type alias for nesting operations.
pub type Result<T> = std::result::Result<T, NestError>;
