//! Error handling for risk-set matching.
//!
//! Every variant except `Arrow` describes a configuration problem: the input
//! table or the matching parameters are unusable, and matching is aborted
//! before any pair is produced. Subjects that simply cannot be matched are
//! not errors.

use arrow::error::ArrowError;

use crate::algorithm::matching::types::SubjectId;

/// Errors that can occur while preparing or running a matching
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A column named in the table layout is absent from the batch
    #[error("Column not found: {column}")]
    ColumnNotFound { column: String },

    /// A column has a type that cannot be read as the required kind of value
    #[error("Column '{column}' has data type {found}, expected {expected}")]
    InvalidDataType {
        column: String,
        expected: String,
        found: String,
    },

    /// A required value is null
    #[error("Missing value in column '{column}' at row {row}")]
    MissingValue { column: String, row: usize },

    /// A value is present but unusable (non-finite number, treatment code other than 0/1)
    #[error("Invalid value in column '{column}' at row {row}: {value}")]
    InvalidValue {
        column: String,
        row: usize,
        value: String,
    },

    /// The layout names no covariate columns
    #[error("At least one covariate is required for distance scoring")]
    NoCovariates,

    /// Two covariate vectors of different length were compared
    #[error("Covariate dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// A risk set was requested for a time that is not a finite number
    #[error("Treated time must be finite, got {0}")]
    NonFiniteTime(f64),

    /// The caliper is negative or not a finite number
    #[error("Caliper must be a finite, non-negative distance, got {0}")]
    InvalidCaliper(f64),

    /// A matched pair references a subject that is not in the table
    #[error("Subject {0} not found in subject table")]
    UnknownSubject(SubjectId),

    /// Too few matched pairs to assess covariate balance
    #[error("Too few matched pairs for balance assessment: {found} (minimum {required})")]
    InsufficientObservations { found: usize, required: usize },

    /// Arrow compute failure
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),
}

/// Result type for matching operations
pub type Result<T> = std::result::Result<T, Error>;
