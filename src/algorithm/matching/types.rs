//! Type definitions for the matching algorithm
//!
//! This module contains common types used throughout the matching algorithm.

use arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::time::Duration;

/// Covariate vector of a subject, stored inline for the common low-dimensional case
pub type Covariates = SmallVec<[f64; 8]>;

/// Identity of a subject: its row index in the input table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(pub usize);

impl SubjectId {
    /// Row index in the input table
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single subject of the cohort
#[derive(Debug, Clone, PartialEq)]
pub struct Subject {
    /// Stable identity (row index)
    pub id: SubjectId,
    /// Treatment indicator
    pub treated: bool,
    /// Event/treatment time
    pub time: f64,
    /// Covariates used for distance scoring
    pub covariates: Covariates,
}

impl Subject {
    /// Create a subject from its row index and values
    #[must_use]
    pub fn new(id: usize, treated: bool, time: f64, covariates: &[f64]) -> Self {
        Self {
            id: SubjectId(id),
            treated,
            time,
            covariates: SmallVec::from_slice(covariates),
        }
    }

    /// Whether the subject is a control
    #[must_use]
    pub const fn is_control(&self) -> bool {
        !self.treated
    }
}

/// Pair of a treated subject and the control it was matched to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchedPair {
    /// Treated subject
    pub treated_id: SubjectId,
    /// Control subject
    pub control_id: SubjectId,
}

impl MatchedPair {
    /// Create a pair from the row indices of both subjects
    #[must_use]
    pub const fn new(treated_id: usize, control_id: usize) -> Self {
        Self {
            treated_id: SubjectId(treated_id),
            control_id: SubjectId(control_id),
        }
    }
}

/// Result of matching an Arrow table
#[derive(Debug, Clone)]
pub struct MatchingResult {
    /// Pairs in the order they were produced (treated time ascending)
    pub pairs: Vec<MatchedPair>,
    /// Rows of the matched treated subjects; row `i` belongs to `pairs[i]`
    pub matched_treated: RecordBatch,
    /// Rows of the matched controls; row `i` belongs to `pairs[i]`
    pub matched_controls: RecordBatch,
    /// Number of treated subjects in the input
    pub treated_count: usize,
    /// Number of treated subjects left without a control
    pub unmatched_treated_count: usize,
    /// Time taken for matching
    pub matching_time: Duration,
}

impl MatchingResult {
    /// Number of pairs produced
    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.pairs.len()
    }
}
