//! Summary statistics over matched pairs
//!
//! For every pair the time difference `treated.time - control.time` is taken;
//! since a control is never earlier than its treated subject, the differences
//! are zero or negative.

use crate::algorithm::matching::subject_table::SubjectTable;
use crate::algorithm::matching::types::MatchedPair;
use crate::error::Result;
use itertools::{Itertools, MinMaxResult};
use serde::{Deserialize, Serialize};

/// Descriptive statistics of the per-pair time differences
///
/// With zero pairs every statistic is `None`: an empty match is a supported
/// outcome with no defined mean, spread or range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    /// Number of pairs
    pub count: usize,
    /// Arithmetic mean of the time differences
    pub mean_time_diff: Option<f64>,
    /// Population standard deviation of the time differences
    pub stddev_time_diff: Option<f64>,
    /// Smallest time difference
    pub min_time_diff: Option<f64>,
    /// Largest time difference
    pub max_time_diff: Option<f64>,
}

impl MatchSummary {
    /// Summary of an empty pair list
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            count: 0,
            mean_time_diff: None,
            stddev_time_diff: None,
            min_time_diff: None,
            max_time_diff: None,
        }
    }

    /// Whether the statistics are defined (at least one pair)
    #[must_use]
    pub const fn is_defined(&self) -> bool {
        self.count > 0
    }

    /// Compute the summary from a list of time differences
    #[must_use]
    pub fn from_time_diffs(diffs: &[f64]) -> Self {
        let (min, max) = match diffs.iter().copied().minmax_by(f64::total_cmp) {
            MinMaxResult::NoElements => return Self::empty(),
            MinMaxResult::OneElement(value) => (value, value),
            MinMaxResult::MinMax(min, max) => (min, max),
        };

        let n = diffs.len() as f64;
        let mean = diffs.iter().sum::<f64>() / n;
        let variance = diffs.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / n;

        Self {
            count: diffs.len(),
            mean_time_diff: Some(mean),
            stddev_time_diff: Some(variance.sqrt()),
            min_time_diff: Some(min),
            max_time_diff: Some(max),
        }
    }
}

/// Time difference of each pair, in pair order
///
/// # Errors
/// Returns an error if a pair references a subject missing from the table.
pub fn time_differences(pairs: &[MatchedPair], table: &SubjectTable) -> Result<Vec<f64>> {
    pairs
        .iter()
        .map(|pair| {
            let treated = table.require(pair.treated_id)?;
            let control = table.require(pair.control_id)?;
            Ok(treated.time - control.time)
        })
        .collect()
}

/// Summarize the time differences of matched pairs
///
/// # Errors
/// Returns an error if a pair references a subject missing from the table.
pub fn summarize(pairs: &[MatchedPair], table: &SubjectTable) -> Result<MatchSummary> {
    let diffs = time_differences(pairs, table)?;
    Ok(MatchSummary::from_time_diffs(&diffs))
}
