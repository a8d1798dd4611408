//! Covariate distance scoring

use crate::algorithm::matching::types::Subject;
use crate::error::{Error, Result};

/// Euclidean distance between two covariate vectors
///
/// # Errors
/// Returns [`Error::DimensionMismatch`] if the vectors differ in length and
/// [`Error::NoCovariates`] if they are empty.
pub fn euclidean(treated: &[f64], control: &[f64]) -> Result<f64> {
    if treated.len() != control.len() {
        return Err(Error::DimensionMismatch {
            expected: treated.len(),
            found: control.len(),
        });
    }
    if treated.is_empty() {
        return Err(Error::NoCovariates);
    }

    let mut sum_of_squares = 0.0;
    for (t, c) in treated.iter().zip(control) {
        let diff = t - c;
        sum_of_squares += diff * diff;
    }
    Ok(sum_of_squares.sqrt())
}

/// Distance from a treated subject to each candidate, in candidate order
pub fn score_candidates(treated: &Subject, candidates: &[&Subject]) -> Result<Vec<f64>> {
    candidates
        .iter()
        .map(|control| euclidean(&treated.covariates, &control.covariates))
        .collect()
}
