//! Parallel scoring of large risk sets
//!
//! Only the distance computation for a single treated subject runs on the
//! Rayon pool. It reads the risk set without mutating anything, and the
//! scores come back in risk-set order, so selection downstream sees exactly
//! what the serial path would produce. The loop over treated subjects and the
//! consumed-control bookkeeping stay serial.

use crate::algorithm::matching::distance::{euclidean, score_candidates};
use crate::algorithm::matching::types::Subject;
use crate::error::Result;
use rayon::prelude::*;

/// Risk-set size from which scoring is spread over the thread pool
pub const PARALLEL_THRESHOLD: usize = 1000;

/// Score candidates on the Rayon pool, preserving candidate order
pub fn score_candidates_parallel(treated: &Subject, candidates: &[&Subject]) -> Result<Vec<f64>> {
    candidates
        .par_iter()
        .map(|control| euclidean(&treated.covariates, &control.covariates))
        .collect()
}

/// Score candidates, in parallel when allowed and the risk set is large enough
pub fn score_risk_set(
    treated: &Subject,
    candidates: &[&Subject],
    use_parallel: bool,
) -> Result<Vec<f64>> {
    if use_parallel && candidates.len() >= PARALLEL_THRESHOLD {
        score_candidates_parallel(treated, candidates)
    } else {
        score_candidates(treated, candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parallel_scores_match_serial_scores() {
        let treated = Subject::new(0, true, 0.0, &[0.5, -0.25]);
        let controls: Vec<Subject> = (1..=PARALLEL_THRESHOLD + 7)
            .map(|i| {
                let x = i as f64;
                Subject::new(i, false, x, &[(x * 0.37).sin(), (x * 0.11).cos()])
            })
            .collect();
        let candidates: Vec<&Subject> = controls.iter().collect();

        let serial = score_candidates(&treated, &candidates).unwrap();
        let parallel = score_candidates_parallel(&treated, &candidates).unwrap();
        let dispatched = score_risk_set(&treated, &candidates, true).unwrap();

        assert_eq!(serial, parallel);
        assert_eq!(serial, dispatched);
    }
}
