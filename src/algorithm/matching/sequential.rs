//! Greedy sequential matching
//!
//! Treated subjects are visited in ascending time order. Each one takes the
//! nearest control from its current risk set, and that control is consumed
//! before the next treated subject is considered. Earlier treated subjects
//! therefore get first choice; the result is deterministic but not globally
//! optimal.

use crate::algorithm::matching::criteria::{MatchingConfig, MatchingCriteria};
use crate::algorithm::matching::parallel::score_risk_set;
use crate::algorithm::matching::risk_set::{ConsumedControls, eligible};
use crate::algorithm::matching::subject_table::SubjectTable;
use crate::algorithm::matching::types::{MatchedPair, Subject};
use crate::error::Result;
use crate::utils::logging::progress;
use log::{debug, info};

/// Pick the nearest in-caliper candidate
///
/// Exact ties resolve to the candidate that comes first in risk-set order.
/// Returns the candidate's position and its distance.
#[must_use]
pub fn select_nearest(distances: &[f64], criteria: &MatchingCriteria) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (pos, &distance) in distances.iter().enumerate() {
        if !criteria.within_caliper(distance) {
            continue;
        }
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((pos, distance)),
        }
    }
    best
}

/// Find the control for a single treated subject and consume it
///
/// Returns `None` when the risk set is empty or every candidate lies outside
/// the caliper; the subject then stays unmatched.
fn match_one(
    table: &SubjectTable,
    treated: &Subject,
    consumed: &mut ConsumedControls,
    config: &MatchingConfig,
) -> Result<Option<MatchedPair>> {
    let risk_set = eligible(table, treated.time, consumed)?;
    if risk_set.is_empty() {
        debug!("Treated subject {} has an empty risk set", treated.id);
        return Ok(None);
    }

    let distances = score_risk_set(treated, &risk_set, config.use_parallel)?;
    let Some((pos, distance)) = select_nearest(&distances, &config.criteria) else {
        debug!(
            "No control within caliper for treated subject {} ({} candidates)",
            treated.id,
            risk_set.len()
        );
        return Ok(None);
    };

    let control = risk_set[pos];
    consumed.consume(control.id);
    debug!(
        "Matched treated subject {} to control {} at distance {distance:.4}",
        treated.id, control.id
    );
    Ok(Some(MatchedPair {
        treated_id: treated.id,
        control_id: control.id,
    }))
}

/// Match every treated subject of the table to at most one unused control
///
/// Pairs are returned in the order they were produced, which is ascending
/// treated time.
///
/// # Errors
/// Returns an error if the caliper is unusable. No pair is produced in that case.
pub fn perform_sequential_matching(
    table: &SubjectTable,
    config: &MatchingConfig,
) -> Result<Vec<MatchedPair>> {
    config.criteria.validate()?;

    let treated_count = table.treated_count();
    info!(
        "Matching {} treated subjects against {} controls",
        treated_count,
        table.control_count()
    );

    let pb = progress::create_optional_progress_bar(
        config.show_progress,
        treated_count as u64,
        Some("Risk-set matching"),
    );

    let mut consumed = ConsumedControls::new();
    let mut pairs = Vec::with_capacity(treated_count);

    for (processed, treated) in table.treated().enumerate() {
        if let Some(pair) = match_one(table, treated, &mut consumed, config)? {
            pairs.push(pair);
        }

        pb.inc(1);
        if processed % 100 == 0 {
            pb.set_message(format!("Found {} matches", pairs.len()));
        }
    }

    progress::finish_progress_bar(&pb, Some("Matching complete"));

    Ok(pairs)
}

/// Match a subject table with an optional caliper and default settings
pub fn match_subjects(table: &SubjectTable, caliper: Option<f64>) -> Result<Vec<MatchedPair>> {
    let config = MatchingConfig {
        criteria: MatchingCriteria { caliper },
        ..MatchingConfig::default()
    };
    perform_sequential_matching(table, &config)
}
