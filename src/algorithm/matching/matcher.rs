//! Core matching orchestration
//!
//! This module implements the Matcher struct which runs risk-set matching
//! over an Arrow record batch.

use crate::algorithm::matching::criteria::{MatchingConfig, MatchingCriteria};
use crate::algorithm::matching::extraction::extract_subject_table;
use crate::algorithm::matching::filtering::matched_batches;
use crate::algorithm::matching::sequential::perform_sequential_matching;
use crate::algorithm::matching::types::{MatchedPair, MatchingResult};
use crate::config::TableLayout;
use crate::error::Result;
use arrow::record_batch::RecordBatch;
use log::{info, warn};
use std::time::Instant;

/// Matcher for pairing treated subjects with controls
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    /// Matching configuration
    config: MatchingConfig,
}

impl Matcher {
    /// Create a new matcher with the given configuration
    #[must_use]
    pub const fn new(config: MatchingConfig) -> Self {
        Self { config }
    }

    /// The configuration this matcher runs with
    #[must_use]
    pub const fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Perform matching over a subject table held in a record batch
    ///
    /// # Arguments
    ///
    /// * `batch` - `RecordBatch` with one row per subject
    ///
    /// # Returns
    ///
    /// Result containing the pairs and the matched treated and control rows
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the batch does not fit the layout or
    /// the caliper is unusable. No partial result is produced.
    pub fn perform_matching(&self, batch: &RecordBatch) -> Result<MatchingResult> {
        let start_time = Instant::now();

        let table = extract_subject_table(batch, &self.config.layout)?;
        let pairs = perform_sequential_matching(&table, &self.config)?;

        let treated_count = table.treated_count();
        if pairs.is_empty() && treated_count > 0 {
            warn!("No matches found for any of {treated_count} treated subjects");
        }

        let (matched_treated, matched_controls) = matched_batches(batch, &pairs)?;
        let elapsed = start_time.elapsed();

        info!(
            "Matching complete: {} of {} treated subjects matched in {:.2?}",
            pairs.len(),
            treated_count,
            elapsed
        );

        Ok(MatchingResult {
            unmatched_treated_count: treated_count - pairs.len(),
            pairs,
            matched_treated,
            matched_controls,
            treated_count,
            matching_time: elapsed,
        })
    }
}

/// Match the subjects of a record batch and return only the pairs
///
/// Mirrors `match(table, treatment_field, time_field, covariate_fields, caliper)`.
pub fn match_batch(
    batch: &RecordBatch,
    layout: &TableLayout,
    caliper: Option<f64>,
) -> Result<Vec<MatchedPair>> {
    let config = MatchingConfig {
        criteria: MatchingCriteria { caliper },
        layout: layout.clone(),
        ..MatchingConfig::default()
    };
    Ok(Matcher::new(config).perform_matching(batch)?.pairs)
}
