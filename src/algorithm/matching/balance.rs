//! Balance assessment for risk-set matching
//!
//! This module provides functions and structures for assessing the balance
//! of covariates between the matched treated subjects and their controls.

use crate::algorithm::matching::subject_table::SubjectTable;
use crate::algorithm::matching::types::MatchedPair;
use crate::error::{Error, Result};
use log::info;
use serde::{Deserialize, Serialize};

/// Balance between treated subjects and controls for a single covariate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceMetric {
    /// Name of the covariate
    pub name: String,

    /// Standardized difference between treated and control groups
    pub standardized_difference: f64,

    /// Mean for matched treated subjects
    pub treated_mean: f64,

    /// Mean for matched controls
    pub control_mean: f64,

    /// Standard deviation for matched treated subjects
    pub treated_std: f64,

    /// Standard deviation for matched controls
    pub control_std: f64,
}

/// Summary statistics for a balance report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSummary {
    /// Number of covariates with absolute standardized difference above the threshold
    pub imbalanced_covariates: usize,

    /// Maximum absolute standardized difference
    pub max_standardized_difference: f64,

    /// Mean absolute standardized difference
    pub mean_absolute_standardized_difference: f64,

    /// Total number of covariates
    pub total_covariates: usize,
}

/// Report on balance between matched treated subjects and controls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceReport {
    /// Balance metrics for each covariate
    pub metrics: Vec<BalanceMetric>,

    /// Summary statistics
    pub summary: BalanceSummary,
}

impl BalanceReport {
    /// Metrics whose absolute standardized difference exceeds `threshold`
    pub fn imbalanced(&self, threshold: f64) -> impl Iterator<Item = &BalanceMetric> {
        self.metrics
            .iter()
            .filter(move |m| m.standardized_difference.abs() > threshold)
    }
}

/// Calculator for balance metrics over matched pairs
#[derive(Debug, Clone)]
pub struct BalanceCalculator {
    /// Covariate names, by position in the covariate vector
    covariate_names: Vec<String>,

    /// Minimum required pairs for calculating balance
    min_observations: usize,

    /// Threshold for marking a covariate as imbalanced
    imbalance_threshold: f64,
}

impl Default for BalanceCalculator {
    fn default() -> Self {
        Self {
            covariate_names: Vec::new(),
            min_observations: 1,
            imbalance_threshold: 0.1, // Standardized difference > 0.1 is imbalanced
        }
    }
}

impl BalanceCalculator {
    /// Create a new balance calculator with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Name the covariates; unnamed positions fall back to `x{index}`
    #[must_use]
    pub fn with_covariate_names<S: Into<String>>(
        mut self,
        names: impl IntoIterator<Item = S>,
    ) -> Self {
        self.covariate_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set minimum required pairs for calculating balance
    #[must_use]
    pub const fn with_min_observations(mut self, min_observations: usize) -> Self {
        self.min_observations = min_observations;
        self
    }

    /// Set threshold for marking a covariate as imbalanced
    #[must_use]
    pub const fn with_imbalance_threshold(mut self, threshold: f64) -> Self {
        self.imbalance_threshold = threshold;
        self
    }

    fn covariate_name(&self, index: usize) -> String {
        self.covariate_names
            .get(index)
            .cloned()
            .unwrap_or_else(|| format!("x{index}"))
    }

    /// Calculate balance metrics between matched treated subjects and controls
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer pairs than the minimum, or a pair
    /// references a subject missing from the table.
    pub fn calculate_balance(
        &self,
        pairs: &[MatchedPair],
        table: &SubjectTable,
    ) -> Result<BalanceReport> {
        let required = self.min_observations.max(1);
        if pairs.len() < required {
            return Err(Error::InsufficientObservations {
                found: pairs.len(),
                required,
            });
        }

        let dimension = table.dimension();
        let mut treated_values = vec![Vec::with_capacity(pairs.len()); dimension];
        let mut control_values = vec![Vec::with_capacity(pairs.len()); dimension];

        for pair in pairs {
            let treated = table.require(pair.treated_id)?;
            let control = table.require(pair.control_id)?;
            for k in 0..dimension {
                treated_values[k].push(treated.covariates[k]);
                control_values[k].push(control.covariates[k]);
            }
        }

        let metrics: Vec<BalanceMetric> = (0..dimension)
            .map(|k| {
                let treated_mean = calculate_mean(&treated_values[k]);
                let control_mean = calculate_mean(&control_values[k]);
                let treated_std = calculate_std_dev(&treated_values[k], treated_mean);
                let control_std = calculate_std_dev(&control_values[k], control_mean);

                BalanceMetric {
                    name: self.covariate_name(k),
                    standardized_difference: calculate_standardized_difference(
                        treated_mean,
                        control_mean,
                        treated_std,
                        control_std,
                    ),
                    treated_mean,
                    control_mean,
                    treated_std,
                    control_std,
                }
            })
            .collect();

        let summary = self.calculate_summary_statistics(&metrics);

        info!(
            "Balance assessment complete: {} of {} covariates are imbalanced (stdiff > {})",
            summary.imbalanced_covariates, summary.total_covariates, self.imbalance_threshold
        );

        Ok(BalanceReport { metrics, summary })
    }

    /// Calculate summary statistics for a set of balance metrics
    fn calculate_summary_statistics(&self, metrics: &[BalanceMetric]) -> BalanceSummary {
        let mut imbalanced = 0;
        let mut max_std_diff: f64 = 0.0;
        let mut sum_abs_std_diff = 0.0;

        for metric in metrics {
            let abs_std_diff = metric.standardized_difference.abs();

            if abs_std_diff > self.imbalance_threshold {
                imbalanced += 1;
            }
            max_std_diff = max_std_diff.max(abs_std_diff);
            sum_abs_std_diff += abs_std_diff;
        }

        let mean_abs_std_diff = if metrics.is_empty() {
            0.0
        } else {
            sum_abs_std_diff / metrics.len() as f64
        };

        BalanceSummary {
            imbalanced_covariates: imbalanced,
            max_standardized_difference: max_std_diff,
            mean_absolute_standardized_difference: mean_abs_std_diff,
            total_covariates: metrics.len(),
        }
    }
}

/// Calculate the mean of a vector of values
fn calculate_mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let sum: f64 = values.iter().sum();
    sum / values.len() as f64
}

/// Calculate the sample standard deviation of a vector of values
fn calculate_std_dev(values: &[f64], mean: f64) -> f64 {
    if values.len() <= 1 {
        return 0.0;
    }

    let variance =
        values.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;

    variance.sqrt()
}

/// Calculate the standardized difference between two groups
fn calculate_standardized_difference(mean1: f64, mean2: f64, std1: f64, std2: f64) -> f64 {
    if std1 == 0.0 && std2 == 0.0 {
        return 0.0; // Both are constants, no difference
    }

    let pooled_std = (std2.mul_add(std2, std1.powi(2)) / 2.0).sqrt();

    if pooled_std > 0.0 {
        (mean1 - mean2) / pooled_std
    } else {
        0.0
    }
}
