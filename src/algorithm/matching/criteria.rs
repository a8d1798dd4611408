//! Matching criteria definitions for risk-set matching
//!
//! This module provides the structure and logic for defining matching criteria
//! and the configuration of a matching run.

use crate::config::TableLayout;
use crate::error::{Error, Result};

/// Criteria for accepting a control as a match for a treated subject
///
/// Time eligibility (control time not earlier than treated time) and single
/// use of each control are fixed properties of risk-set matching; the only
/// tunable criterion is the caliper.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MatchingCriteria {
    /// Maximum allowed covariate distance between treated subject and control
    pub caliper: Option<f64>,
}

impl MatchingCriteria {
    /// Create criteria without a caliper
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new builder for constructing matching criteria
    #[must_use]
    pub fn builder() -> MatchingCriteriaBuilder {
        MatchingCriteriaBuilder::new()
    }

    /// Check that the caliper, if any, is a usable distance
    pub fn validate(&self) -> Result<()> {
        match self.caliper {
            Some(caliper) if !caliper.is_finite() || caliper < 0.0 => {
                Err(Error::InvalidCaliper(caliper))
            }
            _ => Ok(()),
        }
    }

    /// Check whether a distance is within the caliper
    ///
    /// Always `true` when no caliper is configured.
    #[must_use]
    pub fn within_caliper(&self, distance: f64) -> bool {
        self.caliper.is_none_or(|caliper| distance <= caliper)
    }
}

/// Builder for constructing matching criteria
#[derive(Debug, Clone, Default)]
pub struct MatchingCriteriaBuilder {
    criteria: MatchingCriteria,
}

impl MatchingCriteriaBuilder {
    /// Create a new builder with default criteria
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the caliper
    #[must_use]
    pub const fn caliper(mut self, caliper: f64) -> Self {
        self.criteria.caliper = Some(caliper);
        self
    }

    /// Build the matching criteria
    #[must_use]
    pub const fn build(self) -> MatchingCriteria {
        self.criteria
    }
}

/// Configuration for the matching process
#[derive(Debug, Clone)]
pub struct MatchingConfig {
    /// The criteria to use for matching
    pub criteria: MatchingCriteria,

    /// Columns of the input table
    pub layout: TableLayout,

    /// Whether to score large risk sets in parallel
    pub use_parallel: bool,

    /// Whether to display a progress bar over treated subjects
    pub show_progress: bool,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            criteria: MatchingCriteria::default(),
            layout: TableLayout::default(),
            use_parallel: true,
            show_progress: false,
        }
    }
}

impl MatchingConfig {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new builder for constructing matching configuration
    #[must_use]
    pub fn builder() -> MatchingConfigBuilder {
        MatchingConfigBuilder::new()
    }
}

/// Builder for constructing matching configuration
#[derive(Debug, Clone, Default)]
pub struct MatchingConfigBuilder {
    config: MatchingConfig,
}

impl MatchingConfigBuilder {
    /// Create a new builder with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the matching criteria
    #[must_use]
    pub fn criteria(mut self, criteria: MatchingCriteria) -> Self {
        self.config.criteria = criteria;
        self
    }

    /// Set the caliper directly
    #[must_use]
    pub fn caliper(mut self, caliper: f64) -> Self {
        self.config.criteria.caliper = Some(caliper);
        self
    }

    /// Set the table layout
    #[must_use]
    pub fn layout(mut self, layout: TableLayout) -> Self {
        self.config.layout = layout;
        self
    }

    /// Set whether to use parallel processing
    #[must_use]
    pub fn use_parallel(mut self, parallel: bool) -> Self {
        self.config.use_parallel = parallel;
        self
    }

    /// Set whether to display a progress bar
    #[must_use]
    pub fn show_progress(mut self, show: bool) -> Self {
        self.config.show_progress = show;
        self
    }

    /// Build the matching configuration
    #[must_use]
    pub fn build(self) -> MatchingConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caliper_bounds_are_inclusive() {
        let criteria = MatchingCriteria::builder().caliper(0.5).build();
        assert!(criteria.within_caliper(0.5));
        assert!(criteria.within_caliper(0.0));
        assert!(!criteria.within_caliper(0.5000001));
    }

    #[test]
    fn no_caliper_accepts_everything() {
        let criteria = MatchingCriteria::new();
        assert!(criteria.within_caliper(f64::MAX));
        assert!(criteria.validate().is_ok());
    }

    #[test]
    fn rejects_unusable_calipers() {
        for caliper in [-1.0, f64::NAN, f64::INFINITY] {
            let criteria = MatchingCriteria::builder().caliper(caliper).build();
            assert!(matches!(criteria.validate(), Err(Error::InvalidCaliper(_))));
        }
    }

    #[test]
    fn config_builder_sets_fields() {
        let config = MatchingConfig::builder()
            .caliper(2.0)
            .use_parallel(false)
            .show_progress(true)
            .layout(TableLayout::new("t", "when", ["x"]))
            .build();

        assert_eq!(config.criteria.caliper, Some(2.0));
        assert!(!config.use_parallel);
        assert!(config.show_progress);
        assert_eq!(config.layout.time_column, "when");
    }
}
