//! A Rust library for balanced risk-set matching.
//!
//! Given a cohort in which every subject has a treatment indicator, an
//! event/treatment time and a vector of covariates, each treated subject is
//! paired with one not-yet-used control whose time is no earlier than its own,
//! choosing the control with the smallest covariate distance and optionally
//! rejecting matches beyond a caliper.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod utils;

// Re-export the most common types for easier use
pub use config::TableLayout;
pub use error::{Error, Result};

// Matching
pub use algorithm::matching::{
    BalanceCalculator, BalanceReport, MatchSummary, MatchedPair, Matcher, MatchingConfig,
    MatchingCriteria, MatchingResult, Subject, SubjectId, SubjectTable, match_batch,
    match_subjects, summarize,
};

// Arrow types
pub use arrow::record_batch::RecordBatch;
