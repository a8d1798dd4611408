//! Risk-set matching of treated subjects to controls
//!
//! This module implements greedy risk-set matching. It includes:
//!
//! 1. Extraction of a time-sorted subject table from an Arrow record batch
//! 2. Risk-set construction and covariate distance scoring
//! 3. The greedy sequential matcher, with optional caliper
//! 4. Summary statistics and covariate balance for the matched pairs
//!
//! Treated subjects are processed earliest first and each takes the nearest
//! control, by Euclidean covariate distance, among the controls whose time is
//! not earlier than its own and that no earlier match has used.

pub mod balance;
pub mod criteria;
pub mod distance;
pub mod extraction;
pub mod filtering;
pub mod matcher;
pub mod parallel;
pub mod risk_set;
pub mod sequential;
pub mod subject_table;
pub mod summary;
pub mod types;
pub mod validation;

// Re-export key types
pub use balance::{BalanceCalculator, BalanceMetric, BalanceReport, BalanceSummary};
pub use criteria::{MatchingConfig, MatchingConfigBuilder, MatchingCriteria};
pub use distance::euclidean;
pub use extraction::{extract_subject_table, extract_subjects};
pub use matcher::{Matcher, match_batch};
pub use risk_set::{ConsumedControls, eligible};
pub use sequential::{match_subjects, perform_sequential_matching};
pub use subject_table::SubjectTable;
pub use summary::{MatchSummary, summarize};
pub use types::{Covariates, MatchedPair, MatchingResult, Subject, SubjectId};
