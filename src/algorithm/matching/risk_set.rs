//! Risk-set construction
//!
//! The risk set of a treated subject is every control whose time is not
//! earlier than the treated subject's time and that has not been consumed by
//! an earlier match.

use crate::algorithm::matching::subject_table::SubjectTable;
use crate::algorithm::matching::types::{Subject, SubjectId};
use crate::error::{Error, Result};
use rustc_hash::FxHashSet;

/// Controls that have already been matched
///
/// Grows monotonically: a consumed control can never become eligible again.
#[derive(Debug, Default, Clone)]
pub struct ConsumedControls {
    ids: FxHashSet<SubjectId>,
}

impl ConsumedControls {
    /// Create an empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a control as used, returning `false` if it already was
    pub fn consume(&mut self, id: SubjectId) -> bool {
        self.ids.insert(id)
    }

    /// Whether a control has been used
    #[must_use]
    pub fn contains(&self, id: SubjectId) -> bool {
        self.ids.contains(&id)
    }

    /// Number of controls used so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether no control has been used yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Collect the eligible controls for a treated subject observed at `treated_time`
///
/// The result preserves the table's time-ascending order. An empty result is
/// a normal outcome, not an error.
///
/// # Errors
/// Returns an error if `treated_time` is not finite.
pub fn eligible<'a>(
    table: &'a SubjectTable,
    treated_time: f64,
    consumed: &ConsumedControls,
) -> Result<Vec<&'a Subject>> {
    if !treated_time.is_finite() {
        return Err(Error::NonFiniteTime(treated_time));
    }

    let start = table.first_at_or_after(treated_time);
    Ok(table.subjects()[start..]
        .iter()
        .filter(|s| s.is_control() && !consumed.contains(s.id))
        .collect())
}
