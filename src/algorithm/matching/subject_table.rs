//! Time-ordered subject table
//!
//! The table owns every subject of the cohort sorted ascending by time. The
//! sort is stable, so subjects sharing a time keep their input order; this
//! ordering drives both the order in which treated subjects are processed and
//! the order of every risk set.

use crate::algorithm::matching::types::{Subject, SubjectId};
use crate::error::{Error, Result};
use rustc_hash::FxHashMap;

/// Immutable, time-sorted collection of subjects
#[derive(Debug, Clone)]
pub struct SubjectTable {
    /// Subjects sorted ascending by time (stable)
    subjects: Vec<Subject>,
    /// Position of each subject in `subjects`, keyed by id
    positions: FxHashMap<SubjectId, usize>,
    /// Covariate dimensionality shared by every subject
    dimension: usize,
}

impl SubjectTable {
    /// Build a table from subjects in input order
    ///
    /// # Errors
    /// Returns an error if the covariate dimensionality is zero or not shared
    /// by every subject, if a time or covariate is not finite, or if an id
    /// occurs twice.
    pub fn new(mut subjects: Vec<Subject>) -> Result<Self> {
        let dimension = subjects.first().map_or(0, |s| s.covariates.len());
        if !subjects.is_empty() && dimension == 0 {
            return Err(Error::NoCovariates);
        }

        for subject in &subjects {
            if subject.covariates.len() != dimension {
                return Err(Error::DimensionMismatch {
                    expected: dimension,
                    found: subject.covariates.len(),
                });
            }
            if !subject.time.is_finite() {
                return Err(Error::InvalidValue {
                    column: "time".to_string(),
                    row: subject.id.index(),
                    value: subject.time.to_string(),
                });
            }
            if let Some(value) = subject.covariates.iter().find(|v| !v.is_finite()) {
                return Err(Error::InvalidValue {
                    column: "covariates".to_string(),
                    row: subject.id.index(),
                    value: value.to_string(),
                });
            }
        }

        // Stable: equal times keep input order
        subjects.sort_by(|a, b| a.time.total_cmp(&b.time));

        let mut positions = FxHashMap::with_capacity_and_hasher(subjects.len(), Default::default());
        for (pos, subject) in subjects.iter().enumerate() {
            if positions.insert(subject.id, pos).is_some() {
                return Err(Error::InvalidValue {
                    column: "id".to_string(),
                    row: subject.id.index(),
                    value: "duplicate subject id".to_string(),
                });
            }
        }

        Ok(Self {
            subjects,
            positions,
            dimension,
        })
    }

    /// Subjects in time-ascending order
    #[must_use]
    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    /// Treated subjects in time-ascending order
    pub fn treated(&self) -> impl Iterator<Item = &Subject> {
        self.subjects.iter().filter(|s| s.treated)
    }

    /// Look up a subject by id
    #[must_use]
    pub fn get(&self, id: SubjectId) -> Option<&Subject> {
        self.positions.get(&id).map(|&pos| &self.subjects[pos])
    }

    /// Look up a subject by id, failing if it is absent
    pub fn require(&self, id: SubjectId) -> Result<&Subject> {
        self.get(id).ok_or(Error::UnknownSubject(id))
    }

    /// Index of the first subject whose time is not earlier than `time`
    #[must_use]
    pub fn first_at_or_after(&self, time: f64) -> usize {
        self.subjects.partition_point(|s| s.time < time)
    }

    /// Covariate dimensionality (0 only for an empty table)
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of treated subjects
    #[must_use]
    pub fn treated_count(&self) -> usize {
        self.subjects.iter().filter(|s| s.treated).count()
    }

    /// Number of control subjects
    #[must_use]
    pub fn control_count(&self) -> usize {
        self.subjects.len() - self.treated_count()
    }

    /// Get the number of subjects
    #[must_use]
    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    /// Check if the table is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_by_time_keeping_ties_in_input_order() {
        let table = SubjectTable::new(vec![
            Subject::new(0, true, 3.0, &[0.0]),
            Subject::new(1, false, 1.0, &[0.0]),
            Subject::new(2, false, 3.0, &[0.0]),
            Subject::new(3, true, 1.0, &[0.0]),
        ])
        .unwrap();

        let order: Vec<usize> = table.subjects().iter().map(|s| s.id.index()).collect();
        assert_eq!(order, vec![1, 3, 0, 2]);
        assert_eq!(table.get(SubjectId(2)).unwrap().time, 3.0);
    }

    #[test]
    fn rejects_inconsistent_dimensions() {
        let result = SubjectTable::new(vec![
            Subject::new(0, true, 1.0, &[0.0, 1.0]),
            Subject::new(1, false, 2.0, &[0.0]),
        ]);
        assert!(matches!(
            result,
            Err(Error::DimensionMismatch { expected: 2, found: 1 })
        ));
    }

    #[test]
    fn rejects_empty_covariates() {
        let result = SubjectTable::new(vec![Subject::new(0, true, 1.0, &[])]);
        assert!(matches!(result, Err(Error::NoCovariates)));
    }

    #[test]
    fn rejects_non_finite_values() {
        let result = SubjectTable::new(vec![Subject::new(0, true, f64::NAN, &[0.0])]);
        assert!(matches!(result, Err(Error::InvalidValue { .. })));

        let result = SubjectTable::new(vec![Subject::new(0, true, 0.0, &[f64::INFINITY])]);
        assert!(matches!(result, Err(Error::InvalidValue { .. })));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let result = SubjectTable::new(vec![
            Subject::new(0, true, 1.0, &[0.0]),
            Subject::new(0, false, 2.0, &[0.0]),
        ]);
        assert!(matches!(result, Err(Error::InvalidValue { .. })));
    }

    #[test]
    fn finds_first_subject_at_or_after_time() {
        let table = SubjectTable::new(vec![
            Subject::new(0, false, 1.0, &[0.0]),
            Subject::new(1, false, 2.0, &[0.0]),
            Subject::new(2, false, 2.0, &[0.0]),
            Subject::new(3, false, 5.0, &[0.0]),
        ])
        .unwrap();

        assert_eq!(table.first_at_or_after(0.0), 0);
        assert_eq!(table.first_at_or_after(2.0), 1);
        assert_eq!(table.first_at_or_after(2.5), 3);
        assert_eq!(table.first_at_or_after(9.0), 4);
    }

    #[test]
    fn empty_table_is_valid() {
        let table = SubjectTable::new(Vec::new()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.dimension(), 0);
        assert_eq!(table.treated_count(), 0);
    }
}
