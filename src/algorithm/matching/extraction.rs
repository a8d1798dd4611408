//! Data extraction utilities for the matching algorithm
//!
//! This module turns an Arrow record batch into a [`SubjectTable`]. Each row
//! becomes one subject whose id is its row index.

use crate::algorithm::matching::subject_table::SubjectTable;
use crate::algorithm::matching::types::{Covariates, Subject, SubjectId};
use crate::algorithm::matching::validation::validate_batch;
use crate::config::TableLayout;
use crate::error::{Error, Result};
use crate::utils::arrow::{arrow_array_to_f64, arrow_array_to_indicator, get_column_by_name};
use arrow::array::{Array, ArrayRef};
use arrow::record_batch::RecordBatch;
use log::debug;

fn read_finite(array: &ArrayRef, column: &str, row: usize) -> Result<f64> {
    if array.is_null(row) {
        return Err(Error::MissingValue {
            column: column.to_string(),
            row,
        });
    }
    match arrow_array_to_f64(array, row) {
        Some(value) if value.is_finite() => Ok(value),
        Some(value) => Err(Error::InvalidValue {
            column: column.to_string(),
            row,
            value: value.to_string(),
        }),
        None => Err(Error::InvalidDataType {
            column: column.to_string(),
            expected: "numeric".to_string(),
            found: array.data_type().to_string(),
        }),
    }
}

fn read_indicator(array: &ArrayRef, column: &str, row: usize) -> Result<bool> {
    match arrow_array_to_indicator(array, row) {
        Some(Ok(flag)) => Ok(flag),
        Some(Err(raw)) => Err(Error::InvalidValue {
            column: column.to_string(),
            row,
            value: raw.to_string(),
        }),
        None => Err(Error::MissingValue {
            column: column.to_string(),
            row,
        }),
    }
}

/// Extract every row of the batch as a subject, in row order
///
/// # Errors
/// Returns an error if a column is missing or has an unusable type, or if
/// any required value is null or not a finite number.
pub fn extract_subjects(batch: &RecordBatch, layout: &TableLayout) -> Result<Vec<Subject>> {
    validate_batch(batch, layout)?;

    let treatment_col = get_column_by_name(batch, &layout.treatment_column)?;
    let time_col = get_column_by_name(batch, &layout.time_column)?;
    let covariates = layout
        .covariate_columns
        .iter()
        .map(|name| get_column_by_name(batch, name).map(|array| (name.as_str(), array)))
        .collect::<Result<Vec<_>>>()?;

    let mut subjects = Vec::with_capacity(batch.num_rows());
    for row in 0..batch.num_rows() {
        let treated = read_indicator(&treatment_col, &layout.treatment_column, row)?;
        let time = read_finite(&time_col, &layout.time_column, row)?;
        let values = covariates
            .iter()
            .map(|(name, array)| read_finite(array, name, row))
            .collect::<Result<Covariates>>()?;

        subjects.push(Subject {
            id: SubjectId(row),
            treated,
            time,
            covariates: values,
        });
    }

    debug!(
        "Extracted {} subjects with {} covariates",
        subjects.len(),
        layout.dimension()
    );

    Ok(subjects)
}

/// Extract the batch into a time-sorted subject table
pub fn extract_subject_table(batch: &RecordBatch, layout: &TableLayout) -> Result<SubjectTable> {
    SubjectTable::new(extract_subjects(batch, layout)?)
}
