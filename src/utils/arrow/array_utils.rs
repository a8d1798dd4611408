//! Utilities for locating columns in record batches.

use arrow::array::ArrayRef;
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;

use crate::error::{Error, Result};

/// Get the column index by name from a record batch
///
/// # Errors
/// Returns an error if the column does not exist
pub fn get_column_index(batch: &RecordBatch, column_name: &str) -> Result<usize> {
    batch
        .schema()
        .index_of(column_name)
        .map_err(|_| Error::ColumnNotFound {
            column: column_name.to_string(),
        })
}

/// Get a column from a record batch by name
///
/// # Errors
/// Returns an error if the column does not exist
pub fn get_column_by_name(batch: &RecordBatch, column_name: &str) -> Result<ArrayRef> {
    let idx = get_column_index(batch, column_name)?;
    Ok(batch.column(idx).clone())
}

/// Get a column and check its data type with a predicate
///
/// # Arguments
/// * `batch` - The record batch
/// * `column_name` - The name of the column
/// * `accepts` - Predicate deciding whether the column's type is usable
/// * `expected` - Human-readable description of the accepted types
///
/// # Errors
/// Returns an error if the column does not exist or has an unusable type
pub fn get_typed_column(
    batch: &RecordBatch,
    column_name: &str,
    accepts: fn(&DataType) -> bool,
    expected: &str,
) -> Result<ArrayRef> {
    let column = get_column_by_name(batch, column_name)?;
    if !accepts(column.data_type()) {
        return Err(Error::InvalidDataType {
            column: column_name.to_string(),
            expected: expected.to_string(),
            found: column.data_type().to_string(),
        });
    }
    Ok(column)
}
