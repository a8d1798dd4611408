//! Validation functions for the matching algorithm
//!
//! This module checks an input batch against the table layout before any
//! subject is extracted, so that configuration errors surface before
//! matching starts.

use crate::config::TableLayout;
use crate::error::{Error, Result};
use crate::utils::arrow::{get_typed_column, is_indicator_type, is_numeric_type, is_time_type};
use arrow::record_batch::RecordBatch;

/// Validate that the batch has every column the layout names, with usable types
pub fn validate_batch(batch: &RecordBatch, layout: &TableLayout) -> Result<()> {
    if layout.covariate_columns.is_empty() {
        return Err(Error::NoCovariates);
    }

    get_typed_column(
        batch,
        &layout.treatment_column,
        is_indicator_type,
        "Boolean or 0/1 integer",
    )?;
    get_typed_column(batch, &layout.time_column, is_time_type, "numeric or Date32")?;

    for column in &layout.covariate_columns {
        get_typed_column(batch, column, is_numeric_type, "numeric")?;
    }

    Ok(())
}
