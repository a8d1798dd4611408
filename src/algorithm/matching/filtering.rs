//! Filtering utilities for the matching algorithm
//!
//! This module selects the rows of matched subjects out of the input batch.

use crate::algorithm::matching::types::{MatchedPair, SubjectId};
use crate::error::{Error, Result};
use arrow::array::UInt32Array;
use arrow::compute;
use arrow::record_batch::RecordBatch;

/// Select rows of a `RecordBatch` by subject id, in the given order
///
/// # Errors
/// Returns an error if an id is outside the batch
pub fn take_batch_rows(batch: &RecordBatch, ids: &[SubjectId]) -> Result<RecordBatch> {
    let num_rows = batch.num_rows();
    let mut indices = Vec::with_capacity(ids.len());
    for &id in ids {
        match u32::try_from(id.index()) {
            Ok(idx) if id.index() < num_rows => indices.push(idx),
            _ => return Err(Error::UnknownSubject(id)),
        }
    }

    let indices = UInt32Array::from(indices);
    Ok(compute::take_record_batch(batch, &indices)?)
}

/// Rows of the treated and control subjects of each pair, aligned by pair
pub fn matched_batches(
    batch: &RecordBatch,
    pairs: &[MatchedPair],
) -> Result<(RecordBatch, RecordBatch)> {
    let treated_ids: Vec<SubjectId> = pairs.iter().map(|p| p.treated_id).collect();
    let control_ids: Vec<SubjectId> = pairs.iter().map(|p| p.control_id).collect();

    Ok((
        take_batch_rows(batch, &treated_ids)?,
        take_batch_rows(batch, &control_ids)?,
    ))
}
