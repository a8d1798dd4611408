//! Arrow utility functions for per-row value conversions
//!
//! These helpers read a single value out of an Arrow array, widening it to
//! `f64` or `bool`. They return `None` for nulls and for data types they do
//! not handle; callers check the column type up front with the `is_*_type`
//! predicates.

use arrow::array::{
    Array, ArrayRef, BooleanArray, Date32Array, Float32Array, Float64Array, Int8Array,
    Int16Array, Int32Array, Int64Array, UInt8Array, UInt16Array, UInt32Array, UInt64Array,
};
use arrow::datatypes::DataType;

/// Whether values of this type can be read as numbers
#[must_use]
pub const fn is_numeric_type(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Whether values of this type can be read as a time (numbers or `Date32` days)
#[must_use]
pub const fn is_time_type(data_type: &DataType) -> bool {
    is_numeric_type(data_type) || matches!(data_type, DataType::Date32)
}

/// Whether values of this type can be read as a treatment indicator
#[must_use]
pub const fn is_indicator_type(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::Boolean
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

macro_rules! downcast_value {
    ($array:expr, $index:expr, $ty:ty) => {
        $array
            .as_any()
            .downcast_ref::<$ty>()
            .map(|a| a.value($index))
    };
}

/// Extract a value from a numeric or `Date32` array as `f64`
///
/// `Date32` values are returned as days since the Unix epoch.
///
/// # Returns
/// `Some(f64)` if the value exists and is not null, otherwise `None`
#[must_use]
pub fn arrow_array_to_f64(array: &ArrayRef, index: usize) -> Option<f64> {
    if index >= array.len() || array.is_null(index) {
        return None;
    }

    match array.data_type() {
        DataType::Int8 => downcast_value!(array, index, Int8Array).map(f64::from),
        DataType::Int16 => downcast_value!(array, index, Int16Array).map(f64::from),
        DataType::Int32 => downcast_value!(array, index, Int32Array).map(f64::from),
        DataType::Int64 => downcast_value!(array, index, Int64Array).map(|v| v as f64),
        DataType::UInt8 => downcast_value!(array, index, UInt8Array).map(f64::from),
        DataType::UInt16 => downcast_value!(array, index, UInt16Array).map(f64::from),
        DataType::UInt32 => downcast_value!(array, index, UInt32Array).map(f64::from),
        DataType::UInt64 => downcast_value!(array, index, UInt64Array).map(|v| v as f64),
        DataType::Float32 => downcast_value!(array, index, Float32Array).map(f64::from),
        DataType::Float64 => downcast_value!(array, index, Float64Array),
        DataType::Date32 => downcast_value!(array, index, Date32Array).map(f64::from),
        _ => None,
    }
}

/// Extract a treatment indicator from a boolean or integer array
///
/// Integers are accepted only as 0 or 1.
///
/// # Returns
/// * `None` - The value is null or the type is not an indicator type
/// * `Some(Err(raw))` - An integer other than 0 or 1
/// * `Some(Ok(flag))` - The indicator
#[must_use]
pub fn arrow_array_to_indicator(
    array: &ArrayRef,
    index: usize,
) -> Option<std::result::Result<bool, i128>> {
    if index >= array.len() || array.is_null(index) {
        return None;
    }

    let raw: i128 = match array.data_type() {
        DataType::Boolean => return downcast_value!(array, index, BooleanArray).map(Ok),
        DataType::Int8 => downcast_value!(array, index, Int8Array)?.into(),
        DataType::Int16 => downcast_value!(array, index, Int16Array)?.into(),
        DataType::Int32 => downcast_value!(array, index, Int32Array)?.into(),
        DataType::Int64 => downcast_value!(array, index, Int64Array)?.into(),
        DataType::UInt8 => downcast_value!(array, index, UInt8Array)?.into(),
        DataType::UInt16 => downcast_value!(array, index, UInt16Array)?.into(),
        DataType::UInt32 => downcast_value!(array, index, UInt32Array)?.into(),
        DataType::UInt64 => downcast_value!(array, index, UInt64Array)?.into(),
        _ => return None,
    };

    Some(match raw {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(other),
    })
}
