//! Arrow data handling utilities
//!
//! Helpers for locating columns in record batches and reading individual
//! values as numbers or treatment indicators.

pub mod array_utils;
pub mod conversion;

// Re-export commonly used functions for convenience
pub use array_utils::{get_column_by_name, get_column_index, get_typed_column};
pub use conversion::{
    arrow_array_to_f64, arrow_array_to_indicator, is_indicator_type, is_numeric_type,
    is_time_type,
};
