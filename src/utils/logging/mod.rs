//! Logging utilities for progress tracking

pub mod progress;

// Re-export commonly used functions for convenience
pub use progress::{create_main_progress_bar, create_optional_progress_bar, finish_progress_bar};
