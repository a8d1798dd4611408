//! Utility functions for Arrow access and progress reporting

pub mod arrow;
pub mod logging;

pub use logging::progress;
