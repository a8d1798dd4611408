//! Algorithm implementations for observational study workflows
//!
//! This module contains the matching engine used to construct comparable
//! treated and control groups.

pub mod matching;
