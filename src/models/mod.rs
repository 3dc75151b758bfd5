//! Report models
//!
//! This module defines the serializable summaries produced by the soak
//! runner.

pub mod report;

// Re-export commonly used types
pub use report::{SoakReport, StatsSummary};
