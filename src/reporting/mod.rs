//! Analysis and reporting
//!
//! This module handles recommendation building, performance profiling,
//! and structured logging for the application.

pub mod advice;
pub mod logging;
pub mod performance;

// Re-export commonly used items
pub use advice::{build_recommendations, per_user_summary, verdict_headline};
pub use performance::RunProfiler;
