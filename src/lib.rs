//! Network quality assessment for shared offices
//!
//! netgrade runs an eight-phase measurement pass against Cloudflare's
//! speed endpoints (latency, jitter, packet loss, download, upload, DNS,
//! consistency, per-user bandwidth), grades each metric, and turns the
//! readings into a scored French report with per-user capacity advice.

pub mod config;
pub mod core;
pub mod probes;
pub mod reporting;
pub mod runner;
pub mod scoring;
pub mod ui;

// Re-export the primary public API
pub use crate::config::{CliConfig, Config};
pub use crate::core::{
    Grade, GradedMetrics, NetgradeError, NullSink, PhaseId, PhaseStatus, RawMetrics, Result,
    RunConfiguration, RunLifecycleState, RunResult, StatusSink,
};
pub use crate::runner::{AssessNetwork, Runner};
