//! User interface and interaction
//!
//! This module contains all components related to user interaction,
//! including CLI parsing, report formatting, progress reporting,
//! and shell completion generation.

pub mod cli;
pub mod color;
pub mod completion;
pub mod output;
pub mod progress;
pub mod wizard;

// Re-export commonly used items
pub use cli::{Cli, Commands, cli_to_config, validate_cli_args};
pub use completion::{install_completion, print_completions};
pub use output::{ReportOptions, display_report, json_report};
pub use progress::ProgressReporter;
pub use wizard::run_setup_wizard;
