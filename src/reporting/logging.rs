use log::{debug, error, info, warn};

use crate::core::types::RunConfiguration;

/// Initialize the logger with appropriate level based on verbosity
pub fn init_logger(verbose: bool, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Off
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Off // Only show structured logs in verbose mode
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    debug!("Logger initialized with level: {level:?}");
}

/// Log the run configuration
pub fn log_run_config(config: &RunConfiguration, output_format: &str) {
    info!(
        "Configuration: office=\"{}\", users={}, multi_zone={}",
        config.office_label, config.primary_user_count, config.multi_zone_enabled
    );
    if config.multi_zone_enabled {
        info!("Zone: users={}", config.zone_user_count);
    }
    info!("Output: format={output_format}");
}

/// Log run completion with its score
pub fn log_run_complete(score: u8, duration_ms: u64) {
    if score >= 50 {
        info!("✅ Assessment complete: score {score}/100 ({duration_ms}ms)");
    } else {
        warn!("❌ Assessment complete: score {score}/100 ({duration_ms}ms)");
    }
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}

/// Log warning information
pub fn log_warning(message: &str) {
    warn!("{message}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_logger_initialization_verbose() {
        // Logger can only be initialized once per process, so we use panic::catch_unwind
        std::panic::catch_unwind(|| init_logger(true, false)).ok();
    }

    #[test]
    fn test_logger_initialization_quiet() {
        std::panic::catch_unwind(|| init_logger(false, true)).ok();
    }

    #[test]
    fn test_logger_initialization_normal() {
        std::panic::catch_unwind(|| init_logger(false, false)).ok();
    }

    #[test]
    fn test_logger_initialization_conflicting() {
        // Quiet takes precedence over verbose
        std::panic::catch_unwind(|| init_logger(true, true)).ok();
    }

    #[test]
    fn test_log_run_config_does_not_panic() {
        let config = RunConfiguration::default();
        log_run_config(&config, "text");

        let zoned = RunConfiguration {
            multi_zone_enabled: true,
            zone_user_count: 4,
            ..Default::default()
        };
        log_run_config(&zoned, "json");
    }

    #[test]
    fn test_log_run_complete_both_branches() {
        log_run_complete(80, 12_000);
        log_run_complete(20, 12_000);
    }

    #[test]
    fn test_log_error_with_and_without_source() {
        let err = io::Error::new(io::ErrorKind::Other, "boom");
        log_error("something failed", Some(&err));
        log_error("something failed", None);
        log_warning("heads up");
    }
}
