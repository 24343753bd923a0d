//! Configuration management
//!
//! This module handles loading and managing configuration from
//! TOML files and CLI arguments.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::constants::{defaults, output_formats};
use crate::core::error::{NetgradeError, Result};
use crate::core::types::RunConfiguration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Label shown on the report
    pub office_label: Option<String>,

    /// Simultaneous users sharing the connection
    pub user_count: Option<u32>,

    /// Rate a WiFi zone separately from the office total
    pub multi_zone: Option<bool>,

    /// Users connected to the zone being tested
    pub zone_user_count: Option<u32>,

    /// Output format (text, json, minimal)
    pub output_format: Option<String>,

    /// Suppress progress output
    pub quiet: Option<bool>,

    /// Enable verbose logging
    pub verbose: Option<bool>,

    /// Disable colored output
    pub no_color: Option<bool>,

    /// Disable progress bars
    pub no_progress: Option<bool>,

    /// Show phase timings and resource usage
    pub show_timings: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            office_label: Some(defaults::OFFICE_LABEL.to_string()),
            user_count: Some(defaults::USER_COUNT),
            multi_zone: Some(false),
            zone_user_count: None, // Only meaningful when multi_zone is set
            output_format: Some(output_formats::DEFAULT.to_string()),
            quiet: Some(false),
            verbose: Some(false),
            no_color: Some(false),
            no_progress: Some(false),
            show_timings: Some(false),
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            NetgradeError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content)?;

        // Validate the loaded configuration
        config.validate()?;
        Ok(config)
    }

    /// Try to find and load a config file in standard locations
    pub fn load_from_standard_locations() -> Self {
        // Check for .netgrade.toml in current directory
        if let Ok(config) = Self::load_from_file(defaults::CONFIG_FILE_NAME) {
            return config;
        }

        // Check for .netgrade.toml in parent directories
        for i in 1..=defaults::CONFIG_PARENT_SEARCH_DEPTH {
            let path = format!("{}{}", "../".repeat(i), defaults::CONFIG_FILE_NAME);
            if let Ok(config) = Self::load_from_file(&path) {
                return config;
            }
        }

        // Fall back to defaults
        Self::default()
    }

    /// Resolve the effective configuration for a run (file then CLI overrides)
    pub fn resolve(cli_config: &CliConfig) -> Result<Self> {
        let mut config = if cli_config.no_config {
            Config::default()
        } else if let Some(ref path) = cli_config.config_file {
            Config::load_from_file(path)?
        } else {
            Config::load_from_standard_locations()
        };

        config.merge_with_cli(cli_config);
        config.validate()?;
        Ok(config)
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        // Setup
        if let Some(ref office) = cli_config.office_label {
            self.office_label = Some(office.clone());
        }
        if let Some(users) = cli_config.user_count {
            self.user_count = Some(users);
        }
        if cli_config.multi_zone {
            self.multi_zone = Some(true);
        }
        if let Some(zone_users) = cli_config.zone_user_count {
            self.zone_user_count = Some(zone_users);
        }

        // Output & format
        if cli_config.quiet {
            self.quiet = Some(true);
        }
        if cli_config.verbose {
            self.verbose = Some(true);
        }
        if let Some(ref output_format) = cli_config.output_format {
            self.output_format = Some(output_format.clone());
        }
        if cli_config.no_color {
            self.no_color = Some(true);
        }
        if cli_config.no_progress {
            self.no_progress = Some(true);
        }
        if cli_config.show_timings {
            self.show_timings = Some(true);
        }
    }

    /// Get office label, falling back to the default
    pub fn office_label(&self) -> String {
        self.office_label
            .clone()
            .unwrap_or_else(|| defaults::OFFICE_LABEL.to_string())
    }

    /// Get user count, falling back to the default
    pub fn user_count(&self) -> u32 {
        self.user_count.unwrap_or(defaults::USER_COUNT)
    }

    pub fn multi_zone(&self) -> bool {
        self.multi_zone.unwrap_or(false)
    }

    /// Get output format, falling back to the default
    pub fn output_format(&self) -> String {
        self.output_format
            .clone()
            .unwrap_or_else(|| output_formats::DEFAULT.to_string())
    }

    pub fn quiet(&self) -> bool {
        self.quiet.unwrap_or(false)
    }

    pub fn verbose(&self) -> bool {
        self.verbose.unwrap_or(false)
    }

    pub fn no_color(&self) -> bool {
        self.no_color.unwrap_or(false)
    }

    pub fn no_progress(&self) -> bool {
        self.no_progress.unwrap_or(false)
    }

    pub fn show_timings(&self) -> bool {
        self.show_timings.unwrap_or(false)
    }

    /// Build the run description handed to the runner
    pub fn to_run_configuration(&self) -> Result<RunConfiguration> {
        let multi_zone_enabled = self.multi_zone();
        if multi_zone_enabled && self.zone_user_count.is_none() {
            return Err(NetgradeError::InvalidArgument(
                "zone user count is required when multi-zone is enabled".to_string(),
            ));
        }

        let run_config = RunConfiguration {
            office_label: self.office_label(),
            primary_user_count: self.user_count(),
            multi_zone_enabled,
            zone_user_count: self.zone_user_count.unwrap_or_else(|| self.user_count()),
        };

        run_config.validate()?;
        Ok(run_config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if let Some(users) = self.user_count {
            if !(defaults::MIN_USERS..=defaults::MAX_USERS).contains(&users) {
                return Err(NetgradeError::Config(format!(
                    "User count {} is invalid. Expected a value between {}-{}.",
                    users,
                    defaults::MIN_USERS,
                    defaults::MAX_USERS
                )));
            }
        }

        if let Some(zone_users) = self.zone_user_count {
            if !(defaults::MIN_USERS..=defaults::MAX_USERS).contains(&zone_users) {
                return Err(NetgradeError::Config(format!(
                    "Zone user count {} is invalid. Expected a value between {}-{}.",
                    zone_users,
                    defaults::MIN_USERS,
                    defaults::MAX_USERS
                )));
            }
        }

        if let Some(ref format) = self.output_format {
            if !output_formats::ALL.contains(&format.as_str()) {
                return Err(NetgradeError::Config(format!(
                    "Output format '{}' is invalid. Expected one of: {}.",
                    format,
                    output_formats::ALL.join(", ")
                )));
            }
        }

        Ok(())
    }
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    // Setup
    pub office_label: Option<String>, // --office
    pub user_count: Option<u32>,      // --users
    pub multi_zone: bool,             // --multi-zone
    pub zone_user_count: Option<u32>, // --zone-users

    // Output & format
    pub quiet: bool,                   // --quiet
    pub verbose: bool,                 // --verbose
    pub output_format: Option<String>, // --format
    pub no_color: bool,                // --no-color
    pub no_progress: bool,             // --no-progress
    pub show_timings: bool,            // --timings

    // Configuration
    pub config_file: Option<String>, // --config
    pub no_config: bool,             // --no-config
}
