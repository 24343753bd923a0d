// Command-line interface definitions and parsing for netgrade

use crate::config::CliConfig;
use crate::core::constants::{defaults, output_formats};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    // Setup
    /// Label shown on the report (default: Bureau)
    #[arg(short = 'o', long, value_name = "LABEL", help_heading = "Setup")]
    pub office: Option<String>,

    /// Simultaneous users sharing the connection (default: 10)
    #[arg(short = 'u', long, value_name = "COUNT", help_heading = "Setup")]
    pub users: Option<u32>,

    /// Rate the WiFi zone being tested separately from the office total
    #[arg(long, help_heading = "Setup")]
    pub multi_zone: bool,

    /// Users connected to the WiFi zone being tested
    #[arg(long, value_name = "COUNT", help_heading = "Setup")]
    pub zone_users: Option<u32>,

    // Output & Verbosity
    /// Suppress progress output
    #[arg(short = 'q', long, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    /// Output format (default: text)
    #[arg(long, value_name = "FORMAT", value_parser = output_formats::ALL, help_heading = "Output & Verbosity")]
    pub format: Option<String>,

    /// Disable colored output
    #[arg(long, help_heading = "Output & Verbosity")]
    pub no_color: bool,

    /// Disable progress bars
    #[arg(long, help_heading = "Output & Verbosity")]
    pub no_progress: bool,

    /// Show phase timings and resource usage after the report
    #[arg(long, help_heading = "Output & Verbosity")]
    pub timings: bool,

    // Configuration
    /// Use specific config file
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, help_heading = "Configuration")]
    pub no_config: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate shell completions
    #[command(name = "completion-generate", arg_required_else_help = true)]
    CompletionGenerate {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Install shell completions to standard location
    #[command(name = "completion-install", arg_required_else_help = true)]
    CompletionInstall {
        /// The shell to install completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Run interactive setup wizard
    #[command(name = "setup")]
    Setup,
}

/// Convert derive-based CLI arguments directly to CliConfig structure
pub fn cli_to_config(cli: &Cli) -> CliConfig {
    let mut cli_config = CliConfig::default();

    // Setup
    cli_config.office_label = cli.office.clone();
    cli_config.user_count = cli.users;
    cli_config.multi_zone = cli.multi_zone;
    cli_config.zone_user_count = cli.zone_users;

    // Output & format
    cli_config.quiet = cli.quiet;
    cli_config.verbose = cli.verbose;
    cli_config.no_color = cli.no_color;
    cli_config.no_progress = cli.no_progress;
    cli_config.show_timings = cli.timings;
    cli_config.output_format = cli.format.clone();

    // Configuration
    cli_config.config_file = cli.config.clone();
    cli_config.no_config = cli.no_config;

    cli_config
}

/// Validate CLI arguments using the derive-based CLI structure
pub fn validate_cli_args(cli: &Cli) {
    if let Some(users) = cli.users {
        if !(defaults::MIN_USERS..=defaults::MAX_USERS).contains(&users) {
            eprintln!(
                "Error: User count {users} is invalid. Expected a value between {}-{}.",
                defaults::MIN_USERS,
                defaults::MAX_USERS
            );
            std::process::exit(2);
        }
    }

    if let Some(zone_users) = cli.zone_users {
        if !(defaults::MIN_USERS..=defaults::MAX_USERS).contains(&zone_users) {
            eprintln!(
                "Error: Zone user count {zone_users} is invalid. Expected a value between {}-{}.",
                defaults::MIN_USERS,
                defaults::MAX_USERS
            );
            std::process::exit(2);
        }
    }

    if cli.multi_zone && cli.zone_users.is_none() {
        eprintln!("Error: --zone-users is required when --multi-zone is set.");
        std::process::exit(2);
    }

    if let (Some(users), Some(zone_users)) = (cli.users, cli.zone_users)
        && zone_users > users
    {
        eprintln!(
            "Warning: Zone user count {zone_users} exceeds the office total of {users} users."
        );
    }
}
