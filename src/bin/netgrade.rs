use clap::{CommandFactory, Parser};
use netgrade::config::Config;
use netgrade::core::constants::output_formats;
use netgrade::core::{NullSink, RunConfiguration, StatusSink};
use netgrade::reporting::RunProfiler;
use netgrade::reporting::logging;
use netgrade::runner::{AssessNetwork, Runner};
use netgrade::ui::completion::{install_completion, print_completions};
use netgrade::ui::output;
use netgrade::ui::{
    Cli, Commands, ProgressReporter, cli_to_config, run_setup_wizard, validate_cli_args,
};

use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Handle completion and setup commands first
    if let Some(exit_code) = handle_subcommands(&cli) {
        std::process::exit(exit_code);
    }

    // Validate argument ranges before doing any network work
    validate_cli_args(&cli);

    // Run the main assessment logic
    match run_netgrade_logic(&cli).await {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Handle subcommands and return exit code if one was processed
pub fn handle_subcommands(cli: &Cli) -> Option<i32> {
    match cli.command {
        Some(Commands::CompletionGenerate { shell }) => {
            let mut app = Cli::command();
            print_completions(shell, &mut app);
            Some(0)
        }
        Some(Commands::CompletionInstall { shell }) => match install_completion(shell) {
            Ok(message) => {
                println!("{message}");
                Some(0)
            }
            Err(e) => {
                eprintln!("Error: {e}");
                Some(1)
            }
        },
        Some(Commands::Setup) => match run_setup_wizard() {
            Ok(()) => Some(0),
            Err(e) => {
                eprintln!("Error: {e}");
                Some(1)
            }
        },
        None => None,
    }
}

/// Main assessment logic extracted from main() for testing
pub async fn run_netgrade_logic(cli: &Cli) -> Result<i32, Box<dyn std::error::Error>> {
    // Parse CLI arguments into CliConfig using the derive-based CLI
    let cli_config = cli_to_config(cli);

    // Load and merge configuration
    let config = load_and_merge_config(&cli_config)?;

    // Initialize performance profiler if requested
    let mut profiler = if config.show_timings() {
        Some(RunProfiler::new())
    } else {
        None
    };

    // Setup logging and output settings
    let output_settings = setup_output_settings(&config);
    logging::init_logger(output_settings.verbose, output_settings.quiet);

    // Turn the merged configuration into run parameters
    let run_config = config.to_run_configuration().inspect_err(|e| {
        logging::log_error("Invalid run configuration", Some(e));
    })?;

    // Display run info if needed
    if output_settings.should_show_run_info() {
        display_run_info(&run_config, &output_settings);
    }

    // Ctrl-C requests a graceful stop instead of killing mid-probe
    let cancel = CancellationToken::new();
    spawn_cancel_watcher(cancel.clone());

    // Initialize progress reporter
    let progress = create_progress_reporter(&output_settings);
    let null_sink = NullSink;
    let sink: &dyn StatusSink = match progress.as_ref() {
        Some(reporter) => reporter,
        None => &null_sink,
    };

    // Run all measurement phases
    let mut runner = Runner::new().inspect_err(|e| {
        logging::log_error("Could not build the probe client", Some(e));
    })?;
    let outcome = runner
        .assess(&run_config, sink, &cancel, profiler.as_mut())
        .await;

    // Finalize progress reporting
    finalize_progress_reporter(progress);

    match outcome? {
        Some(result) => {
            let options = output::ReportOptions {
                format: output_settings.output_format.clone(),
                no_color: config.no_color(),
            };
            output::display_report(&result, &run_config, &options);
            logging::log_run_complete(result.score, result.duration_ms);

            // Display performance summary if profiling was enabled
            if let Some(ref profiler) = profiler {
                profiler.display_summary();
            }

            Ok(0)
        }
        None => {
            if !output_settings.quiet {
                println!("Analyse annulée.");
            }
            Ok(1)
        }
    }
}

/// Load configuration from file or standard locations and merge with CLI config
pub fn load_and_merge_config(
    cli_config: &netgrade::config::CliConfig,
) -> Result<Config, Box<dyn std::error::Error>> {
    let config = Config::resolve(cli_config).inspect_err(|e| {
        logging::log_error("Could not load configuration", Some(e));
    })?;
    Ok(config)
}

/// Settings for output formatting and display
pub struct OutputSettings {
    pub quiet: bool,
    pub verbose: bool,
    pub output_format: String,
    pub show_progress: bool,
}

impl OutputSettings {
    pub fn should_show_run_info(&self) -> bool {
        !self.quiet && self.output_format == output_formats::TEXT
    }
}

/// Setup output settings from the merged configuration
pub fn setup_output_settings(config: &Config) -> OutputSettings {
    let quiet = config.quiet();
    OutputSettings {
        quiet,
        verbose: config.verbose(),
        output_format: config.output_format(),
        show_progress: !quiet && !config.no_progress(),
    }
}

/// Display the run parameters before probing starts
pub fn display_run_info(run_config: &RunConfiguration, output_settings: &OutputSettings) {
    logging::log_run_config(run_config, &output_settings.output_format);

    let users = run_config.primary_user_count;
    let mut line = format!(
        "📡 Analyse de la connexion · {} · {} utilisateur{}",
        run_config.office_label,
        users,
        if users == 1 { "" } else { "s" }
    );
    if run_config.multi_zone_enabled {
        let zone_users = run_config.zone_user_count;
        line.push_str(&format!(
            " · zone de {} utilisateur{}",
            zone_users,
            if zone_users == 1 { "" } else { "s" }
        ));
    }
    println!("{line}");
    println!();
}

/// Request cancellation when Ctrl-C is received
pub fn spawn_cancel_watcher(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });
}

/// Create progress reporter if needed
pub fn create_progress_reporter(output_settings: &OutputSettings) -> Option<ProgressReporter> {
    if output_settings.show_progress && output_settings.output_format == output_formats::TEXT {
        Some(ProgressReporter::new(true))
    } else {
        None
    }
}

/// Finalize progress reporting
pub fn finalize_progress_reporter(progress: Option<ProgressReporter>) {
    if let Some(ref progress) = progress {
        progress.finish_and_clear();
    }
}
