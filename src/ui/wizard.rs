//! Interactive setup wizard for netgrade
//!
//! Provides a step-by-step guided setup describing the office being
//! tested, then saves the answers to a reusable configuration file.

use crate::config::Config;
use crate::core::constants::{defaults, output_formats};
use crate::ui::color::{Colors, colorize};
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
use std::fmt;
use std::path::PathBuf;

/// Errors that can occur during wizard execution
#[derive(Debug)]
pub enum WizardError {
    /// IO error during file operations
    Io(std::io::Error),
    /// Dialoguer interaction error
    Dialog(dialoguer::Error),
    /// Configuration serialization error
    Serialization(toml::ser::Error),
}

impl fmt::Display for WizardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Dialog(e) => write!(f, "Dialog error: {}", e),
            Self::Serialization(e) => write!(f, "Serialization error: {}", e),
        }
    }
}

impl std::error::Error for WizardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Dialog(e) => Some(e),
            Self::Serialization(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for WizardError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error)
    }
}

impl From<dialoguer::Error> for WizardError {
    fn from(error: dialoguer::Error) -> Self {
        Self::Dialog(error)
    }
}

impl From<toml::ser::Error> for WizardError {
    fn from(error: toml::ser::Error) -> Self {
        Self::Serialization(error)
    }
}

/// Result type for wizard operations
type WizardResult<T> = Result<T, WizardError>;

/// Setup wizard builder for step-by-step configuration
pub struct SetupWizard {
    theme: ColorfulTheme,
}

impl Default for SetupWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl SetupWizard {
    /// Create a new setup wizard
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }

    /// Run the interactive setup wizard
    pub fn run(&self) -> WizardResult<()> {
        self.display_welcome();

        let office_label = self.prompt_office_label()?;
        let user_count = self.prompt_user_count()?;
        let (multi_zone, zone_user_count) = self.prompt_zone(user_count)?;
        let output_format = self.prompt_output_format()?;

        let config = Config {
            office_label: Some(office_label),
            user_count: Some(user_count),
            multi_zone: Some(multi_zone),
            zone_user_count,
            output_format: Some(output_format),
            ..Config::default()
        };

        self.save_config(&config)?;
        self.show_completion_message();

        Ok(())
    }

    fn display_welcome(&self) {
        println!(
            "\n{}",
            colorize("🧭 Assistant de configuration netgrade", Colors::BRIGHT_CYAN)
        );
        println!(
            "{}\n",
            colorize(
                "Décrivez votre bureau pour adapter l'analyse.",
                Colors::CYAN
            )
        );
    }

    fn prompt_office_label(&self) -> WizardResult<String> {
        Ok(Input::with_theme(&self.theme)
            .with_prompt("Nom du bureau")
            .default(defaults::OFFICE_LABEL.to_string())
            .interact_text()?)
    }

    fn prompt_user_count(&self) -> WizardResult<u32> {
        Ok(Input::with_theme(&self.theme)
            .with_prompt("Nombre d'utilisateurs simultanés")
            .default(defaults::USER_COUNT)
            .validate_with(Self::validate_user_count)
            .interact_text()?)
    }

    fn prompt_zone(&self, user_count: u32) -> WizardResult<(bool, Option<u32>)> {
        let multi_zone = Confirm::with_theme(&self.theme)
            .with_prompt("Analyser une zone WiFi distincte du reste du bureau ?")
            .default(false)
            .interact()?;

        if !multi_zone {
            return Ok((false, None));
        }

        let zone_users: u32 = Input::with_theme(&self.theme)
            .with_prompt("Utilisateurs dans cette zone")
            .default(user_count)
            .validate_with(Self::validate_user_count)
            .interact_text()?;

        Ok((true, Some(zone_users)))
    }

    fn prompt_output_format(&self) -> WizardResult<String> {
        let selection = Select::with_theme(&self.theme)
            .with_prompt("Format de sortie")
            .items(&output_formats::ALL)
            .default(0)
            .interact()?;

        Ok(output_formats::ALL[selection].to_string())
    }

    /// Validation function for user counts
    fn validate_user_count(input: &u32) -> Result<(), &'static str> {
        if (defaults::MIN_USERS..=defaults::MAX_USERS).contains(input) {
            Ok(())
        } else {
            Err("Doit être entre 1 et 500")
        }
    }

    /// Generate and save the configuration file
    fn save_config(&self, config: &Config) -> WizardResult<()> {
        println!(
            "\n{}",
            colorize("💾 Génération de la configuration...", Colors::BRIGHT_CYAN)
        );

        let config_content = toml::to_string(config)?;
        let config_path = PathBuf::from(defaults::CONFIG_FILE_NAME);

        if config_path.exists() {
            let overwrite = Confirm::with_theme(&self.theme)
                .with_prompt(format!(
                    "{} {} existe déjà. Écraser ?",
                    colorize("⚠️", Colors::YELLOW),
                    defaults::CONFIG_FILE_NAME
                ))
                .default(false)
                .interact()?;

            if !overwrite {
                println!(
                    "{}",
                    colorize("Configuration non enregistrée.", Colors::YELLOW)
                );
                return Ok(());
            }
        }

        std::fs::write(&config_path, config_content)?;

        println!(
            "\n{} {}",
            colorize("✅", Colors::GREEN),
            colorize(
                &format!("Configuration enregistrée dans {}", defaults::CONFIG_FILE_NAME),
                Colors::GREEN
            )
        );

        Ok(())
    }

    fn show_completion_message(&self) {
        println!(
            "\n{}",
            colorize(
                "🎉 Configuration terminée ! Lancez netgrade pour analyser votre connexion.",
                Colors::GREEN
            )
        );
    }
}

/// Run the interactive setup wizard
pub fn run_setup_wizard() -> WizardResult<()> {
    SetupWizard::new().run()
}
