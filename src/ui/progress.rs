use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;

use crate::core::constants::phases;
use crate::core::{PhaseId, PhaseStatus, StatusSink};

pub struct ProgressReporter {
    multi_progress: Arc<MultiProgress>,
    phase_bar: Option<ProgressBar>,
    enabled: bool,
}

impl ProgressReporter {
    pub fn new(enabled: bool) -> Self {
        let multi_progress = Arc::new(MultiProgress::new());
        let phase_bar = if enabled {
            let pb = multi_progress.add(ProgressBar::new(phases::ALL.len() as u64));
            pb.set_style(
                ProgressStyle::default_bar()
                    .template(
                        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                    )
                    .unwrap()
                    .progress_chars("#>-"),
            );
            pb.set_message("Initialisation");
            pb.enable_steady_tick(Duration::from_millis(120));
            Some(pb)
        } else {
            None
        };

        Self {
            multi_progress,
            phase_bar,
            enabled,
        }
    }

    pub fn finish_and_clear(&self) {
        if self.enabled {
            // Clear the progress bar and add a blank line
            self.multi_progress.clear().unwrap_or(());
            println!();
        }
    }

    pub fn log_warning(&self, message: &str) {
        if self.enabled {
            self.multi_progress
                .println(format!("⚠ {message}"))
                .unwrap_or(());
        }
    }

    fn position_for(percent: f64) -> u64 {
        let total = phases::ALL.len() as f64;
        (percent / 100.0 * total).round() as u64
    }
}

impl StatusSink for ProgressReporter {
    fn phase_status(&self, phase: PhaseId, status: PhaseStatus, detail: Option<&str>) {
        let Some(ref pb) = self.phase_bar else {
            return;
        };

        let name = phase.name();
        match status {
            PhaseStatus::Waiting => {}
            PhaseStatus::Active => match detail {
                Some(live) => pb.set_message(format!("{name} · {live}")),
                None => pb.set_message(name.to_string()),
            },
            PhaseStatus::Done => {
                let line = match detail {
                    Some(label) => format!("✓ {name} · {label}"),
                    None => format!("✓ {name}"),
                };
                self.multi_progress.println(line).unwrap_or(());
            }
            PhaseStatus::Error => {
                let line = match detail {
                    Some(reason) => format!("✗ {name} · {reason}"),
                    None => format!("✗ {name}"),
                };
                self.multi_progress.println(line).unwrap_or(());
            }
        }
    }

    fn overall_progress(&self, percent: f64) {
        if let Some(ref pb) = self.phase_bar {
            pb.set_position(Self::position_for(percent));
        }
    }
}
