//! Report formatting and display logic for netgrade

use serde_json::json;

use crate::core::constants::{output_formats, use_cases};
use crate::core::{Grade, PhaseId, RawMetrics, RunConfiguration, RunResult};
use crate::reporting::{advice, logging};
use crate::ui::color::{self, Colors, colorize};

/// How a finished run should be rendered
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub format: String,
    pub no_color: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            format: output_formats::DEFAULT.to_string(),
            no_color: false,
        }
    }
}

/// One rendered line of the metric table
struct MetricRow {
    id: PhaseId,
    name: &'static str,
    value: String,
    sub: String,
    grade: Grade,
}

/// Display a finished run based on the selected output format
pub fn display_report(result: &RunResult, config: &RunConfiguration, options: &ReportOptions) {
    match options.format.as_str() {
        output_formats::MINIMAL => display_minimal_report(result),
        output_formats::JSON => display_json_report(result, config),
        _ => display_text_report(result, config, options.no_color),
    }
}

/// Display the score plus every metric graded below "good" (no colors, no grouping)
fn display_minimal_report(result: &RunResult) {
    println!("score {}", result.score);
    for row in metric_rows(result) {
        if row.grade < Grade::Good {
            println!("{} {} {}", row.grade.as_str(), row.id.as_str(), row.value);
        }
    }
}

/// Build the machine-readable report document
pub fn json_report(result: &RunResult, config: &RunConfiguration) -> serde_json::Value {
    json!({
        "office": config.office_label,
        "users": config.primary_user_count,
        "multi_zone": config.multi_zone_enabled,
        "zone_users": config.multi_zone_enabled.then_some(config.zone_user_count),
        "score": result.score,
        "grades": result.grades,
        "metrics": result.raw,
        "recommendations": result.recommendations,
        "started_at": result.started_at.to_rfc3339(),
        "duration_ms": result.duration_ms,
    })
}

fn display_json_report(result: &RunResult, config: &RunConfiguration) {
    let report = json_report(result, config);
    match serde_json::to_string_pretty(&report) {
        Ok(rendered) => println!("{rendered}"),
        Err(err) => logging::log_error("Failed to render JSON report", Some(&err)),
    }
}

/// Display the full French report with colors and grade tags
fn display_text_report(result: &RunResult, config: &RunConfiguration, no_color: bool) {
    let raw = &result.raw;

    // Header
    println!();
    println!(
        "{} {}",
        style("📡", Colors::BRIGHT_CYAN, no_color),
        style(&report_title(config), Colors::BOLD, no_color)
    );
    println!(
        "   {}",
        style(&user_context_line(raw, config), Colors::DIM, no_color)
    );
    if let Some(line) = isp_line(raw) {
        println!("   {}", style(&line, Colors::DIM, no_color));
    }

    // Verdict and recommendations
    println!();
    println!(
        "   Score : {}",
        style(
            &format!("{}/100", result.score),
            color::score_color(result.score),
            no_color
        )
    );
    println!("   {}", advice::verdict_headline(result.score));
    for recommendation in &result.recommendations {
        println!("   • {recommendation}");
    }

    // Metric table
    println!();
    for row in metric_rows(result) {
        let tag = style(
            &format!("{:<9}", row.grade.label()),
            color::grade_color(row.grade),
            no_color,
        );
        if row.sub.is_empty() {
            println!("   {:<18} {:<12} {}", row.name, row.value, tag);
        } else {
            println!(
                "   {:<18} {:<12} {} {}",
                row.name,
                row.value,
                tag,
                style(&row.sub, Colors::DIM, no_color)
            );
        }
    }

    // Per-user section
    println!();
    println!(
        "   {}",
        style(&per_user_heading(raw, config), Colors::BOLD, no_color)
    );
    println!(
        "   {} Mbps / util.",
        style(&format!("{:.2}", raw.mbps_per_user), Colors::BOLD, no_color)
    );
    for use_case in &use_cases::ALL {
        let supported = raw.mbps_per_user >= use_case.required_mbps_per_user;
        let (tag, tag_color) = if supported {
            ("SUPPORTÉ", Colors::CYAN)
        } else {
            ("LIMITÉ", Colors::RED)
        };
        println!(
            "   {:<22} {:<23} {}",
            use_case.label,
            format!("{} requis", use_case.requirement_label),
            style(tag, tag_color, no_color)
        );
    }
    println!(
        "   {}",
        advice::per_user_summary(
            raw.mbps_per_user,
            effective_users(raw, config),
            config.multi_zone_enabled
        )
    );

    // Footer
    println!();
    let finished_at =
        result.started_at + chrono::Duration::milliseconds(result.duration_ms as i64);
    println!(
        "   {}",
        style(
            &format!(
                "Testé à {} · Durée {}",
                finished_at.format("%H:%M:%S"),
                format_duration(result.duration_ms)
            ),
            Colors::DIM,
            no_color
        )
    );
}

fn metric_rows(result: &RunResult) -> Vec<MetricRow> {
    let raw = &result.raw;
    let grades = &result.grades;

    vec![
        MetricRow {
            id: PhaseId::Download,
            name: "Téléchargement",
            value: format!("{:.1} Mbps", raw.download_mbps),
            sub: if grades.download == Grade::Poor {
                "En dessous du seuil de 20 Mbps".to_string()
            } else {
                String::new()
            },
            grade: grades.download,
        },
        MetricRow {
            id: PhaseId::Upload,
            name: "Envoi",
            value: match raw.upload_mbps {
                Some(mbps) => format!("{mbps:.1} Mbps"),
                None => "—".to_string(),
            },
            sub: String::new(),
            grade: grades.upload,
        },
        MetricRow {
            id: PhaseId::Latency,
            name: "Latence (RTT)",
            value: format!("{} ms", raw.latency_ms),
            sub: if raw.latency_samples.is_empty() {
                String::new()
            } else {
                format!(
                    "Min {} ms · Max {} ms",
                    raw.latency_min_ms, raw.latency_max_ms
                )
            },
            grade: grades.latency,
        },
        MetricRow {
            id: PhaseId::Jitter,
            name: "Gigue",
            value: format!("{} ms", raw.jitter_ms),
            sub: "Écart-type de la latence".to_string(),
            grade: grades.jitter,
        },
        MetricRow {
            id: PhaseId::PacketLoss,
            name: "Pertes de paquets",
            value: format!("{}%", raw.packet_loss_pct),
            sub: if raw.total_probes > 0 {
                format!(
                    "{} sur {} sondes perdues",
                    raw.failed_probes, raw.total_probes
                )
            } else {
                String::new()
            },
            grade: grades.packet_loss,
        },
        MetricRow {
            id: PhaseId::Dns,
            name: "Résolution DNS",
            value: raw.dns_display(),
            sub: if raw.dns_unavailable {
                "Indisponible".to_string()
            } else if raw.dns_cached {
                "Résultat en cache".to_string()
            } else {
                String::new()
            },
            grade: grades.dns,
        },
        MetricRow {
            id: PhaseId::Consistency,
            name: "Consistance",
            value: format!("{}%", raw.consistency_pct),
            sub: if raw.consistency_runs.is_empty() {
                String::new()
            } else {
                raw.consistency_runs
                    .iter()
                    .map(|mbps| format!("{mbps:.1} Mbps"))
                    .collect::<Vec<_>>()
                    .join(" · ")
            },
            grade: grades.consistency,
        },
    ]
}

fn effective_users(raw: &RawMetrics, config: &RunConfiguration) -> u32 {
    if raw.effective_user_count > 0 {
        raw.effective_user_count
    } else {
        config.primary_user_count
    }
}

fn report_title(config: &RunConfiguration) -> String {
    if config.office_label.is_empty() {
        "Résultats de l'analyse".to_string()
    } else {
        format!("{} — Résultats", config.office_label)
    }
}

fn user_context_line(raw: &RawMetrics, config: &RunConfiguration) -> String {
    if config.multi_zone_enabled {
        format!(
            "{} util. dans la zone · {} dans le bureau",
            effective_users(raw, config),
            config.primary_user_count
        )
    } else {
        let count = config.primary_user_count;
        format!("{} utilisateur{}", count, if count != 1 { "s" } else { "" })
    }
}

fn isp_line(raw: &RawMetrics) -> Option<String> {
    if raw.isp_name.is_none() && raw.upstream_name.is_none() {
        return None;
    }

    let mut parts = Vec::new();
    if let Some(ref isp) = raw.isp_name {
        parts.push(format!("Fournisseur : {isp}"));
    }
    if let Some(ref upstream) = raw.upstream_name {
        parts.push(format!("Opérateur réseau : {upstream}"));
    }
    if let Some(ref ip) = raw.public_ip {
        parts.push(ip.clone());
    }
    Some(parts.join(" · "))
}

fn per_user_heading(raw: &RawMetrics, config: &RunConfiguration) -> String {
    if config.multi_zone_enabled {
        format!(
            "Bande passante par utilisateur — zone ({} personnes)",
            effective_users(raw, config)
        )
    } else {
        "Bande passante par utilisateur".to_string()
    }
}

fn format_duration(duration_ms: u64) -> String {
    let elapsed = (duration_ms as f64 / 1000.0).round() as u64;
    if elapsed < 60 {
        format!("{elapsed}s")
    } else {
        format!("{}m {}s", elapsed / 60, elapsed % 60)
    }
}

fn style(text: &str, color: &str, no_color: bool) -> String {
    if no_color {
        text.to_string()
    } else {
        colorize(text, color)
    }
}
