//! Property-based tests for netgrade using proptest
//!
//! These tests generate random inputs to test edge cases and ensure
//! robustness across a wide range of potential inputs.

use assert_cmd::prelude::*;
use proptest::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

use netgrade::core::{Grade, GradedMetrics, RawMetrics};

const NAME: &str = "netgrade";

/// Generate an arbitrary grade
fn grade_strategy() -> impl Strategy<Value = Grade> {
    prop_oneof![
        Just(Grade::Poor),
        Just(Grade::Fair),
        Just(Grade::Good),
        Just(Grade::Excellent),
    ]
}

/// Generate raw metrics spanning the plausible measurement space
fn raw_metrics_strategy() -> impl Strategy<Value = RawMetrics> {
    (
        0.0..1000.0f64,                  // download
        prop::option::of(0.0..500.0f64), // upload
        0.1..999.0f64,                   // latency
        0.0..200.0f64,                   // jitter
        0.0..100.0f64,                   // packet loss
        0.0..500.0f64,                   // dns
        0.0..100.0f64,                   // consistency
    )
        .prop_map(
            |(download, upload, latency, jitter, loss, dns, consistency)| RawMetrics {
                download_mbps: download,
                upload_mbps: upload,
                latency_ms: latency,
                jitter_ms: jitter,
                packet_loss_pct: loss,
                dns_ms: dns,
                consistency_pct: consistency,
                ..RawMetrics::default()
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(10))] // Default is 256...

    // Every spawned command below exits during argument or config
    // validation, before any probe could reach the network.

    #[test]
    fn test_rejects_out_of_range_user_counts(users in 501u32..10_000) {
        let mut cmd = Command::cargo_bin(NAME).unwrap();
        cmd.arg("--users").arg(users.to_string());

        cmd.assert().failure().code(2);
    }

    #[test]
    fn test_rejects_out_of_range_zone_user_counts(zone_users in 501u32..10_000) {
        let mut cmd = Command::cargo_bin(NAME).unwrap();
        cmd.arg("--multi-zone")
            .arg("--zone-users")
            .arg(zone_users.to_string());

        cmd.assert().failure().code(2);
    }

    #[test]
    fn test_rejects_unknown_formats(
        format in r"[a-z]{4,8}".prop_filter("must not collide with a real format", |f| {
            !["text", "json", "minimal"].contains(&f.as_str())
        })
    ) {
        let mut cmd = Command::cargo_bin(NAME).unwrap();
        cmd.arg("--format").arg(&format);

        cmd.assert().failure();
    }

    #[test]
    fn test_rejects_out_of_range_config_user_counts(users in 501u32..100_000) {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(format!("user_count = {users}").as_bytes())
            .unwrap();

        let mut cmd = Command::cargo_bin(NAME).unwrap();
        cmd.arg("--config").arg(file.path());

        cmd.assert().failure().code(1);
    }
}

#[cfg(test)]
mod unit_property_tests {
    use super::*;
    use netgrade::reporting::{per_user_summary, verdict_headline};
    use netgrade::scoring::{self, stats};
    use proptest::proptest;

    proptest! {

        #[test]
        fn test_overall_score_stays_in_bounds(
            download in grade_strategy(),
            upload in grade_strategy(),
            latency in grade_strategy(),
            jitter in grade_strategy(),
            packet_loss in grade_strategy(),
            dns in grade_strategy(),
            consistency in grade_strategy(),
        ) {
            let grades = GradedMetrics {
                download,
                upload,
                latency,
                jitter,
                packet_loss,
                dns,
                consistency,
            };
            let score = scoring::overall_score(&grades);
            prop_assert!((10..=100).contains(&score));
        }

        #[test]
        fn test_uniform_grades_score_their_points(grade in grade_strategy()) {
            let grades = GradedMetrics {
                download: grade,
                upload: grade,
                latency: grade,
                jitter: grade,
                packet_loss: grade,
                dns: grade,
                consistency: grade,
            };
            prop_assert_eq!(scoring::overall_score(&grades), grade.points() as u8);
        }

        #[test]
        fn test_grade_metrics_never_panics(raw in raw_metrics_strategy()) {
            let grades = scoring::grade_metrics(&raw);
            let score = scoring::overall_score(&grades);
            prop_assert!((10..=100).contains(&score));
        }

        #[test]
        fn test_download_grade_is_monotonic(a in 0.0..1000.0f64, b in 0.0..1000.0f64) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(
                scoring::grade_download(lo).points() <= scoring::grade_download(hi).points()
            );
        }

        #[test]
        fn test_round1_is_idempotent(value in -1_000_000.0..1_000_000.0f64) {
            let once = stats::round1(value);
            prop_assert_eq!(stats::round1(once), once);
        }

        #[test]
        fn test_std_dev_ignores_sample_order(
            samples in prop::collection::vec(0.0..1000.0f64, 1..20)
        ) {
            let mut sorted = samples.clone();
            sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
            let difference =
                (stats::population_std_dev(&samples) - stats::population_std_dev(&sorted)).abs();
            prop_assert!(difference < 1e-6);
        }

        #[test]
        fn test_identical_samples_have_no_variation(
            value in 0.1..1000.0f64,
            count in 2usize..10,
        ) {
            let samples = vec![value; count];
            prop_assert!(stats::coefficient_of_variation(&samples) < 1e-9);
        }

        #[test]
        fn test_verdict_headline_is_total(score in 0u8..=100) {
            prop_assert!(!verdict_headline(score).is_empty());
        }

        #[test]
        fn test_per_user_summary_is_total(
            mbps_per_user in 0.0..1000.0f64,
            user_count in 1u32..=500,
            multi_zone in proptest::bool::ANY,
        ) {
            let summary = per_user_summary(mbps_per_user, user_count, multi_zone);
            prop_assert!(!summary.is_empty());
        }
    }
}
