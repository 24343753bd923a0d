//! Grading and scoring
//!
//! Turns raw measurements into per-metric grades and a weighted overall score
//! from 0 to 100. Thresholds and weights live in [`crate::core::constants`].

pub mod stats;

use crate::core::constants::{grade, score};
use crate::core::types::{Grade, GradedMetrics, RawMetrics};

/// Grades the download speed against its Mbps floors.
pub fn grade_download(mbps: f64) -> Grade {
    if mbps >= grade::DOWNLOAD_EXCELLENT_MBPS {
        Grade::Excellent
    } else if mbps >= grade::DOWNLOAD_GOOD_MBPS {
        Grade::Good
    } else if mbps >= grade::DOWNLOAD_FAIR_MBPS {
        Grade::Fair
    } else {
        Grade::Poor
    }
}

/// Grades the upload speed. A failed upload phase (`None`) grades poor.
pub fn grade_upload(mbps: Option<f64>) -> Grade {
    match mbps {
        Some(v) if v >= grade::UPLOAD_EXCELLENT_MBPS => Grade::Excellent,
        Some(v) if v >= grade::UPLOAD_GOOD_MBPS => Grade::Good,
        Some(v) if v >= grade::UPLOAD_FAIR_MBPS => Grade::Fair,
        _ => Grade::Poor,
    }
}

/// Grades the mean round-trip time against its millisecond ceilings.
pub fn grade_latency(ms: f64) -> Grade {
    if ms <= grade::LATENCY_EXCELLENT_MS {
        Grade::Excellent
    } else if ms <= grade::LATENCY_GOOD_MS {
        Grade::Good
    } else if ms <= grade::LATENCY_FAIR_MS {
        Grade::Fair
    } else {
        Grade::Poor
    }
}

/// Grades the jitter against its millisecond ceilings.
pub fn grade_jitter(ms: f64) -> Grade {
    if ms <= grade::JITTER_EXCELLENT_MS {
        Grade::Excellent
    } else if ms <= grade::JITTER_GOOD_MS {
        Grade::Good
    } else if ms <= grade::JITTER_FAIR_MS {
        Grade::Fair
    } else {
        Grade::Poor
    }
}

/// Grades packet loss. Only a strict zero grades excellent.
pub fn grade_packet_loss(pct: f64) -> Grade {
    if pct == 0.0 {
        Grade::Excellent
    } else if pct <= grade::LOSS_GOOD_PCT {
        Grade::Good
    } else if pct <= grade::LOSS_FAIR_PCT {
        Grade::Fair
    } else {
        Grade::Poor
    }
}

/// Grades the DNS resolution time. Cached and unavailable lookups record
/// `0.0` ms and therefore grade excellent.
pub fn grade_dns(ms: f64) -> Grade {
    if ms <= grade::DNS_EXCELLENT_MS {
        Grade::Excellent
    } else if ms <= grade::DNS_GOOD_MS {
        Grade::Good
    } else if ms <= grade::DNS_FAIR_MS {
        Grade::Fair
    } else {
        Grade::Poor
    }
}

/// Grades the consistency percentage against its floors.
pub fn grade_consistency(pct: f64) -> Grade {
    if pct >= grade::CONSISTENCY_EXCELLENT_PCT {
        Grade::Excellent
    } else if pct >= grade::CONSISTENCY_GOOD_PCT {
        Grade::Good
    } else if pct >= grade::CONSISTENCY_FAIR_PCT {
        Grade::Fair
    } else {
        Grade::Poor
    }
}

/// Grades every scored metric of a finished run.
pub fn grade_metrics(raw: &RawMetrics) -> GradedMetrics {
    GradedMetrics {
        download: grade_download(raw.download_mbps),
        upload: grade_upload(raw.upload_mbps),
        latency: grade_latency(raw.latency_ms),
        jitter: grade_jitter(raw.jitter_ms),
        packet_loss: grade_packet_loss(raw.packet_loss_pct),
        dns: grade_dns(raw.dns_ms),
        consistency: grade_consistency(raw.consistency_pct),
    }
}

/// Weighted overall score: each grade contributes its points times the metric
/// weight, divided by the total weight and rounded to the nearest integer.
pub fn overall_score(grades: &GradedMetrics) -> u8 {
    let total = grades.download.points() * score::WEIGHT_DOWNLOAD
        + grades.upload.points() * score::WEIGHT_UPLOAD
        + grades.latency.points() * score::WEIGHT_LATENCY
        + grades.packet_loss.points() * score::WEIGHT_PACKET_LOSS
        + grades.consistency.points() * score::WEIGHT_CONSISTENCY
        + grades.jitter.points() * score::WEIGHT_JITTER
        + grades.dns.points() * score::WEIGHT_DNS;
    (f64::from(total) / f64::from(score::TOTAL_WEIGHT)).round() as u8
}
