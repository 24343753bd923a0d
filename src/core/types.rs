//! Core data types shared across the application.

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::core::constants::{fallback, phases, score};
use crate::core::error::{NetgradeError, Result};

/// Identifies one of the eight assessment phases, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseId {
    Latency,
    Jitter,
    PacketLoss,
    Download,
    Upload,
    Dns,
    Consistency,
    PerUser,
}

impl PhaseId {
    /// Stable machine-readable identifier for logs and profiling
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseId::Latency => "latency",
            PhaseId::Jitter => "jitter",
            PhaseId::PacketLoss => "packet_loss",
            PhaseId::Download => "download",
            PhaseId::Upload => "upload",
            PhaseId::Dns => "dns",
            PhaseId::Consistency => "consistency",
            PhaseId::PerUser => "per_user",
        }
    }

    /// Position of this phase in the execution order
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// French display name of this phase
    pub fn name(&self) -> &'static str {
        self.descriptor().name
    }

    /// Full catalog entry for this phase
    pub fn descriptor(&self) -> &'static PhaseDescriptor {
        &phases::ALL[self.index()]
    }
}

/// Lifecycle of a single phase as shown in progress output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseStatus {
    Waiting,
    Active,
    Done,
    Error,
}

/// Quality grade assigned to a measured metric.
///
/// Ordering follows quality, so `Grade::Poor < Grade::Excellent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl Grade {
    /// French display label
    pub fn label(&self) -> &'static str {
        match self {
            Grade::Poor => "Faible",
            Grade::Fair => "Moyen",
            Grade::Good => "Bon",
            Grade::Excellent => "Excellent",
        }
    }

    /// Stable lowercase identifier, matching the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::Poor => "poor",
            Grade::Fair => "fair",
            Grade::Good => "good",
            Grade::Excellent => "excellent",
        }
    }

    /// Points contributed to the weighted overall score
    pub fn points(&self) -> u32 {
        match self {
            Grade::Poor => score::POINTS_POOR,
            Grade::Fair => score::POINTS_FAIR,
            Grade::Good => score::POINTS_GOOD,
            Grade::Excellent => score::POINTS_EXCELLENT,
        }
    }
}

/// Catalog entry describing one phase.
#[derive(Debug, Clone, Copy)]
pub struct PhaseDescriptor {
    pub id: PhaseId,
    /// French display name
    pub name: &'static str,
    /// French one-line description
    pub description: &'static str,
}

/// A bandwidth requirement checked against the per-user result.
#[derive(Debug, Clone, Copy)]
pub struct UseCase {
    /// French display label
    pub label: &'static str,
    /// Bandwidth each user needs for this use case, in Mbps
    pub required_mbps_per_user: f64,
    /// French requirement label shown in the report
    pub requirement_label: &'static str,
}

/// Every value measured (or derived) during a run.
///
/// Phases that fail leave their fallback value here via [`RawMetrics::apply_fallback`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct RawMetrics {
    /// Mean round-trip time in milliseconds, rounded to one decimal
    pub latency_ms: f64,
    pub latency_min_ms: f64,
    pub latency_max_ms: f64,
    /// Raw round-trip samples, kept for the jitter phase
    #[serde(skip)]
    pub latency_samples: Vec<f64>,
    /// Population standard deviation of the latency samples, in milliseconds
    pub jitter_ms: f64,
    pub packet_loss_pct: f64,
    pub failed_probes: u32,
    pub total_probes: u32,
    pub download_mbps: f64,
    /// `None` when the upload phase failed
    pub upload_mbps: Option<f64>,
    pub dns_ms: f64,
    /// Resolution completed under the cached threshold
    pub dns_cached: bool,
    /// Neither DNS host could be resolved
    pub dns_unavailable: bool,
    pub consistency_pct: f64,
    /// Speed of each consistency run in Mbps, rounded to one decimal
    pub consistency_runs: Vec<f64>,
    pub mbps_per_user: f64,
    /// User count the per-user bandwidth was divided by
    pub effective_user_count: u32,
    pub isp_name: Option<String>,
    pub upstream_name: Option<String>,
    pub public_ip: Option<String>,
}

impl RawMetrics {
    /// Display string for the DNS result: `—` when unavailable, `<1 ms` when
    /// cached, the rounded time otherwise.
    pub fn dns_display(&self) -> String {
        if self.dns_unavailable {
            "—".to_string()
        } else if self.dns_cached {
            "<1 ms".to_string()
        } else {
            format!("{} ms", self.dns_ms)
        }
    }

    /// Records the fallback value for a failed phase.
    ///
    /// A failed latency phase also zeroes jitter since the samples it would
    /// derive from are meaningless.
    pub fn apply_fallback(&mut self, phase: PhaseId) {
        match phase {
            PhaseId::Latency => {
                self.latency_ms = fallback::LATENCY_MS;
                self.latency_min_ms = fallback::LATENCY_MS;
                self.latency_max_ms = fallback::LATENCY_MS;
                self.latency_samples.clear();
                self.jitter_ms = fallback::JITTER_MS;
            }
            PhaseId::Jitter => self.jitter_ms = fallback::JITTER_MS,
            PhaseId::PacketLoss => self.packet_loss_pct = fallback::PACKET_LOSS_PCT,
            PhaseId::Download => self.download_mbps = fallback::DOWNLOAD_MBPS,
            PhaseId::Upload => self.upload_mbps = None,
            PhaseId::Dns => {
                self.dns_ms = fallback::DNS_MS;
                self.dns_cached = false;
                self.dns_unavailable = true;
            }
            PhaseId::Consistency => {
                self.consistency_pct = fallback::CONSISTENCY_PCT;
                self.consistency_runs.clear();
            }
            PhaseId::PerUser => self.mbps_per_user = fallback::PER_USER_MBPS,
        }
    }
}

/// Grade assigned to each scored metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GradedMetrics {
    pub download: Grade,
    pub upload: Grade,
    pub latency: Grade,
    pub jitter: Grade,
    pub packet_loss: Grade,
    pub dns: Grade,
    pub consistency: Grade,
}

/// Complete outcome of a finished run.
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub raw: RawMetrics,
    pub grades: GradedMetrics,
    /// Weighted overall score from 0 to 100
    pub score: u8,
    pub recommendations: Vec<String>,
    pub started_at: DateTime<Local>,
    pub duration_ms: u64,
}

/// Coarse lifecycle of the assessment runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunLifecycleState {
    Setup,
    Testing,
    Results,
}

/// Validated inputs describing the office being assessed.
#[derive(Debug, Clone)]
pub struct RunConfiguration {
    pub office_label: String,
    pub primary_user_count: u32,
    pub multi_zone_enabled: bool,
    /// User count of the WiFi zone, only meaningful when multi-zone is enabled
    pub zone_user_count: u32,
}

impl Default for RunConfiguration {
    fn default() -> Self {
        use crate::core::constants::defaults;
        Self {
            office_label: defaults::OFFICE_LABEL.to_string(),
            primary_user_count: defaults::USER_COUNT,
            multi_zone_enabled: false,
            zone_user_count: defaults::USER_COUNT,
        }
    }
}

impl RunConfiguration {
    /// User count the bandwidth is divided by: the zone count in multi-zone
    /// mode, the office count otherwise.
    pub fn effective_user_count(&self) -> u32 {
        if self.multi_zone_enabled {
            self.zone_user_count
        } else {
            self.primary_user_count
        }
    }

    /// Checks user counts against the accepted range.
    pub fn validate(&self) -> Result<()> {
        use crate::core::constants::defaults::{MAX_USERS, MIN_USERS};

        if self.primary_user_count < MIN_USERS || self.primary_user_count > MAX_USERS {
            return Err(NetgradeError::InvalidArgument(format!(
                "user count must be between {} and {}, got {}",
                MIN_USERS, MAX_USERS, self.primary_user_count
            )));
        }
        if self.multi_zone_enabled
            && (self.zone_user_count < MIN_USERS || self.zone_user_count > MAX_USERS)
        {
            return Err(NetgradeError::InvalidArgument(format!(
                "zone user count must be between {} and {}, got {}",
                MIN_USERS, MAX_USERS, self.zone_user_count
            )));
        }
        Ok(())
    }
}

/// Receives phase updates while a run is in progress.
///
/// The runner reports through this seam so progress rendering stays out of the
/// measurement path. [`NullSink`] discards everything.
pub trait StatusSink: Send + Sync {
    /// Reports a phase entering a new status, with an optional live detail
    /// such as `"42 ms moy."`.
    fn phase_status(&self, phase: PhaseId, status: PhaseStatus, detail: Option<&str>);

    /// Reports overall progress as a percentage from 0 to 100.
    fn overall_progress(&self, percent: f64);
}

/// A [`StatusSink`] that discards all updates.
pub struct NullSink;

impl StatusSink for NullSink {
    fn phase_status(&self, _phase: PhaseId, _status: PhaseStatus, _detail: Option<&str>) {}

    fn overall_progress(&self, _percent: f64) {}
}
