//! Assessment runner
//!
//! Drives the eight phases in execution order, aggregates their readings and
//! owns the run lifecycle. Cancellation is checked between phases and raced
//! against the phase in flight, with a short grace period before the phase
//! is abandoned.

use std::time::Instant;

use async_trait::async_trait;
use chrono::Local;
use tokio_util::sync::CancellationToken;

use crate::core::constants::{phases, probe, timing};
use crate::core::error::{NetgradeError, Result};
use crate::core::types::{
    PhaseId, PhaseStatus, RawMetrics, RunConfiguration, RunLifecycleState, RunResult, StatusSink,
};
use crate::probes::{self, ProbeClient};
use crate::reporting::advice;
use crate::reporting::performance::RunProfiler;
use crate::scoring::{self, stats};

/// Seam for driving a full assessment, mockable in tests.
#[async_trait]
pub trait AssessNetwork {
    /// Runs the assessment and returns its result, or `None` when the run
    /// was cancelled or a run is already in progress.
    async fn assess(
        &mut self,
        config: &RunConfiguration,
        sink: &dyn StatusSink,
        cancel: &CancellationToken,
        profiler: Option<&mut RunProfiler>,
    ) -> Result<Option<RunResult>>;
}

/// Drives the assessment phases against the configured endpoints.
pub struct Runner {
    client: ProbeClient,
    lifecycle: RunLifecycleState,
}

impl Runner {
    pub fn new() -> Result<Self> {
        Ok(Self::with_client(ProbeClient::new()?))
    }

    /// Builds a runner around an existing client, used to point the probes
    /// at test endpoints.
    pub fn with_client(client: ProbeClient) -> Self {
        Self {
            client,
            lifecycle: RunLifecycleState::Setup,
        }
    }

    pub fn lifecycle(&self) -> RunLifecycleState {
        self.lifecycle
    }

    /// Runs a single phase and returns its done label, e.g. `"34.2 Mbps"`.
    async fn run_phase(
        &self,
        metrics: &mut RawMetrics,
        config: &RunConfiguration,
        phase: PhaseId,
        sink: &dyn StatusSink,
        cancel: &CancellationToken,
    ) -> Result<String> {
        match phase {
            PhaseId::Latency => {
                let reading = probes::latency::measure(&self.client, cancel, sink).await?;
                metrics.latency_ms = reading.mean_ms;
                metrics.latency_min_ms = reading.min_ms;
                metrics.latency_max_ms = reading.max_ms;
                metrics.latency_samples = reading.samples;
                Ok(format!("{} ms", metrics.latency_ms))
            }
            PhaseId::Jitter => {
                // Derived from the latency samples, no network involved
                let jitter = if metrics.latency_samples.is_empty() {
                    0.0
                } else {
                    stats::round1(stats::population_std_dev(&metrics.latency_samples))
                };
                metrics.jitter_ms = jitter;
                Ok(format!("{} ms", jitter))
            }
            PhaseId::PacketLoss => {
                let reading = probes::loss::measure(&self.client, cancel, sink).await?;
                metrics.packet_loss_pct = reading.loss_pct;
                metrics.failed_probes = reading.failed_probes;
                metrics.total_probes = reading.total_probes;
                Ok(format!("{}%", reading.loss_pct))
            }
            PhaseId::Download => {
                let speed = probes::throughput::download(
                    &self.client,
                    cancel,
                    probe::DOWNLOAD_BYTES,
                    |live, _| {
                        sink.phase_status(
                            PhaseId::Download,
                            PhaseStatus::Active,
                            Some(&format!("{:.1} Mbps", live)),
                        );
                    },
                )
                .await?;
                metrics.download_mbps = stats::round1(speed);
                Ok(format!("{} Mbps", metrics.download_mbps))
            }
            PhaseId::Upload => {
                let speed =
                    probes::throughput::upload(&self.client, cancel, probe::UPLOAD_BYTES, |live| {
                        sink.phase_status(
                            PhaseId::Upload,
                            PhaseStatus::Active,
                            Some(&format!("{:.1} Mbps", live)),
                        );
                    })
                    .await?;
                let rounded = stats::round1(speed);
                metrics.upload_mbps = Some(rounded);
                Ok(format!("{} Mbps", rounded))
            }
            PhaseId::Dns => {
                let reading = probes::dns::measure(&self.client, cancel).await?;
                metrics.dns_ms = reading.dns_ms;
                metrics.dns_cached = reading.cached;
                metrics.dns_unavailable = reading.unavailable;
                Ok(metrics.dns_display())
            }
            PhaseId::Consistency => {
                let reading = probes::throughput::consistency(&self.client, cancel, sink).await?;
                metrics.consistency_pct = reading.consistency_pct;
                metrics.consistency_runs = reading.runs;
                Ok(format!("{}%", metrics.consistency_pct))
            }
            PhaseId::PerUser => {
                let users = config.effective_user_count();
                metrics.mbps_per_user = stats::round2(metrics.download_mbps / f64::from(users));
                metrics.effective_user_count = users;
                Ok(format!("{} Mbps/util.", metrics.mbps_per_user))
            }
        }
    }
}

/// Items a phase works through, for throughput in the timing summary.
fn phase_items(phase: PhaseId) -> usize {
    match phase {
        PhaseId::Latency | PhaseId::Jitter => probe::LATENCY_SAMPLES,
        PhaseId::PacketLoss => probe::LOSS_PROBES,
        PhaseId::Upload => probe::UPLOAD_CHUNKS,
        PhaseId::Consistency => probe::CONSISTENCY_RUNS,
        PhaseId::Download | PhaseId::Dns | PhaseId::PerUser => 1,
    }
}

/// Resolves once the token is cancelled and the grace period has elapsed.
async fn grace_after_cancel(cancel: &CancellationToken) {
    cancel.cancelled().await;
    tokio::time::sleep(timing::CANCEL_GRACE).await;
}

#[async_trait]
impl AssessNetwork for Runner {
    async fn assess(
        &mut self,
        config: &RunConfiguration,
        sink: &dyn StatusSink,
        cancel: &CancellationToken,
        mut profiler: Option<&mut RunProfiler>,
    ) -> Result<Option<RunResult>> {
        if self.lifecycle == RunLifecycleState::Testing {
            return Ok(None);
        }
        config.validate()?;
        self.lifecycle = RunLifecycleState::Testing;

        log::debug!(
            "Starting assessment for \"{}\" with {} user(s)",
            config.office_label,
            config.effective_user_count()
        );

        let started_at = Local::now();
        let started = Instant::now();
        let mut metrics = RawMetrics::default();

        // Provider lookup runs alongside the phases and is awaited at the end
        let isp_client = self.client.clone();
        let isp_task = tokio::spawn(async move { probes::isp::lookup(&isp_client).await });

        for descriptor in &phases::ALL {
            sink.phase_status(descriptor.id, PhaseStatus::Waiting, None);
        }
        sink.overall_progress(0.0);

        let mut cancelled = false;
        for (index, descriptor) in phases::ALL.iter().enumerate() {
            if cancel.is_cancelled() {
                cancelled = true;
                break;
            }

            sink.overall_progress(index as f64 / phases::ALL.len() as f64 * 100.0);
            sink.phase_status(descriptor.id, PhaseStatus::Active, None);

            let timer = profiler
                .as_deref_mut()
                .map(|p| p.start_phase(descriptor.id.as_str()));

            let outcome = tokio::select! {
                outcome = self.run_phase(&mut metrics, config, descriptor.id, sink, cancel) => outcome,
                _ = grace_after_cancel(cancel) => Err(NetgradeError::Cancelled),
            };

            if let (Some(p), Some(timer)) = (profiler.as_deref_mut(), timer) {
                p.finish_phase(timer, phase_items(descriptor.id));
            }

            match outcome {
                Ok(label) => {
                    sink.phase_status(descriptor.id, PhaseStatus::Done, Some(&label));
                }
                Err(e) if e.is_cancelled() => {
                    cancelled = true;
                    break;
                }
                Err(e) => {
                    log::warn!("Phase {} failed: {}", descriptor.id.as_str(), e);
                    metrics.apply_fallback(descriptor.id);
                    sink.phase_status(descriptor.id, PhaseStatus::Error, Some("erreur"));
                }
            }
        }

        if cancelled {
            isp_task.abort();
            self.lifecycle = RunLifecycleState::Setup;
            return Ok(None);
        }

        sink.overall_progress(100.0);

        // A failed per-user phase still has a derivable value when the
        // download phase succeeded
        if metrics.mbps_per_user == 0.0 && metrics.download_mbps > 0.0 {
            let users = config.effective_user_count();
            metrics.mbps_per_user = stats::round2(metrics.download_mbps / f64::from(users));
            metrics.effective_user_count = users;
        }

        tokio::time::sleep(timing::RESULT_PAUSE).await;

        if let Ok(info) = isp_task.await {
            metrics.isp_name = info.isp_name;
            metrics.upstream_name = info.upstream_name;
            metrics.public_ip = info.public_ip;
        }

        let grades = scoring::grade_metrics(&metrics);
        let score = scoring::overall_score(&grades);
        let recommendations =
            advice::build_recommendations(&metrics, &grades, score, config.multi_zone_enabled);

        let result = RunResult {
            raw: metrics,
            grades,
            score,
            recommendations,
            started_at,
            duration_ms: started.elapsed().as_millis() as u64,
        };

        log::debug!(
            "Assessment complete: score {} in {} ms",
            result.score,
            result.duration_ms
        );

        self.lifecycle = RunLifecycleState::Results;
        Ok(Some(result))
    }
}
