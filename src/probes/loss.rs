//! Packet-loss phase: counts probes that fail or exceed their deadline.

use tokio_util::sync::CancellationToken;

use crate::core::constants::probe;
use crate::core::error::{NetgradeError, Result};
use crate::core::types::{PhaseId, PhaseStatus, StatusSink};
use crate::probes::{ProbeClient, epoch_millis};
use crate::scoring::stats;

/// Outcome of the packet-loss phase.
#[derive(Debug, Clone, Copy)]
pub struct LossReading {
    /// Share of failed probes in percent, rounded to one decimal
    pub loss_pct: f64,
    pub failed_probes: u32,
    pub total_probes: u32,
}

/// Sends sequential probes and counts the ones that error out or miss the
/// per-probe deadline. The running loss percentage is pushed to the sink
/// after every probe.
pub async fn measure(
    client: &ProbeClient,
    cancel: &CancellationToken,
    sink: &dyn StatusSink,
) -> Result<LossReading> {
    let mut failed: u32 = 0;

    for i in 0..probe::LOSS_PROBES {
        let url = format!(
            "{}?probe={}_{}",
            client.endpoints().trace_url,
            i,
            epoch_millis()
        );
        let attempt = tokio::time::timeout(probe::LOSS_PROBE_TIMEOUT, client.http().get(&url).send());

        let outcome = tokio::select! {
            _ = cancel.cancelled() => return Err(NetgradeError::Cancelled),
            outcome = attempt => outcome,
        };

        match outcome {
            Ok(Ok(_)) => {}
            // Deadline misses and request errors both count as loss
            _ => failed += 1,
        }

        let sent = (i + 1) as f64;
        let live = stats::round1(f64::from(failed) * 100.0 / sent);
        sink.phase_status(
            PhaseId::PacketLoss,
            PhaseStatus::Active,
            Some(&format!("{}% perte", live)),
        );
    }

    let loss_pct = stats::round1(f64::from(failed) * 100.0 / probe::LOSS_PROBES as f64);
    Ok(LossReading {
        loss_pct,
        failed_probes: failed,
        total_probes: probe::LOSS_PROBES as u32,
    })
}
