//! Bulk transfer phases: download, upload and consistency.

use std::time::Instant;

use futures::StreamExt;
use rand::RngCore;
use tokio_util::sync::CancellationToken;

use crate::core::constants::probe;
use crate::core::error::{NetgradeError, Result};
use crate::core::types::{PhaseId, PhaseStatus, StatusSink};
use crate::probes::{ProbeClient, epoch_millis};
use crate::scoring::stats;

/// Outcome of the consistency phase.
#[derive(Debug, Clone)]
pub struct ConsistencyReading {
    /// Stability percentage derived from the coefficient of variation
    pub consistency_pct: f64,
    /// Speed of each run in Mbps, rounded to one decimal
    pub runs: Vec<f64>,
}

fn mbps(bytes: u64, elapsed_secs: f64) -> f64 {
    if elapsed_secs > 0.0 {
        (bytes as f64 * 8.0) / (elapsed_secs * 1_000_000.0)
    } else {
        0.0
    }
}

/// Downloads `size_bytes` from the bulk endpoint and returns the unrounded
/// speed in Mbps.
///
/// The clock starts before the request is sent, so connection setup counts
/// toward the measured speed. `on_progress` receives the running speed and
/// byte count after every chunk. The whole transfer is bounded by the
/// download deadline.
pub async fn download(
    client: &ProbeClient,
    cancel: &CancellationToken,
    size_bytes: u64,
    mut on_progress: impl FnMut(f64, u64),
) -> Result<f64> {
    let transfer = async {
        let url = format!(
            "{}?bytes={}&_={}",
            client.endpoints().download_url,
            size_bytes,
            epoch_millis()
        );
        let started = Instant::now();
        let response = tokio::select! {
            _ = cancel.cancelled() => return Err(NetgradeError::Cancelled),
            response = client.http().get(&url).send() => response?,
        };
        let mut stream = response.bytes_stream();
        let mut received: u64 = 0;

        loop {
            let chunk = tokio::select! {
                _ = cancel.cancelled() => return Err(NetgradeError::Cancelled),
                chunk = stream.next() => chunk,
            };
            match chunk {
                Some(chunk) => {
                    received += chunk?.len() as u64;
                    let elapsed = started.elapsed().as_secs_f64();
                    if elapsed > 0.0 {
                        on_progress(mbps(received, elapsed), received);
                    }
                }
                None => break,
            }
        }

        Ok(mbps(received, started.elapsed().as_secs_f64()))
    };

    match tokio::time::timeout(probe::DOWNLOAD_TIMEOUT, transfer).await {
        Ok(result) => result,
        Err(_) => Err(NetgradeError::Timeout("download".to_string())),
    }
}

/// Uploads `size_bytes` to the bulk endpoint in equal chunks and returns the
/// unrounded speed in Mbps.
///
/// The chunk payload is built once and resent for every chunk, with a
/// random prefix at its head. `on_progress` receives the cumulative speed
/// after every chunk.
pub async fn upload(
    client: &ProbeClient,
    cancel: &CancellationToken,
    size_bytes: usize,
    mut on_progress: impl FnMut(f64),
) -> Result<f64> {
    let chunk_size = size_bytes.div_ceil(probe::UPLOAD_CHUNKS);
    let mut payload = vec![0u8; chunk_size];
    let prefix = probe::UPLOAD_RANDOM_PREFIX.min(chunk_size);
    rand::thread_rng().fill_bytes(&mut payload[..prefix]);

    let started = Instant::now();
    let mut sent: usize = 0;

    for _ in 0..probe::UPLOAD_CHUNKS {
        let url = format!("{}?_={}", client.endpoints().upload_url, epoch_millis());
        let request = client.http().post(&url).body(payload.clone()).send();

        let outcome = tokio::select! {
            _ = cancel.cancelled() => return Err(NetgradeError::Cancelled),
            outcome = request => outcome,
        };
        outcome?;

        sent += payload.len();
        let elapsed = started.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            on_progress(mbps(sent as u64, elapsed));
        }
    }

    Ok(mbps(sent as u64, started.elapsed().as_secs_f64()))
}

/// Runs several small downloads and derives a stability percentage from the
/// coefficient of variation across their speeds.
pub async fn consistency(
    client: &ProbeClient,
    cancel: &CancellationToken,
    sink: &dyn StatusSink,
) -> Result<ConsistencyReading> {
    let mut speeds = Vec::with_capacity(probe::CONSISTENCY_RUNS);

    for run in 1..=probe::CONSISTENCY_RUNS {
        let speed = download(client, cancel, probe::CONSISTENCY_BYTES, |live, _| {
            sink.phase_status(
                PhaseId::Consistency,
                PhaseStatus::Active,
                Some(&format!(
                    "Essai {}/{} · {:.1} Mbps",
                    run,
                    probe::CONSISTENCY_RUNS,
                    live
                )),
            );
        })
        .await?;
        speeds.push(speed);
    }

    let cv = stats::coefficient_of_variation(&speeds);
    let consistency_pct = ((1.0 - cv) * 100.0).round().max(0.0);
    let runs = speeds.iter().map(|v| stats::round1(*v)).collect();

    Ok(ConsistencyReading {
        consistency_pct,
        runs,
    })
}
