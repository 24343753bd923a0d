//! Latency phase: sequential round-trips against the Cloudflare trace endpoint.

use std::time::Instant;

use tokio_util::sync::CancellationToken;

use crate::core::constants::probe;
use crate::core::error::{NetgradeError, Result};
use crate::core::types::{PhaseId, PhaseStatus, StatusSink};
use crate::probes::{ProbeClient, epoch_millis};
use crate::scoring::stats;

/// Round-trip statistics from the latency phase.
#[derive(Debug, Clone)]
pub struct LatencyReading {
    /// Mean round-trip time in milliseconds, rounded to one decimal
    pub mean_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
    /// Unrounded samples, one per probe
    pub samples: Vec<f64>,
}

/// Measures round-trip time with sequential GET requests.
///
/// A failed request is charged the failure penalty instead of aborting the
/// phase. The running average is pushed to the sink after every sample.
pub async fn measure(
    client: &ProbeClient,
    cancel: &CancellationToken,
    sink: &dyn StatusSink,
) -> Result<LatencyReading> {
    let mut samples = Vec::with_capacity(probe::LATENCY_SAMPLES);

    for i in 0..probe::LATENCY_SAMPLES {
        let url = format!(
            "{}?_={}",
            client.endpoints().trace_url,
            epoch_millis() + i as u128
        );
        let started = Instant::now();
        let request = client.http().get(&url).send();

        let outcome = tokio::select! {
            _ = cancel.cancelled() => return Err(NetgradeError::Cancelled),
            outcome = request => outcome,
        };

        let sample = match outcome {
            Ok(_) => started.elapsed().as_secs_f64() * 1000.0,
            Err(_) => probe::LATENCY_FAILURE_PENALTY_MS,
        };
        samples.push(sample);

        let running_avg = stats::mean(&samples);
        sink.phase_status(
            PhaseId::Latency,
            PhaseStatus::Active,
            Some(&format!("{} ms moy.", running_avg.round())),
        );
    }

    let mean_ms = stats::round1(stats::mean(&samples));
    let min_ms = stats::round1(samples.iter().copied().fold(f64::INFINITY, f64::min));
    let max_ms = stats::round1(samples.iter().copied().fold(0.0, f64::max));

    Ok(LatencyReading {
        mean_ms,
        min_ms,
        max_ms,
        samples,
    })
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use crate::core::types::NullSink;
    use crate::probes::Endpoints;

    fn client_with_trace(trace_url: String) -> ProbeClient {
        ProbeClient::with_endpoints(Endpoints {
            trace_url,
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_measure__collects_all_samples() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/trace")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body("fl=123\nip=203.0.113.9\n")
            .create_async()
            .await;

        let client = client_with_trace(format!("{}/trace", server.url()));
        let cancel = CancellationToken::new();
        let reading = measure(&client, &cancel, &NullSink).await.unwrap();

        assert_eq!(reading.samples.len(), probe::LATENCY_SAMPLES);
        assert!(reading.mean_ms > 0.0);
        assert!(reading.min_ms <= reading.mean_ms);
        assert!(reading.max_ms >= reading.mean_ms);
    }

    #[tokio::test]
    async fn test_measure__failed_requests_take_penalty() {
        // Nothing listens on port 1, so every sample fails fast
        let client = client_with_trace("http://127.0.0.1:1/trace".to_string());
        let cancel = CancellationToken::new();
        let reading = measure(&client, &cancel, &NullSink).await.unwrap();

        assert_eq!(reading.mean_ms, probe::LATENCY_FAILURE_PENALTY_MS);
        assert_eq!(reading.min_ms, probe::LATENCY_FAILURE_PENALTY_MS);
        assert_eq!(reading.max_ms, probe::LATENCY_FAILURE_PENALTY_MS);
    }

    #[tokio::test]
    async fn test_measure__cancellation_wins() {
        let client = client_with_trace("http://127.0.0.1:1/trace".to_string());
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = measure(&client, &cancel, &NullSink).await;
        assert!(matches!(result, Err(ref e) if e.is_cancelled()));
    }
}
