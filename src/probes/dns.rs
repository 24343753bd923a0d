//! DNS phase: resolution timing through the system resolver.

use std::time::Instant;

use tokio_util::sync::CancellationToken;

use crate::core::constants::{endpoints, probe};
use crate::core::error::{NetgradeError, Result};
use crate::probes::ProbeClient;
use crate::scoring::stats;

/// Outcome of the DNS phase.
#[derive(Debug, Clone, Copy)]
pub struct DnsReading {
    /// Resolution time in milliseconds, rounded to one decimal
    pub dns_ms: f64,
    /// Resolution completed under the cached threshold
    pub cached: bool,
    /// Neither host could be resolved
    pub unavailable: bool,
}

/// Times resolution of the primary host, falling back to the second one on
/// failure. Both failing yields an unavailable reading, not an error.
pub async fn measure(client: &ProbeClient, cancel: &CancellationToken) -> Result<DnsReading> {
    measure_hosts(
        &client.endpoints().dns_primary_host,
        &client.endpoints().dns_fallback_host,
        cancel,
    )
    .await
}

pub(crate) async fn measure_hosts(
    primary: &str,
    fallback: &str,
    cancel: &CancellationToken,
) -> Result<DnsReading> {
    for host in [primary, fallback] {
        let started = Instant::now();
        let lookup = tokio::net::lookup_host((host, endpoints::DNS_PORT));

        let outcome = tokio::select! {
            _ = cancel.cancelled() => return Err(NetgradeError::Cancelled),
            outcome = lookup => outcome,
        };

        if outcome.is_ok() {
            let dns_ms = stats::round1(started.elapsed().as_secs_f64() * 1000.0);
            return Ok(DnsReading {
                dns_ms,
                cached: dns_ms < probe::DNS_CACHED_THRESHOLD_MS,
                unavailable: false,
            });
        }
    }

    Ok(DnsReading {
        dns_ms: 0.0,
        cached: true,
        unavailable: true,
    })
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[tokio::test]
    async fn test_measure_hosts__resolves_local_host() {
        let cancel = CancellationToken::new();
        let reading = measure_hosts("localhost", "localhost", &cancel)
            .await
            .unwrap();

        assert!(!reading.unavailable);
        assert!(reading.dns_ms >= 0.0);
    }

    #[tokio::test]
    async fn test_measure_hosts__falls_back_to_second_host() {
        let cancel = CancellationToken::new();
        let reading = measure_hosts("host.invalid", "localhost", &cancel)
            .await
            .unwrap();

        assert!(!reading.unavailable);
    }

    #[tokio::test]
    async fn test_measure_hosts__both_failing_reads_unavailable() {
        let cancel = CancellationToken::new();
        let reading = measure_hosts("host.invalid", "other.invalid", &cancel)
            .await
            .unwrap();

        assert!(reading.unavailable);
        assert!(reading.cached);
        assert_eq!(reading.dns_ms, 0.0);
    }

    #[tokio::test]
    async fn test_measure_hosts__cancellation_wins() {
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = measure_hosts("localhost", "localhost", &cancel).await;
        assert!(matches!(result, Err(ref e) if e.is_cancelled()));
    }
}
