//! Network probes
//!
//! One submodule per measurement concern. All probes share a [`ProbeClient`]
//! built once per run, and endpoints are injectable so tests can point the
//! probes at a local server.

pub mod dns;
pub mod isp;
pub mod latency;
pub mod loss;
pub mod throughput;

pub use dns::DnsReading;
pub use isp::IspInfo;
pub use latency::LatencyReading;
pub use loss::LossReading;
pub use throughput::ConsistencyReading;

use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::constants::{endpoints, probe};
use crate::core::error::Result;

/// The remote URLs and hosts probed during an assessment.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub trace_url: String,
    pub download_url: String,
    pub upload_url: String,
    pub ip_info_url: String,
    pub asn_base_url: String,
    pub dns_primary_host: String,
    pub dns_fallback_host: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            trace_url: endpoints::TRACE.to_string(),
            download_url: endpoints::BULK_DOWNLOAD.to_string(),
            upload_url: endpoints::BULK_UPLOAD.to_string(),
            ip_info_url: endpoints::IP_INFO.to_string(),
            asn_base_url: endpoints::ASN_UPSTREAMS_BASE.to_string(),
            dns_primary_host: endpoints::DNS_PRIMARY_HOST.to_string(),
            dns_fallback_host: endpoints::DNS_FALLBACK_HOST.to_string(),
        }
    }
}

/// HTTP client shared by all probes of a run.
///
/// Carries a connect timeout but no overall request deadline; phases that
/// need one (packet loss, download) enforce their own.
#[derive(Debug, Clone)]
pub struct ProbeClient {
    http: reqwest::Client,
    endpoints: Endpoints,
}

impl ProbeClient {
    pub fn new() -> Result<Self> {
        Self::with_endpoints(Endpoints::default())
    }

    pub fn with_endpoints(endpoints: Endpoints) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(probe::CONNECT_TIMEOUT)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, endpoints })
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }
}

/// Milliseconds since the Unix epoch, used as a cache-busting query value.
pub(crate) fn epoch_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}
