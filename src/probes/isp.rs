//! ISP lookup: public IP, provider name and upstream carrier.
//!
//! Runs concurrently with the measurement phases and never fails a run.
//! Lookup errors simply leave the provider fields empty.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::constants::probe;
use crate::probes::ProbeClient;

/// Matches the `AS<number>` prefix of an ipinfo.io `org` field,
/// e.g. `"AS12322 Free SAS"`.
static ASN_ORG_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^AS(\d+)\s*").expect("static regex"));

/// Provider details shown in the report header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IspInfo {
    pub isp_name: Option<String>,
    /// Upstream carrier, omitted when it repeats the provider name
    pub upstream_name: Option<String>,
    pub public_ip: Option<String>,
}

/// Resolves the public IP and provider via ipinfo.io, then the upstream
/// carrier via bgpview.io.
///
/// The upstream lookup has its own deadline and its failure keeps whatever
/// the first lookup found.
pub async fn lookup(client: &ProbeClient) -> IspInfo {
    let request = client.http().get(&client.endpoints().ip_info_url).send();
    let response = match tokio::time::timeout(probe::ISP_LOOKUP_TIMEOUT, request).await {
        Ok(Ok(response)) => response,
        _ => return IspInfo::default(),
    };
    let body: serde_json::Value = match response.json().await {
        Ok(body) => body,
        Err(_) => return IspInfo::default(),
    };

    let mut info = IspInfo {
        public_ip: body
            .get("ip")
            .and_then(|v| v.as_str())
            .map(str::to_string),
        ..Default::default()
    };

    let org = body.get("org").and_then(|v| v.as_str()).unwrap_or("");
    let asn = ASN_ORG_PREFIX
        .captures(org)
        .map(|captures| captures[1].to_string());
    let name = ASN_ORG_PREFIX.replace(org, "").trim().to_string();
    if !name.is_empty() {
        info.isp_name = Some(name);
    }

    if let Some(asn) = asn {
        info.upstream_name = lookup_upstream(client, &asn, info.isp_name.as_deref()).await;
    }

    info
}

/// Fetches the first IPv4 upstream of the ASN and returns its description
/// (or name), unless it just repeats the provider name.
async fn lookup_upstream(
    client: &ProbeClient,
    asn: &str,
    isp_name: Option<&str>,
) -> Option<String> {
    let url = format!("{}/asn/{}/upstreams", client.endpoints().asn_base_url, asn);
    let request = client.http().get(&url).send();
    let response = match tokio::time::timeout(probe::UPSTREAM_LOOKUP_TIMEOUT, request).await {
        Ok(Ok(response)) => response,
        _ => return None,
    };
    let body: serde_json::Value = response.json().await.ok()?;

    let upstream = body
        .get("data")
        .and_then(|data| data.get("ipv4_upstreams"))
        .and_then(|upstreams| upstreams.get(0))?;
    let name = upstream
        .get("description")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .or_else(|| {
            upstream
                .get("name")
                .and_then(|v| v.as_str())
                .filter(|s| !s.is_empty())
        })?;

    match isp_name {
        Some(isp) if isp.to_lowercase() == name.to_lowercase() => None,
        _ => Some(name.to_string()),
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use crate::probes::Endpoints;

    fn client_for(server: &mockito::ServerGuard) -> ProbeClient {
        ProbeClient::with_endpoints(Endpoints {
            ip_info_url: format!("{}/json", server.url()),
            asn_base_url: server.url(),
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_lookup__resolves_provider_and_upstream() {
        let mut server = mockito::Server::new_async().await;
        let _ip_info = server
            .mock("GET", "/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"ip": "203.0.113.9", "org": "AS12322 Free SAS"}"#)
            .create_async()
            .await;
        let _upstreams = server
            .mock("GET", "/asn/12322/upstreams")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": {"ipv4_upstreams": [{"description": "Proximus", "name": "PROXIMUS"}]}}"#)
            .create_async()
            .await;

        let info = lookup(&client_for(&server)).await;
        assert_eq!(info.isp_name.as_deref(), Some("Free SAS"));
        assert_eq!(info.upstream_name.as_deref(), Some("Proximus"));
        assert_eq!(info.public_ip.as_deref(), Some("203.0.113.9"));
    }

    #[tokio::test]
    async fn test_lookup__suppresses_upstream_matching_provider() {
        let mut server = mockito::Server::new_async().await;
        let _ip_info = server
            .mock("GET", "/json")
            .with_status(200)
            .with_body(r#"{"ip": "203.0.113.9", "org": "AS12322 Free SAS"}"#)
            .create_async()
            .await;
        let _upstreams = server
            .mock("GET", "/asn/12322/upstreams")
            .with_status(200)
            .with_body(r#"{"data": {"ipv4_upstreams": [{"description": "FREE SAS"}]}}"#)
            .create_async()
            .await;

        let info = lookup(&client_for(&server)).await;
        assert_eq!(info.isp_name.as_deref(), Some("Free SAS"));
        assert_eq!(info.upstream_name, None);
    }

    #[tokio::test]
    async fn test_lookup__upstream_failure_keeps_provider() {
        let mut server = mockito::Server::new_async().await;
        let _ip_info = server
            .mock("GET", "/json")
            .with_status(200)
            .with_body(r#"{"ip": "203.0.113.9", "org": "AS12322 Free SAS"}"#)
            .create_async()
            .await;
        let _upstreams = server
            .mock("GET", "/asn/12322/upstreams")
            .with_status(500)
            .with_body("oops")
            .create_async()
            .await;

        let info = lookup(&client_for(&server)).await;
        assert_eq!(info.isp_name.as_deref(), Some("Free SAS"));
        assert_eq!(info.upstream_name, None);
        assert_eq!(info.public_ip.as_deref(), Some("203.0.113.9"));
    }

    #[tokio::test]
    async fn test_lookup__org_without_asn_prefix() {
        let mut server = mockito::Server::new_async().await;
        let _ip_info = server
            .mock("GET", "/json")
            .with_status(200)
            .with_body(r#"{"ip": "203.0.113.9", "org": "Free SAS"}"#)
            .create_async()
            .await;

        let info = lookup(&client_for(&server)).await;
        assert_eq!(info.isp_name.as_deref(), Some("Free SAS"));
        assert_eq!(info.upstream_name, None);
    }

    #[tokio::test]
    async fn test_lookup__unreachable_endpoint_yields_empty_info() {
        let client = ProbeClient::with_endpoints(Endpoints {
            ip_info_url: "http://127.0.0.1:1/json".to_string(),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(lookup(&client).await, IspInfo::default());
    }
}
