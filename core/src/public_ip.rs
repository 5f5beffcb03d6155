//! Public IP lookup through an HTTP echo service.

use std::net::IpAddr;
use std::time::Duration;

use reachr_common::error::ProbeError;
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::network::http;

/// Asks `echo_url` for the caller's public address.
///
/// The service must answer 2xx with the bare address as its body.
pub async fn resolve_public_ip(
    client: &Client,
    echo_url: &str,
    lookup_timeout: Duration,
) -> Result<IpAddr, ProbeError> {
    debug!("Resolving public IP via {echo_url}");

    let response = http::get(client, echo_url, lookup_timeout).await?;
    let code = response.status();
    if !code.is_success() {
        warn!("IP echo service answered {code}");
        return Err(ProbeError::Status(code.as_u16()));
    }

    let body = response
        .text()
        .await
        .map_err(|e| http::classify_error(&e, lookup_timeout))?;

    let ip = parse_echo_body(&body)?;
    info!("Public IP is {ip}");
    Ok(ip)
}

fn parse_echo_body(body: &str) -> Result<IpAddr, ProbeError> {
    let trimmed = body.trim();
    trimmed
        .parse::<IpAddr>()
        .map_err(|_| ProbeError::InvalidIp(trimmed.chars().take(64).collect()))
}
