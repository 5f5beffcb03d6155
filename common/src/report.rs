//! # Report Models
//!
//! Plain data produced by the tester and rendered by the CLI. Nothing in
//! here performs I/O.

use std::net::{IpAddr, Ipv4Addr};

use crate::error::ProbeError;
use crate::websocket::WsSessionReport;

/// Outcome of a single HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndpointStatus {
    /// The server answered with a status below 400.
    Success(u16),
    /// The server answered with a status of 400 or above.
    Failure(u16),
    /// Nothing is listening on the target.
    ConnectionRefused,
    Timeout,
    Error(String),
}

impl EndpointStatus {
    pub fn from_status(code: u16) -> Self {
        if code < 400 {
            EndpointStatus::Success(code)
        } else {
            EndpointStatus::Failure(code)
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, EndpointStatus::Success(_))
    }
}

impl From<ProbeError> for EndpointStatus {
    fn from(err: ProbeError) -> Self {
        match err {
            ProbeError::ConnectionRefused => EndpointStatus::ConnectionRefused,
            ProbeError::Timeout(_) => EndpointStatus::Timeout,
            ProbeError::Status(code) => EndpointStatus::from_status(code),
            other => EndpointStatus::Error(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointResult {
    pub path: String,
    pub url: String,
    pub status: EndpointStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortProbe {
    pub host: String,
    pub port: u16,
    pub open: bool,
}

/// What happened when the API was tried through the public IP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExternalAccess {
    /// No public IP is known, so nothing was attempted.
    Skipped,
    Unreachable(PortProbe),
    Reachable {
        port: PortProbe,
        health: EndpointStatus,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiReport {
    pub endpoints: Vec<EndpointResult>,
    pub local_port: Result<PortProbe, ProbeError>,
    pub external: ExternalAccess,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthReport {
    pub url: String,
    pub status: EndpointStatus,
    /// The `status` field of the JSON body, `"unknown"` when the field is
    /// missing and `None` when the body could not be read as JSON.
    pub service_status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WsReport {
    pub health: HealthReport,
    pub port: Result<PortProbe, ProbeError>,
    /// Present only when the WebSocket port was open.
    pub session: Option<WsSessionReport>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FirewallStatus {
    Active,
    Inactive,
    NotDetected,
}

impl FirewallStatus {
    /// Best-effort summary of a firewall tool's output.
    ///
    /// Understands `ufw status`, `Get-NetFirewallProfile` tables and
    /// `socketfilterfw --getglobalstate`.
    pub fn from_output(output: &str) -> Self {
        let lower = output.to_ascii_lowercase();
        let mut saw_enabled = false;
        let mut saw_disabled = false;

        for line in lower.lines().map(str::trim) {
            if line == "status: active"
                || line.contains("state = 1")
                || line.contains("firewall is enabled")
                || line.ends_with(" true")
            {
                saw_enabled = true;
            } else if line == "status: inactive"
                || line.contains("state = 0")
                || line.contains("firewall is disabled")
                || line.ends_with(" false")
            {
                saw_disabled = true;
            }
        }

        match (saw_enabled, saw_disabled) {
            (true, _) => FirewallStatus::Active,
            (false, true) => FirewallStatus::Inactive,
            (false, false) => FirewallStatus::NotDetected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirewallReport {
    /// Tool output, verbatim.
    pub raw: String,
    pub status: FirewallStatus,
}

impl FirewallReport {
    pub fn from_output(raw: String) -> Self {
        let status = FirewallStatus::from_output(&raw);
        Self { raw, status }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemReport {
    pub firewall: Result<FirewallReport, ProbeError>,
    /// Address and gateway lines picked out of the interface listing.
    pub interfaces: Result<Vec<String>, ProbeError>,
    pub lan_address: Option<Ipv4Addr>,
}

/// Values the setup guide fills in when they are known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuideContext {
    pub api_port: u16,
    pub ws_port: u16,
    pub ws_http_port: u16,
    pub lan_address: Option<Ipv4Addr>,
    pub external_ip: Option<IpAddr>,
}
