//! # Reachability Tester
//!
//! Runs the individual checks against the targets named in [`Config`].
//! Every check is best effort: failures end up inside the returned report,
//! nothing is propagated to the caller.

use std::net::{IpAddr, SocketAddr};
use std::sync::OnceLock;
use std::time::Duration;

use reachr_common::config::Config;
use reachr_common::error::ProbeError;
use reachr_common::network::interface;
use reachr_common::report::{
    ApiReport, EndpointStatus, ExternalAccess, GuideContext, PortProbe, SystemReport, WsReport,
};
use reachr_common::system::SystemInspector;
use reqwest::{Client, Url};
use tracing::{debug, warn};

use crate::network::{http, tcp};
use crate::{public_ip, system, websocket};

pub struct ReachabilityTester {
    cfg: Config,
    client: Client,
    inspector: Box<dyn SystemInspector>,
    external_ip: OnceLock<IpAddr>,
}

impl ReachabilityTester {
    /// Creates a tester that inspects the host with the current platform's tools.
    pub fn new(cfg: Config) -> anyhow::Result<Self> {
        let inspector = system::platform_inspector(cfg.command_timeout);
        Self::with_inspector(cfg, inspector)
    }

    pub fn with_inspector(
        cfg: Config,
        inspector: Box<dyn SystemInspector>,
    ) -> anyhow::Result<Self> {
        let client = http::build_client()?;
        Ok(Self {
            cfg,
            client,
            inspector,
            external_ip: OnceLock::new(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Public IP found by [`Self::resolve_public_ip`], if any.
    pub fn external_ip(&self) -> Option<IpAddr> {
        self.external_ip.get().copied()
    }

    /// Looks up the public IP and remembers it for the rest of the run.
    ///
    /// Once an address is known it is returned without asking again.
    pub async fn resolve_public_ip(&self) -> Result<IpAddr, ProbeError> {
        if let Some(ip) = self.external_ip() {
            return Ok(ip);
        }
        let ip =
            public_ip::resolve_public_ip(&self.client, &self.cfg.ip_echo_url, self.cfg.probe_timeout)
                .await?;
        Ok(*self.external_ip.get_or_init(|| ip))
    }

    pub async fn check_port_open(&self, host: &str, port: u16) -> bool {
        tcp::check_port_open(host, port, self.cfg.probe_timeout).await
    }

    /// Requests every API endpoint locally, probes the API port and, when the
    /// public IP is known, tries the API through it.
    pub async fn test_api(&self) -> ApiReport {
        let endpoints = http::probe_endpoints(
            &self.client,
            &self.cfg.api_base_url,
            &self.cfg.api_endpoints,
            self.cfg.probe_timeout,
        )
        .await;

        let target = socket_target(&self.cfg.api_base_url);
        let local_port = match &target {
            Ok((host, port)) => Ok(self.probe_port(host, *port, self.cfg.probe_timeout).await),
            Err(e) => {
                warn!("{e}");
                Err(e.clone())
            }
        };

        let external = match (self.external_ip(), target) {
            (Some(ip), Ok((_, port))) => self.test_external_access(ip, port).await,
            _ => ExternalAccess::Skipped,
        };

        ApiReport {
            endpoints,
            local_port,
            external,
        }
    }

    async fn test_external_access(&self, ip: IpAddr, port: u16) -> ExternalAccess {
        let probe = self
            .probe_port(&ip.to_string(), port, self.cfg.external_port_timeout)
            .await;
        if !probe.open {
            return ExternalAccess::Unreachable(probe);
        }

        let url = format!("http://{}{}", SocketAddr::new(ip, port), self.cfg.api_health_path);
        let health: EndpointStatus =
            http::probe_endpoint(&self.client, &url, self.cfg.external_http_timeout).await;
        ExternalAccess::Reachable { port: probe, health }
    }

    /// Checks the companion health endpoint, probes the WebSocket port and,
    /// if it is open, runs one watchdog-bounded session.
    pub async fn test_websocket(&self) -> WsReport {
        let health =
            http::fetch_health(&self.client, &self.cfg.ws_health_url(), self.cfg.probe_timeout).await;

        let port = match socket_target(&self.cfg.ws_url) {
            Ok((host, port)) => Ok(self.probe_port(&host, port, self.cfg.probe_timeout).await),
            Err(e) => {
                warn!("{e}");
                Err(e)
            }
        };

        let session = match &port {
            Ok(probe) if probe.open => Some(
                websocket::run_session(
                    &self.cfg.ws_url,
                    &self.cfg.join_message,
                    self.cfg.ws_watchdog,
                    self.cfg.message_preview_len,
                )
                .await,
            ),
            _ => None,
        };

        WsReport { health, port, session }
    }

    pub async fn inspect_system(&self) -> SystemReport {
        let firewall = self.inspector.query_firewall_status().await;
        let interfaces = self.inspector.query_network_interfaces().await;
        let lan_address = interface::get_lan_ipv4();
        SystemReport {
            firewall,
            interfaces,
            lan_address,
        }
    }

    pub fn guide_context(&self, lan_address: Option<std::net::Ipv4Addr>) -> GuideContext {
        GuideContext {
            api_port: socket_target(&self.cfg.api_base_url).map_or(8080, |(_, port)| port),
            ws_port: socket_target(&self.cfg.ws_url).map_or(8080, |(_, port)| port),
            ws_http_port: socket_target(&self.cfg.ws_http_url).map_or(3001, |(_, port)| port),
            lan_address,
            external_ip: self.external_ip(),
        }
    }

    async fn probe_port(&self, host: &str, port: u16, probe_timeout: Duration) -> PortProbe {
        let open = tcp::check_port_open(host, port, probe_timeout).await;
        debug!("{host}:{port} open={open}");
        PortProbe {
            host: host.to_string(),
            port,
            open,
        }
    }
}

/// Host and port a URL points at, with the scheme's default port filled in.
pub fn socket_target(url: &str) -> Result<(String, u16), ProbeError> {
    let invalid = || ProbeError::InvalidUrl(url.to_string());
    let parsed = Url::parse(url).map_err(|_| invalid())?;
    let host = parsed
        .host_str()
        .ok_or_else(invalid)?
        .trim_start_matches('[')
        .trim_end_matches(']')
        .to_string();
    let port = parsed.port_or_known_default().ok_or_else(invalid)?;
    Ok((host, port))
}
