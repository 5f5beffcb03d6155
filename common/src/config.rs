use std::time::Duration;

use crate::message::ClientMessage;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_WS_URL: &str = "ws://localhost:8080";
pub const DEFAULT_WS_HTTP_URL: &str = "http://localhost:3001";
pub const DEFAULT_IP_ECHO_URL: &str = "https://api.ipify.org";

pub const DEFAULT_API_ENDPOINTS: &[&str] = &[
    "/api/test/health",
    "/api/category",
    "/.well-known/jwks.json",
    "/.well-known/openid_configuration",
];

/// Everything the tester needs to know about its targets.
///
/// `Config::default()` points at the usual local development stack. The CLI
/// overrides individual fields from its flags and tests point the URLs at
/// in-process mock servers.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the HTTP API. Its host and port are also the local TCP probe target.
    pub api_base_url: String,
    /// Paths requested under `api_base_url`, in order.
    pub api_endpoints: Vec<String>,
    /// Path requested against the external IP when the API port is reachable from outside.
    pub api_health_path: String,
    /// WebSocket endpoint. Its host and port are the WebSocket TCP probe target.
    pub ws_url: String,
    /// Base URL of the WebSocket server's companion HTTP API.
    pub ws_http_url: String,
    pub ws_health_path: String,
    /// Public IP echo service. The trimmed response body must be an IP address.
    pub ip_echo_url: String,
    /// Message sent right after the WebSocket handshake.
    pub join_message: ClientMessage,

    /// Timeout for local HTTP requests, TCP probes and the public IP lookup.
    pub probe_timeout: Duration,
    /// Timeout for the TCP probe against the external IP.
    pub external_port_timeout: Duration,
    /// Timeout for the HTTP request against the external IP.
    pub external_http_timeout: Duration,
    /// Upper bound on a whole WebSocket session, handshake included.
    pub ws_watchdog: Duration,
    /// Upper bound for each OS utility invocation.
    pub command_timeout: Duration,
    /// Number of characters of a received WebSocket message shown in the report.
    pub message_preview_len: usize,

    /// Skips the public IP lookup and with it the external access checks.
    pub skip_external: bool,
    pub no_banner: bool,
    /// 0 prints everything, 1 drops banner and section headers, 2 also drops the guide.
    pub quiet: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            api_endpoints: DEFAULT_API_ENDPOINTS.iter().map(|p| p.to_string()).collect(),
            api_health_path: "/api/test/health".to_string(),
            ws_url: DEFAULT_WS_URL.to_string(),
            ws_http_url: DEFAULT_WS_HTTP_URL.to_string(),
            ws_health_path: "/health".to_string(),
            ip_echo_url: DEFAULT_IP_ECHO_URL.to_string(),
            join_message: ClientMessage::test_join(),
            probe_timeout: Duration::from_secs(5),
            external_port_timeout: Duration::from_secs(3),
            external_http_timeout: Duration::from_secs(10),
            ws_watchdog: Duration::from_secs(5),
            command_timeout: Duration::from_secs(10),
            message_preview_len: 100,
            skip_external: false,
            no_banner: false,
            quiet: 0,
        }
    }
}

impl Config {
    pub fn ws_health_url(&self) -> String {
        join_url(&self.ws_http_url, &self.ws_health_path)
    }
}

/// Joins a base URL and a path without doubling or dropping the slash.
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.is_empty() {
        return base.to_string();
    }
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}
