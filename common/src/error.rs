use std::time::Duration;

use thiserror::Error;

/// Why a probe, lookup or OS query did not produce a usable answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    #[error("connection refused (server not running)")]
    ConnectionRefused,

    #[error("timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("{0}")]
    Http(String),

    #[error("response is not an IP address: {0:?}")]
    InvalidIp(String),

    #[error("invalid URL {0:?}")]
    InvalidUrl(String),

    #[error("{program}: {reason}")]
    CommandFailed { program: String, reason: String },

    #[error("not supported on {0}")]
    Unsupported(String),
}
