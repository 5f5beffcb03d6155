use crate::terminal::colors;
use colored::*;
use reachr_common::error::ProbeError;
use reachr_common::report::{EndpointStatus, FirewallStatus};
use reachr_common::websocket::{CloseReason, WsEvent};

pub fn endpoint_status(status: &EndpointStatus) -> ColoredString {
    match status {
        EndpointStatus::Success(code) => format!("✔ ok ({code})").color(colors::SUCCESS),
        EndpointStatus::Failure(code) => format!("! status {code}").color(colors::WARNING),
        EndpointStatus::ConnectionRefused => {
            "✘ connection refused (server not running)".color(colors::FAILURE)
        }
        EndpointStatus::Timeout => "✘ timed out".color(colors::FAILURE),
        EndpointStatus::Error(msg) => format!("✘ error - {msg}").color(colors::FAILURE),
    }
}

pub fn port_state(open: bool, open_word: &str, closed_word: &str) -> ColoredString {
    if open {
        format!("✔ {open_word}").color(colors::SUCCESS)
    } else {
        format!("✘ {closed_word}").color(colors::FAILURE)
    }
}

pub fn probe_error(err: &ProbeError) -> ColoredString {
    format!("✘ {err}").color(colors::FAILURE)
}

pub fn firewall_status(status: &FirewallStatus) -> ColoredString {
    match status {
        FirewallStatus::Active => "active".green().bold(),
        FirewallStatus::Inactive => "inactive".red().bold(),
        FirewallStatus::NotDetected => "not detected".yellow(),
    }
}

pub fn close_reason(reason: &CloseReason) -> String {
    match reason {
        CloseReason::AfterMessage => "closed after first reply".to_string(),
        CloseReason::ByPeer(Some(code)) => format!("closed by server (code {code})"),
        CloseReason::ByPeer(None) => "closed by server".to_string(),
        CloseReason::Failed(msg) => format!("failed: {msg}"),
        CloseReason::Watchdog => {
            "no close within the watchdog period, closed by watchdog".to_string()
        }
    }
}

/// One report row per session event.
pub fn ws_event(event: &WsEvent) -> (String, ColoredString) {
    match event {
        WsEvent::Opened => ("Connect".into(), "✔ connected".color(colors::SUCCESS)),
        WsEvent::MessageSent(json) => ("Sent".into(), json.as_str().color(colors::TEXT_DEFAULT)),
        WsEvent::MessageReceived(preview) => (
            "Received".into(),
            format!("✔ {preview}...").color(colors::SUCCESS),
        ),
        WsEvent::Error(msg) => ("Error".into(), format!("✘ {msg}").color(colors::FAILURE)),
        WsEvent::PeerClosed(_) => (
            "Close".into(),
            "connection closed by server".color(colors::TEXT_DEFAULT),
        ),
        WsEvent::WatchdogExpired => (
            "Watchdog".into(),
            "! timed out, forcing close".color(colors::WARNING),
        ),
    }
}
