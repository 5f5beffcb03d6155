use colored::*;
use reachr_common::config::Config;
use reachr_common::report::{HealthReport, WsReport};
use reachr_common::websocket::WsSessionReport;
use reachr_core::tester::ReachabilityTester;
use tracing::Instrument;

use crate::terminal::{colors, format, print, spinner};

pub async fn ws(tester: &ReachabilityTester, cfg: &Config) {
    print::header("websocket server", cfg.quiet);

    let span = spinner::step("Testing WebSocket server...");
    let report: WsReport = tester.test_websocket().instrument(span).await;

    print_health(&report.health);

    print::subheader(&format!("Connection ({})", cfg.ws_url));
    match &report.port {
        Ok(probe) => print::aligned_line(
            &format!("Port {}", probe.port),
            format::port_state(probe.open, "open", "closed"),
        ),
        Err(e) => print::aligned_line("Port", format::probe_error(e)),
    }

    match &report.session {
        Some(session) => print_session(session),
        None => print::print_status("Handshake skipped"),
    }
}

fn print_health(health: &HealthReport) {
    print::subheader(&format!("Health ({})", health.url));
    print::aligned_line("Health", format::endpoint_status(&health.status));

    match &health.service_status {
        Some(status) => print::aligned_line("Service", status.as_str()),
        None if health.status.is_success() => {
            print::aligned_line("Service", "✘ health body is not JSON".color(colors::FAILURE))
        }
        None => {}
    }
}

fn print_session(session: &WsSessionReport) {
    let rows: Vec<(String, ColoredString)> = session.events.iter().map(format::ws_event).collect();
    print::as_tree_one_level(rows);

    if let Some(reason) = session.close_reason() {
        print::aligned_line("Session", format::close_reason(reason));
    }
}
