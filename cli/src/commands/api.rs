use colored::*;
use reachr_common::config::Config;
use reachr_common::report::{ApiReport, ExternalAccess, PortProbe};
use reachr_core::tester::ReachabilityTester;
use tracing::Instrument;

use crate::terminal::{colors, format, print, spinner};

/// Looks up the public IP unless external checks are disabled.
pub async fn public_ip(tester: &ReachabilityTester, cfg: &Config) {
    print::header("public ip", cfg.quiet);

    if cfg.skip_external {
        print::aligned_line("Public IP", "skipped (--skip-external)".color(colors::WARNING));
        return;
    }

    let span = spinner::step("Resolving public IP...");
    match tester.resolve_public_ip().instrument(span).await {
        Ok(ip) => print::aligned_line("Public IP", ip.to_string().color(colors::IP_ADDR)),
        Err(e) => {
            print::aligned_line("Public IP", format::probe_error(&e));
            print::print_status("External access checks will be skipped");
        }
    }
}

pub async fn api(tester: &ReachabilityTester, cfg: &Config) {
    print::header("http api", cfg.quiet);

    let span = spinner::step("Probing HTTP API endpoints...");
    let report: ApiReport = tester.test_api().instrument(span).await;
    print_report(&report, cfg);
}

fn print_report(report: &ApiReport, cfg: &Config) {
    print::subheader(&format!("Local access ({})", cfg.api_base_url));
    let rows: Vec<(String, ColoredString)> = report
        .endpoints
        .iter()
        .map(|result| (result.path.clone(), format::endpoint_status(&result.status)))
        .collect();
    print::as_tree_one_level(rows);

    match &report.local_port {
        Ok(probe) => print_port(probe, "open", "closed"),
        Err(e) => print::aligned_line("Port", format::probe_error(e)),
    }

    match &report.external {
        ExternalAccess::Skipped => {}
        ExternalAccess::Unreachable(probe) => {
            print::subheader(&format!("External access ({})", probe.host));
            print_port(probe, "reachable", "unreachable");
        }
        ExternalAccess::Reachable { port, health } => {
            print::subheader(&format!("External access ({})", port.host));
            print_port(port, "reachable", "unreachable");
            print::aligned_line("External API", format::endpoint_status(health));
        }
    }
}

fn print_port(probe: &PortProbe, open_word: &str, closed_word: &str) {
    print::aligned_line(
        &format!("Port {}", probe.port),
        format::port_state(probe.open, open_word, closed_word),
    );
}
