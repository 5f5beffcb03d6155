use std::net::Ipv4Addr;

use colored::*;
use reachr_common::config::Config;
use reachr_common::error::ProbeError;
use reachr_common::report::SystemReport;
use reachr_core::tester::ReachabilityTester;
use tracing::Instrument;

use crate::terminal::{colors, format, print, spinner};

/// Prints firewall and interface details and hands back the LAN address for the guide.
pub async fn system(tester: &ReachabilityTester, cfg: &Config) -> Option<Ipv4Addr> {
    print::header("firewall & network", cfg.quiet);

    let span = spinner::step("Inspecting firewall and interfaces...");
    let report: SystemReport = tester.inspect_system().instrument(span).await;

    print::subheader("Firewall");
    match &report.firewall {
        Ok(firewall) => {
            print::aligned_line("Firewall", format::firewall_status(&firewall.status));
            print::block(firewall.raw.trim_end());
        }
        Err(e) => print::aligned_line("Firewall", undetermined(e)),
    }

    print::subheader("Network interfaces");
    match &report.interfaces {
        Ok(lines) if lines.is_empty() => print::print_status("No address or gateway lines found"),
        Ok(lines) => lines.iter().for_each(print::print_status),
        Err(e) => print::aligned_line("Interfaces", undetermined(e)),
    }

    match report.lan_address {
        Some(ip) => print::aligned_line("LAN IPv4", ip.to_string().color(colors::IP_ADDR)),
        None => print::aligned_line("LAN IPv4", "not detected".color(colors::WARNING)),
    }

    report.lan_address
}

fn undetermined(err: &ProbeError) -> ColoredString {
    format!("could not determine - {err}").color(colors::FAILURE)
}
