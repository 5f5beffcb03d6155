use std::time::{Duration, Instant};

use colored::*;
use reachr_common::config::Config;
use reachr_core::tester::ReachabilityTester;

use crate::commands::{api, guide, system, ws};
use crate::terminal::{colors, print};

/// Runs every step in order. A failing step never stops the ones after it.
pub async fn check(tester: &ReachabilityTester, cfg: &Config) {
    let start_time: Instant = Instant::now();

    api::public_ip(tester, cfg).await;
    api::api(tester, cfg).await;
    ws::ws(tester, cfg).await;
    let lan_address = system::system(tester, cfg).await;
    guide::guide(&tester.guide_context(lan_address), cfg.quiet);

    print_summary(start_time.elapsed());
}

fn print_summary(total_time: Duration) {
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: ColoredString =
        format!("Reachability check complete in {total_time}").color(colors::TEXT_DEFAULT);
    print::fat_separator();
    print::centerln(&output.to_string());
}
