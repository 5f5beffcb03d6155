use std::time::{Duration, Instant};

use reachr_common::config::Config;
use reachr_common::error::ProbeError;
use reachr_common::report::{ExternalAccess, FirewallStatus};
use reachr_core::tester::ReachabilityTester;

use crate::util::{self, StubInspector};

/// Every step of a full run completes even though nothing is listening.
#[tokio::test]
async fn full_run_survives_a_dead_stack() {
    let cfg = util::offline_config().await;
    let tester = ReachabilityTester::with_inspector(cfg, Box::new(StubInspector)).unwrap();

    assert!(tester.resolve_public_ip().await.is_err());
    let api = tester.test_api().await;
    let ws = tester.test_websocket().await;
    let system = tester.inspect_system().await;
    let guide = tester.guide_context(system.lan_address);

    assert_eq!(api.external, ExternalAccess::Skipped);
    assert!(ws.session.is_none());
    assert_eq!(system.firewall.unwrap().status, FirewallStatus::Inactive);
    assert_eq!(system.interfaces, Err(ProbeError::Unsupported("test".into())));
    assert_eq!(guide.external_ip, None);
}

#[tokio::test]
async fn unroutable_api_is_bounded_by_timeouts() {
    let probe_timeout = Duration::from_millis(500);
    let cfg = Config {
        api_base_url: "http://10.255.255.1:8080".into(),
        api_endpoints: vec!["/api/test/health".into()],
        probe_timeout,
        ..util::offline_config().await
    };
    let tester = ReachabilityTester::with_inspector(cfg, Box::new(StubInspector)).unwrap();

    let start = Instant::now();
    let report = tester.test_api().await;

    // one request plus one port probe, each capped at the probe timeout
    assert!(start.elapsed() < probe_timeout * 2 + Duration::from_secs(1));
    assert_eq!(report.endpoints.len(), 1);
    assert!(report.local_port.is_ok());
}
