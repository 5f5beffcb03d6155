use std::net::{IpAddr, Ipv4Addr};

use reachr_common::config::Config;
use reachr_common::report::{ApiReport, EndpointStatus, ExternalAccess};
use reachr_core::tester::ReachabilityTester;

use crate::util::{self, StubInspector};

fn tester(cfg: Config) -> ReachabilityTester {
    ReachabilityTester::with_inspector(cfg, Box::new(StubInspector)).unwrap()
}

/// Health answers 200 and the category listing 404; the WebSocket port is closed.
#[tokio::test]
async fn health_ok_category_missing_websocket_closed() {
    let api = util::spawn_http_server(&[
        ("/api/test/health", 200, r#"{"status":"UP"}"#),
        ("/api/category", 404, ""),
        ("/.well-known/jwks.json", 200, r#"{"keys":[]}"#),
    ])
    .await;
    let ws_port = util::closed_port().await;

    let cfg = Config {
        api_base_url: format!("http://{api}"),
        ws_url: format!("ws://127.0.0.1:{ws_port}"),
        ..util::offline_config().await
    };
    let tester = tester(cfg);

    let report: ApiReport = tester.test_api().await;
    assert_eq!(report.endpoints.len(), 4);
    assert_eq!(report.endpoints[0].path, "/api/test/health");
    assert_eq!(report.endpoints[0].status, EndpointStatus::Success(200));
    assert_eq!(report.endpoints[1].status, EndpointStatus::Failure(404));
    assert_eq!(report.endpoints[2].status, EndpointStatus::Success(200));
    assert_eq!(report.endpoints[3].status, EndpointStatus::Failure(404));
    assert!(report.local_port.as_ref().unwrap().open);
    assert_eq!(report.external, ExternalAccess::Skipped);

    let ws = tester.test_websocket().await;
    assert!(!ws.port.as_ref().unwrap().open);
    assert!(ws.session.is_none(), "handshake must be skipped when the port is closed");
}

#[tokio::test]
async fn stopped_server_reports_refused_for_every_endpoint() {
    let tester = tester(util::offline_config().await);

    let report = tester.test_api().await;

    assert_eq!(report.endpoints.len(), 4);
    for result in &report.endpoints {
        assert_eq!(result.status, EndpointStatus::ConnectionRefused, "{}", result.path);
    }
    assert!(!report.local_port.unwrap().open);
}

#[tokio::test]
async fn failed_ip_lookup_skips_external_branch() {
    let api = util::spawn_http_server(&[("/api/test/health", 200, "{}")]).await;
    let cfg = Config {
        api_base_url: format!("http://{api}"),
        ..util::offline_config().await
    };
    let tester = tester(cfg);

    assert!(tester.resolve_public_ip().await.is_err());
    assert_eq!(tester.external_ip(), None);

    let report = tester.test_api().await;
    assert_eq!(report.external, ExternalAccess::Skipped);
}

#[tokio::test]
async fn reachable_external_ip_gets_health_request() {
    let api = util::spawn_http_server(&[("/api/test/health", 200, "{}")]).await;
    let echo = util::spawn_http_server(&[("/", 200, "127.0.0.1\n")]).await;
    let cfg = Config {
        api_base_url: format!("http://{api}"),
        ip_echo_url: format!("http://{echo}"),
        ..util::offline_config().await
    };
    let tester = tester(cfg);

    let ip = tester.resolve_public_ip().await.unwrap();
    assert_eq!(ip, IpAddr::V4(Ipv4Addr::LOCALHOST));

    match tester.test_api().await.external {
        ExternalAccess::Reachable { port, health } => {
            assert_eq!(port.host, "127.0.0.1");
            assert_eq!(port.port, api.port());
            assert!(port.open);
            assert_eq!(health, EndpointStatus::Success(200));
        }
        other => panic!("expected external access, got {other:?}"),
    }
}

#[tokio::test]
async fn closed_external_port_is_unreachable() {
    let echo = util::spawn_http_server(&[("/", 200, "127.0.0.1")]).await;
    let cfg = Config {
        ip_echo_url: format!("http://{echo}"),
        ..util::offline_config().await
    };
    let tester = tester(cfg);
    tester.resolve_public_ip().await.unwrap();

    match tester.test_api().await.external {
        ExternalAccess::Unreachable(probe) => assert!(!probe.open),
        other => panic!("expected unreachable, got {other:?}"),
    }
}

#[tokio::test]
async fn public_ip_is_kept_for_the_run() {
    let echo = util::spawn_http_server(&[("/", 200, "198.51.100.4")]).await;
    let cfg = Config {
        ip_echo_url: format!("http://{echo}"),
        ..util::offline_config().await
    };
    let tester = tester(cfg);

    let first = tester.resolve_public_ip().await.unwrap();
    let second = tester.resolve_public_ip().await.unwrap();
    assert_eq!(first, second);
    assert_eq!(tester.external_ip(), Some(first));
}

#[tokio::test]
async fn garbage_echo_body_is_not_an_ip() {
    let echo = util::spawn_http_server(&[("/", 200, "<html>login</html>")]).await;
    let cfg = Config {
        ip_echo_url: format!("http://{echo}"),
        ..util::offline_config().await
    };
    let tester = tester(cfg);

    assert!(tester.resolve_public_ip().await.is_err());
    assert_eq!(tester.external_ip(), None);
}

#[tokio::test]
async fn port_probe_is_idempotent() {
    let api = util::spawn_http_server(&[]).await;
    let tester = tester(util::offline_config().await);

    let open: Vec<bool> = probe_three_times(&tester, api.port()).await;
    assert_eq!(open, vec![true, true, true]);

    let closed = util::closed_port().await;
    let results: Vec<bool> = probe_three_times(&tester, closed).await;
    assert_eq!(results, vec![false, false, false]);
}

async fn probe_three_times(tester: &ReachabilityTester, port: u16) -> Vec<bool> {
    let mut results = Vec::new();
    for _ in 0..3 {
        results.push(tester.check_port_open("127.0.0.1", port).await);
    }
    results
}
