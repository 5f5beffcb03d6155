use std::time::{Duration, Instant};

use reachr_common::config::Config;
use reachr_common::report::EndpointStatus;
use reachr_common::websocket::{CloseReason, WsEvent};
use reachr_core::tester::ReachabilityTester;

use crate::util::{self, StubInspector, WsBehaviour};

fn tester(cfg: Config) -> ReachabilityTester {
    ReachabilityTester::with_inspector(cfg, Box::new(StubInspector)).unwrap()
}

#[tokio::test]
async fn echo_server_completes_session() {
    let ws = util::spawn_ws_server(WsBehaviour::Echo).await;
    let health = util::spawn_http_server(&[("/health", 200, r#"{"status":"ok","rooms":0}"#)]).await;
    let cfg = Config {
        ws_url: format!("ws://{ws}"),
        ws_http_url: format!("http://{health}"),
        ..util::offline_config().await
    };

    let report = tester(cfg).test_websocket().await;

    assert_eq!(report.health.status, EndpointStatus::Success(200));
    assert_eq!(report.health.service_status.as_deref(), Some("ok"));
    assert!(report.port.unwrap().open);

    let session = report.session.expect("port was open");
    assert_eq!(session.close_reason(), Some(&CloseReason::AfterMessage));
    assert_eq!(
        session.received(),
        Some(r##"{"type":"Join","room_id":"test-room","name":"TestPlayer","color":"#FF0000"}"##)
    );
    assert_eq!(session.events.first(), Some(&WsEvent::Opened));
}

#[tokio::test]
async fn silent_server_is_closed_by_watchdog() {
    let ws = util::spawn_ws_server(WsBehaviour::Silent).await;
    let cfg = Config {
        ws_url: format!("ws://{ws}"),
        ws_watchdog: Duration::from_millis(500),
        ..util::offline_config().await
    };
    let tester = tester(cfg);

    let start = Instant::now();
    let report = tester.test_websocket().await;
    let elapsed = start.elapsed();

    let session = report.session.expect("port was open");
    assert_eq!(session.close_reason(), Some(&CloseReason::Watchdog));
    assert!(session.events.contains(&WsEvent::WatchdogExpired));
    assert!(elapsed < Duration::from_secs(4), "session took {elapsed:?}");
}

#[tokio::test]
async fn health_without_status_field_is_unknown() {
    let health = util::spawn_http_server(&[("/health", 200, r#"{"uptime":12}"#)]).await;
    let cfg = Config {
        ws_http_url: format!("http://{health}"),
        ..util::offline_config().await
    };

    let report = tester(cfg).test_websocket().await;
    assert_eq!(report.health.service_status.as_deref(), Some("unknown"));
}

#[tokio::test]
async fn nothing_running_reports_refused_and_closed() {
    let report = tester(util::offline_config().await).test_websocket().await;

    assert_eq!(report.health.status, EndpointStatus::ConnectionRefused);
    assert_eq!(report.health.service_status, None);
    assert!(!report.port.unwrap().open);
    assert!(report.session.is_none());
}
