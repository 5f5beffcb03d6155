use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use reachr_common::config::Config;
use reachr_common::error::ProbeError;
use reachr_common::report::FirewallReport;
use reachr_common::system::SystemInspector;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::accept_async;

pub type Route = (&'static str, u16, &'static str);

/// Minimal HTTP/1.1 server answering `routes` by path; unknown paths get 404.
pub async fn spawn_http_server(routes: &'static [Route]) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            tokio::spawn(answer(stream, routes));
        }
    });
    addr
}

async fn answer(mut stream: TcpStream, routes: &'static [Route]) {
    let mut request: Vec<u8> = Vec::new();
    let mut buf = [0u8; 1024];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf).await {
            Ok(0) | Err(_) => return,
            Ok(n) => request.extend_from_slice(&buf[..n]),
        }
    }

    let head = String::from_utf8_lossy(&request);
    let path = head.split_whitespace().nth(1).unwrap_or("/").to_string();
    let (code, body) = routes
        .iter()
        .find(|(route, _, _)| *route == path)
        .map(|(_, code, body)| (*code, *body))
        .unwrap_or((404, ""));

    let response = format!(
        "HTTP/1.1 {code} Status\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}

/// A loopback port nothing listens on.
pub async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap().port()
}

#[derive(Clone, Copy)]
pub enum WsBehaviour {
    /// Sends back the first message it receives.
    Echo,
    /// Completes the handshake and never sends anything.
    Silent,
}

pub async fn spawn_ws_server(behaviour: WsBehaviour) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            tokio::spawn(async move {
                let Ok(mut ws) = accept_async(stream).await else {
                    return;
                };
                match behaviour {
                    WsBehaviour::Echo => {
                        if let Some(Ok(msg)) = ws.next().await {
                            let _ = ws.send(msg).await;
                        }
                        while ws.next().await.is_some() {}
                    }
                    WsBehaviour::Silent => {
                        let _ = ws.next().await;
                        tokio::time::sleep(Duration::from_secs(30)).await;
                    }
                }
            });
        }
    });
    addr
}

pub struct StubInspector;

#[async_trait]
impl SystemInspector for StubInspector {
    async fn query_firewall_status(&self) -> Result<FirewallReport, ProbeError> {
        Ok(FirewallReport::from_output("Status: inactive\n".to_string()))
    }

    async fn query_network_interfaces(&self) -> Result<Vec<String>, ProbeError> {
        Err(ProbeError::Unsupported("test".into()))
    }
}

/// Config with every target pointing at loopback ports nobody listens on and short timeouts.
pub async fn offline_config() -> Config {
    let api = closed_port().await;
    let ws_http = closed_port().await;
    let echo = closed_port().await;
    Config {
        api_base_url: format!("http://127.0.0.1:{api}"),
        ws_url: format!("ws://127.0.0.1:{api}"),
        ws_http_url: format!("http://127.0.0.1:{ws_http}"),
        ip_echo_url: format!("http://127.0.0.1:{echo}"),
        probe_timeout: Duration::from_secs(2),
        external_port_timeout: Duration::from_secs(1),
        external_http_timeout: Duration::from_secs(2),
        ws_watchdog: Duration::from_millis(500),
        ..Config::default()
    }
}
