//! One-shot WebSocket test session.
//!
//! Connects, sends the join message, waits for the first frame and closes.
//! The whole session, handshake included, runs against a watchdog deadline;
//! when it fires the connection is closed from our side.

use std::time::Duration;

use futures::{SinkExt, StreamExt};
use reachr_common::message::ClientMessage;
use reachr_common::websocket::{CloseReason, WsEvent, WsSession, WsSessionReport, preview};
use tokio::net::TcpStream;
use tokio::time::{sleep, timeout};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::debug;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// How long a close handshake we initiate may take before the socket is dropped.
const CLOSE_GRACE: Duration = Duration::from_secs(1);

pub async fn run_session(
    url: &str,
    message: &ClientMessage,
    watchdog: Duration,
    preview_len: usize,
) -> WsSessionReport {
    let mut session = WsSession::new();
    let deadline = sleep(watchdog);
    tokio::pin!(deadline);

    debug!("Connecting to {url}");
    let connected = tokio::select! {
        result = connect_async(url) => result,
        _ = &mut deadline => {
            session.apply(WsEvent::WatchdogExpired);
            return session.finish();
        }
    };

    let mut stream: WsStream = match connected {
        Ok((stream, _response)) => stream,
        Err(e) => {
            session.apply(WsEvent::Error(e.to_string()));
            return session.finish();
        }
    };
    session.apply(WsEvent::Opened);

    let completed = tokio::select! {
        _ = drive(&mut stream, &mut session, message, preview_len) => true,
        _ = &mut deadline => false,
    };

    if !completed {
        debug!("Watchdog fired after {}s, closing {url}", watchdog.as_secs_f64());
        session.apply(WsEvent::WatchdogExpired);
    }

    let reason = session.state().close_reason();
    if let Some(CloseReason::AfterMessage | CloseReason::Watchdog) = reason {
        // The peer may be gone already; a failed close changes nothing.
        let _ = timeout(CLOSE_GRACE, stream.close(None)).await;
    }

    session.finish()
}

async fn drive(
    stream: &mut WsStream,
    session: &mut WsSession,
    message: &ClientMessage,
    preview_len: usize,
) {
    let json = match message.to_json() {
        Ok(json) => json,
        Err(e) => {
            session.apply(WsEvent::Error(format!("cannot encode test message: {e}")));
            return;
        }
    };

    if let Err(e) = stream.send(Message::Text(json.clone())).await {
        session.apply(WsEvent::Error(e.to_string()));
        return;
    }
    session.apply(WsEvent::MessageSent(json));

    while let Some(frame) = stream.next().await {
        match frame {
            Ok(Message::Text(text)) => {
                session.apply(WsEvent::MessageReceived(preview(&text, preview_len)));
                return;
            }
            Ok(Message::Binary(bytes)) => {
                let text = String::from_utf8_lossy(&bytes);
                session.apply(WsEvent::MessageReceived(preview(&text, preview_len)));
                return;
            }
            Ok(Message::Close(frame)) => {
                session.apply(WsEvent::PeerClosed(frame.map(|f| u16::from(f.code))));
                return;
            }
            Ok(_) => continue,
            Err(e) => {
                session.apply(WsEvent::Error(e.to_string()));
                return;
            }
        }
    }

    session.apply(WsEvent::PeerClosed(None));
}
