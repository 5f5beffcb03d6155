//! # WebSocket Session State Machine
//!
//! A test session moves `Connecting -> Open -> Closed`. Every network
//! happening (handshake, frames, errors, the watchdog) is fed in as a
//! [`WsEvent`]; once the session is closed further events are dropped, so
//! closing twice is harmless.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WsEvent {
    /// Handshake completed.
    Opened,
    /// The test message went out. Holds the JSON text.
    MessageSent(String),
    /// A frame arrived. Holds the truncated preview.
    MessageReceived(String),
    Error(String),
    /// The server closed the connection, with its close code if it sent one.
    PeerClosed(Option<u16>),
    WatchdogExpired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseReason {
    /// We closed after the first message arrived.
    AfterMessage,
    ByPeer(Option<u16>),
    Failed(String),
    Watchdog,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WsState {
    Connecting,
    Open,
    Closed(CloseReason),
}

impl WsState {
    pub fn on_event(self, event: &WsEvent) -> WsState {
        match (self, event) {
            (WsState::Connecting, WsEvent::Opened) => WsState::Open,
            (WsState::Open, WsEvent::MessageSent(_)) => WsState::Open,
            (WsState::Open, WsEvent::MessageReceived(_)) => {
                WsState::Closed(CloseReason::AfterMessage)
            }
            (WsState::Connecting | WsState::Open, WsEvent::Error(msg)) => {
                WsState::Closed(CloseReason::Failed(msg.clone()))
            }
            (WsState::Connecting | WsState::Open, WsEvent::PeerClosed(code)) => {
                WsState::Closed(CloseReason::ByPeer(*code))
            }
            (WsState::Connecting | WsState::Open, WsEvent::WatchdogExpired) => {
                WsState::Closed(CloseReason::Watchdog)
            }
            (state, _) => state,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, WsState::Closed(_))
    }

    pub fn close_reason(&self) -> Option<&CloseReason> {
        match self {
            WsState::Closed(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Accumulates the events of one session in the order they were applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WsSession {
    state: WsState,
    events: Vec<WsEvent>,
}

impl Default for WsSession {
    fn default() -> Self {
        Self::new()
    }
}

impl WsSession {
    pub fn new() -> Self {
        Self {
            state: WsState::Connecting,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &WsState {
        &self.state
    }

    /// Applies `event` unless the session is already closed.
    pub fn apply(&mut self, event: WsEvent) {
        if self.state.is_closed() {
            return;
        }
        self.state = std::mem::replace(&mut self.state, WsState::Connecting).on_event(&event);
        self.events.push(event);
    }

    pub fn finish(self) -> WsSessionReport {
        WsSessionReport {
            events: self.events,
            state: self.state,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WsSessionReport {
    pub events: Vec<WsEvent>,
    pub state: WsState,
}

impl WsSessionReport {
    pub fn close_reason(&self) -> Option<&CloseReason> {
        self.state.close_reason()
    }

    pub fn received(&self) -> Option<&str> {
        self.events.iter().find_map(|event| match event {
            WsEvent::MessageReceived(preview) => Some(preview.as_str()),
            _ => None,
        })
    }
}

/// First `max_chars` characters of `payload`.
pub fn preview(payload: &str, max_chars: usize) -> String {
    payload.chars().take(max_chars).collect()
}
