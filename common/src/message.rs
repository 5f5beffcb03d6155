use serde::{Deserialize, Serialize};

/// Client-to-server frames understood by the game WebSocket server.
///
/// Only `Join` is sent by the tester; the enum keeps the server's wire
/// layout (`"type"` tag first, fields flattened).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    Join {
        room_id: String,
        name: String,
        color: String,
    },
}

impl ClientMessage {
    pub fn test_join() -> Self {
        ClientMessage::Join {
            room_id: "test-room".to_string(),
            name: "TestPlayer".to_string(),
            color: "#FF0000".to_string(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
