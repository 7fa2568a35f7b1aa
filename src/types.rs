//! Wire payloads and derived value objects.
//!
//! Everything the Dynmap HTTP API sends or receives is JSON. The shapes here
//! follow the documented endpoint contracts: unknown keys are ignored, but a
//! record that claims to be a chat or player entry must carry its documented
//! fields or the whole frame decode fails.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Basic math
// ---------------------------------------------------------------------------

/// A player's position in world space.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl std::fmt::Display for Vec3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}

// ---------------------------------------------------------------------------
// Server configuration  (GET /up/configuration)
// ---------------------------------------------------------------------------

/// Server-reported configuration, fetched once at client construction.
///
/// Dynmap reports a large open-ended bag of settings; only two keys matter
/// to this client, the rest are preserved verbatim in `extra`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfiguration {
    /// Whether the server accepts chat messages posted over the web API.
    pub allowwebchat: bool,
    /// World to poll when `update()` is called without an explicit world.
    pub defaultworld: String,
    /// Every other setting the server reported, untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Frame  (GET /up/world/{world}/{timestamp})
// ---------------------------------------------------------------------------

/// One snapshot of world state for a given world and fetch timestamp.
///
/// Wholly replaced on every `update()` — frames are never merged.
#[derive(Debug, Clone, Deserialize)]
pub struct Frame {
    #[serde(default)]
    pub updates: Vec<Update>,
    #[serde(default)]
    pub players: Vec<Update>,
}

/// A tagged record within a frame.
///
/// The server interleaves several record kinds in the `updates` list; this
/// client only interprets chat and player entries. Anything else lands in
/// `Other` with its raw JSON preserved, so new server-side record types
/// never fail a frame decode.
#[derive(Debug, Clone)]
pub enum Update {
    Chat(ChatUpdate),
    Player(PlayerUpdate),
    Other(serde_json::Value),
}

impl<'de> Deserialize<'de> for Update {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        let value = serde_json::Value::deserialize(deserializer)?;
        let tag = value
            .get("type")
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned);
        match tag.as_deref() {
            Some("chat") => serde_json::from_value(value)
                .map(Update::Chat)
                .map_err(D::Error::custom),
            Some("player") => serde_json::from_value(value)
                .map(Update::Player)
                .map_err(D::Error::custom),
            _ => Ok(Update::Other(value)),
        }
    }
}

/// A chat event as it appears on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatUpdate {
    #[serde(rename = "playerName")]
    pub player_name: String,
    pub message: String,
    /// Milliseconds since the Unix epoch, server-side.
    pub timestamp: i64,
}

/// A player state report as it appears on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerUpdate {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub health: f64,
    pub armor: f64,
}

// ---------------------------------------------------------------------------
// Send message  (POST /up/sendmessage)
// ---------------------------------------------------------------------------

/// Body posted to the send-message endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct SendMessageRequest {
    pub name: String,
    pub message: String,
}

/// Reply from the send-message endpoint. `error` is the literal string
/// `"none"` on success.
#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageResponse {
    pub error: String,
}

// ---------------------------------------------------------------------------
// Derived value objects
// ---------------------------------------------------------------------------

/// A message sent to the world chat, as yielded by
/// [`DynmapClient::recent_chat_messages`](crate::DynmapClient::recent_chat_messages).
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub player_name: String,
    pub message: String,
    /// Server-side send time, converted from the wire's millisecond epoch
    /// timestamp to UTC calendar time.
    pub timestamp: DateTime<Utc>,
}

impl From<&ChatUpdate> for ChatMessage {
    fn from(update: &ChatUpdate) -> Self {
        Self {
            player_name: update.player_name.clone(),
            message: update.message.clone(),
            // Out-of-range timestamps clamp to the epoch.
            timestamp: DateTime::from_timestamp_millis(update.timestamp).unwrap_or_default(),
        }
    }
}

/// A currently online player's status, as yielded by
/// [`DynmapClient::players`](crate::DynmapClient::players).
///
/// Rebuilt fresh from the current frame on every call — there is no player
/// identity tracked across frames.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerStatus {
    pub name: String,
    pub position: Vec3,
    pub health: f64,
    pub armor: f64,
}

impl From<&PlayerUpdate> for PlayerStatus {
    fn from(update: &PlayerUpdate) -> Self {
        Self {
            name: update.name.clone(),
            position: Vec3::new(update.x, update.y, update.z),
            health: update.health,
            armor: update.armor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn frame_decodes_mixed_update_kinds() {
        let frame: Frame = serde_json::from_value(serde_json::json!({
            "timestamp": 1700000000000i64,
            "updates": [
                {"type": "chat", "playerName": "Alice", "message": "hi", "timestamp": 1700000001000i64},
                {"type": "tile", "name": "world/t1.png", "timestamp": 1700000002000i64},
                {"type": "player", "name": "Bob", "x": 1.0, "y": 64.0, "z": -3.5,
                 "health": 20.0, "armor": 10.0}
            ],
            "players": []
        }))
        .expect("frame should decode");

        assert_eq!(frame.updates.len(), 3);
        assert!(matches!(frame.updates[0], Update::Chat(_)));
        assert!(matches!(frame.updates[1], Update::Other(_)));
        assert!(matches!(frame.updates[2], Update::Player(_)));
    }

    #[test]
    fn frame_tolerates_missing_lists() {
        let frame: Frame = serde_json::from_value(serde_json::json!({})).expect("empty frame");
        assert!(frame.updates.is_empty());
        assert!(frame.players.is_empty());
    }

    #[test]
    fn chat_record_missing_fields_is_an_error() {
        let result: std::result::Result<Frame, _> = serde_json::from_value(serde_json::json!({
            "updates": [{"type": "chat", "playerName": "Alice"}]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn chat_message_timestamp_converts_to_utc() {
        let update = ChatUpdate {
            player_name: "Alice".into(),
            message: "hi".into(),
            // 2001-09-09T01:46:40Z
            timestamp: 1_000_000_000_000,
        };
        let message = ChatMessage::from(&update);
        assert_eq!(message.timestamp.timestamp(), 1_000_000_000);
        assert_eq!(message.timestamp.hour(), 1);
        assert_eq!(message.timestamp.minute(), 46);
        assert_eq!(message.timestamp.second(), 40);
    }

    #[test]
    fn configuration_preserves_unknown_settings() {
        let config: ServerConfiguration = serde_json::from_value(serde_json::json!({
            "allowwebchat": true,
            "defaultworld": "world",
            "updaterate": 2000,
            "title": "My Server"
        }))
        .expect("config should decode");

        assert!(config.allowwebchat);
        assert_eq!(config.defaultworld, "world");
        assert_eq!(config.extra["updaterate"], 2000);
    }
}
