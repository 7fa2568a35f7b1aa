//! `DynmapClient` — configuration, polling, frame diffing, chat.

use log::{debug, trace};

use crate::clock::{Clock, SystemClock};
use crate::error::{DynmapError, Result};
use crate::transport::{HttpTransport, Transport};
use crate::types::{
    ChatMessage, Frame, PlayerStatus, SendMessageRequest, SendMessageResponse,
    ServerConfiguration, Update,
};

/// Endpoint paths, relative to the server base address.
pub mod endpoints {
    pub const CONFIGURATION: &str = "/up/configuration";
    pub const SEND_MESSAGE: &str = "/up/sendmessage";

    /// `/up/world/{world}/{timestamp}` — one snapshot of world state.
    pub fn world(world: &str, timestamp: u64) -> String {
        format!("/up/world/{world}/{timestamp}")
    }
}

/// Blocking client for one Dynmap server.
///
/// Construction fetches the server configuration once; [`update`] fetches a
/// fresh frame and is the only operation that mutates the stored frame or
/// the two poll timestamps. [`recent_chat_messages`] and [`players`] are
/// read-only views over the most recent frame.
///
/// Not internally synchronized — mutation goes through `&mut self`, so
/// concurrent callers must serialize access themselves (one client per
/// thread, or an external mutex).
///
/// [`update`]: DynmapClient::update
/// [`recent_chat_messages`]: DynmapClient::recent_chat_messages
/// [`players`]: DynmapClient::players
pub struct DynmapClient {
    server: String,
    configuration: ServerConfiguration,
    transport: Box<dyn Transport>,
    clock: Box<dyn Clock>,
    last_frame: Option<Frame>,
    /// Wall-clock seconds at the most recent `update()`.
    last_frame_time: u64,
    /// Wall-clock seconds at the `update()` before that. The chat-diffing
    /// cutoff: an update is "new" iff its timestamp lands strictly after
    /// this.
    last_last_frame_time: u64,
}

impl DynmapClient {
    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    /// Connect to a Dynmap server at `server` (e.g. `"https://map.example.net"`)
    /// and fetch its configuration.
    ///
    /// Fails if the configuration endpoint is unreachable or its payload
    /// does not decode.
    pub fn new(server: &str) -> Result<Self> {
        Self::with_parts(server, Box::new(HttpTransport::new()), Box::new(SystemClock))
    }

    /// Same as [`new`](DynmapClient::new) with an injected transport and
    /// clock.
    pub fn with_parts(
        server: &str,
        transport: Box<dyn Transport>,
        clock: Box<dyn Clock>,
    ) -> Result<Self> {
        let server = server.trim_end_matches('/').to_string();
        let url = format!("{server}{}", endpoints::CONFIGURATION);
        let configuration = decode(&url, transport.get(&url)?)?;
        debug!("Connected to {server}");

        let now = clock.now_secs();
        Ok(Self {
            server,
            configuration,
            transport,
            clock,
            last_frame: None,
            last_frame_time: now,
            last_last_frame_time: now,
        })
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn server(&self) -> &str {
        &self.server
    }

    pub fn configuration(&self) -> &ServerConfiguration {
        &self.configuration
    }

    /// Wall-clock seconds of the most recent poll.
    pub fn last_frame_time(&self) -> u64 {
        self.last_frame_time
    }

    /// Wall-clock seconds of the poll before the most recent one.
    pub fn last_last_frame_time(&self) -> u64 {
        self.last_last_frame_time
    }

    // -----------------------------------------------------------------------
    // Polling
    // -----------------------------------------------------------------------

    /// Fetch a new frame, replacing the stored one.
    ///
    /// `world` defaults to the configuration's `defaultworld`. Advances the
    /// two poll timestamps: the previous fetch time becomes the chat-diffing
    /// cutoff.
    pub fn update(&mut self, world: Option<&str>) -> Result<()> {
        self.last_last_frame_time = self.last_frame_time;
        self.last_frame_time = self.clock.now_secs();

        let world = world.unwrap_or(&self.configuration.defaultworld);
        let url = format!(
            "{}{}",
            self.server,
            endpoints::world(world, self.last_frame_time)
        );

        let frame: Frame = decode(&url, self.transport.get(&url)?)?;
        trace!(
            "Frame for {world}: {} updates, {} players",
            frame.updates.len(),
            frame.players.len()
        );
        self.last_frame = Some(frame);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Chat
    // -----------------------------------------------------------------------

    /// Post a chat message as `player` (defaults to `"unknown"`).
    ///
    /// Returns `Ok(true)` when the server reports success (`error == "none"`),
    /// `Ok(false)` for any other reported error string. Fails with
    /// [`DynmapError::WebChatNotEnabled`] — before any network call — when
    /// the server configuration has web chat disabled.
    pub fn send_chat_message(&self, message: &str, player: Option<&str>) -> Result<bool> {
        if !self.configuration.allowwebchat {
            return Err(DynmapError::WebChatNotEnabled);
        }

        let request = SendMessageRequest {
            name: player.unwrap_or("unknown").to_string(),
            message: message.to_string(),
        };
        let url = format!("{}{}", self.server, endpoints::SEND_MESSAGE);
        let body = serde_json::to_value(&request).map_err(|e| DynmapError::Decode {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        let response: SendMessageResponse = decode(&url, self.transport.post(&url, &body)?)?;
        Ok(response.error == "none")
    }

    /// Chat messages from the current frame that are new since the
    /// second-to-last poll, in frame order.
    ///
    /// "New" means the update's millisecond timestamp, as float seconds, is
    /// strictly greater than [`last_last_frame_time`]. The comparison is
    /// against client wall-clock poll times, so server/client clock drift
    /// can drop or duplicate messages at the boundary; this matches the
    /// protocol's established behavior and is kept as-is.
    ///
    /// Fails with [`DynmapError::NoFrame`] before the first
    /// [`update`](DynmapClient::update).
    ///
    /// [`last_last_frame_time`]: DynmapClient::last_last_frame_time
    pub fn recent_chat_messages(&self) -> Result<impl Iterator<Item = ChatMessage> + '_> {
        let frame = self.last_frame.as_ref().ok_or(DynmapError::NoFrame)?;
        let cutoff = self.last_last_frame_time as f64;

        Ok(frame.updates.iter().filter_map(move |update| match update {
            Update::Chat(chat) if chat.timestamp as f64 / 1000.0 > cutoff => {
                Some(ChatMessage::from(chat))
            }
            _ => None,
        }))
    }

    // -----------------------------------------------------------------------
    // Players
    // -----------------------------------------------------------------------

    /// Every player currently online per the current frame.
    ///
    /// No diffing: each call re-yields the full player list of the latest
    /// frame. Fails with [`DynmapError::NoFrame`] before the first
    /// [`update`](DynmapClient::update).
    pub fn players(&self) -> Result<impl Iterator<Item = PlayerStatus> + '_> {
        let frame = self.last_frame.as_ref().ok_or(DynmapError::NoFrame)?;

        Ok(frame.players.iter().filter_map(|record| match record {
            Update::Player(player) => Some(PlayerStatus::from(player)),
            _ => None,
        }))
    }
}

/// Decode a JSON value into a typed payload, tagging failures with the URL
/// that produced the value.
fn decode<T: serde::de::DeserializeOwned>(url: &str, value: serde_json::Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| DynmapError::Decode {
        url: url.to_string(),
        reason: e.to_string(),
    })
}
