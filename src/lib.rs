//! Dynmap web map API client.
//!
//! Blocking client for the HTTP/JSON API exposed by the
//! [Dynmap](https://github.com/webbukkit/dynmap) Minecraft web map plugin:
//! server configuration, world-state snapshots ("frames") with online
//! players and chat, and posting chat messages back.
//!
//! ## Architecture
//!
//! ```text
//! DynmapClient  (client.rs)  ← polling, frame diffing, chat
//!   ├── Transport  (transport.rs)  ← blocking HTTP, JSON in/out
//!   ├── Clock      (clock.rs)      ← poll timestamps
//!   └── types.rs                   ← wire payloads + derived values
//! ```
//!
//! The client keeps the two most recent poll times; chat messages in a frame
//! count as "new" when they land strictly after the second-to-last poll.
//!
//! ## Usage
//!
//! ```no_run
//! use dynmap_client::DynmapClient;
//!
//! # fn main() -> dynmap_client::Result<()> {
//! let mut client = DynmapClient::new("https://map.example.net")?;
//!
//! client.update(None)?; // poll the default world
//! for player in client.players()? {
//!     println!("{} at {}", player.name, player.position);
//! }
//! for msg in client.recent_chat_messages()? {
//!     println!("<{}> {}", msg.player_name, msg.message);
//! }
//!
//! client.send_chat_message("hello from the web", Some("console"))?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod clock;
pub mod error;
pub mod transport;
pub mod types;

// Convenience re-exports
pub use client::DynmapClient;
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{DynmapError, Result};
pub use transport::{HttpTransport, Transport};
pub use types::{
    ChatMessage, ChatUpdate, Frame, PlayerStatus, PlayerUpdate, ServerConfiguration, Update, Vec3,
};
