//! Error types for the Dynmap client.

use thiserror::Error;

/// Errors produced by [`DynmapClient`](crate::DynmapClient) operations and
/// the underlying transport.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DynmapError {
    /// Network-level failure reaching the server.
    #[error("Failed to connect to {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    /// Server answered with a non-success HTTP status.
    #[error("Server returned HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// Response body was not the JSON shape the endpoint documents.
    #[error("Failed to decode response from {url}: {reason}")]
    Decode { url: String, reason: String },

    /// Web chat is disabled in the server configuration.
    #[error("This server has web chat disabled")]
    WebChatNotEnabled,

    /// No frame has been fetched yet. Call `update()` first.
    #[error("No frame available. Call update() first")]
    NoFrame,
}

impl DynmapError {
    /// True for failures of the HTTP transport itself (network or status).
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            DynmapError::ConnectionFailed { .. } | DynmapError::Status { .. }
        )
    }

    /// True for client-side state/precondition errors (no network involved).
    pub fn is_state(&self) -> bool {
        matches!(
            self,
            DynmapError::WebChatNotEnabled | DynmapError::NoFrame
        )
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, DynmapError>;
