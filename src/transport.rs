//! Blocking HTTP transport.
//!
//! `DynmapClient` talks to the server through the [`Transport`] trait so the
//! HTTP layer stays swappable — [`HttpTransport`] is the production
//! implementation, tests substitute a recording mock.

use log::debug;

use crate::error::{DynmapError, Result};

/// A blocking request/response channel carrying JSON both ways.
///
/// Implementations perform no retries and no caching; every failure maps to
/// a [`DynmapError`] and propagates to the caller.
pub trait Transport: Send + Sync {
    /// Issue a GET and decode the response body as JSON.
    fn get(&self, url: &str) -> Result<serde_json::Value>;

    /// Issue a POST with a JSON body and decode the response body as JSON.
    fn post(&self, url: &str, body: &serde_json::Value) -> Result<serde_json::Value>;
}

/// Production transport over [`reqwest::blocking::Client`].
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }

    fn decode(url: &str, response: reqwest::blocking::Response) -> Result<serde_json::Value> {
        let status = response.status();
        if !status.is_success() {
            return Err(DynmapError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.json().map_err(|e| DynmapError::Decode {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<serde_json::Value> {
        debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| DynmapError::ConnectionFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        Self::decode(url, response)
    }

    fn post(&self, url: &str, body: &serde_json::Value) -> Result<serde_json::Value> {
        debug!("POST {url}");
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .map_err(|e| DynmapError::ConnectionFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        Self::decode(url, response)
    }
}
