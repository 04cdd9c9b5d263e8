//! Client for the remote section service.
//!
//! Three request/response exchanges, each attempted once:
//!
//! - `GET  /api/sections`          full ordered listing
//! - `POST /api/sections`          create from `{title, content}`
//! - `POST /api/sections/reorder`  replace the order with `{order: [...]}`
//!
//! Calls block; the app runs them off the UI thread (see `app::effects`).

use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::section::{NewSection, ReorderRequest, Section, SectionId};

pub const DEFAULT_SERVER: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// A remote call failed. Nothing is retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RemoteError {
    #[error("could not reach section service: {0}")]
    Transport(String),

    #[error("section service returned {status} {reason}")]
    Status { status: i32, reason: String },

    #[error("unexpected response from section service: {0}")]
    Decode(String),
}

/// The three operations the editor needs from the service.
pub trait SectionRemote: Send + Sync {
    /// Fetch every section in the server's order.
    ///
    /// # Errors
    /// Any transport failure, non-2xx status, or undecodable body.
    fn load_all(&self) -> Result<Vec<Section>, RemoteError>;

    /// Create a section; the server assigns the id.
    ///
    /// # Errors
    /// Any transport failure, non-2xx status, or undecodable body.
    fn create_section(&self, title: &str, content: &str) -> Result<Section, RemoteError>;

    /// Replace the server's order with `order` wholesale.
    ///
    /// # Errors
    /// Any transport failure or non-2xx status.
    fn persist_order(&self, order: &[SectionId]) -> Result<(), RemoteError>;
}

/// HTTP implementation of [`SectionRemote`].
#[derive(Debug, Clone)]
pub struct SyncClient {
    base_url: String,
    timeout: Duration,
}

impl SyncClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn timeout_secs(&self) -> u64 {
        self.timeout.as_secs().max(1)
    }

    fn send(&self, request: minreq::Request) -> Result<minreq::Response, RemoteError> {
        let response = request
            .with_timeout(self.timeout_secs())
            .send()
            .map_err(|err| RemoteError::Transport(err.to_string()))?;
        if (200..300).contains(&response.status_code) {
            Ok(response)
        } else {
            Err(RemoteError::Status {
                status: response.status_code,
                reason: response.reason_phrase.clone(),
            })
        }
    }

    fn post_json<T: serde::Serialize>(&self, path: &str, body: &T) -> Result<minreq::Response, RemoteError> {
        let request = minreq::post(self.url(path))
            .with_json(body)
            .map_err(|err| RemoteError::Decode(err.to_string()))?;
        self.send(request)
    }
}

fn decode<T: DeserializeOwned>(response: &minreq::Response) -> Result<T, RemoteError> {
    let body = response
        .as_str()
        .map_err(|err| RemoteError::Decode(err.to_string()))?;
    serde_json::from_str(body).map_err(|err| RemoteError::Decode(err.to_string()))
}

impl SectionRemote for SyncClient {
    fn load_all(&self) -> Result<Vec<Section>, RemoteError> {
        let response = self.send(minreq::get(self.url("/api/sections")))?;
        let sections: Vec<Section> = decode(&response)?;
        tracing::info!(count = sections.len(), "sync.load_all");
        Ok(sections)
    }

    fn create_section(&self, title: &str, content: &str) -> Result<Section, RemoteError> {
        let response = self.post_json("/api/sections", &NewSection { title, content })?;
        let section: Section = decode(&response)?;
        tracing::info!(id = %section.id, "sync.create_section");
        Ok(section)
    }

    fn persist_order(&self, order: &[SectionId]) -> Result<(), RemoteError> {
        self.post_json("/api/sections/reorder", &ReorderRequest { order })?;
        tracing::info!(count = order.len(), "sync.persist_order");
        Ok(())
    }
}
