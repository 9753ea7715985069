//! Overlay repository: the CRUD seam between editor state and the backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! The store, edit session and placement handler only know the
//! `OverlayRepository` trait. `HttpOverlayRepository` talks to the REST
//! backend; `memory::MemoryOverlayRepository` mirrors its semantics
//! in-process.
//!
//! ERROR HANDLING
//! ==============
//! Every endpoint answers with a `{success, data, error}` envelope. The body
//! is decoded regardless of HTTP status and the `success` flag decides the
//! outcome. Failures are logged once here and returned unchanged; nothing
//! is retried.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::types::{Acknowledgement, Envelope, Overlay, OverlayFields, OverlayId, OverlayPatch};
use crate::config::ClientConfig;

pub const LIST_FAILED: &str = "Failed to fetch overlays";
pub const GET_FAILED: &str = "Failed to fetch overlay";
pub const CREATE_FAILED: &str = "Failed to create overlay";
pub const UPDATE_FAILED: &str = "Failed to update overlay";
pub const DELETE_FAILED: &str = "Failed to delete overlay";

/// CRUD operations over the overlay collection.
#[async_trait]
pub trait OverlayRepository: Send + Sync {
    /// Fetch every overlay in backend order.
    async fn list(&self) -> Result<Vec<Overlay>, ApiError>;

    /// Fetch one overlay by id.
    async fn get(&self, id: &OverlayId) -> Result<Overlay, ApiError>;

    /// Persist a new overlay; the backend assigns its id.
    async fn create(&self, fields: &OverlayFields) -> Result<Overlay, ApiError>;

    /// Apply a partial or full field set to an existing overlay.
    async fn update(&self, id: &OverlayId, patch: &OverlayPatch) -> Result<Overlay, ApiError>;

    /// Remove an overlay.
    async fn delete(&self, id: &OverlayId) -> Result<Acknowledgement, ApiError>;
}

/// `reqwest`-backed repository for `{base_url}/overlays`.
#[derive(Clone, Debug)]
pub struct HttpOverlayRepository {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpOverlayRepository {
    /// Build a repository with the configured timeouts.
    ///
    /// # Errors
    ///
    /// Returns `Transport` if the HTTP client cannot be constructed, or
    /// `InvalidBaseUrl` if the configured API root is not a usable URL.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .build()?;
        Self::with_client(client, &config.base_url)
    }

    /// Wrap an existing client. `base_url` is the API root, e.g.
    /// `http://localhost:8000/api`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidBaseUrl` unless `base_url` is an absolute
    /// hierarchical URL.
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<Self, ApiError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let invalid = |detail: String| ApiError::InvalidBaseUrl { url: trimmed.to_owned(), detail };
        let parsed = Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
        if parsed.cannot_be_a_base() {
            return Err(invalid("not a hierarchical URL".to_owned()));
        }
        Ok(Self { client, base_url: parsed })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<Envelope<T>, ApiError> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        decode_envelope(status, &body)
    }
}

#[async_trait]
impl OverlayRepository for HttpOverlayRepository {
    async fn list(&self) -> Result<Vec<Overlay>, ApiError> {
        let url = collection_url(&self.base_url);
        tracing::debug!(%url, "fetching overlays");
        let result = self
            .send::<Vec<Overlay>>(self.client.get(url))
            .await
            .and_then(|envelope| envelope.into_data(LIST_FAILED));
        logged("fetching overlays", result)
    }

    async fn get(&self, id: &OverlayId) -> Result<Overlay, ApiError> {
        let url = item_url(&self.base_url, id);
        tracing::debug!(%url, "fetching overlay");
        let result = self
            .send::<Overlay>(self.client.get(url))
            .await
            .and_then(|envelope| envelope.into_data(GET_FAILED));
        logged("fetching overlay", result)
    }

    async fn create(&self, fields: &OverlayFields) -> Result<Overlay, ApiError> {
        let url = collection_url(&self.base_url);
        tracing::debug!(%url, kind = fields.kind.as_str(), "creating overlay");
        let result = self
            .send::<Overlay>(self.client.post(url).json(fields))
            .await
            .and_then(|envelope| envelope.into_data(CREATE_FAILED));
        logged("creating overlay", result)
    }

    async fn update(&self, id: &OverlayId, patch: &OverlayPatch) -> Result<Overlay, ApiError> {
        let url = item_url(&self.base_url, id);
        tracing::debug!(%url, "updating overlay");
        let result = self
            .send::<Overlay>(self.client.put(url).json(patch))
            .await
            .and_then(|envelope| envelope.into_data(UPDATE_FAILED));
        logged("updating overlay", result)
    }

    async fn delete(&self, id: &OverlayId) -> Result<Acknowledgement, ApiError> {
        let url = item_url(&self.base_url, id);
        tracing::debug!(%url, "deleting overlay");
        let result = self
            .send::<serde_json::Value>(self.client.delete(url))
            .await
            .and_then(|envelope| envelope.into_ack(DELETE_FAILED));
        logged("deleting overlay", result)
    }
}

fn collection_url(base_url: &Url) -> Url {
    resource_url(base_url, &["overlays"])
}

fn item_url(base_url: &Url, id: &OverlayId) -> Url {
    resource_url(base_url, &["overlays", id.as_str()])
}

/// Append percent-encoded path segments. `base_url` is hierarchical, which
/// `with_client` checks.
fn resource_url(base_url: &Url, segments: &[&str]) -> Url {
    let mut url = base_url.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

/// Decode a response body into an envelope. The HTTP status only feeds the
/// error detail; `success` inside the body is what callers act on.
fn decode_envelope<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<Envelope<T>, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::Malformed { detail: format!("HTTP {status}: {e}") })
}

fn logged<T>(action: &str, result: Result<T, ApiError>) -> Result<T, ApiError> {
    result.inspect_err(|err| tracing::error!(error = %err, "{action} failed"))
}
