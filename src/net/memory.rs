//! In-process overlay repository.
//!
//! DESIGN
//! ======
//! Mirrors the REST backend's observable behaviour: ids are assigned on
//! create, list order is creation order, unknown ids are rejected with
//! `"Overlay not found"`. Every call is counted so callers can assert that
//! an operation never reached the repository.

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::api::OverlayRepository;
use super::error::ApiError;
use super::types::{Acknowledgement, Overlay, OverlayFields, OverlayId, OverlayPatch};

pub const NOT_FOUND: &str = "Overlay not found";
pub const DELETED: &str = "Overlay deleted successfully";

/// Number of calls received per operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub list: usize,
    pub get: usize,
    pub create: usize,
    pub update: usize,
    pub delete: usize,
}

impl CallCounts {
    #[must_use]
    pub fn total(&self) -> usize {
        self.list + self.get + self.create + self.update + self.delete
    }

    #[must_use]
    pub fn mutations(&self) -> usize {
        self.create + self.update + self.delete
    }
}

#[derive(Debug, Default)]
struct Inner {
    overlays: Vec<Overlay>,
    calls: CallCounts,
    fail_next: Option<String>,
}

impl Inner {
    fn injected_failure(&mut self) -> Result<(), ApiError> {
        match self.fail_next.take() {
            Some(message) => Err(ApiError::Rejected { message }),
            None => Ok(()),
        }
    }

    fn position(&self, id: &OverlayId) -> Result<usize, ApiError> {
        self.overlays
            .iter()
            .position(|o| &o.id == id)
            .ok_or_else(|| ApiError::Rejected { message: NOT_FOUND.to_owned() })
    }
}

#[derive(Debug, Default)]
pub struct MemoryOverlayRepository {
    inner: Mutex<Inner>,
}

impl MemoryOverlayRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with pre-existing overlays, kept in the given order.
    #[must_use]
    pub fn with_overlays(overlays: Vec<Overlay>) -> Self {
        Self { inner: Mutex::new(Inner { overlays, ..Inner::default() }) }
    }

    /// Calls received so far.
    pub async fn calls(&self) -> CallCounts {
        self.inner.lock().await.calls
    }

    /// Current backend contents.
    pub async fn snapshot(&self) -> Vec<Overlay> {
        self.inner.lock().await.overlays.clone()
    }

    /// Make the next call of any kind fail with `Rejected { message }`.
    pub async fn fail_next(&self, message: impl Into<String>) {
        self.inner.lock().await.fail_next = Some(message.into());
    }
}

#[async_trait]
impl OverlayRepository for MemoryOverlayRepository {
    async fn list(&self) -> Result<Vec<Overlay>, ApiError> {
        let mut inner = self.inner.lock().await;
        inner.calls.list += 1;
        inner.injected_failure()?;
        Ok(inner.overlays.clone())
    }

    async fn get(&self, id: &OverlayId) -> Result<Overlay, ApiError> {
        let mut inner = self.inner.lock().await;
        inner.calls.get += 1;
        inner.injected_failure()?;
        let index = inner.position(id)?;
        Ok(inner.overlays[index].clone())
    }

    async fn create(&self, fields: &OverlayFields) -> Result<Overlay, ApiError> {
        let mut inner = self.inner.lock().await;
        inner.calls.create += 1;
        inner.injected_failure()?;
        let overlay = Overlay::from_fields(OverlayId::new(Uuid::new_v4().to_string()), fields.clone());
        inner.overlays.push(overlay.clone());
        Ok(overlay)
    }

    async fn update(&self, id: &OverlayId, patch: &OverlayPatch) -> Result<Overlay, ApiError> {
        let mut inner = self.inner.lock().await;
        inner.calls.update += 1;
        inner.injected_failure()?;
        let index = inner.position(id)?;
        let overlay = &mut inner.overlays[index];
        overlay.apply(patch);
        Ok(overlay.clone())
    }

    async fn delete(&self, id: &OverlayId) -> Result<Acknowledgement, ApiError> {
        let mut inner = self.inner.lock().await;
        inner.calls.delete += 1;
        inner.injected_failure()?;
        let index = inner.position(id)?;
        inner.overlays.remove(index);
        Ok(Acknowledgement { message: Some(DELETED.to_owned()) })
    }
}
