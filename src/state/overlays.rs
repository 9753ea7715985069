//! Collection store: the session's last-known-good overlay list.
//!
//! DESIGN
//! ======
//! The store is replaced wholesale from `list()` and never patched locally,
//! so after any refresh it equals what the backend returned at that
//! instant. A failed refresh keeps the previous snapshot.

#[cfg(test)]
#[path = "overlays_test.rs"]
mod overlays_test;

use crate::net::api::OverlayRepository;
use crate::net::error::ApiError;
use crate::net::types::{Overlay, OverlayId};

#[derive(Clone, Debug, Default)]
pub struct OverlayStore {
    /// Overlays in backend list order.
    overlays: Vec<Overlay>,
    /// Bumped on every successful refresh so views can detect new snapshots.
    refresh_seq: u64,
}

impl OverlayStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn overlays(&self) -> &[Overlay] {
        &self.overlays
    }

    #[must_use]
    pub fn find(&self, id: &OverlayId) -> Option<&Overlay> {
        self.overlays.iter().find(|o| &o.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    #[must_use]
    pub fn refresh_seq(&self) -> u64 {
        self.refresh_seq
    }

    /// Reload every overlay from the repository.
    ///
    /// # Errors
    ///
    /// Returns the repository error; the previous snapshot is kept.
    pub async fn refresh<R>(&mut self, repo: &R) -> Result<&[Overlay], ApiError>
    where
        R: OverlayRepository + ?Sized,
    {
        let overlays = repo.list().await?;
        tracing::debug!(count = overlays.len(), "overlay store refreshed");
        self.overlays = overlays;
        self.refresh_seq += 1;
        Ok(&self.overlays)
    }
}
