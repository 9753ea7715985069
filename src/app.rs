//! Editor context for the single-page overlay view.
//!
//! DESIGN
//! ======
//! `Editor` owns everything the page used to keep as ambient state: the
//! overlay store, the edit session, the busy flag, the stream URL and the
//! registered video container. Operations take `&mut self`, so one
//! round-trip settles before the next begins. Interactive prompts are
//! injected through `Prompt`.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use crate::net::api::OverlayRepository;
use crate::net::error::ApiError;
use crate::net::types::{Overlay, OverlayId};
use crate::state::edit::{EditError, EditSession};
use crate::state::overlays::OverlayStore;
use crate::state::placement::{self, ContainerRect, DropEvent, DropOutcome};
use crate::util::stream::StreamSource;

pub const EMPTY_CONTENT_ALERT: &str = "Please enter content for the overlay";
pub const DELETE_CONFIRM: &str = "Delete this overlay?";
pub const DELETE_FAILED_ALERT: &str = "Failed to delete overlay";

/// Blocking user prompts.
pub trait Prompt {
    /// Ask a yes/no question; `true` means proceed.
    fn confirm(&mut self, message: &str) -> bool;
    /// Show a message the user must dismiss.
    fn alert(&mut self, message: &str);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The user declined the confirmation; no request was sent.
    Declined,
}

pub struct Editor<R> {
    repo: R,
    store: OverlayStore,
    session: EditSession,
    loading: bool,
    stream_input: String,
    video: Option<StreamSource>,
    container: Option<ContainerRect>,
}

impl<R: OverlayRepository> Editor<R> {
    #[must_use]
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            store: OverlayStore::new(),
            session: EditSession::new(),
            loading: false,
            stream_input: String::new(),
            video: None,
            container: None,
        }
    }

    #[must_use]
    pub fn repo(&self) -> &R {
        &self.repo
    }

    #[must_use]
    pub fn store(&self) -> &OverlayStore {
        &self.store
    }

    #[must_use]
    pub fn overlays(&self) -> &[Overlay] {
        self.store.overlays()
    }

    #[must_use]
    pub fn session(&self) -> &EditSession {
        &self.session
    }

    /// Form input goes through the session directly.
    pub fn session_mut(&mut self) -> &mut EditSession {
        &mut self.session
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    // =========================================================================
    // STREAM
    // =========================================================================

    pub fn set_stream_input(&mut self, url: &str) {
        url.clone_into(&mut self.stream_input);
    }

    #[must_use]
    pub fn stream_input(&self) -> &str {
        &self.stream_input
    }

    /// Hand the typed URL to the player. Blank input unloads the video.
    pub fn load_stream(&mut self) -> Option<&StreamSource> {
        self.video = StreamSource::parse(&self.stream_input);
        if let Some(source) = &self.video {
            tracing::info!(url = %source.url, kind = ?source.kind, "stream loaded");
        }
        self.video.as_ref()
    }

    #[must_use]
    pub fn video(&self) -> Option<&StreamSource> {
        self.video.as_ref()
    }

    // =========================================================================
    // VIDEO CONTAINER
    // =========================================================================

    /// Record the container's current bounding rectangle. Drops are ignored
    /// until one is registered.
    pub fn register_container(&mut self, rect: ContainerRect) {
        self.container = Some(rect);
    }

    pub fn clear_container(&mut self) {
        self.container = None;
    }

    #[must_use]
    pub fn container(&self) -> Option<&ContainerRect> {
        self.container.as_ref()
    }

    // =========================================================================
    // OVERLAYS
    // =========================================================================

    /// Reload the overlay list.
    ///
    /// # Errors
    ///
    /// Returns the repository error; the previous list stays on screen.
    pub async fn load_overlays(&mut self) -> Result<(), ApiError> {
        self.loading = true;
        let result = self.store.refresh(&self.repo).await.map(|_| ());
        self.loading = false;
        if let Err(err) = &result {
            tracing::debug!(error = %err, "keeping previous overlays");
        }
        result
    }

    /// Target the overlay with `id` for editing. Returns `false` if it is
    /// not in the current list.
    pub fn select_for_edit(&mut self, id: &OverlayId) -> bool {
        let Some(overlay) = self.store.find(id) else {
            return false;
        };
        self.session.begin_edit(overlay.clone());
        true
    }

    pub fn cancel_edit(&mut self) {
        self.session.cancel();
    }

    /// Submit the form: create or update from the draft.
    ///
    /// # Errors
    ///
    /// `EmptyContent` after alerting the user, or the repository error.
    pub async fn save(&mut self, prompt: &mut impl Prompt) -> Result<Overlay, EditError> {
        if let Err(err) = self.session.validate() {
            prompt.alert(EMPTY_CONTENT_ALERT);
            return Err(err);
        }

        self.loading = true;
        let result = self.session.commit(&self.repo, &mut self.store).await;
        self.loading = false;
        result
    }

    /// Reposition an overlay dropped onto the video container.
    ///
    /// # Errors
    ///
    /// Returns the repository error from the position update.
    pub async fn drop_overlay(&mut self, event: &DropEvent) -> Result<DropOutcome, ApiError> {
        self.loading = true;
        let result = placement::handle_drop(&self.repo, &mut self.store, self.container.as_ref(), event).await;
        self.loading = false;
        result
    }

    /// Delete an overlay after the user confirms.
    ///
    /// # Errors
    ///
    /// Returns the repository error after alerting the user.
    pub async fn delete_overlay(&mut self, id: &OverlayId, prompt: &mut impl Prompt) -> Result<DeleteOutcome, ApiError> {
        if !prompt.confirm(DELETE_CONFIRM) {
            return Ok(DeleteOutcome::Declined);
        }

        self.loading = true;
        let result = self.repo.delete(id).await;
        if let Err(err) = result {
            self.loading = false;
            tracing::debug!(%id, "delete failed; alerting user");
            prompt.alert(DELETE_FAILED_ALERT);
            return Err(err);
        }
        tracing::info!(%id, "overlay deleted");

        if let Err(err) = self.store.refresh(&self.repo).await {
            tracing::debug!(error = %err, "reload after delete failed; keeping previous overlays");
        }
        self.loading = false;
        Ok(DeleteOutcome::Deleted)
    }
}
