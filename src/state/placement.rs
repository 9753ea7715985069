//! Drag-and-drop placement of overlays onto the video container.
//!
//! A list row starts a drag carrying a `DragPayload`; dropping over the
//! video converts the pointer position into container-relative pixels and
//! issues a position-only update followed by a store reload.

#[cfg(test)]
#[path = "placement_test.rs"]
mod placement_test;

use crate::net::api::OverlayRepository;
use crate::net::error::ApiError;
use crate::net::types::{Overlay, OverlayId, OverlayPatch};
use crate::state::overlays::OverlayStore;
use crate::util::coerce::round_px;

/// Data transferred from drag start to drop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragPayload {
    pub overlay_id: OverlayId,
}

impl DragPayload {
    /// Payload for dragging `overlay` out of the list.
    #[must_use]
    pub fn drag_start(overlay: &Overlay) -> Self {
        Self { overlay_id: overlay.id.clone() }
    }
}

/// Bounding rectangle of the video container in client coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ContainerRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// A drop gesture in client coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct DropEvent {
    pub client_x: f64,
    pub client_y: f64,
    /// `None` when the drag did not originate from an overlay row.
    pub payload: Option<DragPayload>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropIgnored {
    /// No video container is registered.
    NoContainer,
    /// The drop carried no overlay id.
    NoPayload,
    /// The id is not in the current store snapshot.
    UnknownOverlay(OverlayId),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    Moved(Overlay),
    Ignored(DropIgnored),
}

/// Container-relative pixel offset of a drop. Not clamped: drops past the
/// container edges produce negative or oversized offsets.
#[must_use]
pub fn drop_position(event: &DropEvent, rect: &ContainerRect) -> (i32, i32) {
    (round_px(event.client_x - rect.left), round_px(event.client_y - rect.top))
}

/// Move the dropped overlay to the pointer position.
///
/// # Errors
///
/// Returns the repository error from the position update.
pub async fn handle_drop<R>(
    repo: &R,
    store: &mut OverlayStore,
    container: Option<&ContainerRect>,
    event: &DropEvent,
) -> Result<DropOutcome, ApiError>
where
    R: OverlayRepository + ?Sized,
{
    let Some(rect) = container else {
        return Ok(DropOutcome::Ignored(DropIgnored::NoContainer));
    };
    let Some(payload) = &event.payload else {
        return Ok(DropOutcome::Ignored(DropIgnored::NoPayload));
    };
    if store.find(&payload.overlay_id).is_none() {
        tracing::debug!(id = %payload.overlay_id, "drop for overlay not in store; ignoring");
        return Ok(DropOutcome::Ignored(DropIgnored::UnknownOverlay(payload.overlay_id.clone())));
    }

    let (x, y) = drop_position(event, rect);
    let moved = repo
        .update(&payload.overlay_id, &OverlayPatch::position(x, y))
        .await?;
    tracing::info!(id = %moved.id, x, y, "overlay repositioned");

    if let Err(err) = store.refresh(repo).await {
        tracing::debug!(error = %err, "reload after drop failed; keeping previous overlays");
    }
    Ok(DropOutcome::Moved(moved))
}
