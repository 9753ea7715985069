//! Presentation helpers for overlays drawn over the video and in the list.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::net::types::{DEFAULT_COLOR, DEFAULT_FONT_SIZE, DEFAULT_HEIGHT, DEFAULT_WIDTH, Overlay, OverlayKind};

pub const EMPTY_LIST_MESSAGE: &str = "No overlays created yet. Create one above!";

/// Inline CSS placing an overlay at its absolute offset inside the video
/// container. Text overlays carry size and color, image overlays carry
/// their box.
#[must_use]
pub fn overlay_style(overlay: &Overlay) -> String {
    let mut style = format!("left: {}px; top: {}px;", overlay.position_x, overlay.position_y);
    match overlay.kind {
        OverlayKind::Text => {
            let font_size = overlay.font_size.unwrap_or(DEFAULT_FONT_SIZE);
            let color = overlay.color.as_deref().unwrap_or(DEFAULT_COLOR);
            style.push_str(&format!(" font-size: {font_size}px; color: {color};"));
        }
        OverlayKind::Image => {
            let width = overlay.width.unwrap_or(DEFAULT_WIDTH);
            let height = overlay.height.unwrap_or(DEFAULT_HEIGHT);
            style.push_str(&format!(" width: {width}px; height: {height}px;"));
        }
    }
    style
}

/// List-row position caption.
#[must_use]
pub fn position_label(overlay: &Overlay) -> String {
    format!("Position: ({}, {})", overlay.position_x, overlay.position_y)
}

/// List-row badge text.
#[must_use]
pub fn kind_badge(overlay: &Overlay) -> &'static str {
    overlay.kind.as_str()
}
