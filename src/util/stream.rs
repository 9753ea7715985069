//! Stream URL classification for the video player.

#[cfg(test)]
#[path = "stream_test.rs"]
mod stream_test;

/// Playback path the player should take for a stream URL.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StreamKind {
    /// HTTP Live Streaming playlist (`.m3u8`).
    Hls,
    /// Anything the media element can play directly (MP4 and friends).
    Progressive,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StreamSource {
    pub url: String,
    pub kind: StreamKind,
}

impl StreamSource {
    /// Classify a user-entered URL. Blank input yields `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let url = raw.trim();
        if url.is_empty() {
            return None;
        }
        let path = url.split(['?', '#']).next().unwrap_or(url);
        let kind = if path.to_ascii_lowercase().ends_with(".m3u8") {
            StreamKind::Hls
        } else {
            StreamKind::Progressive
        };
        Some(Self { url: url.to_owned(), kind })
    }
}
