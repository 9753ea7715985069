//! Repository client error taxonomy.

/// Failure of one round-trip against the overlay backend.
///
/// `Transport` covers connection and I/O failures. `Rejected` and
/// `Malformed` are both protocol errors: the backend answered, but not with
/// a usable success envelope. `InvalidBaseUrl` is raised before any request
/// is made.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("http request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{message}")]
    Rejected { message: String },
    #[error("malformed response: {detail}")]
    Malformed { detail: String },
    #[error("invalid base url {url:?}: {detail}")]
    InvalidBaseUrl { url: String, detail: String },
}

impl ApiError {
    /// True for errors where the backend responded but reported failure or
    /// sent an unusable envelope.
    #[must_use]
    pub fn is_protocol(&self) -> bool {
        matches!(self, Self::Rejected { .. } | Self::Malformed { .. })
    }

    /// True for network/connection failures.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
