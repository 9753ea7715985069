//! # overlay-editor
//!
//! State and networking core of a livestream overlay editor: text and image
//! overlays positioned over a video, persisted through a REST collection
//! resource.
//!
//! SYSTEM CONTEXT
//! ==============
//! User gestures reach either the edit session (`state::edit`) or the drag
//! placement handler (`state::placement`). Both call the repository
//! (`net::api`) and then reload the collection store (`state::overlays`)
//! wholesale. `app::Editor` owns these pieces for one page session.

pub mod app;
pub mod config;
pub mod net;
pub mod state;
pub mod util;

pub use app::{DeleteOutcome, Editor, Prompt};
pub use config::{ClientConfig, ConfigError};
pub use net::api::{HttpOverlayRepository, OverlayRepository};
pub use net::error::ApiError;
pub use net::memory::MemoryOverlayRepository;
pub use net::types::{Acknowledgement, Overlay, OverlayFields, OverlayId, OverlayKind, OverlayPatch};
pub use state::edit::{EditError, EditMode, EditSession, FormField};
pub use state::overlays::OverlayStore;
pub use state::placement::{ContainerRect, DragPayload, DropEvent, DropIgnored, DropOutcome};
