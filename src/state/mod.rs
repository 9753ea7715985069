//! Editor state: the overlay collection, the edit session and drag placement.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every mutation goes through the repository and is followed by a full
//! `OverlayStore::refresh`; nothing here patches the store locally.

pub mod edit;
pub mod overlays;
pub mod placement;
