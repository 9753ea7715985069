//! Networking for the overlay collection resource.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` defines the repository seam and its HTTP implementation, `memory`
//! an in-process implementation with the same semantics, `types` the wire
//! schema and `error` the failure taxonomy.

pub mod api;
pub mod error;
pub mod memory;
pub mod types;
