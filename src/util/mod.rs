//! Pure presentation and coercion helpers.

pub mod coerce;
pub mod render;
pub mod stream;
