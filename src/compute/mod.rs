//! Indexing and validation.
//!
//! This module holds the parts of the layer that do not talk to any host
//! collaborator: the two spatial indexes and input validation.

pub mod spatial;
pub mod validation;

pub use spatial::{GeoIndex, ScreenIndex, SpatialEntry};
