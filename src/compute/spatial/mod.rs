//! Spatial indexes backing the marker layer.
//!
//! Two R-trees share one entry type ([`SpatialEntry`]):
//!
//! - [`GeoIndex`] holds a point entry per marker for the marker's whole
//!   membership and is repacked lazily once enough single-item churn has
//!   accumulated.
//! - [`ScreenIndex`] holds the on-screen footprint of every marker drawn in
//!   the last cycle and is rebuilt from scratch each cycle, so hit testing
//!   always matches what was drawn.

pub mod entry;
pub mod geo_index;
pub mod screen_index;

pub use entry::SpatialEntry;
pub use geo_index::GeoIndex;
pub use screen_index::ScreenIndex;
