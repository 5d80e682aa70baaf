//! # canvas-markers-types
//!
//! Plain data types shared between the `canvas-markers` layer and its host
//! collaborators (viewport providers, drawing surfaces, marker objects).
//!
//! - **Point types**: [`LatLng`](point::LatLng) for geographic coordinates,
//!   [`ScreenPoint`](point::ScreenPoint) for container pixels
//! - **Bounds types**: [`GeoBounds`](bounds::GeoBounds) and
//!   [`ScreenBounds`](bounds::ScreenBounds), both edge-inclusive
//! - **Icon types**: [`IconOptions`](icon::IconOptions) and
//!   [`IconSize`](icon::IconSize)
//!
//! All types are serializable with Serde and convert to and from the `geo`
//! crate's primitives.
//!
//! ## Examples
//!
//! ```rust
//! use canvas_markers_types::bounds::GeoBounds;
//! use canvas_markers_types::point::LatLng;
//!
//! let view = GeoBounds::new(-74.1, 40.6, -73.9, 40.8);
//! assert!(view.contains(&LatLng::new(40.7128, -74.0060)));
//! ```

pub mod bounds;
pub mod icon;
pub mod point;
