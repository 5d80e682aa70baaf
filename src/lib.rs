//! Canvas marker layer: draw and pick tens of thousands of point markers on a
//! single surface.
//!
//! Markers are indexed twice. A geographic R-tree holds every member and is
//! queried with the viewport bounds on each redraw; a screen-space R-tree holds
//! only the footprints drawn in the last cycle and answers click and hover
//! hit tests.
//!
//! ```rust
//! use canvas_markers::prelude::*;
//! use canvas_markers::render::{IconImage, ImageLoadNotifier};
//! use std::rc::Rc;
//!
//! struct Flat;
//!
//! impl ViewportProvider for Flat {
//!     fn container_bounds(&self) -> ScreenBounds {
//!         ScreenBounds::from_size(360.0, 180.0)
//!     }
//!     fn project(&self, at: LatLng) -> ScreenPoint {
//!         ScreenPoint::new(at.lng + 180.0, 90.0 - at.lat)
//!     }
//!     fn unproject(&self, p: ScreenPoint) -> LatLng {
//!         LatLng::new(90.0 - p.y, p.x - 180.0)
//!     }
//! }
//!
//! struct Canvas;
//!
//! impl DrawingSurface for Canvas {
//!     fn clear(&mut self) {}
//!     fn begin_frame(&mut self, _clip: Option<&ScreenBounds>) {}
//!     fn draw_image(&mut self, _image: &IconImage, _at: ScreenPoint, _size: IconSize) {}
//! }
//!
//! struct Instant;
//!
//! impl ImageLoader for Instant {
//!     fn load(&mut self, _url: &str, notifier: ImageLoadNotifier) {
//!         notifier.loaded(IconImage::new(1, 1, vec![0u8; 4]));
//!     }
//! }
//!
//! struct Pin(LatLng, IconOptions);
//!
//! impl Marker for Pin {
//!     fn lat_lng(&self) -> LatLng { self.0 }
//!     fn icon(&self) -> &IconOptions { &self.1 }
//!     fn fire(&self, _event: &MarkerEvent) {}
//! }
//!
//! let mut layer = LayerBuilder::new().build_attached(Flat, Canvas, Instant)?;
//! let pin = Rc::new(Pin(LatLng::new(0.0, 0.0), IconOptions::new("pin.png", 10.0, 10.0)));
//! let id = layer.add_marker(pin, None)?;
//!
//! assert_eq!(layer.handle_click(&PointerEvent::click(180.0, 90.0)), Some(id));
//! # Ok::<(), canvas_markers::LayerError>(())
//! ```

pub mod builder;
pub mod compute;
pub mod config;
pub mod error;
pub mod events;
pub mod layer;
pub mod marker;
pub mod render;

pub use builder::LayerBuilder;
pub use config::LayerConfig;
pub use error::{LayerError, Result};
pub use events::{MarkerEvent, MarkerEventKind, PointerEvent, PointerKind, ViewEvent};
pub use layer::{GroupRegistry, HitTester, HoverTransition, LayerStats, MarkerLayer};
pub use marker::{Marker, MarkerId, MarkerRef};
pub use render::{DrawingSurface, IconCache, IconImage, ImageLoader, ViewportProvider};

pub use compute::spatial::{GeoIndex, ScreenIndex, SpatialEntry};

pub use canvas_markers_types::bounds::{GeoBounds, ScreenBounds};
pub use canvas_markers_types::icon::{IconOptions, IconSize};
pub use canvas_markers_types::point::{LatLng, ScreenPoint};

pub use geo::{Point, Rect};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{LayerBuilder, LayerConfig, LayerError, MarkerLayer, Result};

    pub use crate::{Marker, MarkerEvent, MarkerEventKind, MarkerId, MarkerRef};

    pub use crate::{DrawingSurface, ImageLoader, ViewportProvider};

    pub use crate::{PointerEvent, ViewEvent};

    pub use crate::{GeoBounds, IconOptions, IconSize, LatLng, ScreenBounds, ScreenPoint};
}
