//! Host collaborators and the drawing side of the layer.
//!
//! The layer never owns a map or a canvas. It talks to them through three
//! capability traits:
//!
//! - [`ViewportProvider`]: bounds and projection of the current view
//! - [`DrawingSurface`]: clearing, clipping and image blits
//! - [`ImageLoader`]: asynchronous icon image fetches
//!
//! [`IconCache`] and [`cull`] are the pieces of the draw cycle built on top
//! of them.

pub mod culler;
pub mod icon_cache;
pub mod loader;

pub use culler::{CulledMarker, cull};
pub use icon_cache::{DrawDecision, FlushedIcon, IconCache, IconStatus, QueuedDraw};
pub use loader::{IconImage, ImageLoadEvent, ImageLoadNotifier, ImageLoader};

use canvas_markers_types::bounds::{GeoBounds, ScreenBounds};
use canvas_markers_types::icon::IconSize;
use canvas_markers_types::point::{LatLng, ScreenPoint};

/// The map view the layer is attached to.
pub trait ViewportProvider {
    /// Size of the map container in pixels, anchored at the origin.
    fn container_bounds(&self) -> ScreenBounds;

    /// Geographic coordinate to container pixels.
    fn project(&self, lat_lng: LatLng) -> ScreenPoint;

    /// Container pixels to geographic coordinate.
    fn unproject(&self, point: ScreenPoint) -> LatLng;

    /// Geographic bounds of the visible area.
    ///
    /// Defaults to unprojecting the container's corners.
    fn bounds(&self) -> GeoBounds {
        let container = self.container_bounds();
        GeoBounds::from_corners(self.unproject(container.min), self.unproject(container.max))
    }

    /// Container pixels to drawing-surface pixels. Identity unless the
    /// surface is offset from the container (e.g. mid-pan).
    fn container_to_layer_point(&self, point: ScreenPoint) -> ScreenPoint {
        point
    }

    /// True while the user drags the map or a zoom animation runs.
    fn is_interacting(&self) -> bool {
        false
    }
}

/// The single surface all markers are drawn on.
pub trait DrawingSurface {
    /// Wipe the whole surface.
    fn clear(&mut self);

    /// Start a draw cycle. With `clip`, only that region is cleared and
    /// drawn into until [`end_frame`](DrawingSurface::end_frame).
    fn begin_frame(&mut self, clip: Option<&ScreenBounds>);

    fn end_frame(&mut self) {}

    /// Blit `image` with its top-left corner at `top_left`, scaled to `size`.
    fn draw_image(&mut self, image: &IconImage, top_left: ScreenPoint, size: IconSize);

    /// Switch the pointer cursor while an interactive marker is hovered.
    fn set_interactive_cursor(&mut self, _interactive: bool) {}
}
