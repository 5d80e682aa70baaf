//! Bounding-box entries stored in both marker indexes.

use crate::marker::MarkerId;
use canvas_markers_types::bounds::ScreenBounds;
use canvas_markers_types::icon::IconSize;
use canvas_markers_types::point::{LatLng, ScreenPoint};
use rstar::{AABB, RTreeObject};

/// An axis-aligned box tagged with the marker it belongs to.
///
/// The same type backs both indexes:
/// - geographic entries are degenerate boxes at `(lng, lat)`
/// - footprint entries cover the icon's on-screen rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialEntry {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub marker: MarkerId,
}

impl SpatialEntry {
    /// Degenerate entry at a marker's geographic coordinate.
    pub fn point(marker: MarkerId, lat_lng: LatLng) -> Self {
        Self {
            min_x: lat_lng.lng,
            min_y: lat_lng.lat,
            max_x: lat_lng.lng,
            max_y: lat_lng.lat,
            marker,
        }
    }

    /// Footprint of an icon of `size` centered on `center`.
    pub fn footprint(marker: MarkerId, center: ScreenPoint, size: IconSize) -> Self {
        let (half_w, half_h) = size.half();
        Self {
            min_x: center.x - half_w,
            min_y: center.y - half_h,
            max_x: center.x + half_w,
            max_y: center.y + half_h,
            marker,
        }
    }

    pub fn lat_lng(&self) -> LatLng {
        LatLng::new(self.min_y, self.min_x)
    }

    pub fn screen_bounds(&self) -> ScreenBounds {
        ScreenBounds {
            min: ScreenPoint::new(self.min_x, self.min_y),
            max: ScreenPoint::new(self.max_x, self.max_y),
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners([self.min_x, self.min_y], [self.max_x, self.max_y])
    }
}

/// Envelope for an edge-inclusive query rectangle.
pub(crate) fn query_envelope(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> AABB<[f64; 2]> {
    AABB::from_corners([min_x, min_y], [max_x, max_y])
}
