use crate::point::{LatLng, ScreenPoint};
use geo::Rect;
use serde::{Deserialize, Serialize};

/// Geographic viewport bounds (west, south, east, north) in degrees.
///
/// Wraps a `geo::Rect`, so corners are normalised on construction. Containment
/// is inclusive on every edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    /// The underlying geometric rectangle (x = longitude, y = latitude)
    pub rect: Rect<f64>,
}

impl GeoBounds {
    /// Create bounds from the four edges.
    ///
    /// # Examples
    ///
    /// ```
    /// use canvas_markers_types::bounds::GeoBounds;
    ///
    /// let bounds = GeoBounds::new(-10.0, -5.0, 10.0, 5.0);
    /// assert_eq!(bounds.west(), -10.0);
    /// assert_eq!(bounds.north(), 5.0);
    /// ```
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            rect: Rect::new(
                geo::coord! { x: west, y: south },
                geo::coord! { x: east, y: north },
            ),
        }
    }

    /// Bounds spanning two arbitrary corners, e.g. the unprojected top-left and
    /// bottom-right of a container.
    pub fn from_corners(a: LatLng, b: LatLng) -> Self {
        Self {
            rect: Rect::new(a, b),
        }
    }

    pub fn from_rect(rect: Rect<f64>) -> Self {
        Self { rect }
    }

    pub fn west(&self) -> f64 {
        self.rect.min().x
    }

    pub fn south(&self) -> f64 {
        self.rect.min().y
    }

    pub fn east(&self) -> f64 {
        self.rect.max().x
    }

    pub fn north(&self) -> f64 {
        self.rect.max().y
    }

    pub fn is_finite(&self) -> bool {
        [self.west(), self.south(), self.east(), self.north()]
            .iter()
            .all(|v| v.is_finite())
    }

    /// Check if a coordinate lies within the bounds, edges included.
    pub fn contains(&self, lat_lng: &LatLng) -> bool {
        lat_lng.lng >= self.west()
            && lat_lng.lng <= self.east()
            && lat_lng.lat >= self.south()
            && lat_lng.lat <= self.north()
    }

    pub fn intersects(&self, other: &GeoBounds) -> bool {
        !(self.east() < other.west()
            || self.west() > other.east()
            || self.north() < other.south()
            || self.south() > other.north())
    }
}

impl From<Rect<f64>> for GeoBounds {
    fn from(rect: Rect<f64>) -> Self {
        Self::from_rect(rect)
    }
}

/// An axis-aligned rectangle in container pixels, edges inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenBounds {
    pub min: ScreenPoint,
    pub max: ScreenPoint,
}

impl ScreenBounds {
    /// Create bounds from two corners in any order.
    pub fn new(a: ScreenPoint, b: ScreenPoint) -> Self {
        Self {
            min: ScreenPoint::new(a.x.min(b.x), a.y.min(b.y)),
            max: ScreenPoint::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Container-sized bounds anchored at the origin.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(width, height))
    }

    /// Box centered on `center` extending `half_width` / `half_height` each way.
    pub fn around(center: ScreenPoint, half_width: f64, half_height: f64) -> Self {
        Self {
            min: ScreenPoint::new(center.x - half_width, center.y - half_height),
            max: ScreenPoint::new(center.x + half_width, center.y + half_height),
        }
    }

    /// Degenerate (zero-area) box at a single point.
    pub fn point(point: ScreenPoint) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> ScreenPoint {
        ScreenPoint::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    pub fn contains(&self, point: &ScreenPoint) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    pub fn intersects(&self, other: &ScreenBounds) -> bool {
        !(self.max.x < other.min.x
            || self.min.x > other.max.x
            || self.max.y < other.min.y
            || self.min.y > other.max.y)
    }
}
