use geo::{Coord, Point};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A geographic coordinate in degrees.
///
/// Longitude maps to the x axis and latitude to the y axis when converted to
/// `geo` primitives, matching the convention used throughout the `geo` crate.
///
/// # Examples
///
/// ```
/// use canvas_markers_types::point::LatLng;
/// use geo::Point;
///
/// let nyc = LatLng::new(40.7128, -74.0060);
/// let point: Point<f64> = nyc.into();
/// assert_eq!(point.x(), -74.0060);
/// assert_eq!(point.y(), 40.7128);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Both components are finite (not NaN or infinite).
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// Convert to a `geo::Point` with `x = lng`, `y = lat`.
    pub fn to_point(&self) -> Point<f64> {
        Point::new(self.lng, self.lat)
    }
}

impl From<Point<f64>> for LatLng {
    fn from(point: Point<f64>) -> Self {
        Self::new(point.y(), point.x())
    }
}

impl From<LatLng> for Point<f64> {
    fn from(lat_lng: LatLng) -> Self {
        lat_lng.to_point()
    }
}

impl From<LatLng> for Coord<f64> {
    fn from(lat_lng: LatLng) -> Self {
        Coord {
            x: lat_lng.lng,
            y: lat_lng.lat,
        }
    }
}

/// A position in container pixels, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn to_array(&self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl From<[f64; 2]> for ScreenPoint {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl Add for ScreenPoint {
    type Output = ScreenPoint;

    fn add(self, rhs: ScreenPoint) -> ScreenPoint {
        ScreenPoint::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for ScreenPoint {
    type Output = ScreenPoint;

    fn sub(self, rhs: ScreenPoint) -> ScreenPoint {
        ScreenPoint::new(self.x - rhs.x, self.y - rhs.y)
    }
}
