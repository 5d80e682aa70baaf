use crate::point::ScreenPoint;
use serde::{Deserialize, Serialize};

/// Icon dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IconSize {
    pub width: f64,
    pub height: f64,
}

impl IconSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Half extents, used to derive a footprint around the projected center.
    pub fn half(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}

/// Describes the image a marker is drawn with.
///
/// The anchor is the pixel inside the icon that sits on the marker's projected
/// position. When unset it defaults to the icon center.
///
/// # Examples
///
/// ```
/// use canvas_markers_types::icon::IconOptions;
/// use canvas_markers_types::point::ScreenPoint;
///
/// let pin = IconOptions::new("https://tiles.example/pin.png", 24.0, 40.0);
/// assert_eq!(pin.anchor(), ScreenPoint::new(12.0, 20.0));
///
/// let pin = pin.with_anchor(12.0, 40.0);
/// assert_eq!(pin.anchor(), ScreenPoint::new(12.0, 40.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconOptions {
    /// Image location; markers sharing a URL share one image load
    pub url: String,
    pub size: IconSize,
    #[serde(default)]
    pub anchor: Option<ScreenPoint>,
}

impl IconOptions {
    pub fn new(url: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            url: url.into(),
            size: IconSize::new(width, height),
            anchor: None,
        }
    }

    pub fn with_anchor(mut self, x: f64, y: f64) -> Self {
        self.anchor = Some(ScreenPoint::new(x, y));
        self
    }

    /// Effective anchor: explicit value, or the icon center.
    pub fn anchor(&self) -> ScreenPoint {
        self.anchor.unwrap_or_else(|| {
            let (half_w, half_h) = self.size.half();
            ScreenPoint::new(half_w, half_h)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_anchor_is_center() {
        let icon = IconOptions::new("a.png", 10.0, 30.0);
        assert_eq!(icon.anchor(), ScreenPoint::new(5.0, 15.0));
    }

    #[test]
    fn test_anchor_missing_in_json() {
        let json = r#"{"url":"a.png","size":{"width":8.0,"height":8.0}}"#;
        let icon: IconOptions = serde_json::from_str(json).unwrap();
        assert!(icon.anchor.is_none());
        assert_eq!(icon.anchor(), ScreenPoint::new(4.0, 4.0));
    }
}
