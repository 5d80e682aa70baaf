//! Validation for markers entering the layer.

use crate::error::{LayerError, Result};
use crate::marker::Marker;
use canvas_markers_types::icon::IconOptions;
use canvas_markers_types::point::LatLng;

/// Validates a coordinate is finite.
///
/// Coordinates are not range-bounded: on a wrapped map a marker at
/// longitude 190 sits one world copy east of longitude -170.
///
/// # Examples
///
/// ```
/// use canvas_markers::compute::validation::validate_lat_lng;
/// use canvas_markers::LatLng;
///
/// let nyc = LatLng::new(40.7128, -74.0060);
/// assert!(validate_lat_lng(&nyc).is_ok());
///
/// // Wrapped longitude
/// assert!(validate_lat_lng(&LatLng::new(40.0, 200.0)).is_ok());
///
/// // NaN latitude
/// assert!(validate_lat_lng(&LatLng::new(f64::NAN, -74.0)).is_err());
/// ```
pub fn validate_lat_lng(lat_lng: &LatLng) -> Result<()> {
    let LatLng { lat, lng } = *lat_lng;

    if !lng.is_finite() {
        return Err(LayerError::InvalidInput(format!(
            "Longitude must be finite, got: {}",
            lng
        )));
    }

    if !lat.is_finite() {
        return Err(LayerError::InvalidInput(format!(
            "Latitude must be finite, got: {}",
            lat
        )));
    }

    Ok(())
}

/// Validates an icon descriptor: non-empty URL, positive finite size and a
/// finite anchor when one is set.
pub fn validate_icon(icon: &IconOptions) -> Result<()> {
    if icon.url.trim().is_empty() {
        return Err(LayerError::InvalidInput("Icon URL cannot be empty".into()));
    }

    let size = icon.size;
    if !(size.width.is_finite() && size.height.is_finite()) {
        return Err(LayerError::InvalidInput(format!(
            "Icon size must be finite, got: {}x{}",
            size.width, size.height
        )));
    }

    if size.width <= 0.0 || size.height <= 0.0 {
        return Err(LayerError::InvalidInput(format!(
            "Icon size must be positive, got: {}x{}",
            size.width, size.height
        )));
    }

    if let Some(anchor) = icon.anchor
        && !anchor.is_finite()
    {
        return Err(LayerError::InvalidInput(format!(
            "Icon anchor must be finite, got: ({}, {})",
            anchor.x, anchor.y
        )));
    }

    Ok(())
}

/// Validates everything the layer reads from a marker.
pub fn validate_marker(marker: &dyn Marker) -> Result<()> {
    validate_lat_lng(&marker.lat_lng())?;
    validate_icon(marker.icon())
}

/// Validates a batch, reporting the index of the first invalid marker.
pub fn validate_markers<'a, I>(markers: I) -> Result<()>
where
    I: IntoIterator<Item = &'a dyn Marker>,
{
    for (idx, marker) in markers.into_iter().enumerate() {
        validate_marker(marker)
            .map_err(|e| LayerError::InvalidInput(format!("Marker at index {}: {}", idx, e)))?;
    }
    Ok(())
}
