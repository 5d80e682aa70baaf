//! Viewport culling: geographic range query followed by reprojection.

use super::ViewportProvider;
use crate::compute::spatial::{GeoIndex, SpatialEntry};
use crate::marker::MarkerId;
use canvas_markers_types::bounds::GeoBounds;
use canvas_markers_types::icon::IconSize;
use canvas_markers_types::point::{LatLng, ScreenPoint};

/// A marker that survived culling, projected for this cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CulledMarker {
    pub marker: MarkerId,
    pub lat_lng: LatLng,
    /// Projected container position.
    pub position: ScreenPoint,
    /// Icon rectangle centered on `position`.
    pub footprint: SpatialEntry,
}

/// Markers whose coordinate lies in `bounds` (edges included), projected
/// through `viewport` and sorted by id so they draw in insertion order.
///
/// `icon_size` resolves the current icon size of a marker; markers it does
/// not know are skipped.
pub fn cull<V, F>(geo: &GeoIndex, bounds: &GeoBounds, viewport: &V, icon_size: F) -> Vec<CulledMarker>
where
    V: ViewportProvider + ?Sized,
    F: Fn(MarkerId) -> Option<IconSize>,
{
    let mut culled: Vec<CulledMarker> = geo
        .range_query(bounds)
        .into_iter()
        .filter_map(|entry| {
            let size = icon_size(entry.marker)?;
            let lat_lng = entry.lat_lng();
            let position = viewport.project(lat_lng);
            Some(CulledMarker {
                marker: entry.marker,
                lat_lng,
                position,
                footprint: SpatialEntry::footprint(entry.marker, position, size),
            })
        })
        .collect();

    culled.sort_unstable_by_key(|c| c.marker);
    log::trace!("culled {} of {} markers", culled.len(), geo.total());
    culled
}
