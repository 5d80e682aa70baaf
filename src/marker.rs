//! The marker capability the layer consumes.
//!
//! Markers are owned by the host. The layer keeps a shared handle
//! ([`MarkerRef`]) for as long as the marker is a member, plus its own
//! per-marker bookkeeping (group, cached icon handle, indexed coordinate).

use crate::events::MarkerEvent;
use canvas_markers_types::icon::IconOptions;
use canvas_markers_types::point::LatLng;
use std::fmt;
use std::rc::Rc;

/// Shared handle to a host-owned marker.
pub type MarkerRef = Rc<dyn Marker>;

/// Identifier assigned by the layer when a marker is added.
///
/// Ids grow monotonically, so a larger id always belongs to a marker added
/// later. Draw order and hit-test tie-breaking both follow this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(pub(crate) u64);

impl MarkerId {
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What the layer needs from a marker object.
pub trait Marker {
    /// Geographic position. Read once when the marker is added.
    fn lat_lng(&self) -> LatLng;

    fn icon(&self) -> &IconOptions;

    /// Non-interactive markers are drawn but never picked.
    fn is_interactive(&self) -> bool {
        true
    }

    /// True right after the marker was dragged, so the release is not a click.
    fn drag_moved(&self) -> bool {
        false
    }

    /// Event sink for click / mouseover / mouseout / move.
    fn fire(&self, event: &MarkerEvent);
}

/// Identity of a marker handle, stable while the layer holds it.
pub(crate) fn marker_address(marker: &MarkerRef) -> usize {
    Rc::as_ptr(marker) as *const () as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Pin {
        icon: IconOptions,
    }

    impl Marker for Pin {
        fn lat_lng(&self) -> LatLng {
            LatLng::new(0.0, 0.0)
        }

        fn icon(&self) -> &IconOptions {
            &self.icon
        }

        fn fire(&self, _event: &MarkerEvent) {}
    }

    #[test]
    fn test_marker_defaults() {
        let pin = Pin {
            icon: IconOptions::new("pin.png", 10.0, 10.0),
        };
        assert!(pin.is_interactive());
        assert!(!pin.drag_moved());
    }

    #[test]
    fn test_marker_address_identity() {
        let a: MarkerRef = Rc::new(Pin {
            icon: IconOptions::new("pin.png", 10.0, 10.0),
        });
        let b: MarkerRef = Rc::new(Pin {
            icon: IconOptions::new("pin.png", 10.0, 10.0),
        });
        let a_clone = a.clone();
        assert_eq!(marker_address(&a), marker_address(&a_clone));
        assert_ne!(marker_address(&a), marker_address(&b));
    }

    #[test]
    fn test_marker_id_order() {
        assert!(MarkerId(2) > MarkerId(1));
        assert_eq!(MarkerId(7).to_string(), "#7");
    }
}
