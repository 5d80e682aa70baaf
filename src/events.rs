//! Pointer, marker and viewport event types exchanged with the host.

use crate::marker::MarkerId;
use canvas_markers_types::point::ScreenPoint;

/// Kind of pointer event captured by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    Click,
    MouseMove,
    /// The pointer left the drawing surface.
    MouseOut,
}

/// A pointer event in container coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub container_point: ScreenPoint,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, container_point: ScreenPoint) -> Self {
        Self {
            kind,
            container_point,
        }
    }

    pub fn click(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Click, ScreenPoint::new(x, y))
    }

    pub fn mouse_move(x: f64, y: f64) -> Self {
        Self::new(PointerKind::MouseMove, ScreenPoint::new(x, y))
    }

    pub fn mouse_out(x: f64, y: f64) -> Self {
        Self::new(PointerKind::MouseOut, ScreenPoint::new(x, y))
    }
}

/// Event forwarded to a marker's sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerEventKind {
    Click,
    MouseOver,
    MouseOut,
    /// Re-fired on every pointer move while the marker stays hovered.
    MouseMove,
}

/// A marker event carrying the pointer event that caused it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerEvent {
    pub kind: MarkerEventKind,
    pub marker: MarkerId,
    pub original: PointerEvent,
}

/// Viewport notifications from the host map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewEvent {
    MoveStart,
    /// A pan frame; never triggers a redraw on its own.
    Move,
    MoveEnd,
    /// A zoom animation frame.
    Zoom,
    ZoomEnd,
    ViewReset,
    Resize,
}

impl ViewEvent {
    /// Whether the layer redraws in response to this event.
    pub fn triggers_redraw(&self) -> bool {
        matches!(
            self,
            ViewEvent::MoveEnd | ViewEvent::ZoomEnd | ViewEvent::ViewReset | ViewEvent::Resize
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_settled_view_events_redraw() {
        assert!(!ViewEvent::MoveStart.triggers_redraw());
        assert!(!ViewEvent::Move.triggers_redraw());
        assert!(!ViewEvent::Zoom.triggers_redraw());
        assert!(ViewEvent::MoveEnd.triggers_redraw());
        assert!(ViewEvent::ZoomEnd.triggers_redraw());
        assert!(ViewEvent::ViewReset.triggers_redraw());
        assert!(ViewEvent::Resize.triggers_redraw());
    }
}
