//! Hit selection and the hover state machine.
//!
//! Footprints may overlap. When several markers are under the pointer the
//! one added last wins. Once every icon involved is loaded it is also the
//! one drawn last, so the pick matches what is visible on top. While icons
//! are still loading a marker whose image arrives late can be painted over
//! a newer one until the next redraw; the pick does not follow that.

use crate::marker::MarkerId;

/// Change in hover state caused by one pointer move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverTransition {
    /// Nothing changed.
    None,
    /// Pointer entered a marker from empty space.
    Enter(MarkerId),
    /// Pointer left a marker into empty space.
    Leave(MarkerId),
    /// Pointer moved straight from one marker to another.
    Switch { from: MarkerId, to: MarkerId },
}

impl HoverTransition {
    /// Marker that must receive mouseout, if any.
    pub fn left(&self) -> Option<MarkerId> {
        match *self {
            HoverTransition::Leave(m) | HoverTransition::Switch { from: m, .. } => Some(m),
            _ => None,
        }
    }

    /// Marker that must receive mouseover, if any.
    pub fn entered(&self) -> Option<MarkerId> {
        match *self {
            HoverTransition::Enter(m) | HoverTransition::Switch { to: m, .. } => Some(m),
            _ => None,
        }
    }
}

/// Tracks the hovered marker.
#[derive(Debug, Default)]
pub struct HitTester {
    hovered: Option<MarkerId>,
}

impl HitTester {
    pub fn new() -> Self {
        Self::default()
    }

    /// Topmost marker among `candidates`.
    pub fn pick<I>(candidates: I) -> Option<MarkerId>
    where
        I: IntoIterator<Item = MarkerId>,
    {
        candidates.into_iter().max()
    }

    pub fn hovered(&self) -> Option<MarkerId> {
        self.hovered
    }

    /// Move the hover state to `target`.
    pub fn update(&mut self, target: Option<MarkerId>) -> HoverTransition {
        let transition = match (self.hovered, target) {
            (None, None) => HoverTransition::None,
            (Some(a), Some(b)) if a == b => HoverTransition::None,
            (None, Some(b)) => HoverTransition::Enter(b),
            (Some(a), None) => HoverTransition::Leave(a),
            (Some(a), Some(b)) => HoverTransition::Switch { from: a, to: b },
        };
        self.hovered = target;
        transition
    }

    /// Forget the hovered marker without emitting a transition.
    pub fn reset(&mut self) -> Option<MarkerId> {
        self.hovered.take()
    }
}
