//! Transient R-tree over the footprints of markers drawn in the current cycle.

use super::entry::{SpatialEntry, query_envelope};
use crate::marker::MarkerId;
use canvas_markers_types::bounds::ScreenBounds;
use canvas_markers_types::point::ScreenPoint;
use rstar::RTree;
use rustc_hash::FxHashMap;

/// Screen-space footprint index, rebuilt wholesale every draw cycle.
///
/// A side map from marker id to footprint keeps membership checks and
/// single-marker removal cheap between cycles.
#[derive(Default)]
pub struct ScreenIndex {
    tree: RTree<SpatialEntry>,
    footprints: FxHashMap<MarkerId, SpatialEntry>,
}

impl ScreenIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole index with `entries`.
    pub fn bulk_load(&mut self, entries: Vec<SpatialEntry>) {
        self.footprints = entries.iter().map(|e| (e.marker, *e)).collect();
        self.tree = RTree::bulk_load(entries);
    }

    /// Add a footprint outside the regular cycle (a marker added while visible).
    pub fn insert(&mut self, entry: SpatialEntry) {
        if let Some(previous) = self.footprints.insert(entry.marker, entry) {
            self.tree.remove(&previous);
        }
        self.tree.insert(entry);
    }

    /// Add several footprints, repacking the tree once.
    pub fn extend(&mut self, entries: Vec<SpatialEntry>) {
        if entries.is_empty() {
            return;
        }
        for entry in entries {
            self.footprints.insert(entry.marker, entry);
        }
        self.tree = RTree::bulk_load(self.footprints.values().copied().collect());
    }

    /// Drop a marker's footprint. Returns whether it was present.
    pub fn remove(&mut self, marker: MarkerId) -> bool {
        match self.footprints.remove(&marker) {
            Some(entry) => {
                self.tree.remove(&entry);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, marker: MarkerId) -> bool {
        self.footprints.contains_key(&marker)
    }

    pub fn footprint(&self, marker: MarkerId) -> Option<&SpatialEntry> {
        self.footprints.get(&marker)
    }

    /// Footprints containing `point`, queried as a zero-area box.
    pub fn query_point(&self, point: ScreenPoint) -> Vec<SpatialEntry> {
        if !point.is_finite() {
            return Vec::new();
        }
        self.range_query(&ScreenBounds::point(point))
    }

    /// Footprints intersecting `bounds`.
    pub fn range_query(&self, bounds: &ScreenBounds) -> Vec<SpatialEntry> {
        let envelope = query_envelope(bounds.min.x, bounds.min.y, bounds.max.x, bounds.max.y);
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .copied()
            .collect()
    }

    /// Ids of every marker currently on screen, ascending.
    pub fn markers(&self) -> Vec<MarkerId> {
        let mut ids: Vec<MarkerId> = self.footprints.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.footprints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.footprints.is_empty()
    }

    pub fn clear(&mut self) {
        self.tree = RTree::new();
        self.footprints.clear();
    }
}
