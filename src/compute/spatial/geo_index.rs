//! Persistent R-tree over every marker's geographic coordinate.
//!
//! R-trees answer range queries fastest when they are packed in one go with
//! `RTree::bulk_load`; repeated single inserts and removals gradually degrade
//! the node layout. The index therefore counts individual mutations since the
//! last packing (`dirty`) and repacks once `dirty / total` reaches the
//! configured ratio. The check runs once per draw cycle, before culling.

use super::entry::{SpatialEntry, query_envelope};
use canvas_markers_types::bounds::GeoBounds;
use rstar::{RTree, RTreeObject};

/// Geographic marker index with a dirty-ratio rebuild policy.
pub struct GeoIndex {
    tree: RTree<SpatialEntry>,
    total: usize,
    dirty: usize,
    rebuild_ratio: f64,
    rebuilds: u64,
}

impl GeoIndex {
    pub fn new(rebuild_ratio: f64) -> Self {
        Self {
            tree: RTree::new(),
            total: 0,
            dirty: 0,
            rebuild_ratio,
            rebuilds: 0,
        }
    }

    /// Number of live entries.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Individual inserts/removals since the last full rebuild.
    pub fn dirty(&self) -> usize {
        self.dirty
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn rebuild_ratio(&self) -> f64 {
        self.rebuild_ratio
    }

    /// Number of full rebuilds performed, including bulk loads that repacked.
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }

    /// Insert a single entry. Counts as churn.
    pub fn insert(&mut self, entry: SpatialEntry) {
        self.tree.insert(entry);
        self.total += 1;
        self.dirty += 1;
    }

    /// Pack `entries` together with everything already indexed.
    ///
    /// The tree is rebuilt from the combined set, so `dirty` resets to zero.
    pub fn bulk_load(&mut self, entries: Vec<SpatialEntry>) {
        if entries.is_empty() {
            return;
        }

        let added = entries.len();
        let combined = if self.tree.size() == 0 {
            entries
        } else {
            let mut combined: Vec<SpatialEntry> = self.tree.iter().copied().collect();
            combined.extend(entries);
            combined
        };

        self.tree = RTree::bulk_load(combined);
        self.total += added;
        self.dirty = 0;
        self.rebuilds += 1;
        log::debug!(
            "geo index bulk loaded {} entries ({} total)",
            added,
            self.total
        );
    }

    /// Add a batch, choosing the cheaper path.
    ///
    /// Batches smaller than the rebuild ratio of the current total are inserted
    /// one by one (and count as churn); larger batches repack the whole tree.
    pub fn extend(&mut self, entries: Vec<SpatialEntry>) {
        let threshold = self.rebuild_ratio * self.total as f64;
        if self.total > 0 && (entries.len() as f64) < threshold {
            for entry in entries {
                self.insert(entry);
            }
        } else {
            self.bulk_load(entries);
        }
    }

    /// Remove the first entry located at `entry`'s box for which `equals`
    /// holds. Counts as churn. Returns the removed entry.
    pub fn remove<F>(&mut self, entry: &SpatialEntry, equals: F) -> Option<SpatialEntry>
    where
        F: Fn(&SpatialEntry, &SpatialEntry) -> bool,
    {
        let found = self
            .tree
            .locate_in_envelope(&entry.envelope())
            .find(|candidate| equals(candidate, entry))
            .copied()?;

        let removed = self.tree.remove(&found)?;
        self.total -= 1;
        self.dirty += 1;
        Some(removed)
    }

    /// Remove every entry matching `predicate` as one structural change.
    ///
    /// `total` drops by the number removed; `dirty` is left untouched.
    pub fn remove_matching<P>(&mut self, mut predicate: P) -> Vec<SpatialEntry>
    where
        P: FnMut(&SpatialEntry) -> bool,
    {
        let doomed: Vec<SpatialEntry> = self
            .tree
            .iter()
            .filter(|entry| predicate(entry))
            .copied()
            .collect();

        for entry in &doomed {
            if self.tree.remove(entry).is_some() {
                self.total -= 1;
            }
        }
        doomed
    }

    /// Entries whose coordinate lies inside `bounds`, edges included.
    ///
    /// Non-finite bounds match nothing.
    pub fn range_query(&self, bounds: &GeoBounds) -> Vec<SpatialEntry> {
        if !bounds.is_finite() {
            log::warn!("Rejecting geo range query with non-finite bounds");
            return Vec::new();
        }

        let envelope = query_envelope(bounds.west(), bounds.south(), bounds.east(), bounds.north());
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .copied()
            .collect()
    }

    /// Every live entry, in tree order.
    pub fn all(&self) -> Vec<SpatialEntry> {
        self.tree.iter().copied().collect()
    }

    pub fn clear(&mut self) {
        self.tree = RTree::new();
        self.total = 0;
        self.dirty = 0;
    }

    /// Whether the next draw cycle should repack the tree.
    pub fn needs_rebuild(&self) -> bool {
        self.total > 0 && self.dirty as f64 / self.total as f64 >= self.rebuild_ratio
    }

    /// Repack from `all()` if the dirty ratio has been reached.
    pub fn rebuild_if_needed(&mut self) -> bool {
        if !self.needs_rebuild() {
            return false;
        }

        let entries = self.all();
        log::debug!(
            "rebuilding geo index: dirty={} total={} ratio={}",
            self.dirty,
            self.total,
            self.rebuild_ratio
        );
        self.tree = RTree::bulk_load(entries);
        self.dirty = 0;
        self.rebuilds += 1;
        true
    }
}

impl Default for GeoIndex {
    fn default() -> Self {
        Self::new(0.1)
    }
}
