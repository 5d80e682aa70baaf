use serde::Serialize;

/// Point-in-time counters for a [`MarkerLayer`](crate::MarkerLayer).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LayerStats {
    /// Live entries in the geographic index
    pub total: usize,
    /// Individual inserts/removals since the last rebuild
    pub dirty: usize,
    /// Markers drawn in the last cycle
    pub visible: usize,
    pub groups: usize,
    pub markers: usize,
    pub icons_loading: usize,
    pub icons_ready: usize,
    pub icons_failed: usize,
    pub rebuilds: u64,
}

impl LayerStats {
    /// Fraction of the index touched since the last rebuild.
    pub fn dirty_ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.dirty as f64 / self.total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirty_ratio() {
        assert_eq!(LayerStats::default().dirty_ratio(), 0.0);
        let stats = LayerStats {
            total: 40,
            dirty: 4,
            ..Default::default()
        };
        assert_eq!(stats.dirty_ratio(), 0.1);
    }
}
