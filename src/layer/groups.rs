//! Group membership counts.

use rustc_hash::FxHashMap;
use std::rc::Rc;

/// Group id to live member count.
///
/// Group ids are interned: every member of a group shares one `Rc<str>`.
#[derive(Debug, Default)]
pub struct GroupRegistry {
    counts: FxHashMap<Rc<str>, usize>,
}

impl GroupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more member of `group`, returning the interned id.
    pub fn add_to_group(&mut self, group: &str) -> Rc<str> {
        let key = match self.counts.get_key_value(group) {
            Some((key, _)) => key.clone(),
            None => Rc::from(group),
        };
        *self.counts.entry(key.clone()).or_insert(0) += 1;
        key
    }

    /// Count one member fewer. The entry disappears when it reaches zero.
    pub fn release(&mut self, group: &str) {
        if let Some(count) = self.counts.get_mut(group) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(group);
            }
        }
    }

    /// Drop `group` entirely, returning how many members it had.
    pub fn take_group(&mut self, group: &str) -> Option<usize> {
        self.counts.remove(group)
    }

    pub fn count(&self, group: &str) -> usize {
        self.counts.get(group).copied().unwrap_or(0)
    }

    pub fn contains(&self, group: &str) -> bool {
        self.counts.contains_key(group)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Group ids, sorted.
    pub fn groups(&self) -> Vec<Rc<str>> {
        let mut groups: Vec<Rc<str>> = self.counts.keys().cloned().collect();
        groups.sort();
        groups
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }
}
