//! Level index
//!
//! Groups the keys of a [`TreeLink`] by depth so conduction can sweep the
//! tree top-down and bottom-up. Pure derived data: rebuild it whenever the
//! index is rebuilt.

use crate::index::TreeLink;
use crate::key::Key;

/// Keys bucketed by depth
///
/// Within a bucket keys keep the index's pre-order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelIndex {
    buckets: Vec<Vec<Key>>,
}

impl LevelIndex {
    /// Bucket every indexed node by its level
    #[must_use]
    pub fn build(link: &TreeLink) -> Self {
        let mut buckets: Vec<Vec<Key>> = Vec::new();

        for (key, entity) in link.iter() {
            if entity.level >= buckets.len() {
                buckets.resize_with(entity.level + 1, Vec::new);
            }
            buckets[entity.level].push(key.clone());
        }

        tracing::debug!(levels = buckets.len(), "built level index");
        Self { buckets }
    }

    /// Deepest level present, 0 when empty
    #[inline]
    #[must_use]
    pub fn max_level(&self) -> usize {
        self.buckets.len().saturating_sub(1)
    }

    /// Number of levels
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.buckets.len()
    }

    /// Check if there are no levels
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Keys at `level`; empty past the deepest level
    #[must_use]
    pub fn level(&self, level: usize) -> &[Key] {
        self.buckets.get(level).map_or(&[], Vec::as_slice)
    }

    /// Roots, in input order
    #[inline]
    #[must_use]
    pub fn roots(&self) -> &[Key] {
        self.level(0)
    }

    /// Every key, level 0 first
    pub fn top_down(&self) -> impl Iterator<Item = &Key> {
        self.buckets.iter().flatten()
    }

    /// Every key, deepest level first
    pub fn bottom_up(&self) -> impl Iterator<Item = &Key> {
        self.buckets.iter().rev().flatten()
    }
}
