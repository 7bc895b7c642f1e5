//! Selection state
//!
//! [`CheckedState`] is the `(checkedKeys, halfCheckedKeys)` pair exchanged
//! with callers. Both sides are ordered sets and are kept disjoint.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use treelink_tree::Key;

/// Display status of one node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
    /// Fully selected
    Checked,
    /// Not selected, with a selected or partial descendant
    HalfChecked,
    /// Neither
    Unchecked,
}

/// Checked and half-checked key sets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckedState {
    /// Fully checked keys
    #[serde(default)]
    pub checked_keys: IndexSet<Key>,

    /// Half-checked keys
    #[serde(default)]
    pub half_checked_keys: IndexSet<Key>,
}

impl CheckedState {
    /// Empty state
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a state from raw key lists
    ///
    /// No consistency is restored here; half-checked keys that are also
    /// checked are kept as given. Use [`CheckedState::from_parts`] for a
    /// disjoint pair.
    #[must_use]
    pub fn from_keys<C, H>(checked: C, half_checked: H) -> Self
    where
        C: IntoIterator,
        C::Item: Into<Key>,
        H: IntoIterator,
        H::Item: Into<Key>,
    {
        Self {
            checked_keys: checked.into_iter().map(Into::into).collect(),
            half_checked_keys: half_checked.into_iter().map(Into::into).collect(),
        }
    }

    /// Combine two sets, dropping half-checked keys that are also checked
    #[must_use]
    pub fn from_parts(checked_keys: IndexSet<Key>, mut half_checked_keys: IndexSet<Key>) -> Self {
        half_checked_keys.retain(|key| !checked_keys.contains(key));
        Self {
            checked_keys,
            half_checked_keys,
        }
    }

    /// Check if neither set holds a key
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checked_keys.is_empty() && self.half_checked_keys.is_empty()
    }

    /// Whether `key` is checked
    #[inline]
    #[must_use]
    pub fn is_checked(&self, key: &Key) -> bool {
        self.checked_keys.contains(key)
    }

    /// Whether `key` is half-checked
    #[inline]
    #[must_use]
    pub fn is_half_checked(&self, key: &Key) -> bool {
        self.half_checked_keys.contains(key)
    }

    /// Status of `key`; checked wins over half-checked
    #[must_use]
    pub fn status(&self, key: &Key) -> NodeStatus {
        if self.is_checked(key) {
            NodeStatus::Checked
        } else if self.is_half_checked(key) {
            NodeStatus::HalfChecked
        } else {
            NodeStatus::Unchecked
        }
    }

    /// Whether both states hold the same checked keys, ignoring order
    #[must_use]
    pub fn same_checked_keys(&self, other: &Self) -> bool {
        self.checked_keys.len() == other.checked_keys.len()
            && self.checked_keys.iter().all(|key| other.checked_keys.contains(key))
    }

    /// Whether the checked and half-checked sets share no key
    #[must_use]
    pub fn is_disjoint(&self) -> bool {
        self.checked_keys.is_disjoint(&self.half_checked_keys)
    }

    /// Keep only keys accepted by `keep`
    pub fn retain(&mut self, mut keep: impl FnMut(&Key) -> bool) {
        self.checked_keys.retain(|key| keep(key));
        self.half_checked_keys.retain(|key| keep(key));
    }
}
