//! Conduction engine
//!
//! Turns a candidate key set into a consistent [`CheckedState`] in two
//! sweeps over the [`LevelIndex`]:
//!
//! 1. top-down: a checked node checks its enabled children (check-true), or
//!    a node that is neither checked nor half-checked clears them
//!    (check-false);
//! 2. bottom-up: every enabled parent is re-derived from its enabled
//!    children as full, partial, or empty.
//!
//! Disabled nodes neither receive cascaded checks nor aggregate state from
//! below. Both entry points are pure functions of the index and their
//! arguments.

use crate::state::CheckedState;
use indexmap::IndexSet;
use std::borrow::Borrow;
use std::collections::HashSet;
use treelink_tree::{Key, LevelIndex, TreeLink};

/// What the bottom-up pass does with a parent's own checked flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParentRule {
    /// Check the parent when all enabled children are checked
    CheckWhenFull,
    /// Uncheck the parent unless all enabled children are checked
    UncheckUnlessFull,
}

/// Runs conduction over one indexed tree
#[derive(Debug, Clone, Copy)]
pub struct Conductor<'a> {
    link: &'a TreeLink,
    levels: &'a LevelIndex,
}

impl<'a> Conductor<'a> {
    /// Borrow an index and its level buckets
    ///
    /// `levels` must be built from `link`.
    #[inline]
    #[must_use]
    pub fn new(link: &'a TreeLink, levels: &'a LevelIndex) -> Self {
        Self { link, levels }
    }

    /// The index this conductor reads
    #[inline]
    #[must_use]
    pub fn tree_link(&self) -> &'a TreeLink {
        self.link
    }

    /// The level buckets this conductor sweeps
    #[inline]
    #[must_use]
    pub fn levels(&self) -> &'a LevelIndex {
        self.levels
    }

    /// Conduct after a check
    ///
    /// Unknown keys are dropped. Every checked enabled node checks its
    /// enabled descendants, then parents whose enabled children are all
    /// checked become checked and parents with any checked or half-checked
    /// enabled child become half-checked.
    #[must_use]
    pub fn check_true<I>(&self, candidates: I) -> CheckedState
    where
        I: IntoIterator,
        I::Item: Borrow<Key>,
    {
        let mut checked = self.known(candidates);
        let seeded = checked.len();

        for key in self.levels.top_down() {
            if !checked.contains(key) {
                continue;
            }
            let Some(entity) = self.link.get(key) else {
                continue;
            };
            if entity.is_disabled() {
                continue;
            }
            for child in entity.enabled_children() {
                checked.insert(child.key().clone());
            }
        }

        let half = self.aggregate(&mut checked, ParentRule::CheckWhenFull);
        let state = CheckedState::from_parts(checked, half);

        tracing::trace!(
            seeded,
            checked = state.checked_keys.len(),
            half_checked = state.half_checked_keys.len(),
            "conducted check"
        );
        state
    }

    /// Conduct after an uncheck
    ///
    /// `candidates` are the checked keys with the unchecked node already
    /// removed; `prior_half` is the half-checked set before the change.
    /// Enabled nodes that end up neither checked nor half-checked clear
    /// their enabled descendants, then the half-checked set is rebuilt from
    /// scratch bottom-up.
    #[must_use]
    pub fn check_false<I, H>(&self, candidates: I, prior_half: H) -> CheckedState
    where
        I: IntoIterator,
        I::Item: Borrow<Key>,
        H: IntoIterator,
        H::Item: Borrow<Key>,
    {
        let mut checked = self.known(candidates);
        let prior_half = self.known(prior_half);
        let seeded = checked.len();

        for key in self.levels.top_down() {
            if checked.contains(key) || prior_half.contains(key) {
                continue;
            }
            let Some(entity) = self.link.get(key) else {
                continue;
            };
            if entity.is_disabled() {
                continue;
            }
            for child in entity.enabled_children() {
                checked.shift_remove(child.key());
            }
        }

        let half = self.aggregate(&mut checked, ParentRule::UncheckUnlessFull);
        let state = CheckedState::from_parts(checked, half);

        tracing::trace!(
            seeded,
            checked = state.checked_keys.len(),
            half_checked = state.half_checked_keys.len(),
            "conducted uncheck"
        );
        state
    }

    /// Keys present in the index, first occurrence order
    fn known<I>(&self, keys: I) -> IndexSet<Key>
    where
        I: IntoIterator,
        I::Item: Borrow<Key>,
    {
        keys.into_iter()
            .filter(|key| self.link.contains(key.borrow()))
            .map(|key| key.borrow().clone())
            .collect()
    }

    /// Bottom-up pass; returns the fresh half-checked set
    ///
    /// Each parent is evaluated once, from its first enabled child reached.
    /// Disabled children are skipped, so a parent whose children are all
    /// disabled is never evaluated.
    fn aggregate(&self, checked: &mut IndexSet<Key>, rule: ParentRule) -> IndexSet<Key> {
        let mut half = IndexSet::new();
        let mut visited: HashSet<&Key> = HashSet::new();

        for key in self.levels.bottom_up() {
            let Some(entity) = self.link.get(key) else {
                continue;
            };
            if entity.is_disabled() {
                continue;
            }
            let (Some(parent_key), Some(parent_node)) = (&entity.parent_id, &entity.parent_node) else {
                continue;
            };
            if !visited.insert(parent_key) {
                continue;
            }
            if parent_node.disabled {
                continue;
            }
            let Some(parent) = self.link.get(parent_key) else {
                continue;
            };

            let mut all_checked = true;
            let mut partial = false;
            for child in parent.enabled_children() {
                let is_checked = checked.contains(child.key());
                all_checked &= is_checked;
                partial |= is_checked || half.contains(child.key());
            }

            match rule {
                ParentRule::CheckWhenFull if all_checked => {
                    checked.insert(parent_key.clone());
                }
                ParentRule::UncheckUnlessFull if !all_checked => {
                    checked.shift_remove(parent_key);
                }
                _ => {}
            }
            if partial {
                half.insert(parent_key.clone());
            }
        }

        half
    }
}
