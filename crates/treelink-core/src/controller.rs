//! Incremental controller
//!
//! [`TreeLinkController`] owns the index, its level buckets and the
//! committed selection. Every mutation goes through an explicit command:
//!
//! - [`set_tree`](TreeLinkController::set_tree): rebuild the index
//! - [`set_value`](TreeLinkController::set_value): reconcile an outside value
//! - [`toggle`](TreeLinkController::toggle): check or uncheck one node
//! - [`on_check_all_change`](TreeLinkController::on_check_all_change): the
//!   select-all checkbox
//!
//! A change is committed before the listener sees it. The listener only gets
//! a shared borrow of the new state and cannot call back into the controller.

use crate::error::{Result, TreeLinkError};
use crate::select_all::{strategy_for, SelectAllContext, SelectAllStrategy};
use crate::types::{CheckedEvent, TreeLinkConfig};
use indexmap::IndexSet;
use serde_json::Value;
use std::fmt;
use std::iter;
use treelink_conduct::{CheckedState, Conductor, NodeStatus};
use treelink_tree::{Key, LevelIndex, TreeLink, TreeNode};

/// Callback run after each committed change
pub type ChangeListener = Box<dyn FnMut(&CheckedState)>;

/// Selection controller for one tree
pub struct TreeLinkController {
    config: TreeLinkConfig,
    link: TreeLink,
    levels: LevelIndex,
    state: CheckedState,
    /// Last state this controller committed, compared against outside values
    true_checked: CheckedState,
    /// Outside value last supplied
    external: Option<CheckedState>,
    /// `external` arrived before any tree and was never reconciled
    external_pending: bool,
    on_change: Option<ChangeListener>,
}

impl fmt::Debug for TreeLinkController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeLinkController")
            .field("config", &self.config)
            .field("nodes", &self.link.len())
            .field("state", &self.state)
            .field("external", &self.external)
            .field("external_pending", &self.external_pending)
            .field("has_listener", &self.on_change.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for TreeLinkController {
    fn default() -> Self {
        Self::new(TreeLinkConfig::default())
    }
}

impl TreeLinkController {
    /// Controller with an empty tree
    #[must_use]
    pub fn new(config: TreeLinkConfig) -> Self {
        Self {
            config,
            link: TreeLink::new(),
            levels: LevelIndex::default(),
            state: CheckedState::new(),
            true_checked: CheckedState::new(),
            external: None,
            external_pending: false,
            on_change: None,
        }
    }

    /// With an initial tree
    ///
    /// # Errors
    ///
    /// See [`TreeLinkController::set_tree`].
    pub fn with_tree(mut self, tree: &[TreeNode]) -> Result<Self> {
        self.set_tree(tree)?;
        Ok(self)
    }

    /// With a change listener
    #[must_use]
    pub fn with_on_change(mut self, listener: impl FnMut(&CheckedState) + 'static) -> Self {
        self.set_on_change(listener);
        self
    }

    /// Replace the change listener
    pub fn set_on_change(&mut self, listener: impl FnMut(&CheckedState) + 'static) {
        self.on_change = Some(Box::new(listener));
    }

    /// Drop the change listener
    pub fn clear_on_change(&mut self) {
        self.on_change = None;
    }

    /// Replace the tree
    ///
    /// The index is rebuilt in full. Checked keys are re-conducted against
    /// the new index, so keys that disappeared are dropped; the listener runs
    /// only if that changes the state.
    ///
    /// An outside value held since before the first tree is reconciled now.
    /// A value that was already applied is replayed only when it checks keys
    /// of the new index that the last committed state lacks, so selections
    /// made after the value arrived survive a refresh.
    ///
    /// # Errors
    ///
    /// Returns [`TreeLinkError::Tree`] when the configuration rejects
    /// duplicate keys and the tree has some.
    pub fn set_tree(&mut self, tree: &[TreeNode]) -> Result<()> {
        let link = TreeLink::build_with_policy(tree, self.config.duplicate_keys)?;
        self.levels = LevelIndex::build(&link);
        self.link = link;
        tracing::debug!(nodes = self.link.len(), depth = self.levels.depth(), "tree replaced");

        if !self.state.is_empty() {
            let next = self.conductor().check_true(&self.state.checked_keys);
            if next != self.state {
                self.commit(next, "tree");
            }
        }

        if self.link.is_empty() {
            return Ok(());
        }
        if let Some(value) = self.external.take() {
            if self.external_pending || self.adds_known_keys(&value) {
                self.reconcile(&value);
            }
            self.external_pending = false;
            self.external = Some(value);
        }
        Ok(())
    }

    /// Replace the tree from dynamic JSON, read with the configured field names
    ///
    /// # Errors
    ///
    /// Returns [`TreeLinkError::Tree`] when the JSON is not a forest of
    /// nodes, or under the same conditions as
    /// [`TreeLinkController::set_tree`].
    pub fn set_tree_json(&mut self, value: &Value) -> Result<()> {
        let tree = TreeNode::forest_from_json(value, &self.config.field_names)?;
        self.set_tree(&tree)
    }

    /// Apply a value supplied from outside
    ///
    /// Without a tree the value is held until one arrives. An empty value
    /// clears the selection silently. Otherwise the value's checked keys are
    /// conducted, and the result is committed only if its checked keys
    /// differ from the last committed ones as sets. Passing the same value
    /// again, or echoing a notification back, therefore notifies nothing.
    pub fn set_value(&mut self, value: CheckedState) {
        self.external_pending = self.link.is_empty();
        if self.external_pending {
            tracing::trace!("value held until a tree is indexed");
        } else {
            self.reconcile(&value);
        }
        self.external = Some(value);
    }

    /// Forget the outside value
    pub fn clear_value(&mut self) {
        self.external = None;
        self.external_pending = false;
    }

    /// Outside value last passed to [`TreeLinkController::set_value`]
    #[inline]
    #[must_use]
    pub fn value(&self) -> Option<&CheckedState> {
        self.external.as_ref()
    }

    /// Check or uncheck one node
    ///
    /// # Errors
    ///
    /// Returns [`TreeLinkError::UnknownKey`] when `key` is not indexed.
    pub fn toggle(&mut self, key: &Key, checked: bool) -> Result<()> {
        if !self.link.contains(key) {
            return Err(TreeLinkError::UnknownKey(key.clone()));
        }
        let next = self.preview(key, checked);
        self.commit(next, if checked { "check" } else { "uncheck" });
        Ok(())
    }

    /// Apply a toggle event
    ///
    /// # Errors
    ///
    /// Returns [`TreeLinkError::UnknownKey`] when the event's node is not
    /// indexed, e.g. after the tree was replaced.
    pub fn on_inner_checked_change(&mut self, event: &CheckedEvent) -> Result<()> {
        self.toggle(event.key(), event.checked)
    }

    /// State a toggle event would commit, without committing it
    #[must_use]
    pub fn latest_checked_keys(&self, event: &CheckedEvent) -> CheckedState {
        self.preview(event.key(), event.checked)
    }

    /// Handle a click on the select-all checkbox
    ///
    /// Selects everything reachable when nothing or only part of the tree is
    /// selected, and otherwise deselects what select-all added.
    pub fn on_check_all_change(&mut self) {
        if self.link.is_empty() {
            return;
        }
        let strategy = self.select_all_strategy();
        let indeterminate = self.check_all_is_indeterminate();
        let next = strategy.select_all(&SelectAllContext {
            conductor: self.conductor(),
            current: &self.state,
            indeterminate,
        });
        tracing::debug!(strategy = strategy.name(), indeterminate, "select all");
        self.commit(next, "select_all");
    }

    /// Checked keys
    #[inline]
    #[must_use]
    pub fn checked_keys(&self) -> &IndexSet<Key> {
        &self.state.checked_keys
    }

    /// Half-checked keys
    #[inline]
    #[must_use]
    pub fn half_checked_keys(&self) -> &IndexSet<Key> {
        &self.state.half_checked_keys
    }

    /// Committed selection
    #[inline]
    #[must_use]
    pub fn state(&self) -> &CheckedState {
        &self.state
    }

    /// Last state committed by this controller
    #[inline]
    #[must_use]
    pub fn true_checked(&self) -> &CheckedState {
        &self.true_checked
    }

    /// Current index
    #[inline]
    #[must_use]
    pub fn tree_link(&self) -> &TreeLink {
        &self.link
    }

    /// Level buckets of the current index
    #[inline]
    #[must_use]
    pub fn levels(&self) -> &LevelIndex {
        &self.levels
    }

    /// Configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &TreeLinkConfig {
        &self.config
    }

    /// Conductor over the current index
    #[inline]
    #[must_use]
    pub fn conductor(&self) -> Conductor<'_> {
        Conductor::new(&self.link, &self.levels)
    }

    /// Select-all strategy chosen by the configuration
    #[inline]
    #[must_use]
    pub fn select_all_strategy(&self) -> &'static dyn SelectAllStrategy {
        strategy_for(self.config.is_block_conduction_when_disabled)
    }

    /// Keys select-all counts towards "everything is checked"
    #[must_use]
    pub fn eligible_keys(&self) -> Vec<&Key> {
        let strategy = self.select_all_strategy();
        self.link
            .values()
            .filter(|node| strategy.is_eligible(node))
            .map(|node| node.key())
            .collect()
    }

    /// Whether the checked set is at least as large as the eligible set
    #[must_use]
    pub fn is_check_all(&self) -> bool {
        let strategy = self.select_all_strategy();
        let eligible = self.link.values().filter(|node| strategy.is_eligible(node)).count();
        self.state.checked_keys.len() >= eligible
    }

    /// Whether the select-all checkbox shows a partial selection
    #[must_use]
    pub fn check_all_is_indeterminate(&self) -> bool {
        !self.state.is_empty() && !self.is_check_all()
    }

    /// Display status of one node
    #[inline]
    #[must_use]
    pub fn node_status(&self, key: &Key) -> NodeStatus {
        self.state.status(key)
    }

    fn preview(&self, key: &Key, checked: bool) -> CheckedState {
        let conductor = self.conductor();
        let current = &self.state;
        if checked {
            conductor.check_true(current.checked_keys.iter().chain(iter::once(key)))
        } else {
            conductor.check_false(
                current.checked_keys.iter().filter(|candidate| *candidate != key),
                &current.half_checked_keys,
            )
        }
    }

    /// Whether `value` checks an indexed key the mirror does not
    fn adds_known_keys(&self, value: &CheckedState) -> bool {
        value
            .checked_keys
            .iter()
            .any(|key| self.link.contains(key) && !self.true_checked.is_checked(key))
    }

    fn reconcile(&mut self, value: &CheckedState) {
        if value.is_empty() {
            self.state = CheckedState::new();
            self.true_checked = CheckedState::new();
            tracing::debug!("selection cleared by empty value");
            return;
        }
        let next = self.conductor().check_true(&value.checked_keys);
        if next.same_checked_keys(&self.true_checked) {
            tracing::trace!("value matches committed selection");
            return;
        }
        self.commit(next, "value");
    }

    fn commit(&mut self, next: CheckedState, cause: &'static str) {
        self.true_checked = next.clone();
        self.state = next;
        tracing::debug!(
            cause,
            checked = self.state.checked_keys.len(),
            half_checked = self.state.half_checked_keys.len(),
            notify = self.on_change.is_some(),
            "selection committed"
        );
        if let Some(listener) = self.on_change.as_mut() {
            listener(&self.state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn k(s: &str) -> Key {
        Key::from(s)
    }

    fn strings(set: &IndexSet<Key>) -> Vec<String> {
        set.iter().map(ToString::to_string).collect()
    }

    fn tree() -> Vec<TreeNode> {
        vec![TreeNode::new("1", "1")
            .child(TreeNode::new("1-1", "1-1").child(TreeNode::new("1-1-1", "1-1-1")))
            .child(TreeNode::new("1-2", "1-2"))]
    }

    fn recording() -> (Rc<RefCell<Vec<CheckedState>>>, impl FnMut(&CheckedState) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, move |state: &CheckedState| sink.borrow_mut().push(state.clone()))
    }

    #[test]
    fn toggle_commits_and_notifies() {
        let (seen, listener) = recording();
        let mut ctl = TreeLinkController::default()
            .with_tree(&tree())
            .unwrap()
            .with_on_change(listener);

        ctl.toggle(&k("1-2"), true).unwrap();
        assert_eq!(strings(ctl.checked_keys()), vec!["1-2"]);
        assert_eq!(strings(ctl.half_checked_keys()), vec!["1"]);
        assert_eq!(ctl.true_checked(), ctl.state());
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(&seen.borrow()[0], ctl.state());
    }

    #[test]
    fn toggle_unknown_key_fails() {
        let mut ctl = TreeLinkController::default().with_tree(&tree()).unwrap();
        let err = ctl.toggle(&k("9"), true).unwrap_err();
        assert!(matches!(err, TreeLinkError::UnknownKey(key) if key == k("9")));
        assert!(ctl.state().is_empty());
    }

    #[test]
    fn preview_does_not_commit() {
        let ctl = TreeLinkController::default().with_tree(&tree()).unwrap();
        let event = CheckedEvent::new(ctl.tree_link().get(&k("1-1")).unwrap(), true);
        let preview = ctl.latest_checked_keys(&event);
        assert_eq!(strings(&preview.checked_keys), vec!["1-1", "1-1-1"]);
        assert!(ctl.state().is_empty());
    }

    #[test]
    fn event_survives_for_toggle() {
        let mut ctl = TreeLinkController::default().with_tree(&tree()).unwrap();
        let event = CheckedEvent::new(ctl.tree_link().get(&k("1")).unwrap(), true);
        ctl.on_inner_checked_change(&event).unwrap();
        assert_eq!(ctl.checked_keys().len(), 4);
        assert_eq!(ctl.node_status(&k("1-1-1")), NodeStatus::Checked);
    }

    #[test]
    fn matching_value_is_ignored() {
        let (seen, listener) = recording();
        let mut ctl = TreeLinkController::default()
            .with_tree(&tree())
            .unwrap()
            .with_on_change(listener);

        ctl.toggle(&k("1-2"), true).unwrap();
        let echoed = seen.borrow()[0].clone();
        ctl.set_value(echoed);
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn empty_value_clears_silently() {
        let (seen, listener) = recording();
        let mut ctl = TreeLinkController::default()
            .with_tree(&tree())
            .unwrap()
            .with_on_change(listener);

        ctl.toggle(&k("1"), true).unwrap();
        ctl.set_value(CheckedState::new());
        assert!(ctl.state().is_empty());
        assert!(ctl.true_checked().is_empty());
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn value_is_held_until_tree_arrives() {
        let mut ctl = TreeLinkController::default();
        ctl.set_value(CheckedState::from_keys(["1-1-1"], Vec::<Key>::new()));
        assert!(ctl.state().is_empty());

        ctl.set_tree(&tree()).unwrap();
        assert_eq!(strings(ctl.checked_keys()), vec!["1-1-1", "1-1"]);
        assert_eq!(strings(ctl.half_checked_keys()), vec!["1"]);
    }

    #[test]
    fn select_all_on_empty_tree_is_noop() {
        let (seen, listener) = recording();
        let mut ctl = TreeLinkController::default().with_on_change(listener);
        ctl.on_check_all_change();
        assert!(seen.borrow().is_empty());
        assert!(ctl.is_check_all());
        assert!(!ctl.check_all_is_indeterminate());
    }

    #[test]
    fn debug_omits_listener_body() {
        let ctl = TreeLinkController::default().with_on_change(|_| {});
        let rendered = format!("{ctl:?}");
        assert!(rendered.contains("has_listener: true"));
    }
}
