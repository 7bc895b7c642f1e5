//! Select-all strategies
//!
//! The header checkbox either checks everything it can reach or undoes what
//! the previous select-all added. The two strategies differ in how far a
//! disabled node lets the selection reach:
//!
//! - [`BlockingSelectAll`]: a disabled node shields its whole subtree
//! - [`NonBlockingSelectAll`]: only the disabled node itself is skipped
//!
//! In both, disabled nodes that are already checked stay checked.

use indexmap::IndexSet;
use std::iter;
use treelink_conduct::{CheckedState, Conductor};
use treelink_tree::{IndexedNode, Key, TreeLink};

/// Inputs of one select-all click
#[derive(Debug, Clone, Copy)]
pub struct SelectAllContext<'a> {
    /// Conductor over the current index
    pub conductor: Conductor<'a>,
    /// Committed state before the click
    pub current: &'a CheckedState,
    /// Whether the header checkbox shows a partial selection
    pub indeterminate: bool,
}

impl SelectAllContext<'_> {
    fn link(&self) -> &TreeLink {
        self.conductor.tree_link()
    }

    /// Disabled nodes that are checked and must survive the click
    fn preserved_disabled(&self) -> IndexSet<Key> {
        self.link()
            .values()
            .filter(|node| node.is_disabled() && self.current.is_checked(node.key()))
            .map(|node| node.key().clone())
            .collect()
    }
}

/// Strategy behind the select-all checkbox
pub trait SelectAllStrategy {
    /// Strategy name for logs
    fn name(&self) -> &'static str;

    /// Whether `node` counts towards "everything is checked"
    fn is_eligible(&self, node: &IndexedNode) -> bool;

    /// State after one click
    fn select_all(&self, ctx: &SelectAllContext<'_>) -> CheckedState;
}

/// Select-all that stops at disabled nodes
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockingSelectAll;

impl SelectAllStrategy for BlockingSelectAll {
    fn name(&self) -> &'static str {
        "blocking"
    }

    fn is_eligible(&self, node: &IndexedNode) -> bool {
        !node.parent_disabled
    }

    fn select_all(&self, ctx: &SelectAllContext<'_>) -> CheckedState {
        let link = ctx.link();
        let current = ctx.current;

        let mut reached = IndexSet::new();
        let mut reached_half = IndexSet::new();
        for root in ctx.conductor.levels().roots() {
            if link.get(root).map_or(true, IndexedNode::is_disabled) {
                continue;
            }
            let preview = ctx
                .conductor
                .check_true(current.checked_keys.iter().chain(iter::once(root)));
            reached.extend(preview.checked_keys);
            reached_half.extend(preview.half_checked_keys);
        }

        if !ctx.indeterminate {
            reached.retain(|key| !current.is_checked(key));
            reached_half.retain(|key| !current.is_half_checked(key));
        }

        let mut checked = ctx.preserved_disabled();
        checked.extend(reached);
        CheckedState::from_parts(checked, reached_half)
    }
}

/// Select-all that only skips disabled nodes themselves
#[derive(Debug, Clone, Copy, Default)]
pub struct NonBlockingSelectAll;

impl SelectAllStrategy for NonBlockingSelectAll {
    fn name(&self) -> &'static str {
        "non_blocking"
    }

    fn is_eligible(&self, node: &IndexedNode) -> bool {
        !node.is_disabled()
    }

    fn select_all(&self, ctx: &SelectAllContext<'_>) -> CheckedState {
        let link = ctx.link();

        let mut checked = ctx.preserved_disabled();
        checked.extend(
            link.values()
                .filter(|node| !node.is_disabled())
                .map(|node| node.key().clone())
                .filter(|key| ctx.indeterminate || !ctx.current.is_checked(key)),
        );

        let half: IndexSet<Key> = checked
            .iter()
            .filter_map(|key| link.get(key)?.parent_id.as_ref())
            .filter(|parent| !checked.contains(*parent))
            .cloned()
            .collect();

        CheckedState::from_parts(checked, half)
    }
}

/// Strategy for a blocking flag
#[must_use]
pub fn strategy_for(blocking: bool) -> &'static dyn SelectAllStrategy {
    if blocking {
        &BlockingSelectAll
    } else {
        &NonBlockingSelectAll
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use treelink_tree::{LevelIndex, TreeNode};

    fn k(s: &str) -> Key {
        Key::from(s)
    }

    fn strings(set: &IndexSet<Key>) -> Vec<String> {
        set.iter().map(ToString::to_string).collect()
    }

    /// r -> (d (disabled) -> d-1, e)
    fn tree() -> Vec<TreeNode> {
        vec![TreeNode::new("r", "r")
            .child(TreeNode::new("d", "d").disabled(true).child(TreeNode::new("d-1", "d-1")))
            .child(TreeNode::new("e", "e"))]
    }

    fn click(strategy: &dyn SelectAllStrategy, current: &CheckedState, indeterminate: bool) -> CheckedState {
        let link = TreeLink::build(&tree());
        let levels = LevelIndex::build(&link);
        strategy.select_all(&SelectAllContext {
            conductor: Conductor::new(&link, &levels),
            current,
            indeterminate,
        })
    }

    #[test]
    fn blocking_does_not_enter_disabled_subtree() {
        let state = click(&BlockingSelectAll, &CheckedState::new(), false);
        assert_eq!(strings(&state.checked_keys), vec!["r", "e"]);
        assert!(state.half_checked_keys.is_empty());
    }

    #[test]
    fn non_blocking_reaches_below_disabled_node() {
        let state = click(&NonBlockingSelectAll, &CheckedState::new(), false);
        assert_eq!(strings(&state.checked_keys), vec!["r", "d-1", "e"]);
        assert_eq!(strings(&state.half_checked_keys), vec!["d"]);
    }

    #[test]
    fn second_click_clears_but_keeps_disabled() {
        let current = CheckedState::from_keys(["r", "d", "e"], Vec::<Key>::new());
        let state = click(&BlockingSelectAll, &current, false);
        assert_eq!(strings(&state.checked_keys), vec!["d"]);
        assert!(state.half_checked_keys.is_empty());

        let state = click(&NonBlockingSelectAll, &current, false);
        assert_eq!(strings(&state.checked_keys), vec!["d", "d-1"]);
    }

    #[test]
    fn indeterminate_click_selects_everything() {
        let current = CheckedState::from_keys(["e"], ["r"]);
        let state = click(&BlockingSelectAll, &current, true);
        assert_eq!(strings(&state.checked_keys), vec!["e", "r"]);
        assert!(state.half_checked_keys.is_empty());
    }

    #[test]
    fn eligibility_follows_blocking_mode() {
        let link = TreeLink::build(&tree());
        let sub = link.get(&k("d-1")).unwrap();
        let disabled = link.get(&k("d")).unwrap();

        assert!(!BlockingSelectAll.is_eligible(sub));
        assert!(NonBlockingSelectAll.is_eligible(sub));
        assert!(!NonBlockingSelectAll.is_eligible(disabled));
        assert_eq!(strategy_for(true).name(), "blocking");
        assert_eq!(strategy_for(false).name(), "non_blocking");
    }
}
