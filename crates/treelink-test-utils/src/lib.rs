//! Testing utilities for the treelink workspace
//!
//! Shared fixtures, generators, and proptest strategies.

#![allow(missing_docs)]

use proptest::prelude::*;
use serde_json::{json, Value};
use treelink_tree::{FieldNames, Key, TreeNode};

pub fn key(s: &str) -> Key {
    Key::from(s)
}

pub fn keys(list: &[&str]) -> Vec<Key> {
    list.iter().map(|s| Key::from(*s)).collect()
}

/// Render keys as strings, keeping order
pub fn key_strings<'a>(list: impl IntoIterator<Item = &'a Key>) -> Vec<String> {
    list.into_iter().map(ToString::to_string).collect()
}

/// `1 -> (1-1 -> (1-1-1, 1-1-2), 1-2)`, with the listed keys disabled
pub fn sample_tree_with_disabled(disabled: &[&str]) -> Vec<TreeNode> {
    let node = |k: &str| {
        let n = TreeNode::new(k, format!("node {k}"));
        if disabled.contains(&k) {
            n.disabled(true)
        } else {
            n
        }
    };
    vec![node("1")
        .child(node("1-1").child(node("1-1-1")).child(node("1-1-2")))
        .child(node("1-2"))]
}

pub fn sample_tree() -> Vec<TreeNode> {
    sample_tree_with_disabled(&[])
}

/// Two-root forest with a disabled subtree root and a disabled leaf
///
/// ```text
/// a
/// |- a-1 (disabled)
/// |  |- a-1-1
/// |  `- a-1-2
/// `- a-2
///    |- a-2-1
///    `- a-2-2 (disabled)
/// b
/// `- b-1
/// ```
pub fn mixed_forest() -> Vec<TreeNode> {
    vec![
        TreeNode::new("a", "A")
            .child(
                TreeNode::new("a-1", "A1")
                    .disabled(true)
                    .child(TreeNode::new("a-1-1", "A11"))
                    .child(TreeNode::new("a-1-2", "A12")),
            )
            .child(
                TreeNode::new("a-2", "A2")
                    .child(TreeNode::new("a-2-1", "A21"))
                    .child(TreeNode::new("a-2-2", "A22").disabled(true)),
            ),
        TreeNode::new("b", "B").child(TreeNode::new("b-1", "B1")),
    ]
}

/// Field mapping used by [`titled_forest_json`]
pub fn titled_field_names() -> FieldNames {
    FieldNames::new("title", "key", "children")
}

/// Dynamic forest keyed by `key` and labelled by `title`
pub fn titled_forest_json() -> Value {
    json!([
        {
            "title": "0-0",
            "key": "0-0",
            "children": [
                {
                    "title": "0-0-0",
                    "key": "0-0-0",
                    "children": [
                        { "title": "0-0-0-0", "key": "0-0-0-0" },
                        { "title": "0-0-0-1", "key": "0-0-0-1" },
                        { "title": "0-0-0-2", "key": "0-0-0-2" }
                    ]
                },
                {
                    "title": "0-0-1",
                    "key": "0-0-1",
                    "children": [
                        { "title": "0-0-1-0", "key": "0-0-1-0" },
                        { "title": "0-0-1-1", "key": "0-0-1-1" },
                        { "title": "0-0-1-2", "key": "0-0-1-2" }
                    ]
                },
                { "title": "0-0-2", "key": "0-0-2" }
            ]
        },
        { "title": "0-1", "key": "0-1" },
        { "title": "0-2", "key": "0-2" }
    ])
}

/// Uniform forest: `roots` trees, each node with `fanout` children, `depth`
/// levels deep. Keys are sequential integers in pre-order.
pub fn uniform_forest(roots: usize, fanout: usize, depth: usize) -> Vec<TreeNode> {
    fn grow(next: &mut i64, fanout: usize, remaining: usize) -> TreeNode {
        let id = *next;
        *next += 1;
        let node = TreeNode::new(id, format!("n{id}"));
        if remaining == 0 {
            return node;
        }
        let children = (0..fanout).map(|_| grow(next, fanout, remaining - 1)).collect();
        node.with_children(children)
    }

    let mut next = 0;
    (0..roots)
        .map(|_| grow(&mut next, fanout, depth.saturating_sub(1)))
        .collect()
}

/// Forest from a parent table
///
/// Entry `i` hangs under entry `p % (i + 1)`, or is a root when that lands on
/// `i` itself. Keys are the entry indices.
pub fn forest_from_parents(table: &[(usize, bool)]) -> Vec<TreeNode> {
    let parents: Vec<Option<usize>> = table
        .iter()
        .enumerate()
        .map(|(i, (p, _))| {
            let p = p % (i + 1);
            (p != i).then_some(p)
        })
        .collect();

    let mut built: Vec<Option<TreeNode>> = table
        .iter()
        .enumerate()
        .map(|(i, (_, disabled))| {
            let id = i64::try_from(i).expect("forest index fits in i64");
            let node = TreeNode::new(id, format!("n{i}"));
            Some(if *disabled { node.disabled(true) } else { node })
        })
        .collect();

    for i in (0..table.len()).rev() {
        if let Some(p) = parents[i] {
            let node = built[i].take().expect("child not yet attached");
            built[p]
                .as_mut()
                .expect("parent precedes child")
                .children
                .insert(0, node);
        }
    }

    built.into_iter().flatten().collect()
}

/// Random forest of up to `max_nodes` nodes, about one in five disabled
pub fn arb_forest(max_nodes: usize) -> impl Strategy<Value = Vec<TreeNode>> {
    prop::collection::vec((any::<usize>(), prop::bool::weighted(0.2)), 1..max_nodes)
        .prop_map(|table| forest_from_parents(&table))
}

/// Random forest plus a random subset of its keys
pub fn arb_forest_and_keys(max_nodes: usize) -> impl Strategy<Value = (Vec<TreeNode>, Vec<Key>)> {
    arb_forest(max_nodes).prop_flat_map(|forest| {
        let total: usize = forest.iter().map(TreeNode::subtree_len).sum();
        let picks = prop::collection::vec(0..total, 0..=total.min(8));
        (Just(forest), picks).prop_map(|(forest, picks)| {
            let keys = picks
                .into_iter()
                .map(|i| Key::Int(i64::try_from(i).expect("forest index fits in i64")))
                .collect();
            (forest, keys)
        })
    })
}
