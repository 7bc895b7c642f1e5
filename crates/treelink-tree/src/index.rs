//! Tree indexer
//!
//! Flattens a nested forest into [`TreeLink`], a map from [`Key`] to
//! [`IndexedNode`] that links every node to its parent and children and
//! records its depth and inherited disabled state.
//!
//! The index is built in one pre-order pass and is never patched; a changed
//! tree means a new `TreeLink`.

use crate::error::TreeError;
use crate::key::Key;
use crate::node::{NodeData, TreeNode};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// What the indexer does when two nodes share a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateKeyPolicy {
    /// Later nodes replace earlier ones; the entry keeps its first position
    #[default]
    Overwrite,

    /// Building fails with [`TreeError::DuplicateKey`]
    Reject,
}

/// Child reference stored on an indexed parent
#[derive(Debug, Clone, PartialEq)]
pub struct ChildLink {
    /// The child's payload, shared with the child's own entry
    pub node: Arc<NodeData>,

    /// Child's own disabled flag
    pub disabled: bool,

    /// Child disabled, or its parent or any further ancestor disabled
    pub parent_disabled: bool,
}

impl ChildLink {
    /// Child identifier
    #[inline]
    #[must_use]
    pub fn key(&self) -> &Key {
        &self.node.key
    }
}

/// A flattened tree node linked to its parent and children
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedNode {
    /// Node payload
    pub node: Arc<NodeData>,

    /// Ordered children
    pub children: Vec<ChildLink>,

    /// Depth, roots at 0
    pub level: usize,

    /// Parent identifier, `None` for roots
    pub parent_id: Option<Key>,

    /// Parent payload, `None` for roots
    pub parent_node: Option<Arc<NodeData>>,

    /// This node or any ancestor is disabled
    pub parent_disabled: bool,
}

impl IndexedNode {
    /// Node identifier
    #[inline]
    #[must_use]
    pub fn key(&self) -> &Key {
        &self.node.key
    }

    /// Own disabled flag
    #[inline]
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.node.disabled
    }

    /// Whether this is a root node
    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Children whose own disabled flag is clear
    pub fn enabled_children(&self) -> impl Iterator<Item = &ChildLink> {
        self.children.iter().filter(|child| !child.disabled)
    }
}

/// Map from key to indexed node, in pre-order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeLink {
    nodes: IndexMap<Key, IndexedNode>,
}

/// Pending pre-order visit
struct Frame<'a> {
    item: &'a TreeNode,
    data: Arc<NodeData>,
    level: usize,
    parent: Option<Arc<NodeData>>,
    inherited_disabled: bool,
}

impl TreeLink {
    /// Create an empty index
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a forest, later duplicates overwriting earlier ones
    #[must_use]
    pub fn build(tree: &[TreeNode]) -> Self {
        Self::index(tree).0
    }

    /// Index a forest under an explicit duplicate-key policy
    ///
    /// # Errors
    /// Returns [`TreeError::DuplicateKey`] for the first repeated key when
    /// the policy is [`DuplicateKeyPolicy::Reject`].
    pub fn build_with_policy(tree: &[TreeNode], policy: DuplicateKeyPolicy) -> Result<Self, TreeError> {
        let (link, duplicate) = Self::index(tree);
        match (policy, duplicate) {
            (DuplicateKeyPolicy::Reject, Some(key)) => Err(TreeError::DuplicateKey { key }),
            _ => Ok(link),
        }
    }

    /// Pre-order pass; returns the index and the first duplicate key seen
    fn index(tree: &[TreeNode]) -> (Self, Option<Key>) {
        let mut nodes = IndexMap::with_capacity(tree.iter().map(TreeNode::subtree_len).sum());
        let mut first_duplicate = None;

        // Explicit stack keeps deep trees off the call stack
        let mut stack: Vec<Frame<'_>> = tree
            .iter()
            .rev()
            .map(|item| Frame {
                item,
                data: Arc::new(NodeData::from(item)),
                level: 0,
                parent: None,
                inherited_disabled: false,
            })
            .collect();

        while let Some(frame) = stack.pop() {
            let own_disabled = frame.data.disabled;
            let subtree_disabled = own_disabled || frame.inherited_disabled;

            let child_data: Vec<Arc<NodeData>> = frame
                .item
                .children
                .iter()
                .map(|child| Arc::new(NodeData::from(child)))
                .collect();

            let children = child_data
                .iter()
                .map(|data| ChildLink {
                    node: Arc::clone(data),
                    disabled: data.disabled,
                    parent_disabled: data.disabled || subtree_disabled,
                })
                .collect();

            let entry = IndexedNode {
                node: Arc::clone(&frame.data),
                children,
                level: frame.level,
                parent_id: frame.parent.as_ref().map(|p| p.key.clone()),
                parent_node: frame.parent,
                parent_disabled: subtree_disabled,
            };

            if nodes.insert(frame.data.key.clone(), entry).is_some() {
                tracing::warn!(key = %frame.data.key, "duplicate node key, overwriting earlier entry");
                if first_duplicate.is_none() {
                    first_duplicate = Some(frame.data.key.clone());
                }
            }

            for (item, data) in frame.item.children.iter().zip(child_data).rev() {
                stack.push(Frame {
                    item,
                    data,
                    level: frame.level + 1,
                    parent: Some(Arc::clone(&frame.data)),
                    inherited_disabled: subtree_disabled,
                });
            }
        }

        tracing::debug!(nodes = nodes.len(), "indexed tree");
        (Self { nodes }, first_duplicate)
    }

    /// Lookup a node by key
    #[inline]
    #[must_use]
    pub fn get(&self, key: &Key) -> Option<&IndexedNode> {
        self.nodes.get(key)
    }

    /// Check if a key is indexed
    #[inline]
    #[must_use]
    pub fn contains(&self, key: &Key) -> bool {
        self.nodes.contains_key(key)
    }

    /// Number of indexed nodes
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the index is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate entries in pre-order
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &IndexedNode)> {
        self.nodes.iter()
    }

    /// Iterate keys in pre-order
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.nodes.keys()
    }

    /// Iterate indexed nodes in pre-order
    pub fn values(&self) -> impl Iterator<Item = &IndexedNode> {
        self.nodes.values()
    }

    /// Indexed parent of `key`
    #[must_use]
    pub fn parent_of(&self, key: &Key) -> Option<&IndexedNode> {
        self.get(key)?.parent_id.as_ref().and_then(|p| self.get(p))
    }

    /// Ancestors of `key`, nearest first
    ///
    /// The walk stops as soon as a step does not decrease the level, which
    /// only happens when duplicate keys have rewired the links.
    #[must_use]
    pub fn ancestors(&self, key: &Key) -> Vec<&IndexedNode> {
        let mut out = Vec::new();
        let Some(mut current) = self.get(key) else {
            return out;
        };
        while let Some(parent) = current.parent_id.as_ref().and_then(|p| self.get(p)) {
            if parent.level >= current.level {
                break;
            }
            out.push(parent);
            current = parent;
        }
        out
    }
}
