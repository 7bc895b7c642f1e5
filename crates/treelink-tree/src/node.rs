//! Input tree model
//!
//! [`TreeNode`] is the typed input consumed by the indexer. Callers holding
//! dynamic JSON with their own field naming go through
//! [`TreeNode::forest_from_json`], which resolves the [`FieldNames`]
//! mapping once and produces typed nodes.

use crate::error::TreeError;
use crate::key::Key;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name of the per-node disabled flag in dynamic input
pub const DISABLED_FIELD: &str = "disabled";

/// Field-name mapping for dynamic tree input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldNames {
    /// Field holding the display label
    pub label: String,
    /// Field holding the node identifier
    pub value: String,
    /// Field holding the child sequence
    pub children: String,
}

impl FieldNames {
    /// Create a custom mapping
    #[must_use]
    pub fn new(
        label: impl Into<String>,
        value: impl Into<String>,
        children: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            children: children.into(),
        }
    }

    /// Whether `field` is one of the mapped names or the disabled flag
    fn is_reserved(&self, field: &str) -> bool {
        field == self.label || field == self.value || field == self.children || field == DISABLED_FIELD
    }
}

impl Default for FieldNames {
    fn default() -> Self {
        Self::new("label", "value", "children")
    }
}

/// A node of the input tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Unique identifier
    pub value: Key,

    /// Display label
    #[serde(default)]
    pub label: String,

    /// Ordered children
    #[serde(default)]
    pub children: Vec<TreeNode>,

    /// Per-node disabled flag, `None` meaning enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,

    /// Caller fields carried through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TreeNode {
    /// Create a leaf node
    #[must_use]
    pub fn new(value: impl Into<Key>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            children: Vec::new(),
            disabled: None,
            extra: Map::new(),
        }
    }

    /// Add a child node
    #[must_use]
    pub fn child(mut self, node: TreeNode) -> Self {
        self.children.push(node);
        self
    }

    /// Replace the children
    #[must_use]
    pub fn with_children(mut self, nodes: Vec<TreeNode>) -> Self {
        self.children = nodes;
        self
    }

    /// Set the disabled flag
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = Some(disabled);
        self
    }

    /// Attach an extra caller field
    #[must_use]
    pub fn with_extra(mut self, field: impl Into<String>, value: Value) -> Self {
        self.extra.insert(field.into(), value);
        self
    }

    /// Disabled flag with absence normalized to `false`
    #[inline]
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled.unwrap_or(false)
    }

    /// Total number of nodes in this subtree, including `self`
    #[must_use]
    pub fn subtree_len(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(&node.children);
        }
        count
    }

    /// Read a forest from dynamic JSON using a field-name mapping
    ///
    /// # Errors
    /// Returns [`TreeError`] when the input is not an array of node objects,
    /// a node lacks an identifier, or a label/identifier has the wrong type.
    pub fn forest_from_json(value: &Value, names: &FieldNames) -> Result<Vec<TreeNode>, TreeError> {
        parse_forest(value, names, "$")
    }

    /// Write this node back to dynamic JSON using a field-name mapping
    #[must_use]
    pub fn to_json(&self, names: &FieldNames) -> Value {
        let mut obj = self.extra.clone();
        obj.insert(names.value.clone(), self.value.to_json());
        obj.insert(names.label.clone(), Value::String(self.label.clone()));
        if let Some(disabled) = self.disabled {
            obj.insert(DISABLED_FIELD.to_string(), Value::Bool(disabled));
        }
        if !self.children.is_empty() {
            obj.insert(
                names.children.clone(),
                Value::Array(self.children.iter().map(|c| c.to_json(names)).collect()),
            );
        }
        Value::Object(obj)
    }
}

fn parse_forest(value: &Value, names: &FieldNames, path: &str) -> Result<Vec<TreeNode>, TreeError> {
    let items = value.as_array().ok_or_else(|| TreeError::NotAnArray {
        path: path.to_string(),
    })?;

    items
        .iter()
        .enumerate()
        .map(|(i, item)| parse_node(item, names, &format!("{path}[{i}]")))
        .collect()
}

fn parse_node(value: &Value, names: &FieldNames, path: &str) -> Result<TreeNode, TreeError> {
    let obj = value.as_object().ok_or_else(|| TreeError::NotAnObject {
        path: path.to_string(),
    })?;

    let raw_key = obj.get(&names.value).ok_or_else(|| TreeError::MissingField {
        field: names.value.clone(),
        path: path.to_string(),
    })?;
    let key = Key::from_json(raw_key).ok_or_else(|| TreeError::InvalidKey {
        field: names.value.clone(),
        path: path.to_string(),
    })?;

    let label = match obj.get(&names.label) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(_) => {
            return Err(TreeError::InvalidLabel {
                field: names.label.clone(),
                path: path.to_string(),
            })
        }
    };

    let children = match obj.get(&names.children) {
        None | Some(Value::Null) => Vec::new(),
        Some(children) => parse_forest(children, names, &format!("{path}.{}", names.children))?,
    };

    let extra = obj
        .iter()
        .filter(|(field, _)| !names.is_reserved(field))
        .map(|(field, v)| (field.clone(), v.clone()))
        .collect();

    Ok(TreeNode {
        value: key,
        label,
        children,
        disabled: obj.get(DISABLED_FIELD).and_then(Value::as_bool),
        extra,
    })
}

/// Node payload stored in the index
///
/// A copy of the input node without its children, `disabled` normalized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeData {
    /// Unique identifier
    pub key: Key,
    /// Display label
    pub label: String,
    /// Own disabled flag
    pub disabled: bool,
    /// Caller fields
    pub extra: Map<String, Value>,
}

impl From<&TreeNode> for NodeData {
    fn from(node: &TreeNode) -> Self {
        Self {
            key: node.value.clone(),
            label: node.label.clone(),
            disabled: node.is_disabled(),
            extra: node.extra.clone(),
        }
    }
}
