//! Controller configuration and events

use crate::error::{Result, TreeLinkError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use treelink_tree::{DuplicateKeyPolicy, FieldNames, IndexedNode, Key, NodeData};

/// Controller configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TreeLinkConfig {
    /// Disabled nodes stop select-all from reaching their descendants
    pub is_block_conduction_when_disabled: bool,
    /// Field mapping for dynamic tree input
    pub field_names: FieldNames,
    /// How the indexer treats repeated keys
    pub duplicate_keys: DuplicateKeyPolicy,
}

impl TreeLinkConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With blocking or non-blocking select-all
    #[inline]
    #[must_use]
    pub fn with_blocking(mut self, blocking: bool) -> Self {
        self.is_block_conduction_when_disabled = blocking;
        self
    }

    /// With a field mapping
    #[inline]
    #[must_use]
    pub fn with_field_names(mut self, names: FieldNames) -> Self {
        self.field_names = names;
        self
    }

    /// With a duplicate key policy
    #[inline]
    #[must_use]
    pub fn with_duplicate_keys(mut self, policy: DuplicateKeyPolicy) -> Self {
        self.duplicate_keys = policy;
        self
    }

    /// Parse from TOML
    ///
    /// # Errors
    ///
    /// Returns [`TreeLinkError::Toml`] on malformed input.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        Ok(toml::from_str(input)?)
    }

    /// Parse from JSON
    ///
    /// # Errors
    ///
    /// Returns [`TreeLinkError::Json`] on malformed input.
    pub fn from_json_str(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Load from a `.toml` or `.json` file
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read, its extension is neither `toml`
    /// nor `json`, or its content does not parse.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let parse: fn(&str) -> Result<Self> = match extension.as_deref() {
            Some("toml") => Self::from_toml_str,
            Some("json") => Self::from_json_str,
            _ => {
                return Err(TreeLinkError::Config(format!(
                    "unsupported config format: {}",
                    path.display()
                )))
            }
        };

        let config = parse(&std::fs::read_to_string(path)?)?;
        tracing::debug!(path = %path.display(), blocking = config.is_block_conduction_when_disabled, "loaded config");
        Ok(config)
    }
}

impl Default for TreeLinkConfig {
    fn default() -> Self {
        Self {
            is_block_conduction_when_disabled: true,
            field_names: FieldNames::default(),
            duplicate_keys: DuplicateKeyPolicy::default(),
        }
    }
}

/// A single node toggled from the outside
///
/// Holds the node payload rather than a borrow of the index so the event
/// can be handed back to the controller that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckedEvent {
    /// New checked flag
    pub checked: bool,
    /// Toggled node
    pub node: Arc<NodeData>,
}

impl CheckedEvent {
    /// Event for an indexed node
    #[inline]
    #[must_use]
    pub fn new(node: &IndexedNode, checked: bool) -> Self {
        Self {
            checked,
            node: Arc::clone(&node.node),
        }
    }

    /// Identifier of the toggled node
    #[inline]
    #[must_use]
    pub fn key(&self) -> &Key {
        &self.node.key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_blocks_conduction() {
        let config = TreeLinkConfig::new();
        assert!(config.is_block_conduction_when_disabled);
        assert_eq!(config.field_names, FieldNames::default());
        assert_eq!(config.duplicate_keys, DuplicateKeyPolicy::Overwrite);
    }

    #[test]
    fn parses_camel_case_toml() {
        let config = TreeLinkConfig::from_toml_str(
            r#"
            isBlockConductionWhenDisabled = false
            duplicateKeys = "reject"

            [fieldNames]
            label = "title"
            value = "key"
            "#,
        )
        .unwrap();

        assert!(!config.is_block_conduction_when_disabled);
        assert_eq!(config.duplicate_keys, DuplicateKeyPolicy::Reject);
        assert_eq!(config.field_names, FieldNames::new("title", "key", "children"));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = TreeLinkConfig::from_json_str("{}").unwrap();
        assert_eq!(config, TreeLinkConfig::default());
    }

    #[test]
    fn malformed_input_is_reported() {
        assert!(matches!(
            TreeLinkConfig::from_toml_str("isBlockConductionWhenDisabled = 3"),
            Err(TreeLinkError::Toml(_))
        ));
        assert!(matches!(
            TreeLinkConfig::from_json_str("{"),
            Err(TreeLinkError::Json(_))
        ));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = TreeLinkConfig::from_file("treelink.yaml").unwrap_err();
        assert!(matches!(err, TreeLinkError::Config(_)));
    }
}
