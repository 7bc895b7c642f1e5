//! Error types for the controller
//!
//! Conduction itself never fails. Errors come from loading input: malformed
//! trees, bad configuration, or a toggle naming a node that is not indexed.

use treelink_tree::{Key, TreeError};

/// Main controller error type
#[derive(Debug, thiserror::Error)]
pub enum TreeLinkError {
    /// Tree input could not be indexed
    #[error("tree error: {0}")]
    Tree(#[from] TreeError),

    /// Toggle target is not in the index
    #[error("unknown node key: {0}")]
    UnknownKey(Key),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Reading a configuration file failed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML configuration did not parse
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON input did not parse
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TreeLinkError {
    /// Check if the error was caused by the supplied tree or key
    #[inline]
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::Tree(_) | Self::UnknownKey(_))
    }
}

/// Result alias for controller operations
pub type Result<T> = std::result::Result<T, TreeLinkError>;
