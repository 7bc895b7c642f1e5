//! Error types for tree input and indexing

use crate::key::Key;

/// Errors raised while reading or indexing an input tree
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// Forest or children field is not a JSON array
    #[error("expected an array of nodes at {path}")]
    NotAnArray {
        /// Location in the input
        path: String,
    },

    /// Tree node is not a JSON object
    #[error("expected a node object at {path}")]
    NotAnObject {
        /// Location in the input
        path: String,
    },

    /// Identifier field is absent
    #[error("missing field '{field}' at {path}")]
    MissingField {
        /// Configured field name
        field: String,
        /// Location in the input
        path: String,
    },

    /// Identifier is neither a string nor an integer
    #[error("field '{field}' at {path} is not a string or integer key")]
    InvalidKey {
        /// Configured field name
        field: String,
        /// Location in the input
        path: String,
    },

    /// Label is present but not a string
    #[error("field '{field}' at {path} is not a string label")]
    InvalidLabel {
        /// Configured field name
        field: String,
        /// Location in the input
        path: String,
    },

    /// Two nodes share an identifier and the index rejects duplicates
    #[error("duplicate node key: {key}")]
    DuplicateKey {
        /// The repeated key
        key: Key,
    },
}
