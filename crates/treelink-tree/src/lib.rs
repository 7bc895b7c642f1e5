//! treelink tree model
//!
//! Input trees and the derived structures conduction runs over.
//!
//! # Overview
//!
//! - **TreeNode**: typed input node, readable from dynamic JSON via [`FieldNames`]
//! - **TreeLink**: flat `Key -> IndexedNode` map with parent/child links,
//!   depth, and inherited disabled state
//! - **LevelIndex**: keys bucketed by depth for top-down and bottom-up sweeps
//!
//! # Example
//!
//! ```rust
//! use treelink_tree::{Key, LevelIndex, TreeLink, TreeNode};
//!
//! let tree = vec![TreeNode::new("1", "root")
//!     .child(TreeNode::new("1-1", "a"))
//!     .child(TreeNode::new("1-2", "b").disabled(true))];
//!
//! let link = TreeLink::build(&tree);
//! let levels = LevelIndex::build(&link);
//!
//! assert_eq!(link.len(), 3);
//! assert_eq!(levels.max_level(), 1);
//! assert!(link.get(&Key::from("1-2")).unwrap().parent_disabled);
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod index;
pub mod key;
pub mod level;
pub mod node;

// Re-exports
pub use error::TreeError;
pub use index::{ChildLink, DuplicateKeyPolicy, IndexedNode, TreeLink};
pub use key::Key;
pub use level::LevelIndex;
pub use node::{FieldNames, NodeData, TreeNode, DISABLED_FIELD};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for tree indexing
    pub use crate::{FieldNames, IndexedNode, Key, LevelIndex, TreeLink, TreeNode};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
