//! treelink controller
//!
//! Keeps a hierarchical multi-select consistent while the tree, the outside
//! value, and the user's clicks change.
//!
//! # Core Concepts
//!
//! - [`TreeLinkController`]: owns the index and the committed selection
//! - [`SelectAllStrategy`]: how far select-all reaches past disabled nodes
//! - [`TreeLinkConfig`]: blocking mode, field names, duplicate key policy
//!
//! # Example
//!
//! ```rust
//! use treelink_core::prelude::*;
//!
//! let tree = vec![TreeNode::new("1", "root")
//!     .child(TreeNode::new("1-1", "a"))
//!     .child(TreeNode::new("1-2", "b"))];
//!
//! let mut controller = TreeLinkController::new(TreeLinkConfig::default()).with_tree(&tree)?;
//! controller.toggle(&Key::from("1-1"), true)?;
//! assert_eq!(controller.node_status(&Key::from("1")), NodeStatus::HalfChecked);
//!
//! controller.on_check_all_change();
//! assert!(controller.is_check_all());
//! # Ok::<(), treelink_core::TreeLinkError>(())
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod controller;
mod error;
pub mod logging;
mod select_all;
mod types;

// Re-exports
pub use controller::{ChangeListener, TreeLinkController};
pub use error::{Result, TreeLinkError};
pub use select_all::{strategy_for, BlockingSelectAll, NonBlockingSelectAll, SelectAllContext, SelectAllStrategy};
pub use types::{CheckedEvent, TreeLinkConfig};

pub use treelink_conduct::{CheckedState, Conductor, NodeStatus};
pub use treelink_tree::{DuplicateKeyPolicy, FieldNames, IndexedNode, Key, LevelIndex, TreeLink, TreeNode};

/// Prelude for common imports
pub mod prelude {
    //! Common imports for driving a controller
    pub use crate::{
        CheckedEvent, CheckedState, DuplicateKeyPolicy, FieldNames, Key, NodeStatus, SelectAllStrategy,
        TreeLinkConfig, TreeLinkController, TreeLinkError, TreeNode,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
