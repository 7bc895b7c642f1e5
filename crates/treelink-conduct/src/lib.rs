//! treelink conduction engine
//!
//! Restores a consistent checked / half-checked pair after a check or an
//! uncheck.
//!
//! # Core Concepts
//!
//! - [`Conductor::check_true`]: cascade a check down, aggregate full/partial up
//! - [`Conductor::check_false`]: clear unchecked subtrees, rebuild partials
//! - [`CheckedState`]: the disjoint `(checkedKeys, halfCheckedKeys)` pair
//!
//! # Example
//!
//! ```rust
//! use treelink_conduct::Conductor;
//! use treelink_tree::{Key, LevelIndex, TreeLink, TreeNode};
//!
//! let tree = vec![TreeNode::new("1", "root")
//!     .child(TreeNode::new("1-1", "a"))
//!     .child(TreeNode::new("1-2", "b"))];
//! let link = TreeLink::build(&tree);
//! let levels = LevelIndex::build(&link);
//!
//! let state = Conductor::new(&link, &levels).check_true([Key::from("1-1")]);
//! assert!(state.is_checked(&Key::from("1-1")));
//! assert!(state.is_half_checked(&Key::from("1")));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod conductor;
mod state;

// Re-exports
pub use conductor::Conductor;
pub use state::{CheckedState, NodeStatus};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
