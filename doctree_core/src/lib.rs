//! # Doctree Core
//!
//! An in-memory registry of hierarchically organized documents: folders,
//! worksheets and dashboards.
//!
//! Every registry starts with a single root folder. Documents and folders are
//! added under existing folders, looked up by name within a folder, moved
//! between folders, counted by kind, and walked in pre-order for display.
//!
//! ## Features
//!
//! - Arena storage: nodes refer to each other by id, never by reference
//! - Stable, monotonically increasing ids
//! - Moves that can never make a folder its own ancestor
//! - Lazy, stack-based traversal
//!
//! ## Example
//!
//! ```
//! use doctree_core::{NodeKind, Registry};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut registry = Registry::new();
//! let root = registry.find_id("MyDocuments", None)?;
//!
//! let draft = registry.add_child("draft", NodeKind::Folder, root)?;
//! let complete = registry.add_child("complete", NodeKind::Folder, root)?;
//! let foo = registry.add_child("foo", NodeKind::Worksheet, draft)?;
//!
//! registry.move_node(foo, complete)?;
//! assert_eq!(registry.list_children(complete)?, vec!["foo"]);
//!
//! // A folder cannot be moved below itself
//! assert!(registry.move_node(root, draft).is_err());
//!
//! for (depth, node) in registry.traverse() {
//!     println!("{}{}", "  ".repeat(depth), node.name());
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod node;
mod registry;
mod relocate;
mod walk;

pub use error::{Error, Result};
pub use node::{Node, NodeId, NodeKind};
pub use registry::{DEFAULT_ROOT_NAME, Registry};
pub use walk::{Ancestors, Walk};
