//! Error types for doctree_core.

use crate::node::{NodeId, NodeKind};
use thiserror::Error;

/// Result type alias using doctree_core's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during registry operations.
///
/// Every variant is recoverable: the registry is left exactly as it was
/// before the failing call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An id expected to name a folder does not exist.
    #[error("Folder not found: {id}")]
    FolderNotFound { id: NodeId },

    /// The id exists but names something other than a folder.
    #[error("Not a folder: {id} is a {kind}")]
    NotAFolder { id: NodeId, kind: NodeKind },

    /// No child with the given name exists under the given parent.
    #[error("File not found: {name:?} in {}", parent_label(.parent))]
    FileNotFound {
        name: String,
        parent: Option<NodeId>,
    },

    /// The move would make a node its own ancestor.
    #[error("Invalid move: moving {node} into {destination} would make it its own ancestor")]
    InvalidMove { node: NodeId, destination: NodeId },

    /// Node id does not exist.
    #[error("Node not found: {id}")]
    NodeNotFound { id: NodeId },

    /// Text that does not name a node kind.
    #[error("Invalid kind: {kind:?} (expected folder, worksheet or dashboard)")]
    InvalidKind { kind: String },
}

fn parent_label(parent: &Option<NodeId>) -> String {
    match parent {
        Some(id) => format!("folder {}", id),
        None => "the root".to_string(),
    }
}

impl Error {
    /// Create a FolderNotFound error.
    pub fn folder_not_found(id: NodeId) -> Self {
        Error::FolderNotFound { id }
    }

    /// Create a NotAFolder error.
    pub fn not_a_folder(id: NodeId, kind: NodeKind) -> Self {
        Error::NotAFolder { id, kind }
    }

    /// Create a FileNotFound error.
    pub fn file_not_found(name: impl Into<String>, parent: Option<NodeId>) -> Self {
        Error::FileNotFound {
            name: name.into(),
            parent,
        }
    }

    /// Create an InvalidMove error.
    pub fn invalid_move(node: NodeId, destination: NodeId) -> Self {
        Error::InvalidMove { node, destination }
    }

    /// Create a NodeNotFound error.
    pub fn node_not_found(id: NodeId) -> Self {
        Error::NodeNotFound { id }
    }

    /// Create an InvalidKind error.
    pub fn invalid_kind(kind: impl Into<String>) -> Self {
        Error::InvalidKind { kind: kind.into() }
    }
}
