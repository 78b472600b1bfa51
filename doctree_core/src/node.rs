//! Node identifiers, kinds and the node record itself.

use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Identifier of a node, unique for the lifetime of a registry.
///
/// Ids are handed out in creation order starting at 0 (the root) and are
/// never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeId(u64);

impl NodeId {
    /// Wrap a raw id.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw numeric value.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Arena slot of this id, or `None` if it cannot fit in a `usize`.
    pub(crate) fn index(self) -> Option<usize> {
        usize::try_from(self.0).ok()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Kind of a node. Only folders may contain children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A container for other nodes.
    Folder,
    /// A worksheet document.
    Worksheet,
    /// A dashboard document.
    Dashboard,
}

impl NodeKind {
    /// All known kinds, in display order.
    pub const ALL: [NodeKind; 3] = [NodeKind::Folder, NodeKind::Worksheet, NodeKind::Dashboard];

    /// Lowercase name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Folder => "folder",
            NodeKind::Worksheet => "worksheet",
            NodeKind::Dashboard => "dashboard",
        }
    }

    /// Whether nodes of this kind can hold children.
    pub fn is_folder(self) -> bool {
        self == NodeKind::Folder
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        NodeKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| Error::invalid_kind(trimmed))
    }
}

/// A single registry entry.
///
/// Nodes refer to each other by id only; the registry owns every node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) name: String,
    pub(crate) kind: NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) parent: Option<NodeId>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    pub(crate) fn new(id: NodeId, name: String, kind: NodeKind, parent: Option<NodeId>) -> Self {
        Self {
            id,
            name,
            kind,
            parent,
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Parent folder, or `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Direct children in attachment order. Always empty for non-folders.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_folder(&self) -> bool {
        self.kind.is_folder()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
