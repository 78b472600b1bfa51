//! The registry: node storage, creation and name-scoped queries.

use crate::error::{Error, Result};
use crate::node::{Node, NodeId, NodeKind};

/// Name given to the root folder when none is configured.
pub const DEFAULT_ROOT_NAME: &str = "MyDocuments";

/// An in-memory tree of folders, worksheets and dashboards.
///
/// Nodes live in an arena indexed by id. Because nodes are never removed,
/// the id of a node is also its position in the arena.
#[derive(Debug, Clone)]
pub struct Registry {
    nodes: Vec<Node>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Create a registry holding only a root folder named [`DEFAULT_ROOT_NAME`].
    pub fn new() -> Self {
        Self::with_root_name(DEFAULT_ROOT_NAME)
    }

    /// Create a registry whose root folder has the given name.
    pub fn with_root_name(name: impl Into<String>) -> Self {
        let root = Node::new(NodeId::new(0), name.into(), NodeKind::Folder, None);
        Self { nodes: vec![root] }
    }

    /// Id of the root folder.
    pub fn root(&self) -> NodeId {
        NodeId::new(0)
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a registry has at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node by id.
    pub fn get(&self, id: NodeId) -> Result<&Node> {
        self.slot(id).ok_or_else(|| Error::node_not_found(id))
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        id.index()
            .and_then(|index| self.nodes.get_mut(index))
            .ok_or_else(|| Error::node_not_found(id))
    }

    fn slot(&self, id: NodeId) -> Option<&Node> {
        id.index().and_then(|index| self.nodes.get(index))
    }

    /// Resolve an id that must name a folder.
    pub(crate) fn folder(&self, id: NodeId) -> Result<&Node> {
        let node = self.slot(id).ok_or_else(|| Error::folder_not_found(id))?;
        if !node.is_folder() {
            return Err(Error::not_a_folder(id, node.kind));
        }
        Ok(node)
    }

    /// Allocate the next id and store a new node under it.
    fn create(&mut self, name: String, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u64);
        self.nodes.push(Node::new(id, name, kind, parent));
        id
    }

    /// Add a new node of `kind` to the folder `parent`.
    ///
    /// Names are not required to be unique; siblings sharing a name are told
    /// apart by id only.
    pub fn add_child(
        &mut self,
        name: impl Into<String>,
        kind: NodeKind,
        parent: NodeId,
    ) -> Result<NodeId> {
        self.folder(parent)?;

        let name = name.into();
        let id = self.create(name, kind, Some(parent));
        self.get_mut(parent)?.children.push(id);

        tracing::debug!(%id, %parent, %kind, "created node");
        Ok(id)
    }

    /// Find a node by name among the direct children of `parent`.
    ///
    /// With `parent == None` only the root is considered. The first match in
    /// attachment order wins; the search does not descend into subfolders.
    pub fn find_id(&self, name: &str, parent: Option<NodeId>) -> Result<NodeId> {
        let found = match parent {
            None => {
                let root = self.get(self.root())?;
                (root.name == name).then_some(root.id)
            }
            Some(folder) => self
                .folder(folder)?
                .children
                .iter()
                .copied()
                .find(|&child| self.slot(child).is_some_and(|node| node.name == name)),
        };

        found.ok_or_else(|| Error::file_not_found(name, parent))
    }

    /// Count the nodes of the given kind. The root counts as a folder.
    pub fn count_by_kind(&self, kind: NodeKind) -> usize {
        self.nodes.iter().filter(|node| node.kind == kind).count()
    }

    /// Names of the direct children of `folder`, in attachment order.
    pub fn list_children(&self, folder: NodeId) -> Result<Vec<&str>> {
        let folder = self.folder(folder)?;
        Ok(folder
            .children
            .iter()
            .filter_map(|&child| self.slot(child))
            .map(|node| node.name.as_str())
            .collect())
    }

    /// All nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Panic unless every structural invariant holds.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        let roots: Vec<_> = self.nodes.iter().filter(|n| n.is_root()).collect();
        assert_eq!(roots.len(), 1, "exactly one root");
        assert!(roots[0].is_folder(), "root is a folder");

        for (index, node) in self.nodes.iter().enumerate() {
            assert_eq!(node.id.index(), Some(index), "id matches arena slot");

            if let Some(parent) = node.parent {
                let parent = self.slot(parent).expect("parent exists");
                assert!(parent.is_folder(), "parent of {} is a folder", node.id);
                assert_eq!(
                    parent.children.iter().filter(|&&c| c == node.id).count(),
                    1,
                    "{} listed once under its parent",
                    node.id
                );
            }

            for child in &node.children {
                assert_eq!(self.slot(*child).map(Node::parent), Some(Some(node.id)));
            }
            if !node.is_folder() {
                assert!(node.children.is_empty());
            }

            let chain: Vec<_> = self
                .ancestors(node.id)
                .take(self.nodes.len() + 1)
                .collect();
            assert!(chain.len() <= self.nodes.len(), "no cycle above {}", node.id);
            assert_eq!(chain.last(), Some(&self.root()));
        }
    }
}
