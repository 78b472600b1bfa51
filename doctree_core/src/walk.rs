//! Tree walking: pre-order traversal and ancestor chains.

use crate::node::{Node, NodeId};
use crate::registry::Registry;

/// Lazy pre-order walk over a registry, yielding `(depth, node)` pairs.
///
/// Created by [`Registry::traverse`]. Uses an explicit stack so deep trees
/// do not grow the call stack.
#[derive(Debug, Clone)]
pub struct Walk<'a> {
    registry: &'a Registry,
    stack: Vec<(usize, NodeId)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, id) = self.stack.pop()?;
        let node = self.registry.get(id).ok()?;

        // Reverse so the first child is popped first
        self.stack
            .extend(node.children.iter().rev().map(|&child| (depth + 1, child)));

        Some((depth, node))
    }
}

/// Chain of ids from a node up to the root, the node itself first.
///
/// Created by [`Registry::ancestors`]. Empty if the starting id is unknown.
#[derive(Debug, Clone)]
pub struct Ancestors<'a> {
    registry: &'a Registry,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.registry.get(current).ok().and_then(Node::parent);
        Some(current)
    }
}

impl Registry {
    /// Walk the whole tree in pre-order, starting at the root with depth 0.
    ///
    /// Every call starts a fresh walk; the registry is only read.
    pub fn traverse(&self) -> Walk<'_> {
        Walk {
            registry: self,
            stack: vec![(0, self.root())],
        }
    }

    /// Iterate from `node` up to the root, `node` included.
    pub fn ancestors(&self, node: NodeId) -> Ancestors<'_> {
        let next = self.get(node).ok().map(Node::id);
        Ancestors {
            registry: self,
            next,
        }
    }
}
