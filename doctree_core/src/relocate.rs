//! Moving nodes between folders.

use crate::error::{Error, Result};
use crate::node::NodeId;
use crate::registry::Registry;

impl Registry {
    /// Move `node` into the folder `destination`.
    ///
    /// Fails with [`Error::InvalidMove`] when `destination` is `node` itself or
    /// lies somewhere below it, since the node would become its own ancestor.
    /// The root can never be moved for the same reason. Moving a node into the
    /// folder it already lives in succeeds and changes nothing.
    ///
    /// All checks run before the first write, so a failed move leaves the
    /// registry untouched.
    pub fn move_node(&mut self, node: NodeId, destination: NodeId) -> Result<()> {
        let current_parent = self.get(node)?.parent;
        self.folder(destination)?;

        if self.is_ancestor_or_self(node, destination) {
            tracing::debug!(%node, %destination, "rejected move: would create a cycle");
            return Err(Error::invalid_move(node, destination));
        }

        // Only the root lacks a parent, and the root is an ancestor of every
        // destination, so it was rejected above.
        let Some(old_parent) = current_parent else {
            return Err(Error::invalid_move(node, destination));
        };

        if old_parent == destination {
            return Ok(());
        }

        self.detach(old_parent, node)?;
        self.get_mut(destination)?.children.push(node);
        self.get_mut(node)?.parent = Some(destination);

        tracing::debug!(%node, from = %old_parent, to = %destination, "moved node");
        Ok(())
    }

    /// Whether `ancestor` appears on the chain from `node` up to the root,
    /// `node` included.
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.ancestors(node).any(|id| id == ancestor)
    }

    /// Remove `child` from `folder`'s children, preserving the order of the rest.
    fn detach(&mut self, folder: NodeId, child: NodeId) -> Result<()> {
        let children = &mut self.get_mut(folder)?.children;
        if let Some(position) = children.iter().position(|&id| id == child) {
            children.remove(position);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::error::Error;
    use crate::node::{NodeId, NodeKind};
    use crate::registry::Registry;

    /// root -> draft(1) -> foo(3); root -> complete(2) -> bar(4)
    fn sample() -> (Registry, [NodeId; 4]) {
        let mut registry = Registry::new();
        let root = registry.root();
        let draft = registry.add_child("draft", NodeKind::Folder, root).unwrap();
        let complete = registry.add_child("complete", NodeKind::Folder, root).unwrap();
        let foo = registry.add_child("foo", NodeKind::Worksheet, draft).unwrap();
        let bar = registry.add_child("bar", NodeKind::Dashboard, complete).unwrap();
        (registry, [draft, complete, foo, bar])
    }

    #[test]
    fn test_move_scenario() {
        let (mut registry, [draft, complete, foo, bar]) = sample();
        let root = registry.root();
        assert_eq!(
            [draft, complete, foo, bar].map(NodeId::get),
            [1, 2, 3, 4]
        );

        registry.move_node(foo, complete).unwrap();

        assert_eq!(registry.list_children(root).unwrap(), vec!["draft", "complete"]);
        assert!(registry.list_children(draft).unwrap().is_empty());
        assert_eq!(registry.list_children(complete).unwrap(), vec!["bar", "foo"]);
        assert_eq!(registry.get(foo).unwrap().parent(), Some(complete));
        registry.assert_invariants();
    }

    #[test]
    fn test_move_preserves_sibling_order() {
        let mut registry = Registry::new();
        let root = registry.root();
        let a = registry.add_child("a", NodeKind::Worksheet, root).unwrap();
        let b = registry.add_child("b", NodeKind::Worksheet, root).unwrap();
        let c = registry.add_child("c", NodeKind::Worksheet, root).unwrap();
        let dest = registry.add_child("dest", NodeKind::Folder, root).unwrap();

        registry.move_node(b, dest).unwrap();

        assert_eq!(registry.get(root).unwrap().children(), &[a, c, dest]);
        assert_eq!(registry.get(dest).unwrap().children(), &[b]);
    }

    #[test]
    fn test_move_into_child_rejected() {
        let (mut registry, [draft, _, _, _]) = sample();
        let inner = registry.add_child("inner", NodeKind::Folder, draft).unwrap();
        let before = registry.clone();

        let err = registry.move_node(draft, inner).unwrap_err();

        assert_eq!(err, Error::invalid_move(draft, inner));
        assert_eq!(registry.get(draft).unwrap(), before.get(draft).unwrap());
        assert_eq!(registry.get(inner).unwrap().parent(), Some(draft));
        assert_eq!(
            registry.get(registry.root()).unwrap(),
            before.get(before.root()).unwrap()
        );
        registry.assert_invariants();
    }

    #[test]
    fn test_move_into_grandchild_rejected() {
        let mut registry = Registry::new();
        let mut parent = registry.root();
        let mut levels = Vec::new();
        for depth in 1..=5 {
            parent = registry
                .add_child(format!("level{}", depth), NodeKind::Folder, parent)
                .unwrap();
            levels.push(parent);
        }

        // level2 under level4, which sits two levels below it
        assert_eq!(
            registry.move_node(levels[1], levels[3]).unwrap_err(),
            Error::invalid_move(levels[1], levels[3])
        );
        registry.assert_invariants();
    }

    #[test]
    fn test_move_into_self_rejected() {
        let (mut registry, [draft, _, _, _]) = sample();
        assert_eq!(
            registry.move_node(draft, draft).unwrap_err(),
            Error::invalid_move(draft, draft)
        );
    }

    #[test]
    fn test_move_root_rejected() {
        let (mut registry, [draft, _, _, _]) = sample();
        let root = registry.root();

        assert_eq!(
            registry.move_node(root, draft).unwrap_err(),
            Error::invalid_move(root, draft)
        );
        assert_eq!(
            registry.move_node(root, root).unwrap_err(),
            Error::invalid_move(root, root)
        );
        registry.assert_invariants();
    }

    #[test]
    fn test_move_nested_up() {
        let mut registry = Registry::new();
        let mut parent = registry.root();
        let mut levels = Vec::new();
        for depth in 1..=5 {
            parent = registry
                .add_child(format!("level{}", depth), NodeKind::Folder, parent)
                .unwrap();
            levels.push(parent);
        }

        // level4 (with level5 inside) moves up under level2
        registry.move_node(levels[3], levels[1]).unwrap();

        assert_eq!(registry.list_children(levels[1]).unwrap(), vec!["level3", "level4"]);
        assert!(registry.list_children(levels[2]).unwrap().is_empty());
        assert_eq!(registry.list_children(levels[3]).unwrap(), vec!["level5"]);
        registry.assert_invariants();
    }

    #[test]
    fn test_swap_is_rejected() {
        let mut registry = Registry::new();
        let root = registry.root();
        let folder1 = registry.add_child("folder1", NodeKind::Folder, root).unwrap();
        let folder2 = registry.add_child("folder2", NodeKind::Folder, root).unwrap();
        registry.add_child("folder1_1", NodeKind::Worksheet, folder1).unwrap();
        registry.add_child("folder1_2", NodeKind::Worksheet, folder1).unwrap();
        registry.add_child("folder2_1", NodeKind::Dashboard, folder2).unwrap();

        registry.move_node(folder1, folder2).unwrap();
        let err = registry.move_node(folder2, folder1).unwrap_err();

        assert_eq!(err, Error::invalid_move(folder2, folder1));
        assert_eq!(registry.list_children(root).unwrap(), vec!["folder2"]);
        assert_eq!(
            registry.list_children(folder2).unwrap(),
            vec!["folder2_1", "folder1"]
        );
        registry.assert_invariants();
    }

    #[test]
    fn test_move_to_current_parent_is_noop() {
        let (mut registry, [draft, _, foo, _]) = sample();
        let sibling = registry.add_child("sibling", NodeKind::Worksheet, draft).unwrap();
        let before = registry.clone();

        registry.move_node(foo, draft).unwrap();

        // foo stays first; a re-append would have moved it after sibling
        assert_eq!(registry.get(draft).unwrap().children(), &[foo, sibling]);
        assert!(registry.nodes().eq(before.nodes()));
    }

    #[test]
    fn test_move_validation_errors() {
        let (mut registry, [draft, _, foo, bar]) = sample();
        let missing = NodeId::new(100);

        assert_eq!(
            registry.move_node(missing, draft).unwrap_err(),
            Error::node_not_found(missing)
        );
        assert_eq!(
            registry.move_node(foo, missing).unwrap_err(),
            Error::folder_not_found(missing)
        );
        assert_eq!(
            registry.move_node(foo, bar).unwrap_err(),
            Error::not_a_folder(bar, NodeKind::Dashboard)
        );
        assert_eq!(registry.get(foo).unwrap().parent(), Some(draft));
        registry.assert_invariants();
    }

    #[test]
    fn test_move_folder_carries_subtree() {
        let (mut registry, [draft, complete, foo, _]) = sample();
        let project = registry.add_child("project", NodeKind::Folder, draft).unwrap();
        for page in ["page1", "page2", "page3"] {
            registry.add_child(page, NodeKind::Worksheet, project).unwrap();
        }
        registry.add_child("cover", NodeKind::Dashboard, project).unwrap();

        registry.move_node(project, complete).unwrap();

        let project = registry.find_id("project", Some(complete)).unwrap();
        let cover = registry.find_id("cover", Some(project)).unwrap();
        registry.move_node(cover, registry.root()).unwrap();

        assert_eq!(
            registry.list_children(registry.root()).unwrap(),
            vec!["draft", "complete", "cover"]
        );
        assert_eq!(registry.list_children(draft).unwrap(), vec!["foo"]);
        assert_eq!(registry.list_children(complete).unwrap(), vec!["bar", "project"]);
        assert_eq!(
            registry.list_children(project).unwrap(),
            vec!["page1", "page2", "page3"]
        );
        assert_eq!(registry.get(foo).unwrap().parent(), Some(draft));
        registry.assert_invariants();
    }

    // Property-based tests
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Add(NodeKind, prop::sample::Index),
        Move(prop::sample::Index, prop::sample::Index),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        let kind = prop_oneof![
            Just(NodeKind::Folder),
            Just(NodeKind::Worksheet),
            Just(NodeKind::Dashboard),
        ];
        prop_oneof![
            (kind, any::<prop::sample::Index>()).prop_map(|(k, i)| Op::Add(k, i)),
            (any::<prop::sample::Index>(), any::<prop::sample::Index>())
                .prop_map(|(a, b)| Op::Move(a, b)),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            max_shrink_iters: 10000,
            ..ProptestConfig::default()
        })]

        /// Random adds and moves keep the tree well formed, and kind counts
        /// only depend on the adds.
        #[test]
        fn prop_moves_keep_invariants(ops in prop::collection::vec(op_strategy(), 1..80)) {
            let mut registry = Registry::new();
            let mut added = [0usize; 3];

            for (step, op) in ops.into_iter().enumerate() {
                match op {
                    Op::Add(kind, pick) => {
                        let target = NodeId::new(pick.index(registry.len()) as u64);
                        let result = registry.add_child(format!("n{}", step), kind, target);
                        if result.is_ok() {
                            added[kind as usize] += 1;
                        }
                    }
                    Op::Move(a, b) => {
                        let node = NodeId::new(a.index(registry.len()) as u64);
                        let dest = NodeId::new(b.index(registry.len()) as u64);
                        let before = registry.clone();

                        match registry.move_node(node, dest) {
                            Ok(()) => {
                                prop_assert_eq!(registry.get(node)?.parent(), Some(dest));
                                prop_assert!(registry.get(dest)?.children().contains(&node));
                            }
                            Err(_) => {
                                prop_assert!(registry.nodes().eq(before.nodes()));
                            }
                        }
                    }
                }
            }

            registry.assert_invariants();
            prop_assert_eq!(registry.count_by_kind(NodeKind::Folder), added[0] + 1);
            prop_assert_eq!(registry.count_by_kind(NodeKind::Worksheet), added[1]);
            prop_assert_eq!(registry.count_by_kind(NodeKind::Dashboard), added[2]);
        }
    }
}
