use std::collections::HashMap;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::category::CategoryNode;

/// Data payload for arena nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    pub id: String,
    pub name: String,
}

/// Node in the arena-based category forest.
#[derive(Debug)]
pub struct ArenaNode {
    pub data: NodeData,
    /// Index of parent node in the arena, None for roots
    pub parent: Option<Index>,
    /// Indices of child nodes, in insertion order
    pub children: Vec<Index>,
}

/// Arena-based forest used while assembling categories from flat records.
///
/// Uses a generational arena so parent links can be set after insertion
/// without shared ownership. Roots keep their insertion order.
#[derive(Debug, Default)]
pub struct CategoryArena {
    arena: Arena<ArenaNode>,
    roots: Vec<Index>,
}

impl CategoryArena {
    pub fn new() -> Self {
        Self::default()
    }

    #[instrument(level = "trace", skip(self))]
    pub fn insert_node(&mut self, data: NodeData, parent: Option<Index>) -> Index {
        let node_idx = self.arena.insert(ArenaNode {
            data,
            parent,
            children: Vec::new(),
        });

        match parent.and_then(|p| self.arena.get_mut(p)) {
            Some(parent) => parent.children.push(node_idx),
            None => self.roots.push(node_idx),
        }

        node_idx
    }

    /// Move a root under `parent`, appending it to the parent's children.
    ///
    /// Returns false when `child` is not a root or either index is stale.
    #[instrument(level = "trace", skip(self))]
    pub fn attach(&mut self, child: Index, parent: Index) -> bool {
        if !self.arena.contains(parent) || !self.roots.contains(&child) {
            return false;
        }
        let Some(node) = self.arena.get_mut(child) else {
            return false;
        };
        node.parent = Some(parent);
        self.roots.retain(|&r| r != child);
        if let Some(p) = self.arena.get_mut(parent) {
            p.children.push(child);
        }
        true
    }

    pub fn get_node(&self, idx: Index) -> Option<&ArenaNode> {
        self.arena.get(idx)
    }

    pub fn roots(&self) -> &[Index] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Pre-order iteration over every tree, roots in insertion order.
    pub fn iter(&self) -> PreOrderIterator<'_> {
        PreOrderIterator::new(self)
    }

    pub fn iter_postorder(&self) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self)
    }

    /// Depth of the deepest tree; 0 for an empty forest.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.roots
            .iter()
            .map(|&root| self.calculate_depth(root))
            .max()
            .unwrap_or(0)
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        match self.get_node(node_idx) {
            Some(node) => {
                1 + node
                    .children
                    .iter()
                    .map(|&child| self.calculate_depth(child))
                    .max()
                    .unwrap_or(0)
            }
            None => 0,
        }
    }

    /// Names of all leaf nodes in pre-order.
    pub fn leaf_names(&self) -> Vec<String> {
        self.iter()
            .filter(|(_, node)| node.children.is_empty())
            .map(|(_, node)| node.data.name.clone())
            .collect()
    }

    /// Convert into an owned forest of `CategoryNode`s.
    ///
    /// Post-order guarantees every child is built before its parent.
    #[instrument(level = "debug", skip(self))]
    pub fn into_forest(self) -> Vec<CategoryNode> {
        let mut built: HashMap<Index, CategoryNode> = HashMap::with_capacity(self.len());
        for (idx, node) in self.iter_postorder() {
            let children = node
                .children
                .iter()
                .filter_map(|child| built.remove(child))
                .collect();
            built.insert(
                idx,
                CategoryNode {
                    id: node.data.id.clone(),
                    name: node.data.name.clone(),
                    children,
                },
            );
        }
        self.roots
            .iter()
            .filter_map(|root| built.remove(root))
            .collect()
    }
}

pub struct PreOrderIterator<'a> {
    arena: &'a CategoryArena,
    stack: Vec<Index>,
}

impl<'a> PreOrderIterator<'a> {
    fn new(arena: &'a CategoryArena) -> Self {
        // Reverse so the first root is popped first
        let stack = arena.roots.iter().rev().copied().collect();
        Self { arena, stack }
    }
}

impl<'a> Iterator for PreOrderIterator<'a> {
    type Item = (Index, &'a ArenaNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a> {
    arena: &'a CategoryArena,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(arena: &'a CategoryArena) -> Self {
        let stack = arena.roots.iter().rev().map(|&r| (r, false)).collect();
        Self { arena, stack }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a ArenaNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                if !visited {
                    self.stack.push((current_idx, true));
                    for &child in node.children.iter().rev() {
                        self.stack.push((child, false));
                    }
                } else {
                    return Some((current_idx, node));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(id: &str) -> NodeData {
        NodeData {
            id: id.to_string(),
            name: id.to_uppercase(),
        }
    }

    // a
    // ├── a1
    // │   └── a11
    // └── a2
    // b
    fn sample() -> CategoryArena {
        let mut arena = CategoryArena::new();
        let a = arena.insert_node(data("a"), None);
        let a1 = arena.insert_node(data("a1"), Some(a));
        arena.insert_node(data("a11"), Some(a1));
        arena.insert_node(data("a2"), Some(a));
        arena.insert_node(data("b"), None);
        arena
    }

    #[test]
    fn given_forest_when_iterating_preorder_then_roots_in_insertion_order() {
        let arena = sample();
        let ids: Vec<_> = arena.iter().map(|(_, n)| n.data.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "a1", "a11", "a2", "b"]);
    }

    #[test]
    fn given_forest_when_iterating_postorder_then_children_before_parents() {
        let arena = sample();
        let ids: Vec<_> = arena
            .iter_postorder()
            .map(|(_, n)| n.data.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a11", "a1", "a2", "a", "b"]);
    }

    #[test]
    fn given_forest_when_measuring_then_depth_and_leaves_match() {
        let arena = sample();
        assert_eq!(arena.depth(), 3);
        assert_eq!(arena.leaf_names(), vec!["A11", "A2", "B"]);
        assert_eq!(CategoryArena::new().depth(), 0);
    }

    #[test]
    fn given_root_when_attaching_then_moves_under_parent() {
        let mut arena = CategoryArena::new();
        let child = arena.insert_node(data("child"), None);
        let parent = arena.insert_node(data("parent"), None);

        assert!(arena.attach(child, parent));
        assert_eq!(arena.roots(), &[parent]);
        assert!(!arena.attach(child, parent), "already attached");
    }

    #[test]
    fn given_arena_when_converting_then_forest_preserves_shape() {
        let forest = sample().into_forest();
        assert_eq!(forest.len(), 2);
        assert_eq!(forest[0].id, "a");
        assert_eq!(forest[0].children[0].children[0].id, "a11");
        assert_eq!(forest[0].children[1].id, "a2");
        assert!(forest[1].children.is_empty());
    }
}
