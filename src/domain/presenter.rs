//! Category tree presenter
//!
//! Flattens a category forest into row descriptors ready for linear
//! rendering. Collapsed branches are omitted from the output entirely.

use std::collections::{BTreeSet, HashSet};

use tracing::{instrument, trace};

use crate::domain::category::CategoryNode;
use crate::domain::error::{DomainError, DomainResult};

/// Ids of categories whose children are visible.
///
/// Stale ids (no longer present in the forest) are kept and never match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: BTreeSet<String>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every node that has children, i.e. the fully expanded tree.
    pub fn expand_all(forest: &[CategoryNode]) -> Self {
        let mut expanded = BTreeSet::new();
        let mut stack: Vec<&CategoryNode> = forest.iter().collect();
        while let Some(node) = stack.pop() {
            if node.has_children() {
                expanded.insert(node.id.clone());
            }
            stack.extend(node.children.iter());
        }
        Self { expanded }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    /// Ids in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.expanded.iter().map(String::as_str)
    }

    /// Return a new state with `id` flipped.
    pub fn toggled(&self, id: &str) -> Self {
        let mut expanded = self.expanded.clone();
        if !expanded.remove(id) {
            expanded.insert(id.to_string());
        }
        Self { expanded }
    }
}

impl<S: Into<String>> FromIterator<S> for ExpansionState {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            expanded: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Add `id` if absent, remove it if present. Does not touch `expanded`.
pub fn toggle(expanded: &ExpansionState, id: &str) -> ExpansionState {
    expanded.toggled(id)
}

/// One visible category in the flattened tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowDescriptor {
    pub id: String,
    pub name: String,
    /// 0 for roots, +1 per nesting level
    pub depth: usize,
    pub has_children: bool,
    pub is_expanded: bool,
    pub is_selected: bool,
}

impl RowDescriptor {
    /// Leaves never expose an expand/collapse affordance.
    pub fn is_toggleable(&self) -> bool {
        self.has_children
    }
}

/// Flatten `forest` into visible rows, pre-order, siblings in given order.
///
/// A node's children are visited only when its id is in `expanded`.
/// Seeing an id twice means the input is not a forest; that fails with
/// `CyclicOrSharedNode` instead of emitting the subtree again.
#[instrument(level = "debug", skip(forest, expanded), fields(roots = forest.len()))]
pub fn present(
    forest: &[CategoryNode],
    selected_id: Option<&str>,
    expanded: &ExpansionState,
) -> DomainResult<Vec<RowDescriptor>> {
    let mut rows = Vec::new();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut stack: Vec<(&CategoryNode, usize)> = forest.iter().rev().map(|n| (n, 0)).collect();

    while let Some((node, depth)) = stack.pop() {
        if !visited.insert(node.id.as_str()) {
            return Err(DomainError::cyclic(&node.id));
        }

        let has_children = node.has_children();
        let is_expanded = has_children && expanded.contains(&node.id);
        rows.push(RowDescriptor {
            id: node.id.clone(),
            name: node.name.clone(),
            depth,
            has_children,
            is_expanded,
            is_selected: selected_id == Some(node.id.as_str()),
        });

        if is_expanded {
            for child in node.children.iter().rev() {
                stack.push((child, depth + 1));
            }
        }
    }

    trace!("presented {} rows", rows.len());
    Ok(rows)
}

/// A rendered line of the category list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    /// Synthetic "all categories" row, i.e. no filter
    All { is_selected: bool },
    Category(RowDescriptor),
}

impl Row {
    pub fn is_selected(&self) -> bool {
        match self {
            Row::All { is_selected } => *is_selected,
            Row::Category(row) => row.is_selected,
        }
    }
}

/// Complete list view: the "all" row followed by the category rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeView {
    pub rows: Vec<Row>,
    /// The forest has no roots; render the "no categories" hint
    pub is_empty: bool,
}

impl TreeView {
    pub fn category_rows(&self) -> impl Iterator<Item = &RowDescriptor> {
        self.rows.iter().filter_map(|row| match row {
            Row::Category(desc) => Some(desc),
            Row::All { .. } => None,
        })
    }
}

/// `present` with the synthetic "all" row always first.
pub fn present_view(
    forest: &[CategoryNode],
    selected_id: Option<&str>,
    expanded: &ExpansionState,
) -> DomainResult<TreeView> {
    let categories = present(forest, selected_id, expanded)?;
    let mut rows = Vec::with_capacity(categories.len() + 1);
    rows.push(Row::All {
        is_selected: selected_id.is_none(),
    });
    rows.extend(categories.into_iter().map(Row::Category));
    Ok(TreeView {
        rows,
        is_empty: forest.is_empty(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forest() -> Vec<CategoryNode> {
        vec![
            CategoryNode::new("A", "Alpha")
                .with_children(vec![CategoryNode::new("A1", "Alpha one")]),
            CategoryNode::new("B", "Beta"),
        ]
    }

    #[test]
    fn given_collapsed_parent_when_presenting_then_children_omitted() {
        let rows = present(&forest(), Some("B"), &ExpansionState::new()).unwrap();

        assert_eq!(
            rows,
            vec![
                RowDescriptor {
                    id: "A".into(),
                    name: "Alpha".into(),
                    depth: 0,
                    has_children: true,
                    is_expanded: false,
                    is_selected: false,
                },
                RowDescriptor {
                    id: "B".into(),
                    name: "Beta".into(),
                    depth: 0,
                    has_children: false,
                    is_expanded: false,
                    is_selected: true,
                },
            ]
        );
    }

    #[test]
    fn given_expanded_parent_when_presenting_then_child_follows_at_depth_one() {
        let expanded: ExpansionState = ["A"].into_iter().collect();
        let rows = present(&forest(), None, &expanded).unwrap();

        let ids: Vec<_> = rows.iter().map(|r| (r.id.as_str(), r.depth)).collect();
        assert_eq!(ids, vec![("A", 0), ("A1", 1), ("B", 0)]);
        assert!(rows[0].is_expanded);
    }

    #[test]
    fn given_expanded_leaf_when_presenting_then_no_affordance() {
        let expanded: ExpansionState = ["B"].into_iter().collect();
        let rows = present(&forest(), None, &expanded).unwrap();

        let b = rows.iter().find(|r| r.id == "B").unwrap();
        assert!(!b.is_expanded);
        assert!(!b.is_toggleable());
    }

    #[test]
    fn given_duplicate_id_on_visible_path_when_presenting_then_structural_error() {
        let shared = CategoryNode::new("S", "Shared");
        let forest = vec![
            CategoryNode::new("A", "Alpha").with_children(vec![shared.clone()]),
            shared,
        ];
        let expanded: ExpansionState = ["A"].into_iter().collect();

        let err = present(&forest, None, &expanded).unwrap_err();
        assert_eq!(err, DomainError::CyclicOrSharedNode { id: "S".into() });
    }

    #[test]
    fn given_toggle_twice_when_comparing_then_original_state() {
        let state: ExpansionState = ["A", "X"].into_iter().collect();
        assert_eq!(toggle(&toggle(&state, "B"), "B"), state);
        assert_eq!(toggle(&toggle(&state, "A"), "A"), state);
        assert!(!toggle(&state, "A").contains("A"));
    }

    #[test]
    fn given_empty_forest_when_presenting_view_then_only_all_row() {
        let view = present_view(&[], None, &ExpansionState::new()).unwrap();

        assert!(view.is_empty);
        assert_eq!(view.rows, vec![Row::All { is_selected: true }]);
    }

    #[test]
    fn given_selection_when_presenting_view_then_all_row_not_selected() {
        let view = present_view(&forest(), Some("A"), &ExpansionState::new()).unwrap();

        assert_eq!(view.rows[0], Row::All { is_selected: false });
        assert!(view.rows[1].is_selected());
        assert_eq!(view.category_rows().count(), 2);
    }
}
