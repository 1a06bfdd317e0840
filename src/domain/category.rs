//! Help-center categories: nested nodes and the flat records they are built from

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::error::{DomainError, DomainResult};

/// A category in the help-center tree.
///
/// Children are owned exclusively by their parent, so a well-formed forest
/// of `CategoryNode`s has no sharing and no cycles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryNode {
    /// Unique across the whole forest
    pub id: String,
    /// Display label
    pub name: String,
    /// Ordered children; insertion order is significant
    #[serde(default)]
    pub children: Vec<CategoryNode>,
}

impl CategoryNode {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Builder-style helper for literal trees.
    pub fn with_children(mut self, children: Vec<CategoryNode>) -> Self {
        self.children = children;
        self
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// A category as delivered by the data layer: flat, with a parent reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
}

impl CategoryRecord {
    pub fn root(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent: None,
        }
    }

    pub fn child(
        id: impl Into<String>,
        name: impl Into<String>,
        parent: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent: Some(parent.into()),
        }
    }
}

/// Total number of nodes in a forest.
pub fn count_nodes(forest: &[CategoryNode]) -> usize {
    let mut count = 0;
    let mut stack: Vec<&CategoryNode> = forest.iter().collect();
    while let Some(node) = stack.pop() {
        count += 1;
        stack.extend(node.children.iter());
    }
    count
}

/// Check that every id occurs once across the whole forest.
pub fn validate_forest(forest: &[CategoryNode]) -> DomainResult<()> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut stack: Vec<&CategoryNode> = forest.iter().rev().collect();
    while let Some(node) = stack.pop() {
        if !seen.insert(node.id.as_str()) {
            return Err(DomainError::cyclic(&node.id));
        }
        stack.extend(node.children.iter().rev());
    }
    Ok(())
}
