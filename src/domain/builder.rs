//! Forest builder: assembles nested categories from flat parent-linked records.

use std::collections::HashMap;

use generational_arena::Index;
use tracing::{debug, instrument, warn};

use crate::domain::arena::{CategoryArena, NodeData};
use crate::domain::category::{CategoryNode, CategoryRecord};
use crate::domain::error::{DomainError, DomainResult};

/// Constructs a category forest from flat records.
#[derive(Debug, Default)]
pub struct ForestBuilder {
    index: HashMap<String, Index>,
    arena: CategoryArena,
}

impl ForestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the forest, keeping document order for roots and siblings.
    ///
    /// Records pointing at an unknown parent stay roots. Duplicate ids and
    /// parent chains that loop back fail with `CyclicOrSharedNode`.
    #[instrument(level = "debug", skip_all, fields(records = records.len()))]
    pub fn build(mut self, records: &[CategoryRecord]) -> DomainResult<Vec<CategoryNode>> {
        for record in records {
            if self.index.contains_key(&record.id) {
                return Err(DomainError::cyclic(&record.id));
            }
            let idx = self.arena.insert_node(
                NodeData {
                    id: record.id.clone(),
                    name: record.name.clone(),
                },
                None,
            );
            self.index.insert(record.id.clone(), idx);
        }

        for record in records {
            let Some(parent_id) = record.parent.as_deref() else {
                continue;
            };
            let child = self.index[&record.id];
            let Some(&parent) = self.index.get(parent_id) else {
                warn!(
                    "category {} references unknown parent {}, keeping it as a root",
                    record.id, parent_id
                );
                continue;
            };
            if self.is_ancestor_or_self(child, parent) {
                return Err(DomainError::cyclic(&record.id));
            }
            self.arena.attach(child, parent);
        }

        debug!(
            "built {} roots, depth {}",
            self.arena.roots().len(),
            self.arena.depth()
        );
        Ok(self.arena.into_forest())
    }

    /// Walk up from `node`; true if `candidate` is on the way.
    fn is_ancestor_or_self(&self, candidate: Index, node: Index) -> bool {
        let mut current = Some(node);
        while let Some(idx) = current {
            if idx == candidate {
                return true;
            }
            current = self.arena.get_node(idx).and_then(|n| n.parent);
        }
        false
    }
}
