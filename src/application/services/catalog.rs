//! Catalog loading service
//!
//! A catalog is a TOML snapshot of what the data layer already fetched:
//! categories (flat, parent-linked), tags and broadcasts.

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{Broadcast, CategoryNode, CategoryRecord, ForestBuilder, Tag};
use crate::infrastructure::traits::FileSystem;

/// On-disk layout of a catalog file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CatalogDocument {
    categories: Vec<CategoryRecord>,
    tags: Vec<Tag>,
    broadcasts: Vec<Broadcast>,
}

/// Snapshot handed to the presenters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub categories: Vec<CategoryNode>,
    pub tags: Vec<Tag>,
    pub broadcasts: Vec<Broadcast>,
}

/// Service for reading catalog snapshots.
pub struct CatalogService {
    fs: Arc<dyn FileSystem>,
}

impl CatalogService {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Read and parse the catalog at `path`.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<Catalog> {
        if !self.fs.is_file(path) {
            return Err(ApplicationError::CatalogNotFound(path.to_path_buf()));
        }
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read catalog", path)?;
        self.parse(&content, path)
    }

    /// Parse catalog content; `path` is only used for error messages.
    pub fn parse(&self, content: &str, path: &Path) -> ApplicationResult<Catalog> {
        let document: CatalogDocument =
            toml::from_str(content).map_err(|e| ApplicationError::InvalidCatalog {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        debug!(
            "parsed catalog: {} categories, {} tags, {} broadcasts",
            document.categories.len(),
            document.tags.len(),
            document.broadcasts.len()
        );

        let categories = ForestBuilder::new().build(&document.categories)?;
        Ok(Catalog {
            categories,
            tags: document.tags,
            broadcasts: document.broadcasts,
        })
    }
}
