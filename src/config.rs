//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/deskview/deskview.toml`
//! 3. Local config: `<catalog_dir>/.deskview.toml` (next to the catalog file)
//! 4. Environment variables: `DESKVIEW_*` prefix

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::format::{Item, StrftimeItems};
use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::ExpansionState;

/// Category tree settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TreeConfig {
    /// Category ids expanded when a tree view opens
    pub initially_expanded: Vec<String>,
}

/// Raw tree config for intermediate parsing (arrays are Option to detect "not specified").
///
/// Used during layered config merging to distinguish between:
/// - `None` → field not specified, inherit from base
/// - `Some([])` → explicit empty array
/// - `Some([...])` → explicit values to merge
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawTreeConfig {
    pub initially_expanded: Option<Vec<String>>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub date_format: Option<String>,
    pub countdown_tick_ms: Option<u64>,
    pub support_contact: Option<String>,
    #[serde(default)]
    pub tree: RawTreeConfig,
}

impl TreeConfig {
    /// Merge arrays with union semantics and negation support.
    ///
    /// - Items from overlay are added to base
    /// - Items prefixed with `!` remove the corresponding item from the result
    /// - Duplicates are de-duplicated
    ///
    /// # Examples
    /// ```ignore
    /// merge_array(&["a", "b"], &["c"])       // → ["a", "b", "c"]
    /// merge_array(&["a", "b"], &["!a", "c"]) // → ["b", "c"]
    /// ```
    pub fn merge_array(base: &[String], overlay: &[String]) -> Vec<String> {
        let mut result: HashSet<String> = base.iter().cloned().collect();

        for pattern in overlay {
            if let Some(negated) = pattern.strip_prefix('!') {
                result.remove(negated);
            } else {
                result.insert(pattern.clone());
            }
        }

        // Convert to sorted Vec for deterministic output
        let mut vec: Vec<String> = result.into_iter().collect();
        vec.sort();
        vec
    }

    /// Merge overlay config onto self (base): arrays union with negation.
    pub fn merge(&self, overlay: &RawTreeConfig) -> Self {
        Self {
            initially_expanded: overlay
                .initially_expanded
                .as_ref()
                .map(|o| Self::merge_array(&self.initially_expanded, o))
                .unwrap_or_else(|| self.initially_expanded.clone()),
        }
    }

    /// Apply global config onto defaults: arrays REPLACE.
    pub fn apply_global(&self, global: &RawTreeConfig) -> Self {
        Self {
            initially_expanded: global
                .initially_expanded
                .clone()
                .unwrap_or_else(|| self.initially_expanded.clone()),
        }
    }

    pub fn expansion_state(&self) -> ExpansionState {
        self.initially_expanded.iter().cloned().collect()
    }
}

/// Unified configuration for deskview.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// strftime pattern for literal dates (default: "%b %-d, %Y")
    pub date_format: String,
    /// Countdown tick interval in milliseconds (default: 1000)
    pub countdown_tick_ms: u64,
    /// Contact shown on the maintenance page when none is given
    pub support_contact: Option<String>,
    /// Category tree settings
    pub tree: TreeConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            date_format: "%b %-d, %Y".into(),
            countdown_tick_ms: 1000,
            support_contact: None,
            tree: TreeConfig::default(),
        }
    }
}

/// Get the XDG config directory for deskview.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "deskview").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("deskview.toml"))
}

/// Get the path to the local config file in a catalog directory.
pub fn local_config_path(catalog_dir: &Path) -> PathBuf {
    catalog_dir.join(".deskview.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Merge overlay config onto self (base) with union semantics for arrays.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            date_format: overlay
                .date_format
                .clone()
                .unwrap_or_else(|| self.date_format.clone()),
            countdown_tick_ms: overlay.countdown_tick_ms.unwrap_or(self.countdown_tick_ms),
            support_contact: overlay
                .support_contact
                .clone()
                .or_else(|| self.support_contact.clone()),
            tree: self.tree.merge(&overlay.tree),
        }
    }

    /// Apply global config onto defaults with REPLACE semantics for arrays.
    fn apply_global(&self, global: &RawSettings) -> Self {
        Self {
            date_format: global
                .date_format
                .clone()
                .unwrap_or_else(|| self.date_format.clone()),
            countdown_tick_ms: global.countdown_tick_ms.unwrap_or(self.countdown_tick_ms),
            support_contact: global
                .support_contact
                .clone()
                .or_else(|| self.support_contact.clone()),
            tree: self.tree.apply_global(&global.tree),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `catalog_dir` - Optional directory holding the catalog and its local config
    ///
    /// # Array Merge Semantics
    /// - Defaults → Global: REPLACE
    /// - Global → Local: UNION with negation support
    /// - Any → Env vars: REPLACE
    pub fn load(catalog_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.apply_global(&raw);
            }
        }

        // 3. Local config next to the catalog
        if let Some(dir) = catalog_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 4. Environment variables
        current = Self::apply_env_overrides(current)?;

        current.validate()?;
        Ok(current)
    }

    /// Apply DESKVIEW_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let builder = Config::builder().add_source(
            Environment::with_prefix("DESKVIEW")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("tree.initially_expanded"),
        );

        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("date_format") {
            settings.date_format = val;
        }
        if let Ok(val) = config.get::<u64>("countdown_tick_ms") {
            settings.countdown_tick_ms = val;
        }
        if let Ok(val) = config.get_string("support_contact") {
            settings.support_contact = Some(val);
        }
        if let Ok(val) = config.get::<Vec<String>>("tree.initially_expanded") {
            settings.tree.initially_expanded = val;
        }

        Ok(settings)
    }

    /// Reject values that would only fail later, at render time.
    fn validate(&self) -> Result<(), ApplicationError> {
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ApplicationError::Config {
                message: format!("invalid date_format: {:?}", self.date_format),
            });
        }
        if self.countdown_tick_ms == 0 {
            return Err(ApplicationError::Config {
                message: "countdown_tick_ms must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# deskview configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/deskview/deskview.toml  (defines your baseline)
#   Local:  <catalog_dir>/.deskview.toml      (catalog-specific additions)
#   Env:    DESKVIEW_* environment variables  (explicit overrides)
#
# Array Merge Semantics:
#   Global config REPLACES compiled defaults.
#   Local config UNIONS with global.
#   Use "!id" in local config to REMOVE an inherited item:
#     initially_expanded = ["billing", "!shipping"]

# strftime pattern for dates on broadcast tables and status pages
# date_format = "%b %-d, %Y"

# Countdown tick on the rate-limited page, in milliseconds
# countdown_tick_ms = 1000

# Contact shown on the maintenance page
# support_contact = "support@example.com"

[tree]
# Category ids expanded when the tree opens
# initially_expanded = []
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
