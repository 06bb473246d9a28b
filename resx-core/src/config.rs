// SPDX-License-Identifier: AGPL-3.0-or-later
//! Explorer configuration
//!
//! Loaded from TOML; every field is optional:
//!
//! ```toml
//! resource_prefix = "assets/"
//! max_depth = 64
//! follow_links = true
//! search_roots = ["./resources"]
//! bundles = ["./game.zip"]
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ResxError, ResxResult};
use crate::operations::{ListOptions, DEFAULT_MAX_DEPTH};

/// Namespace under which bundle-relative resources are addressed
pub const DEFAULT_RESOURCE_PREFIX: &str = "assets/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExplorerConfig {
    /// Resource namespace root, e.g. `assets/`
    pub resource_prefix: String,
    /// Deepest level any recursive walk descends to
    pub max_depth: usize,
    /// Follow symbolic links during plain-directory walks
    pub follow_links: bool,
    /// Loose directories searched for resources, in order
    pub search_roots: Vec<PathBuf>,
    /// Archive bundles searched for resources, after the loose directories
    pub bundles: Vec<PathBuf>,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            resource_prefix: DEFAULT_RESOURCE_PREFIX.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            follow_links: true,
            search_roots: Vec::new(),
            bundles: Vec::new(),
        }
    }
}

impl ExplorerConfig {
    pub fn from_toml(text: &str) -> ResxResult<Self> {
        toml::from_str(text).map_err(|e| ResxError::Config(e.to_string()))
    }

    /// Load the configuration at `path`
    pub fn load(path: &Path) -> ResxResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| ResxError::from_io(path.display().to_string(), e))?;
        let config = Self::from_toml(&text)?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load the configuration at `path`, falling back to defaults when it is missing
    pub fn load_or_default(path: &Path) -> ResxResult<Self> {
        match Self::load(path) {
            Err(e) if e.is_not_found() => {
                tracing::debug!("No configuration at {}, using defaults", path.display());
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Per-user configuration file location
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "hyperpolymath", "resx")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Listing options carrying this configuration's traversal limits
    pub fn list_options(&self, recursive: bool) -> ListOptions {
        ListOptions {
            recursive,
            max_depth: self.max_depth,
            follow_links: self.follow_links,
        }
    }
}
