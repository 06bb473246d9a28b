//! The resource explorer facade

use bytes::Bytes;
use chrono::{DateTime, Utc};
use resx_core::{
    config::ExplorerConfig,
    error::ResxResult,
    host::HostFiles,
    location::ResourceLocation,
    locator::ResourceLocator,
    operations::{decode_text, ReadMode, ResourceContent},
    path::{canonicalize, normalize, strip_resource_prefix},
};
use resx_storage::archive::entry_key;
use resx_storage::{list_archive_files, list_files, read_archive_entry, LocalHost, LocatorChain};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::resolver::Resolver;

/// Reads and lists resources without caring whether they are loose files
/// or packaged in a bundle.
///
/// Every path handed in is relative to the resource namespace and every
/// path handed back is normalized and namespace-relative, so the same
/// calls work in development (loose directories) and in a packaged build.
/// Holds no mutable state; share it freely between threads.
#[derive(Clone)]
pub struct ResourceExplorer {
    resolver: Resolver,
    host: Arc<dyn HostFiles>,
    config: ExplorerConfig,
}

impl ResourceExplorer {
    pub fn new(locator: Arc<dyn ResourceLocator>, config: ExplorerConfig) -> Self {
        Self {
            resolver: Resolver::new(locator, &config.resource_prefix),
            host: Arc::new(LocalHost::new()),
            config,
        }
    }

    /// Explorer over the search roots and bundles named in `config`
    pub fn from_config(config: ExplorerConfig) -> Self {
        let chain = LocatorChain::from_sources(&config.search_roots, &config.bundles);
        tracing::debug!(
            "Explorer over {} roots and {} bundles",
            config.search_roots.len(),
            config.bundles.len()
        );
        Self::new(Arc::new(chain), config)
    }

    /// Replace the host file service
    pub fn with_host(mut self, host: Arc<dyn HostFiles>) -> Self {
        self.host = host;
        self
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    pub fn host(&self) -> &dyn HostFiles {
        self.host.as_ref()
    }

    pub fn resolve(&self, path: &str) -> ResxResult<ResourceLocation> {
        self.resolver.resolve(path)
    }

    fn read_raw(&self, path: &str) -> ResxResult<(ResourceLocation, Bytes)> {
        let location = self.resolve(path)?;
        let raw = match &location {
            ResourceLocation::OnDisk(file) => self.host.read_bytes(file)?,
            ResourceLocation::InArchive { archive, entry } => read_archive_entry(archive, entry)?,
        };
        tracing::trace!("Read {} bytes from {}", raw.len(), location);
        Ok((location, raw))
    }

    pub fn read_resource(&self, path: &str, mode: ReadMode) -> ResxResult<ResourceContent> {
        let (location, raw) = self.read_raw(path)?;
        ResourceContent::decode(&location.to_string(), raw, mode)
    }

    /// Read a resource as UTF-8; invalid text fails with `InvalidData`
    pub fn read_text(&self, path: &str) -> ResxResult<String> {
        let (location, raw) = self.read_raw(path)?;
        decode_text(&location.to_string(), raw)
    }

    pub fn read_bytes(&self, path: &str) -> ResxResult<Bytes> {
        self.read_raw(path).map(|(_, raw)| raw)
    }

    /// List the files under the resource directory `path`.
    ///
    /// Results carry `path` itself as their leading part, e.g. listing
    /// `textures` yields `textures/sub/b.png`. Order is unspecified.
    pub fn list_resources(&self, path: &str, recursive: bool) -> ResxResult<Vec<String>> {
        let requested = canonicalize(path);
        let location = self.resolve(path)?;
        let options = self.config.list_options(recursive);

        let relative: Vec<String> = match &location {
            ResourceLocation::OnDisk(dir) => {
                let base = normalize(&dir.to_string_lossy());
                list_files(dir, &options)?
                    .iter()
                    .map(|file| strip_resource_prefix(&normalize(file), &base))
                    .collect()
            }
            ResourceLocation::InArchive { archive, entry } => list_archive_files(archive, entry, &options)?
                .iter()
                .map(|file| strip_resource_prefix(file, &entry_key(entry)))
                .collect(),
        };

        let listed: Vec<String> = relative
            .into_iter()
            .map(|file| {
                if requested.is_empty() {
                    file
                } else {
                    format!("{}/{}", requested, file)
                }
            })
            .collect();
        tracing::debug!("Listed {} resources under {} ({})", listed.len(), location, location.kind());
        Ok(listed)
    }

    /// Direct children of `path` only
    pub fn list_resources_shallow(&self, path: &str) -> ResxResult<Vec<String>> {
        self.list_resources(path, false)
    }

    /// Modification time of a loose resource; bundle entries have none
    pub fn resource_modified(&self, path: &str) -> ResxResult<Option<DateTime<Utc>>> {
        match self.resolve(path)? {
            ResourceLocation::OnDisk(file) => self.host.last_modified(&file).map(Some),
            ResourceLocation::InArchive { .. } => Ok(None),
        }
    }

    pub fn has_file(&self, path: &Path) -> bool {
        self.host.has_file(path)
    }

    pub fn read_file(&self, path: &Path) -> ResxResult<String> {
        self.host.read_to_string(path)
    }

    pub fn write_file(&self, path: &Path, content: &[u8]) -> ResxResult<()> {
        self.host.write_file(path, content)
    }

    pub fn create_file(&self, path: &Path, content: Option<&[u8]>) -> ResxResult<PathBuf> {
        self.host.create_file(path, content)
    }

    pub fn delete_file(&self, path: &Path) -> ResxResult<()> {
        self.host.delete_file(path)
    }

    pub fn create_folder(&self, path: &Path) -> ResxResult<PathBuf> {
        self.host.create_folder(path)
    }

    pub fn compress_file(&self, path: &Path, dest: &Path) -> ResxResult<()> {
        self.host.compress_file(path, dest)
    }

    pub fn last_modified(&self, path: &Path) -> ResxResult<DateTime<Utc>> {
        self.host.last_modified(path)
    }

    pub fn open_file(&self, path: &Path) -> ResxResult<()> {
        self.host.open_with_default_app(path)
    }
}
