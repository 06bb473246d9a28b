//! Resource locators over loose directories and archive bundles

use resx_core::{
    location::{file_uri, ArchiveUri},
    locator::ResourceLocator,
    path::canonicalize,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::archive::ArchiveMount;

/// `path` made absolute: canonical when it exists, otherwise joined onto the
/// working directory.
fn absolute(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(e) => {
            tracing::warn!("Cannot make {} absolute: {}", path.display(), e);
            path.to_path_buf()
        }
    }
}

/// Finds resources below a loose directory (development layout)
#[derive(Debug, Clone)]
pub struct DirectoryLocator {
    root: PathBuf,
}

impl DirectoryLocator {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self { root: absolute(root.as_ref()) }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ResourceLocator for DirectoryLocator {
    fn locate(&self, name: &str) -> Option<String> {
        let name = canonicalize(name);
        if name.split('/').any(|segment| segment == "..") {
            return None;
        }
        let candidate = if name.is_empty() { self.root.clone() } else { self.root.join(&name) };
        candidate.exists().then(|| file_uri(&candidate))
    }

    fn describe(&self) -> String {
        format!("directory {}", self.root.display())
    }
}

/// Finds resources packaged inside an archive bundle.
///
/// Every lookup opens its own short-lived mount on the bundle.
#[derive(Debug, Clone)]
pub struct ArchiveLocator {
    bundle: PathBuf,
}

impl ArchiveLocator {
    pub fn new(bundle: impl AsRef<Path>) -> Self {
        Self { bundle: absolute(bundle.as_ref()) }
    }

    pub fn bundle(&self) -> &Path {
        &self.bundle
    }
}

impl ResourceLocator for ArchiveLocator {
    fn locate(&self, name: &str) -> Option<String> {
        let mount = match ArchiveMount::open(&self.bundle) {
            Ok(mount) => mount,
            Err(e) => {
                tracing::warn!("Skipping unreadable bundle {}: {}", self.bundle.display(), e);
                return None;
            }
        };
        mount
            .contains(name)
            .then(|| ArchiveUri::new(&self.bundle, name).to_uri())
    }

    fn describe(&self) -> String {
        format!("bundle {}", self.bundle.display())
    }
}

/// Ordered list of locators; the first one that knows a name wins
#[derive(Clone, Default)]
pub struct LocatorChain {
    locators: Vec<Arc<dyn ResourceLocator>>,
}

impl LocatorChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, locator: impl ResourceLocator + 'static) -> Self {
        self.push(Arc::new(locator));
        self
    }

    pub fn push(&mut self, locator: Arc<dyn ResourceLocator>) {
        self.locators.push(locator);
    }

    pub fn len(&self) -> usize {
        self.locators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locators.is_empty()
    }

    /// Loose directories first, then bundles, each in the given order
    pub fn from_sources(search_roots: &[PathBuf], bundles: &[PathBuf]) -> Self {
        let mut chain = Self::new();
        for root in search_roots {
            chain.push(Arc::new(DirectoryLocator::new(root)));
        }
        for bundle in bundles {
            chain.push(Arc::new(ArchiveLocator::new(bundle)));
        }
        chain
    }
}

impl ResourceLocator for LocatorChain {
    fn locate(&self, name: &str) -> Option<String> {
        self.locators.iter().find_map(|locator| locator.locate(name))
    }

    fn describe(&self) -> String {
        let parts: Vec<String> = self.locators.iter().map(|l| l.describe()).collect();
        format!("[{}]", parts.join(", "))
    }
}
