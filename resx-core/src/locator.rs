//! Resource lookup capability

use std::sync::Arc;

/// Maps a namespace-prefixed resource name (e.g. `assets/ui/button.png`) to
/// the URI of whatever provides it, or `None` when nothing does.
///
/// See [`crate::location::LocatorUri`] for the URI shapes understood by the
/// resolver.
pub trait ResourceLocator: Send + Sync {
    fn locate(&self, name: &str) -> Option<String>;

    /// Human-readable description for diagnostics
    fn describe(&self) -> String {
        "resource locator".to_string()
    }
}

impl<T: ResourceLocator + ?Sized> ResourceLocator for Arc<T> {
    fn locate(&self, name: &str) -> Option<String> {
        (**self).locate(name)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// A locator that never finds anything, leaving only plain-filesystem lookups
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocator;

impl ResourceLocator for NoLocator {
    fn locate(&self, _name: &str) -> Option<String> {
        None
    }

    fn describe(&self) -> String {
        "none".to_string()
    }
}
