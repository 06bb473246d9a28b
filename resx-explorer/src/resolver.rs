//! Namespace-to-location resolution

use resx_core::{
    error::{ResxError, ResxResult},
    location::{LocatorUri, ResourceLocation},
    locator::ResourceLocator,
    path::canonicalize,
};
use std::path::Path;
use std::sync::Arc;

/// Classifies resource paths as loose files or archive entries
#[derive(Clone)]
pub struct Resolver {
    locator: Arc<dyn ResourceLocator>,
    prefix: String,
}

impl Resolver {
    pub fn new(locator: Arc<dyn ResourceLocator>, prefix: &str) -> Self {
        Self { locator, prefix: canonicalize(prefix) }
    }

    /// Normalized resource namespace, without trailing slash
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn locator(&self) -> &dyn ResourceLocator {
        self.locator.as_ref()
    }

    /// `relative` placed under the resource namespace, e.g. `ui` -> `assets/ui`
    pub fn namespaced(&self, relative: &str) -> String {
        let relative = canonicalize(relative);
        match (self.prefix.is_empty(), relative.is_empty()) {
            (true, _) => relative,
            (false, true) => self.prefix.clone(),
            (false, false) => format!("{}/{}", self.prefix, relative),
        }
    }

    /// Find where `relative` lives.
    ///
    /// The locator is asked first, with the namespaced name. When it knows
    /// nothing, `relative` is tried as a plain host path.
    pub fn resolve(&self, relative: &str) -> ResxResult<ResourceLocation> {
        let name = self.namespaced(relative);

        if let Some(uri) = self.locator.locate(&name) {
            let location = LocatorUri::parse(&uri)?.into_location();
            tracing::debug!("Resolved {} via {} to {}", name, self.locator.describe(), location);
            return Ok(location);
        }

        let raw = relative.trim();
        if !raw.is_empty() && Path::new(raw).exists() {
            tracing::debug!("Resolved {} to plain path {}", name, raw);
            return Ok(ResourceLocation::OnDisk(Path::new(raw).to_path_buf()));
        }

        Err(ResxError::not_found(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resx_core::locator::NoLocator;
    use std::collections::HashMap;
    use std::path::PathBuf;

    struct MapLocator(HashMap<&'static str, &'static str>);

    impl ResourceLocator for MapLocator {
        fn locate(&self, name: &str) -> Option<String> {
            self.0.get(name).map(|uri| uri.to_string())
        }
    }

    fn resolver(entries: &[(&'static str, &'static str)]) -> Resolver {
        Resolver::new(Arc::new(MapLocator(entries.iter().copied().collect())), "assets/")
    }

    #[test]
    fn test_namespaced() {
        let resolver = resolver(&[]);
        assert_eq!(resolver.prefix(), "assets");
        assert_eq!(resolver.namespaced("/ui\\buttons/"), "assets/ui/buttons");
        assert_eq!(resolver.namespaced(""), "assets");
        assert_eq!(resolver.namespaced("./ui/."), "assets/ui");

        let bare = Resolver::new(Arc::new(NoLocator), "");
        assert_eq!(bare.namespaced("ui"), "ui");
    }

    #[test]
    fn test_resolve_loose_directory() {
        let resolver = resolver(&[("assets/ui", "file:///opt/game/assets/ui")]);
        assert_eq!(
            resolver.resolve("ui").unwrap(),
            ResourceLocation::OnDisk(PathBuf::from("/opt/game/assets/ui"))
        );
    }

    #[test]
    fn test_resolve_archive_entry() {
        let resolver = resolver(&[("assets/ui", "jar:file:/opt/game/app.jar!/assets/ui")]);
        assert_eq!(
            resolver.resolve("/ui/").unwrap(),
            ResourceLocation::InArchive {
                archive: PathBuf::from("/opt/game/app.jar"),
                entry: "assets/ui".to_string(),
            }
        );
    }

    #[test]
    fn test_resolve_malformed_archive_uri() {
        let resolver = resolver(&[("assets/ui", "jar:file:/opt/game/app.jar/assets/ui")]);
        let err = resolver.resolve("ui").unwrap_err();
        assert!(matches!(err, ResxError::ResourceResolution { .. }));
    }

    #[test]
    fn test_resolve_unknown_scheme() {
        let resolver = resolver(&[("assets/ui", "https://cdn.example.com/assets/ui")]);
        assert!(matches!(resolver.resolve("ui"), Err(ResxError::ResourceResolution { .. })));
    }

    #[test]
    fn test_resolve_falls_back_to_plain_path() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().to_string_lossy().into_owned();

        let location = resolver(&[]).resolve(&raw).unwrap();
        assert_eq!(location, ResourceLocation::OnDisk(dir.path().to_path_buf()));
    }

    #[test]
    fn test_resolve_missing() {
        let err = resolver(&[]).resolve("no/such/thing").unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("assets/no/such/thing"));

        assert!(resolver(&[]).resolve("").unwrap_err().is_not_found());
    }
}
