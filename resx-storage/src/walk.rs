//! Plain directory tree walker

use resx_core::{
    error::{ResxError, ResxResult},
    operations::ListOptions,
};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// List the regular files under the directory `root`.
///
/// Non-recursive listings only see direct children. Returned strings are the
/// full paths produced by the traversal; callers relativize them.
///
/// When links are followed, a link that points back at one of its own
/// ancestors is skipped with a warning, and no walk goes deeper than
/// `options.max_depth`.
pub fn list_files(root: &Path, options: &ListOptions) -> ResxResult<Vec<String>> {
    let shown = root.display().to_string();
    let meta = fs::metadata(root).map_err(|e| ResxError::from_io(shown.clone(), e))?;
    if !meta.is_dir() {
        return Err(ResxError::NotADirectory(shown));
    }

    let depth_limit = options.depth_limit();
    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .follow_links(options.follow_links)
        .max_depth(depth_limit)
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.loop_ancestor().is_some() => {
                tracing::warn!(
                    "Skipping symlink loop at {}",
                    e.path().map(|p| p.display().to_string()).unwrap_or_default()
                );
                continue;
            }
            Err(e) => {
                let path = e.path().map(|p| p.display().to_string()).unwrap_or_else(|| shown.clone());
                return Err(match e.into_io_error() {
                    Some(io) => ResxError::from_io(path, io),
                    None => ResxError::Io(std::io::Error::new(std::io::ErrorKind::Other, "directory walk failed")),
                });
            }
        };

        if entry.file_type().is_file() {
            files.push(entry.path().to_string_lossy().into_owned());
        } else if options.recursive && entry.file_type().is_dir() && entry.depth() == depth_limit {
            tracing::warn!("Depth limit {} reached at {}", depth_limit, entry.path().display());
        }
    }

    tracing::debug!("Listed {} files under {}", files.len(), shown);
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::path::PathBuf;

    fn relative_set(root: &Path, files: Vec<String>) -> BTreeSet<String> {
        files
            .into_iter()
            .map(|f| {
                PathBuf::from(f)
                    .strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("x.txt"), "x").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/y.txt"), "y").unwrap();
        dir
    }

    #[test]
    fn test_list_files_shallow() {
        let dir = fixture();
        let files = list_files(dir.path(), &ListOptions::shallow()).unwrap();
        assert_eq!(relative_set(dir.path(), files), BTreeSet::from(["x.txt".to_string()]));
    }

    #[test]
    fn test_list_files_recursive() {
        let dir = fixture();
        let files = list_files(dir.path(), &ListOptions::recursive()).unwrap();
        assert_eq!(
            relative_set(dir.path(), files),
            BTreeSet::from(["x.txt".to_string(), "sub/y.txt".to_string()])
        );
    }

    #[test]
    fn test_list_files_respects_max_depth() {
        let dir = fixture();
        fs::create_dir_all(dir.path().join("sub/deeper")).unwrap();
        fs::write(dir.path().join("sub/deeper/z.txt"), "z").unwrap();

        let files = list_files(dir.path(), &ListOptions::recursive().with_max_depth(2)).unwrap();
        assert_eq!(
            relative_set(dir.path(), files),
            BTreeSet::from(["x.txt".to_string(), "sub/y.txt".to_string()])
        );
    }

    #[test]
    fn test_list_files_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_files(dir.path(), &ListOptions::recursive()).unwrap().is_empty());
    }

    #[test]
    fn test_list_files_on_regular_file() {
        let dir = fixture();
        let err = list_files(&dir.path().join("x.txt"), &ListOptions::shallow()).unwrap_err();
        assert!(matches!(err, ResxError::NotADirectory(_)));
    }

    #[test]
    fn test_list_files_on_missing_path() {
        let dir = fixture();
        let err = list_files(&dir.path().join("nope"), &ListOptions::recursive()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[cfg(unix)]
    #[test]
    fn test_list_files_survives_symlink_loop() {
        let dir = fixture();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("sub/back")).unwrap();

        let files = list_files(dir.path(), &ListOptions::recursive()).unwrap();
        assert_eq!(
            relative_set(dir.path(), files),
            BTreeSet::from(["x.txt".to_string(), "sub/y.txt".to_string()])
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_list_files_follows_file_links() {
        let dir = fixture();
        std::os::unix::fs::symlink(dir.path().join("x.txt"), dir.path().join("alias.txt")).unwrap();

        let files = list_files(dir.path(), &ListOptions::shallow()).unwrap();
        assert_eq!(
            relative_set(dir.path(), files),
            BTreeSet::from(["x.txt".to_string(), "alias.txt".to_string()])
        );
    }
}
