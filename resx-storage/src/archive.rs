// SPDX-License-Identifier: AGPL-3.0-or-later
//! Read-only archive mounts
//!
//! A mount opens a ZIP container, indexes its entry names into a directory
//! tree, and answers walks and reads against that tree. ZIP files need not
//! carry explicit directory entries, so every parent of a file entry is an
//! implicit directory.
//!
//! Mounts are meant to live for a single call. Dropping one closes the
//! container, which happens on every exit path of the functions below.

use bytes::Bytes;
use resx_core::{
    error::{ResxError, ResxResult},
    operations::ListOptions,
};
use std::collections::{btree_set, BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use zip::result::ZipError;
use zip::ZipArchive;

/// Upper bound on the buffer reserved up front for an entry read
const PREALLOCATE_LIMIT: u64 = 1 << 20;

/// Canonical lookup key for an entry name: `/` separated, no empty or `.`
/// segments, no leading or trailing slash.
pub fn entry_key(name: &str) -> String {
    name.split(['/', '\\'])
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}

fn parent_key(key: &str) -> &str {
    key.rsplit_once('/').map(|(parent, _)| parent).unwrap_or("")
}

#[derive(Debug, Default)]
struct DirNode {
    dirs: BTreeSet<String>,
    files: BTreeSet<String>,
}

/// Directory tree over the entry names of one archive
#[derive(Debug)]
struct EntryIndex {
    dirs: BTreeMap<String, DirNode>,
    /// file key -> name as stored in the archive
    files: BTreeMap<String, String>,
}

impl EntryIndex {
    fn from_names<'a>(names: impl Iterator<Item = &'a str>) -> Self {
        let mut index = Self { dirs: BTreeMap::new(), files: BTreeMap::new() };
        index.dirs.insert(String::new(), DirNode::default());

        for raw in names {
            let key = entry_key(raw);
            if key.is_empty() {
                continue;
            }
            if raw.ends_with('/') || raw.ends_with('\\') {
                index.ensure_dir(&key);
                continue;
            }
            let parent = parent_key(&key).to_string();
            index.ensure_dir(&parent);
            if let Some(node) = index.dirs.get_mut(&parent) {
                node.files.insert(key.clone());
            }
            index.files.insert(key, raw.to_string());
        }
        index
    }

    /// Insert `key` and any missing ancestors, linking each to its parent.
    fn ensure_dir(&mut self, key: &str) {
        let mut current = key.to_string();
        let mut child: Option<String> = None;
        loop {
            let existed = self.dirs.contains_key(&current);
            let node = self.dirs.entry(current.clone()).or_default();
            if let Some(child) = child.take() {
                node.dirs.insert(child);
            }
            if existed || current.is_empty() {
                break;
            }
            let parent = parent_key(&current).to_string();
            child = Some(current);
            current = parent;
        }
    }
}

/// Lazy depth-first walk over the file entries below one directory
pub struct ArchiveWalk<'a> {
    index: &'a EntryIndex,
    pending: Vec<(&'a str, usize)>,
    current: Option<btree_set::Iter<'a, String>>,
    recursive: bool,
    depth_limit: usize,
}

impl<'a> ArchiveWalk<'a> {
    fn new(index: &'a EntryIndex, root: &'a str, options: &ListOptions) -> Self {
        Self {
            index,
            pending: vec![(root, 0)],
            current: None,
            recursive: options.recursive,
            depth_limit: options.depth_limit(),
        }
    }
}

impl<'a> Iterator for ArchiveWalk<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        loop {
            if let Some(file) = self.current.as_mut().and_then(|files| files.next()) {
                return Some(file.as_str());
            }

            let (dir, depth) = self.pending.pop()?;
            let Some(node) = self.index.dirs.get(dir) else {
                continue;
            };
            self.current = Some(node.files.iter());

            // subdirectories of a non-recursive walk are never entered
            if depth + 1 < self.depth_limit {
                for child in node.dirs.iter().rev() {
                    self.pending.push((child.as_str(), depth + 1));
                }
            } else if self.recursive && !node.dirs.is_empty() {
                tracing::warn!("Depth limit {} reached at archive entry {}", self.depth_limit, dir);
            }
        }
    }
}

/// A read-only view of one archive container
pub struct ArchiveMount {
    path: PathBuf,
    archive: ZipArchive<BufReader<File>>,
    index: EntryIndex,
}

impl ArchiveMount {
    pub fn open(path: &Path) -> ResxResult<Self> {
        let shown = path.display().to_string();
        let file = File::open(path).map_err(|e| ResxError::archive_access(shown.clone(), e))?;
        let archive = ZipArchive::new(BufReader::new(file)).map_err(|e| ResxError::archive_access(shown, e))?;
        let index = EntryIndex::from_names(archive.file_names());

        tracing::trace!("Mounted archive {} ({} entries)", path.display(), archive.len());
        Ok(Self { path: path.to_path_buf(), archive, index })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn describe(&self, key: &str) -> String {
        format!("{}!/{}", self.path.display(), key)
    }

    pub fn is_dir(&self, entry: &str) -> bool {
        self.index.dirs.contains_key(&entry_key(entry))
    }

    pub fn is_file(&self, entry: &str) -> bool {
        self.index.files.contains_key(&entry_key(entry))
    }

    /// True when `entry` names a file or a directory (explicit or implicit)
    pub fn contains(&self, entry: &str) -> bool {
        self.is_file(entry) || self.is_dir(entry)
    }

    /// Walk the file entries under the directory `root`.
    ///
    /// Yielded names are entry paths relative to the archive root.
    pub fn walk<'a>(&'a self, root: &str, options: &ListOptions) -> ResxResult<ArchiveWalk<'a>> {
        let key = entry_key(root);
        match self.index.dirs.get_key_value(&key) {
            Some((root, _)) => Ok(ArchiveWalk::new(&self.index, root.as_str(), options)),
            None if self.index.files.contains_key(&key) => Err(ResxError::NotADirectory(self.describe(&key))),
            None => Err(ResxError::not_found(self.describe(&key))),
        }
    }

    /// Read a whole file entry
    pub fn read_entry(&mut self, entry: &str) -> ResxResult<Bytes> {
        let key = entry_key(entry);
        if self.index.dirs.contains_key(&key) {
            return Err(ResxError::NotAFile(self.describe(&key)));
        }
        let Some(raw) = self.index.files.get(&key).cloned() else {
            return Err(ResxError::not_found(self.describe(&key)));
        };

        let shown = self.describe(&key);
        let mut file = self.archive.by_name(&raw).map_err(|e| match e {
            ZipError::FileNotFound => ResxError::not_found(shown.clone()),
            other => ResxError::archive_access(shown.clone(), other),
        })?;
        // declared sizes come from the archive and may be forged
        let mut buffer = Vec::with_capacity(file.size().min(PREALLOCATE_LIMIT) as usize);
        file.read_to_end(&mut buffer)
            .map_err(|e| ResxError::archive_access(shown, e))?;
        Ok(Bytes::from(buffer))
    }
}

impl Drop for ArchiveMount {
    fn drop(&mut self) {
        tracing::trace!("Released archive mount {}", self.path.display());
    }
}

/// List the regular file entries under `internal_root` inside `archive`.
///
/// Results are entry paths relative to the archive root. The mount is
/// released before returning, whether the walk succeeded or not.
pub fn list_archive_files(archive: &Path, internal_root: &str, options: &ListOptions) -> ResxResult<Vec<String>> {
    let mount = ArchiveMount::open(archive)?;
    let files: Vec<String> = mount.walk(internal_root, options)?.map(str::to_owned).collect();
    tracing::debug!("Listed {} entries under {}", files.len(), mount.describe(&entry_key(internal_root)));
    Ok(files)
}

/// Read one file entry out of `archive`
pub fn read_archive_entry(archive: &Path, entry: &str) -> ResxResult<Bytes> {
    ArchiveMount::open(archive)?.read_entry(entry)
}
