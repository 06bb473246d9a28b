//! Host file operations trait
//!
//! One-shot calls into the host platform. Each is independently failable and
//! carries no state between calls.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

use crate::error::ResxResult;

/// Plain host-filesystem operations the explorer delegates to
pub trait HostFiles: Send + Sync {
    fn has_file(&self, path: &Path) -> bool;

    fn read_to_string(&self, path: &Path) -> ResxResult<String>;
    fn read_bytes(&self, path: &Path) -> ResxResult<Bytes>;

    /// Replace the content of an existing file
    fn write_file(&self, path: &Path, content: &[u8]) -> ResxResult<()>;

    /// Create a file that must not exist yet, optionally with initial content
    fn create_file(&self, path: &Path, content: Option<&[u8]>) -> ResxResult<PathBuf>;

    fn delete_file(&self, path: &Path) -> ResxResult<()>;

    /// Create a folder and any missing parents
    fn create_folder(&self, path: &Path) -> ResxResult<PathBuf>;

    /// Gzip `path` into `dest`, then delete `path`
    fn compress_file(&self, path: &Path, dest: &Path) -> ResxResult<()>;

    fn last_modified(&self, path: &Path) -> ResxResult<DateTime<Utc>>;

    /// Open `path` in the application registered for its type
    fn open_with_default_app(&self, path: &Path) -> ResxResult<()>;
}
