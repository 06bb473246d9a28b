//! Local filesystem host operations

use bytes::Bytes;
use chrono::{DateTime, Utc};
use flate2::write::GzEncoder;
use flate2::Compression;
use resx_core::{
    error::{ResxError, ResxResult},
    host::HostFiles,
    platform::Opener,
};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

fn shown(path: &Path) -> String {
    path.display().to_string()
}

/// Host operations backed by `std::fs`
#[derive(Debug, Clone)]
pub struct LocalHost {
    opener: Option<Opener>,
}

impl LocalHost {
    pub fn new() -> Self {
        Self { opener: Opener::detect() }
    }

    /// Use a specific opener (or none) instead of the platform default
    pub fn with_opener(opener: Option<Opener>) -> Self {
        Self { opener }
    }

    fn require_file(path: &Path) -> ResxResult<()> {
        let meta = fs::metadata(path).map_err(|e| ResxError::from_io(shown(path), e))?;
        if meta.is_dir() {
            return Err(ResxError::NotAFile(shown(path)));
        }
        Ok(())
    }
}

impl Default for LocalHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostFiles for LocalHost {
    fn has_file(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> ResxResult<String> {
        Self::require_file(path)?;
        fs::read_to_string(path).map_err(|e| ResxError::from_io(shown(path), e))
    }

    fn read_bytes(&self, path: &Path) -> ResxResult<Bytes> {
        Self::require_file(path)?;
        fs::read(path)
            .map(Bytes::from)
            .map_err(|e| ResxError::from_io(shown(path), e))
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> ResxResult<()> {
        Self::require_file(path)?;
        fs::write(path, content).map_err(|e| ResxError::from_io(shown(path), e))
    }

    fn create_file(&self, path: &Path, content: Option<&[u8]>) -> ResxResult<PathBuf> {
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| match e.kind() {
                io::ErrorKind::AlreadyExists => ResxError::AlreadyExists(shown(path)),
                _ => ResxError::from_io(shown(path), e),
            })?;
        if let Some(content) = content {
            file.write_all(content)?;
        }
        Ok(path.to_path_buf())
    }

    fn delete_file(&self, path: &Path) -> ResxResult<()> {
        Self::require_file(path)?;
        fs::remove_file(path).map_err(|e| ResxError::from_io(shown(path), e))
    }

    fn create_folder(&self, path: &Path) -> ResxResult<PathBuf> {
        fs::create_dir_all(path)?;
        Ok(path.to_path_buf())
    }

    fn compress_file(&self, path: &Path, dest: &Path) -> ResxResult<()> {
        Self::require_file(path)?;
        {
            let mut input = BufReader::new(File::open(path).map_err(|e| ResxError::from_io(shown(path), e))?);
            let output = BufWriter::new(File::create(dest)?);
            let mut encoder = GzEncoder::new(output, Compression::default());
            io::copy(&mut input, &mut encoder)?;
            encoder.finish()?.flush()?;
        }
        fs::remove_file(path)?;
        tracing::debug!("Compressed {} -> {}", path.display(), dest.display());
        Ok(())
    }

    fn last_modified(&self, path: &Path) -> ResxResult<DateTime<Utc>> {
        let meta = fs::metadata(path).map_err(|e| ResxError::from_io(shown(path), e))?;
        Ok(meta.modified()?.into())
    }

    fn open_with_default_app(&self, path: &Path) -> ResxResult<()> {
        if !path.exists() {
            return Err(ResxError::not_found(shown(path)));
        }
        let opener = self
            .opener
            .ok_or_else(|| ResxError::Unsupported("no default-application opener on this platform".into()))?;

        Command::new(opener.program)
            .args(opener.args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        tracing::debug!("Opened {} with {}", path.display(), opener.program);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;

    #[test]
    fn test_write_then_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.txt");
        let host = LocalHost::new();

        host.create_file(&path, None).unwrap();
        host.write_file(&path, "привет, world".as_bytes()).unwrap();

        assert_eq!(host.read_to_string(&path).unwrap(), "привет, world");
        assert_eq!(host.read_bytes(&path).unwrap(), Bytes::from("привет, world"));
    }

    #[test]
    fn test_create_file_with_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.cfg");
        let host = LocalHost::new();

        let created = host.create_file(&path, Some(b"volume=3".as_slice())).unwrap();
        assert_eq!(created, path);
        assert!(host.has_file(&path));
        assert_eq!(host.read_to_string(&path).unwrap(), "volume=3");
    }

    #[test]
    fn test_create_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("taken.txt");
        fs::write(&path, "x").unwrap();

        let err = LocalHost::new().create_file(&path, None).unwrap_err();
        assert!(matches!(err, ResxError::AlreadyExists(_)));
        assert_eq!(fs::read_to_string(&path).unwrap(), "x");
    }

    #[test]
    fn test_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ghost.txt");
        let host = LocalHost::new();

        assert!(!host.has_file(&path));
        assert!(host.read_to_string(&path).unwrap_err().is_not_found());
        assert!(host.read_bytes(&path).unwrap_err().is_not_found());
        assert!(host.write_file(&path, b"x").unwrap_err().is_not_found());
        assert!(host.delete_file(&path).unwrap_err().is_not_found());
        assert!(host.last_modified(&path).unwrap_err().is_not_found());
        assert!(host.compress_file(&path, &dir.path().join("g.gz")).unwrap_err().is_not_found());
        assert!(host.open_with_default_app(&path).unwrap_err().is_not_found());
        assert!(!path.exists());
    }

    #[test]
    fn test_read_directory_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = LocalHost::new().read_bytes(dir.path()).unwrap_err();
        assert!(matches!(err, ResxError::NotAFile(_)));
    }

    #[test]
    fn test_delete_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("old.log");
        fs::write(&path, "bye").unwrap();

        LocalHost::new().delete_file(&path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_create_folder_with_parents() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b/c");

        let created = LocalHost::new().create_folder(&nested).unwrap();
        assert_eq!(created, nested);
        assert!(nested.is_dir());
        // already present is fine
        LocalHost::new().create_folder(&nested).unwrap();
    }

    #[test]
    fn test_compress_file_replaces_source() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("latest.log");
        let dest = dir.path().join("latest.log.gz");
        let text = "line\n".repeat(500);
        fs::write(&source, &text).unwrap();

        LocalHost::new().compress_file(&source, &dest).unwrap();

        assert!(!source.exists());
        let mut decoded = String::new();
        GzDecoder::new(File::open(&dest).unwrap())
            .read_to_string(&mut decoded)
            .unwrap();
        assert_eq!(decoded, text);
    }

    #[test]
    fn test_last_modified_is_recent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh.txt");
        fs::write(&path, "x").unwrap();

        let modified = LocalHost::new().last_modified(&path).unwrap();
        let age = Utc::now() - modified;
        assert!(age < chrono::Duration::minutes(5));
    }

    #[test]
    fn test_open_without_opener_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        fs::write(&path, "x").unwrap();

        let err = LocalHost::with_opener(None).open_with_default_app(&path).unwrap_err();
        assert!(matches!(err, ResxError::Unsupported(_)));
    }
}
