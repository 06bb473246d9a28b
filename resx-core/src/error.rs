//! Error types for resx

use thiserror::Error;

/// Result type alias
pub type ResxResult<T> = Result<T, ResxError>;

/// Underlying failure carried as context by the typed error kinds
pub type Cause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type
#[derive(Error, Debug)]
pub enum ResxError {
    #[error("Not found: {path}")]
    NotFound {
        path: String,
        #[source]
        cause: Option<Cause>,
    },

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Not a file: {0}")]
    NotAFile(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid path format [{path}]: {reason}")]
    PathFormat { path: String, reason: String },

    #[error("Cannot resolve resource [{name}]: {reason}")]
    ResourceResolution { name: String, reason: String },

    #[error("Cannot access archive: {archive}")]
    ArchiveAccess {
        archive: String,
        #[source]
        cause: Option<Cause>,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ResxError {
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into(), cause: None }
    }

    pub fn not_found_caused(path: impl Into<String>, cause: impl Into<Cause>) -> Self {
        Self::NotFound { path: path.into(), cause: Some(cause.into()) }
    }

    pub fn path_format(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::PathFormat { path: path.into(), reason: reason.into() }
    }

    pub fn resolution(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ResourceResolution { name: name.into(), reason: reason.into() }
    }

    pub fn archive_access(archive: impl Into<String>, cause: impl Into<Cause>) -> Self {
        Self::ArchiveAccess { archive: archive.into(), cause: Some(cause.into()) }
    }

    /// Classify a host I/O failure on `path`: a missing target becomes
    /// `NotFound`, anything else stays `Io`.
    pub fn from_io(path: impl Into<String>, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::not_found_caused(path, err)
        } else {
            Self::Io(err)
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ResxError::NotFound { .. })
    }

    pub fn is_archive_error(&self) -> bool {
        matches!(self, ResxError::ArchiveAccess { .. })
    }
}
