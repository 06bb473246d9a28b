//! Resolved resource locations and locator URI parsing
//!
//! Locators answer with URIs of two shapes:
//! - `file:///abs/path` for loose files and folders
//! - `zip:file:///abs/bundle.zip!/entry/path` (or `jar:`) for archive entries
//!
//! Reserved characters in paths are percent-encoded.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{ResxError, ResxResult};
use crate::path::canonicalize;

/// Schemes that denote an entry inside an archive container
pub const ARCHIVE_SCHEMES: [&str; 2] = ["zip", "jar"];

/// Separates the container URI from the entry path in an archive URI
pub const ENTRY_DELIMITER: char = '!';

/// Where a resource actually lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceLocation {
    /// A loose file or folder on the host filesystem
    OnDisk(PathBuf),
    /// An entry inside an archive bundle
    InArchive { archive: PathBuf, entry: String },
}

impl ResourceLocation {
    pub fn is_archived(&self) -> bool {
        matches!(self, ResourceLocation::InArchive { .. })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ResourceLocation::OnDisk(_) => "disk",
            ResourceLocation::InArchive { .. } => "archive",
        }
    }
}

impl fmt::Display for ResourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceLocation::OnDisk(path) => write!(f, "{}", path.display()),
            ResourceLocation::InArchive { archive, entry } => {
                write!(f, "{}{}/{}", archive.display(), ENTRY_DELIMITER, entry)
            }
        }
    }
}

/// A locator answer, parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocatorUri {
    File(PathBuf),
    Archive(ArchiveUri),
}

impl LocatorUri {
    pub fn parse(uri: &str) -> ResxResult<Self> {
        let (scheme, _) = uri
            .split_once(':')
            .ok_or_else(|| ResxError::resolution(uri, "URI has no scheme"))?;
        let scheme = scheme.to_ascii_lowercase();

        if scheme == "file" {
            return parse_file_uri(uri).map(LocatorUri::File);
        }
        if ARCHIVE_SCHEMES.contains(&scheme.as_str()) {
            return ArchiveUri::parse(uri).map(LocatorUri::Archive);
        }
        Err(ResxError::resolution(uri, format!("unsupported URI scheme '{scheme}'")))
    }

    pub fn into_location(self) -> ResourceLocation {
        match self {
            LocatorUri::File(path) => ResourceLocation::OnDisk(path),
            LocatorUri::Archive(uri) => ResourceLocation::InArchive {
                archive: uri.container,
                entry: uri.entry,
            },
        }
    }
}

/// `(container path, entry path)` pair taken from an archive URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveUri {
    pub container: PathBuf,
    /// Canonical entry path, relative to the archive root
    pub entry: String,
}

impl ArchiveUri {
    pub fn new(container: impl Into<PathBuf>, entry: &str) -> Self {
        Self { container: container.into(), entry: canonicalize(entry) }
    }

    pub fn parse(uri: &str) -> ResxResult<Self> {
        let (scheme, rest) = uri
            .split_once(':')
            .ok_or_else(|| ResxError::resolution(uri, "URI has no scheme"))?;
        if !ARCHIVE_SCHEMES.contains(&scheme.to_ascii_lowercase().as_str()) {
            return Err(ResxError::resolution(uri, format!("'{scheme}' is not an archive scheme")));
        }

        let (container, entry) = rest.split_once(ENTRY_DELIMITER).ok_or_else(|| {
            ResxError::resolution(uri, format!("missing '{ENTRY_DELIMITER}' entry delimiter"))
        })?;
        if !container.to_ascii_lowercase().starts_with("file:") {
            return Err(ResxError::resolution(uri, "archive container is not a file URI"));
        }
        let container = parse_file_uri(container)
            .map_err(|_| ResxError::resolution(uri, "malformed archive container URI"))?;
        let entry = percent_decode(entry)
            .ok_or_else(|| ResxError::resolution(uri, "malformed escape in entry path"))?;

        Ok(Self::new(container, &entry))
    }

    pub fn to_uri(&self) -> String {
        format!(
            "{}:{}{}/{}",
            ARCHIVE_SCHEMES[0],
            file_uri(&self.container),
            ENTRY_DELIMITER,
            percent_encode(&self.entry)
        )
    }
}

/// `file://` URI for an absolute host path
pub fn file_uri(path: &Path) -> String {
    let mut raw = path.to_string_lossy().replace('\\', "/");
    if !raw.starts_with('/') {
        raw.insert(0, '/');
    }
    format!("file://{}", percent_encode(&raw))
}

fn parse_file_uri(uri: &str) -> ResxResult<PathBuf> {
    let rest = match uri.get(..5) {
        Some(scheme) if scheme.eq_ignore_ascii_case("file:") => &uri[5..],
        _ => return Err(ResxError::resolution(uri, "not a file URI")),
    };

    let path = match rest.strip_prefix("//") {
        Some(with_authority) => {
            let split = with_authority.find('/').unwrap_or(with_authority.len());
            let authority = &with_authority[..split];
            if !authority.is_empty() && !authority.eq_ignore_ascii_case("localhost") {
                return Err(ResxError::resolution(uri, format!("remote host '{authority}' is not supported")));
            }
            &with_authority[split..]
        }
        None => rest,
    };
    if path.is_empty() {
        return Err(ResxError::resolution(uri, "file URI has an empty path"));
    }

    let decoded = percent_decode(path)
        .ok_or_else(|| ResxError::resolution(uri, "malformed escape in file path"))?;
    Ok(PathBuf::from(strip_drive_slash(&decoded)))
}

/// `/C:/x` names a drive path; drop the slash so the host sees `C:/x`.
fn strip_drive_slash(path: &str) -> &str {
    let bytes = path.as_bytes();
    if bytes.len() >= 3 && bytes[0] == b'/' && bytes[1].is_ascii_alphabetic() && bytes[2] == b':' {
        &path[1..]
    } else {
        path
    }
}

fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~' | b'/' | b':')
}

fn percent_encode(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        if is_unreserved(byte) {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

fn percent_decode(encoded: &str) -> Option<String> {
    let bytes = encoded.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes.get(i + 1..i + 3)?;
            if !hex.iter().all(u8::is_ascii_hexdigit) {
                return None;
            }
            let hex = std::str::from_utf8(hex).ok()?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}
