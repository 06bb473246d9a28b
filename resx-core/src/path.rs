//! Path normalization and the resource path value type

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ResxError, ResxResult};

/// Characters that are never allowed in a normalized path.
const ILLEGAL_CHARS: [char; 8] = ['<', '*', '>', '?', '\'', '"', ':', '|'];

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// True when the raw input starts with a Windows drive prefix such as `C:`.
fn has_drive_prefix(path: &str) -> bool {
    let mut chars = path.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some(letter), Some(':')) if letter.is_ascii_alphabetic()
    )
}

/// Canonicalize a user-supplied path string.
///
/// Separator runs (`/` or `\`) collapse into a single `/`, leading and
/// trailing separators and whitespace are stripped, and every character of
/// `< * > ? ' " : |` becomes `_`. A drive colon (`C:`) at the start of the
/// input survives. This never fails; malformed input yields best-effort
/// output.
pub fn normalize(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }
    let keep_drive = has_drive_prefix(path);

    let mut collapsed = String::with_capacity(path.len());
    let mut in_separator = false;
    for ch in path.chars() {
        if is_separator(ch) {
            if !in_separator {
                collapsed.push('/');
            }
            in_separator = true;
        } else {
            collapsed.push(ch);
            in_separator = false;
        }
    }

    collapsed
        .trim_matches(|c: char| c == '/' || c.is_whitespace())
        .chars()
        .enumerate()
        .map(|(i, ch)| {
            if keep_drive && i == 1 && ch == ':' {
                ch
            } else if ILLEGAL_CHARS.contains(&ch) {
                '_'
            } else {
                ch
            }
        })
        .collect()
}

/// [`normalize`], with `.` segments dropped.
///
/// `./textures`, `textures/.` and `textures` all name the same resource
/// directory; this is the form lookups and listings compare against.
pub fn canonicalize(path: &str) -> String {
    let mut current = normalize(path);
    // dropping a segment can expose edge whitespace, so renormalize until stable
    while current.split('/').any(|segment| segment == ".") {
        let kept: Vec<&str> = current.split('/').filter(|segment| *segment != ".").collect();
        current = normalize(&kept.join("/"));
    }
    current
}

/// Remove the resource namespace `prefix` from `path`.
///
/// Both sides are normalized first. The prefix only matches whole leading
/// segments, so `assets` strips `assets/a.png` but leaves `assets2/a.png`.
pub fn strip_resource_prefix(path: &str, prefix: &str) -> String {
    let path = normalize(path);
    let prefix = normalize(prefix);
    if prefix.is_empty() {
        return path;
    }
    match path.strip_prefix(prefix.as_str()) {
        Some("") => String::new(),
        Some(rest) if rest.starts_with('/') => rest[1..].to_string(),
        _ => path,
    }
}

/// Last segment of `path`, with extension.
pub fn file_name(path: &str) -> String {
    path.trim_end_matches(is_separator)
        .rsplit(is_separator)
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Extension of the file name in `path`, without the dot.
pub fn file_extension(path: &str) -> ResxResult<String> {
    let name = file_name(path);
    match name.rfind('.') {
        Some(dot) if dot + 1 < name.len() => Ok(name[dot + 1..].to_string()),
        _ => Err(ResxError::path_format(path, "path has no file extension")),
    }
}

/// File name in `path` without its extension.
pub fn base_name(path: &str) -> ResxResult<String> {
    let extension = file_extension(path)?;
    let name = file_name(path);
    Ok(name[..name.len() - extension.len() - 1].to_string())
}

/// A normalized path identifying a file or folder, either on disk or
/// relative to the resource namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ResourcePath(String);

impl ResourcePath {
    pub fn new(path: impl AsRef<str>) -> Self {
        Self(normalize(path.as_ref()))
    }

    pub fn root() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    pub fn join(&self, child: impl AsRef<str>) -> Self {
        if self.is_root() {
            return Self::new(child);
        }
        Self::new(format!("{}/{}", self.0, child.as_ref()))
    }

    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        Some(match self.0.rsplit_once('/') {
            Some((parent, _)) => Self(parent.to_string()),
            None => Self::root(),
        })
    }

    pub fn file_name(&self) -> String {
        file_name(&self.0)
    }

    pub fn extension(&self) -> ResxResult<String> {
        file_extension(&self.0)
    }

    pub fn base_name(&self) -> ResxResult<String> {
        base_name(&self.0)
    }

    pub fn strip_prefix(&self, prefix: &str) -> Self {
        Self(strip_resource_prefix(&self.0, prefix))
    }
}

impl From<String> for ResourcePath {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

impl From<&str> for ResourcePath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<ResourcePath> for String {
    fn from(path: ResourcePath) -> Self {
        path.0
    }
}

impl AsRef<str> for ResourcePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
