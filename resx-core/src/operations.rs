//! Operation options and results

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::{ResxError, ResxResult};

/// Depth bound applied to every recursive walk unless configured otherwise
pub const DEFAULT_MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListOptions {
    pub recursive: bool,
    /// Deepest level a recursive walk descends to (the listed folder is 0)
    pub max_depth: usize,
    pub follow_links: bool,
}

impl ListOptions {
    pub fn shallow() -> Self {
        Self::default()
    }

    pub fn recursive() -> Self {
        Self { recursive: true, ..Default::default() }
    }

    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Effective depth limit for this listing
    pub fn depth_limit(&self) -> usize {
        if self.recursive {
            self.max_depth.max(1)
        } else {
            1
        }
    }
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            recursive: false,
            max_depth: DEFAULT_MAX_DEPTH,
            follow_links: true,
        }
    }
}

/// Strict UTF-8 decoding of raw bytes read from `origin`
pub fn decode_text(origin: &str, raw: Bytes) -> ResxResult<String> {
    String::from_utf8(raw.to_vec()).map_err(|e| {
        ResxError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("{origin} is not valid UTF-8: {e}"),
        ))
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReadMode {
    #[default]
    Text,
    Bytes,
}

/// Content of a resource, decoded per [`ReadMode`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceContent {
    Text(String),
    Bytes(Bytes),
}

impl ResourceContent {
    /// Decode raw bytes read from `origin` according to `mode`
    pub fn decode(origin: &str, raw: Bytes, mode: ReadMode) -> ResxResult<Self> {
        match mode {
            ReadMode::Bytes => Ok(Self::Bytes(raw)),
            ReadMode::Text => decode_text(origin, raw).map(Self::Text),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ResourceContent::Text(text) => text.len(),
            ResourceContent::Bytes(bytes) => bytes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            ResourceContent::Text(text) => text.as_bytes(),
            ResourceContent::Bytes(bytes) => bytes.as_ref(),
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            ResourceContent::Text(text) => Some(text),
            ResourceContent::Bytes(_) => None,
        }
    }

    pub fn into_bytes(self) -> Bytes {
        match self {
            ResourceContent::Text(text) => Bytes::from(text),
            ResourceContent::Bytes(bytes) => bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_limit() {
        assert_eq!(ListOptions::shallow().depth_limit(), 1);
        assert_eq!(ListOptions::recursive().depth_limit(), DEFAULT_MAX_DEPTH);
        assert_eq!(ListOptions::recursive().with_max_depth(3).depth_limit(), 3);
        assert_eq!(ListOptions::recursive().with_max_depth(0).depth_limit(), 1);
    }

    #[test]
    fn test_decode_text() {
        let content = ResourceContent::decode("a.txt", Bytes::from_static(b"hello"), ReadMode::Text).unwrap();
        assert_eq!(content, ResourceContent::Text("hello".into()));
        assert_eq!(content.len(), 5);
    }

    #[test]
    fn test_decode_invalid_utf8() {
        let err = ResourceContent::decode("a.bin", Bytes::from_static(&[0xff, 0xfe]), ReadMode::Text).unwrap_err();
        assert!(matches!(err, ResxError::Io(_)));
        assert!(err.to_string().contains("a.bin"));
    }

    #[test]
    fn test_decode_bytes() {
        let content = ResourceContent::decode("a.bin", Bytes::from_static(&[0xff]), ReadMode::Bytes).unwrap();
        assert_eq!(content.as_bytes(), &[0xff]);
        assert!(content.clone().into_text().is_none());
        assert_eq!(content.into_bytes(), Bytes::from_static(&[0xff]));
    }
}
