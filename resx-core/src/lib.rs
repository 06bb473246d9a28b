//! resx core
//!
//! Core traits, types, and path handling for the dual-mode resource explorer.

pub mod config;
pub mod error;
pub mod host;
pub mod location;
pub mod locator;
pub mod operations;
pub mod path;
pub mod platform;

pub use config::ExplorerConfig;
pub use error::{ResxError, ResxResult};
pub use host::HostFiles;
pub use location::{ArchiveUri, LocatorUri, ResourceLocation};
pub use locator::{NoLocator, ResourceLocator};
pub use operations::{ListOptions, ReadMode, ResourceContent};
pub use path::ResourcePath;
