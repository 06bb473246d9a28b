//! Storage for resx
//!
//! Two storage modes sit behind the explorer:
//! - loose files on the host filesystem ([`LocalHost`], [`list_files`])
//! - entries packaged inside ZIP bundles ([`ArchiveMount`], [`list_archive_files`])
//!
//! plus the locators that tell the explorer which mode serves a resource.

pub mod archive;
mod local;
pub mod locators;
mod walk;

pub use archive::{list_archive_files, read_archive_entry, ArchiveMount, ArchiveWalk};
pub use local::LocalHost;
pub use locators::{ArchiveLocator, DirectoryLocator, LocatorChain};
pub use walk::list_files;
