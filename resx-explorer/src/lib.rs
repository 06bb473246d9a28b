// SPDX-License-Identifier: AGPL-3.0-or-later
//! Dual-mode resource explorer
//!
//! Resources are addressed by paths relative to a namespace (`assets/` by
//! default). During development they live as loose files under a search
//! root; in a packaged build they live inside a ZIP bundle. The
//! [`ResourceExplorer`] hides the difference:
//!
//! ```no_run
//! use resx_core::ExplorerConfig;
//! use resx_explorer::ResourceExplorer;
//!
//! let config = ExplorerConfig {
//!     bundles: vec!["game.zip".into()],
//!     ..Default::default()
//! };
//! let explorer = ResourceExplorer::from_config(config);
//! for texture in explorer.list_resources("textures", true)? {
//!     println!("{texture}");
//! }
//! # Ok::<(), resx_core::ResxError>(())
//! ```

mod explorer;
pub mod resolver;

pub use explorer::ResourceExplorer;
pub use resolver::Resolver;
