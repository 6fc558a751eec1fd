//! # objdav-fs
//!
//! Exposes the files below a local root directory as WebDAV resources.
//!
//! This crate provides:
//! - [`ResourceTree`]: discovery of file and collection resources by URI
//! - [`BridgeConfig`]: TOML-backed gateway configuration
//! - **WebDAV rendering** of resource metadata (with `webdav` feature)
//!
//! ## Example
//!
//! ```ignore
//! use objdav_fs::{BridgeConfig, ResourceTree};
//! use objdav_resource::DavResource;
//!
//! let config = BridgeConfig::load("objdav.toml")?;
//! let tree = ResourceTree::from_config(&config);
//!
//! for child in tree.children("/")? {
//!     println!("{} -> {}", child.name(), child.uri());
//! }
//! ```
//!
//! ## WebDAV Support
//!
//! ```ignore
//! use objdav_fs::webdav::{serve, ResourceDavFs};
//! use objdav_fs::{BridgeConfig, ResourceTree};
//! use objdav_log::ScopedLogger;
//!
//! #[tokio::main]
//! async fn main() -> objdav_fs::Result<()> {
//!     let config = BridgeConfig::default();
//!     let logger = ScopedLogger::with_prefix(config.open_sink()?, config.log_prefix.clone());
//!     let fs = ResourceDavFs::new(ResourceTree::from_config(&config), &logger);
//!     serve(fs, &logger, config.port).await?;
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod tree;

#[cfg(feature = "webdav")]
pub mod webdav;

pub use config::BridgeConfig;
pub use error::{Error, Result};
pub use tree::{normalize_uri, Resource, ResourceTree};

// Re-export the resource and logging contracts for convenience
pub use objdav_log::{ScopedLogger, Sink};
pub use objdav_resource::{DavResource, ResourceError, ResourceKind};
