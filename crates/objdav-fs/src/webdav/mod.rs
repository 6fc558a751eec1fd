//! WebDAV adapter for objdav resources.
//!
//! [`ResourceDavFs`] renders the resources of a [`ResourceTree`](crate::ResourceTree)
//! through `dav-server`, so PROPFIND listings show each resource's derived
//! name, size and timestamps. Request handling itself is left to `dav-server`.
//!
//! # Example
//!
//! ```ignore
//! use objdav_fs::webdav::{serve, ResourceDavFs};
//! use objdav_fs::ResourceTree;
//! use objdav_log::{ScopedLogger, Sink};
//!
//! let logger = ScopedLogger::with_prefix(Sink::stderr(), "gateway");
//! let fs = ResourceDavFs::new(ResourceTree::new("/srv/share"), &logger);
//! serve(fs, &logger, 4918).await?;
//! ```

mod filesystem;
mod server;

pub use filesystem::ResourceDavFs;
pub use server::{serve, serve_background, ObjdavServer};
