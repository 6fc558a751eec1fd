//! # objdav-resource
//!
//! Resource identity for the objdav gateway.
//!
//! This crate provides:
//! - [`ResourceIdentity`]: URI, derived display name and timestamps
//! - [`DavResource`]: the accessor contract consumed by the WebDAV layer
//! - Leaf and collection resource kinds
//! - Backing handles for local files and object-store entries
//!
//! ## Example
//!
//! ```ignore
//! use objdav_resource::{DavResource, FileHandle, FileResource};
//!
//! let file = FileResource::new(FileHandle::new("/srv/share/a/b/c.txt"), "/a/b/c.txt");
//! assert_eq!(file.name(), "c.txt");
//! println!("modified: {}", file.last_modified()?);
//! ```

mod error;
mod handle;
mod identity;
mod resource;

pub use error::{MetadataError, ResourceError, Result};
pub use handle::{BackingHandle, FileHandle, ObjectHandle, ObjectMeta, ObjectStore};
pub use identity::{derive_name, ResourceIdentity};
pub use resource::{CollectionResource, DavResource, FileResource, ResourceKind};
