//! Backing handles: the storage-side references resources read metadata from.

use crate::error::MetadataError;
use chrono::{DateTime, Utc};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

/// A reference to a stored entity that can report its metadata.
///
/// Every call queries the backend; implementations do not cache.
pub trait BackingHandle: Send + Sync {
    /// Last modification time of the entity.
    fn last_modified(&self) -> Result<SystemTime, MetadataError>;

    /// Size of the entity's content in bytes.
    fn content_length(&self) -> Result<u64, MetadataError> {
        Ok(0)
    }
}

impl<T: BackingHandle + ?Sized> BackingHandle for &T {
    fn last_modified(&self) -> Result<SystemTime, MetadataError> {
        (**self).last_modified()
    }

    fn content_length(&self) -> Result<u64, MetadataError> {
        (**self).content_length()
    }
}

impl<T: BackingHandle + ?Sized> BackingHandle for Arc<T> {
    fn last_modified(&self) -> Result<SystemTime, MetadataError> {
        (**self).last_modified()
    }

    fn content_length(&self) -> Result<u64, MetadataError> {
        (**self).content_length()
    }
}

impl<T: BackingHandle + ?Sized> BackingHandle for Box<T> {
    fn last_modified(&self) -> Result<SystemTime, MetadataError> {
        (**self).last_modified()
    }

    fn content_length(&self) -> Result<u64, MetadataError> {
        (**self).content_length()
    }
}

/// A file or directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileHandle {
    path: PathBuf,
}

impl FileHandle {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BackingHandle for FileHandle {
    fn last_modified(&self) -> Result<SystemTime, MetadataError> {
        let metadata = fs::metadata(&self.path)?;
        Ok(metadata.modified()?)
    }

    fn content_length(&self) -> Result<u64, MetadataError> {
        let metadata = fs::metadata(&self.path)?;
        if metadata.is_dir() {
            Ok(0)
        } else {
            Ok(metadata.len())
        }
    }
}

/// Metadata for an object as reported by the store.
#[derive(Debug, Clone)]
pub struct ObjectMeta {
    /// Object key within the bucket.
    pub key: String,
    /// Object size in bytes.
    pub size: u64,
    /// Last modified timestamp, when the store reports one.
    pub last_modified: Option<DateTime<Utc>>,
    /// ETag (storage-specific).
    pub etag: Option<String>,
}

/// The metadata side of an object-store client.
pub trait ObjectStore: Send + Sync {
    /// Fetch metadata for `key` without reading its content.
    fn head(&self, key: &str) -> Result<ObjectMeta, MetadataError>;
}

/// An entry in a remote object store.
#[derive(Clone)]
pub struct ObjectHandle {
    store: Arc<dyn ObjectStore>,
    key: String,
}

impl ObjectHandle {
    pub fn new(store: Arc<dyn ObjectStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Debug for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectHandle").field("key", &self.key).finish()
    }
}

impl BackingHandle for ObjectHandle {
    fn last_modified(&self) -> Result<SystemTime, MetadataError> {
        let meta = self.store.head(&self.key)?;
        meta.last_modified
            .map(SystemTime::from)
            .ok_or_else(|| MetadataError::Missing(self.key.clone()))
    }

    fn content_length(&self) -> Result<u64, MetadataError> {
        Ok(self.store.head(&self.key)?.size)
    }
}
