//! Concrete resource kinds built around [`ResourceIdentity`].

use crate::error::Result;
use crate::handle::BackingHandle;
use crate::identity::ResourceIdentity;
use chrono::{DateTime, Utc};

/// Whether a resource holds content or other resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// File-like resource with content.
    Leaf,
    /// Container of other resources.
    Collection,
}

/// The accessors a WebDAV protocol layer needs to render a resource.
pub trait DavResource: Send + Sync {
    fn uri(&self) -> &str;

    fn name(&self) -> &str;

    fn creation_date(&self) -> Result<DateTime<Utc>>;

    fn last_modified(&self) -> Result<DateTime<Utc>>;

    fn kind(&self) -> ResourceKind;

    /// Content size in bytes; collections report `0`.
    fn content_length(&self) -> Result<u64> {
        Ok(0)
    }

    fn is_collection(&self) -> bool {
        self.kind() == ResourceKind::Collection
    }
}

/// A file-like leaf resource.
#[derive(Debug)]
pub struct FileResource<H> {
    identity: ResourceIdentity<H>,
}

impl<H: BackingHandle> FileResource<H> {
    pub fn new(handle: H, uri: impl Into<String>) -> Self {
        Self {
            identity: ResourceIdentity::new(handle, uri),
        }
    }

    pub fn identity(&self) -> &ResourceIdentity<H> {
        &self.identity
    }
}

impl<H: BackingHandle> DavResource for FileResource<H> {
    fn uri(&self) -> &str {
        self.identity.uri()
    }

    fn name(&self) -> &str {
        self.identity.name()
    }

    fn creation_date(&self) -> Result<DateTime<Utc>> {
        self.identity.creation_date()
    }

    fn last_modified(&self) -> Result<DateTime<Utc>> {
        self.identity.last_modified()
    }

    fn kind(&self) -> ResourceKind {
        ResourceKind::Leaf
    }

    fn content_length(&self) -> Result<u64> {
        self.identity.content_length()
    }
}

/// A container resource (directory or key prefix).
#[derive(Debug)]
pub struct CollectionResource<H> {
    identity: ResourceIdentity<H>,
}

impl<H: BackingHandle> CollectionResource<H> {
    pub fn new(handle: H, uri: impl Into<String>) -> Self {
        Self {
            identity: ResourceIdentity::new(handle, uri),
        }
    }

    pub fn identity(&self) -> &ResourceIdentity<H> {
        &self.identity
    }

    /// URI of the child called `segment`, joined with exactly one `/`.
    pub fn child_uri(&self, segment: &str) -> String {
        format!(
            "{}/{}",
            self.identity.uri().trim_end_matches('/'),
            segment.trim_start_matches('/')
        )
    }
}

impl<H: BackingHandle> DavResource for CollectionResource<H> {
    fn uri(&self) -> &str {
        self.identity.uri()
    }

    fn name(&self) -> &str {
        self.identity.name()
    }

    fn creation_date(&self) -> Result<DateTime<Utc>> {
        self.identity.creation_date()
    }

    fn last_modified(&self) -> Result<DateTime<Utc>> {
        self.identity.last_modified()
    }

    fn kind(&self) -> ResourceKind {
        ResourceKind::Collection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MetadataError;
    use std::time::SystemTime;

    struct Epoch;

    impl BackingHandle for Epoch {
        fn last_modified(&self) -> std::result::Result<SystemTime, MetadataError> {
            Ok(SystemTime::UNIX_EPOCH)
        }

        fn content_length(&self) -> std::result::Result<u64, MetadataError> {
            Ok(7)
        }
    }

    #[test]
    fn test_kinds() {
        let file = FileResource::new(Epoch, "/a/b.txt");
        let dir = CollectionResource::new(Epoch, "/a");
        assert_eq!(file.kind(), ResourceKind::Leaf);
        assert!(!file.is_collection());
        assert!(dir.is_collection());
    }

    #[test]
    fn test_collection_reports_zero_length() {
        let dir = CollectionResource::new(Epoch, "/a");
        let file = FileResource::new(Epoch, "/a/b");
        assert_eq!(dir.content_length().unwrap(), 0);
        assert_eq!(file.content_length().unwrap(), 7);
    }

    #[test]
    fn test_child_uri_joins_with_single_slash() {
        assert_eq!(CollectionResource::new(Epoch, "/").child_uri("x"), "/x");
        assert_eq!(CollectionResource::new(Epoch, "/a").child_uri("b"), "/a/b");
        assert_eq!(CollectionResource::new(Epoch, "/a/").child_uri("/b"), "/a/b");
        assert_eq!(CollectionResource::new(Epoch, "").child_uri("b"), "/b");
    }
}
