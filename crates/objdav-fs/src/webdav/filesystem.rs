//! WebDAV filesystem implementation over a [`ResourceTree`].
//!
//! This module implements the `dav_server::fs::DavFileSystem` trait,
//! rendering [`DavResource`] identity and timestamps as WebDAV metadata.
//! Content is not served: `open` reports `NotImplemented`.

use crate::error::Error;
use crate::tree::{normalize_uri, Resource, ResourceTree};
use dav_server::davpath::DavPath;
use dav_server::fs::{
    DavDirEntry, DavFile, DavFileSystem, DavMetaData, FsError, FsFuture, FsStream, OpenOptions,
    ReadDirMeta,
};
use futures::stream;
use log::{debug, trace, warn};
use objdav_log::ScopedLogger;
use objdav_resource::DavResource;
use std::io;
use std::sync::Arc;
use std::time::SystemTime;

/// WebDAV filesystem adapter exposing a [`ResourceTree`].
///
/// Every lookup is recorded on the gateway logger as
/// `<prefix> [<timestamp>] <operation> <uri>`.
#[derive(Clone)]
pub struct ResourceDavFs {
    inner: Arc<ResourceDavFsInner>,
}

struct ResourceDavFsInner {
    tree: ResourceTree,
    logger: ScopedLogger,
}

impl ResourceDavFs {
    /// Create a filesystem over `tree`, logging under `logger`'s `.dav` child.
    pub fn new(tree: ResourceTree, logger: &ScopedLogger) -> Self {
        Self {
            inner: Arc::new(ResourceDavFsInner {
                tree,
                logger: logger.get_logger(".dav"),
            }),
        }
    }

    pub fn tree(&self) -> &ResourceTree {
        &self.inner.tree
    }

    fn uri_of(path: &DavPath) -> String {
        normalize_uri(&path.as_rel_ospath().to_string_lossy())
    }

    fn record(&self, operation: &str, uri: &str) {
        let line = format!("[{}] {} {}", ScopedLogger::timestamp(), operation, uri);
        if let Err(err) = self.inner.logger.log(&line) {
            warn!("gateway log write failed: {}", err);
        }
    }

    fn record_failure(&self, operation: &str, uri: &str, err: &dyn std::error::Error) {
        let line = format!("[{}] {} {} failed", ScopedLogger::timestamp(), operation, uri);
        if let Err(sink_err) = self.inner.logger.log_error(&line, err) {
            warn!("gateway log write failed: {}", sink_err);
        }
    }
}

impl DavFileSystem for ResourceDavFs {
    fn open<'a>(&'a self, path: &'a DavPath, options: OpenOptions) -> FsFuture<'a, Box<dyn DavFile>> {
        trace!("open({:?}, {:?})", path, options);
        Box::pin(async { Err(FsError::NotImplemented) })
    }

    fn read_dir<'a>(
        &'a self,
        path: &'a DavPath,
        meta: ReadDirMeta,
    ) -> FsFuture<'a, FsStream<Box<dyn DavDirEntry>>> {
        trace!("read_dir({:?}, {:?})", path, meta);

        let uri = Self::uri_of(path);
        self.record("LIST", &uri);

        let result = match self.inner.tree.children(&uri) {
            Ok(children) => {
                let entries: Vec<Box<dyn DavDirEntry>> = children
                    .iter()
                    .map(|child| {
                        let meta = ResourceMetaData::snapshot(child.as_ref());
                        if meta.modified.is_none() {
                            debug!("read_dir: {} listed without timestamps", child.uri());
                        }
                        Box::new(ResourceDirEntry::new(child.name(), meta)) as Box<dyn DavDirEntry>
                    })
                    .collect();

                debug!("read_dir: returning {} entries", entries.len());

                let stream = stream::iter(entries.into_iter().map(Ok));
                Ok(Box::pin(stream) as FsStream<Box<dyn DavDirEntry>>)
            }
            Err(err) => {
                self.record_failure("LIST", &uri, &err);
                Err(map_tree_error(err))
            }
        };

        Box::pin(async move { result })
    }

    fn metadata<'a>(&'a self, path: &'a DavPath) -> FsFuture<'a, Box<dyn DavMetaData>> {
        trace!("metadata({:?})", path);

        let uri = Self::uri_of(path);
        self.record("STAT", &uri);

        let result = match self.inner.tree.resolve(&uri) {
            Ok(resource) => Ok(Box::new(self.snapshot_logged(&resource)) as Box<dyn DavMetaData>),
            Err(err) => {
                self.record_failure("STAT", &uri, &err);
                Err(map_tree_error(err))
            }
        };

        Box::pin(async move { result })
    }
}

impl ResourceDavFs {
    fn snapshot_logged(&self, resource: &Resource) -> ResourceMetaData {
        let modified = match resource.last_modified() {
            Ok(time) => Some(SystemTime::from(time)),
            Err(err) => {
                self.record_failure("META", resource.uri(), &err);
                None
            }
        };
        ResourceMetaData::new(resource.as_ref(), modified)
    }
}

/// WebDAV directory entry.
struct ResourceDirEntry {
    name: String,
    meta: ResourceMetaData,
}

impl ResourceDirEntry {
    fn new(name: &str, meta: ResourceMetaData) -> Self {
        Self {
            name: name.to_string(),
            meta,
        }
    }
}

impl DavDirEntry for ResourceDirEntry {
    fn name(&self) -> Vec<u8> {
        self.name.as_bytes().to_vec()
    }

    fn metadata(&self) -> FsFuture<'_, Box<dyn DavMetaData>> {
        let meta = self.meta.clone();
        Box::pin(async move { Ok(Box::new(meta) as Box<dyn DavMetaData>) })
    }
}

/// Point-in-time copy of a resource's metadata.
///
/// Missing timestamps fail only the `modified`/`created` properties, not the
/// whole response.
#[derive(Clone, Debug)]
pub(crate) struct ResourceMetaData {
    is_dir: bool,
    len: u64,
    modified: Option<SystemTime>,
    created: Option<SystemTime>,
}

impl ResourceMetaData {
    pub(crate) fn snapshot(resource: &dyn DavResource) -> Self {
        let modified = resource.last_modified().ok().map(SystemTime::from);
        Self::new(resource, modified)
    }

    /// Creation date is the last-modified time, so one timestamp read covers both.
    fn new(resource: &dyn DavResource, modified: Option<SystemTime>) -> Self {
        let is_dir = resource.is_collection();
        let len = if is_dir {
            0
        } else {
            resource.content_length().unwrap_or(0)
        };
        Self {
            is_dir,
            len,
            modified,
            created: modified,
        }
    }
}

impl DavMetaData for ResourceMetaData {
    fn len(&self) -> u64 {
        self.len
    }

    fn modified(&self) -> Result<SystemTime, FsError> {
        self.modified.ok_or(FsError::GeneralFailure)
    }

    fn is_dir(&self) -> bool {
        self.is_dir
    }

    fn created(&self) -> Result<SystemTime, FsError> {
        self.created.ok_or(FsError::GeneralFailure)
    }
}

fn map_tree_error(err: Error) -> FsError {
    match err {
        Error::NotFound(_) => FsError::NotFound,
        Error::InvalidPath(_) => FsError::Forbidden,
        Error::NotCollection(_) => FsError::Forbidden,
        Error::Io(err) => map_io_error(err),
        Error::Config(_) | Error::ConfigParse(_) => FsError::GeneralFailure,
    }
}

fn map_io_error(err: io::Error) -> FsError {
    match err.kind() {
        io::ErrorKind::NotFound => FsError::NotFound,
        io::ErrorKind::PermissionDenied => FsError::Forbidden,
        _ => FsError::GeneralFailure,
    }
}
