use crate::error::{ResourceError, Result};
use crate::handle::BackingHandle;
use crate::MetadataError;
use chrono::{DateTime, SubsecRound, Utc};
use log::trace;
use std::sync::OnceLock;

/// URI, display name and timestamps of one stored entity.
///
/// The URI is fixed at construction and is the single source of the display
/// name: [`ResourceIdentity::name`] is the last `/`-separated segment of it,
/// derived on first access and cached. Timestamps are read from the backing
/// handle on every call.
#[derive(Debug)]
pub struct ResourceIdentity<H> {
    uri: String,
    name: OnceLock<String>,
    handle: H,
}

impl<H: BackingHandle> ResourceIdentity<H> {
    /// Bind `uri` to `handle`. Performs no I/O.
    pub fn new(handle: H, uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            name: OnceLock::new(),
            handle,
        }
    }

    /// The full path from the WebDAV root, as given at construction.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// The display name: everything after the last `/` of the URI.
    pub fn name(&self) -> &str {
        self.name
            .get_or_init(|| derive_name(&self.uri).to_string())
            .as_str()
    }

    pub fn handle(&self) -> &H {
        &self.handle
    }

    /// Creation time of the resource.
    ///
    /// Storage backends rarely keep a reliable creation time, so this is the
    /// last-modified time of the backing entity.
    pub fn creation_date(&self) -> Result<DateTime<Utc>> {
        self.last_modified()
    }

    /// Last-modified time of the backing entity, at millisecond resolution.
    pub fn last_modified(&self) -> Result<DateTime<Utc>> {
        let modified = self.query(|handle| handle.last_modified())?;
        Ok(DateTime::<Utc>::from(modified).trunc_subsecs(3))
    }

    /// Size of the backing entity in bytes.
    pub fn content_length(&self) -> Result<u64> {
        self.query(|handle| handle.content_length())
    }

    fn query<T>(&self, read: impl FnOnce(&H) -> std::result::Result<T, MetadataError>) -> Result<T> {
        read(&self.handle).map_err(|source| {
            trace!("metadata read failed for {}: {}", self.uri, source);
            ResourceError::MetadataUnavailable {
                uri: self.uri.clone(),
                source,
            }
        })
    }
}

/// The substring of `uri` after its last `/`, or all of `uri` without one.
pub fn derive_name(uri: &str) -> &str {
    match uri.rfind('/') {
        Some(idx) => &uri[idx + 1..],
        None => uri,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};

    struct Fixed(SystemTime);

    impl BackingHandle for Fixed {
        fn last_modified(&self) -> std::result::Result<SystemTime, MetadataError> {
            Ok(self.0)
        }
    }

    #[test]
    fn test_derive_name() {
        assert_eq!(derive_name("/a/b/c.txt"), "c.txt");
        assert_eq!(derive_name("readme"), "readme");
        assert_eq!(derive_name("/top"), "top");
        assert_eq!(derive_name("bucket/key"), "key");
        assert_eq!(derive_name("/a/dir/"), "");
        assert_eq!(derive_name(""), "");
    }

    #[test]
    fn test_name_is_cached() {
        let identity = ResourceIdentity::new(Fixed(SystemTime::UNIX_EPOCH), "/docs/notes.md");
        let first = identity.name();
        let second = identity.name();
        assert_eq!(first, "notes.md");
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn test_last_modified_truncates_to_millis() {
        let time = SystemTime::UNIX_EPOCH + Duration::new(1_700_000_000, 123_456_789);
        let identity = ResourceIdentity::new(Fixed(time), "/x");

        let modified = identity.last_modified().unwrap();
        assert_eq!(modified.timestamp_subsec_nanos(), 123_000_000);
        assert_eq!(modified.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_creation_date_matches_last_modified() {
        let time = SystemTime::UNIX_EPOCH + Duration::from_millis(42_000);
        let identity = ResourceIdentity::new(Fixed(time), "/x");
        assert_eq!(
            identity.creation_date().unwrap(),
            identity.last_modified().unwrap()
        );
    }

    #[test]
    fn test_default_content_length_is_zero() {
        let identity = ResourceIdentity::new(Fixed(SystemTime::UNIX_EPOCH), "/x");
        assert_eq!(identity.content_length().unwrap(), 0);
    }
}
