use chrono::{DateTime, TimeZone, Utc};
use objdav_resource::{
    BackingHandle, CollectionResource, DavResource, FileHandle, FileResource, MetadataError,
    ObjectHandle, ObjectMeta, ObjectStore, ResourceError, ResourceIdentity,
};
use std::collections::HashMap;
use std::fs;
use std::sync::{Arc, Barrier, Mutex};
use std::thread;
use tempfile::TempDir;

#[derive(Default)]
struct MemoryStore {
    objects: Mutex<HashMap<String, ObjectMeta>>,
    offline: Mutex<bool>,
}

impl MemoryStore {
    fn put(&self, key: &str, size: u64, last_modified: Option<DateTime<Utc>>) {
        self.objects.lock().unwrap().insert(
            key.to_string(),
            ObjectMeta {
                key: key.to_string(),
                size,
                last_modified,
                etag: None,
            },
        );
    }

    fn remove(&self, key: &str) {
        self.objects.lock().unwrap().remove(key);
    }

    fn go_offline(&self) {
        *self.offline.lock().unwrap() = true;
    }
}

impl ObjectStore for MemoryStore {
    fn head(&self, key: &str) -> Result<ObjectMeta, MetadataError> {
        if *self.offline.lock().unwrap() {
            return Err(MetadataError::Backend("connection refused".to_string()));
        }
        self.objects
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| MetadataError::Backend(format!("NoSuchKey: {}", key)))
    }
}

#[test]
fn name_is_last_uri_segment() {
    let temp = TempDir::new().unwrap();
    let handle = FileHandle::new(temp.path());

    let nested = ResourceIdentity::new(&handle, "/a/b/c.txt");
    assert_eq!(nested.name(), "c.txt");
    assert_eq!(nested.uri(), "/a/b/c.txt");

    let flat = ResourceIdentity::new(&handle, "readme");
    assert_eq!(flat.name(), "readme");
    assert_eq!(flat.uri(), "readme");
}

#[test]
fn vanished_file_fails_timestamps_but_keeps_identity() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("c.txt");
    fs::write(&path, b"payload").unwrap();

    let file = FileResource::new(FileHandle::new(&path), "/a/b/c.txt");
    assert!(file.last_modified().is_ok());
    assert_eq!(file.content_length().unwrap(), 7);

    fs::remove_file(&path).unwrap();

    match file.creation_date() {
        Err(ResourceError::MetadataUnavailable { uri, source }) => {
            assert_eq!(uri, "/a/b/c.txt");
            assert!(matches!(source, MetadataError::Io(_)));
        }
        other => panic!("expected MetadataUnavailable, got {:?}", other),
    }
    assert!(matches!(
        file.last_modified(),
        Err(ResourceError::MetadataUnavailable { .. })
    ));
    assert_eq!(file.name(), "c.txt");
    assert_eq!(file.uri(), "/a/b/c.txt");
}

#[test]
fn file_timestamps_follow_filesystem_mtime() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("report.csv");
    fs::write(&path, b"a,b").unwrap();

    let file = FileResource::new(FileHandle::new(&path), "/report.csv");
    let expected: DateTime<Utc> = fs::metadata(&path).unwrap().modified().unwrap().into();

    let modified = file.last_modified().unwrap();
    assert_eq!(modified.timestamp_millis(), expected.timestamp_millis());
    assert_eq!(file.creation_date().unwrap(), modified);
}

#[test]
fn object_resource_reads_store_metadata() {
    let store = Arc::new(MemoryStore::default());
    let stamp = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    store.put("photos/2024/cat.jpg", 2048, Some(stamp));

    let handle = ObjectHandle::new(store.clone(), "photos/2024/cat.jpg");
    let file = FileResource::new(handle, "/photos/2024/cat.jpg");

    assert_eq!(file.name(), "cat.jpg");
    assert_eq!(file.last_modified().unwrap(), stamp);
    assert_eq!(file.creation_date().unwrap(), stamp);
    assert_eq!(file.content_length().unwrap(), 2048);
}

#[test]
fn object_without_timestamp_is_metadata_unavailable() {
    let store = Arc::new(MemoryStore::default());
    store.put("blob", 1, None);

    let file = FileResource::new(ObjectHandle::new(store, "blob"), "/blob");
    match file.last_modified() {
        Err(ResourceError::MetadataUnavailable { source, .. }) => {
            assert!(matches!(source, MetadataError::Missing(ref key) if key == "blob"));
        }
        other => panic!("expected MetadataUnavailable, got {:?}", other),
    }
}

#[test]
fn deleted_or_unreachable_object_is_metadata_unavailable() {
    let store = Arc::new(MemoryStore::default());
    let stamp = Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap();
    store.put("a/b", 10, Some(stamp));
    store.put("a/c", 10, Some(stamp));

    let removed = FileResource::new(ObjectHandle::new(store.clone(), "a/b"), "/a/b");
    let other = FileResource::new(ObjectHandle::new(store.clone(), "a/c"), "/a/c");

    store.remove("a/b");
    assert!(removed.last_modified().is_err());
    assert!(removed.creation_date().is_err());
    assert_eq!(other.last_modified().unwrap(), stamp);

    store.go_offline();
    assert!(matches!(
        other.last_modified(),
        Err(ResourceError::MetadataUnavailable { .. })
    ));
    assert_eq!(other.name(), "c");
}

#[test]
fn concurrent_first_name_access_converges() {
    let temp = TempDir::new().unwrap();
    let handle: Arc<dyn BackingHandle> = Arc::new(FileHandle::new(temp.path()));
    let identity = Arc::new(ResourceIdentity::new(handle, "/shared/deep/path/target.bin"));
    let barrier = Arc::new(Barrier::new(16));

    let workers: Vec<_> = (0..16)
        .map(|_| {
            let identity = identity.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                identity.name().to_string()
            })
        })
        .collect();

    for worker in workers {
        assert_eq!(worker.join().unwrap(), "target.bin");
    }
    assert_eq!(identity.name(), "target.bin");
}

#[test]
fn collection_children_compose_uris() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("docs")).unwrap();

    let docs = CollectionResource::new(FileHandle::new(temp.path().join("docs")), "/docs");
    assert!(docs.is_collection());
    assert_eq!(docs.name(), "docs");
    assert!(docs.last_modified().is_ok());

    let child_uri = docs.child_uri("guide.md");
    let child = FileResource::new(FileHandle::new(temp.path().join("docs/guide.md")), child_uri);
    assert_eq!(child.uri(), "/docs/guide.md");
    assert_eq!(child.name(), "guide.md");
}
