use crate::config::BridgeConfig;
use crate::error::{Error, Result};
use log::{debug, warn};
use objdav_resource::{CollectionResource, DavResource, FileHandle, FileResource};
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// A resource discovered under the tree root.
pub type Resource = Arc<dyn DavResource>;

/// Maps WebDAV URIs onto files and directories below a local root.
///
/// Resources are created on each lookup; their timestamps are read from the
/// filesystem when asked for.
#[derive(Debug, Clone)]
pub struct ResourceTree {
    root: PathBuf,
    hide_dotfiles: bool,
}

impl ResourceTree {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            hide_dotfiles: true,
        }
    }

    pub fn from_config(config: &BridgeConfig) -> Self {
        Self::new(config.root.clone()).with_hidden_dotfiles(config.hide_dotfiles)
    }

    pub fn with_hidden_dotfiles(mut self, hide: bool) -> Self {
        self.hide_dotfiles = hide;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Look up the resource at `uri`.
    pub fn resolve(&self, uri: &str) -> Result<Resource> {
        let uri = normalize_uri(uri);
        let path = self.local_path(&uri)?;
        let metadata = fs::metadata(&path).map_err(|err| not_found_or_io(err, &uri))?;

        let handle = FileHandle::new(path);
        let resource: Resource = if metadata.is_dir() {
            Arc::new(CollectionResource::new(handle, uri))
        } else {
            Arc::new(FileResource::new(handle, uri))
        };
        Ok(resource)
    }

    /// List the members of the collection at `uri`, sorted by name.
    pub fn children(&self, uri: &str) -> Result<Vec<Resource>> {
        let uri = normalize_uri(uri);
        let dir_path = self.local_path(&uri)?;
        let metadata = fs::metadata(&dir_path).map_err(|err| not_found_or_io(err, &uri))?;
        if !metadata.is_dir() {
            return Err(Error::NotCollection(uri));
        }
        let parent = CollectionResource::new(FileHandle::new(&dir_path), uri);

        let mut children: Vec<Resource> = Vec::new();
        for entry in fs::read_dir(&dir_path)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                warn!("Skipping non UTF-8 entry {:?}", entry.path());
                continue;
            };
            if self.is_hidden(name) {
                continue;
            }
            // Follows symlinks, like `resolve`; dangling links are skipped.
            let metadata = match fs::metadata(entry.path()) {
                Ok(metadata) => metadata,
                Err(err) => {
                    warn!("Skipping unreadable entry {:?}: {}", entry.path(), err);
                    continue;
                }
            };

            let handle = FileHandle::new(entry.path());
            let child_uri = parent.child_uri(name);
            let child: Resource = if metadata.is_dir() {
                Arc::new(CollectionResource::new(handle, child_uri))
            } else {
                Arc::new(FileResource::new(handle, child_uri))
            };
            children.push(child);
        }
        children.sort_by(|a, b| a.name().cmp(b.name()));

        debug!("children({}): {} entries", parent.uri(), children.len());
        Ok(children)
    }

    fn is_hidden(&self, name: &str) -> bool {
        self.hide_dotfiles && name.starts_with('.')
    }

    fn local_path(&self, uri: &str) -> Result<PathBuf> {
        let rel = Path::new(uri.trim_start_matches('/'));
        for component in rel.components() {
            match component {
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(Error::InvalidPath(uri.to_string()));
                }
                _ => {}
            }
        }
        if rel.components().any(|c| self.is_hidden(&c.as_os_str().to_string_lossy())) {
            return Err(Error::NotFound(uri.to_string()));
        }
        Ok(self.root.join(rel))
    }
}

/// Canonical URI form: leading `/`, no trailing `/` except for the root.
pub fn normalize_uri(uri: &str) -> String {
    let trimmed = uri.trim_matches('/');
    format!("/{}", trimmed)
}

fn not_found_or_io(err: io::Error, uri: &str) -> Error {
    if err.kind() == io::ErrorKind::NotFound {
        Error::NotFound(uri.to_string())
    } else {
        Error::Io(err)
    }
}
