use thiserror::Error;

/// Failure reported by a backing handle when asked for metadata.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// Local I/O failed (entity removed, permission denied, ...).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend answered but did not report the requested value.
    #[error("timestamp not reported for {0}")]
    Missing(String),

    /// The object-store client failed to reach or query the backend.
    #[error("object store error: {0}")]
    Backend(String),
}

/// Errors surfaced by resource accessors.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The backing handle could not supply metadata for this resource.
    #[error("metadata unavailable for {uri}")]
    MetadataUnavailable {
        uri: String,
        #[source]
        source: MetadataError,
    },
}

/// Result type for resource operations.
pub type Result<T> = std::result::Result<T, ResourceError>;
