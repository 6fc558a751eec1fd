use thiserror::Error;

/// Errors raised while configuring or walking a resource tree.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration value.
    #[error("configuration error: {0}")]
    Config(String),

    /// The configuration file is not valid TOML for [`BridgeConfig`](crate::BridgeConfig).
    #[error("invalid configuration file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The URI escapes the tree root or is otherwise unusable.
    #[error("invalid resource path: {0}")]
    InvalidPath(String),

    /// No entity exists at the URI.
    #[error("resource not found: {0}")]
    NotFound(String),

    /// The URI names a leaf where a collection was required.
    #[error("not a collection: {0}")]
    NotCollection(String),

    /// I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for objdav-fs operations.
pub type Result<T> = std::result::Result<T, Error>;
