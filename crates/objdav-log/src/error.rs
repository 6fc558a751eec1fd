use thiserror::Error;

/// The log sink refused a write.
#[derive(Debug, Error)]
pub enum SinkWriteError {
    /// The underlying writer returned an error (closed stream, full disk, ...).
    #[error("log sink write failed: {0}")]
    Io(#[from] std::io::Error),

    /// Another thread panicked while holding the sink.
    #[error("log sink lock poisoned")]
    Poisoned,
}

/// Result type for logger operations.
pub type Result<T> = std::result::Result<T, SinkWriteError>;
