//! Shared output destinations for [`ScopedLogger`](crate::ScopedLogger).

use crate::error::{Result, SinkWriteError};
use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// A cloneable handle to one line-oriented output destination.
///
/// Every clone refers to the same writer. Each [`Sink::write_entry`] call holds
/// the lock for the complete entry, so the text of one call is never
/// interleaved with the text of another.
#[derive(Clone)]
pub struct Sink {
    inner: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Sink {
    /// Wrap an arbitrary writer.
    pub fn from_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// Process standard output.
    pub fn stdout() -> Self {
        Self::from_writer(io::stdout())
    }

    /// Process standard error.
    pub fn stderr() -> Self {
        Self::from_writer(io::stderr())
    }

    /// Open `path` for appending, creating it if needed.
    pub fn append_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())?;
        Ok(Self::from_writer(file))
    }

    /// An in-memory sink together with a reader for its contents.
    pub fn memory() -> (Self, MemorySink) {
        let memory = MemorySink::default();
        (Self::from_writer(memory.clone()), memory)
    }

    /// Write one complete entry and flush it.
    pub fn write_entry(&self, entry: &str) -> Result<()> {
        let mut out = self.inner.lock().map_err(|_| SinkWriteError::Poisoned)?;
        out.write_all(entry.as_bytes())?;
        out.flush()?;
        Ok(())
    }

    /// Whether two handles write to the same destination.
    pub fn same_as(&self, other: &Sink) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink")
            .field("handles", &Arc::strong_count(&self.inner))
            .finish()
    }
}

/// Growable in-memory buffer usable as a sink target.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl MemorySink {
    /// Everything written so far, decoded lossily as UTF-8.
    pub fn contents(&self) -> String {
        let buf = self.buf.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Written text split into lines, without terminators.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for MemorySink {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut buf = self
            .buf
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "memory sink poisoned"))?;
        buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
