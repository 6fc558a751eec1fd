//! # objdav-log
//!
//! Hierarchical, prefix-scoped logging for the objdav gateway.
//!
//! A root [`ScopedLogger`] is bound to one [`Sink`] at process start. Each
//! subsystem derives its own child with [`ScopedLogger::get_logger`], which
//! extends the prefix without re-specifying the output:
//!
//! ```ignore
//! use objdav_log::{ScopedLogger, Sink};
//!
//! let root = ScopedLogger::with_prefix(Sink::stderr(), "gateway");
//! let auth = root.get_logger(".auth");
//! auth.log("denied")?; // "gateway.auth denied"
//! ```
//!
//! Sink failures are returned to the caller as [`SinkWriteError`]; nothing is
//! retried or swallowed.

mod error;
mod logger;
mod sink;

pub use error::{Result, SinkWriteError};
pub use logger::{ScopedLogger, ACCESS_LOG_FORMAT};
pub use sink::{MemorySink, Sink};
