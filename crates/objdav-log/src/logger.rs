use crate::error::Result;
use crate::sink::Sink;
use chrono::{DateTime, Local, TimeZone};
use std::error::Error;
use std::fmt::Display;

/// Common Log Format timestamp, e.g. `10/Oct/2000:13:55:36 -0700`.
pub const ACCESS_LOG_FORMAT: &str = "%d/%b/%Y:%H:%M:%S %z";

/// A logger that prefixes every line with the label of its subsystem.
///
/// Child loggers created with [`ScopedLogger::get_logger`] write to the same
/// [`Sink`] as their parent, so all lines of a process share one total order.
#[derive(Debug, Clone)]
pub struct ScopedLogger {
    sink: Sink,
    prefix: String,
}

impl ScopedLogger {
    /// Create a root logger with an empty prefix.
    pub fn new(sink: Sink) -> Self {
        Self::with_prefix(sink, "")
    }

    /// Create a logger with an explicit prefix.
    pub fn with_prefix(sink: Sink, prefix: impl Into<String>) -> Self {
        Self {
            sink,
            prefix: prefix.into(),
        }
    }

    /// The accumulated prefix of this logger.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The sink this logger writes to.
    pub fn sink(&self) -> &Sink {
        &self.sink
    }

    /// Derive a child logger whose prefix is `self.prefix() + segment`.
    ///
    /// The segment is appended verbatim; callers include their own separator
    /// (`"."`, `"/"`) when they want one.
    pub fn get_logger(&self, segment: &str) -> ScopedLogger {
        let mut prefix = String::with_capacity(self.prefix.len() + segment.len());
        prefix.push_str(&self.prefix);
        prefix.push_str(segment);
        Self::with_prefix(self.sink.clone(), prefix)
    }

    /// Write `prefix message` as one line.
    pub fn log(&self, message: &str) -> Result<()> {
        self.sink.write_entry(&self.line(message))
    }

    /// Write `prefix message` followed by the full cause chain of `error`.
    ///
    /// The line and the trace are written as a single entry.
    pub fn log_error(&self, message: &str, error: &dyn Error) -> Result<()> {
        let mut entry = self.line(message);
        entry.push_str(&render_trace(error));
        self.sink.write_entry(&entry)
    }

    /// Write an empty separator line.
    pub fn eol(&self) -> Result<()> {
        self.sink.write_entry("\n")
    }

    /// Current local time in [`ACCESS_LOG_FORMAT`].
    pub fn timestamp() -> String {
        Self::timestamp_at(&Local::now())
    }

    /// `time` rendered in [`ACCESS_LOG_FORMAT`].
    pub fn timestamp_at<Tz>(time: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        time.format(ACCESS_LOG_FORMAT).to_string()
    }

    fn line(&self, message: &str) -> String {
        format!("{} {}\n", self.prefix, message)
    }
}

/// Render an error and every `source()` below it.
fn render_trace(error: &dyn Error) -> String {
    let mut out = format!("{}\n", error);
    let mut cause = error.source();
    if cause.is_some() {
        out.push_str("Caused by:\n");
    }
    let mut depth = 0;
    while let Some(err) = cause {
        out.push_str(&format!("    {}: {}\n", depth, err));
        depth += 1;
        cause = err.source();
    }
    out
}
