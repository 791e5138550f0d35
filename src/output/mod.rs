//! Sinks receive finished lines; the formatter neither interprets, retries,
//! nor suppresses their failures. The `Sink` trait lets callers plug in
//! destinations beyond the built-in file sink.

mod file;

pub use file::FileSink;

use crate::error::Error;

/// Append-only destination for rendered lines.
///
/// `Send + Sync` so one sink can serve concurrent render calls. Ordering
/// across concurrent writers is the sink's concern, not the formatter's.
pub trait Sink: Send + Sync {
    /// Appends one rendered line (terminator included where the record kind
    /// calls for one).
    ///
    /// # Errors
    /// Whatever the underlying destination reports, passed through uninterpreted.
    fn write(&self, line: &str) -> Result<(), Error>;

    /// Flushes any buffered output.
    ///
    /// # Errors
    /// I/O errors from the underlying destination.
    fn flush(&self) -> Result<(), Error>;
}
