#![forbid(unsafe_code)]

//! `logline` - template-driven formatting and emission for structured log records.
//!
//! Four record kinds (generic message, HTTP access, exception, stat), each
//! rendered through a declarative template of `:token` placeholders and
//! handed to a pluggable sink:
//! - Sequential, first-occurrence-only token substitution
//! - JSON object rendering for access records via a key-to-token mapping
//! - Append-only file sink and a remote transport boundary
//! - Builder pattern and TOML configuration
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use logline::{FormatterBuilder, Level};
//!
//! let formatter = FormatterBuilder::new().name("app").build().unwrap();
//! let time = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
//! let line = formatter.generic(time, Level::Info, "", "started", &[]);
//!
//! assert_eq!(line, "2024-01-01T12:00:00 app.info: started");
//! ```
//!
//! Unrecognized tokens pass through as literal text, sparse records degrade
//! to empty fields, and rendering never fails; the only fallible step is
//! construction (JSON mode without an access field mapping is rejected at
//! build time).

pub mod config;
pub mod error;
pub mod fmt;
pub mod level;
pub mod logger;
pub mod output;
pub mod record;
pub mod transport;

// Re-exports for convenience
pub use config::{AccessTemplate, Config};
pub use error::Error;
pub use fmt::{FormatterBuilder, RecordFormatter, Token};
pub use level::Level;
pub use logger::{Logger, LoggerBuilder};
pub use output::{FileSink, Sink};
pub use record::{AccessData, Payload, Record};
pub use transport::{RemoteSink, Transport};
