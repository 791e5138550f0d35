//! One formatter plus one sink, wired by a builder. Immutable after build,
//! so a `Logger` can be shared across threads.
//!
//! Sink failures pass through to the caller untouched; rendering itself
//! never fails.

use crate::config::{AccessTemplate, Config};
use crate::error::Error;
use crate::fmt::{FormatterBuilder, RecordFormatter};
use crate::level::Level;
use crate::output::{FileSink, Sink};
use crate::record::{AccessData, Record};
use chrono::{DateTime, Utc};

/// Renders records and hands the finished lines to its sink.
pub struct Logger {
    formatter: RecordFormatter,
    sink: Box<dyn Sink>,
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("formatter", &self.formatter)
            .finish_non_exhaustive()
    }
}

impl Logger {
    /// Stepwise construction; the default sink is a file at `logline.log`.
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Builds a logger from parsed TOML configuration.
    ///
    /// # Errors
    /// Formatter validation errors (JSON mode without a field mapping,
    /// unknown mapping token) or I/O errors opening the file sink.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let mut builder = Self::builder().json(config.json).name(&config.name);

        builder = if config.timestamp.is_empty() {
            builder.no_timestamp()
        } else {
            builder.timestamp_format(&config.timestamp)
        };

        if let Some(format) = &config.format {
            builder = builder.format(format);
        }
        match &config.access_format {
            Some(AccessTemplate::Line(line)) => builder = builder.access_format(line),
            Some(AccessTemplate::Fields(fields)) => {
                builder = builder.access_fields(
                    fields.iter().map(|(k, v)| (k.clone(), v.clone())),
                );
            }
            None => {}
        }
        if let Some(format) = &config.exception_format {
            builder = builder.exception_format(format);
        }
        if let Some(format) = &config.stat_format {
            builder = builder.stat_format(format);
        }

        builder.file(&config.file.path).build()
    }

    /// Renders and writes a generic record.
    ///
    /// # Errors
    /// Sink failures, propagated uninterpreted.
    pub fn log(
        &self,
        time: DateTime<Utc>,
        level: Level,
        module: &str,
        data: &str,
        tags: &[String],
    ) -> Result<(), Error> {
        self.sink
            .write(&self.formatter.generic(time, level, module, data, tags))
    }

    /// Renders and writes an access record.
    ///
    /// # Errors
    /// Sink failures, propagated uninterpreted.
    pub fn access(
        &self,
        time: DateTime<Utc>,
        module: &str,
        data: &AccessData,
        tags: &[String],
    ) -> Result<(), Error> {
        self.sink
            .write(&self.formatter.access(time, module, data, tags))
    }

    /// Renders and writes an exception record.
    ///
    /// # Errors
    /// Sink failures, propagated uninterpreted.
    pub fn exception(
        &self,
        time: DateTime<Utc>,
        module: &str,
        message: &str,
        stack: &str,
        tags: &[String],
    ) -> Result<(), Error> {
        self.sink
            .write(&self.formatter.exception(time, module, message, stack, tags))
    }

    /// Renders and writes a stat record.
    ///
    /// # Errors
    /// Sink failures, propagated uninterpreted.
    pub fn stat(
        &self,
        time: DateTime<Utc>,
        module: &str,
        name: &str,
        kind: &str,
        value: f64,
        tags: &[String],
    ) -> Result<(), Error> {
        self.sink
            .write(&self.formatter.stat(time, module, name, kind, value, tags))
    }

    /// Renders and writes any record through the union dispatch.
    ///
    /// # Errors
    /// Sink failures, propagated uninterpreted.
    pub fn write(&self, record: &Record) -> Result<(), Error> {
        self.sink.write(&self.formatter.render(record))
    }

    /// Generic record at debug level, stamped now, no tags.
    ///
    /// # Errors
    /// Sink failures, propagated uninterpreted.
    pub fn debug(&self, module: &str, data: &str) -> Result<(), Error> {
        self.log(Utc::now(), Level::Debug, module, data, &[])
    }

    /// Generic record at info level, stamped now, no tags.
    ///
    /// # Errors
    /// Sink failures, propagated uninterpreted.
    pub fn info(&self, module: &str, data: &str) -> Result<(), Error> {
        self.log(Utc::now(), Level::Info, module, data, &[])
    }

    /// Generic record at warn level, stamped now, no tags.
    ///
    /// # Errors
    /// Sink failures, propagated uninterpreted.
    pub fn warn(&self, module: &str, data: &str) -> Result<(), Error> {
        self.log(Utc::now(), Level::Warn, module, data, &[])
    }

    /// Generic record at error level, stamped now, no tags.
    ///
    /// # Errors
    /// Sink failures, propagated uninterpreted.
    pub fn error(&self, module: &str, data: &str) -> Result<(), Error> {
        self.log(Utc::now(), Level::Error, module, data, &[])
    }

    /// Flushes the sink.
    ///
    /// # Errors
    /// I/O errors from the sink.
    pub fn flush(&self) -> Result<(), Error> {
        self.sink.flush()
    }

    /// The formatter, for callers that render without writing.
    #[must_use]
    pub const fn formatter(&self) -> &RecordFormatter {
        &self.formatter
    }
}

/// Consuming builder for [`Logger`]; formatter options delegate to
/// [`FormatterBuilder`].
pub struct LoggerBuilder {
    formatter: FormatterBuilder,
    file_path: Option<String>,
    sink: Option<Box<dyn Sink>>,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerBuilder {
    /// Formatter defaults, file sink at `logline.log`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            formatter: FormatterBuilder::new(),
            file_path: None,
            sink: None,
        }
    }

    /// See [`FormatterBuilder::json`].
    #[must_use]
    pub fn json(mut self, enabled: bool) -> Self {
        self.formatter = self.formatter.json(enabled);
        self
    }

    /// See [`FormatterBuilder::timestamp_format`].
    #[must_use]
    pub fn timestamp_format(mut self, pattern: impl Into<String>) -> Self {
        self.formatter = self.formatter.timestamp_format(pattern);
        self
    }

    /// See [`FormatterBuilder::no_timestamp`].
    #[must_use]
    pub fn no_timestamp(mut self) -> Self {
        self.formatter = self.formatter.no_timestamp();
        self
    }

    /// See [`FormatterBuilder::name`].
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.formatter = self.formatter.name(name);
        self
    }

    /// See [`FormatterBuilder::format`].
    #[must_use]
    pub fn format(mut self, template: impl Into<String>) -> Self {
        self.formatter = self.formatter.format(template);
        self
    }

    /// See [`FormatterBuilder::access_format`].
    #[must_use]
    pub fn access_format(mut self, template: impl Into<String>) -> Self {
        self.formatter = self.formatter.access_format(template);
        self
    }

    /// See [`FormatterBuilder::access_fields`].
    #[must_use]
    pub fn access_fields<K, V>(mut self, fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.formatter = self.formatter.access_fields(fields);
        self
    }

    /// See [`FormatterBuilder::exception_format`].
    #[must_use]
    pub fn exception_format(mut self, template: impl Into<String>) -> Self {
        self.formatter = self.formatter.exception_format(template);
        self
    }

    /// See [`FormatterBuilder::stat_format`].
    #[must_use]
    pub fn stat_format(mut self, template: impl Into<String>) -> Self {
        self.formatter = self.formatter.stat_format(template);
        self
    }

    /// Writes to a file sink at `path` (created lazily at `build`).
    #[must_use]
    pub fn file(mut self, path: impl Into<String>) -> Self {
        self.file_path = Some(path.into());
        self.sink = None;
        self
    }

    /// Writes to a custom sink instead of a file.
    #[must_use]
    pub fn sink(mut self, sink: impl Sink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self.file_path = None;
        self
    }

    /// Validates the formatter configuration and opens the sink.
    ///
    /// # Errors
    /// Formatter validation errors, or I/O errors creating the file sink's
    /// parent directories.
    pub fn build(self) -> Result<Logger, Error> {
        let formatter = self.formatter.build()?;
        let sink: Box<dyn Sink> = match self.sink {
            Some(sink) => sink,
            None => Box::new(FileSink::new(
                self.file_path.as_deref().unwrap_or("logline.log"),
            )?),
        };
        Ok(Logger { formatter, sink })
    }
}
