//! The four record shapes share time, module, and tags but carry different
//! payloads — a tagged union keeps field presence explicit instead of
//! implicit in some loosely typed bag.

use crate::level::Level;
use chrono::{DateTime, Utc};

/// One structured log event, ready for rendering.
#[derive(Debug, Clone)]
pub struct Record {
    /// Event time; every record has one.
    pub time: DateTime<Utc>,
    /// Originating module; empty means "use the formatter's default name".
    pub module: String,
    /// Ordered tag list, possibly empty.
    pub tags: Vec<String>,
    /// Kind-specific fields.
    pub payload: Payload,
}

/// Kind-specific payload, one variant per record kind.
#[derive(Debug, Clone)]
pub enum Payload {
    /// Free-form message with a severity.
    Generic {
        /// Severity substituted for the level token.
        level: Level,
        /// The message text.
        data: String,
    },
    /// One HTTP request/response pair.
    Access(AccessData),
    /// An error with its stack rendering.
    Exception {
        /// The error message.
        message: String,
        /// Stack text, usually multi-line.
        stack: String,
    },
    /// A named measurement.
    Stat {
        /// Stat name.
        name: String,
        /// Stat type label (counter, gauge, ...). Free-form.
        kind: String,
        /// Measured value.
        value: f64,
    },
}

/// Fields of one HTTP access event.
///
/// `referer` and `agent` are the only fields a request may legitimately lack;
/// absent values render as the empty string in text mode and as `null` in
/// JSON mode.
#[derive(Debug, Clone, Default)]
pub struct AccessData {
    /// Remote peer address.
    pub remote_ip: String,
    /// HTTP method.
    pub method: String,
    /// Request URL.
    pub url: String,
    /// HTTP version string, e.g. `1.1`.
    pub http_version: String,
    /// Response status code.
    pub status: u16,
    /// Response body length in bytes.
    pub length: u64,
    /// Response time in milliseconds.
    pub response_time: u64,
    /// Referer header, if sent.
    pub referer: Option<String>,
    /// User-agent header, if sent.
    pub agent: Option<String>,
}

impl Record {
    /// Generic message record.
    #[must_use]
    pub fn generic(
        time: DateTime<Utc>,
        level: Level,
        module: impl Into<String>,
        data: impl Into<String>,
        tags: Vec<String>,
    ) -> Self {
        Self {
            time,
            module: module.into(),
            tags,
            payload: Payload::Generic {
                level,
                data: data.into(),
            },
        }
    }

    /// HTTP access record.
    #[must_use]
    pub fn access(
        time: DateTime<Utc>,
        module: impl Into<String>,
        data: AccessData,
        tags: Vec<String>,
    ) -> Self {
        Self {
            time,
            module: module.into(),
            tags,
            payload: Payload::Access(data),
        }
    }

    /// Exception record.
    #[must_use]
    pub fn exception(
        time: DateTime<Utc>,
        module: impl Into<String>,
        message: impl Into<String>,
        stack: impl Into<String>,
        tags: Vec<String>,
    ) -> Self {
        Self {
            time,
            module: module.into(),
            tags,
            payload: Payload::Exception {
                message: message.into(),
                stack: stack.into(),
            },
        }
    }

    /// Stat record.
    #[must_use]
    pub fn stat(
        time: DateTime<Utc>,
        module: impl Into<String>,
        name: impl Into<String>,
        kind: impl Into<String>,
        value: f64,
        tags: Vec<String>,
    ) -> Self {
        Self {
            time,
            module: module.into(),
            tags,
            payload: Payload::Stat {
                name: name.into(),
                kind: kind.into(),
                value,
            },
        }
    }
}
