//! Remote emission boundary.
//!
//! The wire client is an external collaborator; this module only defines the
//! `send` boundary and builds the structured payload. Delivery is
//! fire-and-forget: no acknowledgement is surfaced and nothing is retried,
//! queued, or buffered here.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde_json::Value;

/// A remote log-shipping client, e.g. an HTTP ingestion endpoint.
pub trait Transport: Send + Sync {
    /// Ships one serialized payload. Fire-and-forget.
    fn send(&self, payload: &str);
}

/// Builds structured remote payloads and hands them to a [`Transport`].
///
/// Payload shape: `@timestamp` (RFC 3339), `@level`, `@name`, `@tags`, then
/// either the flattened keys of an object payload or a `message` key for
/// plain text.
pub struct RemoteSink<T: Transport> {
    transport: T,
    name: String,
}

impl<T: Transport> RemoteSink<T> {
    /// Wraps a transport with a default source name for the `@name` field.
    pub fn new(transport: T, name: impl Into<String>) -> Self {
        Self {
            transport,
            name: name.into(),
        }
    }

    /// Ships one event with an explicit level string.
    pub fn emit(&self, level: &str, module: &str, time: DateTime<Utc>, tags: &[String], data: &Value) {
        let name = if module.is_empty() {
            self.name.as_str()
        } else {
            module
        };

        let mut payload: IndexMap<String, Value> = IndexMap::new();
        payload.insert("@timestamp".to_string(), Value::from(time.to_rfc3339()));
        payload.insert("@level".to_string(), Value::from(level));
        payload.insert("@name".to_string(), Value::from(name));
        payload.insert("@tags".to_string(), Value::from(tags.to_vec()));

        match data {
            Value::Object(fields) => {
                for (key, value) in fields {
                    payload.insert(key.clone(), value.clone());
                }
            }
            other => {
                payload.insert("message".to_string(), other.clone());
            }
        }

        // Keys and values are plain JSON; serialization cannot fail.
        if let Ok(serialized) = serde_json::to_string(&payload) {
            self.transport.send(&serialized);
        }
    }

    /// Debug-level event.
    pub fn debug(&self, module: &str, time: DateTime<Utc>, tags: &[String], data: &Value) {
        self.emit("debug", module, time, tags, data);
    }

    /// Info-level event.
    pub fn info(&self, module: &str, time: DateTime<Utc>, tags: &[String], data: &Value) {
        self.emit("info", module, time, tags, data);
    }

    /// Warn-level event.
    pub fn warn(&self, module: &str, time: DateTime<Utc>, tags: &[String], data: &Value) {
        self.emit("warn", module, time, tags, data);
    }

    /// Error-level event.
    pub fn error(&self, module: &str, time: DateTime<Utc>, tags: &[String], data: &Value) {
        self.emit("error", module, time, tags, data);
    }

    /// Exception event.
    pub fn exception(&self, module: &str, time: DateTime<Utc>, tags: &[String], data: &Value) {
        self.emit("exception", module, time, tags, data);
    }

    /// Stat event.
    pub fn stat(&self, module: &str, time: DateTime<Utc>, tags: &[String], data: &Value) {
        self.emit("stat", module, time, tags, data);
    }

    /// Access event.
    pub fn access(&self, module: &str, time: DateTime<Utc>, tags: &[String], data: &Value) {
        self.emit("access", module, time, tags, data);
    }
}
