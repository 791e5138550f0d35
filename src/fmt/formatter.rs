//! The record formatter: one configured template per record kind, rendered
//! by sequential first-occurrence substitution, plus the JSON object path
//! for access records.
//!
//! Everything is fixed at build time. Render calls are pure, so a formatter
//! can be shared across threads freely.

use crate::config::AccessTemplate;
use crate::error::Error;
use crate::level::Level;
use crate::record::{AccessData, Payload, Record};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde_json::Value;

use super::template::{
    display, render_tags, replace_first, strip_time, DEFAULT_ACCESS_FORMAT,
    DEFAULT_EXCEPTION_FORMAT, DEFAULT_EXCEPTION_FORMAT_NAMED, DEFAULT_FORMAT,
    DEFAULT_FORMAT_NAMED, DEFAULT_STAT_FORMAT, DEFAULT_STAT_FORMAT_NAMED, DEFAULT_TIMESTAMP,
};
use super::token::{ResolveContext, Token};

/// Immutable after build — formatters can be shared and called concurrently
/// without locks.
#[derive(Debug, Clone)]
pub struct RecordFormatter {
    json: bool,
    timestamp: Option<String>,
    name: String,
    format: String,
    access_format: String,
    /// Compiled key-to-token list for the JSON access path, in declaration
    /// order. Present exactly when `json` is set.
    access_fields: Option<Vec<(String, Token)>>,
    exception_format: String,
    stat_format: String,
}

impl RecordFormatter {
    /// Stepwise configuration; `build` validates the JSON mode invariants.
    #[must_use]
    pub fn builder() -> FormatterBuilder {
        FormatterBuilder::new()
    }

    /// Whether access records render as JSON objects.
    #[must_use]
    pub const fn json_mode(&self) -> bool {
        self.json
    }

    /// The configured fallback module name; may be empty.
    #[must_use]
    pub fn default_name(&self) -> &str {
        &self.name
    }

    /// Renders a generic message record. No trailing newline; the generic
    /// template controls its own line endings.
    #[must_use]
    pub fn generic(
        &self,
        time: DateTime<Utc>,
        level: Level,
        module: &str,
        data: &str,
        tags: &[String],
    ) -> String {
        let mut line = self.line_prelude(&self.format, time, module);
        line = replace_first(&line, ":level", level.as_str());
        line = replace_first(&line, ":data", data);
        line = replace_first(&line, ":tags", &render_tags(tags));
        line
    }

    /// Renders an HTTP access record, with a trailing newline.
    ///
    /// In JSON mode the configured key-to-token mapping is resolved in
    /// declaration order into one JSON object line; otherwise the access
    /// template is substituted token by token in fixed field order.
    #[must_use]
    pub fn access(
        &self,
        time: DateTime<Utc>,
        module: &str,
        data: &AccessData,
        tags: &[String],
    ) -> String {
        let cx = ResolveContext {
            module,
            fallback_name: &self.name,
            time,
            time_format: self.timestamp.as_deref(),
            access: data,
            tags,
        };

        if let Some(fields) = &self.access_fields {
            let mut object: IndexMap<&str, Value> = IndexMap::with_capacity(fields.len());
            for (key, token) in fields {
                object.insert(key.as_str(), token.resolve(&cx));
            }
            // Values are only strings, numbers, and nulls; serialization
            // cannot fail, and rendering must not. Should the impossible
            // happen anyway, emit nothing rather than a bare terminator.
            return serde_json::to_string(&object).map_or_else(
                |_| String::new(),
                |mut line| {
                    line.push('\n');
                    line
                },
            );
        }

        let mut line = self.access_format.clone();
        let name = self.effective_name(module);
        if !name.is_empty() {
            line = replace_first(&line, Token::Name.as_str(), name);
        }
        for token in Token::ACCESS_ORDER {
            line = replace_first(&line, token.as_str(), &display(&token.resolve(&cx)));
        }
        line.push('\n');
        line
    }

    /// Renders an exception record, with a trailing newline. The level text
    /// is fixed to `"exception"`.
    #[must_use]
    pub fn exception(
        &self,
        time: DateTime<Utc>,
        module: &str,
        message: &str,
        stack: &str,
        tags: &[String],
    ) -> String {
        let mut line = self.line_prelude(&self.exception_format, time, module);
        line = replace_first(&line, ":level", "exception");
        line = replace_first(&line, ":message", message);
        line = replace_first(&line, ":stack", stack);
        line = replace_first(&line, ":tags", &render_tags(tags));
        line.push('\n');
        line
    }

    /// Renders a stat record, with a trailing newline. The level text is
    /// fixed to `"stat"`.
    #[must_use]
    pub fn stat(
        &self,
        time: DateTime<Utc>,
        module: &str,
        name: &str,
        kind: &str,
        value: f64,
        tags: &[String],
    ) -> String {
        let mut line = self.line_prelude(&self.stat_format, time, module);
        line = replace_first(&line, ":level", "stat");
        line = replace_first(&line, ":statName", name);
        line = replace_first(&line, ":type", kind);
        line = replace_first(&line, ":value", &value.to_string());
        line = replace_first(&line, ":tags", &render_tags(tags));
        line.push('\n');
        line
    }

    /// Dispatches over the record union to the kind-specific render path.
    #[must_use]
    pub fn render(&self, record: &Record) -> String {
        match &record.payload {
            Payload::Generic { level, data } => {
                self.generic(record.time, *level, &record.module, data, &record.tags)
            }
            Payload::Access(data) => self.access(record.time, &record.module, data, &record.tags),
            Payload::Exception { message, stack } => {
                self.exception(record.time, &record.module, message, stack, &record.tags)
            }
            Payload::Stat { name, kind, value } => {
                self.stat(record.time, &record.module, name, kind, *value, &record.tags)
            }
        }
    }

    /// Name and time handling shared by the generic, exception, and stat
    /// paths: the name token is substituted only when a non-empty name
    /// exists (else left literal), and with no time pattern the time token
    /// plus its trailing space is removed rather than substituted.
    fn line_prelude(&self, template: &str, time: DateTime<Utc>, module: &str) -> String {
        let mut line = template.to_string();
        let name = self.effective_name(module);
        if !name.is_empty() {
            line = replace_first(&line, Token::Name.as_str(), name);
        }
        match &self.timestamp {
            Some(pattern) => replace_first(&line, ":time", &time.format(pattern).to_string()),
            None => strip_time(&line),
        }
    }

    fn effective_name<'a>(&'a self, module: &'a str) -> &'a str {
        if module.is_empty() {
            &self.name
        } else {
            module
        }
    }
}

/// Consuming builder for [`RecordFormatter`]; the only construction path.
#[derive(Debug, Clone)]
pub struct FormatterBuilder {
    json: bool,
    timestamp: Option<String>,
    name: String,
    format: Option<String>,
    access_format: Option<AccessTemplate>,
    exception_format: Option<String>,
    stat_format: Option<String>,
}

impl Default for FormatterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatterBuilder {
    /// Defaults: text mode, ISO-ish timestamps, no module name, built-in
    /// templates for every kind.
    #[must_use]
    pub fn new() -> Self {
        Self {
            json: false,
            timestamp: Some(DEFAULT_TIMESTAMP.to_string()),
            name: String::new(),
            format: None,
            access_format: None,
            exception_format: None,
            stat_format: None,
        }
    }

    /// Selects JSON object rendering for access records. Requires an access
    /// field mapping; `build` rejects the combination without one.
    #[must_use]
    pub const fn json(mut self, enabled: bool) -> Self {
        self.json = enabled;
        self
    }

    /// Sets the strftime pattern for the time token.
    #[must_use]
    pub fn timestamp_format(mut self, pattern: impl Into<String>) -> Self {
        self.timestamp = Some(pattern.into());
        self
    }

    /// Disables timestamp formatting: line templates drop the `":time "`
    /// span entirely, and access fields fall back to the RFC-1123 string.
    #[must_use]
    pub fn no_timestamp(mut self) -> Self {
        self.timestamp = None;
        self
    }

    /// Default module name, used when a record carries none.
    ///
    /// With no name configured and none on the record, the name token is
    /// left as literal text in the output rather than substituted empty.
    /// Configuring a name also switches the built-in default templates to
    /// their `:name`-bearing variants.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Template for generic records.
    #[must_use]
    pub fn format(mut self, template: impl Into<String>) -> Self {
        self.format = Some(template.into());
        self
    }

    /// Text template for access records.
    #[must_use]
    pub fn access_format(mut self, template: impl Into<String>) -> Self {
        self.access_format = Some(AccessTemplate::Line(template.into()));
        self
    }

    /// Key-to-token mapping for JSON access rendering; output keys keep
    /// declaration order.
    #[must_use]
    pub fn access_fields<K, V>(mut self, fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.access_format = Some(AccessTemplate::Fields(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        ));
        self
    }

    /// Template for exception records.
    #[must_use]
    pub fn exception_format(mut self, template: impl Into<String>) -> Self {
        self.exception_format = Some(template.into());
        self
    }

    /// Template for stat records.
    #[must_use]
    pub fn stat_format(mut self, template: impl Into<String>) -> Self {
        self.stat_format = Some(template.into());
        self
    }

    /// Validates and freezes the configuration.
    ///
    /// # Errors
    /// [`Error::MissingAccessFields`] when JSON mode is enabled without a
    /// field mapping; [`Error::UnknownToken`] when a mapping value names no
    /// recognized token; [`Error::Format`] when a mapping is supplied but
    /// JSON mode is off, or when the timestamp pattern is not valid
    /// strftime.
    pub fn build(self) -> Result<RecordFormatter, Error> {
        let named = !self.name.is_empty();

        // Rendering is infallible, so a pattern chrono cannot format must be
        // caught here rather than at the first log call.
        let timestamp = self.timestamp.filter(|p| !p.is_empty());
        if let Some(pattern) = &timestamp {
            if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
                return Err(Error::Format(format!(
                    "invalid timestamp pattern: {pattern}"
                )));
            }
        }

        let (access_format, access_fields) = match (self.json, self.access_format) {
            (true, Some(AccessTemplate::Fields(map))) => {
                let mut fields = Vec::with_capacity(map.len());
                for (key, text) in map {
                    let Some(token) = Token::lookup(&text) else {
                        return Err(Error::UnknownToken { key, token: text });
                    };
                    fields.push((key, token));
                }
                (String::new(), Some(fields))
            }
            (true, _) => return Err(Error::MissingAccessFields),
            (false, Some(AccessTemplate::Fields(_))) => {
                return Err(Error::Format(
                    "access field mapping requires json mode".to_string(),
                ));
            }
            (false, Some(AccessTemplate::Line(line))) => (line, None),
            (false, None) => (DEFAULT_ACCESS_FORMAT.to_string(), None),
        };

        Ok(RecordFormatter {
            json: self.json,
            timestamp,
            format: self.format.unwrap_or_else(|| {
                if named {
                    DEFAULT_FORMAT_NAMED.to_string()
                } else {
                    DEFAULT_FORMAT.to_string()
                }
            }),
            access_format,
            access_fields,
            exception_format: self.exception_format.unwrap_or_else(|| {
                if named {
                    DEFAULT_EXCEPTION_FORMAT_NAMED.to_string()
                } else {
                    DEFAULT_EXCEPTION_FORMAT.to_string()
                }
            }),
            stat_format: self.stat_format.unwrap_or_else(|| {
                if named {
                    DEFAULT_STAT_FORMAT_NAMED.to_string()
                } else {
                    DEFAULT_STAT_FORMAT.to_string()
                }
            }),
            name: self.name,
        })
    }
}
