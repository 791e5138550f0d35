//! The field resolver registry: a closed set of placeholder tokens, each
//! bound to a pure extraction of one rendered value from a record plus its
//! context. Unknown token text is never an error; it stays literal in the
//! template (`lookup` returning `None` is the caller's signal).

use crate::record::AccessData;
use chrono::{DateTime, Utc};
use serde_json::Value;

use super::template::render_tags;

/// Closed set of recognized placeholder tokens on the access path.
///
/// Kind-specific tokens (level, data, message, stack, stat fields) are
/// substituted directly by the per-kind render paths and are deliberately
/// not part of the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Name,
    Remote,
    Time,
    Method,
    Url,
    HttpVersion,
    Status,
    ResponseTime,
    Length,
    Referer,
    Agent,
    Tags,
}

/// Everything a resolver may draw on besides the token identity itself.
///
/// Borrowed throughout, so building one per render call is free.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    /// Raw module name from the record; may be empty.
    pub module: &'a str,
    /// Formatter-level default name; may also be empty.
    pub fallback_name: &'a str,
    /// The record's time value.
    pub time: DateTime<Utc>,
    /// Configured strftime pattern, or `None` for the RFC-1123 fallback.
    pub time_format: Option<&'a str>,
    /// Access payload fields.
    pub access: &'a AccessData,
    /// The record's tag list.
    pub tags: &'a [String],
}

impl Token {
    /// The literal template text each token matches.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => ":name",
            Self::Remote => ":remote",
            Self::Time => ":time",
            Self::Method => ":method",
            Self::Url => ":url",
            Self::HttpVersion => ":http_ver",
            Self::Status => ":status",
            Self::ResponseTime => ":res_time",
            Self::Length => ":length",
            Self::Referer => ":referer",
            Self::Agent => ":agent",
            Self::Tags => ":tags",
        }
    }

    /// Substitution order for access templates. Fixed; callers iterate this
    /// rather than re-deriving the order.
    pub const ACCESS_ORDER: &'static [Self] = &[
        Self::Remote,
        Self::Time,
        Self::Method,
        Self::Url,
        Self::HttpVersion,
        Self::Status,
        Self::ResponseTime,
        Self::Length,
        Self::Referer,
        Self::Agent,
        Self::Tags,
    ];

    /// All registry tokens, for mapping validation.
    pub const ALL: &'static [Self] = &[
        Self::Name,
        Self::Remote,
        Self::Time,
        Self::Method,
        Self::Url,
        Self::HttpVersion,
        Self::Status,
        Self::ResponseTime,
        Self::Length,
        Self::Referer,
        Self::Agent,
        Self::Tags,
    ];

    /// Resolves token text (e.g. `":status"`) to its registry entry.
    #[must_use]
    pub fn lookup(text: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_str() == text)
    }

    /// Extracts and renders this token's field.
    ///
    /// Never fails: absent fields resolve to `Null` (empty text, JSON null).
    /// Numeric fields stay numbers so JSON mode preserves their type.
    #[must_use]
    pub fn resolve(self, cx: &ResolveContext<'_>) -> Value {
        match self {
            Self::Name => {
                if cx.module.is_empty() {
                    Value::from(cx.fallback_name)
                } else {
                    Value::from(cx.module)
                }
            }
            Self::Remote => Value::from(cx.access.remote_ip.as_str()),
            Self::Time => Value::from(cx.time_format.map_or_else(
                || rfc1123(cx.time),
                |pattern| cx.time.format(pattern).to_string(),
            )),
            Self::Method => Value::from(cx.access.method.as_str()),
            Self::Url => Value::from(cx.access.url.as_str()),
            Self::HttpVersion => Value::from(cx.access.http_version.as_str()),
            Self::Status => Value::from(cx.access.status),
            Self::ResponseTime => Value::from(cx.access.response_time),
            Self::Length => Value::from(cx.access.length),
            Self::Referer => cx
                .access
                .referer
                .as_deref()
                .map_or(Value::Null, Value::from),
            Self::Agent => cx.access.agent.as_deref().map_or(Value::Null, Value::from),
            Self::Tags => Value::from(render_tags(cx.tags)),
        }
    }
}

/// RFC-1123 UTC rendering, the fallback when no time pattern is configured.
fn rfc1123(time: DateTime<Utc>) -> String {
    time.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}
