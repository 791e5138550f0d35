//! Substitution primitives shared by every render path.
//!
//! Substitution is sequential literal replacement, first occurrence only.
//! A token appearing twice in a template is replaced once; the second
//! occurrence stays literal text. Callers relying on repeated tokens exist,
//! so this stays byte-compatible rather than becoming global expansion.

use serde_json::Value;

/// Default generic template when a default module name is configured.
pub const DEFAULT_FORMAT_NAMED: &str = ":time :name.:level:tags: :data";
/// Default generic template without a module name.
pub const DEFAULT_FORMAT: &str = ":time :level: :data";
/// Default access template (common log format flavored).
pub const DEFAULT_ACCESS_FORMAT: &str =
    ":remote - - [:time] \":method :url HTTP/:http_ver\" :status :length :res_time \":referer\" \":agent\"";
/// Default exception template when a default module name is configured.
pub const DEFAULT_EXCEPTION_FORMAT_NAMED: &str = ":time :name.:level:tags: :message\n :stack";
/// Default exception template without a module name.
pub const DEFAULT_EXCEPTION_FORMAT: &str = ":time :level: :message\n :stack";
/// Default stat template when a default module name is configured.
pub const DEFAULT_STAT_FORMAT_NAMED: &str = ":time :name.:level:tags: :statName(:type):value";
/// Default stat template without a module name.
pub const DEFAULT_STAT_FORMAT: &str = ":time :level:tags: :statName(:type):value";
/// Default strftime pattern for the time token.
pub const DEFAULT_TIMESTAMP: &str = "%Y-%m-%dT%H:%M:%S";

/// Replaces only the first occurrence of `token` in `line`.
#[must_use]
pub fn replace_first(line: &str, token: &str, value: &str) -> String {
    line.find(token).map_or_else(
        || line.to_string(),
        |pos| {
            let mut out = String::with_capacity(line.len() + value.len());
            out.push_str(&line[..pos]);
            out.push_str(value);
            out.push_str(&line[pos + token.len()..]);
            out
        },
    )
}

/// Removes the first `":time "` span (token plus one trailing space).
///
/// This is the alternate path when no time pattern is configured: the rest
/// of the line shifts left by exactly that span. A bare `":time"` with no
/// trailing space stays literal, as it always has.
#[must_use]
pub fn strip_time(line: &str) -> String {
    replace_first(line, ":time ", "")
}

/// Bracket-joined tag rendering: `["a","b"]` becomes `"[a,b]"`, an empty
/// list becomes the empty string.
#[must_use]
pub fn render_tags(tags: &[String]) -> String {
    if tags.is_empty() {
        String::new()
    } else {
        format!("[{}]", tags.join(","))
    }
}

/// Text-mode rendering of a resolved value.
///
/// Strings are used unquoted, numbers in their canonical form, and `Null`
/// (an absent field) becomes the empty string.
#[must_use]
pub fn display(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
