//! Record formatting: the token registry, the substitution primitives, and
//! the per-kind record formatter built on top of them.

mod formatter;
mod template;
mod token;

pub use formatter::{FormatterBuilder, RecordFormatter};
pub use template::{
    display, render_tags, replace_first, strip_time, DEFAULT_ACCESS_FORMAT,
    DEFAULT_EXCEPTION_FORMAT, DEFAULT_EXCEPTION_FORMAT_NAMED, DEFAULT_FORMAT,
    DEFAULT_FORMAT_NAMED, DEFAULT_STAT_FORMAT, DEFAULT_STAT_FORMAT_NAMED, DEFAULT_TIMESTAMP,
};
pub use token::{ResolveContext, Token};
