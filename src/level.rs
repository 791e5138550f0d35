//! Severity levels for generic records.
//!
//! Exception and stat records don't use these; their level text is fixed to
//! the literals `"exception"` and `"stat"` by the formatter.

use crate::error::Error;
use std::str::FromStr;

/// Severity of a generic log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Level {
    /// Development-time diagnostics.
    Debug,
    /// Normal operational messages.
    #[default]
    Info,
    /// Non-fatal anomalies.
    Warn,
    /// Failures that need attention.
    Error,
}

impl Level {
    /// Lowercase name, exactly the text substituted for the level token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(Error::InvalidLevel(other.to_string())),
        }
    }
}
