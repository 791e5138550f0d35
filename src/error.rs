//! Unified error type for all logline operations.
//!
//! Rendering itself never fails; everything here is either a construction-time
//! configuration problem or a pass-through failure from a sink.

/// Error type for logline operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error from a sink.
    Io(std::io::Error),
    /// TOML config parsing error.
    ConfigParse(toml::de::Error),
    /// JSON mode was enabled for access records without a key-to-token mapping.
    MissingAccessFields,
    /// An access field mapping referenced a token the registry does not know.
    UnknownToken {
        /// Output key the mapping declared.
        key: String,
        /// The unrecognized token text.
        token: String,
    },
    /// Invalid log level string in configuration.
    InvalidLevel(String),
    /// Format/serialization error.
    Format(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ConfigParse(e) => write!(f, "parse error: {e}"),
            Self::MissingAccessFields => {
                write!(f, "json mode requires an access field mapping")
            }
            Self::UnknownToken { key, token } => {
                write!(f, "unknown token {token} mapped to key {key}")
            }
            Self::InvalidLevel(level) => write!(f, "invalid level: {level}"),
            Self::Format(s) => write!(f, "format error: {s}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::ConfigParse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::ConfigParse(e)
    }
}
