//! TOML configuration with full defaults, so a config file only needs the
//! keys it changes.

use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;

use crate::error::Error;
use crate::fmt::DEFAULT_TIMESTAMP;

/// An access template is either a substitution line or, for JSON mode, a
/// key-to-token table. Untagged: the TOML value's shape decides.
///
/// The table keeps declaration order; in JSON mode the output object's keys
/// follow it exactly.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AccessTemplate {
    /// Literal template line with placeholder tokens.
    Line(String),
    /// Output key to token text, e.g. `status = ":status"`.
    Fields(IndexMap<String, String>),
}

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Render access records as JSON objects.
    pub json: bool,
    /// strftime pattern for the time token. The empty string disables the
    /// pattern: line templates drop the time token, access fields fall back
    /// to RFC-1123.
    pub timestamp: String,
    /// Default module name; empty means none.
    pub name: String,
    /// Generic record template.
    pub format: Option<String>,
    /// Access record template or field table.
    pub access_format: Option<AccessTemplate>,
    /// Exception record template.
    pub exception_format: Option<String>,
    /// Stat record template.
    pub stat_format: Option<String>,
    /// File sink settings.
    pub file: FileConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            json: false,
            timestamp: DEFAULT_TIMESTAMP.to_string(),
            name: String::new(),
            format: None,
            access_format: None,
            exception_format: None,
            stat_format: None,
            file: FileConfig::default(),
        }
    }
}

/// File sink configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Log file path; `~` is expanded.
    pub path: String,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            path: "logline.log".to_string(),
        }
    }
}

impl Config {
    /// Parses a TOML document.
    ///
    /// # Errors
    /// [`Error::ConfigParse`] on malformed TOML or unexpected value shapes.
    pub fn parse(text: &str) -> Result<Self, Error> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a TOML config file.
    ///
    /// # Errors
    /// I/O errors reading the file, or [`Error::ConfigParse`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }
}
