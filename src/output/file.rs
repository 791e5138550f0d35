//! Append-only file sink.
//!
//! Parent directories are created once at construction; each write reopens
//! the file in append mode, so the sink holds no file handle and needs no
//! lock to satisfy `Send + Sync`.

use super::Sink;
use crate::error::Error;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

/// File-backed sink writing rendered lines to a single log file.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// Opens a sink at `path`. `~` is expanded; missing parent directories
    /// are created.
    ///
    /// # Errors
    /// I/O errors from directory creation.
    pub fn new(path: impl AsRef<str>) -> Result<Self, Error> {
        let expanded = shellexpand::tilde(path.as_ref());
        let path = PathBuf::from(expanded.as_ref());
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(Self { path })
    }

    /// The resolved log file path.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn write(&self, line: &str) -> Result<(), Error> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }

    fn flush(&self) -> Result<(), Error> {
        Ok(())
    }
}
