//! Reading the source file and saving reading progress back into it.
//!
//! Progress is kept by truncation: on quit the file is overwritten with
//! the unread suffix, so the next run starts where this one stopped.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("can't read file '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("couldn't save reading progress to '{}'", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ProgressError {
    /// The I/O failure behind this error.
    pub const fn io_error(&self) -> &io::Error {
        match self {
            Self::Read { source, .. } | Self::Write { source, .. } => source,
        }
    }
}

/// Read the whole file into memory.
///
/// # Errors
///
/// Returns [`ProgressError::Read`] if the file cannot be opened or read.
pub fn read_entire_file(path: &Path) -> Result<Vec<u8>, ProgressError> {
    fs::read(path).map_err(|source| ProgressError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Replace the contents of `path` with `remaining`.
///
/// # Errors
///
/// Returns [`ProgressError::Write`] if the file cannot be opened for
/// writing or the write fails.
pub fn write_remaining(path: &Path, remaining: &[u8]) -> Result<(), ProgressError> {
    tracing::debug!(path = %path.display(), bytes = remaining.len(), "saving progress");
    fs::write(path, remaining).map_err(|source| ProgressError::Write {
        path: path.to_path_buf(),
        source,
    })
}
