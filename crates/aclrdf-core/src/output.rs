//! Output destinations for rendered triples.

use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Default file name used when writing to a file.
pub const DEFAULT_OUTPUT_FILE: &str = "acl_rules.rdf";

/// Where the rendered triples go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Print to standard output.
    Stdout,
    /// Write to a new file. Existing files are never overwritten.
    File(PathBuf),
}

impl OutputTarget {
    /// Creates a file target.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    /// Returns the file path, if this is a file target.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Stdout => None,
            Self::File(path) => Some(path),
        }
    }

    /// Checks that the destination can be created.
    ///
    /// Run this before any network work so that a bad destination fails
    /// the run without side effects.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutputExists`] if the target file is already there.
    pub fn preflight(&self) -> Result<()> {
        match self {
            Self::Stdout => Ok(()),
            Self::File(path) if path.exists() => Err(Error::OutputExists { path: path.clone() }),
            Self::File(_) => Ok(()),
        }
    }

    /// Writes `contents` verbatim to the destination.
    ///
    /// Files are created with `create_new`, so a file that appeared after
    /// [`preflight`](Self::preflight) is still not overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutputExists`] if the file exists, or
    /// [`Error::Write`] for any other I/O failure.
    pub fn write(&self, contents: &str) -> Result<()> {
        match self {
            Self::Stdout => {
                let mut stdout = io::stdout().lock();
                stdout
                    .write_all(contents.as_bytes())
                    .and_then(|()| stdout.flush())
                    .map_err(|e| Error::write(self.to_string(), e))
            }
            Self::File(path) => {
                let mut file = OpenOptions::new()
                    .write(true)
                    .create_new(true)
                    .open(path)
                    .map_err(|e| match e.kind() {
                        io::ErrorKind::AlreadyExists => Error::OutputExists { path: path.clone() },
                        _ => Error::write(self.to_string(), e),
                    })?;
                file.write_all(contents.as_bytes())
                    .and_then(|()| file.sync_all())
                    .map_err(|e| Error::write(self.to_string(), e))?;
                tracing::debug!(
                    path = %path.display(),
                    bytes = contents.len(),
                    "Wrote output file"
                );
                Ok(())
            }
        }
    }
}

impl Default for OutputTarget {
    fn default() -> Self {
        Self::File(PathBuf::from(DEFAULT_OUTPUT_FILE))
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => write!(f, "stdout"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}
