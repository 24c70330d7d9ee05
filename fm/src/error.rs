//! Error types for fm

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for fm operations
pub type FmResult<T> = Result<T, FmError>;

/// Everything a command can fail with.
///
/// Filesystem failures keep the original `io::Error` so callers can inspect
/// its kind; `Display` renders the user-facing cause text.
#[derive(Error, Debug)]
pub enum FmError {
    /// Wrong argument count or unbalanced quotes. Nothing was touched.
    #[error("arguments is invalid")]
    InvalidArguments,

    /// The pre-flight existence/permission probe failed.
    #[error("{source}: '{}'", path.display())]
    Access {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The real filesystem or stream call failed after its pre-flight check.
    #[error("{source}: '{}'", path.display())]
    Operation {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Input did not match any command.
    #[error("Unknown command: \"{0}\"")]
    UnknownCommand(String),

    /// `os --<flag>` with a flag nobody answers.
    #[error("Unknown argument: {0}")]
    UnknownOsFlag(String),
}

impl FmError {
    pub fn access(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Access {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn operation(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Operation {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    #[must_use]
    pub fn is_access(&self) -> bool {
        matches!(self, Self::Access { .. })
    }

    #[must_use]
    pub fn is_operation(&self) -> bool {
        matches!(self, Self::Operation { .. })
    }

    /// Kind of the underlying I/O error, if there is one.
    #[must_use]
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Self::Access { source, .. } | Self::Operation { source, .. } => Some(source.kind()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_error_names_the_path() {
        let err = FmError::access(
            "/no/such",
            io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        );
        assert_eq!(err.to_string(), "No such file or directory: '/no/such'");
        assert!(err.is_access());
        assert_eq!(err.io_kind(), Some(io::ErrorKind::NotFound));
    }

    #[test]
    fn unknown_command_echoes_input() {
        let err = FmError::UnknownCommand("cata x".to_string());
        assert_eq!(err.to_string(), "Unknown command: \"cata x\"");
        assert_eq!(err.io_kind(), None);
    }
}
