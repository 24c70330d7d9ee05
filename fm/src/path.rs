//! Path resolution and pre-flight access checks

use crate::error::{FmError, FmResult};
use std::io;
use std::path::{Component, Path, PathBuf};

/// What a pre-flight check demands of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    /// The path exists (symlinks followed).
    Exists,
    /// A file can be opened for reading, or a directory can be listed.
    Readable,
    /// The path exists and is a directory.
    Directory,
}

/// Outcome of [`check_access`]. A denial always carries its OS cause.
#[derive(Debug)]
pub enum AccessCheck {
    Granted,
    Denied(io::Error),
}

impl AccessCheck {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Granted)
    }

    pub fn into_result(self, path: &Path) -> FmResult<()> {
        match self {
            Self::Granted => Ok(()),
            Self::Denied(source) => Err(FmError::access(path, source)),
        }
    }
}

/// Resolve `token` against `base`. Absolute tokens replace the base; `.` and
/// `..` are folded lexically. Nothing is checked on disk.
pub fn resolve(base: &Path, token: &str) -> PathBuf {
    normalize(&base.join(token))
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                // Popping at the root leaves the root in place.
                out.pop();
            }
            Component::Normal(name) => out.push(name),
        }
    }
    out
}

/// Probe `path` for `mode`. Never fails; the denial is the result.
pub async fn check_access(path: &Path, mode: AccessMode) -> AccessCheck {
    match probe(path, mode).await {
        Ok(()) => AccessCheck::Granted,
        Err(e) => AccessCheck::Denied(e),
    }
}

/// [`check_access`] folded into an [`FmError::Access`].
pub async fn require(path: &Path, mode: AccessMode) -> FmResult<()> {
    check_access(path, mode).await.into_result(path)
}

async fn probe(path: &Path, mode: AccessMode) -> io::Result<()> {
    let metadata = tokio::fs::metadata(path).await?;
    match mode {
        AccessMode::Exists => Ok(()),
        AccessMode::Directory if metadata.is_dir() => Ok(()),
        AccessMode::Directory => Err(io::Error::new(
            io::ErrorKind::NotADirectory,
            "Not a directory",
        )),
        AccessMode::Readable if metadata.is_dir() => {
            tokio::fs::read_dir(path).await.map(|_| ())
        }
        AccessMode::Readable => tokio::fs::File::open(path).await.map(|_| ()),
    }
}
