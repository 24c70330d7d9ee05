use crate::error::{FmError, FmResult};
use crate::path::{require, AccessMode};
use std::path::Path;
use tokio::fs::{self, File};
use tracing::debug;

use super::{ensure_distinct, pump};

/// Entry names of `dir`, sorted.
pub async fn list(dir: &Path) -> FmResult<Vec<String>> {
    require(dir, AccessMode::Directory).await?;
    require(dir, AccessMode::Readable).await?;

    let mut entries = fs::read_dir(dir)
        .await
        .map_err(|e| FmError::operation(dir, e))?;
    let mut names = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| FmError::operation(dir, e))?
    {
        names.push(entry.file_name().to_string_lossy().into_owned());
    }

    names.sort();
    debug!(dir = %dir.display(), entries = names.len(), "listed directory");
    Ok(names)
}

/// Whole file as text. Invalid UTF-8 is replaced, not rejected.
pub async fn read_all(path: &Path) -> FmResult<String> {
    require(path, AccessMode::Readable).await?;

    let bytes = fs::read(path)
        .await
        .map_err(|e| FmError::operation(path, e))?;
    debug!(path = %path.display(), bytes = bytes.len(), "read file");
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Create an empty file, truncating an existing one.
pub async fn create(path: &Path) -> FmResult<()> {
    open_destination(path).await?;
    debug!(path = %path.display(), "created file");
    Ok(())
}

pub async fn rename(src: &Path, dst: &Path) -> FmResult<()> {
    require(src, AccessMode::Exists).await?;

    fs::rename(src, dst)
        .await
        .map_err(|e| FmError::operation(src, e))?;
    debug!(src = %src.display(), dst = %dst.display(), "renamed");
    Ok(())
}

pub async fn remove(path: &Path) -> FmResult<()> {
    require(path, AccessMode::Exists).await?;

    fs::remove_file(path)
        .await
        .map_err(|e| FmError::operation(path, e))?;
    debug!(path = %path.display(), "removed file");
    Ok(())
}

/// Stream `src` into a freshly truncated `dst`. Returns the bytes copied.
///
/// A failure part-way leaves whatever reached `dst` in place.
pub async fn copy(src: &Path, dst: &Path, chunk_size: usize) -> FmResult<u64> {
    require(src, AccessMode::Readable).await?;
    ensure_distinct(src, dst).await?;

    let writer = open_destination(dst).await?;
    let reader = File::open(src)
        .await
        .map_err(|e| FmError::operation(src, e))?;

    let copied = pump(reader, writer, chunk_size, src, dst).await?;
    debug!(src = %src.display(), dst = %dst.display(), bytes = copied, "copied");
    Ok(copied)
}

/// Open `path` for writing, truncating it. Its parent directory must exist.
pub(crate) async fn open_destination(path: &Path) -> FmResult<File> {
    if let Some(parent) = path.parent() {
        require(parent, AccessMode::Exists).await?;
    }
    File::create(path)
        .await
        .map_err(|e| FmError::operation(path, e))
}
