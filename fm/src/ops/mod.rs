//! File operations and streaming engines
//!
//! Every operation runs its own pre-flight check through [`crate::path`], so a
//! missing or unreadable input surfaces as [`FmError::Access`] before any
//! handle is opened. Failures after that point are [`FmError::Operation`].

use crate::error::{FmError, FmResult};
use std::io;
use std::path::Path;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::trace;

pub mod compress;
pub mod fs;
pub mod hash;

pub use fm_config::DEFAULT_CHUNK_SIZE;

/// Tunables shared by the streaming operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    pub chunk_size: usize,
    pub compression_quality: Option<u32>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            compression_quality: None,
        }
    }
}

impl From<&fm_config::EngineConfig> for EngineOptions {
    fn from(config: &fm_config::EngineConfig) -> Self {
        Self {
            chunk_size: config.chunk_size.max(1),
            compression_quality: config.compression_quality,
        }
    }
}

/// Copy `reader` into `writer` one chunk at a time, then flush.
///
/// Read errors are attributed to `src` and write errors to `dst`. Both
/// handles are dropped, and so closed, on every return path. A zero
/// `chunk_size` is read as one byte; an empty buffer would look like EOF.
pub(crate) async fn pump<R, W>(
    mut reader: R,
    mut writer: W,
    chunk_size: usize,
    src: &Path,
    dst: &Path,
) -> FmResult<u64>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = vec![0u8; chunk_size.max(1)];
    let mut total = 0u64;

    loop {
        let n = reader
            .read(&mut buf)
            .await
            .map_err(|e| FmError::operation(src, e))?;
        if n == 0 {
            break;
        }
        writer
            .write_all(&buf[..n])
            .await
            .map_err(|e| FmError::operation(dst, e))?;
        total += n as u64;
        trace!(bytes = total, "pumped chunk");
    }

    writer
        .flush()
        .await
        .map_err(|e| FmError::operation(dst, e))?;
    Ok(total)
}

/// Reject a copy-like operation whose destination is its own source; the
/// destination is truncated before the source is read.
pub(crate) async fn ensure_distinct(src: &Path, dst: &Path) -> FmResult<()> {
    if same_file(src, dst).await {
        return Err(FmError::operation(
            dst,
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "source and destination are the same file",
            ),
        ));
    }
    Ok(())
}

/// Device and inode identity, so hard links and symlinks count as the same
/// file.
#[cfg(unix)]
async fn same_file(src: &Path, dst: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    match (tokio::fs::metadata(src).await, tokio::fs::metadata(dst).await) {
        (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
        _ => src == dst,
    }
}

#[cfg(not(unix))]
async fn same_file(src: &Path, dst: &Path) -> bool {
    match (
        tokio::fs::canonicalize(src).await,
        tokio::fs::canonicalize(dst).await,
    ) {
        (Ok(a), Ok(b)) => a == b,
        _ => src == dst,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn pump_moves_every_byte_with_tiny_chunks() {
        let data: Vec<u8> = (0..=255u8).cycle().take(10_000).collect();
        let mut out = Vec::new();

        let total = pump(&data[..], &mut out, 7, Path::new("src"), Path::new("dst"))
            .await
            .unwrap();
        assert_eq!(total, 10_000);
        assert_eq!(out, data);
    }

    #[tokio::test]
    async fn same_file_is_rejected() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("a.txt");
        std::fs::write(&file, b"a").unwrap();
        let alias = temp.path().join(".").join("a.txt");

        let err = ensure_distinct(&file, &alias).await.unwrap_err();
        assert!(err.is_operation());
        assert!(ensure_distinct(&file, &temp.path().join("b.txt")).await.is_ok());
    }

    #[tokio::test]
    async fn pump_with_zero_chunk_size_still_moves_every_byte() {
        let data = b"important data".to_vec();
        let mut out = Vec::new();

        let total = pump(&data[..], &mut out, 0, Path::new("src"), Path::new("dst"))
            .await
            .unwrap();
        assert_eq!(total, data.len() as u64);
        assert_eq!(out, data);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn hard_link_to_source_is_rejected() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("a.txt");
        let link = temp.path().join("link.txt");
        std::fs::write(&file, b"a").unwrap();
        std::fs::hard_link(&file, &link).unwrap();

        let err = ensure_distinct(&file, &link).await.unwrap_err();
        assert!(err.is_operation());
    }

    #[test]
    fn options_follow_engine_config() {
        let config = fm_config::EngineConfig {
            chunk_size: 0,
            compression_quality: Some(4),
        };
        let options = EngineOptions::from(&config);
        assert_eq!(options.chunk_size, 1);
        assert_eq!(options.compression_quality, Some(4));
    }
}
