//! Streaming Brotli compression
//!
//! Both directions wrap a buffered source reader in an async-compression
//! codec and pump it into the destination, so memory stays bounded by the
//! chunk size whatever the file size. A destination left behind by a failed
//! run is not removed.

use crate::error::{FmError, FmResult};
use crate::path::{require, AccessMode};
use async_compression::tokio::bufread::{BrotliDecoder, BrotliEncoder};
use async_compression::Level;
use std::path::Path;
use tokio::fs::File;
use tokio::io::BufReader;
use tracing::debug;

use super::fs::open_destination;
use super::{ensure_distinct, pump, EngineOptions};

pub async fn compress(src: &Path, dst: &Path, options: &EngineOptions) -> FmResult<u64> {
    let reader = open_source(src, dst, options.chunk_size).await?;
    let encoder = match options.compression_quality {
        Some(quality) => BrotliEncoder::with_quality(reader, level(quality)),
        None => BrotliEncoder::new(reader),
    };
    let writer = open_destination(dst).await?;

    let written = pump(encoder, writer, options.chunk_size, src, dst).await?;
    debug!(src = %src.display(), dst = %dst.display(), bytes = written, "compressed");
    Ok(written)
}

/// Fails with an `InvalidData`-style operation error on corrupt or truncated
/// input.
pub async fn decompress(src: &Path, dst: &Path, options: &EngineOptions) -> FmResult<u64> {
    let reader = open_source(src, dst, options.chunk_size).await?;
    let decoder = BrotliDecoder::new(reader);
    let writer = open_destination(dst).await?;

    let written = pump(decoder, writer, options.chunk_size, src, dst).await?;
    debug!(src = %src.display(), dst = %dst.display(), bytes = written, "decompressed");
    Ok(written)
}

async fn open_source(src: &Path, dst: &Path, chunk_size: usize) -> FmResult<BufReader<File>> {
    require(src, AccessMode::Readable).await?;
    ensure_distinct(src, dst).await?;

    let file = File::open(src)
        .await
        .map_err(|e| FmError::operation(src, e))?;
    Ok(BufReader::with_capacity(chunk_size.max(1), file))
}

fn level(quality: u32) -> Level {
    Level::Precise(i32::try_from(quality.min(11)).unwrap_or(11))
}
