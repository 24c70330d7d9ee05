use crate::error::{FmError, FmResult};
use crate::path::{require, AccessMode};
use sha2::{Digest, Sha256};
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tracing::debug;

/// Lowercase hex SHA-256 of the file at `path`, read `chunk_size` bytes at a
/// time.
pub async fn digest(path: &Path, chunk_size: usize) -> FmResult<String> {
    require(path, AccessMode::Readable).await?;

    let mut file = File::open(path)
        .await
        .map_err(|e| FmError::operation(path, e))?;
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; chunk_size.max(1)];
    let mut total = 0u64;

    loop {
        let n = file
            .read(&mut buf)
            .await
            .map_err(|e| FmError::operation(path, e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
        total += n as u64;
    }

    let hex = hex::encode(hasher.finalize());
    debug!(path = %path.display(), bytes = total, "hashed file");
    Ok(hex)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn empty_file_has_the_known_digest() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("empty");
        fs::write(&file, b"").unwrap();

        assert_eq!(
            digest(&file, 64).await.unwrap(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[tokio::test]
    async fn abc_matches_reference_vector() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("abc");
        fs::write(&file, b"abc").unwrap();

        assert_eq!(
            digest(&file, 1).await.unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[tokio::test]
    async fn chunked_digest_matches_one_shot() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("data.bin");
        let data: Vec<u8> = (0..300_000u32).map(|i| (i * 7 % 256) as u8).collect();
        fs::write(&file, &data).unwrap();

        let expected = hex::encode(Sha256::digest(&data));
        assert_eq!(digest(&file, 4096).await.unwrap(), expected);
        assert_eq!(digest(&file, 1_000_003).await.unwrap(), expected);
    }

    #[tokio::test]
    async fn digest_is_stable_and_sensitive_to_one_byte() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("f");
        let mut data = vec![0x42u8; 10_000];
        fs::write(&file, &data).unwrap();

        let first = digest(&file, 512).await.unwrap();
        assert_eq!(first, digest(&file, 512).await.unwrap());

        data[5_000] ^= 1;
        fs::write(&file, &data).unwrap();
        assert_ne!(first, digest(&file, 512).await.unwrap());
    }

    #[tokio::test]
    async fn missing_file_is_an_access_error() {
        let temp = tempfile::tempdir().unwrap();
        let err = digest(&temp.path().join("missingfile"), 64)
            .await
            .unwrap_err();
        assert!(err.is_access());
        assert!(!err.is_operation());
    }
}
