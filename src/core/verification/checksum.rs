//! Checksum calculation for archive verification
//!
//! This module computes digests of finished archives so they can be
//! recorded next to the build output.

use crate::domain::errors::DockerSaveError;
use crate::domain::Result;
use sha2::{Digest, Sha256};
use std::path::Path;
use tokio::io::AsyncReadExt;

const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Calculate the SHA-256 checksum of a file
///
/// The file is streamed, so archives of any size can be hashed.
///
/// # Returns
///
/// Returns a hex-encoded SHA-256 checksum string (64 characters).
///
/// # Errors
///
/// Returns an I/O error if the file cannot be opened or read.
pub async fn archive_sha256(path: &Path) -> Result<String> {
    let mut file = tokio::fs::File::open(path).await.map_err(|e| {
        DockerSaveError::Io(format!("Failed to open {} for hashing: {e}", path.display()))
    })?;

    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; READ_BUFFER_SIZE];
    loop {
        let read = file.read(&mut buffer).await.map_err(|e| {
            DockerSaveError::Io(format!("Failed to read {}: {e}", path.display()))
        })?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}
