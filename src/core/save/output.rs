//! Destination archive lifecycle
//!
//! An [`OutputFile`] owns the archive from creation until it is either
//! committed or discarded. If it is dropped in between (an error path that
//! returned early, a cancelled future) the file is removed, so a failed save
//! never leaves a truncated archive on disk.

use crate::domain::errors::DockerSaveError;
use crate::domain::Result;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

/// Removes `path` on drop while armed
#[derive(Debug)]
struct RemoveOnDrop {
    path: PathBuf,
    armed: bool,
}

impl RemoveOnDrop {
    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for RemoveOnDrop {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Err(e) = std::fs::remove_file(&self.path) {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to remove partial archive"
            );
        }
    }
}

/// Archive file being written by an export
#[derive(Debug)]
pub struct OutputFile {
    file: File,
    cleanup: RemoveOnDrop,
}

impl OutputFile {
    /// Create (or truncate) the archive at `path`
    ///
    /// # Errors
    ///
    /// Returns [`DockerSaveError::OutputFile`] if the file cannot be created.
    /// Nothing needs cleaning up in that case.
    pub async fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = File::create(&path)
            .await
            .map_err(|source| DockerSaveError::OutputFile {
                path: path.clone(),
                source,
            })?;

        tracing::debug!(path = %path.display(), "Created output file");

        Ok(Self {
            file,
            cleanup: RemoveOnDrop { path, armed: true },
        })
    }

    /// Path of the archive
    pub fn path(&self) -> &Path {
        &self.cleanup.path
    }

    /// Writable handle for the export driver
    pub fn writer(&mut self) -> &mut File {
        &mut self.file
    }

    /// Flush, sync and close the archive, keeping it on disk
    ///
    /// Returns the final size in bytes.
    ///
    /// # Errors
    ///
    /// If the data cannot be made durable the archive is removed and an
    /// I/O error is returned.
    pub async fn commit(mut self) -> Result<u64> {
        self.file.flush().await.map_err(|e| self.finalize_error(e))?;
        self.file.sync_all().await.map_err(|e| self.finalize_error(e))?;
        let size = self
            .file
            .metadata()
            .await
            .map_err(|e| self.finalize_error(e))?
            .len();

        self.cleanup.disarm();
        Ok(size)
    }

    /// Close and delete the archive
    ///
    /// Deletion is best-effort: a failure is logged and otherwise ignored so
    /// the caller can report the error that made it discard the file.
    pub async fn discard(self) {
        let OutputFile { mut file, mut cleanup } = self;

        if let Err(e) = file.flush().await {
            tracing::debug!(error = %e, "Flush before discard failed");
        }
        drop(file);

        cleanup.disarm();
        match tokio::fs::remove_file(&cleanup.path).await {
            Ok(()) => tracing::debug!(path = %cleanup.path.display(), "Removed partial archive"),
            Err(e) => tracing::warn!(
                path = %cleanup.path.display(),
                error = %e,
                "Failed to remove partial archive"
            ),
        }
    }

    fn finalize_error(&self, err: std::io::Error) -> DockerSaveError {
        DockerSaveError::Io(format!(
            "Failed to finalize {}: {}",
            self.cleanup.path.display(),
            err
        ))
    }
}
