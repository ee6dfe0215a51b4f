//! Export driver abstraction
//!
//! This module defines the trait an image runtime adapter implements so the
//! export stage can write an image into a file without knowing which
//! runtime produced the bytes.

use crate::domain::errors::DriverError;
use async_trait::async_trait;
use std::any::Any;
use tokio::io::AsyncWrite;
use tokio::sync::watch;

/// Image runtime capable of serializing an image to a byte stream
///
/// Implementations are shared behind `Arc<dyn ExportDriver>` and must not
/// keep per-call state.
#[async_trait]
pub trait ExportDriver: Send + Sync {
    /// Downcast to Any for type-specific operations
    fn as_any(&self) -> &dyn Any;

    /// Short name used in log fields
    fn name(&self) -> &str;

    /// Write the complete serialized image into `sink`
    ///
    /// # Arguments
    ///
    /// * `image_id` - Image reference or digest to save
    /// * `sink` - Destination for the archive bytes
    /// * `shutdown` - Set to `true` when the caller wants the save aborted
    ///
    /// # Errors
    ///
    /// On error the sink may hold a partial archive; the caller discards it.
    async fn save_image(
        &self,
        image_id: &str,
        sink: &mut (dyn AsyncWrite + Send + Unpin),
        shutdown: watch::Receiver<bool>,
    ) -> Result<(), DriverError>;
}

/// Resolves once `shutdown` carries `true`
///
/// Never resolves if the sender is dropped without signalling.
pub async fn shutdown_requested(mut shutdown: watch::Receiver<bool>) {
    loop {
        if *shutdown.borrow_and_update() {
            return;
        }
        if shutdown.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_shutdown_requested_already_set() {
        let (_tx, rx) = watch::channel(true);
        tokio::time::timeout(Duration::from_secs(1), shutdown_requested(rx))
            .await
            .expect("should resolve immediately");
    }

    #[tokio::test]
    async fn test_shutdown_requested_after_signal() {
        let (tx, rx) = watch::channel(false);
        let waiter = tokio::spawn(shutdown_requested(rx));
        tx.send(true).unwrap();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("should resolve after signal")
            .unwrap();
    }

    #[tokio::test]
    async fn test_shutdown_requested_sender_dropped() {
        let (tx, rx) = watch::channel(false);
        drop(tx);
        let result = tokio::time::timeout(Duration::from_millis(50), shutdown_requested(rx)).await;
        assert!(result.is_err());
    }
}
