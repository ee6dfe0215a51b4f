//! Docker CLI export driver
//!
//! Runs `<executable> save -- <image>` and streams the archive written to the
//! child's stdout into the caller's sink. Works with any runtime that mirrors
//! the docker CLI (`podman`, `nerdctl`).

use super::traits::{shutdown_requested, ExportDriver};
use crate::config::SaveConfig;
use crate::domain::errors::DriverError;
use async_trait::async_trait;
use std::any::Any;
use std::process::Stdio;
use tokio::io::{AsyncReadExt, AsyncWrite};
use tokio::process::Command;
use tokio::sync::watch;

/// Export driver backed by the docker command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockerDriver {
    executable: String,
}

impl DockerDriver {
    /// Create a driver that invokes `executable`
    pub fn new(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    /// Create a driver bound to the resolved `docker_path`
    pub fn from_config(config: &SaveConfig) -> Self {
        Self::new(config.docker_path.clone())
    }

    /// Binary this driver runs
    pub fn executable(&self) -> &str {
        &self.executable
    }
}

#[async_trait]
impl ExportDriver for DockerDriver {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn name(&self) -> &str {
        "docker"
    }

    async fn save_image(
        &self,
        image_id: &str,
        sink: &mut (dyn AsyncWrite + Send + Unpin),
        shutdown: watch::Receiver<bool>,
    ) -> Result<(), DriverError> {
        tracing::info!(
            executable = %self.executable,
            image_id = %image_id,
            "Exporting image"
        );

        let mut child = Command::new(&self.executable)
            .arg("save")
            .arg("--")
            .arg(image_id)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| DriverError::Spawn {
                executable: self.executable.clone(),
                message: e.to_string(),
            })?;

        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| DriverError::Other("image stream was not captured".to_string()))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| DriverError::Other("stderr was not captured".to_string()))?;

        let stream = async {
            let mut stderr_buf = Vec::new();
            let (copied, drained) = tokio::join!(
                tokio::io::copy(&mut stdout, &mut *sink),
                stderr.read_to_end(&mut stderr_buf),
            );
            drained?;
            Ok::<_, std::io::Error>((copied?, stderr_buf))
        };

        let streamed = tokio::select! {
            result = stream => result,
            _ = shutdown_requested(shutdown) => {
                tracing::warn!(image_id = %image_id, "Shutdown requested, stopping image export");
                if let Err(e) = child.kill().await {
                    tracing::debug!(error = %e, "Failed to kill export process");
                }
                return Err(DriverError::Cancelled);
            }
        };

        let (bytes, stderr_buf) = match streamed {
            Ok(output) => output,
            Err(e) => {
                child.kill().await.ok();
                return Err(DriverError::Io(e.to_string()));
            }
        };

        let status = child.wait().await.map_err(|e| {
            DriverError::Io(format!("Failed to wait for {}: {e}", self.executable))
        })?;

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr_buf).trim().to_string();
            tracing::error!(
                image_id = %image_id,
                status = %status,
                stderr = %stderr,
                "Image export command failed"
            );
            return Err(DriverError::CommandFailed {
                status: status.to_string(),
                stderr,
            });
        }

        tracing::debug!(image_id = %image_id, bytes, "Image stream written");
        Ok(())
    }
}
