//! Save summary and reporting
//!
//! The stage itself only returns a [`PostProcessOutcome`]; the CLI turns it
//! into a [`SaveSummary`] for display or JSON output.

use super::outcome::PostProcessOutcome;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Summary of a completed save
#[derive(Debug, Clone, Serialize)]
pub struct SaveSummary {
    /// Image reference or digest that was saved
    pub image_id: String,

    /// Stage that produced the image
    pub builder_id: String,

    /// Archive location
    pub path: PathBuf,

    /// Archive size in bytes
    pub bytes_written: u64,

    /// Duration of the save in milliseconds
    pub duration_ms: u64,

    /// SHA-256 of the archive, if verification ran
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,

    /// When the save finished
    pub completed_at: DateTime<Utc>,
}

impl SaveSummary {
    /// Build a summary from the stage outcome
    pub fn from_outcome(outcome: &PostProcessOutcome, path: &Path) -> Self {
        Self {
            image_id: outcome.artifact.id().to_string(),
            builder_id: outcome.artifact.builder_id().to_string(),
            path: path.to_path_buf(),
            bytes_written: outcome.bytes_written,
            duration_ms: outcome.duration.as_millis() as u64,
            sha256: None,
            completed_at: Utc::now(),
        }
    }

    /// Attach the archive digest
    pub fn with_sha256(mut self, digest: impl Into<String>) -> Self {
        self.sha256 = Some(digest.into());
        self
    }

    /// Human-readable lines for the terminal
    pub fn format_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("  Image: {}", self.image_id),
            format!("  Archive: {}", self.path.display()),
            format!("  Size: {}", format_bytes(self.bytes_written)),
            format!("  Duration: {:.2}s", self.duration_ms as f64 / 1000.0),
        ];
        if let Some(digest) = &self.sha256 {
            lines.push(format!("  SHA-256: {digest}"));
        }
        lines
    }
}

/// Format a byte count with a binary unit
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;
    const GB: u64 = 1024 * MB;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::DOCKER_IMPORT_BUILDER_ID;
    use crate::domain::{Artifact, ImageArtifactBuilder};
    use std::sync::Arc;
    use std::time::Duration;

    fn outcome() -> PostProcessOutcome {
        let artifact: Arc<dyn Artifact> = Arc::new(
            ImageArtifactBuilder::new()
                .id("app:2.0")
                .unwrap()
                .builder_id(DOCKER_IMPORT_BUILDER_ID)
                .build()
                .unwrap(),
        );
        PostProcessOutcome::saved(artifact, 2048, Duration::from_millis(1500))
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024), "3.0 GB");
    }

    #[test]
    fn test_summary_from_outcome() {
        let summary = SaveSummary::from_outcome(&outcome(), Path::new("/tmp/app.tar"));
        assert_eq!(summary.image_id, "app:2.0");
        assert_eq!(summary.builder_id, DOCKER_IMPORT_BUILDER_ID);
        assert_eq!(summary.bytes_written, 2048);
        assert_eq!(summary.duration_ms, 1500);
        assert!(summary.sha256.is_none());
    }

    #[test]
    fn test_summary_lines_include_digest() {
        let summary =
            SaveSummary::from_outcome(&outcome(), Path::new("app.tar")).with_sha256("abcd");
        let lines = summary.format_lines();
        assert!(lines.contains(&"  Size: 2.0 KB".to_string()));
        assert!(lines.contains(&"  Duration: 1.50s".to_string()));
        assert_eq!(lines.last().unwrap(), "  SHA-256: abcd");
    }

    #[test]
    fn test_summary_json_omits_missing_digest() {
        let summary = SaveSummary::from_outcome(&outcome(), Path::new("app.tar"));
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["image_id"], "app:2.0");
        assert_eq!(json["bytes_written"], 2048);
        assert!(json.get("sha256").is_none());
    }
}
