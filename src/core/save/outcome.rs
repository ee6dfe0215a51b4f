//! Result of a successful export

use crate::domain::Artifact;
use std::sync::Arc;
use std::time::Duration;

/// What the stage hands back to the pipeline after saving an image
#[derive(Debug, Clone)]
pub struct PostProcessOutcome {
    /// The input artifact, passed through unchanged
    pub artifact: Arc<dyn Artifact>,

    /// Downstream stages may still run
    pub continue_chain: bool,

    /// The artifact does not replace earlier artifacts in the chain
    pub force_override: bool,

    /// Size of the archive on disk
    pub bytes_written: u64,

    /// Time spent from provenance check to close
    pub duration: Duration,
}

impl PostProcessOutcome {
    /// Outcome for a completed save
    pub fn saved(artifact: Arc<dyn Artifact>, bytes_written: u64, duration: Duration) -> Self {
        Self {
            artifact,
            continue_chain: true,
            force_override: false,
            bytes_written,
            duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::DOCKER_TAG_BUILDER_ID;
    use crate::domain::ImageArtifactBuilder;

    #[test]
    fn test_saved_flags() {
        let artifact: Arc<dyn Artifact> = Arc::new(
            ImageArtifactBuilder::new()
                .id("app:1")
                .unwrap()
                .builder_id(DOCKER_TAG_BUILDER_ID)
                .build()
                .unwrap(),
        );

        let outcome = PostProcessOutcome::saved(artifact.clone(), 42, Duration::from_millis(5));
        assert!(outcome.continue_chain);
        assert!(!outcome.force_override);
        assert_eq!(outcome.bytes_written, 42);
        assert!(Arc::ptr_eq(&outcome.artifact, &artifact));
    }
}
