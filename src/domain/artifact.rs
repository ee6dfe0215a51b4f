//! Pipeline artifacts
//!
//! An artifact is the hand-off between pipeline stages. This stage only reads
//! the two attributes it needs and passes the same handle downstream.

use crate::domain::ids::ImageId;
use std::fmt;

/// A built image handed over by an upstream stage
///
/// Implementations must be immutable once produced.
pub trait Artifact: fmt::Debug + Send + Sync {
    /// Image reference or digest the runtime can save
    fn id(&self) -> &str;

    /// Id of the stage that produced this artifact
    fn builder_id(&self) -> &str;

    /// Human-readable one-liner
    fn describe(&self) -> String {
        format!("Image: {}", self.id())
    }
}

/// Artifact for an image held in the local image store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageArtifact {
    id: ImageId,
    builder_id: String,
}

impl ImageArtifact {
    /// Creates an artifact from an already validated id
    pub fn new(id: ImageId, builder_id: impl Into<String>) -> Self {
        Self {
            id,
            builder_id: builder_id.into(),
        }
    }

    /// Typed image id
    pub fn image_id(&self) -> &ImageId {
        &self.id
    }
}

impl Artifact for ImageArtifact {
    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn builder_id(&self) -> &str {
        &self.builder_id
    }
}

/// Builder for [`ImageArtifact`]
///
/// # Examples
///
/// ```
/// use docker_save::domain::{Artifact, ImageArtifactBuilder};
/// use docker_save::domain::ids::DOCKER_TAG_BUILDER_ID;
///
/// let artifact = ImageArtifactBuilder::new()
///     .id("app:latest").unwrap()
///     .builder_id(DOCKER_TAG_BUILDER_ID)
///     .build()
///     .unwrap();
/// assert_eq!(artifact.id(), "app:latest");
/// ```
#[derive(Debug, Default)]
pub struct ImageArtifactBuilder {
    id: Option<ImageId>,
    builder_id: Option<String>,
}

impl ImageArtifactBuilder {
    /// Creates an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the image id
    ///
    /// # Errors
    ///
    /// Returns an error if the id is not a valid [`ImageId`]
    pub fn id(mut self, id: impl Into<String>) -> Result<Self, String> {
        self.id = Some(ImageId::new(id)?);
        Ok(self)
    }

    /// Sets the producing stage id
    pub fn builder_id(mut self, builder_id: impl Into<String>) -> Self {
        self.builder_id = Some(builder_id.into());
        self
    }

    /// Builds the artifact
    ///
    /// # Errors
    ///
    /// Returns an error if a field was not set
    pub fn build(self) -> Result<ImageArtifact, String> {
        let id = self.id.ok_or("Image ID is required")?;
        let builder_id = self.builder_id.ok_or("Builder ID is required")?;
        if builder_id.trim().is_empty() {
            return Err("Builder ID cannot be empty".to_string());
        }
        Ok(ImageArtifact::new(id, builder_id))
    }
}
