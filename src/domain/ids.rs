//! Image identifiers and pipeline provenance tags
//!
//! Every artifact carries the id of the stage that produced it. Only images
//! that came out of the import or tag stages live in the local image store
//! under a name the runtime can save, so those are the only two accepted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Builder id of the stage that imports a filesystem tarball as an image
pub const DOCKER_IMPORT_BUILDER_ID: &str = "packer.post-processor.docker-import";

/// Builder id of the stage that tags an image in the local store
pub const DOCKER_TAG_BUILDER_ID: &str = "packer.post-processor.docker-tag";

/// Builder id of this stage
pub const DOCKER_SAVE_BUILDER_ID: &str = "packer.post-processor.docker-save";

/// Upstream builder ids whose artifacts can be saved
pub const ACCEPTED_BUILDER_IDS: [&str; 2] = [DOCKER_IMPORT_BUILDER_ID, DOCKER_TAG_BUILDER_ID];

/// Returns true if artifacts from `builder_id` may be exported
///
/// ```
/// use docker_save::domain::ids::{is_accepted_builder, DOCKER_TAG_BUILDER_ID};
///
/// assert!(is_accepted_builder(DOCKER_TAG_BUILDER_ID));
/// assert!(!is_accepted_builder("packer.builder.docker"));
/// ```
pub fn is_accepted_builder(builder_id: &str) -> bool {
    ACCEPTED_BUILDER_IDS.contains(&builder_id)
}

/// Image reference or digest newtype wrapper
///
/// Anything the image runtime accepts as a save target: `name:tag`,
/// `registry/name@sha256:...` or a bare `sha256:...` id.
///
/// # Examples
///
/// ```
/// use docker_save::domain::ids::ImageId;
/// use std::str::FromStr;
///
/// let id = ImageId::from_str("sha256:abc123").unwrap();
/// assert_eq!(id.as_str(), "sha256:abc123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageId(String);

impl ImageId {
    /// Creates a new ImageId
    ///
    /// # Errors
    ///
    /// Returns an error if the id is empty, contains whitespace or starts
    /// with `-`
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Image ID cannot be empty".to_string());
        }
        if id.chars().any(char::is_whitespace) {
            return Err(format!("Image ID cannot contain whitespace: '{id}'"));
        }
        if id.starts_with('-') {
            return Err(format!("Image ID cannot start with '-': '{id}'"));
        }
        Ok(Self(id))
    }

    /// Returns the image id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ImageId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for ImageId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
