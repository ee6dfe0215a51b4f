//! Domain models and types for docker-save.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Artifacts** ([`Artifact`], [`ImageArtifact`]) handed between pipeline stages
//! - **Identifiers** ([`ImageId`]) and the provenance allow-list
//! - **Error types** ([`DockerSaveError`], [`DriverError`])
//! - **Result type alias** ([`Result`])
//!
//! # Provenance
//!
//! ```rust
//! use docker_save::domain::ids::{is_accepted_builder, DOCKER_IMPORT_BUILDER_ID};
//!
//! assert!(is_accepted_builder(DOCKER_IMPORT_BUILDER_ID));
//! assert!(!is_accepted_builder("unknown-stage"));
//! ```

pub mod artifact;
pub mod errors;
pub mod ids;
pub mod result;

// Re-export commonly used types for convenience
pub use artifact::{Artifact, ImageArtifact, ImageArtifactBuilder};
pub use errors::{DockerSaveError, DriverError};
pub use ids::ImageId;
pub use result::Result;
