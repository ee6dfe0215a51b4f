//! Result type alias for docker-save

use super::errors::DockerSaveError;

/// Result type alias for docker-save operations
///
/// # Examples
///
/// ```
/// use docker_save::domain::result::Result;
/// use docker_save::domain::errors::DockerSaveError;
///
/// fn failing_function() -> Result<()> {
///     Err(DockerSaveError::Validation("Invalid input".to_string()))
/// }
///
/// assert!(failing_function().is_err());
/// ```
pub type Result<T> = std::result::Result<T, DockerSaveError>;
