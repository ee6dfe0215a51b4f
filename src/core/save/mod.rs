//! Image save stage
//!
//! This module provides the export stage and its supporting types:
//! - [`SaveStage`] - provenance gate and save orchestration
//! - [`OutputFile`] - archive file lifecycle
//! - [`PostProcessOutcome`] - pass-through result for the pipeline
//! - [`SaveSummary`] - reporting for the CLI

pub mod outcome;
pub mod output;
pub mod stage;
pub mod summary;

pub use outcome::PostProcessOutcome;
pub use output::OutputFile;
pub use stage::SaveStage;
pub use summary::{format_bytes, SaveSummary};
