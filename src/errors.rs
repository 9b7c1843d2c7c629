//! Errors of the fallible outer surfaces.
//!
//! The analysis pipeline itself never fails; only reading a study spec and
//! running a summary enhancer can.

use std::time::Duration;

use thiserror::Error;

use crate::pipeline::validation::ValidationReport;

pub use crate::pipeline::error_code::ErrorCode;
pub use crate::pipeline::errors::StudySpecError;

#[derive(Debug, Error)]
pub enum StudyError {
    #[error("study spec is not valid JSON: {0}")]
    SpecParse(#[from] serde_json::Error),

    #[error("study spec has {} error(s)", .0.errors().count())]
    InvalidSpec(ValidationReport),

    #[error("summary enhancement failed: {0}")]
    Enhancement(String),

    #[error("summary enhancement timed out after {0:?}")]
    EnhancementTimeout(Duration),
}

pub type Result<T> = std::result::Result<T, StudyError>;
