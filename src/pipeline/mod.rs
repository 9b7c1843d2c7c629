//! Pipeline orchestration
//!
//! - `artifacts`: the analyzed [`Document`](artifacts::Document) shared by
//!   downstream stages
//! - `traits`: swappable stage boundaries
//! - `runner`: stage execution, optionally parallel
//! - `observer`: stage timing and artifact callbacks
//! - `spec` / `validation`: the JSON config format and its checks
//! - `format`: text and JSON renderings of the output

pub mod artifacts;
pub mod error_code;
pub mod errors;
pub mod format;
pub mod observer;
pub mod runner;
pub mod spec;
pub mod traits;
pub mod validation;

pub use artifacts::{Document, TermEntry, TermId, TermStatistics};
pub use observer::{NoopObserver, PipelineObserver, StageReport, StageTimingObserver};
pub use runner::{Pipeline, PipelineBuilder, StudyPipeline};
pub use spec::{OptionsSpec, StudySpec, SPEC_VERSION};
pub use traits::{KeywordRanker, Segmenter, Summarizer};
pub use validation::{Severity, ValidationDiagnostic, ValidationEngine, ValidationReport};
