//! Summarization components
//!
//! Extractive summaries: sentences are scored by tf-idf salience and the
//! selection is returned in document order. MMR is available for more
//! diverse picks.

pub mod selector;
pub mod unit_vector;

pub use selector::{SelectedSentence, SelectorConfig, SentenceSelector, SummaryResult};
pub use unit_vector::{UnitVector, UnitVectorBuilder};
