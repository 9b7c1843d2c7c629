//! Natural Language Processing components
//!
//! Normalization, sentence segmentation, tokenization, stopword filtering
//! and the shared per-language resources.

pub mod language;
pub mod normalize;
pub mod segmenter;
pub mod stopwords;
pub mod tokenizer;

pub use language::{Language, LanguageRegistry, FALLBACK_LANGUAGE};
pub use normalize::normalize;
pub use segmenter::{SegmenterConfig, SentenceSegmenter};
pub use stopwords::StopwordFilter;
