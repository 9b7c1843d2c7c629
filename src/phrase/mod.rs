//! Phrase extraction components
//!
//! Stopword-bounded candidate phrases for co-occurrence scoring.

pub mod chunker;

pub use chunker::{ChunkerConfig, PhraseChunker, PhraseSpan};
