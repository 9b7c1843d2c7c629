//! Stage trait definitions for the pipeline.
//!
//! Each trait is one swappable stage boundary. Pipelines are generic over
//! them, so the default stages are statically dispatched; boxed trait
//! objects work as well. Every stage is `Send + Sync` because keyword
//! ranking and summarization may run on different rayon workers.

use crate::keywords::{KeywordStrategy, RakeRanker, TfIdfRanker};
use crate::nlp::{Language, SentenceSegmenter};
use crate::pipeline::artifacts::Document;
use crate::summarizer::{SentenceSelector, SummaryResult};
use crate::types::{Keyword, Sentence};

// ============================================================================
// Segmenter
// ============================================================================

pub trait Segmenter: Send + Sync {
    /// Split normalized text into sentences with consecutive indices
    fn segment(&self, text: &str, language: Language) -> Vec<Sentence>;
}

impl Segmenter for SentenceSegmenter {
    fn segment(&self, text: &str, language: Language) -> Vec<Sentence> {
        self.split(text, language)
    }
}

// ============================================================================
// KeywordRanker
// ============================================================================

/// Ranks keywords over an analyzed document.
///
/// # Contract
///
/// - At most `max_keywords` entries.
/// - No two entries equal after lower-casing.
/// - Descending score, ties in first-occurrence order.
/// - Empty output (never a panic) for empty or stopword-only documents.
pub trait KeywordRanker: Send + Sync {
    fn rank(&self, doc: &Document, max_keywords: usize) -> Vec<Keyword>;
}

impl KeywordRanker for TfIdfRanker {
    fn rank(&self, doc: &Document, max_keywords: usize) -> Vec<Keyword> {
        TfIdfRanker::rank(self, doc, max_keywords)
    }
}

impl KeywordRanker for RakeRanker {
    fn rank(&self, doc: &Document, max_keywords: usize) -> Vec<Keyword> {
        RakeRanker::rank(self, doc, max_keywords)
    }
}

impl KeywordRanker for KeywordStrategy {
    fn rank(&self, doc: &Document, max_keywords: usize) -> Vec<Keyword> {
        KeywordStrategy::rank(self, doc, max_keywords)
    }
}

// ============================================================================
// Summarizer
// ============================================================================

/// Picks summary sentences.
///
/// # Contract
///
/// - Documents with at most `max_sentences` sentences come back whole.
/// - Otherwise exactly `max_sentences` sentences, in document order.
pub trait Summarizer: Send + Sync {
    fn summarize(&self, doc: &Document, max_sentences: usize) -> SummaryResult;
}

impl Summarizer for SentenceSelector {
    fn summarize(&self, doc: &Document, max_sentences: usize) -> SummaryResult {
        self.select(doc, max_sentences)
    }
}

impl<T: Segmenter + ?Sized> Segmenter for Box<T> {
    fn segment(&self, text: &str, language: Language) -> Vec<Sentence> {
        (**self).segment(text, language)
    }
}

impl<T: KeywordRanker + ?Sized> KeywordRanker for Box<T> {
    fn rank(&self, doc: &Document, max_keywords: usize) -> Vec<Keyword> {
        (**self).rank(doc, max_keywords)
    }
}

impl<T: Summarizer + ?Sized> Summarizer for Box<T> {
    fn summarize(&self, doc: &Document, max_sentences: usize) -> SummaryResult {
        (**self).summarize(doc, max_sentences)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::StopwordFilter;
    use std::sync::Arc;

    fn doc(text: &str) -> Document {
        let sentences = SentenceSegmenter::new().segment(text, Language::English);
        Document::from_sentences(sentences, Language::English, Arc::new(StopwordFilter::empty()))
    }

    #[test]
    fn test_strategy_dispatch_matches_rankers() {
        let d = doc("Graphs store nodes. Graphs store edges.");
        assert_eq!(
            KeywordRanker::rank(&KeywordStrategy::TfIdf, &d, 5),
            KeywordRanker::rank(&TfIdfRanker::new(), &d, 5)
        );
        assert_eq!(
            KeywordRanker::rank(&KeywordStrategy::Rake, &d, 5),
            KeywordRanker::rank(&RakeRanker::new(), &d, 5)
        );
    }

    #[test]
    fn test_trait_objects() {
        let ranker: Box<dyn KeywordRanker> = Box::new(KeywordStrategy::TfIdf);
        let summarizer: Box<dyn Summarizer> = Box::new(SentenceSelector::new());
        let d = doc("Cells divide. Cells grow. Cells die.");

        assert!(!ranker.rank(&d, 3).is_empty());
        assert_eq!(summarizer.summarize(&d, 2).sentences.len(), 2);
    }

    #[test]
    fn test_custom_ranker() {
        struct FirstWord;
        impl KeywordRanker for FirstWord {
            fn rank(&self, doc: &Document, _max: usize) -> Vec<Keyword> {
                doc.sentences
                    .first()
                    .and_then(|s| s.text.split_whitespace().next())
                    .map(|w| vec![Keyword::new(w, 1.0, 0)])
                    .unwrap_or_default()
            }
        }
        assert_eq!(FirstWord.rank(&doc("Hello there."), 3)[0].phrase, "Hello");
        assert!(FirstWord.rank(&doc(""), 3).is_empty());
    }
}
