//! Phrase co-occurrence scoring (RAKE)
//!
//! Candidate phrases are stopword-bounded runs of words. Every word gets
//! `degree / frequency` from the co-occurrence graph of those phrases, and
//! a phrase scores the sum of its word scores.

use rustc_hash::FxHashSet;

use crate::graph::CooccurrenceGraph;
use crate::phrase::PhraseChunker;
use crate::pipeline::artifacts::Document;
use crate::types::Keyword;

use super::sort_keywords;

/// Longest phrase kept, in words
pub const MAX_PHRASE_WORDS: usize = 4;
/// Phrases must be longer than this many characters
pub const MIN_PHRASE_CHARS: usize = 2;

#[derive(Debug, Clone, Default)]
pub struct RakeRanker {
    chunker: PhraseChunker,
}

impl RakeRanker {
    pub fn new() -> Self {
        Self {
            // every run feeds the graph; length limits apply after ranking
            chunker: PhraseChunker::new().with_max_length(None).with_min_chars(1),
        }
    }

    /// Rank phrases, best first, at most `max_keywords`
    pub fn rank(&self, doc: &Document, max_keywords: usize) -> Vec<Keyword> {
        if doc.is_empty() || max_keywords == 0 {
            return Vec::new();
        }

        let chunks = self.chunker.extract_chunks(&doc.sentences, &doc.stopwords);
        if chunks.is_empty() {
            return Vec::new();
        }

        let keys: Vec<Vec<String>> = chunks.iter().map(|c| c.keys()).collect();
        let graph = CooccurrenceGraph::from_phrases(&keys);

        // One candidate per lower-cased phrase. Every occurrence of a key
        // scores the same, so the first surface form is kept.
        let mut seen: FxHashSet<String> = FxHashSet::default();
        let mut candidates: Vec<Keyword> = Vec::new();
        for (chunk, words) in chunks.iter().zip(&keys) {
            if !seen.insert(words.join(" ")) {
                continue;
            }
            let score: f64 = words.iter().map(|w| graph.word_score(w)).sum();
            candidates.push(Keyword::new(chunk.text(), score, candidates.len()));
        }

        sort_keywords(&mut candidates);
        candidates.truncate(max_keywords.saturating_mul(2));
        candidates.retain(|k| {
            let tokens = k.token_count();
            (1..=MAX_PHRASE_WORDS).contains(&tokens) && k.phrase.chars().count() > MIN_PHRASE_CHARS
        });
        candidates.truncate(max_keywords);
        candidates
    }
}
