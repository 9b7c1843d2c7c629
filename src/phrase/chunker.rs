//! Candidate phrase detection
//!
//! A candidate phrase is a maximal run of content words inside one
//! sentence. Stopwords and punctuation boundaries break runs; runs longer
//! than the configured maximum (if any) are dropped rather than split.

use crate::nlp::tokenizer::tokenize;
use crate::nlp::StopwordFilter;
use crate::types::Sentence;

/// Configuration for candidate phrase detection
#[derive(Debug, Clone)]
pub struct ChunkerConfig {
    /// Minimum number of words in a phrase
    pub min_length: usize,
    /// Maximum number of words in a phrase; `None` keeps runs of any length
    pub max_length: Option<usize>,
    /// Minimum characters in the joined phrase
    pub min_chars: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            min_length: 1,
            max_length: Some(4),
            min_chars: 3,
        }
    }
}

/// One occurrence of a candidate phrase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseSpan {
    /// Words as they appear in the text
    pub words: Vec<String>,
    pub sentence_idx: usize,
    /// Byte offset of the first word in the sentence
    pub start: usize,
}

impl PhraseSpan {
    /// Display text, words joined by single spaces
    pub fn text(&self) -> String {
        self.words.join(" ")
    }

    /// Lower-cased words, as used for graph nodes
    pub fn keys(&self) -> Vec<String> {
        self.words.iter().map(|w| w.to_lowercase()).collect()
    }
}

/// Stopword-bounded phrase chunker
#[derive(Debug, Clone, Default)]
pub struct PhraseChunker {
    config: ChunkerConfig,
}

impl PhraseChunker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ChunkerConfig) -> Self {
        Self { config }
    }

    pub fn with_max_length(mut self, max_length: impl Into<Option<usize>>) -> Self {
        self.config.max_length = max_length.into();
        self
    }

    pub fn with_min_chars(mut self, min_chars: usize) -> Self {
        self.config.min_chars = min_chars;
        self
    }

    /// Extract candidate phrases from every sentence, in text order
    pub fn extract_chunks(
        &self,
        sentences: &[Sentence],
        stopwords: &StopwordFilter,
    ) -> Vec<PhraseSpan> {
        let mut chunks = Vec::new();
        for sentence in sentences {
            self.extract_from_sentence(sentence, stopwords, &mut chunks);
        }
        chunks
    }

    fn extract_from_sentence(
        &self,
        sentence: &Sentence,
        stopwords: &StopwordFilter,
        chunks: &mut Vec<PhraseSpan>,
    ) {
        let mut current: Vec<String> = Vec::new();
        let mut start = 0;

        for token in tokenize(&sentence.text) {
            let breaks = !token.is_word()
                || stopwords.is_stopword(token.text)
                || !token.text.chars().any(char::is_alphabetic);
            if breaks {
                self.flush(&mut current, sentence.index, start, chunks);
                continue;
            }
            if current.is_empty() {
                start = token.start;
            }
            current.push(token.text.to_string());
        }
        self.flush(&mut current, sentence.index, start, chunks);
    }

    fn flush(
        &self,
        current: &mut Vec<String>,
        sentence_idx: usize,
        start: usize,
        chunks: &mut Vec<PhraseSpan>,
    ) {
        if current.is_empty() {
            return;
        }
        let words = std::mem::take(current);
        let len = words.len();
        let chars = words.iter().map(|w| w.chars().count()).sum::<usize>() + len - 1;
        if len >= self.config.min_length
            && self.config.max_length.map_or(true, |max| len <= max)
            && chars >= self.config.min_chars
        {
            chunks.push(PhraseSpan {
                words,
                sentence_idx,
                start,
            });
        }
    }
}
