//! Pipeline artifacts shared between stages.
//!
//! [`Document`] is the analyzed input: normalized text, its sentences and
//! the [`TermStatistics`] computed once over the whole sentence set. The
//! keyword ranker and the summarizer both read it without mutating it, so
//! they can run side by side.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::nlp::tokenizer::{is_candidate_term, tokenize};
use crate::nlp::{Language, StopwordFilter};
use crate::types::Sentence;

/// Interned term identifier, assigned in order of first appearance
pub type TermId = u32;

/// Vocabulary entry for one lower-cased term
#[derive(Debug, Clone, PartialEq)]
pub struct TermEntry {
    /// Lower-cased form used for matching and deduplication
    pub key: String,
    /// Display form: the most frequent surface form, earliest on ties
    pub surface: String,
    /// Occurrences across the whole document
    pub count: usize,
    /// Number of sentences containing the term
    pub sentence_freq: usize,
}

/// Term counts per sentence plus document-level frequencies
#[derive(Debug, Clone, Default)]
pub struct TermStatistics {
    key_to_id: FxHashMap<String, TermId>,
    entries: Vec<TermEntry>,
    /// Per sentence: (term, count) pairs sorted by term id
    sentence_terms: Vec<Vec<(TermId, usize)>>,
}

impl TermStatistics {
    /// Count candidate terms (3+ chars, not a stopword) in every sentence
    pub fn build(sentences: &[Sentence], stopwords: &StopwordFilter) -> Self {
        let mut key_to_id: FxHashMap<String, TermId> = FxHashMap::default();
        let mut entries: Vec<TermEntry> = Vec::new();
        let mut surfaces: Vec<Vec<(String, usize)>> = Vec::new();
        let mut sentence_terms = Vec::with_capacity(sentences.len());

        for sentence in sentences {
            let mut counts: FxHashMap<TermId, usize> = FxHashMap::default();

            for token in tokenize(&sentence.text).into_iter().filter(|t| t.is_word()) {
                if !is_candidate_term(token.text) || stopwords.is_stopword(token.text) {
                    continue;
                }
                let key = token.text.to_lowercase();
                let id = match key_to_id.get(&key) {
                    Some(&id) => id,
                    None => {
                        let id = entries.len() as TermId;
                        key_to_id.insert(key.clone(), id);
                        entries.push(TermEntry {
                            key,
                            surface: String::new(),
                            count: 0,
                            sentence_freq: 0,
                        });
                        surfaces.push(Vec::new());
                        id
                    }
                };

                entries[id as usize].count += 1;
                *counts.entry(id).or_insert(0) += 1;

                let forms = &mut surfaces[id as usize];
                match forms.iter_mut().find(|(form, _)| form == token.text) {
                    Some((_, n)) => *n += 1,
                    None => forms.push((token.text.to_string(), 1)),
                }
            }

            let mut terms: Vec<(TermId, usize)> = counts.into_iter().collect();
            terms.sort_unstable_by_key(|&(id, _)| id);
            for &(id, _) in &terms {
                entries[id as usize].sentence_freq += 1;
            }
            sentence_terms.push(terms);
        }

        for (entry, forms) in entries.iter_mut().zip(surfaces) {
            // Earliest form wins ties because max_by_key keeps the last max.
            if let Some((form, _)) = forms
                .into_iter()
                .rev()
                .max_by_key(|(_, n)| *n)
            {
                entry.surface = form;
            }
        }

        Self {
            key_to_id,
            entries,
            sentence_terms,
        }
    }

    /// Number of distinct terms
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn num_sentences(&self) -> usize {
        self.sentence_terms.len()
    }

    pub fn entries(&self) -> &[TermEntry] {
        &self.entries
    }

    pub fn entry(&self, id: TermId) -> Option<&TermEntry> {
        self.entries.get(id as usize)
    }

    /// Look up a term by its lower-cased key
    pub fn id(&self, key: &str) -> Option<TermId> {
        self.key_to_id.get(key).copied()
    }

    /// (term, count) pairs of one sentence, sorted by term id
    pub fn sentence_terms(&self, sentence: usize) -> &[(TermId, usize)] {
        self.sentence_terms
            .get(sentence)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Smoothed inverse sentence frequency: `ln((1 + n) / (1 + df)) + 1`
    pub fn idf(&self, id: TermId) -> f64 {
        let n = self.num_sentences() as f64;
        let df = self.entry(id).map_or(0, |e| e.sentence_freq) as f64;
        ((1.0 + n) / (1.0 + df)).ln() + 1.0
    }
}

/// The analyzed input shared by every downstream stage
#[derive(Debug, Clone)]
pub struct Document {
    /// Normalized text
    pub text: String,
    pub language: Language,
    pub stopwords: Arc<StopwordFilter>,
    pub sentences: Vec<Sentence>,
    pub terms: TermStatistics,
}

impl Document {
    /// Build a document from already segmented sentences
    pub fn from_sentences(
        sentences: Vec<Sentence>,
        language: Language,
        stopwords: Arc<StopwordFilter>,
    ) -> Self {
        let text = sentences
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let terms = TermStatistics::build(&sentences, &stopwords);
        Self {
            text,
            language,
            stopwords,
            sentences,
            terms,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentences(texts: &[&str]) -> Vec<Sentence> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| Sentence::new(*t, i))
            .collect()
    }

    #[test]
    fn test_counts_and_sentence_frequency() {
        let stopwords = StopwordFilter::new(Language::French);
        let stats = TermStatistics::build(
            &sentences(&["Le chat mange le chat.", "Le chat dort."]),
            &stopwords,
        );

        let chat = stats.id("chat").unwrap();
        assert_eq!(stats.entry(chat).unwrap().count, 3);
        assert_eq!(stats.entry(chat).unwrap().sentence_freq, 2);
        assert!(stats.id("le").is_none());
        assert_eq!(stats.sentence_terms(0)[0], (chat, 2));
    }

    #[test]
    fn test_idf_discounts_common_terms() {
        let stopwords = StopwordFilter::empty();
        let stats = TermStatistics::build(
            &sentences(&["cell wall", "cell membrane", "cell nucleus"]),
            &stopwords,
        );
        let cell = stats.id("cell").unwrap();
        let wall = stats.id("wall").unwrap();
        assert!((stats.idf(cell) - 1.0).abs() < 1e-12);
        assert!(stats.idf(wall) > stats.idf(cell));
    }

    #[test]
    fn test_surface_form_prefers_most_frequent() {
        let stopwords = StopwordFilter::empty();
        let stats = TermStatistics::build(
            &sentences(&["Python rocks", "python python", "PYTHON"]),
            &stopwords,
        );
        let id = stats.id("python").unwrap();
        assert_eq!(stats.entry(id).unwrap().surface, "python");
        assert_eq!(stats.len(), 2);
    }

    #[test]
    fn test_surface_form_tie_keeps_earliest() {
        let stats = TermStatistics::build(
            &sentences(&["Mitosis then mitosis"]),
            &StopwordFilter::empty(),
        );
        let id = stats.id("mitosis").unwrap();
        assert_eq!(stats.entry(id).unwrap().surface, "Mitosis");
    }

    #[test]
    fn test_short_and_numeric_tokens_are_skipped() {
        let stats =
            TermStatistics::build(&sentences(&["In 2024 an AI won"]), &StopwordFilter::empty());
        assert!(stats.id("2024").is_none());
        assert!(stats.id("ai").is_none());
        assert!(stats.id("won").is_some());
    }

    #[test]
    fn test_document_from_sentences() {
        let doc = Document::from_sentences(
            sentences(&["First one.", "Second one."]),
            Language::English,
            Arc::new(StopwordFilter::empty()),
        );
        assert_eq!(doc.text, "First one. Second one.");
        assert_eq!(doc.terms.num_sentences(), 2);
        assert!(!doc.is_empty());
    }
}
