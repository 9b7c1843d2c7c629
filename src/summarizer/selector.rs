//! Sentence selection for extractive summaries
//!
//! With `lambda = 1` sentences are picked purely by salience (mean tf-idf
//! weight). Lower values switch to Maximal Marginal Relevance, trading
//! salience for diversity against the sentences already picked.

use super::unit_vector::{UnitVector, UnitVectorBuilder};
use crate::pipeline::artifacts::Document;
use crate::types::Sentence;

/// Configuration for sentence selection
#[derive(Debug, Clone)]
pub struct SelectorConfig {
    /// MMR trade-off (0 = diversity only, 1 = salience only)
    pub lambda: f64,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self { lambda: 1.0 }
    }
}

/// Result of sentence selection
#[derive(Debug, Clone, Default)]
pub struct SummaryResult {
    /// Selected sentences in document order
    pub sentences: Vec<SelectedSentence>,
    /// Sum of the selected salience scores
    pub relevance_score: f64,
}

impl SummaryResult {
    /// The summary text: selected sentences joined by single spaces
    pub fn text(&self) -> String {
        self.sentences
            .iter()
            .map(|s| s.sentence.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn indices(&self) -> Vec<usize> {
        self.sentences.iter().map(|s| s.sentence.index).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

/// A selected sentence with its score
#[derive(Debug, Clone)]
pub struct SelectedSentence {
    pub sentence: Sentence,
    pub salience: f64,
}

/// Salience / MMR sentence selector
#[derive(Debug, Clone, Default)]
pub struct SentenceSelector {
    config: SelectorConfig,
}

impl SentenceSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SelectorConfig) -> Self {
        Self { config }
    }

    /// Set lambda (salience vs diversity trade-off), clamped to [0, 1]
    pub fn with_lambda(mut self, lambda: f64) -> Self {
        self.config.lambda = lambda.clamp(0.0, 1.0);
        self
    }

    pub fn lambda(&self) -> f64 {
        self.config.lambda
    }

    /// Select up to `num_sentences` sentences, returned in document order.
    ///
    /// A document with at most `num_sentences` sentences is returned whole.
    pub fn select(&self, doc: &Document, num_sentences: usize) -> SummaryResult {
        let sentences = &doc.sentences;
        if sentences.len() <= num_sentences {
            return SummaryResult {
                sentences: sentences
                    .iter()
                    .map(|s| SelectedSentence {
                        sentence: s.clone(),
                        salience: 0.0,
                    })
                    .collect(),
                relevance_score: 0.0,
            };
        }

        let builder = UnitVectorBuilder::new(&doc.terms);
        let vectors = builder.build_all();
        let salience: Vec<f64> = vectors.iter().map(|v| builder.salience(v)).collect();

        let mut picked = if self.config.lambda >= 1.0 {
            top_by_salience(&salience, num_sentences)
        } else {
            self.mmr(&vectors, &salience, num_sentences)
        };
        picked.sort_unstable();

        let selected: Vec<SelectedSentence> = picked
            .into_iter()
            .map(|i| SelectedSentence {
                sentence: sentences[i].clone(),
                salience: salience[i],
            })
            .collect();
        let relevance_score = selected.iter().map(|s| s.salience).sum();

        SummaryResult {
            sentences: selected,
            relevance_score,
        }
    }

    /// MMR: λ * relevance - (1 - λ) * max similarity to the picked set.
    /// Relevance is salience scaled into [0, 1].
    fn mmr(&self, vectors: &[UnitVector], salience: &[f64], n: usize) -> Vec<usize> {
        let lambda = self.config.lambda;
        let max_salience = salience.iter().copied().fold(0.0, f64::max);
        let relevance: Vec<f64> = salience
            .iter()
            .map(|&s| if max_salience > 0.0 { s / max_salience } else { 0.0 })
            .collect();

        let mut picked: Vec<usize> = Vec::with_capacity(n);
        let mut taken = vec![false; vectors.len()];

        while picked.len() < n {
            let mut best: Option<(usize, f64)> = None;
            for i in 0..vectors.len() {
                if taken[i] {
                    continue;
                }
                let max_sim = picked
                    .iter()
                    .map(|&j| vectors[i].cosine_similarity(&vectors[j]))
                    .fold(0.0, f64::max);
                let score = lambda * relevance[i] - (1.0 - lambda) * max_sim;
                // Strict comparison keeps the lower index on ties.
                if best.map_or(true, |(_, b)| score > b) {
                    best = Some((i, score));
                }
            }
            match best {
                Some((i, _)) => {
                    taken[i] = true;
                    picked.push(i);
                }
                None => break,
            }
        }
        picked
    }
}

/// Indices of the `n` highest scores, lower index first on ties
fn top_by_salience(salience: &[f64], n: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..salience.len()).collect();
    order.sort_by(|&a, &b| salience[b].total_cmp(&salience[a]).then(a.cmp(&b)));
    order.truncate(n);
    order
}
