//! Unit vector representation for sentences
//!
//! Each sentence becomes a sparse tf-idf vector over the document
//! vocabulary, l2-normalized. Weights come from one [`TermStatistics`]
//! pass, so terms common to many sentences are discounted everywhere.

use crate::pipeline::artifacts::{TermId, TermStatistics};

/// A sparse unit vector
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnitVector {
    /// Non-zero dimensions sorted by term id
    pub dimensions: Vec<(TermId, f64)>,
    /// L2 norm before normalization
    pub norm: f64,
}

impl UnitVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize raw weights. Zero weights are dropped.
    pub fn from_dimensions(mut dimensions: Vec<(TermId, f64)>) -> Self {
        dimensions.retain(|&(_, w)| w != 0.0);
        dimensions.sort_unstable_by_key(|&(id, _)| id);
        let norm = dimensions.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in dimensions.iter_mut() {
                *w /= norm;
            }
        }
        Self { dimensions, norm }
    }

    /// Dot product of two unit vectors (merge over sorted ids)
    pub fn cosine_similarity(&self, other: &UnitVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut dot = 0.0;
        while i < self.dimensions.len() && j < other.dimensions.len() {
            let (a, wa) = self.dimensions[i];
            let (b, wb) = other.dimensions[j];
            match a.cmp(&b) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    dot += wa * wb;
                    i += 1;
                    j += 1;
                }
            }
        }
        dot
    }

    /// Sum of all weights
    pub fn mass(&self) -> f64 {
        self.dimensions.iter().map(|(_, w)| w).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }
}

/// Builds sentence vectors from precomputed term statistics
pub struct UnitVectorBuilder<'a> {
    stats: &'a TermStatistics,
}

impl<'a> UnitVectorBuilder<'a> {
    pub fn new(stats: &'a TermStatistics) -> Self {
        Self { stats }
    }

    /// tf-idf vector of one sentence
    pub fn build_sentence_vector(&self, sentence: usize) -> UnitVector {
        let dimensions = self
            .stats
            .sentence_terms(sentence)
            .iter()
            .map(|&(id, count)| (id, count as f64 * self.stats.idf(id)))
            .collect();
        UnitVector::from_dimensions(dimensions)
    }

    /// Vectors for every sentence, in order
    pub fn build_all(&self) -> Vec<UnitVector> {
        (0..self.stats.num_sentences())
            .map(|i| self.build_sentence_vector(i))
            .collect()
    }

    /// Mean weight of a sentence vector over the whole vocabulary
    pub fn salience(&self, vector: &UnitVector) -> f64 {
        if self.stats.is_empty() {
            return 0.0;
        }
        vector.mass() / self.stats.len() as f64
    }
}
