//! Frequency-weighted keyword scoring
//!
//! Each candidate term scores `count * idf`, where idf is computed over
//! sentences so that terms spread across the whole document are
//! discounted. Scores are l2-normalized over the vocabulary.

use crate::pipeline::artifacts::Document;
use crate::types::Keyword;

use super::sort_keywords;

#[derive(Debug, Clone, Copy, Default)]
pub struct TfIdfRanker;

impl TfIdfRanker {
    pub fn new() -> Self {
        Self
    }

    /// Rank single-word terms, best first, at most `max_keywords`
    pub fn rank(&self, doc: &Document, max_keywords: usize) -> Vec<Keyword> {
        let stats = &doc.terms;
        if stats.is_empty() || max_keywords == 0 {
            return Vec::new();
        }

        let raw: Vec<f64> = stats
            .entries()
            .iter()
            .enumerate()
            .map(|(id, entry)| entry.count as f64 * stats.idf(id as u32))
            .collect();
        let norm = raw.iter().map(|s| s * s).sum::<f64>().sqrt();

        // Term ids follow first appearance, so they double as the
        // first-occurrence rank.
        let mut keywords: Vec<Keyword> = stats
            .entries()
            .iter()
            .zip(raw)
            .enumerate()
            .map(|(id, (entry, score))| {
                let score = if norm > 0.0 { score / norm } else { 0.0 };
                Keyword::new(entry.surface.clone(), score, id)
            })
            .collect();

        sort_keywords(&mut keywords);
        keywords.truncate(max_keywords);
        keywords
    }
}
