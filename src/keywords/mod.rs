//! Keyword ranking strategies
//!
//! - TF-IDF: single terms weighted by frequency and sentence spread
//! - RAKE: stopword-bounded phrases scored on a co-occurrence graph
//!
//! Both return keywords deduplicated by lower-cased phrase, sorted by
//! descending score with ties in first-occurrence order.

pub mod rake;
pub mod tfidf;

use serde::{Deserialize, Serialize};

use crate::pipeline::artifacts::Document;
use crate::types::Keyword;

pub use rake::RakeRanker;
pub use tfidf::TfIdfRanker;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeywordStrategy {
    #[default]
    #[serde(rename = "tfidf", alias = "tf_idf")]
    TfIdf,
    #[serde(rename = "rake")]
    Rake,
}

impl KeywordStrategy {
    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "rake" | "phrase" | "cooccurrence" => KeywordStrategy::Rake,
            "tfidf" | "tf_idf" | "tf-idf" | "frequency" => KeywordStrategy::TfIdf,
            _ => {
                #[cfg(feature = "tracing")]
                tracing::warn!(strategy = value, "unknown keyword strategy, using tfidf");
                KeywordStrategy::TfIdf
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            KeywordStrategy::TfIdf => "tfidf",
            KeywordStrategy::Rake => "rake",
        }
    }

    /// Run this strategy over an analyzed document
    pub fn rank(&self, doc: &Document, max_keywords: usize) -> Vec<Keyword> {
        match self {
            KeywordStrategy::TfIdf => TfIdfRanker::new().rank(doc, max_keywords),
            KeywordStrategy::Rake => RakeRanker::new().rank(doc, max_keywords),
        }
    }
}

impl std::str::FromStr for KeywordStrategy {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Ok(KeywordStrategy::parse(value))
    }
}

impl std::fmt::Display for KeywordStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descending score, then ascending first occurrence
pub(crate) fn sort_keywords(keywords: &mut [Keyword]) {
    keywords.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then(a.first_occurrence.cmp(&b.first_occurrence))
    });
}
