//! Stopword filtering
//!
//! Stopword lists come from the `stop-words` crate, with hand-picked lists
//! for Chinese and Japanese. Filters are built once per language by the
//! [`LanguageRegistry`](super::language::LanguageRegistry) and shared
//! read-only afterwards.

use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};

use super::language::Language;

/// A closed set of lower-cased stopwords
#[derive(Debug, Clone, Default)]
pub struct StopwordFilter {
    stopwords: FxHashSet<String>,
}

impl StopwordFilter {
    /// Build the filter for a supported language
    pub fn new(language: Language) -> Self {
        Self {
            stopwords: Self::load_stopwords(language),
        }
    }

    /// Create an empty filter (no filtering)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a filter from a custom list
    pub fn from_list(words: &[&str]) -> Self {
        Self {
            stopwords: words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// Add additional stopwords
    pub fn add_stopwords(&mut self, words: &[&str]) {
        for word in words {
            self.stopwords.insert(word.to_lowercase());
        }
    }

    /// Check if a word is a stopword (case-insensitive)
    pub fn is_stopword(&self, word: &str) -> bool {
        if self.stopwords.contains(word) {
            return true;
        }
        word.chars().any(char::is_uppercase) && self.stopwords.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }

    fn load_stopwords(language: Language) -> FxHashSet<String> {
        let lang = match language {
            Language::English => LANGUAGE::English,
            Language::German => LANGUAGE::German,
            Language::French => LANGUAGE::French,
            Language::Spanish => LANGUAGE::Spanish,
            Language::Italian => LANGUAGE::Italian,
            Language::Portuguese => LANGUAGE::Portuguese,
            Language::Dutch => LANGUAGE::Dutch,
            Language::Russian => LANGUAGE::Russian,
            Language::Swedish => LANGUAGE::Swedish,
            Language::Norwegian => LANGUAGE::Norwegian,
            Language::Danish => LANGUAGE::Danish,
            Language::Finnish => LANGUAGE::Finnish,
            Language::Hungarian => LANGUAGE::Hungarian,
            Language::Turkish => LANGUAGE::Turkish,
            Language::Polish => LANGUAGE::Polish,
            Language::Arabic => LANGUAGE::Arabic,
            Language::Chinese => return Self::chinese_stopwords(),
            Language::Japanese => return Self::japanese_stopwords(),
        };

        get(lang).iter().map(|s| s.to_lowercase()).collect()
    }

    fn chinese_stopwords() -> FxHashSet<String> {
        [
            "的", "是", "在", "有", "和", "与", "或", "不", "了", "也", "就", "都", "而", "及",
            "这", "那", "个", "为", "以", "等", "但", "被", "给", "让", "把", "从", "到", "对",
            "将", "于", "能", "会", "可", "要", "很", "还", "更", "最", "只", "已", "又", "再",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    fn japanese_stopwords() -> FxHashSet<String> {
        [
            "の", "に", "は", "を", "た", "が", "で", "て", "と", "し", "れ", "さ", "ある",
            "いる", "も", "する", "から", "な", "こと", "として", "い", "や", "など", "なっ",
            "ない", "この", "ため", "その", "あっ", "よう", "また", "もの", "という", "あり",
            "まで", "られ", "なる", "へ", "か", "だ", "これ", "によって", "により", "おり",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_stopwords() {
        let filter = StopwordFilter::new(Language::English);

        assert!(filter.is_stopword("the"));
        assert!(filter.is_stopword("The"));
        assert!(filter.is_stopword("is"));
        assert!(!filter.is_stopword("photosynthesis"));
        assert!(!filter.is_stopword("chlorophyll"));
    }

    #[test]
    fn test_french_stopwords() {
        let filter = StopwordFilter::new(Language::French);

        assert!(filter.is_stopword("le"));
        assert!(filter.is_stopword("Les"));
        assert!(filter.is_stopword("dans"));
        assert!(!filter.is_stopword("chat"));
    }

    #[test]
    fn test_custom_stopwords() {
        let mut filter = StopwordFilter::from_list(&["Chapter", "section"]);

        assert!(filter.is_stopword("chapter"));
        assert!(filter.is_stopword("SECTION"));
        assert!(!filter.is_stopword("the"));

        filter.add_stopwords(&["figure"]);
        assert!(filter.is_stopword("Figure"));
    }

    #[test]
    fn test_empty_filter() {
        let filter = StopwordFilter::empty();

        assert!(!filter.is_stopword("the"));
        assert!(filter.is_empty());
    }

    #[test]
    fn test_cjk_stopwords() {
        assert!(StopwordFilter::new(Language::Chinese).is_stopword("的"));
        assert!(StopwordFilter::new(Language::Japanese).is_stopword("の"));
        assert!(!StopwordFilter::new(Language::Japanese).is_stopword("機械"));
    }
}
