//! Sentence segmentation
//!
//! A sentence ends at `.`, `!` or `?` when the punctuation is followed by
//! whitespace and then an upper-case letter (accented capitals included).
//! Requiring the capital keeps decimals ("3.14"), lower-case continuations
//! and most abbreviations inside their sentence; a per-language list of
//! titles ("Dr.", "Mme.") covers the rest.
//!
//! When that split yields at most one piece for a long text, the text is
//! re-split on secondary delimiters (`;`, `: `, ` - `) so callers never get
//! a single oversized "sentence".

use super::language::Language;
use crate::types::Sentence;

/// Configuration for sentence segmentation
#[derive(Debug, Clone)]
pub struct SegmenterConfig {
    /// Character count above which a single-sentence text is re-split
    pub fallback_threshold: usize,
    /// Minimum characters a trimmed sentence needs to be kept
    pub min_chars: usize,
    /// Whether known abbreviations suppress a boundary
    pub use_abbreviations: bool,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            fallback_threshold: 500,
            min_chars: 2,
            use_abbreviations: true,
        }
    }
}

/// Rule-based sentence segmenter. Stateless between calls.
#[derive(Debug, Clone, Default)]
pub struct SentenceSegmenter {
    config: SegmenterConfig,
}

impl SentenceSegmenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SegmenterConfig) -> Self {
        Self { config }
    }

    /// Set the fallback re-split threshold
    pub fn with_fallback_threshold(mut self, chars: usize) -> Self {
        self.config.fallback_threshold = chars;
        self
    }

    /// Split normalized text into ordered sentences
    pub fn split(&self, text: &str, language: Language) -> Vec<Sentence> {
        let abbreviations: &[&str] = if self.config.use_abbreviations {
            language.abbreviations()
        } else {
            &[]
        };

        let mut pieces = primary_split(text, abbreviations);
        if pieces.len() <= 1 && text.chars().count() > self.config.fallback_threshold {
            pieces = secondary_split(text);
        }

        pieces
            .into_iter()
            .map(str::trim)
            .filter(|p| p.chars().count() >= self.config.min_chars)
            .enumerate()
            .map(|(index, p)| Sentence::new(p, index))
            .collect()
    }
}

fn is_terminal(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

/// Whether the word right before a period is a known abbreviation.
///
/// Single letters only count as initials or titles when upper-case ("M."),
/// so units and markers like "5 m." or "p." still end a sentence.
fn ends_with_abbreviation(piece: &str, abbreviations: &[&str]) -> bool {
    if abbreviations.is_empty() {
        return false;
    }
    let word = piece
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or("")
        .trim_start_matches(|c: char| !c.is_alphanumeric());
    let mut chars = word.chars();
    if let (Some(only), None) = (chars.next(), chars.next()) {
        if !only.is_uppercase() {
            return false;
        }
    }
    let last = word.to_lowercase();
    !last.is_empty() && abbreviations.contains(&last.as_str())
}

fn primary_split<'a>(text: &'a str, abbreviations: &[&str]) -> Vec<&'a str> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        let (pos, c) = chars[i];
        if is_terminal(c) {
            let mut j = i + 1;
            while j < chars.len() && chars[j].1.is_whitespace() {
                j += 1;
            }
            let boundary = j > i + 1
                && j < chars.len()
                && chars[j].1.is_uppercase()
                && !(c == '.' && ends_with_abbreviation(&text[start..pos], abbreviations));
            if boundary {
                pieces.push(&text[start..pos + c.len_utf8()]);
                start = chars[j].0;
                i = j;
                continue;
            }
        }
        i += 1;
    }
    pieces.push(&text[start..]);
    pieces
}

/// Split on `;`, `:` followed by whitespace, or ` - `
fn secondary_split(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let (hit, width) = match bytes[i] {
            b';' => (true, 1),
            b':' => {
                let next_is_space = text[i + 1..]
                    .chars()
                    .next()
                    .is_some_and(char::is_whitespace);
                (next_is_space, 1)
            }
            b' ' if bytes[i..].starts_with(b" - ") => (true, 3),
            _ => (false, 1),
        };
        if hit {
            pieces.push(&text[start..i]);
            i += width;
            start = i;
        } else {
            i += 1;
        }
    }
    pieces.push(&text[start..]);
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(sentences: &[Sentence]) -> Vec<&str> {
        sentences.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn test_basic_split() {
        let seg = SentenceSegmenter::new();
        let sentences = seg.split(
            "Rust is fast. Is it safe? Yes! It is.",
            Language::English,
        );
        assert_eq!(
            texts(&sentences),
            vec!["Rust is fast.", "Is it safe?", "Yes!", "It is."]
        );
        let indices: Vec<_> = sentences.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_no_split_before_lowercase_or_digits() {
        let seg = SentenceSegmenter::new();
        let sentences = seg.split(
            "Pi is about 3.14 and e is 2.71. then we stop. See 2. Done.",
            Language::English,
        );
        assert_eq!(
            texts(&sentences),
            vec![
                "Pi is about 3.14 and e is 2.71. then we stop.",
                "See 2.",
                "Done.",
            ]
        );
    }

    #[test]
    fn test_accented_capitals_start_sentences() {
        let seg = SentenceSegmenter::new();
        let sentences = seg.split(
            "La cellule se divise. Énergie et matière sont liées. À retenir.",
            Language::French,
        );
        assert_eq!(sentences.len(), 3);
        assert_eq!(sentences[1].text, "Énergie et matière sont liées.");
    }

    #[test]
    fn test_abbreviations_do_not_split() {
        let seg = SentenceSegmenter::new();
        let sentences = seg.split(
            "We met Dr. Watson at noon. He was late.",
            Language::English,
        );
        assert_eq!(
            texts(&sentences),
            vec!["We met Dr. Watson at noon.", "He was late."]
        );

        let fr = seg.split("M. Dupont enseigne. Il explique.", Language::French);
        assert_eq!(fr.len(), 2);
    }

    #[test]
    fn test_lowercase_single_letters_still_end_sentences() {
        let seg = SentenceSegmenter::new();
        let sentences = seg.split(
            "La table mesure 5 m. Ensuite on mesure la chaise. Voir p. Suivant.",
            Language::French,
        );
        assert_eq!(
            texts(&sentences),
            vec![
                "La table mesure 5 m.",
                "Ensuite on mesure la chaise.",
                "Voir p.",
                "Suivant.",
            ]
        );
    }

    #[test]
    fn test_fallback_on_long_single_sentence() {
        let seg = SentenceSegmenter::new().with_fallback_threshold(40);
        let text = "first clause about cells; second clause about energy: third part - fourth part";
        let sentences = seg.split(text, Language::English);
        assert_eq!(
            texts(&sentences),
            vec![
                "first clause about cells",
                "second clause about energy",
                "third part",
                "fourth part",
            ]
        );
    }

    #[test]
    fn test_fallback_not_used_for_short_text() {
        let seg = SentenceSegmenter::new();
        let sentences = seg.split("a; b; c", Language::English);
        assert_eq!(texts(&sentences), vec!["a; b; c"]);
    }

    #[test]
    fn test_discards_tiny_fragments() {
        let seg = SentenceSegmenter::new().with_fallback_threshold(10);
        let sentences = seg.split("x; ab; y; long enough piece", Language::English);
        assert_eq!(texts(&sentences), vec!["ab", "long enough piece"]);
        assert_eq!(sentences[1].index, 1);
    }

    #[test]
    fn test_empty_input() {
        let seg = SentenceSegmenter::new();
        assert!(seg.split("", Language::English).is_empty());
        assert!(seg.split(" ", Language::English).is_empty());
    }

    #[test]
    fn test_deterministic() {
        let seg = SentenceSegmenter::new();
        let text = "One fish. Two fish. Red fish! Blue fish?";
        assert_eq!(
            seg.split(text, Language::English),
            seg.split(text, Language::English)
        );
    }
}
