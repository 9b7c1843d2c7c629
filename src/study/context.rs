//! Case-insensitive matching against sentence text.
//!
//! Lower-casing can change byte lengths ("İ" folds to two chars), so
//! matching runs on a folded copy that remembers which original char each
//! folded byte came from. Match ranges always map back to whole original
//! chars.

use std::ops::Range;

use crate::types::Sentence;

/// Blank marker used in cloze prompts
pub const BLANK: &str = "____";

#[derive(Debug, Clone, Copy)]
struct FoldSpan {
    /// Byte offset of this char's fold in the folded text
    folded: usize,
    /// Byte range of the char in the original text
    start: usize,
    end: usize,
}

#[derive(Debug)]
struct Folded {
    text: String,
    spans: Vec<FoldSpan>,
}

impl Folded {
    fn new(original: &str) -> Self {
        let mut text = String::with_capacity(original.len());
        let mut spans = Vec::with_capacity(original.len());
        for (start, c) in original.char_indices() {
            spans.push(FoldSpan {
                folded: text.len(),
                start,
                end: start + c.len_utf8(),
            });
            text.extend(c.to_lowercase());
        }
        Self { text, spans }
    }

    /// Original byte range of a folded match, if it covers whole chars
    fn original_range(&self, folded_start: usize, folded_end: usize) -> Option<Range<usize>> {
        let first = self
            .spans
            .binary_search_by_key(&folded_start, |s| s.folded)
            .ok()?;
        let past_last = if folded_end == self.text.len() {
            self.spans.len()
        } else {
            self.spans
                .binary_search_by_key(&folded_end, |s| s.folded)
                .ok()?
        };
        if past_last <= first {
            return None;
        }
        Some(self.spans[first].start..self.spans[past_last - 1].end)
    }
}

fn fold(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// Byte ranges of every non-overlapping case-insensitive match, left to
/// right. An empty needle never matches.
pub fn find_all_ci(haystack: &str, needle: &str) -> Vec<Range<usize>> {
    let needle = fold(needle);
    if needle.is_empty() {
        return Vec::new();
    }
    let folded = Folded::new(haystack);
    let mut matches = Vec::new();
    let mut pos = 0;

    while let Some(offset) = folded.text[pos..].find(&needle) {
        let start = pos + offset;
        let end = start + needle.len();
        match folded.original_range(start, end) {
            Some(range) => {
                matches.push(range);
                pos = end;
            }
            None => {
                // Match began or ended inside one char's fold; step past it.
                pos = start
                    + folded.text[start..]
                        .chars()
                        .next()
                        .map_or(1, char::len_utf8);
            }
        }
    }
    matches
}

/// First case-insensitive match
pub fn find_ci(haystack: &str, needle: &str) -> Option<Range<usize>> {
    find_all_ci(haystack, needle).into_iter().next()
}

pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    find_ci(haystack, needle).is_some()
}

/// Replace every case-insensitive match of `needle` with `replacement`
pub fn replace_ci(haystack: &str, needle: &str, replacement: &str) -> String {
    let mut out = String::with_capacity(haystack.len());
    let mut last = 0;
    for range in find_all_ci(haystack, needle) {
        out.push_str(&haystack[last..range.start]);
        out.push_str(replacement);
        last = range.end;
    }
    out.push_str(&haystack[last..]);
    out
}

/// The shortest sentence containing `keyword`, earliest on ties
pub fn best_context<'a>(keyword: &str, sentences: &'a [Sentence]) -> Option<&'a Sentence> {
    sentences
        .iter()
        .filter(|s| contains_ci(&s.text, keyword))
        .min_by_key(|s| s.char_len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_ignores_case() {
        assert_eq!(find_ci("The Cell wall", "cell"), Some(4..8));
        assert_eq!(find_ci("The Cell wall", "CELL WALL"), Some(4..13));
        assert_eq!(find_ci("The Cell wall", "nucleus"), None);
        assert_eq!(find_ci("anything", ""), None);
    }

    #[test]
    fn test_find_with_accents() {
        assert_eq!(find_ci("L'ÉNERGIE solaire", "énergie"), Some(2..10));
        assert!(!contains_ci("Straße", "STRASSE"));
        assert!(contains_ci("ÉTÉ", "été"));
    }

    #[test]
    fn test_length_changing_fold_maps_back() {
        // 'İ' lower-cases to "i̇" (two chars).
        let text = "İstanbul is big";
        let range = find_ci(text, "is big").unwrap();
        assert_eq!(&text[range], "is big");
        let range = find_ci(text, "i\u{307}stanbul").unwrap();
        assert_eq!(&text[range], "İstanbul");
        // A needle matching only part of the fold does not count.
        assert_eq!(find_all_ci("İ", "i"), Vec::<Range<usize>>::new());
    }

    #[test]
    fn test_replace_all_occurrences() {
        assert_eq!(
            replace_ci("Energy in, ENERGY out, energy.", "energy", BLANK),
            "____ in, ____ out, ____."
        );
        assert_eq!(replace_ci("no match", "cell", BLANK), "no match");
    }

    #[test]
    fn test_replace_non_overlapping() {
        assert_eq!(replace_ci("aaaa", "aa", "b"), "bb");
    }

    #[test]
    fn test_best_context_prefers_shortest_then_earliest() {
        let sentences = vec![
            Sentence::new("Osmosis moves water across a membrane slowly.", 0),
            Sentence::new("Osmosis is diffusion.", 1),
            Sentence::new("OSMOSIS is transport.", 2),
            Sentence::new("Unrelated.", 3),
        ];
        assert_eq!(best_context("osmosis", &sentences).unwrap().index, 1);
        assert!(best_context("mitosis", &sentences).is_none());
    }
}
