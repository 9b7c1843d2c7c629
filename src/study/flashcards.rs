//! Definition-style flashcards: keyword on the front, its shortest
//! supporting sentence on the back.

use super::context::best_context;
use crate::types::{Flashcard, Keyword, Sentence};

/// Front side of a card for `keyword`
pub fn card_front(keyword: &str) -> String {
    format!("What is: {keyword}?")
}

/// Build up to `max_cards` cards, in keyword rank order.
///
/// Keywords with no matching sentence are skipped.
pub fn build_flashcards(
    keywords: &[Keyword],
    sentences: &[Sentence],
    max_cards: usize,
) -> Vec<Flashcard> {
    keywords
        .iter()
        .filter(|k| !k.phrase.trim().is_empty())
        .filter_map(|k| {
            best_context(&k.phrase, sentences).map(|s| Flashcard {
                front: card_front(&k.phrase),
                back: s.text.clone(),
            })
        })
        .take(max_cards)
        .collect()
}
