//! Plain-text and JSON renderings of [`StudyArtifacts`].
//!
//! One function per section so callers can write each to its own file.

use std::fmt::Write;

use crate::types::{Flashcard, Keyword, QuizQuestion, StudyArtifacts, StudyPlanDay};

pub fn render_summary(artifacts: &StudyArtifacts) -> String {
    artifacts.summary().to_string()
}

/// One keyword phrase per line
pub fn render_keywords(keywords: &[Keyword]) -> String {
    keywords
        .iter()
        .map(|k| k.phrase.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// `Q: front` / `A: back` pairs
pub fn render_flashcards(cards: &[Flashcard]) -> String {
    cards
        .iter()
        .map(|c| format!("Q: {}\nA: {}", c.front, c.back))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Letter for the `i`-th option: A, B, C...
fn option_letter(i: usize) -> char {
    char::from_u32('A' as u32 + i as u32).unwrap_or('?')
}

/// Prompt, lettered options and the answer, with a blank line after each
/// question.
pub fn render_quiz(quiz: &[QuizQuestion]) -> String {
    let mut out = String::new();
    for q in quiz {
        let _ = writeln!(out, "{}", q.prompt);
        for (i, opt) in q.options.iter().enumerate() {
            let _ = writeln!(out, "  {}) {}", option_letter(i), opt);
        }
        let _ = writeln!(out, "Answer: {}", q.correct_answer);
        out.push('\n');
    }
    out
}

pub fn render_plan(plan: &[StudyPlanDay]) -> String {
    let mut out = String::new();
    for day in plan {
        let _ = writeln!(out, "{}: {}", day.day_label, day.objective);
        let _ = writeln!(out, "{}", day.tips);
        out.push('\n');
    }
    out
}

/// Pretty-printed JSON of every section
pub fn to_json(artifacts: &StudyArtifacts) -> serde_json::Result<String> {
    serde_json::to_string_pretty(artifacts)
}
