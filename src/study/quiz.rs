//! Cloze multiple-choice questions
//!
//! The prompt is the keyword's shortest supporting sentence with every
//! occurrence of the keyword blanked out. Distractors come from the whole
//! ranked keyword pool, same token count first. Option order is shuffled
//! with a caller-supplied RNG so output is reproducible under a seed.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::context::{best_context, contains_ci, replace_ci, BLANK};
use crate::types::{Keyword, QuizQuestion, Sentence, DEFAULT_QUIZ_SEED};

/// Options per question when the pool is large enough
pub const OPTIONS_PER_QUESTION: usize = 4;

/// Seeded quiz builder
#[derive(Debug, Clone, Copy)]
pub struct QuizBuilder {
    seed: u64,
}

impl Default for QuizBuilder {
    fn default() -> Self {
        Self::seeded(DEFAULT_QUIZ_SEED)
    }
}

impl QuizBuilder {
    pub fn seeded(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Build up to `max_questions` questions; same seed, same output
    pub fn build(
        &self,
        keywords: &[Keyword],
        sentences: &[Sentence],
        max_questions: usize,
    ) -> Vec<QuizQuestion> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        build_quiz_with_rng(keywords, sentences, max_questions, &mut rng)
    }
}

/// Build up to `max_questions` questions, shuffling options with `rng`
pub fn build_quiz_with_rng<R: Rng + ?Sized>(
    keywords: &[Keyword],
    sentences: &[Sentence],
    max_questions: usize,
    rng: &mut R,
) -> Vec<QuizQuestion> {
    let mut questions = Vec::new();

    for keyword in keywords {
        if questions.len() >= max_questions {
            break;
        }
        let answer = keyword.phrase.trim();
        if answer.is_empty() {
            continue;
        }
        let Some(context) = best_context(answer, sentences) else {
            continue;
        };

        let mut question = QuizQuestion {
            prompt: replace_ci(&context.text, answer, BLANK),
            options: build_options(answer, keywords),
            correct_answer: answer.to_string(),
        };
        // an answer built from blank characters survives blanking
        if leaks_answer(&question) {
            continue;
        }
        question.options.shuffle(rng);
        questions.push(question);
    }
    questions
}

/// Answer first, then distractors in pool order: up to three with the
/// answer's token count, padded from any remaining keyword.
///
/// No option is a case-insensitive duplicate of another.
pub fn build_options(answer: &str, pool: &[Keyword]) -> Vec<String> {
    let mut options = vec![answer.to_string()];
    let tokens = answer.split_whitespace().count();

    let is_new = |options: &[String], candidate: &str| {
        let key = candidate.to_lowercase();
        !key.is_empty() && !options.iter().any(|o| o.to_lowercase() == key)
    };

    for keyword in pool {
        if options.len() >= OPTIONS_PER_QUESTION {
            break;
        }
        let candidate = keyword.phrase.trim();
        if keyword.token_count() == tokens && is_new(&options, candidate) {
            options.push(candidate.to_string());
        }
    }
    for keyword in pool {
        if options.len() >= OPTIONS_PER_QUESTION {
            break;
        }
        let candidate = keyword.phrase.trim();
        if is_new(&options, candidate) {
            options.push(candidate.to_string());
        }
    }
    options
}

/// Whether the prompt still shows the answer
pub fn leaks_answer(question: &QuizQuestion) -> bool {
    contains_ci(&question.prompt, &question.correct_answer)
}
