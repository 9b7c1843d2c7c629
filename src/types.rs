//! Core data types
//!
//! Every value here is derived data: produced once per pipeline invocation
//! and handed to the caller, who owns it from then on.

use serde::{Deserialize, Serialize};

use crate::keywords::KeywordStrategy;

/// Default number of summary sentences
pub const DEFAULT_MAX_SENTENCES: usize = 8;
/// Default number of keywords
pub const DEFAULT_MAX_KEYWORDS: usize = 20;
/// Default number of flashcards
pub const DEFAULT_MAX_CARDS: usize = 20;
/// Default number of quiz questions
pub const DEFAULT_MAX_QUESTIONS: usize = 10;
/// Default length of the revision plan, in days
pub const DEFAULT_TOTAL_DAYS: usize = 7;
/// Default study time per day, in minutes
pub const DEFAULT_DAILY_MINUTES: usize = 45;
/// Seed used for quiz option shuffling unless the caller picks another
pub const DEFAULT_QUIZ_SEED: u64 = 42;

/// A sentence produced by segmentation.
///
/// `index` is the position in the source document and survives every
/// downstream selection, so excerpts keep their narrative order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub text: String,
    pub index: usize,
}

impl Sentence {
    pub fn new(text: impl Into<String>, index: usize) -> Self {
        Self {
            text: text.into(),
            index,
        }
    }

    /// Length in characters (not bytes)
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// A ranked keyword or keyphrase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    /// Surface form, case preserved for display
    pub phrase: String,
    /// Non-negative salience; higher is more important
    pub score: f64,
    /// Order in which the ranking pass first met this candidate
    pub first_occurrence: usize,
}

impl Keyword {
    pub fn new(phrase: impl Into<String>, score: f64, first_occurrence: usize) -> Self {
        Self {
            phrase: phrase.into(),
            score,
            first_occurrence,
        }
    }

    /// Lower-cased key used for deduplication
    pub fn key(&self) -> String {
        self.phrase.to_lowercase()
    }

    /// Number of whitespace-separated tokens in the phrase
    pub fn token_count(&self) -> usize {
        self.phrase.split_whitespace().count()
    }
}

/// A definition-style card: the keyword on the front, its context sentence
/// on the back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
}

/// A cloze multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl QuizQuestion {
    /// Position of the correct answer among the options
    pub fn answer_index(&self) -> Option<usize> {
        self.options.iter().position(|o| *o == self.correct_answer)
    }
}

/// One day of the revision plan.
///
/// `start..end` is the half-open range of sentence indices the day covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyPlanDay {
    pub day_label: String,
    pub objective: String,
    pub tips: String,
    pub start: usize,
    pub end: usize,
}

impl StudyPlanDay {
    pub fn sentence_count(&self) -> usize {
        self.end - self.start
    }
}

/// Everything one pipeline run produces.
///
/// The only sanctioned change after construction is replacing the summary
/// wholesale (see [`StudyArtifacts::with_summary`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudyArtifacts {
    summary: String,
    keywords: Vec<Keyword>,
    flashcards: Vec<Flashcard>,
    quiz: Vec<QuizQuestion>,
    plan: Vec<StudyPlanDay>,
}

impl StudyArtifacts {
    pub fn new(
        summary: String,
        keywords: Vec<Keyword>,
        flashcards: Vec<Flashcard>,
        quiz: Vec<QuizQuestion>,
        plan: Vec<StudyPlanDay>,
    ) -> Self {
        Self {
            summary,
            keywords,
            flashcards,
            quiz,
            plan,
        }
    }

    /// Artifacts for a document with no usable text
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn keywords(&self) -> &[Keyword] {
        &self.keywords
    }

    pub fn flashcards(&self) -> &[Flashcard] {
        &self.flashcards
    }

    pub fn quiz(&self) -> &[QuizQuestion] {
        &self.quiz
    }

    pub fn plan(&self) -> &[StudyPlanDay] {
        &self.plan
    }

    /// True when every section is empty
    pub fn is_empty(&self) -> bool {
        self.summary.is_empty()
            && self.keywords.is_empty()
            && self.flashcards.is_empty()
            && self.quiz.is_empty()
            && self.plan.is_empty()
    }

    /// Replace the summary, keeping every other section untouched
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }
}

/// Options for one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudyConfig {
    /// Language tag or name ("en", "french", ...); unknown tags fall back
    /// to English
    pub language: String,
    pub max_sentences: usize,
    pub max_keywords: usize,
    pub max_cards: usize,
    pub max_questions: usize,
    pub total_days: usize,
    pub daily_minutes: usize,
    pub keyword_strategy: KeywordStrategy,
    /// MMR trade-off for the summary (1.0 = salience only)
    pub summary_lambda: f64,
    /// Seed for quiz option shuffling
    pub seed: u64,
    /// Run independent stages on the rayon pool
    pub parallel: bool,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            language: "english".to_string(),
            max_sentences: DEFAULT_MAX_SENTENCES,
            max_keywords: DEFAULT_MAX_KEYWORDS,
            max_cards: DEFAULT_MAX_CARDS,
            max_questions: DEFAULT_MAX_QUESTIONS,
            total_days: DEFAULT_TOTAL_DAYS,
            daily_minutes: DEFAULT_DAILY_MINUTES,
            keyword_strategy: KeywordStrategy::default(),
            summary_lambda: 1.0,
            seed: DEFAULT_QUIZ_SEED,
            parallel: true,
        }
    }
}

impl StudyConfig {
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_keyword_strategy(mut self, strategy: KeywordStrategy) -> Self {
        self.keyword_strategy = strategy;
        self
    }

    pub fn with_plan(mut self, total_days: usize, daily_minutes: usize) -> Self {
        self.total_days = total_days;
        self.daily_minutes = daily_minutes;
        self
    }
}
