//! # rapid_study
//!
//! Turn course text into study material: an extractive summary, ranked
//! keywords, definition flashcards, a cloze multiple-choice quiz and a
//! day-by-day revision plan.
//!
//! ```
//! use rapid_study::{build_study_artifacts, StudyConfig};
//!
//! let text = "Mitosis produces two identical cells. \
//!             Meiosis produces four gametes. \
//!             Both processes start with DNA replication.";
//! let artifacts = build_study_artifacts(text, &StudyConfig::default().with_plan(2, 30));
//! assert_eq!(artifacts.plan().len(), 2);
//! ```
//!
//! Every operation here is total: any string goes in, possibly empty
//! artifacts come out. Only reading a [`StudySpec`] and running a
//! [`SummaryEnhancer`](enhance::SummaryEnhancer) can fail.

pub mod enhance;
pub mod errors;
pub mod graph;
pub mod keywords;
pub mod nlp;
pub mod phrase;
pub mod pipeline;
pub mod study;
pub mod summarizer;
pub mod types;

pub use errors::{ErrorCode, Result, StudyError, StudySpecError};
pub use keywords::KeywordStrategy;
pub use nlp::{normalize, Language, LanguageRegistry};
pub use pipeline::observer::{NoopObserver, PipelineObserver, StageTimingObserver};
pub use pipeline::runner::{Pipeline, PipelineBuilder, StudyPipeline};
pub use pipeline::spec::StudySpec;
pub use study::{build_flashcards, build_plan, build_quiz_with_rng, QuizBuilder};
pub use types::{
    Flashcard, Keyword, QuizQuestion, Sentence, StudyArtifacts, StudyConfig, StudyPlanDay,
};

use crate::nlp::SentenceSegmenter;
use crate::pipeline::artifacts::Document;
use crate::summarizer::SentenceSelector;

/// Run the whole pipeline with the stages `config` selects
pub fn build_study_artifacts(text: &str, config: &StudyConfig) -> StudyArtifacts {
    StudyPipeline::from_config(config).run(text, config, &mut NoopObserver)
}

/// Normalize and split `text` into sentences
pub fn split_sentences(text: &str, language: &str) -> Vec<Sentence> {
    SentenceSegmenter::new().split(&normalize(text), Language::resolve(language))
}

/// Top `max_keywords` TF-IDF keywords of `text`
pub fn extract_keywords(text: &str, language: &str, max_keywords: usize) -> Vec<Keyword> {
    let doc = StudyPipeline::default().analyze(text, Language::resolve(language));
    KeywordStrategy::TfIdf.rank(&doc, max_keywords)
}

/// Extractive summary of already segmented sentences, using English
/// stopwords for term weighting.
pub fn summarize(sentences: &[Sentence], max_sentences: usize) -> String {
    let language = nlp::FALLBACK_LANGUAGE;
    let doc = Document::from_sentences(
        sentences.to_vec(),
        language,
        LanguageRegistry::global().stopwords(language),
    );
    SentenceSelector::new().select(&doc, max_sentences).text()
}

/// Cloze quiz shuffled with the default seed
pub fn build_quiz(
    keywords: &[Keyword],
    sentences: &[Sentence],
    max_questions: usize,
) -> Vec<QuizQuestion> {
    QuizBuilder::default().build(keywords, sentences, max_questions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_functions_agree_with_pipeline() {
        let text = "Enzymes speed up reactions. Enzymes are proteins. \
                    Temperature changes enzyme activity. Each enzyme fits one substrate.";
        let cfg = StudyConfig::default();
        let artifacts = build_study_artifacts(text, &cfg);

        let sentences = split_sentences(text, "en");
        assert_eq!(sentences.len(), 4);
        assert_eq!(extract_keywords(text, "en", cfg.max_keywords), artifacts.keywords());
        assert_eq!(summarize(&sentences, cfg.max_sentences), artifacts.summary());
        assert_eq!(
            build_quiz(artifacts.keywords(), &sentences, cfg.max_questions),
            artifacts.quiz()
        );
        assert_eq!(
            build_plan(&sentences, cfg.total_days, cfg.daily_minutes),
            artifacts.plan()
        );
    }

    #[test]
    fn test_summary_keeps_everything_when_short() {
        let sentences = split_sentences("One fact here. Another fact there.", "en");
        assert_eq!(summarize(&sentences, 8), "One fact here. Another fact there.");
    }
}
