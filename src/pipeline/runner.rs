//! Pipeline runner: orchestrates stage execution and artifact flow.
//!
//! A [`Pipeline`] holds a statically composed segmenter, keyword ranker
//! and summarizer. [`Pipeline::run`] threads one normalized text through
//! them, builds the study material and notifies a [`PipelineObserver`] at
//! every stage boundary.
//!
//! Keyword ranking and summarization only read the analyzed [`Document`],
//! as do flashcards and quiz with the ranked keywords; with
//! `StudyConfig::parallel` each pair runs under `rayon::join`.

use std::sync::Arc;
use std::time::Duration;

use crate::keywords::KeywordStrategy;
use crate::nlp::{normalize, Language, LanguageRegistry, SentenceSegmenter};
use crate::pipeline::artifacts::Document;
use crate::pipeline::observer::{
    PipelineObserver, StageClock, StageReport, StageReportBuilder, STAGE_FLASHCARDS,
    STAGE_KEYWORDS, STAGE_NORMALIZE, STAGE_PLAN, STAGE_QUIZ, STAGE_SEGMENT, STAGE_SUMMARY,
    STAGE_TERMS,
};
use crate::pipeline::traits::{KeywordRanker, Segmenter, Summarizer};
use crate::study::{build_flashcards, build_plan, QuizBuilder};
use crate::summarizer::SentenceSelector;
use crate::types::{StudyArtifacts, StudyConfig};

/// Enter a tracing span for a pipeline stage (when the `tracing` feature is
/// enabled). Without the feature this expands to nothing.
macro_rules! trace_stage {
    ($name:expr) => {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("pipeline_stage", stage = $name).entered();
    };
}

/// Run `f` and measure it
fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let clock = StageClock::start();
    let value = f();
    (value, clock.elapsed())
}

/// Run two closures, on the rayon pool when `parallel` is set
fn join_if<A, B, RA, RB>(parallel: bool, a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    if parallel {
        rayon::join(a, b)
    } else {
        (a(), b())
    }
}

// ============================================================================
// Pipeline
// ============================================================================

/// A pipeline composed of concrete stage implementations.
///
/// | Param | Trait | Default |
/// |-------|-------|---------|
/// | `Seg` | [`Segmenter`] | [`SentenceSegmenter`] |
/// | `Rnk` | [`KeywordRanker`] | [`KeywordStrategy`] |
/// | `Sum` | [`Summarizer`] | [`SentenceSelector`] |
#[derive(Debug, Clone)]
pub struct Pipeline<Seg, Rnk, Sum> {
    pub segmenter: Seg,
    pub ranker: Rnk,
    pub summarizer: Sum,
    registry: Arc<LanguageRegistry>,
}

/// The default pipeline
pub type StudyPipeline = Pipeline<SentenceSegmenter, KeywordStrategy, SentenceSelector>;

impl StudyPipeline {
    /// Default stages, configured from `cfg` (keyword strategy, MMR lambda)
    pub fn from_config(cfg: &StudyConfig) -> Self {
        PipelineBuilder::new()
            .ranker(cfg.keyword_strategy)
            .summarizer(SentenceSelector::new().with_lambda(cfg.summary_lambda))
            .build()
    }
}

impl Default for StudyPipeline {
    fn default() -> Self {
        PipelineBuilder::new().build()
    }
}

impl<Seg, Rnk, Sum> Pipeline<Seg, Rnk, Sum>
where
    Seg: Segmenter,
    Rnk: KeywordRanker,
    Sum: Summarizer,
{
    pub fn registry(&self) -> &Arc<LanguageRegistry> {
        &self.registry
    }

    /// Normalize, segment and count terms
    pub fn analyze(&self, text: &str, language: Language) -> Document {
        let normalized = normalize(text);
        let sentences = self.segmenter.segment(&normalized, language);
        Document::from_sentences(sentences, language, self.registry.stopwords(language))
    }

    /// Execute every stage and assemble the artifacts.
    ///
    /// Stages report in order: normalize, segment, terms, keywords,
    /// summary, flashcards, quiz, plan. Pass
    /// [`NoopObserver`](super::observer::NoopObserver) when no callbacks
    /// are needed.
    pub fn run(
        &self,
        text: &str,
        cfg: &StudyConfig,
        observer: &mut impl PipelineObserver,
    ) -> StudyArtifacts {
        let language = Language::resolve(&cfg.language);

        // Stage 1: Normalize
        let normalized = {
            trace_stage!(STAGE_NORMALIZE);
            observer.on_stage_start(STAGE_NORMALIZE);
            let (normalized, elapsed) = timed(|| normalize(text));
            observer.on_stage_end(STAGE_NORMALIZE, &StageReport::new(elapsed));
            normalized
        };
        if normalized.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::debug!("empty input, producing empty artifacts");
        }

        // Stage 2: Segment
        let sentences = {
            trace_stage!(STAGE_SEGMENT);
            observer.on_stage_start(STAGE_SEGMENT);
            let (sentences, elapsed) = timed(|| self.segmenter.segment(&normalized, language));
            let report = StageReportBuilder::new(elapsed).items(sentences.len()).build();
            observer.on_stage_end(STAGE_SEGMENT, &report);
            observer.on_sentences(&sentences);
            sentences
        };

        // Stage 3: Term statistics
        let doc = {
            trace_stage!(STAGE_TERMS);
            observer.on_stage_start(STAGE_TERMS);
            let stopwords = self.registry.stopwords(language);
            let (doc, elapsed) = timed(|| Document::from_sentences(sentences, language, stopwords));
            let report = StageReportBuilder::new(elapsed)
                .items(doc.sentences.len())
                .terms(doc.terms.len())
                .build();
            observer.on_stage_end(STAGE_TERMS, &report);
            doc
        };

        // Stages 4 + 5: Keywords and summary, independent of each other
        observer.on_stage_start(STAGE_KEYWORDS);
        observer.on_stage_start(STAGE_SUMMARY);
        let ((keywords, kw_elapsed), (summary, sum_elapsed)) = join_if(
            cfg.parallel,
            || {
                trace_stage!(STAGE_KEYWORDS);
                timed(|| self.ranker.rank(&doc, cfg.max_keywords))
            },
            || {
                trace_stage!(STAGE_SUMMARY);
                timed(|| self.summarizer.summarize(&doc, cfg.max_sentences).text())
            },
        );
        let report = StageReportBuilder::new(kw_elapsed).items(keywords.len()).build();
        observer.on_stage_end(STAGE_KEYWORDS, &report);
        observer.on_keywords(&keywords);
        observer.on_stage_end(STAGE_SUMMARY, &StageReport::new(sum_elapsed));
        observer.on_summary(&summary);

        // Stages 6 + 7: Flashcards and quiz, both over the ranked keywords
        let quiz_builder = QuizBuilder::seeded(cfg.seed);
        observer.on_stage_start(STAGE_FLASHCARDS);
        observer.on_stage_start(STAGE_QUIZ);
        let ((flashcards, fc_elapsed), (quiz, quiz_elapsed)) = join_if(
            cfg.parallel,
            || {
                trace_stage!(STAGE_FLASHCARDS);
                timed(|| build_flashcards(&keywords, &doc.sentences, cfg.max_cards))
            },
            || {
                trace_stage!(STAGE_QUIZ);
                timed(|| quiz_builder.build(&keywords, &doc.sentences, cfg.max_questions))
            },
        );
        let report = StageReportBuilder::new(fc_elapsed).items(flashcards.len()).build();
        observer.on_stage_end(STAGE_FLASHCARDS, &report);
        observer.on_flashcards(&flashcards);
        let report = StageReportBuilder::new(quiz_elapsed).items(quiz.len()).build();
        observer.on_stage_end(STAGE_QUIZ, &report);
        observer.on_quiz(&quiz);

        // Stage 8: Plan
        let plan = {
            trace_stage!(STAGE_PLAN);
            observer.on_stage_start(STAGE_PLAN);
            let (plan, elapsed) =
                timed(|| build_plan(&doc.sentences, cfg.total_days, cfg.daily_minutes));
            let report = StageReportBuilder::new(elapsed).items(plan.len()).build();
            observer.on_stage_end(STAGE_PLAN, &report);
            observer.on_plan(&plan);
            plan
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            language = %language,
            sentences = doc.sentences.len(),
            keywords = keywords.len(),
            flashcards = flashcards.len(),
            questions = quiz.len(),
            days = plan.len(),
            "study artifacts built"
        );

        StudyArtifacts::new(summary, keywords, flashcards, quiz, plan)
    }
}

// ============================================================================
// PipelineBuilder
// ============================================================================

/// Fluent builder for a [`Pipeline`] with custom stages.
///
/// ```
/// # use rapid_study::pipeline::runner::PipelineBuilder;
/// # use rapid_study::keywords::KeywordStrategy;
/// let pipeline = PipelineBuilder::new()
///     .ranker(KeywordStrategy::Rake)
///     .build();
/// ```
pub struct PipelineBuilder<
    Seg = SentenceSegmenter,
    Rnk = KeywordStrategy,
    Sum = SentenceSelector,
> {
    segmenter: Seg,
    ranker: Rnk,
    summarizer: Sum,
    registry: Option<Arc<LanguageRegistry>>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        PipelineBuilder {
            segmenter: SentenceSegmenter::new(),
            ranker: KeywordStrategy::default(),
            summarizer: SentenceSelector::new(),
            registry: None,
        }
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<Seg, Rnk, Sum> PipelineBuilder<Seg, Rnk, Sum> {
    pub fn segmenter<S: Segmenter>(self, s: S) -> PipelineBuilder<S, Rnk, Sum> {
        PipelineBuilder {
            segmenter: s,
            ranker: self.ranker,
            summarizer: self.summarizer,
            registry: self.registry,
        }
    }

    pub fn ranker<R: KeywordRanker>(self, r: R) -> PipelineBuilder<Seg, R, Sum> {
        PipelineBuilder {
            segmenter: self.segmenter,
            ranker: r,
            summarizer: self.summarizer,
            registry: self.registry,
        }
    }

    pub fn summarizer<S: Summarizer>(self, s: S) -> PipelineBuilder<Seg, Rnk, S> {
        PipelineBuilder {
            segmenter: self.segmenter,
            ranker: self.ranker,
            summarizer: s,
            registry: self.registry,
        }
    }

    /// Use `registry` instead of the process-wide one
    pub fn registry(mut self, registry: Arc<LanguageRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn build(self) -> Pipeline<Seg, Rnk, Sum> {
        Pipeline {
            segmenter: self.segmenter,
            ranker: self.ranker,
            summarizer: self.summarizer,
            registry: self.registry.unwrap_or_else(LanguageRegistry::global),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
