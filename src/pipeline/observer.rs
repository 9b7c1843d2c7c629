//! Pipeline observer: hooks for logging, profiling and debugging.
//!
//! Observers are notified at stage boundaries without coupling to stage
//! logic. Stages that run side by side on the rayon pool report once both
//! have finished, always in the fixed stage order below, so an observer
//! never needs to be `Sync`.

use std::time::{Duration, Instant};

use crate::types::{Flashcard, Keyword, QuizQuestion, Sentence, StudyPlanDay};

pub const STAGE_NORMALIZE: &str = "normalize";
pub const STAGE_SEGMENT: &str = "segment";
pub const STAGE_TERMS: &str = "terms";
pub const STAGE_KEYWORDS: &str = "keywords";
pub const STAGE_SUMMARY: &str = "summary";
pub const STAGE_FLASHCARDS: &str = "flashcards";
pub const STAGE_QUIZ: &str = "quiz";
pub const STAGE_PLAN: &str = "plan";

/// Every stage, in reporting order
pub const STAGES: [&str; 8] = [
    STAGE_NORMALIZE,
    STAGE_SEGMENT,
    STAGE_TERMS,
    STAGE_KEYWORDS,
    STAGE_SUMMARY,
    STAGE_FLASHCARDS,
    STAGE_QUIZ,
    STAGE_PLAN,
];

// ─── Stage reports ──────────────────────────────────────────────────────────

/// Measures one stage
#[derive(Debug, Clone, Copy)]
pub struct StageClock(Instant);

impl StageClock {
    pub fn start() -> Self {
        Self(Instant::now())
    }

    pub fn elapsed(&self) -> Duration {
        self.0.elapsed()
    }
}

/// What a stage reports when it ends
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageReport {
    elapsed: Duration,
    items: Option<usize>,
    terms: Option<usize>,
}

impl StageReport {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            elapsed,
            ..Self::default()
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Number of items the stage produced (sentences, keywords, cards...)
    pub fn items(&self) -> Option<usize> {
        self.items
    }

    /// Vocabulary size, reported by the term statistics stage
    pub fn terms(&self) -> Option<usize> {
        self.terms
    }
}

pub struct StageReportBuilder {
    report: StageReport,
}

impl StageReportBuilder {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            report: StageReport::new(elapsed),
        }
    }

    pub fn items(mut self, n: usize) -> Self {
        self.report.items = Some(n);
        self
    }

    pub fn terms(mut self, n: usize) -> Self {
        self.report.terms = Some(n);
        self
    }

    pub fn build(self) -> StageReport {
        self.report
    }
}

// ─── Observer trait ─────────────────────────────────────────────────────────

/// Callbacks fired by the pipeline runner. Every method defaults to a
/// no-op; implement only what you need.
pub trait PipelineObserver {
    fn on_stage_start(&mut self, _stage: &'static str) {}
    fn on_stage_end(&mut self, _stage: &'static str, _report: &StageReport) {}

    fn on_sentences(&mut self, _sentences: &[Sentence]) {}
    fn on_keywords(&mut self, _keywords: &[Keyword]) {}
    fn on_summary(&mut self, _summary: &str) {}
    fn on_flashcards(&mut self, _cards: &[Flashcard]) {}
    fn on_quiz(&mut self, _quiz: &[QuizQuestion]) {}
    fn on_plan(&mut self, _plan: &[StudyPlanDay]) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Collects one [`StageReport`] per finished stage
#[derive(Debug, Clone, Default)]
pub struct StageTimingObserver {
    reports: Vec<(&'static str, StageReport)>,
}

impl StageTimingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> &[(&'static str, StageReport)] {
        &self.reports
    }

    pub fn report(&self, stage: &str) -> Option<&StageReport> {
        self.reports
            .iter()
            .find(|(name, _)| *name == stage)
            .map(|(_, r)| r)
    }

    /// Sum of all stage times. Stages that ran in parallel are both counted.
    pub fn total_elapsed(&self) -> Duration {
        self.reports.iter().map(|(_, r)| r.elapsed()).sum()
    }
}

impl PipelineObserver for StageTimingObserver {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        self.reports.push((stage, report.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_builder() {
        let report = StageReportBuilder::new(Duration::from_millis(3))
            .items(12)
            .terms(40)
            .build();
        assert_eq!(report.elapsed(), Duration::from_millis(3));
        assert_eq!(report.items(), Some(12));
        assert_eq!(report.terms(), Some(40));
        assert_eq!(StageReport::new(Duration::ZERO).items(), None);
    }

    #[test]
    fn test_timing_observer_collects_reports() {
        let mut obs = StageTimingObserver::new();
        obs.on_stage_start(STAGE_SEGMENT);
        obs.on_stage_end(STAGE_SEGMENT, &StageReport::new(Duration::from_millis(2)));
        obs.on_stage_end(STAGE_PLAN, &StageReport::new(Duration::from_millis(1)));

        assert_eq!(obs.reports().len(), 2);
        assert!(obs.report(STAGE_PLAN).is_some());
        assert!(obs.report(STAGE_QUIZ).is_none());
        assert_eq!(obs.total_elapsed(), Duration::from_millis(3));
    }

    #[test]
    fn test_clock_advances() {
        let clock = StageClock::start();
        std::thread::sleep(Duration::from_millis(1));
        assert!(clock.elapsed() >= Duration::from_millis(1));
    }
}
