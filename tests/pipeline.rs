//! End-to-end behaviour of the public API.

use std::sync::Arc;
use std::time::Duration;

use rapid_study::enhance::{enhance_summary, EnhanceOutcome, EnhanceRequest};
use rapid_study::pipeline::format;
use rapid_study::pipeline::validation::ValidationEngine;
use rapid_study::{
    build_plan, build_quiz, build_study_artifacts, extract_keywords, split_sentences, summarize,
    Keyword, KeywordStrategy, Result, Sentence, StageTimingObserver, StudyConfig, StudyError,
    StudyPipeline, StudySpec,
};

const LECTURE: &str = "\
The cell is the basic unit of life.\n\
Every cell is surrounded by a membrane that controls what enters and leaves.\n\n\
Mitochondria produce energy for the cell through respiration.   Ribosomes build proteins from amino acids.\n\
The nucleus stores genetic information as DNA.\n\
Plant cells also contain chloroplasts, where photosynthesis turns light into energy.\n\
Dr. Smith showed that membrane proteins move laterally.\n\
Cell division copies the DNA before the cell splits in two.";

fn numbered_sentences(n: usize) -> Vec<Sentence> {
    (0..n)
        .map(|i| Sentence::new(format!("Sentence number {i} is here."), i))
        .collect()
}

#[test]
fn french_keywords_skip_stopwords() {
    let keywords = extract_keywords("Le chat mange le chat. Le chat dort.", "french", 5);
    assert!(!keywords.is_empty());
    assert_eq!(keywords[0].phrase, "chat");
    assert!(keywords.iter().all(|k| k.phrase.to_lowercase() != "le"));
}

#[test]
fn plan_chunks_ten_sentences_over_three_days() {
    let plan = build_plan(&numbered_sentences(10), 3, 30);
    let sizes: Vec<usize> = plan.iter().map(|d| d.sentence_count()).collect();
    assert_eq!(sizes, vec![4, 4, 2]);
    assert_eq!(plan[0].day_label, "Day 1");
    assert_eq!(plan[2].objective, "Review 2 sentences (~30 min)");
}

#[test]
fn plan_with_more_days_than_sentences_stops_early() {
    let plan = build_plan(&numbered_sentences(2), 7, 45);
    assert_eq!(plan.len(), 2);
    assert!(build_plan(&[], 3, 30).is_empty());
}

#[test]
fn summary_of_six_sentences_keeps_three_in_order() {
    let text = "Volcanoes form where magma reaches the surface. \
                Magma is molten rock stored in chambers. \
                Lava is magma that has erupted. \
                Some volcanoes erupt explosively because gas is trapped. \
                Others release lava slowly in flows. \
                Volcanic ash can travel around the globe.";
    let sentences = split_sentences(text, "en");
    assert_eq!(sentences.len(), 6);

    let summary = summarize(&sentences, 3);
    let picked: Vec<usize> = split_sentences(&summary, "en")
        .iter()
        .map(|s| {
            sentences
                .iter()
                .position(|o| o.text == s.text)
                .expect("summary sentence comes from the source")
        })
        .collect();
    assert_eq!(picked.len(), 3);
    assert!(picked.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn quiz_pads_options_from_the_whole_pool() {
    let sentences = vec![
        Sentence::new("Mitochondria release energy.", 0),
        Sentence::new("Ribosomes assemble proteins.", 1),
    ];
    // only the first two keywords occur in the text
    let keywords: Vec<Keyword> = ["mitochondria", "ribosomes", "lysosomes", "vacuoles", "golgi"]
        .iter()
        .enumerate()
        .map(|(i, p)| Keyword::new(*p, 1.0 / (i + 1) as f64, i))
        .collect();

    let quiz = build_quiz(&keywords, &sentences, 10);
    assert_eq!(quiz.len(), 2);
    for q in &quiz {
        assert_eq!(q.options.len(), 4);
        assert_eq!(
            q.options.iter().filter(|o| **o == q.correct_answer).count(),
            1
        );
        assert!(q.prompt.contains("____"));
    }

    let small_pool = &keywords[..2];
    let quiz = build_quiz(small_pool, &sentences, 10);
    assert!(quiz.iter().all(|q| q.options.len() == 2));
}

#[test]
fn empty_and_blank_input_give_empty_artifacts() {
    let cfg = StudyConfig::default();
    assert!(build_study_artifacts("", &cfg).is_empty());
    assert!(build_study_artifacts("  \n\t  ", &cfg).is_empty());
}

#[test]
fn identical_runs_are_byte_identical() {
    let cfg = StudyConfig::default().with_seed(7);
    let first = format::to_json(&build_study_artifacts(LECTURE, &cfg)).unwrap();
    let second = format::to_json(&build_study_artifacts(LECTURE, &cfg)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn lecture_produces_every_section() {
    let cfg = StudyConfig::default().with_plan(3, 20);
    let artifacts = build_study_artifacts(LECTURE, &cfg);

    assert!(!artifacts.summary().is_empty());
    assert!(artifacts.keywords().len() <= cfg.max_keywords);
    assert!(artifacts.keywords().iter().any(|k| k.phrase.eq_ignore_ascii_case("cell")));
    assert!(artifacts
        .flashcards()
        .iter()
        .all(|c| c.front.starts_with("What is: ")));
    assert!(artifacts.quiz().iter().all(|q| q.options.contains(&q.correct_answer)));
    assert_eq!(artifacts.plan().len(), 3);

    // "Dr." does not end a sentence
    let sentences = split_sentences(LECTURE, "en");
    assert_eq!(sentences.len(), 8);
    assert!(sentences
        .iter()
        .any(|s| s.text.starts_with("Dr. Smith showed")));
}

#[test]
fn rake_strategy_from_spec_file() {
    let spec = StudySpec::from_json(
        r#"{ "v": 1, "options": { "keyword_strategy": "rake", "max_keywords": 5, "total_days": 2 } }"#,
    )
    .unwrap();
    let cfg = spec.resolve().unwrap();
    assert_eq!(cfg.keyword_strategy, KeywordStrategy::Rake);

    let artifacts = build_study_artifacts(LECTURE, &cfg);
    assert!(!artifacts.keywords().is_empty());
    assert!(artifacts.keywords().len() <= 5);
    assert!(artifacts
        .keywords()
        .iter()
        .all(|k| (1..=4).contains(&k.token_count())));
    assert_eq!(artifacts.plan().len(), 2);
}

#[test]
fn invalid_spec_reports_every_problem() {
    let spec = StudySpec::from_json(
        r#"{ "v": 2, "strict": true, "color": "blue",
             "options": { "total_days": 0, "summary_lambda": 3.0 } }"#,
    )
    .unwrap();
    let report = ValidationEngine::with_defaults().validate(&spec);
    assert!(report.errors().count() >= 4);

    match spec.resolve() {
        Err(StudyError::InvalidSpec(report)) => assert!(report.has_errors()),
        other => panic!("expected InvalidSpec, got {other:?}"),
    }
}

#[test]
fn unsupported_language_falls_back_to_english() {
    let cfg = StudyConfig::default().with_language("klingon");
    let fallback = build_study_artifacts(LECTURE, &cfg);
    let english = build_study_artifacts(LECTURE, &StudyConfig::default());
    assert_eq!(fallback, english);
}

#[test]
fn timing_observer_covers_all_stages() {
    let cfg = StudyConfig::default();
    let mut observer = StageTimingObserver::new();
    let artifacts = StudyPipeline::from_config(&cfg).run(LECTURE, &cfg, &mut observer);

    assert_eq!(observer.reports().len(), 8);
    let keywords = observer.report("keywords").and_then(|r| r.items());
    assert_eq!(keywords, Some(artifacts.keywords().len()));
}

#[test]
fn failed_enhancement_keeps_base_artifacts() {
    let cfg = StudyConfig::default();
    let base = build_study_artifacts(LECTURE, &cfg);

    let broken = |_: &EnhanceRequest| -> Result<String> {
        Err(StudyError::Enhancement("offline".into()))
    };
    let outcome = enhance_summary(base.clone(), LECTURE, Arc::new(broken), Duration::from_secs(5));
    assert!(outcome.error().is_some());
    assert_eq!(outcome.into_artifacts(), base);

    let rewriter = |_: &EnhanceRequest| -> Result<String> { Ok("Cells are alive.".into()) };
    let outcome = enhance_summary(base.clone(), LECTURE, Arc::new(rewriter), Duration::from_secs(5));
    match outcome {
        EnhanceOutcome::Replaced(enhanced) => {
            assert_eq!(enhanced.summary(), "Cells are alive.");
            assert_eq!(enhanced.quiz(), base.quiz());
        }
        other => panic!("expected replacement, got {other:?}"),
    }
}
