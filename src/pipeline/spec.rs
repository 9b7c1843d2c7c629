//! Study spec: the versioned JSON form of [`StudyConfig`].
//!
//! ```json
//! {
//!   "v": 1,
//!   "options": {
//!     "language": "fr",
//!     "max_keywords": 15,
//!     "total_days": 5,
//!     "keyword_strategy": "rake"
//!   },
//!   "strict": false
//! }
//! ```
//!
//! Omitted options keep their defaults. Unknown fields are captured so the
//! [`ValidationEngine`](super::validation::ValidationEngine) can report
//! them instead of serde silently dropping them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::validation::{ValidationEngine, ValidationReport};
use crate::errors::{Result, StudyError};
use crate::keywords::KeywordStrategy;
use crate::types::StudyConfig;

/// Spec version this crate reads
pub const SPEC_VERSION: u32 = 1;

/// Top-level study spec (v1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudySpec {
    pub v: u32,

    #[serde(default)]
    pub options: OptionsSpec,

    /// If `true`, unrecognized fields are errors; if `false`, warnings.
    #[serde(default)]
    pub strict: bool,

    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

/// Options overriding the [`StudyConfig`] defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptionsSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_sentences: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_keywords: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_cards: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_questions: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_days: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_minutes: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword_strategy: Option<KeywordStrategy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_lambda: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel: Option<bool>,

    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl StudySpec {
    /// A v1 spec with every option at its default
    pub fn new() -> Self {
        Self {
            v: SPEC_VERSION,
            options: OptionsSpec::default(),
            strict: false,
            unknown_fields: HashMap::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Apply the options on top of [`StudyConfig::default`] without
    /// validating them.
    pub fn to_config(&self) -> StudyConfig {
        let o = &self.options;
        let defaults = StudyConfig::default();
        StudyConfig {
            language: o.language.clone().unwrap_or(defaults.language),
            max_sentences: o.max_sentences.unwrap_or(defaults.max_sentences),
            max_keywords: o.max_keywords.unwrap_or(defaults.max_keywords),
            max_cards: o.max_cards.unwrap_or(defaults.max_cards),
            max_questions: o.max_questions.unwrap_or(defaults.max_questions),
            total_days: o.total_days.unwrap_or(defaults.total_days),
            daily_minutes: o.daily_minutes.unwrap_or(defaults.daily_minutes),
            keyword_strategy: o.keyword_strategy.unwrap_or(defaults.keyword_strategy),
            summary_lambda: o.summary_lambda.unwrap_or(defaults.summary_lambda),
            seed: o.seed.unwrap_or(defaults.seed),
            parallel: o.parallel.unwrap_or(defaults.parallel),
        }
    }

    /// Validate with the default rules and build the config.
    ///
    /// Warnings are logged and otherwise ignored; any error rejects the
    /// spec with the full report.
    pub fn resolve(&self) -> Result<StudyConfig> {
        self.resolve_with(&ValidationEngine::with_defaults())
            .map(|(config, _)| config)
    }

    /// Validate with `engine`, returning the config and the warnings
    pub fn resolve_with(&self, engine: &ValidationEngine) -> Result<(StudyConfig, ValidationReport)> {
        let report = engine.validate(self);
        if report.has_errors() {
            return Err(StudyError::InvalidSpec(report));
        }
        #[cfg(feature = "tracing")]
        for warning in report.warnings() {
            tracing::warn!(code = %warning.code, path = %warning.path, "{}", warning.message);
        }
        Ok((self.to_config(), report))
    }
}

impl Default for StudySpec {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&StudyConfig> for StudySpec {
    fn from(config: &StudyConfig) -> Self {
        Self {
            options: OptionsSpec {
                language: Some(config.language.clone()),
                max_sentences: Some(config.max_sentences),
                max_keywords: Some(config.max_keywords),
                max_cards: Some(config.max_cards),
                max_questions: Some(config.max_questions),
                total_days: Some(config.total_days),
                daily_minutes: Some(config.daily_minutes),
                keyword_strategy: Some(config.keyword_strategy),
                summary_lambda: Some(config.summary_lambda),
                seed: Some(config.seed),
                parallel: Some(config.parallel),
                unknown_fields: HashMap::new(),
            },
            ..Self::new()
        }
    }
}
