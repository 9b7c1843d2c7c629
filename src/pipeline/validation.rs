//! Validation engine for study specs.
//!
//! The engine runs every registered [`ValidationRule`] against a
//! [`StudySpec`] and collects all diagnostics into a [`ValidationReport`].
//! It never stops at the first problem, so callers see everything at once.
//!
//! ```rust,ignore
//! use rapid_study::pipeline::validation::ValidationEngine;
//!
//! let report = ValidationEngine::with_defaults().validate(&spec);
//! for err in report.errors() {
//!     eprintln!("{err}");
//! }
//! ```

use std::collections::HashMap;

use serde::Serialize;

use super::error_code::ErrorCode;
use super::errors::StudySpecError;
use super::spec::{StudySpec, SPEC_VERSION};
use crate::nlp::{Language, FALLBACK_LANGUAGE};

// ─── Severity ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

// ─── Diagnostic ─────────────────────────────────────────────────────────────

/// A single finding: severity plus the located [`StudySpecError`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationDiagnostic {
    pub severity: Severity,
    #[serde(flatten)]
    pub error: StudySpecError,
}

impl ValidationDiagnostic {
    pub fn error(err: StudySpecError) -> Self {
        Self {
            severity: Severity::Error,
            error: err,
        }
    }

    pub fn warning(err: StudySpecError) -> Self {
        Self {
            severity: Severity::Warning,
            error: err,
        }
    }
}

// ─── Report ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn errors(&self) -> impl Iterator<Item = &StudySpecError> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .map(|d| &d.error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &StudySpecError> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .map(|d| &d.error)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// No errors (warnings are acceptable)
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

// ─── Rule trait ─────────────────────────────────────────────────────────────

/// A stateless check over a [`StudySpec`].
pub trait ValidationRule: Send + Sync {
    /// Short, stable identifier (e.g. `"plan_values"`)
    fn name(&self) -> &str;

    fn validate(&self, spec: &StudySpec) -> Vec<ValidationDiagnostic>;
}

// ─── Engine ─────────────────────────────────────────────────────────────────

pub struct ValidationEngine {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl ValidationEngine {
    /// An engine with no rules
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// An engine with the default rule set
    pub fn with_defaults() -> Self {
        let mut engine = Self::new();
        engine.add_rule(Box::new(VersionRule));
        engine.add_rule(Box::new(PlanValuesRule));
        engine.add_rule(Box::new(SectionLimitsRule));
        engine.add_rule(Box::new(LanguageRule));
        engine.add_rule(Box::new(SummaryLambdaRule));
        engine.add_rule(Box::new(UnknownFieldsRule));
        engine
    }

    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    #[cfg(test)]
    fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn validate(&self, spec: &StudySpec) -> ValidationReport {
        let mut report = ValidationReport::default();
        for rule in &self.rules {
            report.diagnostics.extend(rule.validate(spec));
        }
        report
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Concrete rules
// ═══════════════════════════════════════════════════════════════════════════

// ─── 1. Spec version ────────────────────────────────────────────────────────

struct VersionRule;

impl ValidationRule for VersionRule {
    fn name(&self) -> &str {
        "version"
    }

    fn validate(&self, spec: &StudySpec) -> Vec<ValidationDiagnostic> {
        if spec.v == SPEC_VERSION {
            return vec![];
        }
        vec![ValidationDiagnostic::error(
            StudySpecError::new(
                ErrorCode::UnsupportedVersion,
                "/v",
                format!("spec version {} is not supported", spec.v),
            )
            .with_hint(format!("Set \"v\" to {SPEC_VERSION}")),
        )]
    }
}

// ─── 2. Plan length and daily time must be positive ─────────────────────────

struct PlanValuesRule;

impl ValidationRule for PlanValuesRule {
    fn name(&self) -> &str {
        "plan_values"
    }

    fn validate(&self, spec: &StudySpec) -> Vec<ValidationDiagnostic> {
        let checks: &[(&str, Option<usize>)] = &[
            ("total_days", spec.options.total_days),
            ("daily_minutes", spec.options.daily_minutes),
        ];

        checks
            .iter()
            .filter(|(_, value)| *value == Some(0))
            .map(|(field, _)| {
                ValidationDiagnostic::error(
                    StudySpecError::new(
                        ErrorCode::InvalidValue,
                        format!("/options/{field}"),
                        format!("{field} must be greater than 0"),
                    )
                    .with_hint(format!("Remove {field} to use the default, or set a positive value")),
                )
            })
            .collect()
    }
}

// ─── 3. Zero section limits produce empty sections ──────────────────────────

struct SectionLimitsRule;

impl ValidationRule for SectionLimitsRule {
    fn name(&self) -> &str {
        "section_limits"
    }

    fn validate(&self, spec: &StudySpec) -> Vec<ValidationDiagnostic> {
        let o = &spec.options;
        let checks: &[(&str, Option<usize>)] = &[
            ("max_sentences", o.max_sentences),
            ("max_keywords", o.max_keywords),
            ("max_cards", o.max_cards),
            ("max_questions", o.max_questions),
        ];

        checks
            .iter()
            .filter(|(_, value)| *value == Some(0))
            .map(|(field, _)| {
                ValidationDiagnostic::warning(StudySpecError::new(
                    ErrorCode::InvalidValue,
                    format!("/options/{field}"),
                    format!("{field} is 0, this section will be empty"),
                ))
            })
            .collect()
    }
}

// ─── 4. Unsupported language falls back ────────────────────────────────────

struct LanguageRule;

impl ValidationRule for LanguageRule {
    fn name(&self) -> &str {
        "language"
    }

    fn validate(&self, spec: &StudySpec) -> Vec<ValidationDiagnostic> {
        match spec.options.language.as_deref() {
            Some(tag) if Language::parse(tag).is_none() => {
                vec![ValidationDiagnostic::warning(
                    StudySpecError::new(
                        ErrorCode::UnsupportedLanguage,
                        "/options/language",
                        format!("language \"{tag}\" is not supported, {FALLBACK_LANGUAGE} will be used"),
                    )
                    .with_hint("Use an ISO 639-1 code such as \"en\", \"fr\" or \"de\""),
                )]
            }
            _ => vec![],
        }
    }
}

// ─── 5. MMR lambda range ────────────────────────────────────────────────────

struct SummaryLambdaRule;

impl ValidationRule for SummaryLambdaRule {
    fn name(&self) -> &str {
        "summary_lambda"
    }

    fn validate(&self, spec: &StudySpec) -> Vec<ValidationDiagnostic> {
        match spec.options.summary_lambda {
            Some(lambda) if !(0.0..=1.0).contains(&lambda) => {
                vec![ValidationDiagnostic::error(
                    StudySpecError::new(
                        ErrorCode::InvalidValue,
                        "/options/summary_lambda",
                        format!("summary_lambda must be within [0, 1], got {lambda}"),
                    )
                    .with_hint("1.0 ranks by salience only; lower values favour diversity"),
                )]
            }
            _ => vec![],
        }
    }
}

// ─── 6. Unknown fields (strict → error, non-strict → warning) ──────────────

struct UnknownFieldsRule;

impl UnknownFieldsRule {
    fn check_unknowns(
        path: &str,
        unknowns: &HashMap<String, serde_json::Value>,
        strict: bool,
    ) -> Vec<ValidationDiagnostic> {
        let mut keys: Vec<&String> = unknowns.keys().collect();
        keys.sort();
        keys.into_iter()
            .map(|key| {
                let diag_fn = if strict {
                    ValidationDiagnostic::error
                } else {
                    ValidationDiagnostic::warning
                };
                diag_fn(
                    StudySpecError::new(
                        ErrorCode::UnknownField,
                        format!("{path}/{key}"),
                        format!("unrecognized field \"{key}\""),
                    )
                    .with_hint("Check spelling or remove this field"),
                )
            })
            .collect()
    }
}

impl ValidationRule for UnknownFieldsRule {
    fn name(&self) -> &str {
        "unknown_fields"
    }

    fn validate(&self, spec: &StudySpec) -> Vec<ValidationDiagnostic> {
        let mut out = Self::check_unknowns("", &spec.unknown_fields, spec.strict);
        out.extend(Self::check_unknowns(
            "/options",
            &spec.options.unknown_fields,
            spec.strict,
        ));
        out
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(json: &str) -> StudySpec {
        serde_json::from_str(json).unwrap()
    }

    fn engine() -> ValidationEngine {
        ValidationEngine::with_defaults()
    }

    #[test]
    fn test_minimal_spec_is_valid() {
        let report = engine().validate(&spec(r#"{ "v": 1 }"#));
        assert!(report.is_valid());
        assert!(report.is_empty());
    }

    #[test]
    fn test_full_valid_spec() {
        let report = engine().validate(&spec(
            r#"{
                "v": 1,
                "strict": true,
                "options": {
                    "language": "fr",
                    "max_sentences": 5,
                    "total_days": 3,
                    "daily_minutes": 30,
                    "summary_lambda": 0.7,
                    "keyword_strategy": "rake"
                }
            }"#,
        ));
        assert!(report.is_empty());
    }

    #[test]
    fn test_wrong_version_fails() {
        let report = engine().validate(&spec(r#"{ "v": 2 }"#));
        let errs: Vec<_> = report.errors().collect();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].code, ErrorCode::UnsupportedVersion);
        assert_eq!(errs[0].path, "/v");
    }

    #[test]
    fn test_zero_days_and_minutes_report_two_errors() {
        let report = engine().validate(&spec(
            r#"{ "v": 1, "options": { "total_days": 0, "daily_minutes": 0 } }"#,
        ));
        let paths: Vec<_> = report.errors().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["/options/total_days", "/options/daily_minutes"]);
    }

    #[test]
    fn test_zero_section_limit_is_warning() {
        let report = engine().validate(&spec(r#"{ "v": 1, "options": { "max_cards": 0 } }"#));
        assert!(report.is_valid());
        let warnings: Vec<_> = report.warnings().collect();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].path, "/options/max_cards");
    }

    #[test]
    fn test_unsupported_language_is_warning() {
        let report = engine().validate(&spec(r#"{ "v": 1, "options": { "language": "xx" } }"#));
        assert!(report.is_valid());
        assert_eq!(
            report.warnings().next().map(|w| w.code),
            Some(ErrorCode::UnsupportedLanguage)
        );
    }

    #[test]
    fn test_lambda_out_of_range_fails() {
        let report =
            engine().validate(&spec(r#"{ "v": 1, "options": { "summary_lambda": 1.5 } }"#));
        assert!(report.has_errors());
        let report =
            engine().validate(&spec(r#"{ "v": 1, "options": { "summary_lambda": 0 } }"#));
        assert!(report.is_valid());
    }

    #[test]
    fn test_unknown_fields_non_strict_are_warnings() {
        let report = engine().validate(&spec(r#"{ "v": 1, "bogus": 1 }"#));
        assert!(report.is_valid());
        assert_eq!(report.warnings().count(), 1);
    }

    #[test]
    fn test_unknown_fields_strict_are_errors() {
        let report = engine().validate(&spec(
            r#"{ "v": 1, "strict": true, "bogus": 1, "options": { "pages": 3 } }"#,
        ));
        let paths: Vec<_> = report.errors().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["/bogus", "/options/pages"]);
    }

    #[test]
    fn test_multiple_rules_fire_independently() {
        let report = engine().validate(&spec(
            r#"{
                "v": 3,
                "strict": true,
                "bogus": true,
                "options": { "total_days": 0, "summary_lambda": -0.1 }
            }"#,
        ));
        assert_eq!(report.errors().count(), 4);
    }

    #[test]
    fn test_custom_rule() {
        struct AlwaysWarnRule;
        impl ValidationRule for AlwaysWarnRule {
            fn name(&self) -> &str {
                "always_warn"
            }
            fn validate(&self, _spec: &StudySpec) -> Vec<ValidationDiagnostic> {
                vec![ValidationDiagnostic::warning(StudySpecError::new(
                    ErrorCode::InvalidValue,
                    "",
                    "custom warning",
                ))]
            }
        }

        let mut eng = ValidationEngine::new();
        eng.add_rule(Box::new(AlwaysWarnRule));
        assert_eq!(eng.rule_names(), vec!["always_warn"]);
        let report = eng.validate(&spec(r#"{ "v": 1 }"#));
        assert!(report.is_valid());
        assert_eq!(report.warnings().count(), 1);
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = engine().validate(&spec(r#"{ "v": 1, "options": { "total_days": 0 } }"#));
        let json = serde_json::to_value(&report).unwrap();
        let diags = json["diagnostics"].as_array().unwrap();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0]["severity"], "error");
        assert_eq!(diags[0]["code"], "invalid_value");
        assert_eq!(diags[0]["path"], "/options/total_days");
    }
}
