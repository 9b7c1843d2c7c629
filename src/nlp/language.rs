//! Supported languages and the process-wide language resources.
//!
//! Resources (stopword tables, abbreviation lists) are read-only once built.
//! [`LanguageRegistry::global`] builds them at most once per process, even
//! when several pipelines hit it concurrently; callers that want the cost
//! paid up front call [`LanguageRegistry::init`] at startup, and tests or
//! embedders can hand a pipeline their own registry instead.

use std::fmt;
use std::sync::{Arc, OnceLock};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::stopwords::StopwordFilter;

/// Language used when a requested tag is not supported
pub const FALLBACK_LANGUAGE: Language = Language::English;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    English,
    French,
    German,
    Spanish,
    Italian,
    Portuguese,
    Dutch,
    Russian,
    Swedish,
    Norwegian,
    Danish,
    Finnish,
    Hungarian,
    Turkish,
    Polish,
    Arabic,
    Chinese,
    Japanese,
}

impl Language {
    pub const ALL: [Language; 18] = [
        Language::English,
        Language::French,
        Language::German,
        Language::Spanish,
        Language::Italian,
        Language::Portuguese,
        Language::Dutch,
        Language::Russian,
        Language::Swedish,
        Language::Norwegian,
        Language::Danish,
        Language::Finnish,
        Language::Hungarian,
        Language::Turkish,
        Language::Polish,
        Language::Arabic,
        Language::Chinese,
        Language::Japanese,
    ];

    /// Parse an ISO 639-1 code or an English language name.
    ///
    /// Region suffixes are ignored (`fr-CA`, `en_US`).
    pub fn parse(tag: &str) -> Option<Self> {
        let tag = tag.trim().to_lowercase();
        let base = tag.split(['-', '_']).next().unwrap_or("");
        let lang = match base {
            "en" | "english" => Language::English,
            "fr" | "french" | "francais" | "français" => Language::French,
            "de" | "german" => Language::German,
            "es" | "spanish" => Language::Spanish,
            "it" | "italian" => Language::Italian,
            "pt" | "portuguese" => Language::Portuguese,
            "nl" | "dutch" => Language::Dutch,
            "ru" | "russian" => Language::Russian,
            "sv" | "swedish" => Language::Swedish,
            "no" | "nb" | "norwegian" => Language::Norwegian,
            "da" | "danish" => Language::Danish,
            "fi" | "finnish" => Language::Finnish,
            "hu" | "hungarian" => Language::Hungarian,
            "tr" | "turkish" => Language::Turkish,
            "pl" | "polish" => Language::Polish,
            "ar" | "arabic" => Language::Arabic,
            "zh" | "chinese" => Language::Chinese,
            "ja" | "japanese" => Language::Japanese,
            _ => return None,
        };
        Some(lang)
    }

    /// Parse a tag, falling back to [`FALLBACK_LANGUAGE`] when unsupported
    pub fn resolve(tag: &str) -> Self {
        match Self::parse(tag) {
            Some(lang) => lang,
            None => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    language = tag,
                    fallback = %FALLBACK_LANGUAGE,
                    "unsupported language, falling back"
                );
                FALLBACK_LANGUAGE
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::French => "fr",
            Language::German => "de",
            Language::Spanish => "es",
            Language::Italian => "it",
            Language::Portuguese => "pt",
            Language::Dutch => "nl",
            Language::Russian => "ru",
            Language::Swedish => "sv",
            Language::Norwegian => "no",
            Language::Danish => "da",
            Language::Finnish => "fi",
            Language::Hungarian => "hu",
            Language::Turkish => "tr",
            Language::Polish => "pl",
            Language::Arabic => "ar",
            Language::Chinese => "zh",
            Language::Japanese => "ja",
        }
    }

    /// Lower-cased abbreviations (without the trailing period) that do not
    /// end a sentence.
    pub fn abbreviations(&self) -> &'static [&'static str] {
        match self {
            Language::English => &[
                "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "e.g", "i.e", "fig",
            ],
            Language::French => &[
                "m", "mm", "mme", "mlle", "dr", "pr", "st", "ste", "cf", "p", "fig", "vol",
            ],
            Language::German => &["dr", "prof", "hr", "fr", "z.b", "usw", "bzw", "vgl", "nr"],
            Language::Spanish | Language::Portuguese | Language::Italian => {
                &["sr", "sra", "srta", "dr", "dra", "prof", "pág", "núm"]
            }
            _ => &["dr", "prof"],
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Read-only per-language resources, built eagerly for every supported
/// language.
#[derive(Debug)]
pub struct LanguageRegistry {
    stopwords: FxHashMap<Language, Arc<StopwordFilter>>,
}

static GLOBAL_REGISTRY: OnceLock<Arc<LanguageRegistry>> = OnceLock::new();

impl LanguageRegistry {
    /// Build a fresh registry with every supported language loaded
    pub fn load() -> Self {
        let stopwords = Language::ALL
            .iter()
            .map(|&lang| (lang, Arc::new(StopwordFilter::new(lang))))
            .collect();
        Self { stopwords }
    }

    /// Build a registry with an explicit stopword table per language.
    ///
    /// Languages missing from `tables` get an empty filter.
    pub fn with_stopwords(tables: impl IntoIterator<Item = (Language, StopwordFilter)>) -> Self {
        let mut stopwords: FxHashMap<Language, Arc<StopwordFilter>> = tables
            .into_iter()
            .map(|(lang, filter)| (lang, Arc::new(filter)))
            .collect();
        for lang in Language::ALL {
            stopwords
                .entry(lang)
                .or_insert_with(|| Arc::new(StopwordFilter::empty()));
        }
        Self { stopwords }
    }

    /// The shared process-wide registry, built on first use
    pub fn global() -> Arc<LanguageRegistry> {
        GLOBAL_REGISTRY
            .get_or_init(|| {
                #[cfg(feature = "tracing")]
                tracing::debug!("loading language resources");
                Arc::new(Self::load())
            })
            .clone()
    }

    /// Force the global registry to load now
    pub fn init() {
        let _ = Self::global();
    }

    /// Stopwords for a supported language
    pub fn stopwords(&self, language: Language) -> Arc<StopwordFilter> {
        self.stopwords
            .get(&language)
            .cloned()
            .unwrap_or_else(|| Arc::new(StopwordFilter::empty()))
    }
}
