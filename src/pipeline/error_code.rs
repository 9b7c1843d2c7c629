//! Stable, machine-readable codes for study spec diagnostics.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// A field holds a value outside its accepted range
    InvalidValue,
    /// The spec's `v` is not a version this crate reads
    UnsupportedVersion,
    /// A field the schema does not know
    UnknownField,
    /// The requested language has no resources; English is used instead
    UnsupportedLanguage,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidValue => "invalid_value",
            ErrorCode::UnsupportedVersion => "unsupported_version",
            ErrorCode::UnknownField => "unknown_field",
            ErrorCode::UnsupportedLanguage => "unsupported_language",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
