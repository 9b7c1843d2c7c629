//! Whitespace normalization
//!
//! Collapses every run of whitespace or control characters (newlines,
//! tabs, `\r`, form feeds, NBSP) into one space and trims both ends.

/// Normalize raw extracted text into single-spaced plain text
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text
        .split(|c: char| c.is_whitespace() || c.is_control())
        .filter(|w| !w.is_empty())
    {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}
