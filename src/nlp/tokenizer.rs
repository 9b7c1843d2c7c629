//! Word tokenization
//!
//! A word is a run of alphanumeric characters, underscores and inner
//! hyphens. Apostrophes and whitespace separate words; any other
//! punctuation also produces a [`TokenKind::Boundary`] token, which phrase
//! chunking treats as a hard break.

/// Minimum length, in characters, of a term that can become a keyword
pub const MIN_TERM_CHARS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Word,
    Boundary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    /// Byte offset in the tokenized text
    pub start: usize,
    pub kind: TokenKind,
}

impl<'a> Token<'a> {
    pub fn is_word(&self) -> bool {
        self.kind == TokenKind::Word
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == '\'' || c == '\u{2019}'
}

fn push_run<'a>(tokens: &mut Vec<Token<'a>>, text: &'a str, start: usize, end: usize) {
    let raw = &text[start..end];
    let trimmed = raw.trim_matches('-');
    if trimmed.is_empty() {
        // A bare dash run (" - ") separates clauses.
        tokens.push(Token {
            text: raw,
            start,
            kind: TokenKind::Boundary,
        });
    } else {
        let offset = raw.len() - raw.trim_start_matches('-').len();
        tokens.push(Token {
            text: trimmed,
            start: start + offset,
            kind: TokenKind::Word,
        });
    }
}

/// Split `text` into words and punctuation boundaries
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut run_start: Option<usize> = None;

    for (pos, c) in text.char_indices() {
        if is_word_char(c) {
            if run_start.is_none() {
                run_start = Some(pos);
            }
            continue;
        }
        if let Some(start) = run_start.take() {
            push_run(&mut tokens, text, start, pos);
        }
        if !is_separator(c) {
            tokens.push(Token {
                text: &text[pos..pos + c.len_utf8()],
                start: pos,
                kind: TokenKind::Boundary,
            });
        }
    }
    if let Some(start) = run_start {
        push_run(&mut tokens, text, start, text.len());
    }

    tokens
}

/// Whether a word is long enough and lexical enough to be a keyword term
pub fn is_candidate_term(word: &str) -> bool {
    word.chars().count() >= MIN_TERM_CHARS && word.chars().any(char::is_alphabetic)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<&str> {
        tokenize(text)
            .into_iter()
            .filter(|t| t.is_word())
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn test_words_and_boundaries() {
        let tokens = tokenize("Cells divide, then grow.");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Word,
                TokenKind::Word,
                TokenKind::Boundary,
                TokenKind::Word,
                TokenKind::Word,
                TokenKind::Boundary,
            ]
        );
        assert_eq!(tokens[3].text, "then");
        assert_eq!(tokens[3].start, 14);
    }

    #[test]
    fn test_hyphenated_words_stay_whole() {
        assert_eq!(words("state-of-the-art -- models"), vec!["state-of-the-art", "models"]);
        assert_eq!(words("-leading and trailing-"), vec!["leading", "and", "trailing"]);
    }

    #[test]
    fn test_apostrophes_split_words() {
        assert_eq!(words("l'ordinateur d’abord"), vec!["l", "ordinateur", "d", "abord"]);
    }

    #[test]
    fn test_unicode_words() {
        assert_eq!(words("Économie générale"), vec!["Économie", "générale"]);
    }

    #[test]
    fn test_candidate_terms() {
        assert!(is_candidate_term("cell"));
        assert!(is_candidate_term("CO2"));
        assert!(!is_candidate_term("at"));
        assert!(!is_candidate_term("2024"));
    }
}
