//! Vocabulary tables for C# token classification
//!
//! The keyword, operator, and delimiter word lists are compiled into the
//! binary from the build profile configuration. This module exposes them as
//! lazily-built lookup sets used by the classifier.

use crate::config::compile_time::vocabulary::{DELIMITER_WORDS, KEYWORD_WORDS, OPERATOR_WORDS};
use crate::log_success;
use std::collections::HashSet;
use std::sync::OnceLock;
use thiserror::Error;

/// Errors raised while preparing vocabulary tables
#[derive(Debug, Clone, Error)]
pub enum VocabularyError {
    #[error("Vocabulary word list '{list}' is empty")]
    EmptyWordList { list: &'static str },
}

impl VocabularyError {
    /// Map to logging error code
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            VocabularyError::EmptyWordList { .. } => {
                crate::logging::codes::vocabulary::EMPTY_WORD_LIST
            }
        }
    }
}

static KEYWORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();
static OPERATORS: OnceLock<HashSet<&'static str>> = OnceLock::new();
static DELIMITERS: OnceLock<HashSet<&'static str>> = OnceLock::new();

fn build_set(words: &'static str) -> HashSet<&'static str> {
    words.split_whitespace().collect()
}

/// Keyword lookup table
pub fn keywords() -> &'static HashSet<&'static str> {
    KEYWORDS.get_or_init(|| build_set(KEYWORD_WORDS))
}

/// Operator lookup table
pub fn operators() -> &'static HashSet<&'static str> {
    OPERATORS.get_or_init(|| build_set(OPERATOR_WORDS))
}

/// Delimiter lookup table
pub fn delimiters() -> &'static HashSet<&'static str> {
    DELIMITERS.get_or_init(|| build_set(DELIMITER_WORDS))
}

/// Validate and warm the vocabulary tables
///
/// Idempotent: repeated calls return Ok once the tables are built.
pub fn init_vocabulary() -> Result<(), VocabularyError> {
    if keywords().is_empty() {
        return Err(VocabularyError::EmptyWordList { list: "keywords" });
    }
    if operators().is_empty() {
        return Err(VocabularyError::EmptyWordList { list: "operators" });
    }
    if delimiters().is_empty() {
        return Err(VocabularyError::EmptyWordList { list: "delimiters" });
    }

    log_success!(
        crate::logging::codes::success::VOCABULARY_INITIALIZED,
        "Vocabulary tables initialized",
        "keywords" => keywords().len(),
        "operators" => operators().len(),
        "delimiters" => delimiters().len()
    );

    Ok(())
}

/// Check if a word is a reserved C# keyword
pub fn is_keyword(word: &str) -> bool {
    keywords().contains(word)
}

/// Check if a lexeme is a known operator
pub fn is_operator(lexeme: &str) -> bool {
    operators().contains(lexeme)
}

/// Check if a lexeme is a known delimiter
pub fn is_delimiter(lexeme: &str) -> bool {
    delimiters().contains(lexeme)
}

/// Vocabulary table sizes for diagnostics
pub fn table_sizes() -> (usize, usize, usize) {
    (keywords().len(), operators().len(), delimiters().len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        assert!(init_vocabulary().is_ok());
        assert!(init_vocabulary().is_ok());
    }

    #[test]
    fn test_keyword_membership() {
        assert!(is_keyword("class"));
        assert!(is_keyword("int"));
        assert!(is_keyword("namespace"));
        assert!(is_keyword("readonly"));
        assert!(!is_keyword("Class"));
        assert!(!is_keyword("num1"));
    }

    #[test]
    fn test_operator_membership() {
        assert!(is_operator("="));
        assert!(is_operator("=="));
        assert!(is_operator("<<="));
        assert!(is_operator("??"));
        assert!(is_operator("=>"));
        assert!(!is_operator("==="));
    }

    #[test]
    fn test_delimiter_membership() {
        assert!(is_delimiter(";"));
        assert!(is_delimiter("{"));
        assert!(is_delimiter("}"));
        assert!(is_delimiter("?"));
        assert!(!is_delimiter("#"));
    }

    #[test]
    fn test_table_sizes() {
        let (keywords, operators, delimiters) = table_sizes();
        assert!(keywords > 50);
        assert!(operators > 20);
        assert!(delimiters >= 10);
    }
}
