//! Lexeme classification with ordered pattern rules
//!
//! Classification is a pure function of the lexeme text and the vocabulary
//! tables. Rules are tested in fixed priority order; the first match wins.
//! Tokens already resolved at scan time (comments, preprocessor directives)
//! are never re-examined.

use crate::tokens::Category;
use crate::vocabulary;
use regex::Regex;
use std::sync::OnceLock;

/// Compiled patterns for the regex-backed rules
struct ClassifierPatterns {
    hexadecimal: Regex,
    identifier: Regex,
    numeric: Regex,
    string: Regex,
    decimal: Regex,
}

static PATTERNS: OnceLock<Option<ClassifierPatterns>> = OnceLock::new();

fn compile_patterns() -> Option<ClassifierPatterns> {
    Some(ClassifierPatterns {
        hexadecimal: Regex::new(r"^0[xX][0-9a-fA-F]+$").ok()?,
        identifier: Regex::new(r"^[_a-zA-Z][_a-zA-Z0-9]*$").ok()?,
        numeric: Regex::new(r"^([0-9]*\.[0-9]+|[0-9]+)$").ok()?,
        string: Regex::new(r#"^"([^"\\]|\\.)*"$"#).ok()?,
        decimal: Regex::new(r"^([0-9]*\.[0-9]+|[0-9]+\.)$").ok()?,
    })
}

fn patterns() -> Option<&'static ClassifierPatterns> {
    PATTERNS.get_or_init(compile_patterns).as_ref()
}

/// Validate that every classification pattern compiles
pub fn init_classifier() -> Result<(), String> {
    if patterns().is_none() {
        return Err("Classification pattern failed to compile".to_string());
    }
    Ok(())
}

/// Assign the final category for a provisional lexeme
///
/// Rule order is load-bearing: keyword membership beats the identifier
/// pattern, and the hexadecimal pattern beats the numeric one. The decimal
/// rule is reachable only for trailing-dot literals like `3.` that the
/// numeric rule rejects.
pub fn classify(lexeme: &str) -> Category {
    if vocabulary::is_keyword(lexeme) {
        return Category::Keyword;
    }

    if let Some(patterns) = patterns() {
        if patterns.hexadecimal.is_match(lexeme) {
            return Category::HexadecimalNumber;
        }
        if patterns.identifier.is_match(lexeme) {
            return Category::Identifier;
        }
        if patterns.numeric.is_match(lexeme) {
            return Category::NumericConstant;
        }
        if patterns.string.is_match(lexeme) {
            return Category::StringConstant;
        }
        if patterns.decimal.is_match(lexeme) {
            return Category::DecimalNumber;
        }
    }

    if vocabulary::is_delimiter(lexeme) {
        return Category::Delimiter;
    }
    if vocabulary::is_operator(lexeme) {
        return Category::Operator;
    }
    if lexeme.starts_with('#') {
        return Category::PreprocessorDirective;
    }

    Category::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_compile() {
        assert!(init_classifier().is_ok());
    }

    #[test]
    fn test_keyword_beats_identifier() {
        assert_eq!(classify("class"), Category::Keyword);
        assert_eq!(classify("int"), Category::Keyword);
        assert_eq!(classify("num1"), Category::Identifier);
    }

    #[test]
    fn test_hex_beats_numeric() {
        assert_eq!(classify("0x1A"), Category::HexadecimalNumber);
        assert_eq!(classify("0XFF"), Category::HexadecimalNumber);
        assert_eq!(classify("0x"), Category::Unknown);
    }

    #[test]
    fn test_numeric_vs_decimal_boundary() {
        assert_eq!(classify("42"), Category::NumericConstant);
        assert_eq!(classify("3.14"), Category::NumericConstant);
        assert_eq!(classify(".5"), Category::NumericConstant);
        // Trailing dot only matches the decimal rule
        assert_eq!(classify("3."), Category::DecimalNumber);
    }

    #[test]
    fn test_string_pattern() {
        assert_eq!(classify("\"Hello, C#\""), Category::StringConstant);
        assert_eq!(classify("\"escaped \\\" quote\""), Category::StringConstant);
        assert_eq!(classify("\"unterminated"), Category::Unknown);
    }

    #[test]
    fn test_vocabulary_rules() {
        assert_eq!(classify(";"), Category::Delimiter);
        assert_eq!(classify("{"), Category::Delimiter);
        assert_eq!(classify("="), Category::Operator);
        assert_eq!(classify("=="), Category::Operator);
    }

    #[test]
    fn test_preprocessor_safety_net() {
        assert_eq!(classify("#include"), Category::PreprocessorDirective);
    }

    #[test]
    fn test_unknown_fallback() {
        assert_eq!(classify("@"), Category::Unknown);
        assert_eq!(classify("0xG1"), Category::Unknown);
        assert_eq!(classify(""), Category::Unknown);
    }

    #[test]
    fn test_classification_is_deterministic() {
        for lexeme in ["class", "0x1A", "num1", "3.", "\"x\"", "@"] {
            assert_eq!(classify(lexeme), classify(lexeme));
        }
    }
}
