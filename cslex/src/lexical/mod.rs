//! Lexical analysis module
//!
//! Two-pass tokenization of C# source text: a stateful scan pass that
//! partitions the input into provisional tokens, then a classification pass
//! that assigns every provisional token its final category.

pub mod classifier;
pub mod scanner;

use crate::config::compile_time::lexical::*;
use crate::config::runtime::LexicalPreferences;
use crate::file_processor::FileProcessingResult;
use crate::logging::codes;
use crate::tokens::{Category, SourceMap, TokenStream};
use crate::{log_debug, log_success};

pub use classifier::classify;
pub use scanner::{LexicalError, LexicalMetrics, Scanner, ScannerMode};

// ============================================================================
// MODULE API
// ============================================================================

/// Tokenize raw source text
pub fn tokenize_source(source: &str) -> Result<TokenStream, LexicalError> {
    let mut scanner = Scanner::new();
    tokenize_with(&mut scanner, source, None)
}

/// Tokenize with custom runtime preferences (resource boundaries remain compile-time)
pub fn tokenize_source_with_preferences(
    source: &str,
    preferences: LexicalPreferences,
) -> Result<TokenStream, LexicalError> {
    let mut scanner = Scanner::with_preferences(preferences);
    tokenize_with(&mut scanner, source, None)
}

/// Tokenize a processed file with file-aware logging
pub fn tokenize_file_result(file_result: FileProcessingResult) -> Result<TokenStream, LexicalError> {
    let file_path = file_result.metadata.path.display().to_string();

    log_debug!("Starting lexical analysis",
        "file" => file_path.as_str(),
        "char_count" => file_result.char_count(),
        "line_count" => file_result.metadata.line_count,
        "file_size_bytes" => file_result.metadata.size
    );

    let mut scanner = Scanner::new();
    let stream = tokenize_with(&mut scanner, &file_result.source, Some(&file_path))?;

    let processing_rate = if file_result.processing_duration.as_secs_f64() > 0.0 {
        file_result.char_count() as f64 / (file_result.processing_duration.as_secs_f64() * 1000.0)
    } else {
        0.0
    };

    let counts = get_token_counts(&stream);
    log_success!(codes::success::TOKENIZATION_COMPLETE,
        "Lexical analysis completed successfully",
        "file" => file_path.as_str(),
        "token_count" => counts.total,
        "keywords" => counts.keywords,
        "identifiers" => counts.identifiers,
        "operators" => counts.operators,
        "comments" => counts.comments,
        "unknown" => counts.unknown,
        "file_size_bytes" => file_result.metadata.size,
        "file_lines" => file_result.metadata.line_count,
        "chars_per_ms" => format!("{:.2}", processing_rate)
    );

    Ok(stream)
}

/// Create a new scanner with default preferences
pub fn create_scanner() -> Scanner {
    Scanner::new()
}

/// Create scanner with custom runtime preferences
pub fn create_scanner_with_preferences(preferences: LexicalPreferences) -> Scanner {
    Scanner::with_preferences(preferences)
}

fn tokenize_with(
    scanner: &mut Scanner,
    source: &str,
    file: Option<&str>,
) -> Result<TokenStream, LexicalError> {
    crate::vocabulary::init_vocabulary()?;
    classifier::init_classifier()
        .map_err(|detail| LexicalError::PatternCompilationFailure { detail })?;

    let mut tokens = scanner.scan(source)?;

    // Classification pass: finalize every provisional token. Comments and
    // directives are already resolved and pass through unchanged.
    let mut classified = 0usize;
    for spanned in tokens.iter_mut() {
        if spanned.value.is_unknown() {
            spanned.value.category = classifier::classify(&spanned.value.value);
            classified += 1;
        }
    }

    log_success!(codes::success::CLASSIFICATION_COMPLETE,
        "Token classification completed",
        "classified" => classified,
        "total" => tokens.len(),
        "file" => file.unwrap_or("<memory>")
    );

    Ok(TokenStream::with_source_map(
        tokens,
        SourceMap::new(source.to_string()),
    ))
}

// ============================================================================
// MODULE INITIALIZATION AND VALIDATION
// ============================================================================

/// Validate that lexical error codes and patterns are properly configured
pub fn init_lexical_analysis_logging() -> Result<(), String> {
    let test_codes = [
        codes::lexical::SOURCE_TOO_LARGE,
        codes::lexical::LEXEME_TOO_LONG,
        codes::lexical::COMMENT_TOO_LONG,
        codes::lexical::TOO_MANY_TOKENS,
        codes::vocabulary::EMPTY_WORD_LIST,
        codes::vocabulary::PATTERN_COMPILATION_FAILURE,
    ];

    for code in &test_codes {
        let description = codes::get_description(code.as_str());
        if description == "Unknown error" {
            return Err(format!(
                "Lexical error code {} has no description",
                code.as_str()
            ));
        }

        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Lexical error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    classifier::init_classifier()?;

    log_debug!("Lexical resource limits initialized",
        "max_source_size" => MAX_SOURCE_SIZE,
        "max_lexeme_length" => MAX_LEXEME_LENGTH,
        "max_comment_length" => MAX_COMMENT_LENGTH,
        "max_token_count" => MAX_TOKEN_COUNT
    );

    Ok(())
}

/// Validate compile-time resource limits are sane
pub fn validate_tokenization() -> Result<(), String> {
    if MAX_SOURCE_SIZE == 0 {
        return Err("MAX_SOURCE_SIZE cannot be zero".to_string());
    }
    if MAX_LEXEME_LENGTH == 0 {
        return Err("MAX_LEXEME_LENGTH cannot be zero".to_string());
    }
    if MAX_COMMENT_LENGTH == 0 {
        return Err("MAX_COMMENT_LENGTH cannot be zero".to_string());
    }
    if MAX_TOKEN_COUNT == 0 {
        return Err("MAX_TOKEN_COUNT cannot be zero".to_string());
    }

    if MAX_SOURCE_SIZE > 100_000_000 {
        return Err("MAX_SOURCE_SIZE exceeds reasonable limit".to_string());
    }
    if MAX_TOKEN_COUNT > 10_000_000 {
        return Err("MAX_TOKEN_COUNT exceeds reasonable limit".to_string());
    }

    Ok(())
}

/// Get the current compile-time resource limits (for reporting/debugging)
pub fn get_security_limits() -> SecurityLimits {
    SecurityLimits {
        max_source_size: MAX_SOURCE_SIZE,
        max_lexeme_length: MAX_LEXEME_LENGTH,
        max_comment_length: MAX_COMMENT_LENGTH,
        max_token_count: MAX_TOKEN_COUNT,
    }
}

/// Information about compile-time resource limits
#[derive(Debug, Clone)]
pub struct SecurityLimits {
    pub max_source_size: usize,
    pub max_lexeme_length: usize,
    pub max_comment_length: usize,
    pub max_token_count: usize,
}

impl SecurityLimits {
    /// Check if the limits are SSDF compliant (conservative estimates)
    pub fn is_ssdf_compliant(&self) -> bool {
        self.max_source_size <= 100_000_000
            && self.max_lexeme_length <= 100_000
            && self.max_comment_length <= 1_000_000
            && self.max_token_count <= 10_000_000
    }
}

// ============================================================================
// TOKEN DISTRIBUTION ANALYSIS
// ============================================================================

/// Per-category token counts for a scanned stream
pub fn get_token_counts(token_stream: &TokenStream) -> TokenCounts {
    let mut counts = TokenCounts::default();

    for token in token_stream.all_tokens() {
        counts.total += 1;
        match token.value.category {
            Category::Keyword => counts.keywords += 1,
            Category::Identifier => counts.identifiers += 1,
            Category::NumericConstant => counts.numeric_constants += 1,
            Category::HexadecimalNumber => counts.hexadecimal_numbers += 1,
            Category::DecimalNumber => counts.decimal_numbers += 1,
            Category::StringConstant => counts.string_constants += 1,
            Category::Operator => counts.operators += 1,
            Category::Delimiter => counts.delimiters += 1,
            Category::PreprocessorDirective => counts.preprocessor_directives += 1,
            Category::Comment => counts.comments += 1,
            Category::Unknown => counts.unknown += 1,
        }
    }

    counts
}

/// Token distribution by category
#[derive(Debug, Default, Clone)]
pub struct TokenCounts {
    pub total: usize,
    pub keywords: usize,
    pub identifiers: usize,
    pub numeric_constants: usize,
    pub hexadecimal_numbers: usize,
    pub decimal_numbers: usize,
    pub string_constants: usize,
    pub operators: usize,
    pub delimiters: usize,
    pub preprocessor_directives: usize,
    pub comments: usize,
    pub unknown: usize,
}

impl TokenCounts {
    /// Count of significant tokens (excluding comments)
    pub fn significant_tokens(&self) -> usize {
        self.total - self.comments
    }

    /// Check if tokenization found meaningful content
    pub fn has_content(&self) -> bool {
        self.keywords > 0 || self.identifiers > 0 || self.string_constants > 0
    }

    /// Check if token counts are within resource limits
    pub fn is_within_security_limits(&self) -> bool {
        self.total <= MAX_TOKEN_COUNT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_pairs(stream: &TokenStream) -> Vec<(String, Category)> {
        stream
            .all_tokens()
            .iter()
            .map(|t| (t.value.value.clone(), t.value.category))
            .collect()
    }

    #[test]
    fn test_end_to_end_declaration() {
        let stream = tokenize_source("int num1 = 42;").unwrap();
        assert_eq!(
            token_pairs(&stream),
            vec![
                ("int".to_string(), Category::Keyword),
                ("num1".to_string(), Category::Identifier),
                ("=".to_string(), Category::Operator),
                ("42".to_string(), Category::NumericConstant),
                (";".to_string(), Category::Delimiter),
            ]
        );
    }

    #[test]
    fn test_keyword_precedence_over_identifier() {
        let stream = tokenize_source("class MyClass").unwrap();
        let pairs = token_pairs(&stream);
        assert_eq!(pairs[0], ("class".to_string(), Category::Keyword));
        assert_eq!(pairs[1], ("MyClass".to_string(), Category::Identifier));
    }

    #[test]
    fn test_hexadecimal_literal() {
        let stream = tokenize_source("0x1A").unwrap();
        assert_eq!(
            token_pairs(&stream),
            vec![("0x1A".to_string(), Category::HexadecimalNumber)]
        );
    }

    #[test]
    fn test_invalid_hex_degrades_to_unknown() {
        let stream = tokenize_source("0xG1").unwrap();
        assert_eq!(
            token_pairs(&stream),
            vec![("0xG1".to_string(), Category::Unknown)]
        );
    }

    #[test]
    fn test_string_with_hash_is_one_token() {
        let stream = tokenize_source("\"Hello, C#\"").unwrap();
        assert_eq!(
            token_pairs(&stream),
            vec![("\"Hello, C#\"".to_string(), Category::StringConstant)]
        );
    }

    #[test]
    fn test_comments_pass_through_classifier() {
        let stream = tokenize_source("// addition\n/*multi\nline*/").unwrap();
        assert_eq!(
            token_pairs(&stream),
            vec![
                ("// addition".to_string(), Category::Comment),
                ("/*multi\nline*/".to_string(), Category::Comment),
            ]
        );
    }

    #[test]
    fn test_unterminated_comment_stays_unknown() {
        let stream = tokenize_source("/* open").unwrap();
        assert_eq!(
            token_pairs(&stream),
            vec![("/* open".to_string(), Category::Unknown)]
        );
    }

    #[test]
    fn test_dotted_number_fragments_by_punctuation() {
        // '.' is punctuation, so "3.14" splits before classification;
        // the dot itself is looked up in the operator table.
        let stream = tokenize_source("3.14").unwrap();
        assert_eq!(
            token_pairs(&stream),
            vec![
                ("3".to_string(), Category::NumericConstant),
                (".".to_string(), Category::Operator),
                ("14".to_string(), Category::NumericConstant),
            ]
        );
    }

    #[test]
    fn test_multi_char_operator_fragments() {
        let stream = tokenize_source("a == b").unwrap();
        let pairs = token_pairs(&stream);
        assert_eq!(pairs[1], ("=".to_string(), Category::Operator));
        assert_eq!(pairs[2], ("=".to_string(), Category::Operator));
    }

    #[test]
    fn test_preprocessor_directive() {
        let stream = tokenize_source("#region Setup").unwrap();
        let pairs = token_pairs(&stream);
        assert_eq!(
            pairs[0],
            ("#region".to_string(), Category::PreprocessorDirective)
        );
        assert_eq!(pairs[1], ("Setup".to_string(), Category::Identifier));
    }

    #[test]
    fn test_tokenization_is_repeatable() {
        let first = token_pairs(&tokenize_source("int x = 0x1A;").unwrap());
        let second = token_pairs(&tokenize_source("int x = 0x1A;").unwrap());
        assert_eq!(first, second);
    }

    #[test]
    fn test_token_counts() {
        let stream = tokenize_source("int num1 = 42; // done\n").unwrap();
        let counts = get_token_counts(&stream);

        assert_eq!(counts.keywords, 1);
        assert_eq!(counts.identifiers, 1);
        assert_eq!(counts.operators, 1);
        assert_eq!(counts.numeric_constants, 1);
        assert_eq!(counts.delimiters, 1);
        assert_eq!(counts.comments, 1);
        assert_eq!(counts.significant_tokens(), counts.total - 1);
        assert!(counts.has_content());
        assert!(counts.is_within_security_limits());
    }

    #[test]
    fn test_validation_functions() {
        assert!(validate_tokenization().is_ok());
        assert!(init_lexical_analysis_logging().is_ok());
    }

    #[test]
    fn test_security_limits_reporting() {
        let limits = get_security_limits();
        assert!(limits.max_source_size > 0);
        assert!(limits.max_lexeme_length > 0);
        assert!(limits.max_token_count > 0);
        assert!(limits.is_ssdf_compliant());
    }

    #[test]
    fn test_empty_source() {
        let stream = tokenize_source("").unwrap();
        assert!(stream.all_tokens().is_empty());
    }

    #[test]
    fn test_whitespace_only_source() {
        let stream = tokenize_source("   \n\t  ").unwrap();
        assert!(stream.all_tokens().is_empty());
    }
}
