//! Core scanner implementation with file-aware logging integration
//!
//! The scanner consumes the full input once, left to right, partitioning it
//! into provisional tokens. Comments and preprocessor directives are fully
//! resolved during scanning; everything else is emitted as Unknown and
//! finalized by the classifier pass.

use crate::config::compile_time::lexical::*;
use crate::config::runtime::LexicalPreferences;
use crate::logging::codes;
use crate::tokens::{Category, SpannedToken, Token};
use crate::utils::{Position, Span, Spanned};
use crate::{log_debug, log_error};

/// Lexical context the scanner is currently inside
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScannerMode {
    Normal,
    InString,
    InSingleLineComment,
    InMultiLineComment,
}

/// Lexical analysis errors. Content never fails the scanner; these fire
/// only when compile-time resource limits are exceeded.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LexicalError {
    #[error("Source too large: {size} bytes (max {MAX_SOURCE_SIZE})")]
    SourceTooLarge { size: usize },

    #[error("Lexeme too long: {length} characters (max {MAX_LEXEME_LENGTH})")]
    LexemeTooLong { length: usize },

    #[error("Comment too long: {length} characters (max {MAX_COMMENT_LENGTH})")]
    CommentTooLong { length: usize },

    #[error("Too many tokens: {count} (max {MAX_TOKEN_COUNT})")]
    TooManyTokens { count: usize },

    #[error("Classification pattern failed to compile: {detail}")]
    PatternCompilationFailure { detail: String },

    #[error(transparent)]
    Vocabulary(#[from] crate::vocabulary::VocabularyError),
}

impl LexicalError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            LexicalError::SourceTooLarge { .. } => codes::lexical::SOURCE_TOO_LARGE,
            LexicalError::LexemeTooLong { .. } => codes::lexical::LEXEME_TOO_LONG,
            LexicalError::CommentTooLong { .. } => codes::lexical::COMMENT_TOO_LONG,
            LexicalError::TooManyTokens { .. } => codes::lexical::TOO_MANY_TOKENS,
            LexicalError::PatternCompilationFailure { .. } => {
                codes::vocabulary::PATTERN_COMPILATION_FAILURE
            }
            LexicalError::Vocabulary(e) => e.error_code(),
        }
    }
}

/// Scan-time metrics with runtime preference gating
#[derive(Debug, Default, Clone)]
pub struct LexicalMetrics {
    pub total_tokens: usize,
    pub word_tokens: usize,
    pub punctuation_tokens: usize,
    pub comment_count: usize,
    pub string_count: usize,
    pub directive_count: usize,
    pub max_lexeme_length: usize,
    pub max_comment_length: usize,
    pub max_string_length: usize,
    pub mode_transitions: usize,
}

impl LexicalMetrics {
    pub(crate) fn record_token(&mut self, token: &Token, preferences: &LexicalPreferences) {
        if token.is_comment() && !preferences.include_all_tokens_in_counts {
            self.comment_count += 1;
            return;
        }

        self.total_tokens += 1;

        match token.category {
            Category::Comment => self.comment_count += 1,
            Category::StringConstant => self.string_count += 1,
            Category::PreprocessorDirective => self.directive_count += 1,
            _ => {
                let is_punctuation =
                    token.value.len() == 1 && token.value.chars().all(|c| c.is_ascii_punctuation());
                if is_punctuation {
                    self.punctuation_tokens += 1;
                } else {
                    self.word_tokens += 1;
                }
            }
        }

        if preferences.collect_detailed_metrics {
            self.max_lexeme_length = self.max_lexeme_length.max(token.len());
        }
    }

    pub(crate) fn record_string_length(&mut self, length: usize, preferences: &LexicalPreferences) {
        self.max_string_length = self.max_string_length.max(length);

        if preferences.log_string_statistics {
            log_debug!("String constant scanned",
                "length" => length,
                "max_so_far" => self.max_string_length
            );
        }
    }

    pub(crate) fn record_comment_length(&mut self, length: usize) {
        self.max_comment_length = self.max_comment_length.max(length);
    }

    pub(crate) fn record_mode_transition(&mut self, preferences: &LexicalPreferences) {
        if preferences.track_mode_transitions {
            self.mode_transitions += 1;
        }
    }
}

/// Stateful character scanner with compile-time resource boundaries
pub struct Scanner {
    metrics: LexicalMetrics,
    preferences: LexicalPreferences,
}

impl Scanner {
    pub fn new() -> Self {
        Self {
            metrics: LexicalMetrics::default(),
            preferences: LexicalPreferences::default(),
        }
    }

    pub fn with_preferences(preferences: LexicalPreferences) -> Self {
        Self {
            metrics: LexicalMetrics::default(),
            preferences,
        }
    }

    /// Get current metrics
    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    /// Get current preferences
    pub fn preferences(&self) -> &LexicalPreferences {
        &self.preferences
    }

    /// Update preferences (runtime configurable)
    pub fn set_preferences(&mut self, preferences: LexicalPreferences) {
        self.preferences = preferences;
    }

    /// Scan the full source into an ordered sequence of provisional tokens.
    ///
    /// Comments and preprocessor directives come out fully categorized;
    /// everything else is emitted as Unknown for the classifier pass.
    /// Content never produces an error; only resource limits do.
    pub fn scan(&mut self, source: &str) -> Result<Vec<SpannedToken>, LexicalError> {
        self.metrics = LexicalMetrics::default();

        if source.len() > MAX_SOURCE_SIZE {
            let error = LexicalError::SourceTooLarge { size: source.len() };
            log_error!(error.error_code(), "Source exceeds size limit",
                "size_bytes" => source.len(),
                "limit" => MAX_SOURCE_SIZE
            );
            return Err(error);
        }

        let mut tokens: Vec<SpannedToken> = Vec::new();
        let mut mode = ScannerMode::Normal;
        let mut lexeme = String::new();
        let mut lexeme_start = Position::start();
        let mut pos = Position::start();
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            match mode {
                ScannerMode::InSingleLineComment => {
                    if c == '\n' {
                        // Newline terminates the comment and is not appended
                        let value = std::mem::take(&mut lexeme);
                        self.metrics.record_comment_length(value.len());
                        self.emit(
                            &mut tokens,
                            Token::new(value, Category::Comment),
                            Span::new(lexeme_start, pos),
                        )?;
                        mode = ScannerMode::Normal;
                        self.metrics.record_mode_transition(&self.preferences);
                    } else {
                        lexeme.push(c);
                        self.check_comment_length(&lexeme, pos)?;
                    }
                }

                ScannerMode::InMultiLineComment => {
                    if c == '*' && chars.peek() == Some(&'/') {
                        chars.next();
                        lexeme.push('*');
                        lexeme.push('/');
                        let end = pos.advance('*').advance('/');
                        let value = std::mem::take(&mut lexeme);
                        self.metrics.record_comment_length(value.len());
                        self.emit(
                            &mut tokens,
                            Token::new(value, Category::Comment),
                            Span::new(lexeme_start, end),
                        )?;
                        mode = ScannerMode::Normal;
                        self.metrics.record_mode_transition(&self.preferences);
                        pos = end;
                        continue;
                    } else {
                        lexeme.push(c);
                        self.check_comment_length(&lexeme, pos)?;
                    }
                }

                ScannerMode::InString => {
                    // No escape interpretation: every character is appended
                    // verbatim and only a bare quote terminates the string.
                    lexeme.push(c);
                    if c == '"' {
                        let end = pos.advance('"');
                        let value = std::mem::take(&mut lexeme);
                        self.metrics
                            .record_string_length(value.len(), &self.preferences);
                        self.emit(
                            &mut tokens,
                            Token::new(value, Category::StringConstant),
                            Span::new(lexeme_start, end),
                        )?;
                        mode = ScannerMode::Normal;
                        self.metrics.record_mode_transition(&self.preferences);
                        pos = end;
                        continue;
                    }
                    self.check_lexeme_length(&lexeme, pos)?;
                }

                ScannerMode::Normal => {
                    if c == '#' {
                        // Directives are resolved at scan time, before comment
                        // or string logic, so '#' never opens another context.
                        // A pending lexeme is not flushed: it joins the
                        // directive, so `abc#def` scans as one token.
                        if lexeme.is_empty() {
                            lexeme_start = pos;
                        }
                        lexeme.push('#');
                        let mut end = pos.advance('#');

                        while let Some(&next) = chars.peek() {
                            if next.is_whitespace() {
                                break;
                            }
                            lexeme.push(next);
                            end = end.advance(next);
                            chars.next();
                            self.check_lexeme_length(&lexeme, end)?;
                        }

                        let value = std::mem::take(&mut lexeme);
                        self.emit(
                            &mut tokens,
                            Token::new(value, Category::PreprocessorDirective),
                            Span::new(lexeme_start, end),
                        )?;
                        pos = end;
                        continue;
                    } else if c == '/' && matches!(chars.peek(), Some('/') | Some('*')) {
                        mode = if chars.peek() == Some(&'/') {
                            ScannerMode::InSingleLineComment
                        } else {
                            ScannerMode::InMultiLineComment
                        };
                        self.metrics.record_mode_transition(&self.preferences);

                        // A pending lexeme is not flushed: the opener extends
                        // it and the whole run becomes the comment token. The
                        // second marker character is appended next iteration.
                        if lexeme.is_empty() {
                            lexeme_start = pos;
                        }
                        lexeme.push('/');
                    } else if c == '"' {
                        self.flush_pending(&mut tokens, &mut lexeme, lexeme_start, pos)?;

                        mode = ScannerMode::InString;
                        self.metrics.record_mode_transition(&self.preferences);
                        lexeme_start = pos;
                        lexeme.push('"');
                    } else if c.is_whitespace() {
                        self.flush_pending(&mut tokens, &mut lexeme, lexeme_start, pos)?;
                    } else if c.is_ascii_punctuation() {
                        // One punctuation character per token. This fragments
                        // multi-character operators like `==`; the vocabulary
                        // lookup only ever sees them whole if scanning kept
                        // them together, which this rule deliberately does not.
                        self.flush_pending(&mut tokens, &mut lexeme, lexeme_start, pos)?;

                        self.emit(
                            &mut tokens,
                            Token::unknown(c.to_string()),
                            Span::new(pos, pos.advance(c)),
                        )?;
                    } else {
                        if lexeme.is_empty() {
                            lexeme_start = pos;
                        }
                        lexeme.push(c);
                        self.check_lexeme_length(&lexeme, pos)?;
                    }
                }
            }

            pos = pos.advance(c);
        }

        // Unterminated modes are accepted silently: whatever accumulated is
        // flushed provisional in every mode and left to the classifier,
        // which has no rule for an unclosed comment or string.
        if !lexeme.is_empty() {
            let value = std::mem::take(&mut lexeme);
            let span = Span::new(lexeme_start, pos);
            self.emit(&mut tokens, Token::unknown(value), span)?;
        }

        log_debug!("Scan pass complete",
            "tokens" => tokens.len(),
            "comments" => self.metrics.comment_count,
            "strings" => self.metrics.string_count,
            "directives" => self.metrics.directive_count
        );

        Ok(tokens)
    }

    fn emit(
        &mut self,
        tokens: &mut Vec<SpannedToken>,
        token: Token,
        span: Span,
    ) -> Result<(), LexicalError> {
        self.metrics.record_token(&token, &self.preferences);
        tokens.push(Spanned::new(token, span));

        if tokens.len() > MAX_TOKEN_COUNT {
            let error = LexicalError::TooManyTokens {
                count: tokens.len(),
            };
            log_error!(error.error_code(), "Token limit exceeded",
                span = span,
                "token_count" => tokens.len(),
                "limit" => MAX_TOKEN_COUNT
            );
            return Err(error);
        }

        Ok(())
    }

    fn flush_pending(
        &mut self,
        tokens: &mut Vec<SpannedToken>,
        lexeme: &mut String,
        start: Position,
        end: Position,
    ) -> Result<(), LexicalError> {
        if lexeme.is_empty() {
            return Ok(());
        }

        let value = std::mem::take(lexeme);
        self.emit(tokens, Token::unknown(value), Span::new(start, end))
    }

    fn check_lexeme_length(&self, lexeme: &str, pos: Position) -> Result<(), LexicalError> {
        if lexeme.len() > MAX_LEXEME_LENGTH {
            let error = LexicalError::LexemeTooLong {
                length: lexeme.len(),
            };
            self.log_limit_error(&error, pos);
            return Err(error);
        }
        Ok(())
    }

    fn check_comment_length(&self, lexeme: &str, pos: Position) -> Result<(), LexicalError> {
        if lexeme.len() > MAX_COMMENT_LENGTH {
            let error = LexicalError::CommentTooLong {
                length: lexeme.len(),
            };
            self.log_limit_error(&error, pos);
            return Err(error);
        }
        Ok(())
    }

    fn log_limit_error(&self, error: &LexicalError, pos: Position) {
        let message = if self.preferences.include_position_in_errors {
            format!(
                "Lexical limit exceeded at line {}, column {}",
                pos.line, pos.column
            )
        } else {
            "Lexical limit exceeded".to_string()
        };

        log_error!(error.error_code(), &message,
            span = Span::new(pos, pos),
            "line" => pos.line,
            "column" => pos.column
        );
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(source: &str) -> Vec<SpannedToken> {
        Scanner::new().scan(source).unwrap()
    }

    fn values(tokens: &[SpannedToken]) -> Vec<&str> {
        tokens.iter().map(|t| t.value.value.as_str()).collect()
    }

    #[test]
    fn test_whitespace_separated_words() {
        let tokens = scan("int num1");
        assert_eq!(values(&tokens), vec!["int", "num1"]);
        assert!(tokens.iter().all(|t| t.value.is_unknown()));
    }

    #[test]
    fn test_punctuation_one_char_per_token() {
        let tokens = scan("a == b");
        assert_eq!(values(&tokens), vec!["a", "=", "=", "b"]);
    }

    #[test]
    fn test_string_with_hash_stays_one_token() {
        let tokens = scan("\"Hello, C#\"");
        assert_eq!(values(&tokens), vec!["\"Hello, C#\""]);
        assert_eq!(tokens[0].value.category, Category::StringConstant);
    }

    #[test]
    fn test_string_flushes_pending_lexeme() {
        let tokens = scan("x\"s\"");
        assert_eq!(values(&tokens), vec!["x", "\"s\""]);
    }

    #[test]
    fn test_preprocessor_directive_greedy() {
        let tokens = scan("#define MAX 10");
        assert_eq!(values(&tokens), vec!["#define", "MAX", "10"]);
        assert_eq!(tokens[0].value.category, Category::PreprocessorDirective);
    }

    #[test]
    fn test_single_line_comment_excludes_newline() {
        let tokens = scan("// addition\n");
        assert_eq!(values(&tokens), vec!["// addition"]);
        assert_eq!(tokens[0].value.category, Category::Comment);
    }

    #[test]
    fn test_multi_line_comment_includes_delimiters() {
        let tokens = scan("/*multi\nline*/");
        assert_eq!(values(&tokens), vec!["/*multi\nline*/"]);
        assert_eq!(tokens[0].value.category, Category::Comment);
    }

    #[test]
    fn test_slash_inside_string_not_comment() {
        let tokens = scan("\"a // b\"");
        assert_eq!(values(&tokens), vec!["\"a // b\""]);
        assert_eq!(tokens[0].value.category, Category::StringConstant);
    }

    #[test]
    fn test_lone_slash_is_punctuation() {
        let tokens = scan("a / b");
        assert_eq!(values(&tokens), vec!["a", "/", "b"]);
    }

    #[test]
    fn test_unterminated_string_flushed() {
        let tokens = scan("\"open");
        assert_eq!(values(&tokens), vec!["\"open"]);
        assert_eq!(tokens[0].value.category, Category::Unknown);
    }

    #[test]
    fn test_unterminated_comment_flushed_provisional() {
        // No closing marker ever arrived, so the lexeme stays Unknown
        // rather than being promoted to a comment.
        let tokens = scan("/* open");
        assert_eq!(values(&tokens), vec!["/* open"]);
        assert_eq!(tokens[0].value.category, Category::Unknown);

        let tokens = scan("// open");
        assert_eq!(values(&tokens), vec!["// open"]);
        assert_eq!(tokens[0].value.category, Category::Unknown);
    }

    #[test]
    fn test_pending_lexeme_joins_comment() {
        let tokens = scan("abc// x\n");
        assert_eq!(values(&tokens), vec!["abc// x"]);
        assert_eq!(tokens[0].value.category, Category::Comment);

        let tokens = scan("abc/*x*/");
        assert_eq!(values(&tokens), vec!["abc/*x*/"]);
        assert_eq!(tokens[0].value.category, Category::Comment);
    }

    #[test]
    fn test_pending_lexeme_joins_directive() {
        let tokens = scan("abc#def ;");
        assert_eq!(values(&tokens), vec!["abc#def", ";"]);
        assert_eq!(tokens[0].value.category, Category::PreprocessorDirective);
    }

    #[test]
    fn test_hex_literal_splitting() {
        // "0xG1" keeps letters and digits together; nothing here is
        // punctuation so the run survives as one lexeme.
        let tokens = scan("0xG1");
        assert_eq!(values(&tokens), vec!["0xG1"]);
    }

    #[test]
    fn test_coverage_reconstruction() {
        let source = "int num1 = 42; // done\n\"str\" 3.14";
        let tokens = scan(source);

        let mut reconstructed: String = String::new();
        let mut cursor = 0;
        for token in &tokens {
            let start = token.span.start.offset;
            // Everything between tokens must be pure whitespace
            assert!(source[cursor..start].chars().all(char::is_whitespace));
            reconstructed.push_str(&source[cursor..start]);
            reconstructed.push_str(&token.value.value);
            cursor = start + token.value.value.len();
        }
        reconstructed.push_str(&source[cursor..]);
        assert_eq!(reconstructed, source);
    }

    #[test]
    fn test_spans_track_lines() {
        let tokens = scan("int\nnum1");
        assert_eq!(tokens[0].span.start.line, 1);
        assert_eq!(tokens[1].span.start.line, 2);
        assert_eq!(tokens[1].span.start.column, 1);
    }

    #[test]
    fn test_error_clones_through_vocabulary_variant() {
        let error = LexicalError::Vocabulary(crate::vocabulary::VocabularyError::EmptyWordList {
            list: "keywords",
        });
        let copy = error.clone();
        assert_eq!(copy.error_code().as_str(), "E030");
    }

    #[test]
    fn test_metrics_counts() {
        let mut scanner = Scanner::new();
        let tokens = scanner
            .scan("int x = 1; // c\n\"s\" #region")
            .unwrap();
        assert!(!tokens.is_empty());

        let metrics = scanner.metrics();
        assert_eq!(metrics.comment_count, 1);
        assert_eq!(metrics.string_count, 1);
        assert_eq!(metrics.directive_count, 1);
    }
}
