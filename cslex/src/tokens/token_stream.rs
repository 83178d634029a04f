//! Span-accurate token stream management
//!
//! Maintains accurate source locations across filtered token streams so
//! consumers can navigate significant tokens while comments keep their
//! original positions.

use crate::{
    tokens::token::Token,
    utils::{Position, SourceMap, Span, Spanned},
};

/// A token with span information
pub type SpannedToken = Spanned<Token>;

/// Token stream that preserves precise source locations even when
/// filtering comments out of navigation.
#[derive(Debug, Clone)]
pub struct TokenStream {
    /// All tokens (including comments) with original spans
    all_tokens: Vec<SpannedToken>,
    /// Indices into all_tokens for significant (non-comment) tokens
    significant_indices: Vec<usize>,
    /// Current position in significant_indices array
    position: usize,
    /// Source map for error reporting and span validation
    source_map: Option<SourceMap>,
}

impl TokenStream {
    /// Create a new token stream with automatic comment filtering
    pub fn new(tokens: Vec<SpannedToken>) -> Self {
        let mut stream = Self {
            all_tokens: tokens,
            significant_indices: Vec::new(),
            position: 0,
            source_map: None,
        };
        stream.rebuild_significant_indices();
        stream
    }

    /// Create stream with source map for enhanced error reporting
    pub fn with_source_map(tokens: Vec<SpannedToken>, source_map: SourceMap) -> Self {
        let mut stream = Self {
            all_tokens: tokens,
            significant_indices: Vec::new(),
            position: 0,
            source_map: Some(source_map),
        };
        stream.rebuild_significant_indices();
        stream
    }

    /// Create stream treating every token as significant
    pub fn with_all_tokens(tokens: Vec<SpannedToken>) -> Self {
        let significant_indices = (0..tokens.len()).collect();
        Self {
            all_tokens: tokens,
            significant_indices,
            position: 0,
            source_map: None,
        }
    }

    fn rebuild_significant_indices(&mut self) {
        self.significant_indices.clear();

        for (i, spanned_token) in self.all_tokens.iter().enumerate() {
            if spanned_token.value.is_significant() {
                self.significant_indices.push(i);
            }
        }

        crate::log_debug!("Token stream built",
            "total_tokens" => self.all_tokens.len(),
            "significant_tokens" => self.significant_indices.len()
        );

        self.position = 0;
    }

    // === CORE NAVIGATION ===

    /// Get the current significant token with accurate span
    pub fn current(&self) -> Option<&SpannedToken> {
        self.significant_indices
            .get(self.position)
            .and_then(|&original_index| self.all_tokens.get(original_index))
    }

    /// Get the current token value (without span)
    pub fn current_token(&self) -> Option<&Token> {
        self.current().map(|spanned| &spanned.value)
    }

    /// Get the accurate span of the current token
    pub fn current_span(&self) -> Option<Span> {
        self.current().map(|spanned| spanned.span)
    }

    /// Peek at the next significant token without advancing
    pub fn peek(&self) -> Option<&SpannedToken> {
        self.peek_ahead(1)
    }

    /// Peek ahead by n positions in significant tokens
    pub fn peek_ahead(&self, n: usize) -> Option<&SpannedToken> {
        self.significant_indices
            .get(self.position + n)
            .and_then(|&original_index| self.all_tokens.get(original_index))
    }

    /// Advance to the next significant token
    pub fn advance(&mut self) -> Option<&SpannedToken> {
        if self.position < self.significant_indices.len() {
            self.position += 1;
        }
        self.current()
    }

    /// Check if we're at the end of significant tokens
    pub fn is_at_end(&self) -> bool {
        self.position >= self.significant_indices.len()
    }

    /// Get the number of significant tokens
    pub fn len(&self) -> usize {
        self.significant_indices.len()
    }

    /// Check if the stream has no significant tokens
    pub fn is_empty(&self) -> bool {
        self.significant_indices.is_empty()
    }

    // === SPAN ACCURACY ===

    /// Get span at a specific position in significant tokens
    pub fn span_at_position(&self, position: usize) -> Option<Span> {
        self.significant_indices
            .get(position)
            .and_then(|&original_index| self.all_tokens.get(original_index))
            .map(|spanned| spanned.span)
    }

    /// Get span covering a range of significant token positions
    pub fn span_range(&self, start_pos: usize, end_pos: usize) -> Span {
        let start_span = self.span_at_position(start_pos);
        let end_span = self.span_at_position(end_pos);

        match (start_span, end_span) {
            (Some(start), Some(end)) => start.merge(end),
            (Some(start), None) => start,
            (None, Some(end)) => end,
            (None, None) => Span::dummy(),
        }
    }

    // === ERROR REPORTING ===

    /// Format an error with accurate source context
    pub fn format_error(&self, span: Span, message: &str) -> String {
        if let Some(ref source_map) = self.source_map {
            source_map.format_error(&span, message)
        } else {
            format!("Error at {}: {}", span, message)
        }
    }

    /// Get source text for a span (if source map available)
    pub fn source_text(&self, span: &Span) -> Option<&str> {
        self.source_map.as_ref().map(|sm| sm.span_text(span))
    }

    // === CHECKPOINTING ===

    /// Save current position as checkpoint
    pub fn save_position(&self) -> usize {
        self.position
    }

    /// Restore position from checkpoint
    pub fn restore_position(&mut self, saved_position: usize) {
        self.position = saved_position.min(self.significant_indices.len());
    }

    // === ITERATION ===

    /// Get an iterator over significant tokens with spans
    pub fn iter_significant(&self) -> impl Iterator<Item = &SpannedToken> {
        self.significant_indices
            .iter()
            .map(|&i| &self.all_tokens[i])
    }

    /// Get all tokens (including comments) with spans
    pub fn all_tokens(&self) -> &[SpannedToken] {
        &self.all_tokens
    }

    /// Get remaining significant tokens from current position
    pub fn remaining_tokens(&self) -> impl Iterator<Item = &SpannedToken> {
        self.significant_indices[self.position..]
            .iter()
            .map(|&i| &self.all_tokens[i])
    }

    // === DIAGNOSTICS ===

    /// Get current position for debugging
    pub fn position(&self) -> usize {
        self.position
    }

    /// Get remaining token count
    pub fn remaining_count(&self) -> usize {
        self.significant_indices.len().saturating_sub(self.position)
    }

    /// Diagnostic summary with current token and span details
    pub fn diagnostic(&self) -> String {
        let current_info = if let Some(current) = self.current() {
            format!("'{}' at {}", current.value.value, current.span)
        } else {
            "<end>".to_string()
        };

        format!(
            "TokenStream(pos: {}/{}, current: {})",
            self.position,
            self.significant_indices.len(),
            current_info
        )
    }
}

/// Token stream builder with source position tracking
#[derive(Debug)]
pub struct TokenStreamBuilder {
    tokens: Vec<SpannedToken>,
    current_position: Position,
}

impl TokenStreamBuilder {
    /// Create a new builder starting at beginning of file
    pub fn new() -> Self {
        Self {
            tokens: Vec::new(),
            current_position: Position::start(),
        }
    }

    /// Add a token, deriving its span from the lexeme text
    pub fn push_token(mut self, token: Token) -> Self {
        let start = self.current_position;
        let end = start.advance_str(&token.value);
        let span = Span::new(start, end);

        self.tokens.push(SpannedToken::new(token, span));
        self.current_position = end;
        self
    }

    /// Add a token with explicit span
    pub fn push_token_with_span(mut self, token: Token, span: Span) -> Self {
        self.current_position = span.end;
        self.tokens.push(SpannedToken::new(token, span));
        self
    }

    /// Build the token stream
    pub fn build(self) -> TokenStream {
        TokenStream::new(self.tokens)
    }

    /// Build with source map for enhanced error reporting
    pub fn build_with_source(self, source: String) -> TokenStream {
        let source_map = SourceMap::new(source);
        TokenStream::with_source_map(self.tokens, source_map)
    }
}

impl Default for TokenStreamBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Validation functions for span accuracy
pub mod validation {
    use super::*;

    /// Validate that spans are monotonically increasing
    pub fn validate_span_order(tokens: &[SpannedToken]) -> Result<(), String> {
        for window in tokens.windows(2) {
            let current = window[0].span;
            let next = window[1].span;

            if current.end.offset > next.start.offset {
                return Err(format!(
                    "Span order violation: token ending at {} starts after next token at {}",
                    current.end.offset, next.start.offset
                ));
            }
        }
        Ok(())
    }

    /// Validate that filtered tokens maintain accurate spans
    pub fn validate_filtered_spans(stream: &TokenStream) -> Result<(), String> {
        for (filtered_pos, &original_idx) in stream.significant_indices.iter().enumerate() {
            if let Some(token) = stream.all_tokens.get(original_idx) {
                match stream.span_at_position(filtered_pos) {
                    Some(filtered_span) if filtered_span == token.span => {}
                    Some(filtered_span) => {
                        return Err(format!(
                            "Span mismatch at filtered position {}: expected {:?}, got {:?}",
                            filtered_pos, token.span, filtered_span
                        ));
                    }
                    None => {
                        return Err(format!(
                            "Cannot access span at filtered position {}",
                            filtered_pos
                        ));
                    }
                }
            } else {
                return Err(format!(
                    "Invalid original index {} in significant_indices",
                    original_idx
                ));
            }
        }
        Ok(())
    }

    /// Validate token stream integrity
    pub fn validate_token_stream(stream: &TokenStream) -> Result<(), String> {
        validate_span_order(&stream.all_tokens)?;
        validate_filtered_spans(stream)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::token::Category;

    fn sample_stream() -> TokenStream {
        TokenStreamBuilder::new()
            .push_token(Token::new("int", Category::Keyword))
            .push_token(Token::new(" ", Category::Unknown))
            .push_token(Token::new("num1", Category::Identifier))
            .push_token(Token::new("// note", Category::Comment))
            .push_token(Token::new(";", Category::Delimiter))
            .build()
    }

    #[test]
    fn test_comment_filtering() {
        let stream = sample_stream();
        assert_eq!(stream.all_tokens().len(), 5);
        assert_eq!(stream.len(), 4);
    }

    #[test]
    fn test_navigation() {
        let mut stream = sample_stream();

        assert_eq!(stream.current_token().map(|t| t.value.as_str()), Some("int"));
        stream.advance();
        stream.advance();
        assert_eq!(
            stream.current_token().map(|t| t.value.as_str()),
            Some("num1")
        );
        stream.advance();
        assert_eq!(stream.current_token().map(|t| t.value.as_str()), Some(";"));
        stream.advance();
        assert!(stream.is_at_end());
    }

    #[test]
    fn test_checkpoint_restore() {
        let mut stream = sample_stream();
        let checkpoint = stream.save_position();

        stream.advance();
        stream.advance();
        stream.restore_position(checkpoint);

        assert_eq!(stream.current_token().map(|t| t.value.as_str()), Some("int"));
    }

    #[test]
    fn test_span_continuity() {
        let stream = sample_stream();
        assert!(validation::validate_token_stream(&stream).is_ok());

        // Builder-derived spans cover the source without gaps
        let first = stream.all_tokens()[0].span;
        let second = stream.all_tokens()[1].span;
        assert_eq!(first.end.offset, second.start.offset);
    }

    #[test]
    fn test_span_range_merge() {
        let stream = sample_stream();
        let span = stream.span_range(0, 2);
        assert_eq!(span.start.offset, 0);
        assert!(span.end.offset > span.start.offset);
    }
}
