//! Token types for the C# lexical scanner
//!
//! Tokens carry their raw source text plus a category. Categorization is
//! deliberately shallow: the scanner records what a lexeme looks like, not
//! what it means in context.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lexical category assigned to each token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Delimiter,
    PreprocessorDirective,
    Keyword,
    Identifier,
    NumericConstant,
    HexadecimalNumber,
    DecimalNumber,
    StringConstant,
    Operator,
    Comment,
    Unknown,
}

impl Category {
    /// Human-readable category name as it appears in rendered output
    pub const fn name(self) -> &'static str {
        match self {
            Self::Delimiter => "Delimiter",
            Self::PreprocessorDirective => "Preprocessor Directive",
            Self::Keyword => "Keyword",
            Self::Identifier => "Identifier",
            Self::NumericConstant => "Numeric Constant",
            Self::HexadecimalNumber => "Hexadecimal Number",
            Self::DecimalNumber => "Decimal Number",
            Self::StringConstant => "String Constant",
            Self::Operator => "Operator",
            Self::Comment => "Comment",
            Self::Unknown => "Unknown",
        }
    }

    /// All categories, in rendering order
    pub const fn all() -> &'static [Category] {
        &[
            Self::Delimiter,
            Self::PreprocessorDirective,
            Self::Keyword,
            Self::Identifier,
            Self::NumericConstant,
            Self::HexadecimalNumber,
            Self::DecimalNumber,
            Self::StringConstant,
            Self::Operator,
            Self::Comment,
            Self::Unknown,
        ]
    }

    /// Check if this category represents a literal value
    pub const fn is_literal(self) -> bool {
        matches!(
            self,
            Self::NumericConstant
                | Self::HexadecimalNumber
                | Self::DecimalNumber
                | Self::StringConstant
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A scanned token: raw lexeme text plus its lexical category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub value: String,
    pub category: Category,
}

impl Token {
    /// Create a token with a known category
    pub fn new(value: impl Into<String>, category: Category) -> Self {
        Self {
            value: value.into(),
            category,
        }
    }

    /// Create a provisional token awaiting classification
    pub fn unknown(value: impl Into<String>) -> Self {
        Self::new(value, Category::Unknown)
    }

    /// Check if this token is a keyword
    pub fn is_keyword(&self) -> bool {
        self.category == Category::Keyword
    }

    /// Check if this token is an identifier
    pub fn is_identifier(&self) -> bool {
        self.category == Category::Identifier
    }

    /// Check if this token is a comment
    pub fn is_comment(&self) -> bool {
        self.category == Category::Comment
    }

    /// Check if this token is a string constant
    pub fn is_string_constant(&self) -> bool {
        self.category == Category::StringConstant
    }

    /// Check if this token is a preprocessor directive
    pub fn is_preprocessor_directive(&self) -> bool {
        self.category == Category::PreprocessorDirective
    }

    /// Check if this token carries a literal value
    pub fn is_literal(&self) -> bool {
        self.category.is_literal()
    }

    /// Check if this token remained unclassified
    pub fn is_unknown(&self) -> bool {
        self.category == Category::Unknown
    }

    /// Tokens that matter to downstream consumers; comments are retained
    /// in the stream but filtered from significant navigation.
    pub fn is_significant(&self) -> bool {
        !self.is_comment()
    }

    /// Length of the lexeme in bytes
    pub fn len(&self) -> usize {
        self.value.len()
    }

    /// Check for an empty lexeme (only possible for synthetic tokens)
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "< {} | {} >", self.value, self.category.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_names() {
        assert_eq!(Category::Keyword.name(), "Keyword");
        assert_eq!(
            Category::PreprocessorDirective.name(),
            "Preprocessor Directive"
        );
        assert_eq!(Category::NumericConstant.name(), "Numeric Constant");
        assert_eq!(Category::HexadecimalNumber.name(), "Hexadecimal Number");
        assert_eq!(Category::Unknown.name(), "Unknown");
    }

    #[test]
    fn test_token_display_format() {
        let token = Token::new("int", Category::Keyword);
        assert_eq!(token.to_string(), "< int | Keyword >");

        let token = Token::new("42", Category::NumericConstant);
        assert_eq!(token.to_string(), "< 42 | Numeric Constant >");

        let token = Token::new(";", Category::Delimiter);
        assert_eq!(token.to_string(), "< ; | Delimiter >");
    }

    #[test]
    fn test_token_predicates() {
        assert!(Token::new("class", Category::Keyword).is_keyword());
        assert!(Token::new("num1", Category::Identifier).is_identifier());
        assert!(Token::new("// note", Category::Comment).is_comment());
        assert!(Token::new("0x1A", Category::HexadecimalNumber).is_literal());
        assert!(Token::unknown("@").is_unknown());
    }

    #[test]
    fn test_comment_not_significant() {
        assert!(!Token::new("// note", Category::Comment).is_significant());
        assert!(Token::new("int", Category::Keyword).is_significant());
    }

    #[test]
    fn test_all_categories_covered() {
        assert_eq!(Category::all().len(), 11);
    }
}
