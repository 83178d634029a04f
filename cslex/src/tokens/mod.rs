//! Token system for C# lexical analysis
//!
//! Converts raw source text into a structured stream of categorized tokens.
//!
//! # Overview
//!
//! The tokens module defines the output vocabulary of the scanner: each token
//! pairs the raw lexeme text with one of eleven lexical categories.
//!
//! ## Key Components
//!
//! - **[`Token`]** - A lexeme paired with its [`Category`]
//! - **[`Category`]** - The eleven lexical categories (keyword, identifier,
//!   numeric/hexadecimal/decimal/string constants, operator, delimiter,
//!   preprocessor directive, comment, unknown)
//! - **[`TokenStream`]** - Stream navigation with comment filtering
//! - **[`SpannedToken`]** - Tokens with source location information
//!
//! ## Rendering
//!
//! Tokens display as `< value | Category Name >`, e.g. `< int | Keyword >`.
//!
//! All tokens include span information for precise error reporting and
//! source location tracking.

pub mod token;
pub mod token_stream;

// Re-export key types for convenience
pub use token::{Category, Token};
pub use token_stream::{SpannedToken, TokenStream, TokenStreamBuilder};

// Re-export span types from utils
pub use crate::utils::{Position, SourceMap, Span, Spanned};

/// Module version
pub const VERSION: &str = "1.0.0";
