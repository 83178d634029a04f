//! Shared primitive types and helpers for the cslex scanner
//!
//! Dependency-free source-location types used by the scanner, classifier,
//! and error reporting.

pub mod span;

pub use span::{Position, SourceMap, Span, Spanned};
