//! cslex — lexical scanner for C# source text
//!
//! Splits raw source into lexemes with a four-mode scanner (normal, string,
//! single-line comment, multi-line comment), then assigns each provisional
//! lexeme a final category through an ordered rule classifier. Tokens render
//! as `< value | Category Name >`.

#[macro_use]
pub mod logging;

pub mod config;
pub mod file_processor;
pub mod lexical;
pub mod tokens;
pub mod utils;
pub mod vocabulary;

pub use file_processor::{FileProcessingResult, FileProcessorError};
pub use lexical::{classify, tokenize_source, LexicalError, LexicalMetrics, Scanner};
pub use tokens::{Category, SpannedToken, Token, TokenStream};

/// Errors from the file-to-tokens path
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("File processing failed: {0}")]
    FileProcessing(#[from] FileProcessorError),

    #[error("Lexical analysis failed: {0}")]
    Lexical(#[from] LexicalError),
}

impl ScanError {
    pub fn error_code(&self) -> logging::Code {
        match self {
            ScanError::FileProcessing(e) => e.error_code(),
            ScanError::Lexical(e) => e.error_code(),
        }
    }
}

/// Read a source file and tokenize its contents
pub fn tokenize_file(path: &str) -> Result<TokenStream, ScanError> {
    let file_result = file_processor::process_file(path)?;
    let stream = lexical::tokenize_file_result(file_result)?;
    Ok(stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_tokenize_file_end_to_end() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("Program.cs");
        fs::write(&file_path, "int num1 = 42;\n").unwrap();

        let stream = tokenize_file(file_path.to_str().unwrap()).unwrap();
        let values: Vec<&str> = stream
            .all_tokens()
            .iter()
            .map(|t| t.value.value.as_str())
            .collect();
        assert_eq!(values, ["int", "num1", "=", "42", ";"]);
    }

    #[test]
    fn test_tokenize_file_missing() {
        let result = tokenize_file("no_such_file.cs");
        assert!(matches!(result, Err(ScanError::FileProcessing(_))));
    }

    #[test]
    fn test_scan_error_codes() {
        let error = ScanError::FileProcessing(FileProcessorError::FileNotFound {
            path: "Program.cs".to_string(),
        });
        assert_eq!(error.error_code().as_str(), "E005");
    }
}
