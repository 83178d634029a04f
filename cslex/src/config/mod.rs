//! Configuration module for the cslex scanner
//! Automatically uses generated constants from TOML configuration

// Include generated constants from build.rs
// This file is generated at compile time from your TOML configuration
include!(concat!(env!("OUT_DIR"), "/constants.rs"));

pub mod runtime;

/// Build information and configuration metadata
pub mod build_info {
    /// Returns the configuration profile used during build
    pub fn profile() -> &'static str {
        option_env!("CSLEX_BUILD_PROFILE").unwrap_or("development")
    }

    /// Returns the configuration directory used during build
    pub fn config_dir() -> &'static str {
        option_env!("CSLEX_CONFIG_DIR").unwrap_or("config")
    }

    /// Returns configuration source information
    pub fn source_info() -> String {
        format!("Generated from {}/{}.toml", config_dir(), profile())
    }

    /// Returns the OUT_DIR path used for generation (for debugging)
    pub fn out_dir() -> &'static str {
        env!("OUT_DIR")
    }
}

#[cfg(test)]
mod tests {
    use super::compile_time;

    #[test]
    fn test_lexical_limits_generated() {
        assert!(compile_time::lexical::MAX_SOURCE_SIZE > 0);
        assert!(compile_time::lexical::MAX_LEXEME_LENGTH > 0);
        assert!(compile_time::lexical::MAX_COMMENT_LENGTH > 0);
        assert!(compile_time::lexical::MAX_TOKEN_COUNT > 0);
    }

    #[test]
    fn test_vocabulary_word_lists_generated() {
        assert!(compile_time::vocabulary::KEYWORD_WORDS.contains("class"));
        assert!(compile_time::vocabulary::OPERATOR_WORDS.contains("=="));
        assert!(compile_time::vocabulary::DELIMITER_WORDS.contains(';'));
    }

    #[test]
    fn test_build_info() {
        assert!(!super::build_info::profile().is_empty());
        assert!(super::build_info::source_info().contains(".toml"));
    }
}
