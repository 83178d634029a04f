// build.rs - TOML-driven constant generation (limits + vocabulary word lists)
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    file_processing: FileProcessingLimits,
    lexical: LexicalLimits,
    vocabulary: VocabularyLists,
    security: SecurityLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct FileProcessingLimits {
    max_file_size: u64,
    large_file_threshold: u64,
    max_line_count_for_analysis: usize,
    performance_log_buffer_size: usize,
}

#[derive(serde::Deserialize)]
struct LexicalLimits {
    max_source_size: usize,
    max_lexeme_length: usize,
    max_comment_length: usize,
    max_token_count: usize,
    metrics_buffer_size: usize,
}

#[derive(serde::Deserialize)]
struct VocabularyLists {
    keywords: String,
    operators: String,
    delimiters: String,
}

#[derive(serde::Deserialize)]
struct SecurityLimits {
    memory_alert_threshold: u64,
    max_processing_time_seconds: u64,
    audit_log_buffer_size: usize,
    max_concurrent_operations: usize,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    max_error_collection: usize,
    log_buffer_size: usize,
    max_log_message_length: usize,
    max_log_events_per_file: usize,
    max_concurrent_log_operations: usize,
    security_min_log_level: u8,
    audit_log_retention_buffer: usize,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=CSLEX_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=CSLEX_CONFIG_DIR");

    let profile = env::var("CSLEX_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("CSLEX_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Find workspace root (parent of cslex directory)
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    // Build config path relative to workspace root
    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nWorkspace root: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_security_constraints(&config, &profile);
    validate_vocabulary(&config.vocabulary);
    generate_constants(&config, &profile);

    println!(
        "cargo:warning=Generated constants from {}",
        config_path.display()
    );
}

fn validate_security_constraints(config: &CompileTimeConfig, profile: &str) {
    const ABSOLUTE_MAX_FILE_SIZE: u64 = 1_000_000_000;
    const ABSOLUTE_MAX_MEMORY: u64 = 10_000_000_000;
    const ABSOLUTE_MAX_PROCESSING_TIME: u64 = 3600;

    if config.file_processing.max_file_size > ABSOLUTE_MAX_FILE_SIZE {
        panic!("SECURITY: max_file_size exceeds absolute maximum");
    }

    if config.lexical.max_source_size as u64 > ABSOLUTE_MAX_FILE_SIZE {
        panic!("SECURITY: max_source_size exceeds absolute maximum");
    }

    if config.security.memory_alert_threshold > ABSOLUTE_MAX_MEMORY {
        panic!("SECURITY: memory_alert_threshold exceeds absolute maximum");
    }

    if config.security.max_processing_time_seconds > ABSOLUTE_MAX_PROCESSING_TIME {
        panic!("SECURITY: max_processing_time_seconds exceeds absolute maximum");
    }

    if config.logging.security_min_log_level > 2 {
        panic!("SECURITY: security_min_log_level too high (max: 2)");
    }

    if profile == "production" {
        if config.file_processing.max_file_size > 50_000_000 {
            panic!("PRODUCTION: max_file_size too high for production");
        }
        if config.security.max_processing_time_seconds > 600 {
            panic!("PRODUCTION: max_processing_time_seconds too high for production");
        }
    }
}

fn validate_vocabulary(vocab: &VocabularyLists) {
    if vocab.keywords.split_whitespace().next().is_none() {
        panic!("VOCABULARY: keyword list is empty");
    }
    if vocab.operators.split_whitespace().next().is_none() {
        panic!("VOCABULARY: operator list is empty");
    }
    if vocab.delimiters.split_whitespace().next().is_none() {
        panic!("VOCABULARY: delimiter list is empty");
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod file_processing {{
        pub const MAX_FILE_SIZE: u64 = {};
        pub const LARGE_FILE_THRESHOLD: u64 = {};
        pub const MAX_LINE_COUNT_FOR_ANALYSIS: usize = {};
        pub const PERFORMANCE_LOG_BUFFER_SIZE: usize = {};
    }}

    pub mod lexical {{
        pub const MAX_SOURCE_SIZE: usize = {};
        pub const MAX_LEXEME_LENGTH: usize = {};
        pub const MAX_COMMENT_LENGTH: usize = {};
        pub const MAX_TOKEN_COUNT: usize = {};
        pub const METRICS_BUFFER_SIZE: usize = {};
    }}

    pub mod vocabulary {{
        pub const KEYWORD_WORDS: &str = {:?};
        pub const OPERATOR_WORDS: &str = {:?};
        pub const DELIMITER_WORDS: &str = {:?};
    }}

    pub mod security {{
        pub const MEMORY_ALERT_THRESHOLD: u64 = {};
        pub const MAX_PROCESSING_TIME_SECONDS: u64 = {};
        pub const AUDIT_LOG_BUFFER_SIZE: usize = {};
        pub const MAX_CONCURRENT_OPERATIONS: usize = {};
    }}

    pub mod logging {{
        pub const MAX_ERROR_COLLECTION: usize = {};
        pub const LOG_BUFFER_SIZE: usize = {};
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
        pub const MAX_LOG_EVENTS_PER_FILE: usize = {};
        pub const MAX_CONCURRENT_LOG_OPERATIONS: usize = {};
        pub const SECURITY_MIN_LOG_LEVEL: u8 = {};
        pub const AUDIT_LOG_RETENTION_BUFFER: usize = {};
    }}
}}
"#,
        profile,
        // File Processing
        config.file_processing.max_file_size,
        config.file_processing.large_file_threshold,
        config.file_processing.max_line_count_for_analysis,
        config.file_processing.performance_log_buffer_size,
        // Lexical
        config.lexical.max_source_size,
        config.lexical.max_lexeme_length,
        config.lexical.max_comment_length,
        config.lexical.max_token_count,
        config.lexical.metrics_buffer_size,
        // Vocabulary
        config.vocabulary.keywords,
        config.vocabulary.operators,
        config.vocabulary.delimiters,
        // Security
        config.security.memory_alert_threshold,
        config.security.max_processing_time_seconds,
        config.security.audit_log_buffer_size,
        config.security.max_concurrent_operations,
        // Logging
        config.logging.max_error_collection,
        config.logging.log_buffer_size,
        config.logging.max_log_message_length,
        config.logging.max_log_events_per_file,
        config.logging.max_concurrent_log_operations,
        config.logging.security_min_log_level,
        config.logging.audit_log_retention_buffer,
    );

    fs::write(output_path, constants_code).unwrap();
}
