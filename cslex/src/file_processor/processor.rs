//! File processor implementation with compile-time constants and global logging integration

use crate::config::compile_time::file_processing::{
    LARGE_FILE_THRESHOLD, MAX_FILE_SIZE, MAX_LINE_COUNT_FOR_ANALYSIS,
};
use crate::config::runtime::FileProcessorPreferences;
use crate::logging::codes;
use crate::{log_debug, log_error, log_success};
use std::fs;
use std::path::{Path, PathBuf};

/// File processor specific errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum FileProcessorError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid file extension: expected .cs, found {extension:?}")]
    InvalidExtension { extension: Option<String> },

    #[error("File too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("File is empty")]
    EmptyFile,

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid UTF-8 encoding in file: {path}")]
    InvalidEncoding { path: String },

    #[error("I/O error reading file: {message}")]
    IoError { message: String },

    #[error("Invalid file path: {path}")]
    InvalidPath { path: String },

    #[error("File exceeds maximum line count: {lines} (max: {max_lines})")]
    TooManyLines { lines: usize, max_lines: usize },
}

impl FileProcessorError {
    /// Get the appropriate error code for this error type
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            FileProcessorError::FileNotFound { .. } => codes::file_processing::FILE_NOT_FOUND,
            FileProcessorError::InvalidExtension { .. } => {
                codes::file_processing::INVALID_EXTENSION
            }
            FileProcessorError::FileTooLarge { .. } => codes::file_processing::FILE_TOO_LARGE,
            FileProcessorError::EmptyFile => codes::file_processing::EMPTY_FILE,
            FileProcessorError::PermissionDenied { .. } => {
                codes::file_processing::PERMISSION_DENIED
            }
            FileProcessorError::InvalidEncoding { .. } => codes::file_processing::INVALID_ENCODING,
            FileProcessorError::IoError { .. } => codes::file_processing::IO_ERROR,
            FileProcessorError::InvalidPath { .. } => codes::file_processing::INVALID_PATH,
            FileProcessorError::TooManyLines { .. } => codes::file_processing::FILE_TOO_LARGE,
        }
    }

    /// Check if this error should halt processing
    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    /// Get error severity
    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    /// Get error category
    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }

    /// Check if error is recoverable
    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }
}

/// File metadata collected during processing
#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// Canonical file path
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
    /// File extension (if any)
    pub extension: Option<String>,
    /// Number of lines in file
    pub line_count: usize,
    /// Whether file has .cs extension
    pub is_cs_file: bool,
    /// File creation/modification time (if available)
    pub modified: Option<std::time::SystemTime>,
}

impl FileMetadata {
    /// Get file size in human-readable format
    pub fn human_readable_size(&self) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
        let mut size = self.size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", self.size, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }

    /// Check if file is likely to be large for processing (uses compile-time threshold)
    pub fn is_large_file(&self) -> bool {
        self.size > LARGE_FILE_THRESHOLD
    }

    /// Get processing complexity estimate based on size and line count
    pub fn complexity_score(&self) -> f64 {
        // Simple heuristic: size in KB + line count factor
        let size_factor = self.size as f64 / 1024.0;
        let line_factor = self.line_count as f64 * 0.1;
        size_factor + line_factor
    }

    /// Check if line count is within safe bounds for analysis
    pub fn is_safe_for_analysis(&self) -> bool {
        self.line_count <= MAX_LINE_COUNT_FOR_ANALYSIS
    }
}

/// File processing result containing source and metadata
#[derive(Debug, Clone)]
pub struct FileProcessingResult {
    /// File contents as UTF-8 string
    pub source: String,
    /// File metadata
    pub metadata: FileMetadata,
    /// Processing duration
    pub processing_duration: std::time::Duration,
}

impl FileProcessingResult {
    /// Get character count
    pub fn char_count(&self) -> usize {
        self.source.chars().count()
    }

    /// Check if file is empty content-wise (only whitespace)
    pub fn is_effectively_empty(&self) -> bool {
        self.source.trim().is_empty()
    }

    /// Get processing rate (characters per millisecond)
    pub fn processing_rate(&self) -> f64 {
        let duration_ms = self.processing_duration.as_secs_f64() * 1000.0;
        if duration_ms > 0.0 {
            self.char_count() as f64 / duration_ms
        } else {
            0.0
        }
    }
}

/// File processor with compile-time security constants and runtime preferences
pub struct FileProcessor {
    /// Whether to require .cs extension (runtime preference)
    pub require_cs_extension: bool,
    /// Whether to enable detailed performance logging (runtime preference)
    pub enable_performance_logging: bool,
    /// Whether to log debug information for non-C# files (runtime preference)
    pub log_non_cs_processing: bool,
    /// Whether to include complexity scores in output (runtime preference)
    pub include_complexity_metrics: bool,
}

impl FileProcessor {
    /// Create new file processor with default preferences
    pub fn new() -> Self {
        Self {
            require_cs_extension: false,
            enable_performance_logging: true,
            log_non_cs_processing: true,
            include_complexity_metrics: false,
        }
    }

    /// Create file processor from runtime preferences
    pub fn from_preferences(prefs: &FileProcessorPreferences) -> Self {
        Self {
            require_cs_extension: prefs.require_cs_extension,
            enable_performance_logging: prefs.enable_performance_logging,
            log_non_cs_processing: prefs.log_non_cs_processing,
            include_complexity_metrics: prefs.include_complexity_metrics,
        }
    }

    /// Require .cs extension
    pub fn with_cs_extension_required(mut self, required: bool) -> Self {
        self.require_cs_extension = required;
        self
    }

    /// Enable or disable performance logging
    pub fn with_performance_logging(mut self, enabled: bool) -> Self {
        self.enable_performance_logging = enabled;
        self
    }

    /// Enable or disable non-C# file logging
    pub fn with_non_cs_logging(mut self, enabled: bool) -> Self {
        self.log_non_cs_processing = enabled;
        self
    }

    /// Enable or disable complexity metrics
    pub fn with_complexity_metrics(mut self, enabled: bool) -> Self {
        self.include_complexity_metrics = enabled;
        self
    }

    /// Get the compile-time maximum file size
    pub fn max_file_size() -> u64 {
        MAX_FILE_SIZE
    }

    /// Get the compile-time large file threshold
    pub fn large_file_threshold() -> u64 {
        LARGE_FILE_THRESHOLD
    }

    /// Process a file and return contents with metadata
    pub fn process_file(
        &self,
        file_path: &str,
    ) -> Result<FileProcessingResult, FileProcessorError> {
        let start_time = std::time::Instant::now();

        log_debug!("Starting file processing", "file" => file_path);

        let path = self.validate_path(file_path)?;
        let metadata = self.get_metadata(&path)?;
        self.validate_file(&metadata, file_path)?;
        let source = self.read_file(&path, file_path)?;

        let line_count = source.lines().count();
        if line_count > MAX_LINE_COUNT_FOR_ANALYSIS {
            let error = FileProcessorError::TooManyLines {
                lines: line_count,
                max_lines: MAX_LINE_COUNT_FOR_ANALYSIS,
            };
            log_error!(error.error_code(), "File exceeds maximum line count for safe analysis",
                "file" => file_path,
                "lines" => line_count,
                "max_lines" => MAX_LINE_COUNT_FOR_ANALYSIS);
            return Err(error);
        }

        let mut final_metadata = metadata;
        final_metadata.line_count = line_count;

        let processing_duration = start_time.elapsed();

        let result = FileProcessingResult {
            source,
            metadata: final_metadata,
            processing_duration,
        };

        self.log_processing_success(&result, file_path);

        if !result.metadata.is_cs_file && !self.require_cs_extension && self.log_non_cs_processing {
            let ext_str = result.metadata.extension.as_deref().unwrap_or("none");
            log_debug!(
                "Processing non-C# file",
                "extension" => ext_str,
                "file" => file_path
            );
        }

        Ok(result)
    }

    /// Log processing success with detailed metrics
    fn log_processing_success(&self, result: &FileProcessingResult, file_path: &str) {
        let duration_ms = format!("{:.2}", result.processing_duration.as_secs_f64() * 1000.0);

        if self.enable_performance_logging {
            let rate = format!("{:.2}", result.processing_rate());

            if self.include_complexity_metrics {
                let complexity = format!("{:.2}", result.metadata.complexity_score());
                log_success!(
                    codes::success::FILE_PROCESSING_SUCCESS,
                    "File processed successfully with full metrics",
                    "file" => file_path,
                    "size_bytes" => result.metadata.size,
                    "size_human" => result.metadata.human_readable_size(),
                    "lines" => result.metadata.line_count,
                    "chars" => result.char_count(),
                    "duration_ms" => duration_ms.as_str(),
                    "chars_per_ms" => rate.as_str(),
                    "complexity_score" => complexity.as_str(),
                    "max_size_bytes" => MAX_FILE_SIZE,
                    "is_large_file" => result.metadata.is_large_file(),
                    "safe_for_analysis" => result.metadata.is_safe_for_analysis()
                );
            } else {
                log_success!(
                    codes::success::FILE_PROCESSING_SUCCESS,
                    "File processed successfully with performance metrics",
                    "file" => file_path,
                    "size_bytes" => result.metadata.size,
                    "size_human" => result.metadata.human_readable_size(),
                    "lines" => result.metadata.line_count,
                    "chars" => result.char_count(),
                    "duration_ms" => duration_ms.as_str(),
                    "chars_per_ms" => rate.as_str(),
                    "max_size_bytes" => MAX_FILE_SIZE,
                    "is_large_file" => result.metadata.is_large_file()
                );
            }
        } else {
            log_success!(
                codes::success::FILE_PROCESSING_SUCCESS,
                "File processed successfully",
                "file" => file_path,
                "size_bytes" => result.metadata.size,
                "lines" => result.metadata.line_count,
                "chars" => result.char_count(),
                "duration_ms" => duration_ms.as_str()
            );
        }
    }

    /// Validate file path and check existence
    fn validate_path(&self, file_path: &str) -> Result<PathBuf, FileProcessorError> {
        if file_path.is_empty() {
            let error = FileProcessorError::InvalidPath {
                path: file_path.to_string(),
            };
            log_error!(error.error_code(), "Empty file path provided");
            return Err(error);
        }

        let path = Path::new(file_path);

        if !path.exists() {
            let error = FileProcessorError::FileNotFound {
                path: file_path.to_string(),
            };
            log_error!(error.error_code(), "File not found", "path" => file_path);
            return Err(error);
        }

        if !path.is_file() {
            let error = FileProcessorError::InvalidPath {
                path: file_path.to_string(),
            };
            log_error!(error.error_code(), "Path is not a file", "path" => file_path);
            return Err(error);
        }

        match path.canonicalize() {
            Ok(canonical_path) => {
                let path_str = canonical_path.display().to_string();
                log_debug!("Path validation successful", "canonical_path" => path_str.as_str());
                Ok(canonical_path)
            }
            Err(e) => {
                let error = FileProcessorError::IoError {
                    message: format!("Failed to resolve path '{}': {}", file_path, e),
                };
                log_error!(error.error_code(), "Failed to canonicalize path",
                    "path" => file_path,
                    "io_error" => e);
                Err(error)
            }
        }
    }

    /// Get file metadata
    fn get_metadata(&self, path: &Path) -> Result<FileMetadata, FileProcessorError> {
        let metadata = match fs::metadata(path) {
            Ok(meta) => meta,
            Err(e) => {
                let error = match e.kind() {
                    std::io::ErrorKind::PermissionDenied => {
                        let err = FileProcessorError::PermissionDenied {
                            path: path.display().to_string(),
                        };
                        log_error!(err.error_code(), "Permission denied accessing file",
                            "path" => path.display());
                        err
                    }
                    _ => {
                        let err = FileProcessorError::IoError {
                            message: format!(
                                "Failed to read metadata for '{}': {}",
                                path.display(),
                                e
                            ),
                        };
                        log_error!(err.error_code(), "Failed to read file metadata",
                            "path" => path.display(),
                            "io_error" => e);
                        err
                    }
                };
                return Err(error);
            }
        };

        let size = metadata.len();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|s| s.to_lowercase());
        let is_cs_file = extension.as_deref() == Some("cs");
        let modified = metadata.modified().ok();

        let file_metadata = FileMetadata {
            path: path.to_path_buf(),
            size,
            extension: extension.clone(),
            line_count: 0, // Updated after reading
            is_cs_file,
            modified,
        };

        log_debug!("File metadata collected",
            "size_bytes" => size,
            "size_human" => file_metadata.human_readable_size(),
            "extension" => extension.as_deref().unwrap_or("none"),
            "is_cs" => is_cs_file,
            "max_size_bytes" => MAX_FILE_SIZE,
            "is_large_file" => file_metadata.is_large_file());

        Ok(file_metadata)
    }

    /// Validate file properties using compile-time constants
    fn validate_file(
        &self,
        metadata: &FileMetadata,
        file_path: &str,
    ) -> Result<(), FileProcessorError> {
        if metadata.size > MAX_FILE_SIZE {
            let error = FileProcessorError::FileTooLarge {
                size: metadata.size,
                max_size: MAX_FILE_SIZE,
            };
            log_error!(error.error_code(), "File exceeds compile-time maximum size limit",
                "file" => file_path,
                "size_bytes" => metadata.size,
                "size_human" => metadata.human_readable_size(),
                "limit_bytes" => MAX_FILE_SIZE);
            return Err(error);
        }

        if metadata.size == 0 {
            let error = FileProcessorError::EmptyFile;
            log_error!(error.error_code(), "File is empty", "file" => file_path);
            return Err(error);
        }

        if self.require_cs_extension && !metadata.is_cs_file {
            let error = FileProcessorError::InvalidExtension {
                extension: metadata.extension.clone(),
            };
            log_error!(error.error_code(), "File does not have required .cs extension",
                "file" => file_path,
                "extension" => metadata.extension.as_deref().unwrap_or("none"),
                "required" => "cs");
            return Err(error);
        }

        Ok(())
    }

    /// Read file contents with validation
    fn read_file(&self, path: &Path, file_path: &str) -> Result<String, FileProcessorError> {
        match fs::read_to_string(path) {
            Ok(content) => {
                log_debug!("File content read successfully",
                    "file" => file_path,
                    "chars" => content.chars().count(),
                    "bytes" => content.len(),
                    "lines" => content.lines().count());

                Ok(content)
            }
            Err(e) => {
                let error = match e.kind() {
                    std::io::ErrorKind::PermissionDenied => {
                        let err = FileProcessorError::PermissionDenied {
                            path: path.display().to_string(),
                        };
                        log_error!(err.error_code(), "Permission denied reading file",
                            "file" => file_path);
                        err
                    }
                    std::io::ErrorKind::InvalidData => {
                        let err = FileProcessorError::InvalidEncoding {
                            path: path.display().to_string(),
                        };
                        log_error!(err.error_code(), "Invalid UTF-8 encoding in file",
                            "file" => file_path);
                        err
                    }
                    _ => {
                        let err = FileProcessorError::IoError {
                            message: format!("Failed to read file '{}': {}", path.display(), e),
                        };
                        log_error!(err.error_code(), "I/O error reading file",
                            "file" => file_path,
                            "io_error" => e);
                        err
                    }
                };
                Err(error)
            }
        }
    }
}

impl Default for FileProcessor {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// MODULE API FUNCTIONS
// ============================================================================

/// Process a file with default settings
pub fn process_file(file_path: &str) -> Result<FileProcessingResult, FileProcessorError> {
    let processor = FileProcessor::new();
    processor.process_file(file_path)
}

/// Create a file processor with default settings
pub fn create_processor() -> FileProcessor {
    FileProcessor::new()
}

/// Create a file processor with custom runtime preferences
pub fn create_custom_processor(
    require_cs_extension: bool,
    enable_performance_logging: bool,
) -> FileProcessor {
    FileProcessor::new()
        .with_cs_extension_required(require_cs_extension)
        .with_performance_logging(enable_performance_logging)
}

/// Create a file processor from runtime preferences
pub fn create_processor_from_preferences(prefs: &FileProcessorPreferences) -> FileProcessor {
    FileProcessor::from_preferences(prefs)
}

/// Check if an error should halt processing
pub fn should_halt_on_error(error: &FileProcessorError) -> bool {
    error.requires_halt()
}

/// Get error code for an error
pub fn get_error_code(error: &FileProcessorError) -> crate::logging::Code {
    error.error_code()
}

/// Get the compile-time maximum file size limit
pub fn get_max_file_size() -> u64 {
    MAX_FILE_SIZE
}

/// Get the compile-time large file threshold
pub fn get_large_file_threshold() -> u64 {
    LARGE_FILE_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const SAMPLE_SOURCE: &str = "class Program\n{\n    static void Main() { }\n}\n";

    #[test]
    fn test_process_valid_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("Program.cs");
        fs::write(&file_path, SAMPLE_SOURCE).unwrap();

        let processor = FileProcessor::new();
        let result = processor.process_file(file_path.to_str().unwrap());

        assert!(result.is_ok());
        let result = result.unwrap();
        assert_eq!(result.metadata.line_count, 4);
        assert!(result.metadata.is_cs_file);
        assert_eq!(result.char_count(), SAMPLE_SOURCE.chars().count());
        assert!(!result.is_effectively_empty());
    }

    #[test]
    fn test_file_not_found() {
        let processor = FileProcessor::new();
        let result = processor.process_file("nonexistent.cs");

        assert!(result.is_err());
        match result.unwrap_err() {
            FileProcessorError::FileNotFound { .. } => {}
            _ => panic!("Expected FileNotFound error"),
        }
    }

    #[test]
    fn test_extension_requirement() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("notes.txt");
        fs::write(&file_path, "content").unwrap();

        let processor = FileProcessor::new().with_cs_extension_required(true);
        let result = processor.process_file(file_path.to_str().unwrap());

        assert!(result.is_err());
        match result.unwrap_err() {
            FileProcessorError::InvalidExtension { .. } => {}
            _ => panic!("Expected InvalidExtension error"),
        }
    }

    #[test]
    fn test_non_cs_file_allowed_by_default() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("snippet.txt");
        fs::write(&file_path, "int x = 1;").unwrap();

        let processor = FileProcessor::new();
        let result = processor.process_file(file_path.to_str().unwrap());

        assert!(result.is_ok());
        assert!(!result.unwrap().metadata.is_cs_file);
    }

    #[test]
    fn test_empty_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("Empty.cs");
        fs::write(&file_path, "").unwrap();

        let processor = FileProcessor::new();
        let result = processor.process_file(file_path.to_str().unwrap());

        assert!(result.is_err());
        match result.unwrap_err() {
            FileProcessorError::EmptyFile => {}
            _ => panic!("Expected EmptyFile error"),
        }
    }

    #[test]
    fn test_performance_logging() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("Program.cs");
        fs::write(&file_path, SAMPLE_SOURCE).unwrap();

        let processor = FileProcessor::new().with_performance_logging(true);
        let result = processor.process_file(file_path.to_str().unwrap());

        assert!(result.is_ok());
        let result = result.unwrap();
        assert!(result.processing_rate() > 0.0);
    }

    #[test]
    fn test_metadata_helpers_with_constants() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("Big.cs");
        let content = "A".repeat((LARGE_FILE_THRESHOLD + 100) as usize);
        fs::write(&file_path, &content).unwrap();

        let processor = FileProcessor::new();
        let result = processor.process_file(file_path.to_str().unwrap()).unwrap();

        assert!(result.metadata.is_large_file());
        assert!(result.metadata.complexity_score() > 0.0);
        assert!(result.metadata.is_safe_for_analysis());
    }

    #[test]
    fn test_error_methods() {
        let error = FileProcessorError::FileNotFound {
            path: "Program.cs".to_string(),
        };

        assert_eq!(error.error_code().as_str(), "E005");
        assert_eq!(error.category(), "FileProcessing");
        assert_eq!(error.severity(), "Medium");
        assert!(!error.is_recoverable());
        assert!(error.requires_halt());
    }

    #[test]
    fn test_recoverable_extension_error() {
        let error = FileProcessorError::InvalidExtension {
            extension: Some("txt".to_string()),
        };

        assert_eq!(error.error_code().as_str(), "E006");
        assert!(error.is_recoverable());
        assert!(!error.requires_halt());
    }

    #[test]
    fn test_compile_time_constants_access() {
        assert_eq!(FileProcessor::max_file_size(), MAX_FILE_SIZE);
        assert_eq!(FileProcessor::large_file_threshold(), LARGE_FILE_THRESHOLD);
        assert_eq!(get_max_file_size(), MAX_FILE_SIZE);
        assert_eq!(get_large_file_threshold(), LARGE_FILE_THRESHOLD);
    }

    #[test]
    fn test_from_preferences() {
        let prefs = FileProcessorPreferences {
            require_cs_extension: true,
            enable_performance_logging: false,
            log_non_cs_processing: false,
            include_complexity_metrics: true,
        };

        let processor = FileProcessor::from_preferences(&prefs);
        assert!(processor.require_cs_extension);
        assert!(!processor.enable_performance_logging);
        assert!(!processor.log_non_cs_processing);
        assert!(processor.include_complexity_metrics);
    }
}
