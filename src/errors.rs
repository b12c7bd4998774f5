use serde::{Serialize, Serializer};
use thiserror::Error;

/// Errors that can occur while producing a file outline.
///
/// The per-file variants are never propagated across file boundaries; the
/// result assembler stores them on the `FileResult` instead.
#[derive(Error, Debug)]
pub enum OutlineError {
    #[error("Unsupported file type: {path}")]
    UnsupportedExtension { path: String },

    #[error("Failed to load language: {language} ({message})")]
    LanguageLoadFailure { language: String, message: String },

    #[error("Failed to read file: {message}")]
    FileReadFailure { path: String, message: String },

    #[error("File too large ({chars} chars > {limit})")]
    FileTooLarge { chars: usize, limit: usize },

    #[error("Parse error: {message}")]
    ParseFailure { message: String },

    #[error("Extraction error: {message}")]
    ExtractionFailure { message: String },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Serialize for OutlineError {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Convenience alias for results using `OutlineError`.
pub type Result<T> = std::result::Result<T, OutlineError>;
