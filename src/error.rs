//! Error types for sidenote

use thiserror::Error;

/// Result type alias for sidenote operations
pub type Result<T> = std::result::Result<T, SidenoteError>;

/// Sidenote error types
#[derive(Error, Debug)]
pub enum SidenoteError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown forced language: {0}")]
    UnknownLanguage(String),

    #[error("Extension .{extension} is claimed by both {first} and {second}")]
    DuplicateExtension {
        extension: String,
        first: String,
        second: String,
    },

    #[error("No pass named {0} in pipeline")]
    UnknownPass(String),

    #[error("Invalid pattern {pattern}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Highlighter returned {found} sections for {language}, expected {expected}")]
    DividerMismatch {
        language: String,
        expected: usize,
        found: usize,
    },

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
}
