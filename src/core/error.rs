//! Error types for data file loading.

use thiserror::Error;

/// Errors that can occur when loading enemy or level data.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// File or directory could not be found.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },

    /// The file parsed but describes something the game cannot use.
    #[error("Invalid data in '{path}': {reason}")]
    Invalid { path: String, reason: String },
}
