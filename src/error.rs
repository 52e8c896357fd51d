use crate::unescape::UnescapeError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while extracting variables into artifacts
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The input line is not syntactically valid JSON. Carries the raw line.
    #[error("malformed input line: {line}")]
    Malformed {
        line: String,
        #[source]
        source: serde_json::Error,
    },

    /// The line parsed, but does not have the `matches[].environment[].value` shape
    #[error("unexpected record shape: {0}")]
    Structure(#[source] serde_json::Error),

    #[error("failed to decode variable value: {0}")]
    Unescape(#[from] UnescapeError),

    #[error("output directory {} is not usable: {reason}", path.display())]
    OutputDir { path: PathBuf, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExtractError {
    /// The raw offending line, if this is a malformed-input error
    pub fn malformed_line(&self) -> Option<&str> {
        match self {
            ExtractError::Malformed { line, .. } => Some(line),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;
