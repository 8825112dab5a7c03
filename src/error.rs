// Error types for input loading and engine construction
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NlpError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("invalid gazetteer {path}: {reason}")]
    Gazetteer { path: PathBuf, reason: String },
}

pub type NlpResult<T> = std::result::Result<T, NlpError>;
