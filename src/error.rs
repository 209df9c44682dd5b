//! Error handling for the ATS scorer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AtsScorerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Knowledge table error: {0}")]
    KnowledgeBase(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, AtsScorerError>;

impl From<aho_corasick::BuildError> for AtsScorerError {
    fn from(err: aho_corasick::BuildError) -> Self {
        AtsScorerError::Processing(format!("Failed to build term matcher: {}", err))
    }
}

impl From<askama::Error> for AtsScorerError {
    fn from(err: askama::Error) -> Self {
        AtsScorerError::OutputFormatting(err.to_string())
    }
}
