//! Reward Error Types
//!
//! Errors raised while parsing claim files and building indexes.

use thiserror::Error;

/// Reward core result type
pub type RewardResult<T> = Result<T, RewardError>;

/// Reward core errors
#[derive(Error, Debug)]
pub enum RewardError {
    /// Claim file text is not valid for the schema
    #[error("Failed to parse claim file {file}: {source}")]
    Parse {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    /// Recognized claim file has no text content (binary or truncated blob)
    #[error("Claim file {file} has no text content")]
    MissingContent { file: String },

    /// Index could not be serialized
    #[error("Failed to serialize user index: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RewardError {
    /// Create a parse error for a file path
    pub fn parse(file: impl Into<String>, source: serde_json::Error) -> Self {
        RewardError::Parse {
            file: file.into(),
            source,
        }
    }

    /// Create a missing content error
    pub fn missing_content(file: impl Into<String>) -> Self {
        RewardError::MissingContent { file: file.into() }
    }

}
