//! Bridge Error Types
//!
//! Error types for fetching claim trees and publishing regrouped indexes.

use reward_core::RewardError;
use thiserror::Error;

/// Bridge result type
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Bridge errors
#[derive(Debug, Error)]
pub enum BridgeError {
    /// HTTP transport failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote API returned a non-success status
    #[error("API request failed: {status} - {message}")]
    Api { status: u16, message: String },

    /// GraphQL response carried errors
    #[error("GraphQL error: {0}")]
    GraphQl(String),

    /// Target branch does not exist
    #[error("Branch not found: {branch}")]
    BranchNotFound { branch: String },

    /// Response was well-formed JSON but not the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Client could not be configured
    #[error("Configuration error: {0}")]
    Config(String),

    /// Backend unavailable
    #[error("Unavailable: {0}")]
    Unavailable(String),

    /// File I/O error
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Claim parsing or regrouping failed
    #[error(transparent)]
    Reward(#[from] RewardError),
}

impl BridgeError {
    /// Create an API error
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        BridgeError::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a branch not found error
    pub fn branch_not_found(branch: impl Into<String>) -> Self {
        BridgeError::BranchNotFound {
            branch: branch.into(),
        }
    }

    /// Create an invalid response error
    pub fn invalid_response(message: impl Into<String>) -> Self {
        BridgeError::InvalidResponse(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_includes_status() {
        let err = BridgeError::api(422, "Update is not a fast forward");
        assert!(err.to_string().contains("422"));
        assert!(err.to_string().contains("fast forward"));
    }

    #[test]
    fn test_reward_error_is_transparent() {
        let err: BridgeError = RewardError::missing_content("2021-01/merkle-tree.json").into();
        assert_eq!(
            err.to_string(),
            "Claim file 2021-01/merkle-tree.json has no text content"
        );
    }

    #[test]
    fn test_json_failure_surfaces_as_reward_error() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: BridgeError = RewardError::from(source).into();
        assert!(matches!(err, BridgeError::Reward(RewardError::Serialization(_))));
    }
}
