//! CLI Error Types
//!
//! Every failure ends the run the same way: one CI failure annotation
//! carrying the message and exit status 1.

use reward_bridge::BridgeError;
use reward_core::RewardError;
use thiserror::Error;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Fetch or publish failed
    #[error("{0}")]
    BridgeError(#[from] BridgeError),

    /// Claim parsing or regrouping failed
    #[error("{0}")]
    RewardError(#[from] RewardError),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        CliError::ConfigError {
            message: message.into(),
        }
    }

    /// Get exit code for this error
    pub fn exit_code(&self) -> i32 {
        1
    }

    /// GitHub Actions workflow command marking the run as failed
    pub fn annotation(&self) -> String {
        let message = self
            .to_string()
            .replace('%', "%25")
            .replace('\r', "%0D")
            .replace('\n', "%0A");
        format!("::error::{}", message)
    }
}
