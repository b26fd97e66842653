//! Token Amount
//!
//! Reward amounts are wei-denominated integers that routinely exceed 64 bits.
//! They are carried as opaque text and never parsed. A JSON number in place
//! of the string is still rejected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reward amount text
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenAmount(String);

impl TokenAmount {
    /// Amount text exactly as it appeared in the claim file
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for TokenAmount {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for TokenAmount {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<TokenAmount> for String {
    fn from(amount: TokenAmount) -> Self {
        amount.0
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
