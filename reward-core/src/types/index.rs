//! Indexes
//!
//! The fetched directory tree, the month-keyed index parsed from it, and
//! the recipient-keyed index published as the output artifact.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::claim::{DualClaim, SingleClaim};
use super::reward_file::{Address, MonthLabel, RewardFile};
use super::variant::TokenVariant;
use crate::error::RewardResult;

// ============================================
// Fetched Tree
// ============================================

/// File inside a month directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeFile {
    /// File name, without directory
    pub name: String,
    /// File text; `None` for binary blobs
    pub text: Option<String>,
}

impl TreeFile {
    /// Create a text file entry
    pub fn text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: Some(text.into()),
        }
    }
}

/// Month directory with its files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthDirectory {
    /// Directory name, used as the month label
    pub name: String,
    /// Files directly inside the directory
    pub files: Vec<TreeFile>,
}

impl MonthDirectory {
    /// Create a month directory
    pub fn new(name: impl Into<String>, files: Vec<TreeFile>) -> Self {
        Self {
            name: name.into(),
            files,
        }
    }
}

// ============================================
// Month Indexes
// ============================================

/// Single-schema claim files by month
pub type SingleMonthlyIndex = BTreeMap<MonthLabel, RewardFile<SingleClaim>>;

/// Dual-schema claim files by month, then token variant
pub type DualMonthlyIndex = BTreeMap<MonthLabel, BTreeMap<TokenVariant, RewardFile<DualClaim>>>;

// ============================================
// User Indexes
// ============================================

/// Single-schema claims by recipient, then month
pub type SingleUserIndex = BTreeMap<Address, BTreeMap<MonthLabel, SingleClaim>>;

/// Dual-schema claims by recipient, then token variant, then month
pub type DualUserIndex =
    BTreeMap<Address, BTreeMap<TokenVariant, BTreeMap<MonthLabel, DualClaim>>>;

/// Regrouped index for either schema
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum UserIndex {
    Single(SingleUserIndex),
    Dual(DualUserIndex),
}

impl UserIndex {
    /// Number of distinct recipients
    pub fn recipient_count(&self) -> usize {
        match self {
            UserIndex::Single(users) => users.len(),
            UserIndex::Dual(users) => users.len(),
        }
    }

    /// Number of claims across all recipients
    pub fn claim_count(&self) -> usize {
        match self {
            UserIndex::Single(users) => users.values().map(BTreeMap::len).sum(),
            UserIndex::Dual(users) => users
                .values()
                .flat_map(BTreeMap::values)
                .map(BTreeMap::len)
                .sum(),
        }
    }

    /// Serialize with two-space indentation
    pub fn to_pretty_json(&self) -> RewardResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
