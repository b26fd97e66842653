//! Claim Types
//!
//! Per-recipient entries of a merkle claim file. Fields outside the typed
//! set are kept in `extra` so regrouping never loses data.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::amount::TokenAmount;

/// Untyped fields carried through verbatim
pub type ExtraFields = BTreeMap<String, Value>;

/// Claim from a single-schema file (`merkle-tree.json`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleClaim {
    /// Leaf position in the merkle tree
    pub account_index: u64,
    /// Reward amount
    pub amount: TokenAmount,
    /// Why the reward was granted
    pub metadata: ClaimMetadata,
    /// Distribution window
    pub window_index: u64,
    /// Merkle inclusion proof, leaf to root
    pub proof: Vec<String>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Textual metadata on a single-schema claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimMetadata {
    pub reason: String,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Claim from a token-variant file (`merkle-tree-veAUXO.json`, `merkle-tree-xAUXO.json`)
///
/// The decomposed amounts appear either nested under `rewards` or directly
/// on the claim. Both shapes are accepted and written back as read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DualClaim {
    /// Leaf position in the merkle tree
    pub account_index: u64,
    /// Total reward amount
    pub amount: TokenAmount,
    /// Nested decomposition of `amount`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rewards: Option<RewardBreakdown>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pro_rata: Option<TokenAmount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redistributed: Option<TokenAmount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax: Option<TokenAmount>,
    /// Distribution window
    pub window_index: u64,
    /// Merkle inclusion proof, leaf to root
    pub proof: Vec<String>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl DualClaim {
    /// Pro-rata share, nested value first
    pub fn pro_rata(&self) -> Option<&TokenAmount> {
        self.rewards
            .as_ref()
            .and_then(|r| r.pro_rata.as_ref())
            .or(self.pro_rata.as_ref())
    }

    /// Redistributed share, nested value first
    pub fn redistributed(&self) -> Option<&TokenAmount> {
        self.rewards
            .as_ref()
            .and_then(|r| r.redistributed.as_ref())
            .or(self.redistributed.as_ref())
    }

    /// Withheld amount, nested value first
    pub fn tax(&self) -> Option<&TokenAmount> {
        self.rewards
            .as_ref()
            .and_then(|r| r.tax.as_ref())
            .or(self.tax.as_ref())
    }
}

/// Decomposed reward amounts nested under `rewards`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardBreakdown {
    /// Share earned from the recipient's own activity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pro_rata: Option<TokenAmount>,
    /// Share redistributed from inactive holders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redistributed: Option<TokenAmount>,
    /// Amount withheld
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax: Option<TokenAmount>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}
