//! Reward File
//!
//! One parsed merkle claim file: the tree root, its window, and every
//! recipient's claim.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::claim::ExtraFields;

/// Recipient address as written in the claim file
pub type Address = String;

/// Month label, the name of the month directory (e.g. `2021-01`)
pub type MonthLabel = String;

/// Parsed merkle claim file, generic over the claim schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardFile<C> {
    /// Merkle root over all claims
    pub merkle_root: String,
    /// Distribution window the file belongs to
    pub window_index: u64,
    /// Claims keyed by recipient address
    #[serde(alias = "claims")]
    pub recipients: BTreeMap<Address, C>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl<C> RewardFile<C> {
    /// Number of claims in the file
    pub fn claim_count(&self) -> usize {
        self.recipients.len()
    }
}
