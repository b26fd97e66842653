//! Reshape Engine
//!
//! Pivots month-keyed claim files into a recipient-keyed index. Each claim
//! is moved to `[address][month]` (dual schema: `[address][token][month]`)
//! without touching its contents. Nothing is summed or merged.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, warn};

use crate::error::RewardResult;
use crate::month_index::{build_dual_index, build_single_index};
use crate::types::{
    DualMonthlyIndex, DualUserIndex, MonthDirectory, RewardFile, SchemaVariant,
    SingleMonthlyIndex, SingleUserIndex, UserIndex,
};

/// Counts describing one regroup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReshapeStats {
    /// Months that contributed at least one claim file
    pub months: usize,
    /// Claim files parsed
    pub files: usize,
    /// Distinct recipients in the output
    pub recipients: usize,
    /// Claims in the parsed input files
    pub claims_read: usize,
    /// Claims in the output; equals `claims_read`
    pub claims: usize,
}

/// Output of [`regroup`]
#[derive(Debug, Clone, PartialEq)]
pub struct Regrouped {
    pub index: UserIndex,
    pub stats: ReshapeStats,
}

/// Pivot a single-schema month index by recipient
pub fn reshape_single(index: SingleMonthlyIndex) -> SingleUserIndex {
    let mut users = SingleUserIndex::new();

    for (month, file) in index {
        for (address, claim) in file.recipients {
            users
                .entry(address)
                .or_default()
                .insert(month.clone(), claim);
        }
    }

    users
}

/// Pivot a dual-schema month index by recipient, then token
pub fn reshape_dual(index: DualMonthlyIndex) -> DualUserIndex {
    let mut users = DualUserIndex::new();

    for (month, tokens) in index {
        for (token, file) in tokens {
            for (address, claim) in file.recipients {
                users
                    .entry(address)
                    .or_default()
                    .entry(token)
                    .or_default()
                    .insert(month.clone(), claim);
            }
        }
    }

    users
}

/// Parse the fetched months for `variant` and regroup them by recipient
pub fn regroup(variant: SchemaVariant, months: &[MonthDirectory]) -> RewardResult<Regrouped> {
    let (index, months, files, claims_read) = match variant {
        SchemaVariant::Single => {
            let monthly = build_single_index(months)?;
            let count = monthly.len();
            let claims = monthly.values().map(RewardFile::claim_count).sum::<usize>();
            (UserIndex::Single(reshape_single(monthly)), count, count, claims)
        }
        SchemaVariant::Dual => {
            let monthly = build_dual_index(months)?;
            let count = monthly.len();
            let files = monthly.values().map(BTreeMap::len).sum::<usize>();
            let claims = monthly
                .values()
                .flat_map(BTreeMap::values)
                .map(RewardFile::claim_count)
                .sum::<usize>();
            (UserIndex::Dual(reshape_dual(monthly)), count, files, claims)
        }
    };

    let stats = ReshapeStats {
        months,
        files,
        recipients: index.recipient_count(),
        claims_read,
        claims: index.claim_count(),
    };

    if stats.claims != stats.claims_read {
        warn!(
            claims_read = stats.claims_read,
            claims_written = stats.claims,
            "Claim count changed during regroup"
        );
    }
    debug_assert_eq!(stats.claims, stats.claims_read);

    info!(
        variant = %variant,
        months = stats.months,
        files = stats.files,
        recipients = stats.recipients,
        claims = stats.claims,
        "Regrouped claims by recipient"
    );

    Ok(Regrouped { index, stats })
}
