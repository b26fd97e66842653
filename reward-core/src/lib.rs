//! Reward Core - Merkle Claim Model and Regrouping
//!
//! Monthly merkle claim files list every recipient's claim for one
//! distribution. This crate parses those files and pivots them into a
//! single index keyed by recipient, which is what claim frontends look up.
//!
//! # Schemas
//!
//! | Variant | Files per month | Output shape |
//! |---------|-----------------|--------------|
//! | Single  | `merkle-tree.json` | address → month → claim |
//! | Dual    | `merkle-tree-veAUXO.json`, `merkle-tree-xAUXO.json` | address → token → month → claim |
//!
//! Amounts and proofs are opaque strings and are never reinterpreted.
//!
//! # Usage
//!
//! ```ignore
//! use reward_core::{regroup, MonthDirectory, SchemaVariant};
//!
//! let months: Vec<MonthDirectory> = fetch_somehow();
//! let regrouped = regroup(SchemaVariant::Single, &months)?;
//! let json = regrouped.index.to_pretty_json()?;
//! ```

pub mod error;
pub mod month_index;
pub mod reshape;
pub mod types;

pub use error::{RewardError, RewardResult};
pub use month_index::{build_dual_index, build_single_index, parse_reward_file};
pub use reshape::{regroup, reshape_dual, reshape_single, Regrouped, ReshapeStats};
pub use types::*;

/// Reward core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
