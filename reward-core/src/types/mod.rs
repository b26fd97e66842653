//! Core Types
//!
//! Claim file model and the month and user indexes built from it.

pub mod amount;
pub mod claim;
pub mod index;
pub mod reward_file;
pub mod variant;

pub use amount::TokenAmount;
pub use claim::{ClaimMetadata, DualClaim, ExtraFields, RewardBreakdown, SingleClaim};
pub use index::{
    DualMonthlyIndex, DualUserIndex, MonthDirectory, SingleMonthlyIndex, SingleUserIndex,
    TreeFile, UserIndex,
};
pub use reward_file::{Address, MonthLabel, RewardFile};
pub use variant::{SchemaVariant, TokenVariant, REPORTS_DIR};
