//! Month Index Builder
//!
//! Parses the recognized claim files of each month directory. Files with
//! other names are skipped; a month with no recognized file is left out.

use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use tracing::debug;

use crate::error::{RewardError, RewardResult};
use crate::types::{
    DualMonthlyIndex, MonthDirectory, RewardFile, SchemaVariant, SingleMonthlyIndex,
    TokenVariant, TreeFile,
};

/// Build the single-schema month index
pub fn build_single_index(months: &[MonthDirectory]) -> RewardResult<SingleMonthlyIndex> {
    let mut index = SingleMonthlyIndex::new();

    for month in months {
        for file in &month.files {
            if !SchemaVariant::Single
                .recognized_files()
                .contains(&file.name.as_str())
            {
                debug!(month = %month.name, file = %file.name, "Skipping unrecognized file");
                continue;
            }
            index.insert(month.name.clone(), parse_reward_file(&month.name, file)?);
        }
    }

    Ok(index)
}

/// Build the dual-schema month index
pub fn build_dual_index(months: &[MonthDirectory]) -> RewardResult<DualMonthlyIndex> {
    let mut index = DualMonthlyIndex::new();

    for month in months {
        let mut tokens = BTreeMap::new();
        for file in &month.files {
            let Some(token) = TokenVariant::from_file_name(&file.name) else {
                debug!(month = %month.name, file = %file.name, "Skipping unrecognized file");
                continue;
            };
            tokens.insert(token, parse_reward_file(&month.name, file)?);
        }

        if !tokens.is_empty() {
            index.insert(month.name.clone(), tokens);
        }
    }

    Ok(index)
}

/// Parse one claim file, naming it as `<month>/<file>` on failure
pub fn parse_reward_file<C: DeserializeOwned>(
    month: &str,
    file: &TreeFile,
) -> RewardResult<RewardFile<C>> {
    let path = format!("{}/{}", month, file.name);
    let text = file
        .text
        .as_deref()
        .ok_or_else(|| RewardError::missing_content(&path))?;

    serde_json::from_str(text).map_err(|e| RewardError::parse(path, e))
}
