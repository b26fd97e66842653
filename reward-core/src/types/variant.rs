//! Schema Variants
//!
//! The two claim file layouts and the fixed names and paths each uses.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Directory under the repository root holding one subdirectory per month
pub const REPORTS_DIR: &str = "reports";

/// Reward file layout handled by a pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVariant {
    /// One `merkle-tree.json` per month, claims carry metadata
    Single,
    /// One file per token variant per month, claims carry a reward breakdown
    Dual,
}

impl SchemaVariant {
    /// File name recognized by the single-schema pipeline
    pub const SINGLE_FILE: &'static str = "merkle-tree.json";

    /// Exact file names read from each month directory
    pub fn recognized_files(&self) -> &'static [&'static str] {
        match self {
            SchemaVariant::Single => &[Self::SINGLE_FILE],
            SchemaVariant::Dual => &[TokenVariant::VE_AUXO_FILE, TokenVariant::X_AUXO_FILE],
        }
    }

    /// Repository path the regrouped index is committed to
    pub fn output_path(&self) -> &'static str {
        match self {
            SchemaVariant::Single => "reports/users.json",
            SchemaVariant::Dual => "reports/users-by-token.json",
        }
    }
}

impl fmt::Display for SchemaVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaVariant::Single => write!(f, "single"),
            SchemaVariant::Dual => write!(f, "dual"),
        }
    }
}

/// Token whose rewards a dual-schema file distributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TokenVariant {
    #[serde(rename = "veAUXO")]
    VeAuxo,
    #[serde(rename = "xAUXO")]
    XAuxo,
}

impl TokenVariant {
    /// Every token variant, in output order
    pub const ALL: [TokenVariant; 2] = [TokenVariant::VeAuxo, TokenVariant::XAuxo];

    const VE_AUXO_FILE: &'static str = "merkle-tree-veAUXO.json";
    const X_AUXO_FILE: &'static str = "merkle-tree-xAUXO.json";

    /// Label used as the key in the regrouped index
    pub fn label(&self) -> &'static str {
        match self {
            TokenVariant::VeAuxo => "veAUXO",
            TokenVariant::XAuxo => "xAUXO",
        }
    }

    /// Claim file name for this token
    pub fn file_name(&self) -> &'static str {
        match self {
            TokenVariant::VeAuxo => Self::VE_AUXO_FILE,
            TokenVariant::XAuxo => Self::X_AUXO_FILE,
        }
    }

    /// Token variant for an exact claim file name
    pub fn from_file_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.file_name() == name)
    }
}

impl fmt::Display for TokenVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognized_files() {
        assert_eq!(SchemaVariant::Single.recognized_files(), ["merkle-tree.json"]);
        assert_eq!(
            SchemaVariant::Dual.recognized_files(),
            ["merkle-tree-veAUXO.json", "merkle-tree-xAUXO.json"]
        );
        for token in TokenVariant::ALL {
            assert!(SchemaVariant::Dual.recognized_files().contains(&token.file_name()));
        }
    }

    #[test]
    fn test_output_paths_differ() {
        assert_ne!(
            SchemaVariant::Single.output_path(),
            SchemaVariant::Dual.output_path()
        );
        assert!(SchemaVariant::Dual.output_path().starts_with(REPORTS_DIR));
    }

    #[test]
    fn test_token_from_file_name_is_exact() {
        assert_eq!(
            TokenVariant::from_file_name("merkle-tree-xAUXO.json"),
            Some(TokenVariant::XAuxo)
        );
        assert_eq!(TokenVariant::from_file_name("merkle-tree-xauxo.json"), None);
        assert_eq!(TokenVariant::from_file_name("merkle-tree.json"), None);
    }

    #[test]
    fn test_token_serializes_as_label() {
        assert_eq!(
            serde_json::to_string(&TokenVariant::VeAuxo).unwrap(),
            "\"veAUXO\""
        );
    }
}
