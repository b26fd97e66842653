//! Reward CLI - Merkle Claim Regrouper
//!
//! CI entry point that reads the monthly merkle claim files of a GitHub
//! repository, regroups every claim by recipient, and commits the index
//! back to a branch.
//!
//! # Usage
//!
//! ```text
//! reward-regroup [OPTIONS] <COMMAND>
//!
//! Commands:
//!   run       Fetch, regroup, and commit the user index
//!   preview   Fetch and regroup without committing
//!
//! Options:
//!       --owner <OWNER>        Repository owner [env: REWARDS_REPO_OWNER]
//!       --repo <REPO>          Repository name [env: REWARDS_REPO_NAME]
//!       --token <TOKEN>        Access token [env: GITHUB_TOKEN]
//!       --branch <BRANCH>      Branch the commit is appended to [env: REWARDS_BRANCH]
//!   -f, --format <FORMAT>      Output format (json, plain) [default: plain]
//!   -v, --verbose              Enable debug logging
//! ```
//!
//! # Examples
//!
//! ## Publish the token-variant index
//! ```text
//! reward-regroup --owner AuxoDAO --repo rewards --branch main run --variant dual
//! ```
//!
//! ## Preview from a local checkout
//! ```text
//! reward-regroup preview --variant single --dir . --out users.json
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod handler;
pub mod logging;
pub mod output;

pub use commands::{Cli, Commands, OutputFormat, RepoArgs, VariantArg};
pub use error::{CliError, CliResult};

/// Reward CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
