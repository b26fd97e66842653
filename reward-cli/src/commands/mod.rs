//! CLI Commands Module
//!
//! Command definitions for the regroup CLI.

pub mod preview;
pub mod run;

use clap::{Args, Parser, Subcommand, ValueEnum};
use reward_bridge::{DEFAULT_API_URL, DEFAULT_GRAPHQL_URL, DEFAULT_SOURCE_REV, DEFAULT_TIMEOUT_SECS};
use reward_core::SchemaVariant;

use crate::logging::LogFormat;

/// Merkle claim regrouper
#[derive(Parser, Debug)]
#[command(name = "reward-regroup")]
#[command(author = "Rainbow City Foundation")]
#[command(version)]
#[command(about = "Regroup monthly merkle claim files by recipient")]
#[command(long_about = "Reads the monthly merkle claim files under reports/ in a GitHub \
    repository, regroups every claim by recipient address, and commits the result \
    back to a branch.\n\n\
    Configuration is read from flags, then environment variables (a .env file is loaded).")]
pub struct Cli {
    #[command(flatten)]
    pub repo: RepoArgs,

    /// Output format for run summaries (json, plain)
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,

    /// Log format (pretty, json, compact)
    #[arg(long, value_enum, env = "REWARDS_LOG_FORMAT", default_value = "compact")]
    pub log_format: LogFormat,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Repository and API settings shared by all commands
#[derive(Args, Debug, Clone)]
pub struct RepoArgs {
    /// Repository owner (env: REWARDS_REPO_OWNER)
    #[arg(long, env = "REWARDS_REPO_OWNER")]
    pub owner: Option<String>,

    /// Repository name (env: REWARDS_REPO_NAME)
    #[arg(long, env = "REWARDS_REPO_NAME")]
    pub repo: Option<String>,

    /// Access token (env: GITHUB_TOKEN)
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Branch the commit is appended to (env: REWARDS_BRANCH)
    #[arg(long, env = "REWARDS_BRANCH")]
    pub branch: Option<String>,

    /// Revision the claim tree is read from
    #[arg(long, env = "REWARDS_SOURCE_REV", default_value = DEFAULT_SOURCE_REV)]
    pub source_rev: String,

    /// GitHub REST endpoint (env: GITHUB_API_URL)
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// GitHub GraphQL endpoint (env: GITHUB_GRAPHQL_URL)
    #[arg(long, env = "GITHUB_GRAPHQL_URL", default_value = DEFAULT_GRAPHQL_URL)]
    pub graphql_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text
    Plain,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Plain
    }
}

/// Claim file schema selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VariantArg {
    /// merkle-tree.json, claims with metadata
    Single,
    /// merkle-tree-veAUXO.json and merkle-tree-xAUXO.json
    Dual,
}

impl From<VariantArg> for SchemaVariant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Single => SchemaVariant::Single,
            VariantArg::Dual => SchemaVariant::Dual,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch, regroup, and commit the user index
    Run(run::RunArgs),

    /// Fetch and regroup without committing
    Preview(preview::PreviewArgs),
}
