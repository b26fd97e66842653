//! Configuration Loading
//!
//! Turns command-line and environment inputs into the explicit values the
//! pipeline takes. Owner, repository, token and branch have no defaults.

use reward_bridge::{GitHubConfig, RepoCoordinate, RunConfig};

use crate::commands::RepoArgs;
use crate::error::{CliError, CliResult};

fn required(value: &Option<String>, flag: &str, env: &str) -> CliResult<String> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(CliError::config(format!("missing --{} (env: {})", flag, env))),
    }
}

impl RepoArgs {
    /// Repository coordinate
    pub fn repo_coordinate(&self) -> CliResult<RepoCoordinate> {
        Ok(RepoCoordinate::new(
            required(&self.owner, "owner", "REWARDS_REPO_OWNER")?,
            required(&self.repo, "repo", "REWARDS_REPO_NAME")?,
        ))
    }

    /// Run configuration for a publishing run
    pub fn run_config(&self) -> CliResult<RunConfig> {
        let branch = required(&self.branch, "branch", "REWARDS_BRANCH")?;
        Ok(RunConfig::new(self.repo_coordinate()?, branch).with_source_rev(&self.source_rev))
    }

    /// Run configuration for reading only; the branch is not needed
    pub fn read_config(&self) -> CliResult<RunConfig> {
        let branch = self.branch.clone().unwrap_or_default();
        Ok(RunConfig::new(self.repo_coordinate()?, branch).with_source_rev(&self.source_rev))
    }

    /// GitHub connection settings
    pub fn github_config(&self) -> CliResult<GitHubConfig> {
        if self.timeout_secs == 0 {
            return Err(CliError::config("--timeout-secs must be positive"));
        }

        Ok(GitHubConfig {
            api_url: self.api_url.clone(),
            graphql_url: self.graphql_url.clone(),
            token: required(&self.token, "token", "GITHUB_TOKEN")?,
            timeout_secs: self.timeout_secs,
        })
    }
}
