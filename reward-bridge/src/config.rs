//! Run Configuration
//!
//! Explicit configuration for one regroup run, built once at startup and
//! passed into the pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default GitHub REST endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";
/// Default GitHub GraphQL endpoint
pub const DEFAULT_GRAPHQL_URL: &str = "https://api.github.com/graphql";
/// Default revision the claim tree is read from
pub const DEFAULT_SOURCE_REV: &str = "HEAD";
/// Default request timeout (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Repository owner and name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoCoordinate {
    pub owner: String,
    pub name: String,
}

impl RepoCoordinate {
    /// Create a repository coordinate
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// GitHub API connection settings
#[derive(Clone)]
pub struct GitHubConfig {
    /// REST base URL
    pub api_url: String,
    /// GraphQL endpoint URL
    pub graphql_url: String,
    /// Access token sent as a bearer credential
    pub token: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl GitHubConfig {
    /// Settings for github.com with the given token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            graphql_url: DEFAULT_GRAPHQL_URL.to_string(),
            token: token.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl fmt::Debug for GitHubConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubConfig")
            .field("api_url", &self.api_url)
            .field("graphql_url", &self.graphql_url)
            .field("token", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Everything a pipeline run needs to know
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Repository holding the claim files and receiving the commit
    pub repo: RepoCoordinate,
    /// Branch the commit is appended to
    pub branch: String,
    /// Revision the claim tree is read from
    pub source_rev: String,
}

impl RunConfig {
    /// Create a run configuration reading from `HEAD`
    pub fn new(repo: RepoCoordinate, branch: impl Into<String>) -> Self {
        Self {
            repo,
            branch: branch.into(),
            source_rev: DEFAULT_SOURCE_REV.to_string(),
        }
    }

    /// Read the claim tree from another revision
    pub fn with_source_rev(mut self, rev: impl Into<String>) -> Self {
        self.source_rev = rev.into();
        self
    }
}
