//! Reward Bridge - Repository Fetch and Publish
//!
//! Connects the claim regrouping in `reward-core` to a source repository.
//!
//! # Stages
//!
//! 1. **Fetch** - [`TreeSource`] returns the month directories under `reports/`
//! 2. **Reshape** - `reward_core::regroup` pivots claims by recipient
//! 3. **Publish** - [`Publisher`] commits the index through a [`GitWriter`]
//!
//! Each stage must complete before the next begins and there are no
//! retries. The target branch only moves at the very end of publish.
//!
//! # Usage
//!
//! ```ignore
//! use reward_bridge::{
//!     GitHubConfig, GitHubGitWriter, GitHubHttp, GitHubTreeSource, RegroupPipeline,
//!     RepoCoordinate, RunConfig,
//! };
//! use reward_core::SchemaVariant;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = RepoCoordinate::new("AuxoDAO", "rewards");
//!     let http = GitHubHttp::new(&GitHubConfig::new(std::env::var("GITHUB_TOKEN")?))?;
//!
//!     let pipeline = RegroupPipeline::new(
//!         GitHubTreeSource::new(http.clone()),
//!         GitHubGitWriter::new(http, repo.clone()),
//!         RunConfig::new(repo, "main"),
//!     );
//!
//!     let report = pipeline.run(SchemaVariant::Dual).await?;
//!     println!("Committed {}", report.receipt.commit_sha);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod git_writer;
pub mod github;
pub mod pipeline;
pub mod publisher;
pub mod tree_source;

pub use config::{
    GitHubConfig, RepoCoordinate, RunConfig, DEFAULT_API_URL, DEFAULT_GRAPHQL_URL,
    DEFAULT_SOURCE_REV, DEFAULT_TIMEOUT_SECS,
};
pub use error::{BridgeError, BridgeResult};
pub use git_writer::{
    BranchTip, GitHubGitWriter, GitStep, GitWriter, MockCommit, MockGitWriter, MockTree,
    TreeEntry, FILE_MODE,
};
pub use github::GitHubHttp;
pub use pipeline::{fetch_and_regroup, RegroupPipeline, RunReport};
pub use publisher::{PublishReceipt, Publisher, COMMIT_MESSAGE};
pub use tree_source::{GitHubTreeSource, LocalTreeSource, MockTreeSource, TreeSource};

/// Bridge version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
