//! Regroup Pipeline
//!
//! Fetch → reshape → publish for one schema variant. Every remote call is
//! awaited in sequence and any error aborts the run.

use chrono::{DateTime, Utc};
use reward_core::{regroup, Regrouped, ReshapeStats, SchemaVariant, REPORTS_DIR};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::RunConfig;
use crate::error::BridgeResult;
use crate::git_writer::GitWriter;
use crate::publisher::{PublishReceipt, Publisher};
use crate::tree_source::TreeSource;

/// Summary of a completed run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub variant: SchemaVariant,
    pub repo: String,
    pub stats: ReshapeStats,
    pub receipt: PublishReceipt,
    pub completed_at: DateTime<Utc>,
}

/// Fetch the claim tree and regroup it without publishing
pub async fn fetch_and_regroup<S: TreeSource + ?Sized>(
    source: &S,
    config: &RunConfig,
    variant: SchemaVariant,
) -> BridgeResult<Regrouped> {
    let months = source
        .fetch_tree(&config.repo, &config.source_rev, REPORTS_DIR)
        .await?;
    Ok(regroup(variant, &months)?)
}

/// Pipeline wiring a tree source and a git writer to one configuration
pub struct RegroupPipeline<S, W> {
    source: S,
    writer: W,
    config: RunConfig,
}

impl<S: TreeSource, W: GitWriter> RegroupPipeline<S, W> {
    /// Create a pipeline
    pub fn new(source: S, writer: W, config: RunConfig) -> Self {
        Self {
            source,
            writer,
            config,
        }
    }

    /// Git writer
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Fetch, regroup, and commit the index for `variant`
    pub async fn run(&self, variant: SchemaVariant) -> BridgeResult<RunReport> {
        info!(
            %variant,
            repo = %self.config.repo,
            branch = %self.config.branch,
            "Starting regroup run"
        );

        let Regrouped { index, stats } =
            fetch_and_regroup(&self.source, &self.config, variant).await?;
        let content = index.to_pretty_json()?;

        let receipt = Publisher::new(&self.writer)
            .publish(&self.config.branch, variant.output_path(), &content)
            .await?;

        info!(
            %variant,
            commit = %receipt.commit_sha,
            recipients = stats.recipients,
            claims = stats.claims,
            "Regroup run complete"
        );

        Ok(RunReport {
            variant,
            repo: self.config.repo.to_string(),
            stats,
            receipt,
            completed_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RepoCoordinate;
    use crate::git_writer::{GitStep, MockGitWriter};
    use crate::tree_source::MockTreeSource;
    use reward_core::{MonthDirectory, TreeFile};

    fn config() -> RunConfig {
        RunConfig::new(RepoCoordinate::new("AuxoDAO", "rewards"), "main")
    }

    #[tokio::test]
    async fn test_fetch_failure_touches_nothing() {
        let source = MockTreeSource::default();
        source.set_fail_mode(true);
        let pipeline = RegroupPipeline::new(source, MockGitWriter::with_branch("main"), config());

        assert!(pipeline.run(SchemaVariant::Single).await.is_err());
        assert!(pipeline.writer().calls().is_empty());
    }

    #[tokio::test]
    async fn test_parse_failure_touches_nothing() {
        let source = MockTreeSource::new(vec![MonthDirectory::new(
            "2021-01",
            vec![TreeFile::text("merkle-tree.json", "not json")],
        )]);
        let pipeline = RegroupPipeline::new(source, MockGitWriter::with_branch("main"), config());

        let err = pipeline.run(SchemaVariant::Single).await.unwrap_err();
        assert!(err.to_string().contains("2021-01/merkle-tree.json"));
        assert!(pipeline.writer().calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_tree_still_commits() {
        let pipeline = RegroupPipeline::new(
            MockTreeSource::default(),
            MockGitWriter::with_branch("main"),
            config(),
        );

        let report = pipeline.run(SchemaVariant::Dual).await.unwrap();
        assert_eq!(report.stats.claims, 0);
        assert_eq!(pipeline.writer().blob(&report.receipt.blob_sha).as_deref(), Some("{}"));
        assert_eq!(report.receipt.path, "reports/users-by-token.json");
        assert_eq!(pipeline.writer().calls().last(), Some(&GitStep::UpdateRef));
    }
}
