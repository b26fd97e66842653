//! Publisher
//!
//! Commits one file on top of a branch in five dependent steps:
//! 1. Resolve the branch tip
//! 2. Create a blob with the file content
//! 3. Create a tree placing the blob at its path over the tip's tree
//! 4. Create a commit on that tree with the tip as sole parent
//! 5. Fast-forward the branch to the new commit
//!
//! # Failure
//!
//! Any failing step aborts the publish. Objects created before the failure
//! stay orphaned in the object store and are never referenced. The branch
//! only moves in step 5, so it is either advanced or left at its old tip.
//! If another writer moves the branch between steps 1 and 5 the update is
//! rejected as non-fast-forward and the publish fails.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{BridgeError, BridgeResult};
use crate::git_writer::{GitStep, GitWriter, TreeEntry};

/// Message of every commit this tool creates
pub const COMMIT_MESSAGE: &str = "chore(bot): regroup merkle claims by recipient [automated]";

/// Objects created by a successful publish
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishReceipt {
    pub branch: String,
    pub path: String,
    /// Branch tip before the publish
    pub parent_sha: String,
    pub blob_sha: String,
    pub tree_sha: String,
    /// New branch tip
    pub commit_sha: String,
    pub published_at: DateTime<Utc>,
}

/// Publishes files through a [`GitWriter`]
pub struct Publisher<'a, W: GitWriter + ?Sized> {
    writer: &'a W,
}

impl<'a, W: GitWriter + ?Sized> Publisher<'a, W> {
    /// Create a publisher over a writer
    pub fn new(writer: &'a W) -> Self {
        Self { writer }
    }

    /// Commit `content` at `path` on `branch`
    pub async fn publish(
        &self,
        branch: &str,
        path: &str,
        content: &str,
    ) -> BridgeResult<PublishReceipt> {
        let tip = self
            .writer
            .get_branch_tip(branch)
            .await
            .map_err(|e| step_failed(GitStep::GetRef, e))?;
        info!(step = %GitStep::GetRef, branch, sha = %tip.commit_sha, "Resolved branch tip");

        let blob_sha = self
            .writer
            .create_blob(content)
            .await
            .map_err(|e| step_failed(GitStep::CreateBlob, e))?;
        info!(step = %GitStep::CreateBlob, sha = %blob_sha, bytes = content.len(), "Created blob");

        let entries = [TreeEntry::blob(path, &blob_sha)];
        let tree_sha = self
            .writer
            .create_tree(&tip.tree_sha, &entries)
            .await
            .map_err(|e| step_failed(GitStep::CreateTree, e))?;
        info!(step = %GitStep::CreateTree, sha = %tree_sha, base = %tip.tree_sha, path, "Created tree");

        let parents = [tip.commit_sha.clone()];
        let commit_sha = self
            .writer
            .create_commit(COMMIT_MESSAGE, &tree_sha, &parents)
            .await
            .map_err(|e| step_failed(GitStep::CreateCommit, e))?;
        info!(step = %GitStep::CreateCommit, sha = %commit_sha, parent = %tip.commit_sha, "Created commit");

        self.writer
            .update_ref(branch, &commit_sha)
            .await
            .map_err(|e| step_failed(GitStep::UpdateRef, e))?;
        info!(step = %GitStep::UpdateRef, branch, sha = %commit_sha, "Advanced branch");

        Ok(PublishReceipt {
            branch: branch.to_string(),
            path: path.to_string(),
            parent_sha: tip.commit_sha,
            blob_sha,
            tree_sha,
            commit_sha,
            published_at: Utc::now(),
        })
    }
}

fn step_failed(step: GitStep, error: BridgeError) -> BridgeError {
    warn!(%step, %error, "Publish step failed");
    error
}
