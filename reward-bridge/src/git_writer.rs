//! Git Writer
//!
//! Content-addressed write primitives of the target repository: resolve a
//! branch, create blob/tree/commit objects, and move the branch ref.

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use tracing::debug;

use crate::config::RepoCoordinate;
use crate::error::{BridgeError, BridgeResult};
use crate::github::{decode, GitHubHttp};

/// Mode of a regular, non-executable file
pub const FILE_MODE: &str = "100644";

/// Step of the publish sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GitStep {
    GetRef,
    CreateBlob,
    CreateTree,
    CreateCommit,
    UpdateRef,
}

impl fmt::Display for GitStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GitStep::GetRef => "get_ref",
            GitStep::CreateBlob => "create_blob",
            GitStep::CreateTree => "create_tree",
            GitStep::CreateCommit => "create_commit",
            GitStep::UpdateRef => "update_ref",
        };
        f.write_str(name)
    }
}

/// Current head of a branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchTip {
    /// Commit the branch points at
    pub commit_sha: String,
    /// Root tree of that commit
    pub tree_sha: String,
}

/// Entry placed into a new tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    pub path: String,
    pub mode: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub sha: String,
}

impl TreeEntry {
    /// Regular file entry pointing at a blob
    pub fn blob(path: impl Into<String>, sha: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            mode: FILE_MODE.to_string(),
            kind: "blob".to_string(),
            sha: sha.into(),
        }
    }
}

/// Write interface of a git repository
#[async_trait]
pub trait GitWriter: Send + Sync {
    /// Resolve the tip of `branch`; fails with `BranchNotFound` if absent
    async fn get_branch_tip(&self, branch: &str) -> BridgeResult<BranchTip>;

    /// Store UTF-8 content as a blob, returning its sha
    async fn create_blob(&self, content: &str) -> BridgeResult<String>;

    /// Create a tree layering `entries` over `base_tree`, returning its sha
    async fn create_tree(&self, base_tree: &str, entries: &[TreeEntry]) -> BridgeResult<String>;

    /// Create a commit, returning its sha
    async fn create_commit(
        &self,
        message: &str,
        tree: &str,
        parents: &[String],
    ) -> BridgeResult<String>;

    /// Fast-forward `branch` to `sha`
    async fn update_ref(&self, branch: &str, sha: &str) -> BridgeResult<()>;
}

// ============================================
// Request/Response Types
// ============================================

/// Create blob request
#[derive(Debug, Clone, Serialize)]
pub struct CreateBlobRequest<'a> {
    pub content: &'a str,
    pub encoding: &'static str,
}

/// Create tree request
#[derive(Debug, Clone, Serialize)]
pub struct CreateTreeRequest<'a> {
    pub base_tree: &'a str,
    pub tree: &'a [TreeEntry],
}

/// Create commit request
#[derive(Debug, Clone, Serialize)]
pub struct CreateCommitRequest<'a> {
    pub message: &'a str,
    pub tree: &'a str,
    pub parents: &'a [String],
}

/// Update ref request
#[derive(Debug, Clone, Serialize)]
pub struct UpdateRefRequest<'a> {
    pub sha: &'a str,
    pub force: bool,
}

#[derive(Debug, Deserialize)]
struct RefResponse {
    object: ShaObject,
}

#[derive(Debug, Deserialize)]
struct CommitResponse {
    tree: ShaObject,
}

#[derive(Debug, Deserialize)]
struct ShaObject {
    sha: String,
}

// ============================================================================
// GitHub REST Implementation
// ============================================================================

/// Git writer backed by the GitHub git-data REST API
pub struct GitHubGitWriter {
    http: GitHubHttp,
    repo: RepoCoordinate,
}

impl GitHubGitWriter {
    /// Create a writer for one repository
    pub fn new(http: GitHubHttp, repo: RepoCoordinate) -> Self {
        Self { http, repo }
    }

    fn url(&self, path: &str) -> String {
        self.http
            .rest_url(&format!("/repos/{}/{}/git/{}", self.repo.owner, self.repo.name, path))
    }

    /// URL of a branch ref under `prefix`, each name segment percent-encoded
    fn branch_url(&self, prefix: &str, branch: &str) -> BridgeResult<Url> {
        let mut url = Url::parse(&self.url(prefix))
            .map_err(|e| BridgeError::Config(format!("invalid API URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| BridgeError::Config("API URL cannot carry a path".into()))?
            .pop_if_empty()
            .extend(branch.split('/'));
        Ok(url)
    }
}

#[async_trait]
impl GitWriter for GitHubGitWriter {
    async fn get_branch_tip(&self, branch: &str) -> BridgeResult<BranchTip> {
        let response = self
            .http
            .client()
            .get(self.branch_url("ref/heads", branch)?)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(BridgeError::branch_not_found(branch));
        }
        let reference: RefResponse = decode(response).await?;

        let response = self
            .http
            .client()
            .get(self.url(&format!("commits/{}", reference.object.sha)))
            .send()
            .await?;
        let commit: CommitResponse = decode(response).await?;

        Ok(BranchTip {
            commit_sha: reference.object.sha,
            tree_sha: commit.tree.sha,
        })
    }

    async fn create_blob(&self, content: &str) -> BridgeResult<String> {
        let request = CreateBlobRequest {
            content,
            encoding: "utf-8",
        };
        let response = self
            .http
            .client()
            .post(self.url("blobs"))
            .json(&request)
            .send()
            .await?;

        let blob: ShaObject = decode(response).await?;
        Ok(blob.sha)
    }

    async fn create_tree(&self, base_tree: &str, entries: &[TreeEntry]) -> BridgeResult<String> {
        let request = CreateTreeRequest {
            base_tree,
            tree: entries,
        };
        let response = self
            .http
            .client()
            .post(self.url("trees"))
            .json(&request)
            .send()
            .await?;

        let tree: ShaObject = decode(response).await?;
        Ok(tree.sha)
    }

    async fn create_commit(
        &self,
        message: &str,
        tree: &str,
        parents: &[String],
    ) -> BridgeResult<String> {
        let request = CreateCommitRequest {
            message,
            tree,
            parents,
        };
        let response = self
            .http
            .client()
            .post(self.url("commits"))
            .json(&request)
            .send()
            .await?;

        let commit: ShaObject = decode(response).await?;
        Ok(commit.sha)
    }

    async fn update_ref(&self, branch: &str, sha: &str) -> BridgeResult<()> {
        // GitHub answers 422 when the branch moved since get_branch_tip.
        let request = UpdateRefRequest { sha, force: false };
        let response = self
            .http
            .client()
            .patch(self.branch_url("refs/heads", branch)?)
            .json(&request)
            .send()
            .await?;

        let _: serde_json::Value = decode(response).await?;
        Ok(())
    }
}

// ============================================================================
// Mock Writer for Testing
// ============================================================================

/// Commit stored by the mock writer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockCommit {
    pub message: String,
    pub tree: String,
    pub parents: Vec<String>,
}

/// Tree stored by the mock writer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockTree {
    pub base_tree: String,
    pub entries: Vec<TreeEntry>,
}

#[derive(Debug, Default)]
struct MockRepoState {
    refs: HashMap<String, String>,
    commit_trees: HashMap<String, String>,
    blobs: HashMap<String, String>,
    trees: HashMap<String, MockTree>,
    commits: HashMap<String, MockCommit>,
    calls: Vec<GitStep>,
}

/// Mock git writer for testing
///
/// Keeps objects in memory and records the order of calls.
pub struct MockGitWriter {
    state: RwLock<MockRepoState>,
    next_sha: AtomicU64,
    /// Step that fails when reached
    fail_at: RwLock<Option<GitStep>>,
}

impl MockGitWriter {
    /// Create an empty repository
    pub fn new() -> Self {
        Self {
            state: RwLock::new(MockRepoState::default()),
            next_sha: AtomicU64::new(1),
            fail_at: RwLock::new(None),
        }
    }

    /// Create a repository whose `branch` points at a root commit
    pub fn with_branch(branch: &str) -> Self {
        let writer = Self::new();
        let tree = writer.fresh_sha();
        let commit = writer.fresh_sha();
        {
            let mut state = writer.state.write().unwrap();
            state.commit_trees.insert(commit.clone(), tree);
            state.refs.insert(branch.to_string(), commit);
        }
        writer
    }

    /// Fail when `step` is reached
    pub fn fail_at(&self, step: Option<GitStep>) {
        *self.fail_at.write().unwrap() = step;
    }

    /// Move a branch as another writer would
    pub fn advance_branch(&self, branch: &str) -> String {
        let commit = self.fresh_sha();
        let tree = self.fresh_sha();
        let mut state = self.state.write().unwrap();
        state.commit_trees.insert(commit.clone(), tree);
        state.refs.insert(branch.to_string(), commit.clone());
        commit
    }

    /// Steps called so far, in order
    pub fn calls(&self) -> Vec<GitStep> {
        self.state.read().unwrap().calls.clone()
    }

    /// Commit a branch points at
    pub fn branch_head(&self, branch: &str) -> Option<String> {
        self.state.read().unwrap().refs.get(branch).cloned()
    }

    /// Stored blob content
    pub fn blob(&self, sha: &str) -> Option<String> {
        self.state.read().unwrap().blobs.get(sha).cloned()
    }

    /// Stored tree
    pub fn tree(&self, sha: &str) -> Option<MockTree> {
        self.state.read().unwrap().trees.get(sha).cloned()
    }

    /// Stored commit
    pub fn commit(&self, sha: &str) -> Option<MockCommit> {
        self.state.read().unwrap().commits.get(sha).cloned()
    }

    /// Number of blob, tree and commit objects created
    pub fn object_count(&self) -> usize {
        let state = self.state.read().unwrap();
        state.blobs.len() + state.trees.len() + state.commits.len()
    }

    fn fresh_sha(&self) -> String {
        format!("{:040x}", self.next_sha.fetch_add(1, Ordering::SeqCst))
    }

    fn enter(&self, step: GitStep) -> BridgeResult<()> {
        self.state.write().unwrap().calls.push(step);
        if *self.fail_at.read().unwrap() == Some(step) {
            return Err(BridgeError::Unavailable(format!("Mock failure at {}", step)));
        }
        Ok(())
    }
}

impl Default for MockGitWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GitWriter for MockGitWriter {
    async fn get_branch_tip(&self, branch: &str) -> BridgeResult<BranchTip> {
        self.enter(GitStep::GetRef)?;
        let state = self.state.read().unwrap();
        let commit_sha = state
            .refs
            .get(branch)
            .cloned()
            .ok_or_else(|| BridgeError::branch_not_found(branch))?;
        let tree_sha = state
            .commit_trees
            .get(&commit_sha)
            .cloned()
            .ok_or_else(|| BridgeError::invalid_response("commit without tree"))?;
        Ok(BranchTip {
            commit_sha,
            tree_sha,
        })
    }

    async fn create_blob(&self, content: &str) -> BridgeResult<String> {
        self.enter(GitStep::CreateBlob)?;
        let sha = self.fresh_sha();
        self.state
            .write()
            .unwrap()
            .blobs
            .insert(sha.clone(), content.to_string());
        debug!(%sha, bytes = content.len(), "Mock blob created");
        Ok(sha)
    }

    async fn create_tree(&self, base_tree: &str, entries: &[TreeEntry]) -> BridgeResult<String> {
        self.enter(GitStep::CreateTree)?;
        let sha = self.fresh_sha();
        self.state.write().unwrap().trees.insert(
            sha.clone(),
            MockTree {
                base_tree: base_tree.to_string(),
                entries: entries.to_vec(),
            },
        );
        Ok(sha)
    }

    async fn create_commit(
        &self,
        message: &str,
        tree: &str,
        parents: &[String],
    ) -> BridgeResult<String> {
        self.enter(GitStep::CreateCommit)?;
        let sha = self.fresh_sha();
        let mut state = self.state.write().unwrap();
        state.commit_trees.insert(sha.clone(), tree.to_string());
        state.commits.insert(
            sha.clone(),
            MockCommit {
                message: message.to_string(),
                tree: tree.to_string(),
                parents: parents.to_vec(),
            },
        );
        Ok(sha)
    }

    async fn update_ref(&self, branch: &str, sha: &str) -> BridgeResult<()> {
        self.enter(GitStep::UpdateRef)?;
        let mut state = self.state.write().unwrap();
        let head = state
            .refs
            .get(branch)
            .cloned()
            .ok_or_else(|| BridgeError::branch_not_found(branch))?;

        let is_fast_forward = state
            .commits
            .get(sha)
            .map(|c| c.parents.contains(&head))
            .unwrap_or(false);
        if !is_fast_forward {
            return Err(BridgeError::api(422, "Update is not a fast forward"));
        }

        state.refs.insert(branch.to_string(), sha.to_string());
        Ok(())
    }
}
