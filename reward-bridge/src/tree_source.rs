//! Tree Source
//!
//! Fetches the two-level claim tree: one directory per month, each holding
//! claim file blobs. This abstraction allows for different implementations:
//! - GitHub GraphQL (remote repository)
//! - Local directory (offline preview)
//! - Mock source (testing)

use async_trait::async_trait;
use reward_core::{MonthDirectory, TreeFile};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::fs;
use tracing::{debug, info};

use crate::config::RepoCoordinate;
use crate::error::{BridgeError, BridgeResult};
use crate::github::{decode, GitHubHttp};

/// Source of month directories
#[async_trait]
pub trait TreeSource: Send + Sync {
    /// Fetch every immediate subdirectory of `path` at `rev` with its files
    ///
    /// A missing `path` yields an empty list.
    async fn fetch_tree(
        &self,
        repo: &RepoCoordinate,
        rev: &str,
        path: &str,
    ) -> BridgeResult<Vec<MonthDirectory>>;
}

// ============================================================================
// GitHub GraphQL Implementation
// ============================================================================

const TREE_QUERY: &str = r#"
query ($owner: String!, $name: String!, $expression: String!) {
  repository(owner: $owner, name: $name) {
    object(expression: $expression) {
      ... on Tree {
        entries {
          name
          type
          object {
            ... on Tree {
              entries {
                name
                object {
                  ... on Blob {
                    text
                    isBinary
                    isTruncated
                  }
                }
              }
            }
          }
        }
      }
    }
  }
}
"#;

/// GraphQL request body
#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest<V> {
    pub query: &'static str,
    pub variables: V,
}

/// Variables of the tree query
#[derive(Debug, Clone, Serialize)]
pub struct TreeQueryVariables {
    pub owner: String,
    pub name: String,
    /// `<rev>:<path>`
    pub expression: String,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct RepositoryData {
    repository: Option<RepositoryNode>,
}

#[derive(Debug, Deserialize)]
struct RepositoryNode {
    object: Option<TreeNode>,
}

#[derive(Debug, Deserialize)]
struct TreeNode {
    entries: Option<Vec<DirectoryEntry>>,
}

#[derive(Debug, Deserialize)]
struct DirectoryEntry {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    object: Option<DirectoryObject>,
}

#[derive(Debug, Deserialize)]
struct DirectoryObject {
    entries: Option<Vec<FileEntry>>,
}

#[derive(Debug, Deserialize)]
struct FileEntry {
    name: String,
    object: Option<BlobNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlobNode {
    text: Option<String>,
    #[serde(default)]
    is_binary: Option<bool>,
    #[serde(default)]
    is_truncated: Option<bool>,
}

impl BlobNode {
    fn into_text(self) -> Option<String> {
        if self.is_binary == Some(true) || self.is_truncated == Some(true) {
            None
        } else {
            self.text
        }
    }
}

/// Tree source backed by the GitHub GraphQL API
pub struct GitHubTreeSource {
    http: GitHubHttp,
}

impl GitHubTreeSource {
    /// Create a new GraphQL tree source
    pub fn new(http: GitHubHttp) -> Self {
        Self { http }
    }
}

fn months_from_response(data: GraphQlResponse<RepositoryData>) -> BridgeResult<Vec<MonthDirectory>> {
    if !data.errors.is_empty() {
        let messages: Vec<String> = data.errors.into_iter().map(|e| e.message).collect();
        return Err(BridgeError::GraphQl(messages.join("; ")));
    }

    let repository = data
        .data
        .and_then(|d| d.repository)
        .ok_or_else(|| BridgeError::invalid_response("repository missing from response"))?;

    let Some(entries) = repository.object.and_then(|o| o.entries) else {
        return Ok(Vec::new());
    };

    let mut months = Vec::with_capacity(entries.len());
    for entry in entries {
        if entry.kind != "tree" {
            debug!(name = %entry.name, kind = %entry.kind, "Skipping non-directory entry");
            continue;
        }

        let files = entry
            .object
            .and_then(|o| o.entries)
            .unwrap_or_default()
            .into_iter()
            .map(|file| TreeFile {
                name: file.name,
                text: file.object.and_then(BlobNode::into_text),
            })
            .collect();

        months.push(MonthDirectory::new(entry.name, files));
    }

    Ok(months)
}

#[async_trait]
impl TreeSource for GitHubTreeSource {
    async fn fetch_tree(
        &self,
        repo: &RepoCoordinate,
        rev: &str,
        path: &str,
    ) -> BridgeResult<Vec<MonthDirectory>> {
        let request = GraphQlRequest {
            query: TREE_QUERY,
            variables: TreeQueryVariables {
                owner: repo.owner.clone(),
                name: repo.name.clone(),
                expression: format!("{}:{}", rev, path),
            },
        };

        let response = self
            .http
            .client()
            .post(self.http.graphql_url())
            .json(&request)
            .send()
            .await?;

        let months = months_from_response(decode(response).await?)?;
        info!(repo = %repo, rev, path, months = months.len(), "Fetched claim tree");
        Ok(months)
    }
}

// ============================================================================
// Local Directory Implementation
// ============================================================================

/// Tree source reading a checkout on disk
///
/// The repository coordinate and revision are ignored; `path` is resolved
/// against the root directory.
pub struct LocalTreeSource {
    root: PathBuf,
}

impl LocalTreeSource {
    /// Create a source rooted at a checkout directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    async fn read_month(dir: &Path, name: String) -> BridgeResult<MonthDirectory> {
        let mut files = Vec::new();
        let mut entries = fs::read_dir(dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            let bytes = fs::read(entry.path()).await?;
            files.push(TreeFile {
                name: entry.file_name().to_string_lossy().into_owned(),
                text: String::from_utf8(bytes).ok(),
            });
        }

        files.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(MonthDirectory::new(name, files))
    }
}

#[async_trait]
impl TreeSource for LocalTreeSource {
    async fn fetch_tree(
        &self,
        _repo: &RepoCoordinate,
        _rev: &str,
        path: &str,
    ) -> BridgeResult<Vec<MonthDirectory>> {
        let base = self.root.join(path);
        if !fs::try_exists(&base).await? {
            debug!(path = %base.display(), "Claim directory missing, treating as empty");
            return Ok(Vec::new());
        }

        let mut months = Vec::new();
        let mut entries = fs::read_dir(&base).await?;
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            months.push(Self::read_month(&entry.path(), name).await?);
        }

        months.sort_by(|a, b| a.name.cmp(&b.name));
        info!(path = %base.display(), months = months.len(), "Read local claim tree");
        Ok(months)
    }
}

// ============================================================================
// Mock Source for Testing
// ============================================================================

/// Mock tree source for testing
pub struct MockTreeSource {
    /// Months returned on every fetch
    months: Vec<MonthDirectory>,
    /// Number of fetches served
    fetches: AtomicUsize,
    /// Simulate failure mode
    fail_mode: AtomicBool,
}

impl MockTreeSource {
    /// Create a mock serving the given months
    pub fn new(months: Vec<MonthDirectory>) -> Self {
        Self {
            months,
            fetches: AtomicUsize::new(0),
            fail_mode: AtomicBool::new(false),
        }
    }

    /// Enable failure mode for testing
    pub fn set_fail_mode(&self, fail: bool) {
        self.fail_mode.store(fail, Ordering::SeqCst);
    }

    /// Number of fetches made so far
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl Default for MockTreeSource {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl TreeSource for MockTreeSource {
    async fn fetch_tree(
        &self,
        _repo: &RepoCoordinate,
        _rev: &str,
        _path: &str,
    ) -> BridgeResult<Vec<MonthDirectory>> {
        if self.fail_mode.load(Ordering::SeqCst) {
            return Err(BridgeError::Unavailable("Mock failure mode".to_string()));
        }
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.months.clone())
    }
}
