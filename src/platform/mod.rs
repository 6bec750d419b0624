//! Platform services for the release workflow
//!
//! Provides the repository operations the pipeline needs behind a trait,
//! so the orchestration can run against GitHub or a test double.

mod factory;
mod github;

pub use factory::create_platform_service;
pub use github::GitHubService;

use crate::error::Result;
use crate::types::{Branch, MergeResult, PlatformConfig, PullRequest, PullRequestFilter};
use async_trait::async_trait;

/// Platform service trait for branch and PR operations
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// Look up a branch by name
    ///
    /// Returns `Ok(None)` when the platform reports the branch as missing.
    /// Any other failure is an error.
    async fn get_branch(&self, name: &str) -> Result<Option<Branch>>;

    /// Create `refs/heads/<name>` pointing at `sha`
    async fn create_branch(&self, name: &str, sha: &str) -> Result<Branch>;

    /// List open pull requests, following every page
    async fn list_open_prs(&self, filter: &PullRequestFilter) -> Result<Vec<PullRequest>>;

    /// List every open pull request with no filter applied.
    ///
    /// Convenience wrapper over [`list_open_prs`].
    ///
    /// [`list_open_prs`]: Self::list_open_prs
    async fn list_all_open_prs(&self) -> Result<Vec<PullRequest>> {
        self.list_open_prs(&PullRequestFilter::default()).await
    }

    /// Merge `head` into `base` directly on the platform
    async fn merge_branch(&self, base: &str, head: &str) -> Result<MergeResult>;

    /// Create a new PR
    async fn create_pr(&self, head: &str, base: &str, title: &str, body: &str)
    -> Result<PullRequest>;

    /// Overwrite the title and body of an existing PR
    async fn update_pr(&self, pr_number: u64, title: &str, body: &str) -> Result<PullRequest>;

    /// Get the platform configuration
    fn config(&self) -> &PlatformConfig;
}
