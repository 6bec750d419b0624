//! Core types for release-batch

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A pull request as seen by the release workflow
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// PR title
    pub title: String,
    /// PR body (empty when GitHub has none)
    pub body: String,
    /// Head (source) branch name
    pub head_ref: String,
    /// Base branch name
    pub base_ref: String,
    /// Web URL for the PR
    pub html_url: String,
    /// Label names attached to the PR
    pub labels: Vec<String>,
}

impl PullRequest {
    /// Whether a label with exactly this name is attached
    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|label| label == name)
    }
}

/// A branch and its head commit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Branch {
    /// Branch name (without `refs/heads/`)
    pub name: String,
    /// Head commit SHA
    pub sha: String,
}

/// Result of merging one branch into another
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeResult {
    /// A merge commit was created
    Merged {
        /// SHA of the merge commit
        sha: String,
    },
    /// Base already contains head, nothing to merge
    UpToDate,
}

impl std::fmt::Display for MergeResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Merged { sha } => write!(f, "merged ({sha})"),
            Self::UpToDate => write!(f, "already up to date"),
        }
    }
}

/// Optional filters for listing open pull requests
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullRequestFilter {
    /// Only PRs targeting this base branch
    pub base: Option<String>,
    /// Only PRs from this head (`owner:branch`)
    pub head: Option<String>,
}

/// Repository the platform service talks to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Custom host (None for github.com)
    pub host: Option<String>,
}

/// Branches driving a release run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseConfig {
    /// Release branch; also the label that selects PRs
    pub release_branch: String,
    /// Base branch of the aggregate release PR
    pub base_branch: String,
    /// Branch a missing release branch is cut from
    pub main_branch: String,
}

impl ReleaseConfig {
    /// Label that marks a PR as part of this release
    pub fn release_label(&self) -> &str {
        &self.release_branch
    }

    /// Reject blank branch names before any API call is made
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("release branch", &self.release_branch),
            ("base branch", &self.base_branch),
            ("main branch", &self.main_branch),
        ] {
            if value.trim().is_empty() {
                return Err(Error::Config(format!("{field} must not be empty")));
            }
        }
        if self.release_branch == self.base_branch {
            return Err(Error::Config(format!(
                "release branch '{}' cannot also be the base branch",
                self.release_branch
            )));
        }
        Ok(())
    }
}
