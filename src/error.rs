//! Error types for release-batch

use std::fmt;
use thiserror::Error;

/// Pipeline stage, used to report where a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Look up (and possibly create) the release branch
    EnsureBranch,
    /// Fetch the open pull requests
    FetchPullRequests,
    /// Merge the release batch into the release branch
    MergeBranches,
    /// Create the aggregate release PR
    CreateReleasePr,
    /// Update the existing aggregate release PR
    UpdateReleasePr,
}

impl Stage {
    /// Step number shown in console output
    pub const fn number(self) -> u8 {
        match self {
            Self::EnsureBranch => 1,
            Self::FetchPullRequests => 2,
            Self::MergeBranches => 3,
            Self::CreateReleasePr | Self::UpdateReleasePr => 4,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnsureBranch => write!(f, "リリースブランチを確認"),
            Self::FetchPullRequests => write!(f, "リリースするプルリクエストを取得"),
            Self::MergeBranches => write!(f, "リリースブランチにマージ"),
            Self::CreateReleasePr => write!(f, "プルリクエスト作成"),
            Self::UpdateReleasePr => write!(f, "プルリクエスト更新"),
        }
    }
}

/// Errors that can occur during a release run
#[derive(Debug, Error)]
pub enum Error {
    /// GitHub API call failed
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Generic platform failure
    #[error("platform error: {0}")]
    Platform(String),

    /// A branch the run depends on does not exist
    #[error("branch not found: {0}")]
    BranchNotFound(String),

    /// GitHub refused a merge because of conflicts
    #[error("merge conflict merging '{head}' into '{base}'")]
    MergeConflict {
        /// Branch being merged into
        base: String,
        /// Branch being merged
        head: String,
    },

    /// No usable credentials
    #[error("authentication error: {0}")]
    Auth(String),

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Unexpected internal failure
    #[error("internal error: {0}")]
    Internal(String),

    /// Failure attributed to a pipeline stage
    #[error("{stage}: {source}")]
    Stage {
        /// Stage that was running
        stage: Stage,
        /// Underlying failure
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Attribute this error to a pipeline stage
    #[must_use]
    pub fn during(self, stage: Stage) -> Self {
        Self::Stage {
            stage,
            source: Box::new(self),
        }
    }

    /// Stage the error was raised in, if known
    pub const fn stage(&self) -> Option<Stage> {
        match self {
            Self::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        Self::GitHubApi(err.to_string())
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
