//! Release execution - effectful operations
//!
//! Everything here talks to the platform. Each function stops at the first
//! failure; nothing is retried or rolled back.

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::progress::ProgressCallback;
use crate::release::plan::{ReconcileAction, ReleasePlan};
use crate::types::{Branch, MergeResult, PullRequest, ReleaseConfig};
use tracing::{debug, info};

/// Release branch after `ensure_release_branch`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnsuredBranch {
    /// The release branch
    pub branch: Branch,
    /// Whether it was created during this run
    pub created: bool,
}

/// Make sure the release branch exists (EFFECTFUL)
///
/// A missing branch is cut from the head of `config.main_branch`.
pub async fn ensure_release_branch(
    platform: &dyn PlatformService,
    config: &ReleaseConfig,
    progress: &dyn ProgressCallback,
) -> Result<EnsuredBranch> {
    if let Some(branch) = platform.get_branch(&config.release_branch).await? {
        debug!(branch = %branch.name, sha = %branch.sha, "release branch exists");
        return Ok(EnsuredBranch {
            branch,
            created: false,
        });
    }

    info!(branch = %config.release_branch, from = %config.main_branch, "release branch missing, creating");

    let main = platform
        .get_branch(&config.main_branch)
        .await?
        .ok_or_else(|| Error::BranchNotFound(config.main_branch.clone()))?;

    let branch = platform
        .create_branch(&config.release_branch, &main.sha)
        .await?;
    progress.on_branch_created(&branch, &config.main_branch).await;

    Ok(EnsuredBranch {
        branch,
        created: true,
    })
}

/// A PR whose head branch was merged into the release branch
#[derive(Debug, Clone)]
pub struct MergedPr {
    /// The merged PR
    pub pr: PullRequest,
    /// What the merge did
    pub result: MergeResult,
}

/// Result of merge execution
#[derive(Debug, Clone, Default)]
pub struct MergeExecutionResult {
    /// PRs merged, in order
    pub merged: Vec<MergedPr>,
}

impl MergeExecutionResult {
    /// Number of merges that produced a merge commit
    #[must_use]
    pub fn merge_commit_count(&self) -> usize {
        self.merged
            .iter()
            .filter(|m| matches!(m.result, MergeResult::Merged { .. }))
            .count()
    }

    /// Head branches of the merged PRs
    #[must_use]
    pub fn merged_branches(&self) -> Vec<&str> {
        self.merged.iter().map(|m| m.pr.head_ref.as_str()).collect()
    }
}

/// Merge every PR's head branch into the release branch (EFFECTFUL)
///
/// Merges run in batch order. The first failure is returned and no later PR
/// is attempted; branches already merged stay merged.
pub async fn merge_batch(
    batch: &[PullRequest],
    release_branch: &str,
    platform: &dyn PlatformService,
    progress: &dyn ProgressCallback,
) -> Result<MergeExecutionResult> {
    let mut result = MergeExecutionResult::default();
    let total = batch.len();

    for (i, pr) in batch.iter().enumerate() {
        let index = i + 1;
        progress.on_merge_started(pr, index, total).await;

        let merge_result = platform.merge_branch(release_branch, &pr.head_ref).await?;

        progress
            .on_merge_completed(pr, &merge_result, index, total)
            .await;
        result.merged.push(MergedPr {
            pr: pr.clone(),
            result: merge_result,
        });
    }

    Ok(result)
}

/// Outcome of release PR reconciliation
#[derive(Debug, Clone)]
pub enum ReconcileOutcome {
    /// A new aggregate PR was opened
    Created(PullRequest),
    /// The existing aggregate PR was overwritten
    Updated(PullRequest),
}

impl ReconcileOutcome {
    /// The aggregate PR after reconciliation
    pub const fn pull_request(&self) -> &PullRequest {
        match self {
            Self::Created(pr) | Self::Updated(pr) => pr,
        }
    }
}

/// Create or update the aggregate release PR (EFFECTFUL)
pub async fn reconcile_release_pr(
    plan: &ReleasePlan,
    config: &ReleaseConfig,
    platform: &dyn PlatformService,
) -> Result<ReconcileOutcome> {
    match plan.action {
        ReconcileAction::Update { pr_number } => {
            debug!(pr_number, "updating aggregate release PR");
            let pr = platform
                .update_pr(pr_number, &plan.title, &plan.body)
                .await?;
            Ok(ReconcileOutcome::Updated(pr))
        }
        ReconcileAction::Create => {
            debug!(head = %config.release_branch, base = %config.base_branch, "creating aggregate release PR");
            let pr = platform
                .create_pr(
                    &config.release_branch,
                    &config.base_branch,
                    &plan.title,
                    &plan.body,
                )
                .await?;
            Ok(ReconcileOutcome::Created(pr))
        }
    }
}
