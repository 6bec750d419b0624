//! Release engine
//!
//! Three-phase pattern:
//! 1. Gather - ensure the release branch, fetch open PRs (effectful)
//! 2. Plan - create `ReleasePlan` (pure, testable)
//! 3. Execute - merge the batch, reconcile the release PR (effectful)

mod execute;
mod plan;

pub use execute::{
    EnsuredBranch, MergeExecutionResult, MergedPr, ReconcileOutcome, ensure_release_branch,
    merge_batch, reconcile_release_pr,
};
pub use plan::{
    RELEASE_PR_HEADING, RELEASE_PR_MARKER, ReconcileAction, ReleasePlan, aggregate_pr_exists,
    create_release_plan, find_aggregate_pr, is_aggregate_pr, release_pr_body, release_pr_title,
    select_release_batch,
};

use crate::error::{Result, Stage};
use crate::platform::PlatformService;
use crate::progress::ProgressCallback;
use crate::types::ReleaseConfig;
use tracing::info;

/// Options for a release run
#[derive(Debug, Clone, Copy, Default)]
pub struct ReleaseOptions {
    /// Compute the plan without merging or touching PRs
    pub dry_run: bool,
}

/// What a release run did
#[derive(Debug, Clone)]
pub enum ReleaseOutcome {
    /// No open PR carries the release label
    NothingToRelease,
    /// Dry run: the plan that would be executed
    Planned {
        /// The computed plan
        plan: ReleasePlan,
        /// Whether the release branch already exists
        branch_exists: bool,
    },
    /// Batch merged and release PR reconciled
    Released {
        /// Whether the release branch was created in this run
        branch_created: bool,
        /// Merges performed
        merges: MergeExecutionResult,
        /// Created or updated aggregate PR
        release_pr: ReconcileOutcome,
    },
}

/// Run the whole release pipeline
///
/// Every failure is wrapped with the stage it happened in. An empty batch
/// returns `NothingToRelease` before anything is merged.
pub async fn run_release(
    platform: &dyn PlatformService,
    config: &ReleaseConfig,
    options: ReleaseOptions,
    progress: &dyn ProgressCallback,
) -> Result<ReleaseOutcome> {
    config.validate()?;

    // =========================================================================
    // Phase 1: GATHER
    // =========================================================================

    let (branch_exists, branch_created) = if options.dry_run {
        let existing = platform
            .get_branch(&config.release_branch)
            .await
            .map_err(|e| e.during(Stage::EnsureBranch))?;
        (existing.is_some(), false)
    } else {
        let ensured = ensure_release_branch(platform, config, progress)
            .await
            .map_err(|e| e.during(Stage::EnsureBranch))?;
        (true, ensured.created)
    };
    if branch_exists {
        progress.on_stage_completed(Stage::EnsureBranch).await;
    }

    let all_prs = platform
        .list_all_open_prs()
        .await
        .map_err(|e| e.during(Stage::FetchPullRequests))?;

    // =========================================================================
    // Phase 2: PLAN
    // =========================================================================

    let plan = create_release_plan(&all_prs, config);
    info!(
        open = all_prs.len(),
        selected = plan.merge_count(),
        action = %plan.action,
        "release plan ready"
    );

    if plan.is_empty() {
        return Ok(ReleaseOutcome::NothingToRelease);
    }
    progress.on_stage_completed(Stage::FetchPullRequests).await;

    if options.dry_run {
        return Ok(ReleaseOutcome::Planned {
            plan,
            branch_exists,
        });
    }

    // =========================================================================
    // Phase 3: EXECUTE
    // =========================================================================

    let merges = merge_batch(&plan.batch, &plan.release_branch, platform, progress)
        .await
        .map_err(|e| e.during(Stage::MergeBranches))?;
    progress.on_stage_completed(Stage::MergeBranches).await;

    let reconcile_stage = match plan.action {
        ReconcileAction::Create => Stage::CreateReleasePr,
        ReconcileAction::Update { .. } => Stage::UpdateReleasePr,
    };
    let release_pr = reconcile_release_pr(&plan, config, platform)
        .await
        .map_err(|e| e.during(reconcile_stage))?;
    progress.on_stage_completed(reconcile_stage).await;

    Ok(ReleaseOutcome::Released {
        branch_created,
        merges,
        release_pr,
    })
}
