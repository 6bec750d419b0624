//! Release planning - pure functions over the fetched PR list
//!
//! No I/O happens here. The orchestrator fetches the open PRs, hands them
//! over, and gets back a `ReleasePlan` describing what to merge and whether
//! the aggregate release PR is created or updated.

use crate::types::{PullRequest, ReleaseConfig};

/// Title marker identifying the aggregate release PR
pub const RELEASE_PR_MARKER: &str = "【定期リリース】";

/// First line of the aggregate release PR body
pub const RELEASE_PR_HEADING: &str = "## リリースプルリク一覧";

/// Whether this PR is an aggregate release PR
pub fn is_aggregate_pr(pr: &PullRequest) -> bool {
    pr.title.contains(RELEASE_PR_MARKER)
}

/// Select the PRs to merge for a release, in listing order.
///
/// Aggregate release PRs are skipped so the release PR never merges itself.
/// A PR is included once if any of its labels equals `target_label`.
pub fn select_release_batch(all_prs: &[PullRequest], target_label: &str) -> Vec<PullRequest> {
    all_prs
        .iter()
        .filter(|pr| !is_aggregate_pr(pr))
        .filter(|pr| pr.has_label(target_label))
        .cloned()
        .collect()
}

/// Whether any PR in the list is an aggregate release PR
pub fn aggregate_pr_exists(all_prs: &[PullRequest]) -> bool {
    all_prs.iter().any(is_aggregate_pr)
}

/// First aggregate release PR in listing order
pub fn find_aggregate_pr(all_prs: &[PullRequest]) -> Option<&PullRequest> {
    all_prs.iter().find(|pr| is_aggregate_pr(pr))
}

/// Title of the aggregate release PR
pub fn release_pr_title(release_branch: &str) -> String {
    format!("{RELEASE_PR_MARKER}{release_branch}")
}

/// Body of the aggregate release PR: title, URL and head branch per PR
pub fn release_pr_body(batch: &[PullRequest]) -> String {
    let mut body = format!("{RELEASE_PR_HEADING}\n");
    for pr in batch {
        body.push_str(&format!("{}\n{}\n{}\n\n", pr.title, pr.html_url, pr.head_ref));
    }
    body
}

/// What happens to the aggregate release PR
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileAction {
    /// No aggregate PR exists yet
    Create,
    /// Overwrite the existing aggregate PR
    Update {
        /// Number of the aggregate PR
        pr_number: u64,
    },
}

impl std::fmt::Display for ReconcileAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Create => write!(f, "create release PR"),
            Self::Update { pr_number } => write!(f, "update release PR #{pr_number}"),
        }
    }
}

/// Release plan - the functional core output
///
/// Created by `create_release_plan()` (pure) and carried out by
/// `merge_batch()` and `reconcile_release_pr()` (effectful).
#[derive(Debug, Clone)]
pub struct ReleasePlan {
    /// Branch the batch is merged into
    pub release_branch: String,
    /// PRs to merge, in order
    pub batch: Vec<PullRequest>,
    /// Create or update the aggregate PR
    pub action: ReconcileAction,
    /// Rendered aggregate PR title
    pub title: String,
    /// Rendered aggregate PR body
    pub body: String,
}

impl ReleasePlan {
    /// Check if there is nothing to release
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.batch.is_empty()
    }

    /// Number of branches to merge
    #[must_use]
    pub fn merge_count(&self) -> usize {
        self.batch.len()
    }
}

/// Create a release plan (PURE - no I/O, easily testable)
///
/// The aggregate PR is looked up in the full list, not in the batch.
#[must_use]
pub fn create_release_plan(all_prs: &[PullRequest], config: &ReleaseConfig) -> ReleasePlan {
    let batch = select_release_batch(all_prs, config.release_label());

    let action = find_aggregate_pr(all_prs).map_or(ReconcileAction::Create, |pr| {
        ReconcileAction::Update {
            pr_number: pr.number,
        }
    });

    ReleasePlan {
        release_branch: config.release_branch.clone(),
        title: release_pr_title(&config.release_branch),
        body: release_pr_body(&batch),
        batch,
        action,
    }
}
