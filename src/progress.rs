//! Progress reporting for the release pipeline

use crate::error::Stage;
use crate::types::{Branch, MergeResult, PullRequest};
use async_trait::async_trait;

/// Receives progress updates while the pipeline runs
///
/// The library never prints; the CLI renders these events, tests record them.
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// A pipeline stage finished successfully
    async fn on_stage_completed(&self, stage: Stage);

    /// The release branch was missing and has been created
    async fn on_branch_created(&self, branch: &Branch, from: &str);

    /// About to merge the `index`-th (1-based) PR of `total`
    async fn on_merge_started(&self, pr: &PullRequest, index: usize, total: usize);

    /// The `index`-th (1-based) PR of `total` was merged
    async fn on_merge_completed(
        &self,
        pr: &PullRequest,
        result: &MergeResult,
        index: usize,
        total: usize,
    );
}

/// Progress sink that discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_stage_completed(&self, _stage: Stage) {}

    async fn on_branch_created(&self, _branch: &Branch, _from: &str) {}

    async fn on_merge_started(&self, _pr: &PullRequest, _index: usize, _total: usize) {}

    async fn on_merge_completed(
        &self,
        _pr: &PullRequest,
        _result: &MergeResult,
        _index: usize,
        _total: usize,
    ) {
    }
}
