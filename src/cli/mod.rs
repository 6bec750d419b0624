//! CLI commands and console rendering

mod release;
pub mod style;

pub use release::{ReleaseCommandOptions, run_release_command};

use anstream::{eprintln, println};
use async_trait::async_trait;
use release_batch::error::{Error, Stage};
use release_batch::progress::ProgressCallback;
use release_batch::types::{Branch, MergeResult, PullRequest};
use style::{Stylize, check, cross};

/// Shown when no open PR carries the release label
pub const NOTHING_TO_RELEASE: &str = "対象のプルリクエストが存在しません";

/// Console progress output (Japanese status lines)
pub struct CliProgress;

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_stage_completed(&self, stage: Stage) {
        println!("{} {}", check(), stage_completed_line(stage));
    }

    async fn on_branch_created(&self, branch: &Branch, from: &str) {
        println!(
            "リリースブランチが存在しないため作成しました: {} ({} {})",
            branch.name.accent(),
            from,
            short_sha(&branch.sha).muted()
        );
    }

    async fn on_merge_started(&self, pr: &PullRequest, index: usize, total: usize) {
        println!("{}", merge_started_line(&pr.head_ref, index, total));
    }

    async fn on_merge_completed(
        &self,
        pr: &PullRequest,
        result: &MergeResult,
        index: usize,
        total: usize,
    ) {
        println!("{}", merge_completed_line(&pr.head_ref, result, index, total));
    }
}

/// Print a failed run the way stage results are printed
pub fn report_error(err: &Error) {
    match err {
        Error::Stage { stage, source } => {
            eprintln!("{} {}", cross(), stage_failed_line(*stage).error());
            eprintln!("   {source}");
        }
        other => eprintln!("{} {}", cross(), format!("エラー: {other}").error()),
    }
}

fn stage_completed_line(stage: Stage) -> String {
    format!("完了 #{}. {stage}", stage.number())
}

fn stage_failed_line(stage: Stage) -> String {
    format!("失敗 #{}. {stage}", stage.number())
}

fn merge_started_line(head: &str, index: usize, total: usize) -> String {
    format!("マージ開始[{head}: {index}/{total}]")
}

fn merge_completed_line(head: &str, result: &MergeResult, index: usize, total: usize) -> String {
    match result {
        MergeResult::Merged { sha } => {
            format!("マージ完了[{head}: {index}/{total}] {}", short_sha(sha))
        }
        MergeResult::UpToDate => format!("マージ完了[{head}: {index}/{total}] (変更なし)"),
    }
}

fn short_sha(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}
