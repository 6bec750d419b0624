//! Release command - merge the labelled batch and reconcile the release PR

use crate::cli::{CliProgress, NOTHING_TO_RELEASE};
use crate::cli::style::{Stylize, check, spinner_style};
use anstream::println;
use dialoguer::Confirm;
use indicatif::ProgressBar;
use release_batch::error::{Error, Result};
use release_batch::platform::create_platform_service;
use release_batch::progress::NoopProgress;
use release_batch::release::{
    ReconcileAction, ReconcileOutcome, ReleaseOptions, ReleaseOutcome, ReleasePlan, run_release,
};
use release_batch::types::{PlatformConfig, ReleaseConfig};
use std::time::Duration;

/// Options for the release command
#[derive(Debug, Clone)]
pub struct ReleaseCommandOptions {
    /// Branches driving the run
    pub release: ReleaseConfig,
    /// Repository to operate on
    pub platform: PlatformConfig,
    /// Dry run - show the plan without making changes
    pub dry_run: bool,
    /// Preview plan and prompt for confirmation before executing
    pub confirm: bool,
}

/// Run the release command
pub async fn run_release_command(options: ReleaseCommandOptions) -> Result<()> {
    options.release.validate()?;
    let platform = create_platform_service(&options.platform).await?;

    println!(
        "{} {} {}",
        "Release:".emphasis(),
        options.release.release_branch.accent(),
        format!(
            "({}/{} → {})",
            options.platform.owner, options.platform.repo, options.release.base_branch
        )
        .muted()
    );

    if options.dry_run || options.confirm {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(spinner_style());
        spinner.set_message("リリース計画を作成中...");
        spinner.enable_steady_tick(Duration::from_millis(80));

        let preview = run_release(
            platform.as_ref(),
            &options.release,
            ReleaseOptions { dry_run: true },
            &NoopProgress,
        )
        .await;
        spinner.finish_and_clear();

        let Some((plan, branch_exists)) = previewed_plan(preview?)? else {
            println!("{}", NOTHING_TO_RELEASE.muted());
            return Ok(());
        };
        report_plan(&plan, branch_exists, &options.release);

        if options.dry_run {
            println!("{}", "Run without --dry-run to execute.".muted());
            return Ok(());
        }

        if !Confirm::new()
            .with_prompt("Proceed with release?")
            .default(true)
            .interact()
            .map_err(|e| Error::Internal(format!("Failed to read confirmation: {e}")))?
        {
            println!("{}", "Aborted".muted());
            return Ok(());
        }
        println!();
    }

    let outcome = run_release(
        platform.as_ref(),
        &options.release,
        ReleaseOptions::default(),
        &CliProgress,
    )
    .await?;

    match outcome {
        ReleaseOutcome::NothingToRelease => {
            println!("{}", NOTHING_TO_RELEASE.muted());
        }
        ReleaseOutcome::Planned {
            plan,
            branch_exists,
        } => report_plan(&plan, branch_exists, &options.release),
        ReleaseOutcome::Released {
            branch_created,
            merges,
            release_pr,
        } => {
            println!();
            println!("{} Release complete!", check());
            if branch_created {
                println!(
                    "   Created branch: {}",
                    options.release.release_branch.accent()
                );
            }
            println!(
                "   Merged: {}",
                merges.merged_branches().join(", ").accent()
            );
            let verb = match release_pr {
                ReconcileOutcome::Created(_) => "Created",
                ReconcileOutcome::Updated(_) => "Updated",
            };
            let pr = release_pr.pull_request();
            println!(
                "   {verb} release PR #{}: {}",
                pr.number,
                pr.html_url.accent()
            );
        }
    }

    Ok(())
}

/// Plan from a preview run, or `None` when there is nothing to release
fn previewed_plan(outcome: ReleaseOutcome) -> Result<Option<(ReleasePlan, bool)>> {
    match outcome {
        ReleaseOutcome::NothingToRelease => Ok(None),
        ReleaseOutcome::Planned {
            plan,
            branch_exists,
        } => Ok(Some((plan, branch_exists))),
        ReleaseOutcome::Released { .. } => Err(Error::Internal(
            "preview run performed changes".to_string(),
        )),
    }
}

/// Report what would happen (dry run / confirm preview)
fn report_plan(plan: &ReleasePlan, branch_exists: bool, config: &ReleaseConfig) {
    println!("{}:", "Release plan".emphasis());
    println!();

    if !branch_exists {
        println!(
            "  {} {} from {}",
            "+ Would create branch".success(),
            plan.release_branch.accent(),
            config.main_branch
        );
    }

    for (i, pr) in plan.batch.iter().enumerate() {
        println!(
            "  {} [{}/{}] PR #{}: {}",
            "✓ Would merge".success(),
            i + 1,
            plan.merge_count(),
            pr.number,
            pr.title
        );
        println!("    Branch: {}", pr.head_ref.accent());
    }

    match plan.action {
        ReconcileAction::Create => println!(
            "  {} {} ({} → {})",
            "+ Would create".success(),
            plan.title,
            plan.release_branch,
            config.base_branch
        ),
        ReconcileAction::Update { pr_number } => println!(
            "  {} PR #{}: {}",
            "↻ Would update".accent(),
            pr_number,
            plan.title
        ),
    }
    println!();
}
