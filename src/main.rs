//! release-batch CLI entry point

mod cli;

use clap::Parser;
use cli::{ReleaseCommandOptions, report_error, run_release_command};
use release_batch::types::{PlatformConfig, ReleaseConfig};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Merge PRs labelled for a release into the release branch and maintain
/// the aggregate release PR
#[derive(Parser, Debug)]
#[command(
    name = "release-batch",
    version,
    about,
    long_about = None,
    after_help = "Exit status: 0 on success or when no PR carries the release label, 1 when any step fails."
)]
struct Cli {
    /// Release branch; open PRs carrying a label with this name are merged into it
    release_branch: String,

    /// Base branch of the aggregate release PR
    #[arg(long, env = "BASEBRANCH")]
    base_branch: String,

    /// Branch a missing release branch is created from
    #[arg(long, env = "MAIN_BRANCH", default_value = "main")]
    main_branch: String,

    /// Repository owner (user or organization)
    #[arg(long, env = "OWNER")]
    owner: String,

    /// Repository name
    #[arg(long, env = "REPO")]
    repo: String,

    /// GitHub Enterprise host (defaults to github.com)
    #[arg(long, env = "GITHUB_HOST")]
    host: Option<String>,

    /// Show what would be merged without making changes
    #[arg(long)]
    dry_run: bool,

    /// Preview the plan and prompt before executing
    #[arg(long, conflicts_with = "dry_run")]
    confirm: bool,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "release_batch=debug"
    } else {
        "release_batch=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = ReleaseCommandOptions {
        release: ReleaseConfig {
            release_branch: cli.release_branch,
            base_branch: cli.base_branch,
            main_branch: cli.main_branch,
        },
        platform: PlatformConfig {
            owner: cli.owner,
            repo: cli.repo,
            host: cli.host.filter(|h| !h.trim().is_empty()),
        },
        dry_run: cli.dry_run,
        confirm: cli.confirm,
    };

    match run_release_command(options).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}
