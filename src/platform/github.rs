//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{Branch, MergeResult, PlatformConfig, PullRequest, PullRequestFilter};
use async_trait::async_trait;
use octocrab::Octocrab;
use octocrab::models::repos::Object;
use octocrab::params::repos::Reference;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

/// Page size for PR listing (GitHub maximum)
const PER_PAGE: u8 = 100;

/// GitHub service using octocrab
pub struct GitHubService {
    client: Octocrab,
    config: PlatformConfig,
    /// Token for raw HTTP requests (branch merges)
    token: String,
    /// HTTP client for raw requests (branch merges)
    http_client: Client,
    /// API base URL including the scheme, without a trailing slash
    api_base: String,
}

/// REST API base URL for github.com or an Enterprise host
fn api_base_url(host: Option<&str>) -> String {
    host.map_or_else(
        || "https://api.github.com".to_string(),
        |h| format!("https://{h}/api/v3"),
    )
}

impl GitHubService {
    /// Create a new GitHub service
    pub fn new(token: &str, owner: String, repo: String, host: Option<String>) -> Result<Self> {
        let api_base = api_base_url(host.as_deref());
        Self::with_api_base(token, PlatformConfig { owner, repo, host }, api_base)
    }

    /// Create a service talking to an explicit API base URL
    fn with_api_base(token: &str, config: PlatformConfig, api_base: String) -> Result<Self> {
        let api_base = api_base.trim_end_matches('/').to_string();

        let client = Octocrab::builder()
            .personal_token(token.to_string())
            .base_uri(&api_base)
            .map_err(|e| Error::GitHubApi(e.to_string()))?
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        let http_client = Client::builder()
            .user_agent("release-batch")
            .build()
            .map_err(|e| Error::GitHubApi(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            config,
            token: token.to_string(),
            http_client,
            api_base,
        })
    }
}

/// Whether octocrab reported a 404 from GitHub
fn is_not_found(err: &octocrab::Error) -> bool {
    matches!(err, octocrab::Error::GitHub { source, .. } if source.status_code.as_u16() == 404)
}

/// Extract the commit SHA a ref points at
fn sha_from_ref(reference: &octocrab::models::repos::Ref) -> Result<String> {
    match &reference.object {
        Object::Commit { sha, .. } => Ok(sha.clone()),
        _ => Err(Error::GitHubApi(format!(
            "ref {} does not point at a commit",
            reference.ref_field
        ))),
    }
}

/// Helper to convert octocrab PR to our `PullRequest` type
fn pr_from_octocrab(pr: &octocrab::models::pulls::PullRequest) -> PullRequest {
    PullRequest {
        number: pr.number,
        title: pr.title.as_deref().unwrap_or_default().to_string(),
        body: pr.body.as_deref().unwrap_or_default().to_string(),
        head_ref: pr.head.ref_field.clone(),
        base_ref: pr.base.ref_field.clone(),
        html_url: pr
            .html_url
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
        labels: pr
            .labels
            .as_ref()
            .map(|labels| labels.iter().map(|l| l.name.clone()).collect())
            .unwrap_or_default(),
    }
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn get_branch(&self, name: &str) -> Result<Option<Branch>> {
        debug!(branch = name, "looking up branch");
        let result = self
            .client
            .repos(&self.config.owner, &self.config.repo)
            .get_ref(&Reference::Branch(name.to_string()))
            .await;

        match result {
            Ok(reference) => {
                let sha = sha_from_ref(&reference)?;
                debug!(branch = name, %sha, "found branch");
                Ok(Some(Branch {
                    name: name.to_string(),
                    sha,
                }))
            }
            Err(e) if is_not_found(&e) => {
                debug!(branch = name, "branch not found");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn create_branch(&self, name: &str, sha: &str) -> Result<Branch> {
        debug!(branch = name, sha, "creating branch");
        let reference = self
            .client
            .repos(&self.config.owner, &self.config.repo)
            .create_ref(&Reference::Branch(name.to_string()), sha)
            .await?;

        let sha = sha_from_ref(&reference)?;
        debug!(branch = name, %sha, "created branch");
        Ok(Branch {
            name: name.to_string(),
            sha,
        })
    }

    async fn list_open_prs(&self, filter: &PullRequestFilter) -> Result<Vec<PullRequest>> {
        debug!(?filter, "listing open PRs");
        let pulls = self.client.pulls(&self.config.owner, &self.config.repo);
        let mut builder = pulls
            .list()
            .state(octocrab::params::State::Open)
            .per_page(PER_PAGE);

        if let Some(ref base) = filter.base {
            builder = builder.base(base);
        }
        if let Some(ref head) = filter.head {
            builder = builder.head(head);
        }

        let first_page = builder.send().await?;
        let prs = self.client.all_pages(first_page).await?;

        let result: Vec<PullRequest> = prs.iter().map(pr_from_octocrab).collect();
        debug!(count = result.len(), "listed open PRs");
        Ok(result)
    }

    async fn merge_branch(&self, base: &str, head: &str) -> Result<MergeResult> {
        #[derive(Deserialize)]
        struct MergeCommit {
            sha: String,
        }

        debug!(base, head, "merging branch");

        let url = format!(
            "{}/repos/{}/{}/merges",
            self.api_base, self.config.owner, self.config.repo
        );

        let response = self
            .http_client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .json(&serde_json::json!({ "base": base, "head": head }))
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Merge request failed: {e}")))?;

        match response.status() {
            StatusCode::CREATED => {
                let commit: MergeCommit = response
                    .json()
                    .await
                    .map_err(|e| Error::GitHubApi(format!("Failed to parse merge commit: {e}")))?;
                debug!(base, head, sha = %commit.sha, "merge complete");
                Ok(MergeResult::Merged { sha: commit.sha })
            }
            StatusCode::NO_CONTENT => {
                debug!(base, head, "nothing to merge");
                Ok(MergeResult::UpToDate)
            }
            StatusCode::CONFLICT => Err(Error::MergeConflict {
                base: base.to_string(),
                head: head.to_string(),
            }),
            StatusCode::NOT_FOUND => Err(Error::BranchNotFound(format!("{base} or {head}"))),
            status => {
                let text = response.text().await.unwrap_or_default();
                Err(Error::GitHubApi(format!("Merge failed ({status}): {text}")))
            }
        }
    }

    async fn create_pr(
        &self,
        head: &str,
        base: &str,
        title: &str,
        body: &str,
    ) -> Result<PullRequest> {
        debug!(head, base, "creating PR");
        let pr = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .create(title, head, base)
            .body(body)
            .send()
            .await?;

        let result = pr_from_octocrab(&pr);
        debug!(pr_number = result.number, "created PR");
        Ok(result)
    }

    async fn update_pr(&self, pr_number: u64, title: &str, body: &str) -> Result<PullRequest> {
        debug!(pr_number, "updating PR title and body");
        let pr = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .update(pr_number)
            .title(title)
            .body(body)
            .send()
            .await?;

        debug!(pr_number, "updated PR");
        Ok(pr_from_octocrab(&pr))
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
