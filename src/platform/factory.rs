//! Platform service construction

use crate::auth::get_github_auth;
use crate::error::{Error, Result};
use crate::platform::{GitHubService, PlatformService};
use crate::types::PlatformConfig;
use tracing::debug;

/// Create a platform service for the configured repository
pub async fn create_platform_service(config: &PlatformConfig) -> Result<Box<dyn PlatformService>> {
    if config.owner.trim().is_empty() || config.repo.trim().is_empty() {
        return Err(Error::Config(
            "repository owner and name must be set (OWNER / REPO)".to_string(),
        ));
    }

    let auth = get_github_auth(config.host.as_deref()).await?;
    debug!(source = ?auth.source, owner = %config.owner, repo = %config.repo, "creating GitHub service");

    let service = GitHubService::new(
        &auth.token,
        config.owner.clone(),
        config.repo.clone(),
        config.host.clone(),
    )?;
    Ok(Box::new(service))
}
