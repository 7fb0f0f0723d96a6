//! GitHub forge adapter (fetch-only)
use std::pin::Pin;

use reqwest::header::{ACCEPT, USER_AGENT};
use urlencoding::encode;

use super::{
    GITHUB_ACCEPT, GITHUB_API_HEADER, GITHUB_API_HOST, GITHUB_API_VERSION, GITHUB_DOMAIN,
    GITHUB_PER_PAGE,
};
use crate::{
    config::Token,
    errors::{ForgeMigrateError, ForgeMigrateErrorKind},
    forge::{api_base, http_client, ForgeClient, ForgeKind},
    github::repo::GithubRepo,
    repository::Repository,
};

/// GitHub adapter. Source-only: GitHub has no migrate-from-URL endpoint the
/// pipeline targets, and the configuration rejects it as a target.
#[derive(Debug, Clone)]
pub struct GithubForge {
    /// Configured domain
    domain: String,

    /// GitHub username
    username: String,

    /// GitHub token
    token: Token,

    /// Reqwest client
    client: reqwest::Client,
}

impl GithubForge {
    /// Create a new GithubForge.
    ///
    /// # Errors
    /// `Config` when the HTTP client cannot be built.
    pub(crate) fn new(
        domain: String,
        username: String,
        token: Token,
    ) -> Result<Self, ForgeMigrateError> {
        Ok(Self {
            domain,
            username,
            token,
            client: http_client()?,
        })
    }

    /// API base URL. github.com is served from api.github.com; any other
    /// domain is a GitHub Enterprise host under /api/v3.
    fn base(&self) -> String {
        if self.domain == GITHUB_DOMAIN {
            format!("https://{GITHUB_API_HOST}")
        } else {
            format!("{}/api/v3", api_base(&self.domain))
        }
    }
}

impl ForgeClient for GithubForge {
    fn kind(&self) -> ForgeKind {
        ForgeKind::Github
    }

    fn domain(&self) -> &str {
        &self.domain
    }

    fn fetch_repos(
        &self,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<Vec<Repository>, ForgeMigrateError>> + Send + '_>>
    {
        Box::pin(async move {
            let url = format!("{}/users/{}/repos", self.base(), encode(&self.username));
            let mut page: usize = 1;
            let mut all_repos = vec![];
            loop {
                let request = self
                    .client
                    .get(&url)
                    .query(&[
                        ("type", "all"),
                        ("per_page", &GITHUB_PER_PAGE.to_string()),
                        ("page", &page.to_string()),
                    ])
                    .basic_auth(&self.username, Some(self.token.reveal()))
                    .header(ACCEPT, GITHUB_ACCEPT)
                    .header(USER_AGENT, "forge-migrate")
                    .header(GITHUB_API_HEADER, GITHUB_API_VERSION)
                    .send();
                let response = request.await?;
                let status = response.status();
                if !status.is_success() {
                    let text = response.text().await.unwrap_or_default();
                    return Err(ForgeMigrateError::new(ForgeMigrateErrorKind::Fetch)
                        .with_forge(ForgeKind::Github)
                        .with_url(&url)
                        .with_status(status.as_u16())
                        .with_text(&text));
                }
                let text = response.text().await?;
                let repos: Vec<GithubRepo> = serde_json::from_str(&text).map_err(|e| {
                    ForgeMigrateError::new(ForgeMigrateErrorKind::Decode)
                        .with_forge(ForgeKind::Github)
                        .with_url(&url)
                        .with_text(&e.to_string())
                })?;
                let count = repos.len();
                log::debug!("github page {page}: {count} repositories");
                all_repos.extend(repos.into_iter().map(Repository::from));
                // A short page is the universal end-of-listing signal.
                if count < GITHUB_PER_PAGE {
                    break;
                }
                page += 1;
            }
            Ok(all_repos)
        })
    }

    fn migrate_repo(
        &self,
        _repo: Repository,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<(), ForgeMigrateError>> + Send + '_>> {
        Box::pin(async move {
            Err(ForgeMigrateError::new(ForgeMigrateErrorKind::Unsupported)
                .with_forge(ForgeKind::Github)
                .with_text("github is not a supported migration target"))
        })
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod test {
    use super::*;

    #[test]
    fn public_host_uses_api_subdomain() {
        let forge = GithubForge::new(
            "github.com".to_string(),
            "alice".to_string(),
            Token::new("t"),
        )
        .expect("client builds");
        assert_eq!(forge.base(), "https://api.github.com");
    }

    #[test]
    fn enterprise_host_uses_api_v3_path() {
        let forge = GithubForge::new(
            "github.corp.example".to_string(),
            "alice".to_string(),
            Token::new("t"),
        )
        .expect("client builds");
        assert_eq!(forge.base(), "https://github.corp.example/api/v3");
    }
}
