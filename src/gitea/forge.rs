//! Gitea/Forgejo forge adapter
use std::pin::Pin;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use urlencoding::encode;

use super::{
    repo::{GiteaMigrateRequest, GiteaRepo},
    GITEA_PER_PAGE,
};
use crate::{
    config::Token,
    errors::{classify_status, ForgeMigrateError, ForgeMigrateErrorKind},
    forge::{api_base, http_client, ForgeClient, ForgeKind, ImportOptions},
    repository::Repository,
};

/// Gitea adapter, serving both the `gitea` and `forgejo` kinds.
///
/// The migrate endpoint blocks until the import finishes, so a 2xx answer
/// means the repository is fully created on the target.
#[derive(Debug, Clone)]
pub struct GiteaForge {
    /// Which of the two API-compatible kinds was configured
    kind: ForgeKind,

    /// Configured domain
    domain: String,

    /// Username on the forge
    username: String,

    /// API token
    token: Token,

    /// Import options when acting as target
    options: ImportOptions,

    /// Reqwest client
    client: reqwest::Client,
}

impl GiteaForge {
    /// Create a new GiteaForge.
    ///
    /// # Errors
    /// `Config` when the HTTP client cannot be built.
    pub(crate) fn new(
        kind: ForgeKind,
        domain: String,
        username: String,
        token: Token,
        options: ImportOptions,
    ) -> Result<Self, ForgeMigrateError> {
        Ok(Self {
            kind,
            domain,
            username,
            token,
            options,
            client: http_client()?,
        })
    }

    /// API base URL.
    fn base(&self) -> String {
        format!("{}/api/v1", api_base(&self.domain))
    }
}

impl ForgeClient for GiteaForge {
    fn kind(&self) -> ForgeKind {
        self.kind
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
                        ("page", &page.to_string()),
                        ("limit", &GITEA_PER_PAGE.to_string()),
                    ])
                    .header(AUTHORIZATION, format!("token {}", self.token.reveal()))
                    .header(ACCEPT, "application/json")
                    .send();
                let response = request.await?;
                let status = response.status();
                if !status.is_success() {
                    let text = response.text().await.unwrap_or_default();
                    return Err(ForgeMigrateError::new(ForgeMigrateErrorKind::Fetch)
                        .with_forge(self.kind())
                        .with_url(&url)
                        .with_status(status.as_u16())
                        .with_text(&text));
                }
                let text = response.text().await?;
                let repos: Vec<GiteaRepo> = serde_json::from_str(&text).map_err(|e| {
                    ForgeMigrateError::new(ForgeMigrateErrorKind::Decode)
                        .with_forge(self.kind())
                        .with_url(&url)
                        .with_text(&e.to_string())
                })?;
                let count = repos.len();
                log::debug!("{} page {page}: {count} repositories", self.kind());
                all_repos.extend(repos.into_iter().map(Repository::from));
                if count < GITEA_PER_PAGE {
                    break;
                }
                page += 1;
            }
            Ok(all_repos)
        })
    }

    fn migrate_repo(
        &self,
        repo: Repository,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<(), ForgeMigrateError>> + Send + '_>> {
        Box::pin(async move {
            let url = format!("{}/repos/migrate", self.base());
            let owner = self
                .options
                .owner
                .clone()
                .unwrap_or_else(|| self.username.clone());
            let json_body = GiteaMigrateRequest {
                clone_addr: repo.clone_url.clone(),
                repo_name: repo.name.clone(),
                repo_owner: owner,
                private: self.options.private,
                wiki: self.options.wiki,
                mirror: self.options.mirror,
            };
            let request = self
                .client
                .post(&url)
                .header(AUTHORIZATION, format!("token {}", self.token.reveal()))
                .header(ACCEPT, "application/json")
                .header(CONTENT_TYPE, "application/json")
                .json(&json_body)
                .send();
            let response = request.await?;
            let status = response.status();
            if !status.is_success() {
                let text = response.text().await.unwrap_or_default();
                return Err(ForgeMigrateError::new(classify_status(status.as_u16()))
                    .with_forge(self.kind())
                    .with_url(&url)
                    .with_status(status.as_u16())
                    .with_text(&text));
            }
            Ok(())
        })
    }
}
