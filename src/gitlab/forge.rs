//! GitLab forge adapter
use std::pin::Pin;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use urlencoding::encode;

use super::{
    repo::{GitlabImportRequest, GitlabNamespace, GitlabProject},
    GITLAB_PER_PAGE, GITLAB_TOKEN_HEADER,
};
use crate::{
    config::Token,
    errors::{classify_status, ForgeMigrateError, ForgeMigrateErrorKind},
    forge::{api_base, http_client, ForgeClient, ForgeKind, ImportOptions},
    repository::Repository,
};

/// GitLab adapter.
///
/// GitLab finishes imports in the background after acknowledging with 201;
/// the adapter reports success on the acknowledgement.
#[derive(Debug, Clone)]
pub struct GitlabForge {
    /// Configured domain
    domain: String,

    /// GitLab username
    username: String,

    /// GitLab token
    token: Token,

    /// Import options when acting as target
    options: ImportOptions,

    /// Reqwest client
    client: reqwest::Client,
}

impl GitlabForge {
    /// Create a new GitlabForge.
    ///
    /// # Errors
    /// `Config` when the HTTP client cannot be built.
    pub(crate) fn new(
        domain: String,
        username: String,
        token: Token,
        options: ImportOptions,
    ) -> Result<Self, ForgeMigrateError> {
        Ok(Self {
            domain,
            username,
            token,
            options,
            client: http_client()?,
        })
    }

    /// API base URL.
    fn base(&self) -> String {
        format!("{}/api/v4", api_base(&self.domain))
    }

    /// Resolve a namespace path to its numeric id, required by the project
    /// creation endpoint when the owner is not the authenticated user.
    async fn namespace_id(&self, owner: &str) -> Result<u64, ForgeMigrateError> {
        let url = format!("{}/namespaces", self.base());
        let response = self
            .client
            .get(&url)
            .query(&[("search", owner)])
            .header(GITLAB_TOKEN_HEADER, self.token.reveal())
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ForgeMigrateError::new(classify_status(status.as_u16()))
                .with_forge(ForgeKind::Gitlab)
                .with_url(&url)
                .with_status(status.as_u16())
                .with_text(&text));
        }
        let namespaces: Vec<GitlabNamespace> = response.json().await?;
        namespaces
            .into_iter()
            .find(|n| n.path == owner)
            .map(|n| n.id)
            .ok_or_else(|| {
                ForgeMigrateError::new(ForgeMigrateErrorKind::MalformedRequest)
                    .with_forge(ForgeKind::Gitlab)
                    .with_text(&format!("namespace '{owner}' not found"))
            })
    }
}

impl ForgeClient for GitlabForge {
    fn kind(&self) -> ForgeKind {
        ForgeKind::Gitlab
    }

    fn domain(&self) -> &str {
        &self.domain
    }

    fn fetch_repos(
        &self,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<Vec<Repository>, ForgeMigrateError>> + Send + '_>>
    {
        Box::pin(async move {
            let url = format!("{}/users/{}/projects", self.base(), encode(&self.username));
            let mut page: usize = 1;
            let mut all_repos = vec![];
            loop {
                let request = self
                    .client
                    .get(&url)
                    .query(&[
                        ("per_page", &GITLAB_PER_PAGE.to_string()),
                        ("page", &page.to_string()),
                    ])
                    .header(GITLAB_TOKEN_HEADER, self.token.reveal())
                    .header(ACCEPT, "application/json")
                    .send();
                let response = request.await?;
                let status = response.status();
                if !status.is_success() {
                    let text = response.text().await.unwrap_or_default();
                    return Err(ForgeMigrateError::new(ForgeMigrateErrorKind::Fetch)
                        .with_forge(ForgeKind::Gitlab)
                        .with_url(&url)
                        .with_status(status.as_u16())
                        .with_text(&text));
                }
                let text = response.text().await?;
                let projects: Vec<GitlabProject> = serde_json::from_str(&text).map_err(|e| {
                    ForgeMigrateError::new(ForgeMigrateErrorKind::Decode)
                        .with_forge(ForgeKind::Gitlab)
                        .with_url(&url)
                        .with_text(&e.to_string())
                })?;
                let count = projects.len();
                log::debug!("gitlab page {page}: {count} projects");
                all_repos.extend(projects.into_iter().map(Repository::from));
                if count < GITLAB_PER_PAGE {
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
            let url = format!("{}/projects", self.base());
            let namespace_id = match &self.options.owner {
                Some(owner) if owner != &self.username => Some(self.namespace_id(owner).await?),
                _ => None,
            };
            let visibility = if self.options.private {
                "private"
            } else {
                "public"
            };
            let json_body = GitlabImportRequest {
                name: repo.name.clone(),
                import_url: repo.clone_url.clone(),
                visibility: visibility.to_string(),
                wiki_enabled: self.options.wiki,
                mirror: self.options.mirror,
                namespace_id,
            };
            let request = self
                .client
                .post(&url)
                .header(GITLAB_TOKEN_HEADER, self.token.reveal())
                .header(ACCEPT, "application/json")
                .header(CONTENT_TYPE, "application/json")
                .json(&json_body)
                .send();
            let response = request.await?;
            let status = response.status();
            if !status.is_success() {
                let text = response.text().await.unwrap_or_default();
                // GitLab answers 400 with a "has already been taken" message
                // for duplicate names rather than 409.
                let kind = if status.as_u16() == 400 && text.contains("already been taken") {
                    ForgeMigrateErrorKind::Conflict
                } else {
                    classify_status(status.as_u16())
                };
                return Err(ForgeMigrateError::new(kind)
                    .with_forge(ForgeKind::Gitlab)
                    .with_url(&url)
                    .with_status(status.as_u16())
                    .with_text(&text));
            }
            Ok(())
        })
    }
}
