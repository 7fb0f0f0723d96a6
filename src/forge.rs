//! Forge capability trait and forge-kind resolution
use std::pin::Pin;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::{
    config::MigrationConfig,
    errors::{ForgeMigrateError, ForgeMigrateErrorKind},
    gitea::forge::GiteaForge,
    github::forge::GithubForge,
    gitlab::forge::GitlabForge,
    repository::Repository,
};

/// Timeout applied to every outbound HTTP request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Capability shared by every forge adapter.
pub trait ForgeClient: Sync + Send {
    /// List every repository of the configured user, exhausting pagination.
    ///
    /// # Errors
    /// `Fetch` on transport failures or a non-2xx answer, `Decode` on an
    /// unparseable body.
    fn fetch_repos(
        &self,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<Vec<Repository>, ForgeMigrateError>> + Send + '_>>;

    /// Ask the forge to create/import `repo` from its clone URL.
    ///
    /// # Errors
    /// `Auth` on 401/403, `Conflict` when the repository already exists,
    /// `Transient` on network failures and 5xx, `MalformedRequest` on other
    /// 4xx answers.
    fn migrate_repo(
        &self,
        repo: Repository,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<(), ForgeMigrateError>> + Send + '_>>;

    /// Which forge family this adapter talks to.
    fn kind(&self) -> ForgeKind;

    /// Domain the adapter was configured with.
    fn domain(&self) -> &str;
}

/// Forge families with a known adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForgeKind {
    /// github.com or a GitHub Enterprise host
    Github,
    /// gitlab.com or a self-hosted GitLab
    Gitlab,
    /// a Gitea instance
    Gitea,
    /// a Forgejo instance (API-compatible with Gitea)
    Forgejo,
}

impl ForgeKind {
    /// Canonical public host, used when the configured domain is empty.
    pub fn canonical_domain(&self) -> &'static str {
        match self {
            ForgeKind::Github => "github.com",
            ForgeKind::Gitlab => "gitlab.com",
            ForgeKind::Gitea => "gitea.com",
            ForgeKind::Forgejo => "codeberg.org",
        }
    }

    /// Whether this kind can be a migration target.
    pub fn supports_migration_target(&self) -> bool {
        !matches!(self, ForgeKind::Github)
    }
}

impl std::fmt::Display for ForgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ForgeKind::Github => write!(f, "github"),
            ForgeKind::Gitlab => write!(f, "gitlab"),
            ForgeKind::Gitea => write!(f, "gitea"),
            ForgeKind::Forgejo => write!(f, "forgejo"),
        }
    }
}

impl FromStr for ForgeKind {
    type Err = ForgeMigrateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "github" => Ok(ForgeKind::Github),
            "gitlab" => Ok(ForgeKind::Gitlab),
            "gitea" => Ok(ForgeKind::Gitea),
            "forgejo" => Ok(ForgeKind::Forgejo),
            other => Err(ForgeMigrateError::new(ForgeMigrateErrorKind::Config)
                .with_text(&format!("unknown forge kind '{other}'"))),
        }
    }
}

/// Options forwarded to the target forge when importing a repository.
#[derive(Debug, Default, Clone)]
pub struct ImportOptions {
    /// Create the repository as private.
    pub private: bool,

    /// Import the wiki alongside the code.
    pub wiki: bool,

    /// Keep pulling from the source instead of a one-time import.
    pub mirror: bool,

    /// Namespace to create the repository under; target username when unset.
    pub owner: Option<String>,
}

/// Resolve the source adapter named by the configuration.
///
/// # Errors
/// `Config` when the HTTP client cannot be constructed.
pub fn source_forge(config: &MigrationConfig) -> Result<Box<dyn ForgeClient>, ForgeMigrateError> {
    let forge: Box<dyn ForgeClient> = match config.source_kind {
        ForgeKind::Github => Box::new(GithubForge::new(
            config.source_domain(),
            config.source_username.clone(),
            config.source_token.clone(),
        )?),
        ForgeKind::Gitlab => Box::new(GitlabForge::new(
            config.source_domain(),
            config.source_username.clone(),
            config.source_token.clone(),
            ImportOptions::default(),
        )?),
        ForgeKind::Gitea | ForgeKind::Forgejo => Box::new(GiteaForge::new(
            config.source_kind,
            config.source_domain(),
            config.source_username.clone(),
            config.source_token.clone(),
            ImportOptions::default(),
        )?),
    };
    Ok(forge)
}

/// Resolve the target adapter named by the configuration.
///
/// # Errors
/// `Unsupported` when the configured kind cannot be a migration target, or
/// `Config` when the HTTP client cannot be constructed.
pub fn target_forge(config: &MigrationConfig) -> Result<Box<dyn ForgeClient>, ForgeMigrateError> {
    let options = config.import_options();
    let forge: Box<dyn ForgeClient> = match config.target_kind {
        ForgeKind::Github => {
            return Err(ForgeMigrateError::new(ForgeMigrateErrorKind::Unsupported)
                .with_forge(ForgeKind::Github)
                .with_text("github is not a supported migration target"));
        }
        ForgeKind::Gitlab => Box::new(GitlabForge::new(
            config.target_domain.clone(),
            config.target_username.clone(),
            config.target_token.clone(),
            options,
        )?),
        ForgeKind::Gitea | ForgeKind::Forgejo => Box::new(GiteaForge::new(
            config.target_kind,
            config.target_domain.clone(),
            config.target_username.clone(),
            config.target_token.clone(),
            options,
        )?),
    };
    Ok(forge)
}

/// Base URL for a configured domain. A domain carrying an explicit scheme is
/// used verbatim, otherwise https is assumed.
pub(crate) fn api_base(domain: &str) -> String {
    if domain.starts_with("http://") || domain.starts_with("https://") {
        domain.trim_end_matches('/').to_string()
    } else {
        format!("https://{domain}")
    }
}

/// Shared HTTP client with the request timeout applied.
///
/// # Errors
/// `Config` when the client (TLS backend, resolver) cannot be built.
pub(crate) fn http_client() -> Result<reqwest::Client, ForgeMigrateError> {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| {
            ForgeMigrateError::new(ForgeMigrateErrorKind::Config)
                .with_text(&format!("unable to build http client: {e}"))
        })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_forge_kind() {
        assert_eq!("github".parse::<ForgeKind>().ok(), Some(ForgeKind::Github));
        assert_eq!("GitLab".parse::<ForgeKind>().ok(), Some(ForgeKind::Gitlab));
        assert_eq!("forgejo".parse::<ForgeKind>().ok(), Some(ForgeKind::Forgejo));
        assert!("bitbucket".parse::<ForgeKind>().is_err());
    }

    #[test]
    fn display_roundtrip() {
        for kind in [
            ForgeKind::Github,
            ForgeKind::Gitlab,
            ForgeKind::Gitea,
            ForgeKind::Forgejo,
        ] {
            assert_eq!(kind.to_string().parse::<ForgeKind>().ok(), Some(kind));
        }
    }

    #[test]
    fn api_base_respects_scheme() {
        assert_eq!(api_base("gitea.example.com"), "https://gitea.example.com");
        assert_eq!(api_base("http://127.0.0.1:8080/"), "http://127.0.0.1:8080");
    }

    #[test]
    fn http_client_builds_with_timeout() {
        assert!(http_client().is_ok());
    }

    #[test]
    fn github_is_not_a_target() {
        assert!(!ForgeKind::Github.supports_migration_target());
        assert!(ForgeKind::Gitea.supports_migration_target());
    }
}
