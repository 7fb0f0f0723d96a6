//! GitLab wire types and conversion into the shared Repository value
use serde::{Deserialize, Serialize};

use crate::repository::Repository;

/// One project as returned by the GitLab list endpoint.
#[derive(Deserialize, Default, Debug, Clone)]
pub struct GitlabProject {
    /// Display name of the project
    pub name: String,

    /// URL-safe project slug, used as the repository name
    pub path: String,

    /// HTTPS clone URL
    pub http_url_to_repo: String,

    /// SSH clone URL
    pub ssh_url_to_repo: Option<String>,
}

/// Request body for project creation with a remote import URL.
#[derive(Serialize, Debug, Clone)]
pub struct GitlabImportRequest {
    /// Name of the project to create
    pub name: String,

    /// Remote clone URL to import from
    pub import_url: String,

    /// "private" or "public"
    pub visibility: String,

    /// Enable the project wiki
    pub wiki_enabled: bool,

    /// Keep pulling from the source instead of a one-time import
    pub mirror: bool,

    /// Namespace to create the project under
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace_id: Option<u64>,
}

/// One namespace as returned by the GitLab namespaces endpoint.
#[derive(Deserialize, Default, Debug, Clone)]
pub struct GitlabNamespace {
    /// Namespace id
    pub id: u64,

    /// URL-safe namespace path
    pub path: String,
}

impl From<GitlabProject> for Repository {
    fn from(project: GitlabProject) -> Self {
        // The slug is what clone URLs and creation endpoints accept; the
        // display name may contain spaces.
        let name = if project.path.is_empty() {
            project.name
        } else {
            project.path
        };
        Repository {
            name,
            clone_url: project.http_url_to_repo,
            ssh_url: project.ssh_url_to_repo,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn slug_preferred_over_display_name() {
        let project = GitlabProject {
            name: "My Demo".to_string(),
            path: "my-demo".to_string(),
            http_url_to_repo: "https://gitlab.com/alice/my-demo.git".to_string(),
            ssh_url_to_repo: None,
        };
        let repo: Repository = project.into();
        assert_eq!(repo.name, "my-demo");
    }
}
