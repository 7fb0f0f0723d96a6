//! Gitea wire types and conversion into the shared Repository value
use serde::{Deserialize, Serialize};

use crate::repository::Repository;

/// One repository as returned by the Gitea list endpoint.
#[derive(Deserialize, Default, Debug, Clone)]
pub struct GiteaRepo {
    /// Repository name
    pub name: String,

    /// HTTPS clone URL
    pub clone_url: String,

    /// SSH clone URL
    pub ssh_url: Option<String>,
}

/// Request body for the Gitea migrate endpoint.
#[derive(Serialize, Debug, Clone)]
pub struct GiteaMigrateRequest {
    /// Remote clone URL to import from
    pub clone_addr: String,

    /// Name of the repository to create
    pub repo_name: String,

    /// Namespace to create the repository under
    pub repo_owner: String,

    /// Create the repository as private
    pub private: bool,

    /// Import the wiki alongside the code
    pub wiki: bool,

    /// Keep pulling from the source instead of a one-time import
    pub mirror: bool,
}

impl From<GiteaRepo> for Repository {
    fn from(repo: GiteaRepo) -> Self {
        Repository {
            name: repo.name,
            clone_url: repo.clone_url,
            ssh_url: repo.ssh_url,
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod test {
    use super::*;

    #[test]
    fn maps_clone_endpoints() {
        let raw = r#"{
            "name": "demo",
            "clone_url": "https://codeberg.org/alice/demo.git",
            "ssh_url": "git@codeberg.org:alice/demo.git"
        }"#;
        let parsed: GiteaRepo = serde_json::from_str(raw).expect("valid gitea payload");
        let repo: Repository = parsed.into();
        assert_eq!(repo.name, "demo");
        assert_eq!(repo.clone_url, "https://codeberg.org/alice/demo.git");
    }
}
