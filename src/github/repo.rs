//! GitHub wire types and conversion into the shared Repository value
use serde::Deserialize;

use crate::repository::Repository;

/// One repository as returned by the GitHub list endpoint.
#[derive(Deserialize, Default, Debug, Clone)]
pub struct GithubRepo {
    /// Repository name
    pub name: String,

    /// HTTPS clone URL
    pub clone_url: String,

    /// SSH clone URL
    pub ssh_url: Option<String>,
}

impl From<GithubRepo> for Repository {
    fn from(repo: GithubRepo) -> Self {
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
            "clone_url": "https://github.com/alice/demo.git",
            "ssh_url": "git@github.com:alice/demo.git",
            "html_url": "https://github.com/alice/demo"
        }"#;
        let parsed: GithubRepo = serde_json::from_str(raw).expect("valid github payload");
        let repo: Repository = parsed.into();
        assert_eq!(repo.name, "demo");
        assert_eq!(repo.clone_url, "https://github.com/alice/demo.git");
        assert_eq!(repo.ssh_url.as_deref(), Some("git@github.com:alice/demo.git"));
    }
}
