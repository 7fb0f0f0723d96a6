//! Repository value type
use serde::{Deserialize, Serialize};

use crate::errors::{ForgeMigrateError, ForgeMigrateErrorKind};

/// One repository discovered on the source forge.
#[derive(Deserialize, Serialize, Debug, Default, PartialEq, Eq, Hash, Clone)]
pub struct Repository {
    /// Name of the repository, unique within one fetch result
    pub name: String,

    /// Primary HTTPS clone URL
    pub clone_url: String,

    /// SSH clone URL, when the forge reports one
    pub ssh_url: Option<String>,
}

impl Repository {
    /// Pre-flight check before the repository is submitted for migration.
    ///
    /// # Errors
    /// `MalformedRequest` when the name or the clone URL is empty.
    pub fn validate(&self) -> Result<(), ForgeMigrateError> {
        if self.name.is_empty() {
            return Err(ForgeMigrateError::new(ForgeMigrateErrorKind::MalformedRequest)
                .with_text("repository name is empty"));
        }
        if self.clone_url.is_empty() {
            return Err(ForgeMigrateError::new(ForgeMigrateErrorKind::MalformedRequest)
                .with_text(&format!("repository '{}' has no clone url", self.name)));
        }
        Ok(())
    }
}

impl std::fmt::Display for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.clone_url)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn valid_repository() {
        let repo = Repository {
            name: "demo".to_string(),
            clone_url: "https://github.com/alice/demo.git".to_string(),
            ssh_url: Some("git@github.com:alice/demo.git".to_string()),
        };
        assert!(repo.validate().is_ok());
    }

    #[test]
    fn empty_name_rejected() {
        let repo = Repository {
            name: String::new(),
            clone_url: "https://github.com/alice/demo.git".to_string(),
            ssh_url: None,
        };
        assert!(repo.validate().is_err());
    }

    #[test]
    fn empty_clone_url_rejected() {
        let repo = Repository {
            name: "demo".to_string(),
            clone_url: String::new(),
            ssh_url: None,
        };
        assert!(repo.validate().is_err());
    }
}
