//! Configuration handling
use std::fmt;

use crate::{
    errors::{ForgeMigrateError, ForgeMigrateErrorKind},
    forge::{ForgeKind, ImportOptions},
};

/// Opaque secret string. Never reveals its value when printed.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    /// Wrap a secret value.
    pub fn new<S: Into<String>>(secret: S) -> Self {
        Self(secret.into())
    }

    /// Access the secret for request construction.
    pub(crate) fn reveal(&self) -> &str {
        &self.0
    }

    /// Whether the secret is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token(***)")
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***")
    }
}

/// Immutable configuration for one migration run.
#[derive(Debug, Clone)]
pub struct MigrationConfig {
    /// Forge family to migrate from
    pub source_kind: ForgeKind,

    /// Source domain; the kind's canonical host when empty
    pub source_domain: String,

    /// Username owning the repositories on the source forge
    pub source_username: String,

    /// API token for the source forge
    pub source_token: Token,

    /// Forge family to migrate to (gitea, forgejo or gitlab)
    pub target_kind: ForgeKind,

    /// Target domain
    pub target_domain: String,

    /// Username on the target forge
    pub target_username: String,

    /// API token for the target forge
    pub target_token: Token,

    /// Namespace to create repositories under; target username when empty
    pub target_repo_owner: Option<String>,

    /// Create migrated repositories as private
    pub make_private: bool,

    /// Import wikis alongside the code
    pub enable_wiki: bool,

    /// Keep pulling from the source instead of a one-time import
    pub enable_mirror: bool,
}

/// Parse a flag value: true only for the literal string "true". A missing
/// key falls back to the given default value.
fn parse_bool(value: Option<String>, default: &str) -> bool {
    value.as_deref().unwrap_or(default) == "true"
}

impl MigrationConfig {
    /// Build the configuration from the process environment.
    ///
    /// # Errors
    /// `Config` error if a forge kind does not resolve to a known adapter.
    pub fn from_env() -> Result<Self, ForgeMigrateError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any flat key/value lookup.
    ///
    /// # Errors
    /// `Config` error if a forge kind does not resolve to a known adapter.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ForgeMigrateError> {
        let source_kind = lookup("SOURCE_TYPE")
            .unwrap_or_else(|| "github".to_string())
            .parse::<ForgeKind>()?;
        let target_kind = lookup("TARGET_TYPE")
            .unwrap_or_else(|| "gitea".to_string())
            .parse::<ForgeKind>()?;
        Ok(Self {
            source_kind,
            source_domain: lookup("SOURCE_DOMAIN").unwrap_or_default(),
            source_username: lookup("SOURCE_USERNAME").unwrap_or_default(),
            source_token: Token::new(lookup("SOURCE_TOKEN").unwrap_or_default()),
            target_kind,
            target_domain: lookup("TARGET_DOMAIN").unwrap_or_default(),
            target_username: lookup("TARGET_USERNAME").unwrap_or_default(),
            target_token: Token::new(lookup("TARGET_TOKEN").unwrap_or_default()),
            target_repo_owner: lookup("TARGET_REPO_OWNER").filter(|o| !o.is_empty()),
            make_private: parse_bool(lookup("MAKE_PRIVATE"), "true"),
            enable_wiki: parse_bool(lookup("ENABLE_WIKI"), "true"),
            enable_mirror: parse_bool(lookup("ENABLE_MIRROR"), "false"),
        })
    }

    /// Source domain, falling back to the kind's canonical public host.
    pub fn source_domain(&self) -> String {
        if self.source_domain.is_empty() {
            self.source_kind.canonical_domain().to_string()
        } else {
            self.source_domain.clone()
        }
    }

    /// Import options for the target adapter.
    pub fn import_options(&self) -> ImportOptions {
        ImportOptions {
            private: self.make_private,
            wiki: self.enable_wiki,
            mirror: self.enable_mirror,
            owner: self.target_repo_owner.clone(),
        }
    }

    /// Check that the run can be attempted at all. Runs before any network
    /// call; a failure here is fatal.
    ///
    /// # Errors
    /// `Config` error naming the first missing or invalid field.
    pub fn validate(&self) -> Result<(), ForgeMigrateError> {
        let config_err = |text: &str| {
            Err(ForgeMigrateError::new(ForgeMigrateErrorKind::Config).with_text(text))
        };
        if self.source_username.is_empty() {
            return config_err("SOURCE_USERNAME is required");
        }
        if self.source_token.is_empty() {
            return config_err("SOURCE_TOKEN is required");
        }
        if !self.target_kind.supports_migration_target() {
            return config_err("TARGET_TYPE must be one of gitea, forgejo, gitlab");
        }
        if self.target_domain.is_empty() {
            return config_err("TARGET_DOMAIN is required");
        }
        if self.target_username.is_empty() {
            return config_err("TARGET_USERNAME is required");
        }
        if self.target_token.is_empty() {
            return config_err("TARGET_TOKEN is required");
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod test {
    use super::*;
    use std::collections::HashMap;

    /// Lookup over a literal key/value table.
    fn table(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn full_table() -> Vec<(&'static str, &'static str)> {
        vec![
            ("SOURCE_TYPE", "github"),
            ("SOURCE_USERNAME", "alice"),
            ("SOURCE_TOKEN", "s3cr3t"),
            ("TARGET_TYPE", "gitea"),
            ("TARGET_DOMAIN", "git.example.com"),
            ("TARGET_USERNAME", "alice"),
            ("TARGET_TOKEN", "t0k3n"),
            ("MAKE_PRIVATE", "true"),
        ]
    }

    #[test]
    fn full_config_validates() {
        let config = MigrationConfig::from_lookup(table(&full_table())).unwrap();
        assert!(config.validate().is_ok());
        assert!(config.make_private);
        assert!(config.enable_wiki);
        assert_eq!(config.source_domain(), "github.com");
    }

    #[test]
    fn unset_flags_keep_conservative_defaults() {
        let mut pairs = full_table();
        pairs.retain(|(k, _)| *k != "MAKE_PRIVATE");
        let config = MigrationConfig::from_lookup(table(&pairs)).unwrap();
        assert!(config.make_private);
        assert!(config.enable_wiki);
        assert!(!config.enable_mirror);
    }

    #[test]
    fn unknown_kind_is_config_error() {
        let mut pairs = full_table();
        pairs[0] = ("SOURCE_TYPE", "sourcehut");
        let err = MigrationConfig::from_lookup(table(&pairs)).unwrap_err();
        assert_eq!(err.kind(), &ForgeMigrateErrorKind::Config);
    }

    #[test]
    fn github_target_rejected() {
        let mut pairs = full_table();
        pairs[3] = ("TARGET_TYPE", "github");
        let config = MigrationConfig::from_lookup(table(&pairs)).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_target_token_rejected() {
        let mut pairs = full_table();
        pairs.retain(|(k, _)| *k != "TARGET_TOKEN");
        let config = MigrationConfig::from_lookup(table(&pairs)).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn booleans_only_accept_literal_true() {
        let mut pairs = full_table();
        pairs.push(("ENABLE_WIKI", "yes"));
        pairs.push(("ENABLE_MIRROR", "TRUE"));
        let config = MigrationConfig::from_lookup(table(&pairs)).unwrap();
        assert!(!config.enable_wiki);
        assert!(!config.enable_mirror);
    }

    #[test]
    fn custom_source_domain_kept() {
        let mut pairs = full_table();
        pairs.push(("SOURCE_DOMAIN", "github.corp.example"));
        let config = MigrationConfig::from_lookup(table(&pairs)).unwrap();
        assert_eq!(config.source_domain(), "github.corp.example");
    }

    #[test]
    fn token_never_prints_its_value() {
        let token = Token::new("hunter2");
        assert!(!format!("{token:?}").contains("hunter2"));
        assert!(!token.to_string().contains("hunter2"));
    }
}
