//! # forge-migrate
//!
//! Migrate git repositories between forges (GitHub, GitLab, Gitea, Forgejo)
//!
//! ## Usage
//!
//! ```txt
//! Usage: forge-migrate [OPTIONS]
//!
//! Options:
//!  -s, --source <SOURCE>      Override the source forge kind (github, gitlab, gitea, forgejo) [aliases: from]
//!  -t, --target <TARGET>      Override the target forge kind (gitea, forgejo, gitlab) [aliases: to]
//!  -e, --env-file <ENV_FILE>  Custom .env file to load before reading the environment
//!  -v, --verbose...           Verbose mode (-v, -vv, -vvv)
//!  -h, --help                 Print help
//! ```
//!
//! Configuration is read from the environment (optionally via a `.env`
//! file): `SOURCE_TYPE`, `SOURCE_DOMAIN`, `SOURCE_USERNAME`, `SOURCE_TOKEN`,
//! `TARGET_TYPE`, `TARGET_DOMAIN`, `TARGET_USERNAME`, `TARGET_TOKEN`,
//! `TARGET_REPO_OWNER`, `MAKE_PRIVATE`, `ENABLE_WIKI`, `ENABLE_MIRROR`.

#![warn(clippy::all, rust_2018_idioms)]
#![deny(
    missing_docs,
    clippy::all,
    clippy::missing_docs_in_private_items,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::cargo,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![warn(clippy::multiple_crate_versions)]

pub(crate) mod cli;
pub(crate) mod config;
pub(crate) mod errors;
pub(crate) mod forge;
pub(crate) mod migrate;
pub(crate) mod repository;

mod gitea;
mod github;
mod gitlab;

pub use cli::{forge_migrate_main, ForgeMigrateCli};
pub use config::{MigrationConfig, Token};
pub use errors::{ForgeMigrateError, ForgeMigrateErrorKind};
pub use forge::{source_forge, target_forge, ForgeClient, ForgeKind, ImportOptions};
pub use migrate::{run_migration, MigrationOutcome, MigrationReport};
pub use repository::Repository;
