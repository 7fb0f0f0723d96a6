//! Migration orchestration: fetch from the source forge, then migrate each
//! repository on the target forge with per-repository failure isolation.
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::{
    config::MigrationConfig,
    errors::{ForgeMigrateError, ForgeMigrateErrorKind},
    forge::{source_forge, target_forge, ForgeClient},
    repository::Repository,
};

/// Maximum migration attempts per repository (retries on transient failures).
const MAX_ATTEMPTS: u32 = 3;

/// Backoff before the first retry; doubles on each further retry.
const RETRY_BASE_DELAY: Duration = Duration::from_millis(500);

/// Result of one repository's migration.
#[derive(Debug)]
pub struct MigrationOutcome {
    /// Repository name
    pub name: String,

    /// How many migrate calls were issued (0 when never submitted)
    pub attempts: u32,

    /// Final result after retries
    pub result: Result<(), ForgeMigrateError>,
}

/// Aggregated outcomes of one run, in fetch order, one entry per fetched
/// repository.
#[derive(Debug, Default)]
pub struct MigrationReport {
    /// Per-repository outcomes
    pub outcomes: Vec<MigrationOutcome>,
}

impl MigrationReport {
    /// Number of repositories that migrated successfully.
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    /// Number of repositories that failed.
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// Total number of repositories covered by the run.
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }
}

/// Run a full migration: validate, fetch the repository list once, then
/// migrate each repository independently.
///
/// Configuration and fetch errors are fatal and returned as `Err`; individual
/// migration failures are recorded in the report and never abort the batch.
/// Setting `cancel` stops new migrate calls from being issued.
///
/// # Errors
/// `Config` error before any network call, or a `Fetch` error from the
/// source forge.
pub async fn run_migration(
    config: &MigrationConfig,
    cancel: &AtomicBool,
) -> Result<MigrationReport, ForgeMigrateError> {
    config.validate()?;
    let source = source_forge(config)?;
    let target = target_forge(config)?;
    log::info!(
        "fetching repositories for {} from {} ({})",
        config.source_username,
        source.kind(),
        source.domain()
    );
    let repos = source.fetch_repos().await?;
    println!("Found {} repositories on {}", repos.len(), source.domain());
    Ok(migrate_all(target.as_ref(), repos, cancel).await)
}

/// Migrate every repository in fetch order, recording one outcome per entry.
pub(crate) async fn migrate_all(
    target: &dyn ForgeClient,
    repos: Vec<Repository>,
    cancel: &AtomicBool,
) -> MigrationReport {
    let mut outcomes = Vec::with_capacity(repos.len());
    for repo in repos {
        let name = repo.name.clone();
        if cancel.load(Ordering::SeqCst) {
            log::warn!("cancelled, skipping {name}");
            outcomes.push(MigrationOutcome {
                name,
                attempts: 0,
                result: Err(ForgeMigrateError::new(ForgeMigrateErrorKind::Transient)
                    .with_text("cancelled before the migration was attempted")),
            });
            continue;
        }
        println!("Migrating {name}...");
        let (attempts, result) = migrate_with_retry(target, repo).await;
        match &result {
            Ok(()) => println!("Successfully migrated {name}"),
            Err(e) => eprintln!("Failed to migrate {name}: {e}"),
        }
        outcomes.push(MigrationOutcome {
            name,
            attempts,
            result,
        });
    }
    MigrationReport { outcomes }
}

/// Migrate one repository, retrying transient failures with doubling backoff.
/// A repository that fails pre-flight validation is never submitted.
async fn migrate_with_retry(
    target: &dyn ForgeClient,
    repo: Repository,
) -> (u32, Result<(), ForgeMigrateError>) {
    if let Err(e) = repo.validate() {
        return (0, Err(e));
    }
    let mut delay = RETRY_BASE_DELAY;
    let mut attempts = 0;
    loop {
        attempts += 1;
        match target.migrate_repo(repo.clone()).await {
            Ok(()) => return (attempts, Ok(())),
            Err(e) if e.is_transient() && attempts < MAX_ATTEMPTS => {
                log::warn!(
                    "transient failure migrating {} (attempt {attempts}/{MAX_ATTEMPTS}): {e}",
                    repo.name
                );
                tokio::time::sleep(delay).await;
                delay *= 2;
            }
            Err(e) => return (attempts, Err(e)),
        }
    }
}
