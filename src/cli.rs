//! Command line options for the forge-migrate tool
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;

use crate::{
    config::MigrationConfig,
    errors::ForgeMigrateError,
    forge::ForgeKind,
    migrate::{run_migration, MigrationOutcome, MigrationReport},
};

/// forge-migrate - Migrate git repositories between forges
#[derive(Parser, Default, Clone, Debug)]
pub struct ForgeMigrateCli {
    /// Override the source forge kind (github, gitlab, gitea, forgejo)
    #[arg(short, long, visible_alias = "from")]
    pub source: Option<ForgeKind>,

    /// Override the target forge kind (gitea, forgejo, gitlab)
    #[arg(short, long, visible_alias = "to")]
    pub target: Option<ForgeKind>,

    /// Custom .env file to load before reading the environment
    #[arg(short, long)]
    pub env_file: Option<PathBuf>,

    /// Verbose mode (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl ForgeMigrateCli {
    /// Log level matching the verbosity flags.
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

/// Run the forge-migrate tool with the provided command line options.
///
/// Loads the environment, builds the configuration, installs a ctrl-c
/// handler, runs the migration and prints the per-repository summary.
///
/// # Errors
/// Fatal configuration or fetch errors; per-repository migration failures
/// are reported in the returned [`MigrationReport`] instead.
pub async fn forge_migrate_main() -> Result<MigrationReport, ForgeMigrateError> {
    let args = ForgeMigrateCli::parse();
    env_logger::builder()
        .filter_level(args.log_level())
        .format_target(false)
        .format_timestamp(None)
        .init();
    match &args.env_file {
        Some(path) => {
            dotenv::from_path(path)
                .map_err(|e| ForgeMigrateError::from(format!("unable to load env file: {e}")))?;
        }
        None => {
            // A missing .env is fine; the process environment may be enough.
            let _ = dotenv::dotenv();
        }
    }
    let mut config = MigrationConfig::from_env()?;
    if let Some(kind) = args.source {
        config.source_kind = kind;
    }
    if let Some(kind) = args.target {
        config.target_kind = kind;
    }

    let cancel = Arc::new(AtomicBool::new(false));
    let flag = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("interrupt received, finishing the current repository");
            flag.store(true, Ordering::SeqCst);
        }
    });

    let report = run_migration(&config, &cancel).await?;
    print_summary(&report);
    Ok(report)
}

/// Print one line per repository plus the aggregate count.
fn print_summary(report: &MigrationReport) {
    for outcome in &report.outcomes {
        println!("{}", summary_line(outcome));
    }
    println!(
        "{} succeeded / {} failed",
        report.succeeded(),
        report.failed()
    );
}

/// One summary line for a repository outcome.
fn summary_line(outcome: &MigrationOutcome) -> String {
    match &outcome.result {
        Ok(()) => match outcome.attempts.saturating_sub(1) {
            0 => format!("{}: ok", outcome.name),
            1 => format!("{}: ok (1 retry)", outcome.name),
            retries => format!("{}: ok ({retries} retries)", outcome.name),
        },
        Err(e) => format!("{}: failed ({e})", outcome.name),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::errors::ForgeMigrateErrorKind;

    fn outcome(attempts: u32, result: Result<(), ForgeMigrateError>) -> MigrationOutcome {
        MigrationOutcome {
            name: "demo".to_string(),
            attempts,
            result,
        }
    }

    #[test]
    fn summary_line_pluralizes_retries() {
        assert_eq!(summary_line(&outcome(1, Ok(()))), "demo: ok");
        assert_eq!(summary_line(&outcome(2, Ok(()))), "demo: ok (1 retry)");
        assert_eq!(summary_line(&outcome(3, Ok(()))), "demo: ok (2 retries)");
    }

    #[test]
    fn summary_line_names_the_failure() {
        let err = ForgeMigrateError::new(ForgeMigrateErrorKind::Conflict);
        let line = summary_line(&outcome(1, Err(err)));
        assert!(line.starts_with("demo: failed"));
        assert!(line.contains("Conflict"));
    }
}
