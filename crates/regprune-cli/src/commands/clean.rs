//! Cleanup command implementation.
//!
//! Resolves settings and credentials, runs the cleanup and prints the report.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use regprune_cleanup::{
    AbortReason, CleanupOptions, CleanupOrchestrator, CleanupReport, CleanupState,
};
use regprune_core::{split_list, Settings};
use regprune_registry::{CredentialStore, RegistryClient, RegistryConfig};

use crate::prompt::TerminalConfirmer;

/// Arguments for a cleanup run.
#[derive(Args, Debug, Default)]
pub struct CleanArgs {
    /// Repository to clean (e.g., `team/api`)
    #[arg(short, long, env = "REGPRUNE_REPOSITORY")]
    pub repository: Option<String>,

    /// Registry URL (e.g., `<https://registry.example.com>`)
    #[arg(short = 'u', long, env = "REGPRUNE_REGISTRY_URL")]
    pub registry_url: Option<String>,

    /// Delete tags ending with any of these suffixes (comma-separated)
    #[arg(short, long)]
    pub suffixes: Option<String>,

    /// Delete release tags below this version
    #[arg(short, long)]
    pub min_version: Option<String>,

    /// Never delete these tags (comma-separated)
    #[arg(short, long)]
    pub excluded: Option<String>,

    /// Settings file with KEY=value lines
    #[arg(short = 'f', long)]
    pub settings_file: Option<PathBuf>,

    /// Credential store to read the registry login from
    #[arg(long)]
    pub credentials_file: Option<PathBuf>,

    /// Prompt for the retention rules
    #[arg(short, long)]
    pub interactive: bool,

    /// Skip both confirmation prompts
    #[arg(short, long)]
    pub yes: bool,

    /// Show what would be deleted and stop
    #[arg(long)]
    pub dry_run: bool,

    /// Number of tags deleted in parallel
    #[arg(long, value_parser = parse_concurrency)]
    pub concurrency: Option<usize>,

    /// Request timeout in seconds
    #[arg(long, value_parser = parse_timeout)]
    pub timeout: Option<u64>,
}

impl CleanArgs {
    /// Settings given on the command line.
    fn to_settings(&self) -> Settings {
        Settings {
            repository: self.repository.clone(),
            registry_url: self.registry_url.clone(),
            suffixes: self.suffixes.as_deref().map(split_list),
            min_version: self.min_version.clone(),
            excluded: self.excluded.as_deref().map(split_list),
            concurrency: self.concurrency,
        }
    }
}

fn parse_concurrency(value: &str) -> std::result::Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

fn parse_timeout(value: &str) -> std::result::Result<u64, String> {
    match value.parse::<u64>() {
        Ok(0) => Err("must be at least 1 second".to_string()),
        Ok(secs) => Ok(secs),
        Err(e) => Err(e.to_string()),
    }
}

/// Runs a cleanup.
///
/// # Errors
///
/// Returns an error if:
/// - The repository or registry URL is missing
/// - No credential is stored for the registry
/// - Tags cannot be listed or the repository has no tags
/// - A prompt fails
pub async fn execute(args: &CleanArgs) -> Result<()> {
    let settings = resolve_settings(args)?;
    let repository = settings.require_repository()?.to_string();
    let registry_url = settings.require_registry_url()?;

    let mut config = RegistryConfig::new(registry_url);
    if let Some(secs) = args.timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    // Credentials are resolved before any request is sent
    let host = config.host()?;
    let store_path = credential_path(args.credentials_file.as_deref())?;
    let store = CredentialStore::load(&store_path)?;
    let auth = store.auth_for(&host)?;
    config = config.with_auth(auth);

    info!(
        registry = %config.url,
        repository = %repository,
        "Starting cleanup"
    );

    let client = RegistryClient::new(config).context("Failed to create registry client")?;
    let options = CleanupOptions::new(&repository, settings.retention_rules())
        .with_interactive(args.interactive)
        .with_auto_confirm(args.yes)
        .with_dry_run(args.dry_run)
        .with_concurrency(settings.concurrency.unwrap_or(1));

    let orchestrator = CleanupOrchestrator::new(client, options);
    let report = match orchestrator.run(&mut TerminalConfirmer::new()).await {
        Ok(report) => report,
        Err(e) if e.is_empty_repository() => {
            anyhow::bail!("No tags found in repository '{repository}'")
        }
        Err(e) => return Err(e.into()),
    };

    print!("{}", render_report(&report));
    Ok(())
}

/// Layers command-line settings over the settings file, if one is given.
fn resolve_settings(args: &CleanArgs) -> Result<Settings> {
    let file = match args.settings_file {
        Some(ref path) => Settings::from_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };
    Ok(file.merge(args.to_settings()))
}

fn credential_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => CredentialStore::default_path()
            .context("Cannot locate the credential store, pass --credentials-file"),
    }
}

/// Formats the end-of-run summary.
fn render_report(report: &CleanupReport) -> String {
    let mut out = String::new();
    match report.state() {
        CleanupState::Aborted(AbortReason::NothingToDelete) => {
            out.push_str("Nothing to delete.\n");
        }
        CleanupState::Aborted(AbortReason::DryRun) => {
            out.push_str(&format!(
                "Dry run: {} tag(s) would be deleted.\n",
                report.partition.delete.len()
            ));
        }
        CleanupState::Aborted(reason) => {
            out.push_str(&format!(
                "Cancelled ({}), nothing was deleted.\n",
                reason.as_str()
            ));
        }
        _ => {
            out.push('\n');
            out.push_str(&format!(
                "Processed {} tag(s) in {}: {} deleted, {} failed, {} without digest\n",
                report.processed(),
                report.repository,
                report.deleted(),
                report.failed(),
                report.digest_not_found()
            ));
            for result in report.failures() {
                out.push_str(&format!("  ✗ {}: {}\n", result.tag, result.outcome));
            }
            out.push('\n');
            out.push_str(
                "Note: storage is reclaimed only after the registry runs garbage collection.\n",
            );
        }
    }
    out
}
