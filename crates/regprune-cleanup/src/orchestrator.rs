//! End-to-end cleanup runs.
//!
//! A run lists the repository's tags, partitions them with the retention
//! engine, passes two confirmation gates, then resolves and deletes each
//! candidate. Anything that goes wrong before the gates aborts the run;
//! anything that goes wrong while deleting is recorded for that tag only.

use futures::stream::{self, StreamExt};
use regprune_core::{DeletionCandidate, RetentionEngine, RetentionRules};

use crate::confirm::Confirmer;
use crate::error::{CleanupError, Result};
use crate::registry::TagRegistry;
use crate::report::{CleanupReport, TagOutcome, TagResult};
use crate::state::{AbortReason, CleanupState};

/// Settings for a single cleanup run.
#[derive(Debug, Clone)]
pub struct CleanupOptions {
    /// Repository to clean.
    pub repository: String,
    /// Retention rules from configuration.
    pub rules: RetentionRules,
    /// Ask for the rules interactively even if some are configured.
    pub interactive: bool,
    /// Skip both confirmation gates.
    pub auto_confirm: bool,
    /// Stop after showing the partition.
    pub dry_run: bool,
    /// Deletions allowed in flight at once.
    pub concurrency: usize,
}

impl CleanupOptions {
    /// Creates sequential, fully confirmed options.
    #[must_use]
    pub fn new(repository: impl Into<String>, rules: RetentionRules) -> Self {
        Self {
            repository: repository.into(),
            rules,
            interactive: false,
            auto_confirm: false,
            dry_run: false,
            concurrency: 1,
        }
    }

    /// Sets interactive rule collection.
    #[must_use]
    pub const fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Sets whether confirmation gates are skipped.
    #[must_use]
    pub const fn with_auto_confirm(mut self, auto_confirm: bool) -> Self {
        self.auto_confirm = auto_confirm;
        self
    }

    /// Sets preview-only mode.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Sets the deletion concurrency. Values below 1 are treated as 1.
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }
}

/// Drives a cleanup run against a [`TagRegistry`].
#[derive(Debug)]
pub struct CleanupOrchestrator<R> {
    registry: R,
    options: CleanupOptions,
}

impl<R: TagRegistry> CleanupOrchestrator<R> {
    /// Creates an orchestrator.
    pub const fn new(registry: R, options: CleanupOptions) -> Self {
        Self { registry, options }
    }

    /// Returns the run options.
    pub const fn options(&self) -> &CleanupOptions {
        &self.options
    }

    /// Returns the registry the run talks to.
    pub const fn registry(&self) -> &R {
        &self.registry
    }

    /// Runs the cleanup.
    ///
    /// Returns a report for every run that got past listing, including runs
    /// aborted at a confirmation gate.
    ///
    /// # Errors
    ///
    /// Returns [`CleanupError::Listing`] if tags cannot be listed or the
    /// repository is empty, and [`CleanupError::Prompt`] if the confirmer
    /// fails. Nothing has been deleted in either case.
    pub async fn run<C>(&self, confirmer: &mut C) -> Result<CleanupReport>
    where
        C: Confirmer + ?Sized,
    {
        let repository = self.options.repository.as_str();
        let mut report = CleanupReport::new(repository);

        let rules = if self.options.interactive || self.options.rules.is_empty() {
            confirmer.collect_rules(&self.options.rules)?
        } else {
            self.options.rules.clone()
        };
        let engine = RetentionEngine::new(rules);

        report.transition(CleanupState::Listing);
        let tags = match self.registry.list_tags(repository).await {
            Ok(tags) => tags,
            Err(source) => {
                report.transition(CleanupState::Aborted(AbortReason::ListingFailed));
                tracing::error!(repository, error = %source, "Listing tags failed");
                return Err(CleanupError::Listing {
                    repository: repository.to_string(),
                    source,
                });
            }
        };

        report.transition(CleanupState::Partitioning);
        report.partition = engine.partition(&tags);
        confirmer.show_partition(repository, &report.partition)?;

        if report.partition.nothing_to_delete() {
            tracing::info!(repository, "No tags match the deletion rules");
            report.transition(CleanupState::Aborted(AbortReason::NothingToDelete));
            return Ok(report);
        }

        if self.options.dry_run {
            tracing::info!(
                repository,
                candidates = report.partition.delete.len(),
                "Dry run, nothing deleted"
            );
            report.transition(CleanupState::Aborted(AbortReason::DryRun));
            return Ok(report);
        }

        report.transition(CleanupState::ConfirmingPreview);
        if !self.options.auto_confirm && !confirmer.confirm_preview(&report.partition)? {
            tracing::info!(repository, "Preview declined");
            report.transition(CleanupState::Aborted(AbortReason::DeclinedPreview));
            return Ok(report);
        }

        report.transition(CleanupState::ConfirmingDeletion);
        if !self.options.auto_confirm
            && !confirmer.confirm_deletion(repository, report.partition.delete.len())?
        {
            tracing::info!(repository, "Deletion declined");
            report.transition(CleanupState::Aborted(AbortReason::DeclinedDeletion));
            return Ok(report);
        }

        report.transition(CleanupState::Deleting);
        report.results = self.delete_all(&report.partition.delete).await;
        report.transition(CleanupState::Done);

        tracing::info!(
            repository,
            processed = report.processed(),
            deleted = report.deleted(),
            failed = report.failed(),
            digest_not_found = report.digest_not_found(),
            "Cleanup finished"
        );
        Ok(report)
    }

    /// Deletes every candidate, keeping results in candidate order.
    async fn delete_all(&self, candidates: &[DeletionCandidate]) -> Vec<TagResult> {
        stream::iter(candidates)
            .map(|candidate| self.delete_one(candidate))
            .buffered(self.options.concurrency.max(1))
            .collect()
            .await
    }

    async fn delete_one(&self, candidate: &DeletionCandidate) -> TagResult {
        let repository = self.options.repository.as_str();
        let tag = candidate.tag.as_str();

        let outcome = match self.registry.resolve_digest(repository, tag).await {
            Ok(Some(digest)) => match self.registry.delete_manifest(repository, &digest).await {
                Ok(outcome) => TagOutcome::from(outcome),
                Err(e) => TagOutcome::Errored {
                    message: e.to_string(),
                },
            },
            Ok(None) => TagOutcome::DigestNotFound,
            Err(e) => TagOutcome::Errored {
                message: e.to_string(),
            },
        };

        match outcome {
            TagOutcome::Deleted { ref digest } => {
                tracing::info!(repository, tag, %digest, reason = %candidate.reason, "Deleted tag");
            }
            ref failure => {
                tracing::warn!(repository, tag, outcome = %failure, "Tag not deleted");
            }
        }

        TagResult {
            tag: candidate.tag.clone(),
            reason: candidate.reason.clone(),
            outcome,
        }
    }
}
