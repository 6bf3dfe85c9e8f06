//! Aggregated results of a cleanup run.

use std::fmt;

use regprune_core::{DeleteReason, Partition};
use regprune_registry::DeletionOutcome;

use crate::state::{AbortReason, CleanupState};

/// What happened to a single deletion candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagOutcome {
    /// The manifest was deleted.
    Deleted {
        /// Deleted digest.
        digest: String,
    },
    /// The tag no longer resolved to a digest.
    DigestNotFound,
    /// The registry refused the deletion.
    Failed {
        /// HTTP status code.
        status: u16,
        /// Registry error detail.
        message: String,
    },
    /// A request for this tag could not be completed.
    Errored {
        /// Error description.
        message: String,
    },
}

impl From<DeletionOutcome> for TagOutcome {
    fn from(outcome: DeletionOutcome) -> Self {
        match outcome {
            DeletionOutcome::Deleted { digest } => Self::Deleted { digest },
            DeletionOutcome::Failed { status, message } => Self::Failed { status, message },
        }
    }
}

impl fmt::Display for TagOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deleted { digest } => write!(f, "deleted {digest}"),
            Self::DigestNotFound => write!(f, "digest not found, skipped"),
            Self::Failed { status, message } if message.is_empty() => {
                write!(f, "deletion failed with HTTP {status}")
            }
            Self::Failed { status, message } => {
                write!(f, "deletion failed with HTTP {status}: {message}")
            }
            Self::Errored { message } => write!(f, "error: {message}"),
        }
    }
}

/// Result for one deletion candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagResult {
    /// Tag name.
    pub tag: String,
    /// Why the tag was selected for deletion.
    pub reason: DeleteReason,
    /// What happened.
    pub outcome: TagOutcome,
}

impl TagResult {
    /// Returns true if the tag's manifest was deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        matches!(self.outcome, TagOutcome::Deleted { .. })
    }
}

/// Summary of a cleanup run.
#[derive(Debug, Clone)]
pub struct CleanupReport {
    /// Repository that was cleaned.
    pub repository: String,
    /// States visited, in order.
    pub states: Vec<CleanupState>,
    /// Tags split by verdict.
    pub partition: Partition,
    /// Per-tag results, in listing order. Empty unless the run reached
    /// deletion.
    pub results: Vec<TagResult>,
}

impl CleanupReport {
    pub(crate) fn new(repository: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            states: vec![CleanupState::Configuring],
            partition: Partition::default(),
            results: Vec::new(),
        }
    }

    /// Moves the run to `next`, logging the transition.
    pub(crate) fn transition(&mut self, next: CleanupState) {
        let current = self.state();
        debug_assert!(
            current.can_transition_to(next),
            "illegal transition {current} -> {next}"
        );
        tracing::debug!(from = %current, to = %next, "Cleanup state transition");
        self.states.push(next);
    }

    /// The state the run ended in.
    #[must_use]
    pub fn state(&self) -> CleanupState {
        self.states
            .last()
            .copied()
            .unwrap_or(CleanupState::Configuring)
    }

    /// The abort reason, if the run stopped early.
    #[must_use]
    pub fn abort_reason(&self) -> Option<AbortReason> {
        match self.state() {
            CleanupState::Aborted(reason) => Some(reason),
            _ => None,
        }
    }

    /// Number of tags a deletion was attempted for.
    #[must_use]
    pub fn processed(&self) -> usize {
        self.results.len()
    }

    /// Number of tags whose manifest was deleted.
    #[must_use]
    pub fn deleted(&self) -> usize {
        self.results.iter().filter(|r| r.is_deleted()).count()
    }

    /// Number of tags whose digest could not be resolved.
    #[must_use]
    pub fn digest_not_found(&self) -> usize {
        self.count(|o| matches!(o, TagOutcome::DigestNotFound))
    }

    /// Number of tags the registry refused or that hit a request error.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, TagOutcome::Failed { .. } | TagOutcome::Errored { .. }))
    }

    /// Per-tag results that did not end in a deletion.
    pub fn failures(&self) -> impl Iterator<Item = &TagResult> {
        self.results.iter().filter(|r| !r.is_deleted())
    }

    /// Returns true if every attempted deletion succeeded.
    #[must_use]
    pub fn is_fully_successful(&self) -> bool {
        self.results.iter().all(TagResult::is_deleted)
    }

    fn count(&self, predicate: impl Fn(&TagOutcome) -> bool) -> usize {
        self.results.iter().filter(|r| predicate(&r.outcome)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(tag: &str, outcome: TagOutcome) -> TagResult {
        TagResult {
            tag: tag.to_string(),
            reason: DeleteReason::Suffix("-dev".to_string()),
            outcome,
        }
    }

    #[test]
    fn test_counts() {
        let mut report = CleanupReport::new("team/api");
        report.results = vec![
            result(
                "a-dev",
                TagOutcome::Deleted {
                    digest: "sha256:a".to_string(),
                },
            ),
            result("b-dev", TagOutcome::DigestNotFound),
            result(
                "c-dev",
                TagOutcome::Failed {
                    status: 405,
                    message: String::new(),
                },
            ),
            result(
                "d-dev",
                TagOutcome::Errored {
                    message: "connection reset".to_string(),
                },
            ),
        ];

        assert_eq!(report.processed(), 4);
        assert_eq!(report.deleted(), 1);
        assert_eq!(report.digest_not_found(), 1);
        assert_eq!(report.failed(), 2);
        assert_eq!(report.failures().count(), 3);
        assert!(!report.is_fully_successful());
    }

    #[test]
    fn test_state_tracking() {
        let mut report = CleanupReport::new("team/api");
        assert_eq!(report.state(), CleanupState::Configuring);

        report.transition(CleanupState::Listing);
        report.transition(CleanupState::Partitioning);
        report.transition(CleanupState::Aborted(AbortReason::NothingToDelete));

        assert_eq!(report.abort_reason(), Some(AbortReason::NothingToDelete));
        assert_eq!(report.states.len(), 4);
        assert!(report.is_fully_successful());
    }

    #[test]
    fn test_outcome_from_deletion_outcome() {
        assert_eq!(
            TagOutcome::from(DeletionOutcome::Failed {
                status: 404,
                message: "gone".to_string()
            }),
            TagOutcome::Failed {
                status: 404,
                message: "gone".to_string()
            }
        );
        assert_eq!(
            TagOutcome::DigestNotFound.to_string(),
            "digest not found, skipped"
        );
    }
}
