//! The retention decision engine.
//!
//! Rules are evaluated in a fixed order and the first match wins:
//!
//! 1. excluded tags are kept,
//! 2. tags ending with a configured suffix are deleted (first suffix in
//!    configured order is reported),
//! 3. `MAJOR.MINOR.PATCH` tags below the version floor are deleted,
//! 4. everything else is kept.
//!
//! The suffix rule runs before the version rule, so `1.5.0-SNAPSHOT` under a
//! `2.0.0` floor reports its suffix.

use crate::decision::{DeleteReason, KeepReason, Verdict};
use crate::rules::RetentionRules;
use crate::version::VersionComparator;

/// Applies [`RetentionRules`] to tags.
#[derive(Debug, Clone)]
pub struct RetentionEngine {
    rules: RetentionRules,
}

impl RetentionEngine {
    /// Creates an engine for the given rules.
    ///
    /// A version floor that is not a dotted numeric version is accepted but
    /// logged, because comparisons against it fall back to string ordering.
    #[must_use]
    pub fn new(rules: RetentionRules) -> Self {
        if let Some(floor) = rules.min_version() {
            if !VersionComparator::is_well_formed(floor) {
                tracing::warn!(
                    min_version = floor,
                    "Minimum version is not numeric, falling back to string comparison"
                );
            }
        }
        Self { rules }
    }

    /// Returns the rules this engine applies.
    #[must_use]
    pub const fn rules(&self) -> &RetentionRules {
        &self.rules
    }

    /// Decides the fate of a single tag.
    ///
    /// # Examples
    ///
    /// ```
    /// use regprune_core::{DeleteReason, KeepReason, RetentionEngine, RetentionRules, Verdict};
    ///
    /// let engine = RetentionEngine::new(
    ///     RetentionRules::new()
    ///         .with_suffixes(["-SNAPSHOT"])
    ///         .with_min_version("2.0.0")
    ///         .with_excluded(["latest"]),
    /// );
    ///
    /// assert_eq!(engine.decide("latest"), Verdict::Keep(KeepReason::Excluded));
    /// assert_eq!(
    ///     engine.decide("1.0.0"),
    ///     Verdict::Delete(DeleteReason::BelowMinVersion("2.0.0".into()))
    /// );
    /// assert_eq!(engine.decide("2.0.0"), Verdict::Keep(KeepReason::NoRuleMatched));
    /// ```
    #[must_use]
    pub fn decide(&self, tag: &str) -> Verdict {
        if self.rules.is_excluded(tag) {
            return Verdict::Keep(KeepReason::Excluded);
        }

        if let Some(suffix) = self
            .rules
            .delete_suffixes()
            .iter()
            .find(|suffix| tag.ends_with(suffix.as_str()))
        {
            return Verdict::Delete(DeleteReason::Suffix(suffix.clone()));
        }

        if let Some(floor) = self.rules.min_version() {
            if VersionComparator::has_release_prefix(tag)
                && VersionComparator::is_less_than(tag, floor)
            {
                return Verdict::Delete(DeleteReason::BelowMinVersion(floor.to_string()));
            }
        }

        Verdict::Keep(KeepReason::NoRuleMatched)
    }

    /// Splits `tags` into kept and deleted tags, preserving input order.
    ///
    /// Every input tag lands in exactly one side of the result.
    #[must_use]
    pub fn partition<S: AsRef<str>>(&self, tags: &[S]) -> Partition {
        let mut partition = Partition::default();

        for tag in tags {
            let tag = tag.as_ref();
            match self.decide(tag) {
                Verdict::Keep(reason) => partition.keep.push(KeptTag {
                    tag: tag.to_string(),
                    reason,
                }),
                Verdict::Delete(reason) => partition.delete.push(DeletionCandidate {
                    tag: tag.to_string(),
                    reason,
                }),
            }
        }

        tracing::debug!(
            kept = partition.keep.len(),
            deleted = partition.delete.len(),
            "Partitioned tags"
        );
        partition
    }
}

/// A tag that survives the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeptTag {
    /// Tag name.
    pub tag: String,
    /// Why it is kept.
    pub reason: KeepReason,
}

/// A tag scheduled for deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionCandidate {
    /// Tag name.
    pub tag: String,
    /// Why it is deleted.
    pub reason: DeleteReason,
}

/// Tags split by verdict, each side in listing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    /// Tags that are kept.
    pub keep: Vec<KeptTag>,
    /// Tags that are deleted.
    pub delete: Vec<DeletionCandidate>,
}

impl Partition {
    /// Returns true if nothing would be deleted.
    #[must_use]
    pub fn nothing_to_delete(&self) -> bool {
        self.delete.is_empty()
    }

    /// Total number of tags in the partition.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keep.len() + self.delete.len()
    }

    /// Returns true if the partition holds no tags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
