//! Retention verdicts.
//!
//! A [`Verdict`] is the outcome of running a single tag through the retention
//! rules. Both arms carry a reason so that the preview shown before deletion
//! can explain every decision.

use std::fmt;

/// Why a tag is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeepReason {
    /// The tag is on the exclusion list.
    Excluded,
    /// No deletion rule matched.
    NoRuleMatched,
}

impl fmt::Display for KeepReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Excluded => write!(f, "excluded tag"),
            Self::NoRuleMatched => write!(f, "keeping"),
        }
    }
}

/// Why a tag is deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteReason {
    /// The tag ends with a configured suffix.
    Suffix(String),
    /// The tag's version is below the configured floor.
    BelowMinVersion(String),
}

impl fmt::Display for DeleteReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Suffix(suffix) => write!(f, "ends with {suffix}"),
            Self::BelowMinVersion(floor) => write!(f, "version < {floor}"),
        }
    }
}

/// The retention decision for one tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Leave the tag in place.
    Keep(KeepReason),
    /// Delete the tag's manifest.
    Delete(DeleteReason),
}

impl Verdict {
    /// Returns true if the tag should be deleted.
    #[must_use]
    pub const fn is_delete(&self) -> bool {
        matches!(self, Self::Delete(_))
    }

    /// Returns true if the tag should be kept.
    #[must_use]
    pub const fn is_keep(&self) -> bool {
        matches!(self, Self::Keep(_))
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keep(reason) => write!(f, "{reason}"),
            Self::Delete(reason) => write!(f, "{reason}"),
        }
    }
}
