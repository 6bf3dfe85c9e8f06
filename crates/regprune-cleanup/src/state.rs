//! Cleanup run states.
//!
//! ```text
//! Configuring -> Listing -> Partitioning -> ConfirmingPreview
//!                  |            |                 |
//!                  |            |                 v
//!                  |            |          ConfirmingDeletion -> Deleting -> Done
//!                  |            |                 |
//!                  +------------+-----------------+--> Aborted
//! ```

use std::fmt;

/// Why a run stopped before deleting anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// Listing failed or returned no tags.
    ListingFailed,
    /// No tag matched a deletion rule.
    NothingToDelete,
    /// Preview only; nothing is confirmed or deleted.
    DryRun,
    /// The user declined the preview.
    DeclinedPreview,
    /// The user declined the final deletion prompt.
    DeclinedDeletion,
}

impl AbortReason {
    /// Returns true if the abort should be reported as a failure.
    #[must_use]
    pub const fn is_failure(self) -> bool {
        matches!(self, Self::ListingFailed)
    }

    /// Returns a string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ListingFailed => "listing failed",
            Self::NothingToDelete => "nothing to delete",
            Self::DryRun => "dry run",
            Self::DeclinedPreview => "declined preview",
            Self::DeclinedDeletion => "declined deletion",
        }
    }
}

/// A step of a cleanup run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupState {
    /// Assembling retention rules.
    Configuring,
    /// Fetching the tag list.
    Listing,
    /// Applying the retention rules.
    Partitioning,
    /// Waiting for the user to accept the preview.
    ConfirmingPreview,
    /// Waiting for the user to accept irreversible deletion.
    ConfirmingDeletion,
    /// Deleting manifests.
    Deleting,
    /// Finished deleting.
    Done,
    /// Stopped early.
    Aborted(AbortReason),
}

impl CleanupState {
    /// Returns true if no further transition is possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Aborted(_))
    }

    /// Returns true if moving from `self` to `next` is a legal transition.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Configuring, Self::Listing)
                | (Self::Listing, Self::Partitioning)
                | (Self::Listing, Self::Aborted(AbortReason::ListingFailed))
                | (Self::Partitioning, Self::ConfirmingPreview)
                | (
                    Self::Partitioning,
                    Self::Aborted(AbortReason::NothingToDelete | AbortReason::DryRun)
                )
                | (Self::ConfirmingPreview, Self::ConfirmingDeletion)
                | (Self::ConfirmingPreview, Self::Aborted(AbortReason::DeclinedPreview))
                | (Self::ConfirmingDeletion, Self::Deleting)
                | (Self::ConfirmingDeletion, Self::Aborted(AbortReason::DeclinedDeletion))
                | (Self::Deleting, Self::Done)
        )
    }
}

impl fmt::Display for CleanupState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuring => write!(f, "configuring"),
            Self::Listing => write!(f, "listing"),
            Self::Partitioning => write!(f, "partitioning"),
            Self::ConfirmingPreview => write!(f, "confirming_preview"),
            Self::ConfirmingDeletion => write!(f, "confirming_deletion"),
            Self::Deleting => write!(f, "deleting"),
            Self::Done => write!(f, "done"),
            Self::Aborted(reason) => write!(f, "aborted ({})", reason.as_str()),
        }
    }
}
