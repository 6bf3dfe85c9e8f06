//! Per-tag deletion results.

use std::fmt;

/// The result of trying to delete one tag's manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionOutcome {
    /// The registry accepted the deletion (HTTP 202).
    Deleted {
        /// Digest that was deleted.
        digest: String,
    },

    /// The registry answered with any status other than 202.
    Failed {
        /// HTTP status code.
        status: u16,
        /// Registry error detail, if the response carried one.
        message: String,
    },
}

impl DeletionOutcome {
    /// Returns true if the manifest was deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        matches!(self, Self::Deleted { .. })
    }
}

impl fmt::Display for DeletionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deleted { digest } => write!(f, "deleted {digest}"),
            Self::Failed { status, message } if message.is_empty() => {
                write!(f, "deletion failed with HTTP {status}")
            }
            Self::Failed { status, message } => {
                write!(f, "deletion failed with HTTP {status}: {message}")
            }
        }
    }
}
