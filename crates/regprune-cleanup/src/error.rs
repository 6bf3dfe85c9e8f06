//! Error types for cleanup runs.
//!
//! Only problems found before anything is deleted surface as errors. Failures
//! while deleting are recorded per tag in the report instead.

use regprune_registry::RegistryError;
use thiserror::Error;

/// Result type alias for cleanup operations.
pub type Result<T> = std::result::Result<T, CleanupError>;

/// Errors that abort a cleanup run.
#[derive(Error, Debug)]
pub enum CleanupError {
    /// The tag list could not be obtained, or it was empty.
    #[error("Failed to list tags of '{repository}': {source}")]
    Listing {
        /// Repository name.
        repository: String,
        /// Underlying registry error.
        #[source]
        source: RegistryError,
    },

    /// Reading an answer from the user failed.
    #[error("Prompt failed: {source}")]
    Prompt {
        /// Underlying prompt error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl CleanupError {
    /// Wraps a prompt backend error.
    pub fn prompt(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Prompt {
            source: source.into(),
        }
    }

    /// Returns true if the run stopped because the repository has no tags.
    #[must_use]
    pub const fn is_empty_repository(&self) -> bool {
        matches!(
            self,
            Self::Listing {
                source: RegistryError::EmptyRepository { .. },
                ..
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_error_display() {
        let err = CleanupError::Listing {
            repository: "team/api".to_string(),
            source: RegistryError::EmptyRepository {
                repository: "team/api".to_string(),
            },
        };
        assert_eq!(
            err.to_string(),
            "Failed to list tags of 'team/api': No tags found in repository 'team/api'"
        );
        assert!(err.is_empty_repository());
    }

    #[test]
    fn test_prompt_error() {
        let err = CleanupError::prompt("terminal closed");
        assert_eq!(err.to_string(), "Prompt failed: terminal closed");
        assert!(!err.is_empty_repository());
    }
}
