//! Error types for registry operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Failed to connect to registry.
    #[error("Failed to connect to registry at {url}: {source}")]
    ConnectionFailed {
        /// Registry URL.
        url: String,
        /// Underlying error.
        #[source]
        source: reqwest::Error,
    },

    /// The credential store could not be read.
    #[error("Failed to read credential store {path}: {source}")]
    CredentialStoreUnreadable {
        /// Credential store path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The credential store is not valid JSON.
    #[error("Credential store {path} is not valid JSON: {source}")]
    CredentialStoreInvalid {
        /// Credential store path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// No usable credential is stored for the registry host.
    #[error("No stored credential for registry host '{host}'")]
    MissingCredentials {
        /// Registry host.
        host: String,
    },

    /// Authentication failed.
    #[error("Authentication failed: {message}")]
    AuthenticationFailed {
        /// Error message.
        message: String,
    },

    /// The repository has no tags.
    #[error("No tags found in repository '{repository}'")]
    EmptyRepository {
        /// Repository name.
        repository: String,
    },

    /// HTTP error from registry.
    #[error("HTTP error from registry: {status} - {message}")]
    HttpError {
        /// HTTP status code.
        status: u16,
        /// Error message.
        message: String,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {source}")]
    JsonError {
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// A pagination link points outside the registry.
    #[error("Refusing to follow pagination link outside the registry: {link}")]
    UntrustedLink {
        /// Resolved link target.
        link: String,
    },

    /// Invalid URL.
    #[error("Invalid registry URL: {url}")]
    InvalidUrl {
        /// URL string.
        url: String,
    },
}

impl RegistryError {
    /// Returns true for credential problems. These are detected before any
    /// request is sent.
    #[must_use]
    pub const fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Self::CredentialStoreUnreadable { .. }
                | Self::CredentialStoreInvalid { .. }
                | Self::MissingCredentials { .. }
                | Self::AuthenticationFailed { .. }
        )
    }

    /// Returns true for transport failures and unexpected HTTP responses.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed { .. }
                | Self::HttpError { .. }
                | Self::JsonError { .. }
                | Self::UntrustedLink { .. }
        )
    }
}

impl From<reqwest::Error> for RegistryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            Self::ConnectionFailed {
                url: err
                    .url()
                    .map_or_else(|| "unknown".to_string(), ToString::to_string),
                source: err,
            }
        } else if err.is_status() {
            let status = err.status().map_or(0, |s| s.as_u16());
            Self::HttpError {
                status,
                message: err.to_string(),
            }
        } else {
            Self::HttpError {
                status: 0,
                message: err.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for RegistryError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError { source: err }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_missing_credentials() {
        let err = RegistryError::MissingCredentials {
            host: "registry.example.com".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "No stored credential for registry host 'registry.example.com'"
        );
        assert!(err.is_auth_error());
        assert!(!err.is_network_error());
    }

    #[test]
    fn test_error_display_empty_repository() {
        let err = RegistryError::EmptyRepository {
            repository: "team/api".to_string(),
        };
        assert_eq!(err.to_string(), "No tags found in repository 'team/api'");
        assert!(!err.is_auth_error());
        assert!(!err.is_network_error());
    }

    #[test]
    fn test_error_display_http() {
        let err = RegistryError::HttpError {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP error from registry: 500 - boom");
        assert!(err.is_network_error());
    }
}
