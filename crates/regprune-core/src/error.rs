//! Error types for settings loading and validation.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`ConfigError`] as the error type.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while reading or validating configuration.
///
/// Line-level variants are recoverable: the settings parser reports them and
/// skips the offending line. The remaining variants are fatal for a run.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A settings line is not of the form `KEY=value`.
    #[error("Malformed settings line {line_number}: '{line}'")]
    MalformedLine {
        /// 1-based line number.
        line_number: usize,
        /// Offending line content.
        line: String,
    },

    /// A settings key is not recognised.
    #[error("Unknown settings key '{key}' on line {line_number}")]
    UnknownKey {
        /// 1-based line number.
        line_number: usize,
        /// Key as written in the file.
        key: String,
    },

    /// A recognised key carries a value that cannot be used.
    #[error("Invalid value for {key} on line {line_number}: {reason}")]
    InvalidValue {
        /// 1-based line number.
        line_number: usize,
        /// Normalised key name.
        key: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// The settings file could not be read.
    #[error("Failed to read settings file {path}: {source}")]
    Io {
        /// Path of the settings file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A value required for a run is absent after merging all sources.
    #[error("Missing required setting: {name}")]
    MissingValue {
        /// Name of the missing setting.
        name: &'static str,
    },
}

impl ConfigError {
    /// Returns true if the error only affects a single settings line.
    #[must_use]
    pub const fn is_line_level(&self) -> bool {
        matches!(
            self,
            Self::MalformedLine { .. } | Self::UnknownKey { .. } | Self::InvalidValue { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_malformed_line() {
        let err = ConfigError::MalformedLine {
            line_number: 3,
            line: "oops".to_string(),
        };
        assert_eq!(err.to_string(), "Malformed settings line 3: 'oops'");
    }

    #[test]
    fn test_error_display_missing_value() {
        let err = ConfigError::MissingValue { name: "repository" };
        assert_eq!(err.to_string(), "Missing required setting: repository");
    }

    #[test]
    fn test_line_level_classification() {
        let line = ConfigError::UnknownKey {
            line_number: 1,
            key: "FOO".to_string(),
        };
        assert!(line.is_line_level());

        let fatal = ConfigError::MissingValue {
            name: "registry_url",
        };
        assert!(!fatal.is_line_level());
    }
}
