//! Typed run settings and the `KEY=value` settings file format.
//!
//! ```text
//! # regprune.conf
//! REPOSITORY=team/api
//! REGISTRY_URL=registry.example.com
//! SUFFIXES=-SNAPSHOT,-dev
//! MIN_VERSION=2.0.0
//! EXCLUDED="latest,stable"
//! ```
//!
//! Keys are case-insensitive and `-` is accepted in place of `_`. Blank lines
//! and lines starting with `#` are skipped. Lines that cannot be used are
//! reported and skipped; they never abort loading.

use std::path::Path;

use crate::error::{ConfigError, Result};
use crate::rules::RetentionRules;

/// Settings for one cleanup run, gathered from a settings file and the
/// command line.
///
/// Every field is optional so that sources can be layered with
/// [`Settings::merge`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Repository path inside the registry (e.g. `team/api`).
    pub repository: Option<String>,
    /// Registry base URL or host.
    pub registry_url: Option<String>,
    /// Deletion suffixes in priority order.
    pub suffixes: Option<Vec<String>>,
    /// Version floor.
    pub min_version: Option<String>,
    /// Tags that are never deleted.
    pub excluded: Option<Vec<String>>,
    /// Number of deletions allowed in flight at once.
    pub concurrency: Option<usize>,
}

/// Recognised settings keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Key {
    Repository,
    RegistryUrl,
    Suffixes,
    MinVersion,
    Excluded,
    Concurrency,
}

impl Key {
    fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_uppercase().replace('-', "_");
        match normalized.as_str() {
            "REPOSITORY" => Some(Self::Repository),
            "REGISTRY_URL" => Some(Self::RegistryUrl),
            "SUFFIXES" => Some(Self::Suffixes),
            "MIN_VERSION" => Some(Self::MinVersion),
            "EXCLUDED" => Some(Self::Excluded),
            "CONCURRENCY" => Some(Self::Concurrency),
            _ => None,
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Repository => "REPOSITORY",
            Self::RegistryUrl => "REGISTRY_URL",
            Self::Suffixes => "SUFFIXES",
            Self::MinVersion => "MIN_VERSION",
            Self::Excluded => "EXCLUDED",
            Self::Concurrency => "CONCURRENCY",
        }
    }
}

impl Settings {
    /// Parses settings text, logging and skipping unusable lines.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let (settings, issues) = Self::parse_with_issues(input);
        for issue in &issues {
            tracing::warn!(error = %issue, "Skipping settings line");
        }
        settings
    }

    /// Parses settings text and returns every line-level problem alongside
    /// the settings that could be read.
    ///
    /// # Examples
    ///
    /// ```
    /// use regprune_core::Settings;
    ///
    /// let (settings, issues) = Settings::parse_with_issues(
    ///     "REPOSITORY=team/api\nSUFFIXES=-SNAPSHOT, -dev\nnot a setting\n",
    /// );
    ///
    /// assert_eq!(settings.repository.as_deref(), Some("team/api"));
    /// assert_eq!(
    ///     settings.suffixes,
    ///     Some(vec!["-SNAPSHOT".to_string(), "-dev".to_string()])
    /// );
    /// assert_eq!(issues.len(), 1);
    /// ```
    #[must_use]
    pub fn parse_with_issues(input: &str) -> (Self, Vec<ConfigError>) {
        let mut settings = Self::default();
        let mut issues = Vec::new();

        for (index, raw_line) in input.lines().enumerate() {
            let line_number = index + 1;
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((raw_key, raw_value)) = line.split_once('=') else {
                issues.push(ConfigError::MalformedLine {
                    line_number,
                    line: line.to_string(),
                });
                continue;
            };

            if raw_key.trim().is_empty() {
                issues.push(ConfigError::MalformedLine {
                    line_number,
                    line: line.to_string(),
                });
                continue;
            }

            let Some(key) = Key::parse(raw_key) else {
                issues.push(ConfigError::UnknownKey {
                    line_number,
                    key: raw_key.trim().to_string(),
                });
                continue;
            };

            let value = unquote(raw_value.trim());
            if let Err(reason) = settings.apply(key, value) {
                issues.push(ConfigError::InvalidValue {
                    line_number,
                    key: key.name().to_string(),
                    reason,
                });
            }
        }

        (settings, issues)
    }

    /// Reads and parses a settings file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read. Problems with
    /// individual lines are logged and skipped.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "Loaded settings file");
        Ok(Self::parse(&contents))
    }

    /// Layers `overrides` on top of `self`; any value set in `overrides`
    /// wins.
    #[must_use]
    pub fn merge(self, overrides: Self) -> Self {
        Self {
            repository: overrides.repository.or(self.repository),
            registry_url: overrides.registry_url.or(self.registry_url),
            suffixes: overrides.suffixes.or(self.suffixes),
            min_version: overrides.min_version.or(self.min_version),
            excluded: overrides.excluded.or(self.excluded),
            concurrency: overrides.concurrency.or(self.concurrency),
        }
    }

    /// Builds the retention rules described by these settings.
    #[must_use]
    pub fn retention_rules(&self) -> RetentionRules {
        let mut rules = RetentionRules::new();
        if let Some(ref suffixes) = self.suffixes {
            rules = rules.with_suffixes(suffixes.iter().cloned());
        }
        if let Some(ref floor) = self.min_version {
            rules = rules.with_min_version(floor.clone());
        }
        if let Some(ref excluded) = self.excluded {
            rules = rules.with_excluded(excluded.iter().cloned());
        }
        rules
    }

    /// Returns the repository, or an error if none was configured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingValue`] if the repository is unset.
    pub fn require_repository(&self) -> Result<&str> {
        non_blank(self.repository.as_deref()).ok_or(ConfigError::MissingValue {
            name: "repository",
        })
    }

    /// Returns the registry URL, or an error if none was configured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingValue`] if the registry URL is unset.
    pub fn require_registry_url(&self) -> Result<&str> {
        non_blank(self.registry_url.as_deref()).ok_or(ConfigError::MissingValue {
            name: "registry_url",
        })
    }

    fn apply(&mut self, key: Key, value: &str) -> std::result::Result<(), String> {
        match key {
            Key::Repository => self.repository = Some(value.to_string()),
            Key::RegistryUrl => self.registry_url = Some(value.to_string()),
            Key::Suffixes => self.suffixes = Some(split_list(value)),
            Key::MinVersion => self.min_version = Some(value.to_string()),
            Key::Excluded => self.excluded = Some(split_list(value)),
            Key::Concurrency => {
                let n: usize = value
                    .parse()
                    .map_err(|_| format!("'{value}' is not a positive integer"))?;
                if n == 0 {
                    return Err("must be at least 1".to_string());
                }
                self.concurrency = Some(n);
            }
        }
        Ok(())
    }
}

/// Splits a comma-separated list, dropping blank entries.
#[must_use]
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
