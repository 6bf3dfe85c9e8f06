//! Retention rule configuration.

use std::collections::BTreeSet;

/// The rules deciding which tags of a repository are deleted.
///
/// Built once per run and never mutated afterwards. Suffixes keep their
/// configured order because the first matching suffix is reported as the
/// deletion reason.
///
/// # Examples
///
/// ```
/// use regprune_core::RetentionRules;
///
/// let rules = RetentionRules::new()
///     .with_suffixes(["-SNAPSHOT", "-dev"])
///     .with_min_version("2.0.0")
///     .with_excluded(["latest"]);
///
/// assert_eq!(rules.delete_suffixes(), ["-SNAPSHOT", "-dev"]);
/// assert_eq!(rules.min_version(), Some("2.0.0"));
/// assert!(rules.is_excluded("latest"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetentionRules {
    delete_suffixes: Vec<String>,
    min_version: Option<String>,
    excluded_tags: BTreeSet<String>,
}

impl RetentionRules {
    /// Creates an empty rule set that keeps every tag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a deletion suffix. Blank and duplicate suffixes are ignored.
    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        let suffix = suffix.into().trim().to_string();
        if !suffix.is_empty() && !self.delete_suffixes.contains(&suffix) {
            self.delete_suffixes.push(suffix);
        }
        self
    }

    /// Appends several deletion suffixes, preserving their order.
    #[must_use]
    pub fn with_suffixes<I, S>(self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        suffixes
            .into_iter()
            .fold(self, |rules, suffix| rules.with_suffix(suffix))
    }

    /// Sets the version floor. A blank value clears it.
    #[must_use]
    pub fn with_min_version(mut self, version: impl Into<String>) -> Self {
        let version = version.into().trim().to_string();
        self.min_version = (!version.is_empty()).then_some(version);
        self
    }

    /// Adds tags that are never deleted.
    #[must_use]
    pub fn with_excluded<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_tags.extend(
            tags.into_iter()
                .map(|t| t.into().trim().to_string())
                .filter(|t| !t.is_empty()),
        );
        self
    }

    /// Deletion suffixes in configured order.
    #[must_use]
    pub fn delete_suffixes(&self) -> &[String] {
        &self.delete_suffixes
    }

    /// The version floor, if any.
    #[must_use]
    pub fn min_version(&self) -> Option<&str> {
        self.min_version.as_deref()
    }

    /// Tags exempt from deletion.
    #[must_use]
    pub const fn excluded_tags(&self) -> &BTreeSet<String> {
        &self.excluded_tags
    }

    /// Returns true if `tag` is on the exclusion list.
    #[must_use]
    pub fn is_excluded(&self, tag: &str) -> bool {
        self.excluded_tags.contains(tag)
    }

    /// Returns true if no rule has been configured at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.delete_suffixes.is_empty()
            && self.min_version.is_none()
            && self.excluded_tags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rules_are_empty() {
        assert!(RetentionRules::new().is_empty());
    }

    #[test]
    fn test_suffix_order_and_dedup() {
        let rules = RetentionRules::new().with_suffixes(["-b", "-a", "-b", "  ", ""]);
        assert_eq!(rules.delete_suffixes(), ["-b", "-a"]);
    }

    #[test]
    fn test_blank_min_version_clears() {
        let rules = RetentionRules::new().with_min_version("1.0.0").with_min_version(" ");
        assert_eq!(rules.min_version(), None);
    }

    #[test]
    fn test_excluded_only_is_not_empty() {
        let rules = RetentionRules::new().with_excluded(["latest"]);
        assert!(!rules.is_empty());
        assert!(rules.is_excluded("latest"));
        assert!(!rules.is_excluded("Latest"));
    }
}
