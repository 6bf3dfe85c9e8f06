//! Version ordering for tag retention.
//!
//! Tags are compared by their numeric core: everything from the first `-`
//! onwards is ignored, so `2.0.0-rc1` orders like `2.0.0`. The remaining
//! dot-separated components are compared as integers, with missing trailing
//! components treated as `0`.
//!
//! When either side has a non-numeric component the comparison falls back to
//! plain string ordering of the numeric cores. That keeps the comparator total
//! but can misorder malformed input; callers can detect such input up front
//! with [`VersionComparator::is_well_formed`].

use std::cmp::Ordering;

/// Orders version strings by their dotted numeric core.
#[derive(Debug, Clone, Copy, Default)]
pub struct VersionComparator;

impl VersionComparator {
    /// Returns true if `a` is strictly lower than `b`.
    ///
    /// # Examples
    ///
    /// ```
    /// use regprune_core::VersionComparator;
    ///
    /// assert!(VersionComparator::is_less_than("1.9.0", "1.10.0"));
    /// assert!(VersionComparator::is_less_than("1.9.9-SNAPSHOT", "2.0.0"));
    /// assert!(!VersionComparator::is_less_than("2.0.0", "2.0.0"));
    /// assert!(!VersionComparator::is_less_than("2.0.0-rc1", "2.0.0"));
    /// ```
    #[must_use]
    pub fn is_less_than(a: &str, b: &str) -> bool {
        Self::compare(a, b) == Ordering::Less
    }

    /// Compares two version strings.
    #[must_use]
    pub fn compare(a: &str, b: &str) -> Ordering {
        let (a_core, b_core) = (numeric_core(a), numeric_core(b));

        match (components(a_core), components(b_core)) {
            (Some(a_parts), Some(b_parts)) => compare_components(&a_parts, &b_parts),
            _ => a_core.cmp(b_core),
        }
    }

    /// Returns true if the numeric core of `version` consists only of
    /// dot-separated integers.
    ///
    /// # Examples
    ///
    /// ```
    /// use regprune_core::VersionComparator;
    ///
    /// assert!(VersionComparator::is_well_formed("1.2.3"));
    /// assert!(VersionComparator::is_well_formed("1.2.3-beta"));
    /// assert!(!VersionComparator::is_well_formed("v1.2.3"));
    /// assert!(!VersionComparator::is_well_formed("1.x"));
    /// ```
    #[must_use]
    pub fn is_well_formed(version: &str) -> bool {
        components(numeric_core(version)).is_some()
    }

    /// Returns true if `tag` starts with a `MAJOR.MINOR.PATCH` numeric
    /// pattern. Anything may follow the patch number.
    ///
    /// # Examples
    ///
    /// ```
    /// use regprune_core::VersionComparator;
    ///
    /// assert!(VersionComparator::has_release_prefix("1.2.3"));
    /// assert!(VersionComparator::has_release_prefix("10.0.1-SNAPSHOT"));
    /// assert!(!VersionComparator::has_release_prefix("1.2"));
    /// assert!(!VersionComparator::has_release_prefix("latest"));
    /// ```
    #[must_use]
    pub fn has_release_prefix(tag: &str) -> bool {
        let mut rest = tag;
        for index in 0..3 {
            let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
            if digits == 0 {
                return false;
            }
            rest = &rest[digits..];

            if index < 2 {
                match rest.strip_prefix('.') {
                    Some(remaining) => rest = remaining,
                    None => return false,
                }
            }
        }
        true
    }
}

/// Strips any qualifier starting at the first `-`.
fn numeric_core(version: &str) -> &str {
    version.split_once('-').map_or(version, |(core, _)| core)
}

fn components(core: &str) -> Option<Vec<u64>> {
    core.split('.').map(|part| part.parse().ok()).collect()
}

fn compare_components(a: &[u64], b: &[u64]) -> Ordering {
    let len = a.len().max(b.len());
    (0..len)
        .map(|i| {
            let left = a.get(i).copied().unwrap_or(0);
            let right = b.get(i).copied().unwrap_or(0);
            left.cmp(&right)
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}
