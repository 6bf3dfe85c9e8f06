//! User interaction seam for cleanup runs.

use regprune_core::{Partition, RetentionRules};

use crate::error::Result;

/// Everything a cleanup run asks of the person running it.
///
/// The command line implements this with terminal prompts; tests script the
/// answers.
pub trait Confirmer {
    /// Asks for retention rules, starting from `current`.
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt backend fails.
    fn collect_rules(&mut self, current: &RetentionRules) -> Result<RetentionRules>;

    /// Shows which tags are kept and which are deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    fn show_partition(&mut self, repository: &str, partition: &Partition) -> Result<()>;

    /// First gate: accept the preview. `false` aborts the run.
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt backend fails.
    fn confirm_preview(&mut self, partition: &Partition) -> Result<bool>;

    /// Second gate: accept that `count` manifests are deleted irreversibly.
    /// `false` aborts the run.
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt backend fails.
    fn confirm_deletion(&mut self, repository: &str, count: usize) -> Result<bool>;
}
