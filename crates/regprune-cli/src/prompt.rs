//! Terminal prompts for cleanup runs.

use dialoguer::{Confirm, Input};

use regprune_cleanup::{CleanupError, Confirmer, Result};
use regprune_core::{split_list, Partition, RetentionRules};

/// [`Confirmer`] backed by the terminal.
#[derive(Debug, Default)]
pub struct TerminalConfirmer;

impl TerminalConfirmer {
    pub const fn new() -> Self {
        Self
    }
}

impl Confirmer for TerminalConfirmer {
    fn collect_rules(&mut self, current: &RetentionRules) -> Result<RetentionRules> {
        println!("Retention rules (leave blank to skip a rule)");

        let suffixes = ask(
            "Delete tags ending with (comma-separated)",
            &current.delete_suffixes().join(","),
        )?;
        let min_version = ask(
            "Delete release tags below version",
            current.min_version().unwrap_or_default(),
        )?;
        let excluded = ask(
            "Never delete these tags (comma-separated)",
            &current
                .excluded_tags()
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(","),
        )?;

        Ok(RetentionRules::new()
            .with_suffixes(split_list(&suffixes))
            .with_min_version(min_version)
            .with_excluded(split_list(&excluded)))
    }

    fn show_partition(&mut self, repository: &str, partition: &Partition) -> Result<()> {
        print!("{}", render_partition(repository, partition));
        Ok(())
    }

    fn confirm_preview(&mut self, partition: &Partition) -> Result<bool> {
        Confirm::new()
            .with_prompt(format!(
                "Proceed with deleting {} tag(s)?",
                partition.delete.len()
            ))
            .default(false)
            .interact()
            .map_err(CleanupError::prompt)
    }

    fn confirm_deletion(&mut self, repository: &str, count: usize) -> Result<bool> {
        println!();
        println!("WARNING: deleting {count} manifest(s) from {repository} cannot be undone.");
        Confirm::new()
            .with_prompt("Delete them permanently?")
            .default(false)
            .interact()
            .map_err(CleanupError::prompt)
    }
}

fn ask(prompt: &str, initial: &str) -> Result<String> {
    Input::<String>::new()
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()
        .map_err(CleanupError::prompt)
}

/// Formats the keep and delete sets with the reason for each tag.
fn render_partition(repository: &str, partition: &Partition) -> String {
    let mut out = format!("\nTags in {repository}\n");

    out.push_str(&format!("\nKeeping ({}):\n", partition.keep.len()));
    for kept in &partition.keep {
        out.push_str(&format!("  ✓ {} ({})\n", kept.tag, kept.reason));
    }

    out.push_str(&format!("\nDeleting ({}):\n", partition.delete.len()));
    for candidate in &partition.delete {
        out.push_str(&format!("  ✗ {} ({})\n", candidate.tag, candidate.reason));
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use regprune_core::RetentionEngine;

    #[test]
    fn test_render_partition() {
        let rules = RetentionRules::new()
            .with_suffixes(["-SNAPSHOT"])
            .with_min_version("2.0.0")
            .with_excluded(["latest"]);
        let partition =
            RetentionEngine::new(rules).partition(&["1.0.0", "2.0.0", "2.0.0-SNAPSHOT", "latest"]);

        let text = render_partition("team/api", &partition);

        assert!(text.contains("Keeping (2):"));
        assert!(text.contains("  ✓ 2.0.0 (keeping)"));
        assert!(text.contains("  ✓ latest (excluded tag)"));
        assert!(text.contains("Deleting (2):"));
        assert!(text.contains("  ✗ 1.0.0 (version < 2.0.0)"));
        assert!(text.contains("  ✗ 2.0.0-SNAPSHOT (ends with -SNAPSHOT)"));
    }

    #[test]
    fn test_render_empty_delete_set() {
        let partition = RetentionEngine::new(RetentionRules::new().with_excluded(["latest"]))
            .partition(&["latest"]);
        let text = render_partition("team/api", &partition);
        assert!(text.contains("Deleting (0):"));
    }
}
