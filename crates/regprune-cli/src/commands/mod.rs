//! CLI argument parsing.

pub mod clean;

use clap::Parser;

/// regprune - Container registry tag cleanup
#[derive(Parser)]
#[command(name = "regprune")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub clean: clean::CleanArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_full_command_line() {
        let cli = Cli::try_parse_from([
            "regprune",
            "--repository",
            "team/api",
            "--registry-url",
            "registry.example.com",
            "--suffixes",
            "-SNAPSHOT,-dev",
            "--min-version",
            "2.0.0",
            "--excluded",
            "latest",
            "--yes",
            "--concurrency",
            "4",
        ])
        .unwrap();

        assert_eq!(cli.clean.repository.as_deref(), Some("team/api"));
        assert_eq!(cli.clean.suffixes.as_deref(), Some("-SNAPSHOT,-dev"));
        assert!(cli.clean.yes);
        assert!(!cli.clean.dry_run);
        assert_eq!(cli.clean.concurrency, Some(4));
    }

    #[test]
    fn test_zero_concurrency_is_rejected() {
        let result = Cli::try_parse_from(["regprune", "--concurrency", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        assert!(Cli::try_parse_from(["regprune", "--timeout", "0"]).is_err());

        let cli = Cli::try_parse_from(["regprune", "--timeout", "15"]).unwrap();
        assert_eq!(cli.clean.timeout, Some(15));
    }
}
