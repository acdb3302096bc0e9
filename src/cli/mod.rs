//! CLI command parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// gitstamp - derive and persist build version strings from git state.
#[derive(Parser)]
#[command(name = "gitstamp")]
#[command(about = "Derive and persist build version strings from git state")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase logging verbosity.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the current version and write the version file.
    #[command(visible_alias = "w")]
    Write {
        /// Target file (defaults to VERSION).
        path: Option<PathBuf>,

        /// Omit the build timestamp line for reproducible output.
        #[arg(long)]
        no_timestamp: bool,
    },

    /// Print a stored version file.
    #[command(visible_alias = "s")]
    Show {
        /// Version file to read (defaults to VERSION).
        path: Option<PathBuf>,

        /// Output format (text or json).
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Resolve and print the current version without writing.
    Resolve,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_parses_write_without_path() {
        let cli = Cli::parse_from(["gitstamp", "write"]);
        match cli.command {
            Commands::Write { path, no_timestamp } => {
                assert!(path.is_none());
                assert!(!no_timestamp);
            }
            _ => panic!("expected Write command"),
        }
    }

    #[test]
    fn cli_parses_write_with_path_and_no_timestamp() {
        let cli = Cli::parse_from(["gitstamp", "write", "build/VERSION", "--no-timestamp"]);
        match cli.command {
            Commands::Write { path, no_timestamp } => {
                assert_eq!(path, Some(PathBuf::from("build/VERSION")));
                assert!(no_timestamp);
            }
            _ => panic!("expected Write command"),
        }
    }

    #[test]
    fn cli_parses_write_alias() {
        let cli = Cli::parse_from(["gitstamp", "w"]);
        assert!(matches!(cli.command, Commands::Write { .. }));
    }

    #[test]
    fn cli_parses_show_with_defaults() {
        let cli = Cli::parse_from(["gitstamp", "show"]);
        match cli.command {
            Commands::Show { path, format } => {
                assert!(path.is_none());
                assert_eq!(format, "text");
            }
            _ => panic!("expected Show command"),
        }
    }

    #[test]
    fn cli_parses_show_json() {
        let cli = Cli::parse_from(["gitstamp", "show", "-f", "json"]);
        match cli.command {
            Commands::Show { format, .. } => assert_eq!(format, "json"),
            _ => panic!("expected Show command"),
        }
    }

    #[test]
    fn cli_parses_resolve() {
        let cli = Cli::parse_from(["gitstamp", "resolve"]);
        assert!(matches!(cli.command, Commands::Resolve));
    }

    #[test]
    fn cli_verbose_is_global() {
        let cli = Cli::parse_from(["gitstamp", "-v", "resolve"]);
        assert_eq!(cli.verbose, 1);

        let cli = Cli::parse_from(["gitstamp", "show", "-vv"]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn cli_debug_assert() {
        // Verify the CLI is correctly configured
        Cli::command().debug_assert();
    }
}
