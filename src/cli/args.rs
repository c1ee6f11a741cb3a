//! CLI argument definitions using clap
//!
//! Commands:
//! - bikeshop run [--config <path>] [--input <path>]
//! - bikeshop check [--config <path>] [--input <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// bikeshop - rental bike inventory batch processor
#[derive(Parser, Debug)]
#[command(name = "bikeshop")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Process a data file and print the report
    Run {
        /// Path to JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Data file to process (overrides data_file from the config)
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Parse a data file without applying it and print command counts
    Check {
        /// Path to JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Data file to parse (overrides data_file from the config)
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
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
    fn test_parse_run_with_input() {
        let cli = Cli::try_parse_from(["bikeshop", "run", "--input", "bikes.dat"]).unwrap();
        match cli.command {
            Command::Run { config, input } => {
                assert!(config.is_none());
                assert_eq!(input, Some(PathBuf::from("bikes.dat")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_check() {
        let cli = Cli::try_parse_from(["bikeshop", "check", "--config", "shop.json"]).unwrap();
        assert!(matches!(cli.command, Command::Check { .. }));
    }
}
