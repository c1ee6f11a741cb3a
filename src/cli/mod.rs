//! CLI module for bikeshop
//!
//! Provides command-line interface for:
//! - run: process a data file and print the report
//! - check: parse a data file and print command counts as JSON

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{check, run, run_batch, run_command, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_source, write_response, write_response_to};
