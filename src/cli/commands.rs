//! CLI command implementations
//!
//! `run` loads the config, reads the whole data file, processes it through
//! one `Dispatcher` and writes the report to stdout. `check` parses the file
//! without touching an inventory.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::command::{scan, Dispatcher, RunSummary, ScanSummary, TokenStream};
use crate::inventory::{DeleteMode, Inventory, InventoryOptions};
use crate::observability::{log_event_with_fields, Event, Logger, Severity};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{read_source, write_response};

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Data file to process (default "prog_5_dat_file.dat")
    #[serde(default = "default_data_file")]
    pub data_file: String,

    /// Reject inserts whose id matches a live bike (default true)
    #[serde(default = "default_reject_duplicate_ids")]
    pub reject_duplicate_ids: bool,

    /// "reclaim" or "retain" (default "reclaim")
    #[serde(default = "default_delete_mode")]
    pub delete_mode: String,

    /// Lowest logged severity (default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_data_file() -> String {
    "prog_5_dat_file.dat".to_string()
}
fn default_reject_duplicate_ids() -> bool {
    true
}
fn default_delete_mode() -> String {
    "reclaim".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            reject_duplicate_ids: default_reject_duplicate_ids(),
            delete_mode: default_delete_mode(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Config file (or defaults) with the `--input` override applied
    pub fn resolve(config: Option<&Path>, input: Option<&Path>) -> CliResult<Self> {
        let mut resolved = match config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(input) = input {
            resolved.data_file = input.display().to_string();
        }
        resolved.validate()?;
        Ok(resolved)
    }

    fn validate(&self) -> CliResult<()> {
        if self.data_file.trim().is_empty() {
            return Err(CliError::config_error("data_file must not be empty"));
        }
        self.inventory_options()?;
        self.severity()?;
        Ok(())
    }

    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(&self.data_file)
    }

    /// Convert to the inventory's behavior switches
    pub fn inventory_options(&self) -> CliResult<InventoryOptions> {
        let delete_mode = DeleteMode::parse(&self.delete_mode).ok_or_else(|| {
            CliError::config_error(format!(
                "Invalid delete_mode: '{}'. Must be 'reclaim' or 'retain'.",
                self.delete_mode
            ))
        })?;

        Ok(InventoryOptions {
            reject_duplicate_ids: self.reject_duplicate_ids,
            delete_mode,
        })
    }

    pub fn severity(&self) -> CliResult<Severity> {
        Severity::parse(&self.log_level).ok_or_else(|| {
            CliError::config_error(format!("Invalid log_level: '{}'", self.log_level))
        })
    }
}

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Run { config, input } => {
            let config = Config::resolve(config.as_deref(), input.as_deref())?;
            let stdout = io::stdout();
            run_batch(&config, stdout.lock()).map(|_| ())
        }
        Command::Check { config, input } => {
            let config = Config::resolve(config.as_deref(), input.as_deref())?;
            let summary = check(&config)?;
            write_response(serde_json::to_value(summary)?)
        }
    }
}

/// Process the configured data file, writing the report to `out`.
pub fn run_batch<W: Write>(config: &Config, out: W) -> CliResult<RunSummary> {
    Logger::set_min_severity(config.severity()?);
    let data_file = config.data_file.as_str();
    log_event_with_fields(Event::RunStart, &[("data_file", data_file)]);

    let options = config.inventory_options()?;
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("delete_mode", options.delete_mode.as_str()),
            (
                "reject_duplicate_ids",
                if options.reject_duplicate_ids { "true" } else { "false" },
            ),
        ],
    );

    let source = read_source(&config.data_path()).map_err(|e| {
        log_event_with_fields(Event::InputUnavailable, &[("reason", e.message())]);
        e
    })?;

    let mut inventory = Inventory::with_options(options);
    let mut dispatcher = Dispatcher::new(out);
    let summary = dispatcher.run(&mut inventory, TokenStream::new(&source))?;

    if options.delete_mode == DeleteMode::Retain {
        let purged = inventory
            .purge_tombstones()
            .map_err(|e| CliError::invariant_violation(e.to_string()))?
            .to_string();
        log_event_with_fields(Event::TombstonesPurged, &[("count", purged.as_str())]);
    }

    inventory
        .check_invariants()
        .map_err(|v| CliError::invariant_violation(v.to_string()))?;

    let fields = completion_fields(&summary);
    let borrowed: Vec<(&str, &str)> = fields.iter().map(|(k, v)| (*k, v.as_str())).collect();
    log_event_with_fields(Event::RunComplete, &borrowed);

    Ok(summary)
}

/// Fields of the `RUN_COMPLETE` line. Truncation was already logged by the
/// dispatcher when it happened; here it is only a flag.
fn completion_fields(summary: &RunSummary) -> Vec<(&'static str, String)> {
    vec![
        ("applied", summary.applied.to_string()),
        ("malformed", summary.malformed.to_string()),
        ("rejected", summary.rejected.to_string()),
        ("skipped", summary.skipped.to_string()),
        ("truncated", summary.truncated.to_string()),
    ]
}

/// Parse the configured data file and count its commands.
pub fn check(config: &Config) -> CliResult<ScanSummary> {
    Logger::set_min_severity(config.severity()?);
    let source = read_source(&config.data_path())?;
    Ok(scan(&source))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.data_file, "prog_5_dat_file.dat");
        assert_eq!(
            config.inventory_options().unwrap(),
            InventoryOptions::default()
        );
    }

    #[test]
    fn test_config_rejects_unknown_delete_mode() {
        let config = Config {
            delete_mode: "shred".into(),
            ..Config::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.code_str(), "BIKE_CLI_CONFIG_ERROR");
    }

    #[test]
    fn test_config_rejects_unknown_log_level() {
        let config = Config {
            log_level: "loud".into(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_input_overrides_data_file() {
        let config = Config::resolve(None, Some(Path::new("other.dat"))).unwrap();
        assert_eq!(config.data_file, "other.dat");
    }

    #[test]
    fn test_completion_fields_flag_truncation() {
        let summary = RunSummary {
            applied: 3,
            truncated: true,
            ..RunSummary::default()
        };
        let fields = completion_fields(&summary);

        assert!(fields.contains(&("applied", "3".to_string())));
        assert!(fields.contains(&("truncated", "true".to_string())));
        assert_eq!(fields.iter().filter(|(k, _)| *k == "truncated").count(), 1);
    }

    #[test]
    fn test_retain_mode_options() {
        let config = Config {
            delete_mode: "retain".into(),
            reject_duplicate_ids: false,
            ..Config::default()
        };
        let options = config.inventory_options().unwrap();
        assert_eq!(options.delete_mode, DeleteMode::Retain);
        assert!(!options.reject_duplicate_ids);
    }
}
