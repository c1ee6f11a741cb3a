//! CLI-specific error types
//!
//! All CLI errors are fatal: the process exits non-zero. Per-command errors
//! never reach this layer.

use std::fmt;
use std::io;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error on stdout/stderr
    IoError,
    /// Data file cannot be opened or read
    InputUnavailable,
    /// Orderings failed verification after the run
    InvariantViolation,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "BIKE_CLI_CONFIG_ERROR",
            Self::IoError => "BIKE_CLI_IO_ERROR",
            Self::InputUnavailable => "BIKE_CLI_INPUT_UNAVAILABLE",
            Self::InvariantViolation => "BIKE_CLI_INVARIANT_VIOLATION",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Data file could not be opened
    pub fn input_unavailable(path: impl fmt::Display, reason: impl fmt::Display) -> Self {
        Self::new(
            CliErrorCode::InputUnavailable,
            format!("Program could not open file {}: {}", path, reason),
        )
    }

    pub fn invariant_violation(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvariantViolation, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
