//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::path::PathBuf;
use std::process;

use mapfence::config::ConfigFileError;
use mapfence::provider::ProviderError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Config file could not be read, parsed or written
    ConfigFile {
        path: PathBuf,
        error: ConfigFileError,
    },
    /// A map service request failed
    Service {
        service: &'static str,
        error: ProviderError,
    },
    /// The interactive session's coordinator stopped unexpectedly
    Session(String),
    /// Reading commands or writing output failed
    Io(std::io::Error),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::ConfigFile {
                error: ConfigFileError::InvalidValue { .. },
                path,
            } => {
                eprintln!();
                eprintln!("Fix the value in {} or remove the key", path.display());
                eprintln!("to fall back to its default.");
            }
            CliError::Service {
                error: ProviderError::HttpError(_),
                ..
            } => {
                eprintln!();
                eprintln!("Common issues:");
                eprintln!("  1. No network connection");
                eprintln!("  2. The public endpoint is rate limiting this client");
                eprintln!("  3. A custom URL in [services] is wrong: see 'mapfence config show'");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::ConfigFile { path, error } => write!(f, "{} ({})", error, path.display()),
            CliError::Service { service, error } => {
                write!(f, "{} request failed: {}", service, error)
            }
            CliError::Session(msg) => write!(f, "Session error: {}", msg),
            CliError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ConfigFile { error, .. } => Some(error),
            CliError::Service { error, .. } => Some(error),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}
