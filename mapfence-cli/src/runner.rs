//! CLI runner for common setup and operations.
//!
//! Encapsulates config loading, logging initialization and HTTP client
//! creation to reduce duplication across command handlers.

use std::path::{Path, PathBuf};

use tracing::info;

use mapfence::app::HttpServices;
use mapfence::config::{config_file_path, ConfigFile};
use mapfence::logging::{init_logging, split_log_path, LoggingGuard};
use mapfence::provider::AsyncReqwestClient;

use crate::error::CliError;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    /// Loaded configuration file
    config: ConfigFile,
    config_path: PathBuf,
}

impl CliRunner {
    /// Create a new CLI runner, loading config and initializing logging.
    ///
    /// # Arguments
    ///
    /// * `config_path` - Config file to load instead of `~/.mapfence/config.ini`
    /// * `debug_mode` - When true, enables debug-level logging regardless of RUST_LOG
    pub fn new(config_path: Option<PathBuf>, debug_mode: bool) -> Result<Self, CliError> {
        let config_path = config_path.unwrap_or_else(config_file_path);
        let config = load_config(&config_path)?;

        let (log_dir, log_file) = split_log_path(&config.logging.file).ok_or_else(|| {
            CliError::Config(format!(
                "Log file path '{}' has no file name",
                config.logging.file.display()
            ))
        })?;

        // Command output owns stdout; log lines go there only when debugging
        let logging_guard = init_logging(log_dir, log_file, debug_mode, debug_mode)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            logging_guard,
            config,
            config_path,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("mapfence v{}", mapfence::VERSION);
        info!(
            config = %self.config_path.display(),
            "mapfence CLI: {} command", command
        );
    }

    /// Shared HTTP client built from the `[http]` section.
    pub fn http_client(&self) -> Result<AsyncReqwestClient, CliError> {
        self.config.http_client().map_err(|error| CliError::Service {
            service: "HTTP client",
            error,
        })
    }

    /// The full adapter stack the coordinator talks to.
    pub fn services(&self) -> Result<HttpServices, CliError> {
        let http = self.http_client()?;
        Ok(HttpServices::from_endpoints(
            http,
            &self.config.service_endpoints(),
        ))
    }
}

/// Loads the config at `path`, falling back to defaults when it is missing.
pub fn load_config(path: &Path) -> Result<ConfigFile, CliError> {
    ConfigFile::load_from(path).map_err(|error| CliError::ConfigFile {
        path: path.to_path_buf(),
        error,
    })
}
