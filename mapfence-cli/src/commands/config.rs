//! Configuration management CLI commands.
//!
//! Provides `config path`, `config init` and `config show`. These run
//! without logging so they stay usable when the file itself is broken.

use std::path::PathBuf;

use clap::Subcommand;
use mapfence::config::{config_file_path, ConfigFile};

use crate::error::CliError;
use crate::runner::load_config;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the configuration file path
    Path,

    /// Write a default configuration file if none exists
    Init,

    /// Print the effective configuration (file values over defaults)
    Show,
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands, config_path: Option<PathBuf>) -> Result<(), CliError> {
    let path = config_path.unwrap_or_else(config_file_path);

    match command {
        ConfigCommands::Path => {
            println!("{}", path.display());
            Ok(())
        }
        ConfigCommands::Init => run_init(path),
        ConfigCommands::Show => {
            let config = load_config(&path)?;
            print!("{}", config.to_ini_string());
            Ok(())
        }
    }
}

/// Create the config file with defaults.
fn run_init(path: PathBuf) -> Result<(), CliError> {
    let created = ConfigFile::ensure_exists_at(&path)
        .map_err(|error| CliError::ConfigFile { path: path.clone(), error })?;

    if created {
        println!("Created {}", path.display());
    } else {
        println!("Configuration already exists at {}", path.display());
        println!("Run 'mapfence config show' to see the effective settings.");
    }

    Ok(())
}
