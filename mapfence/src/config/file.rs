//! Reading and writing `~/.mapfence/config.ini`.
//!
//! A missing file is not an error: every setting has a default and the file
//! only overlays the keys it names. Parsing lives in [`super::parser`],
//! serialization in [`super::writer`].

use ini::Ini;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use super::defaults::*;
pub use super::settings::*;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// The file exists but is not readable INI
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: ini::Error,
    },

    /// A key holds a value the setting cannot take
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// The file or its directory could not be written
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigFile {
    /// Loads `~/.mapfence/config.ini`, or defaults when it does not exist.
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&config_file_path())
    }

    /// Loads the file at `path` over the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        match Ini::load_from_file(path) {
            Ok(ini) => super::parser::parse_ini(&ini),
            Err(ini::Error::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigFileError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Writes to `~/.mapfence/config.ini`.
    pub fn save(&self) -> Result<(), ConfigFileError> {
        self.save_to(&config_file_path())
    }

    /// Writes the commented INI to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        let write_error = |source| ConfigFileError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }
        std::fs::write(path, self.to_ini_string()).map_err(write_error)
    }

    /// The text `save_to` writes.
    pub fn to_ini_string(&self) -> String {
        super::writer::to_config_string(self)
    }

    /// Writes a default file at `path` unless one is already there.
    ///
    /// Returns whether a file was written.
    pub fn ensure_exists_at(path: &Path) -> Result<bool, ConfigFileError> {
        if path.exists() {
            return Ok(false);
        }
        Self::default().save_to(path)?;
        Ok(true)
    }
}

/// `~/.mapfence`, or `./.mapfence` when there is no home directory.
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}
