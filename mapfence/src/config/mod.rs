//! Configuration for mapfence
//!
//! User settings live in an INI file at `~/.mapfence/config.ini`. A missing
//! file means all defaults; a present file overlays only the keys it sets.
//!
//! # Example
//!
//! ```
//! use mapfence::config::ConfigFile;
//!
//! let config = ConfigFile::default();
//! assert_eq!(config.geofence.radius, 400.0);
//! assert_eq!(config.search.debounce_ms, 400);
//! ```

mod convert;
mod defaults;
mod file;
mod parser;
mod settings;
mod writer;

pub use defaults::{
    default_log_file, CONFIG_DIR_NAME, DEFAULT_LOG_FILE_NAME, DEFAULT_REPLAY_INTERVAL_MS,
    DEFAULT_SEARCH_DEBOUNCE_MS,
};
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{
    ConfigFile, GeofenceSettings, HttpSettings, LoggingSettings, MapSettings, PoiSettings,
    SearchSettings, ServiceSettings, TrackingSettings, TrackingSourceKind,
};
