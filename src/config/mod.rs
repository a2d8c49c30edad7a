//! Configuration management.
//!
//! Settings come from a TOML file (see [`find_config_file`]) overlaid with
//! `PUBLIST_`-prefixed environment variables, where `__` separates the
//! section from the key, e.g. `PUBLIST_SOURCE__PAGE_URL`.

mod file_config;

pub use file_config::{default_config_toml, save_config, ConfigFileError};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "publist.toml";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Where to find the bibliography
    #[serde(default)]
    pub source: SourceConfig,

    /// List rendering settings
    #[serde(default)]
    pub display: DisplayConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Bibliography location settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Path or URL of the bibliography, relative paths allowed
    #[serde(default = "default_bib_path")]
    pub bib_path: String,

    /// URL of the page showing the list; relative locations resolve against it
    #[serde(default)]
    pub page_url: Option<String>,

    /// Prefix for the asset-directory candidates (e.g. where scripts live)
    #[serde(default)]
    pub asset_dir: Option<String>,

    /// Last location tried
    #[serde(default = "default_location")]
    pub default_location: String,

    /// A bibliography file to use exclusively, skipping all candidates
    #[serde(default)]
    pub embedded: Option<PathBuf>,

    /// Append a `v=<millis>` query parameter to HTTP requests
    #[serde(default = "default_true")]
    pub cache_bust: bool,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            bib_path: default_bib_path(),
            page_url: None,
            asset_dir: None,
            default_location: default_location(),
            embedded: None,
            cache_bust: true,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_bib_path() -> String {
    "publications.bib".to_string()
}

fn default_location() -> String {
    "/publications.bib".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    30
}

/// List rendering settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Entries in the latest list
    #[serde(default = "default_latest_limit")]
    pub latest_limit: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            latest_limit: default_latest_limit(),
        }
    }
}

fn default_latest_limit() -> usize {
    5
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Load configuration from an optional file plus the environment
pub fn load_config(path: Option<&Path>) -> Result<Config, config::ConfigError> {
    load_config_with_env(path, environment())
}

/// `PUBLIST_<SECTION>__<KEY>` variables: one underscore after the prefix,
/// two between section and key
fn environment() -> config::Environment {
    config::Environment::with_prefix("PUBLIST")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn load_config_with_env(
    path: Option<&Path>,
    env: config::Environment,
) -> Result<Config, config::ConfigError> {
    let mut builder = config::Config::builder();

    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path).required(true));
    }

    builder.add_source(env).build()?.try_deserialize()
}

/// Look for `./publist.toml`, then `<config dir>/publist/config.toml`
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("publist").join("config.toml"))
        .filter(|path| path.is_file())
}
