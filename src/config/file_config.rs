//! Writing configuration files.
//!
//! # Configuration File Format
//!
//! ```toml
//! [source]
//! bib_path = "publications.bib"
//! page_url = "https://example.org/publications.html"
//! asset_dir = "https://example.org/scripts/"
//! default_location = "/publications.bib"
//! cache_bust = true
//! timeout_secs = 30
//!
//! [display]
//! latest_limit = 5
//!
//! [logging]
//! level = "info"
//! ```

use std::path::Path;

use super::Config;

/// Configuration file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config file already exists: {0}")]
    AlreadyExists(String),
}

/// The default configuration rendered as TOML
pub fn default_config_toml() -> Result<String, ConfigFileError> {
    Ok(toml::to_string_pretty(&Config::default())?)
}

/// Write `config` to `path`, creating parent directories.
///
/// Refuses to replace an existing file unless `overwrite` is set.
pub fn save_config(config: &Config, path: &Path, overwrite: bool) -> Result<(), ConfigFileError> {
    if path.exists() && !overwrite {
        return Err(ConfigFileError::AlreadyExists(path.display().to_string()));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}
