#![warn(clippy::all, clippy::pedantic)]

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

use super::Config;

// Fallback config file path when no user config directory exists
const CONFIG_FILE_PATH: &str = "config/blockfall.toml";

// Environment variable that overrides the config file location
pub const CONFIG_ENV_VAR: &str = "BLOCKFALL_CONFIG";

// Load the configuration from the default location
pub fn load_config_from_file() -> Result<Config, ConfigError> {
    load_config_from_path(&get_config_file_path())
}

// Load the configuration, writing defaults first if the file is missing
pub fn load_config_from_path(config_path: &Path) -> Result<Config, ConfigError> {
    if !config_path.exists() {
        let default_config = Config::default();
        save_config_to_path(&default_config, config_path)?;
        debug!("Wrote default config to {}", config_path.display());
        return Ok(default_config);
    }

    let contents = fs::read_to_string(config_path)?;
    let config: Config = toml::from_str(&contents)?;
    debug!("Loaded config from {}", config_path.display());
    Ok(config)
}

// Save the configuration to the file system
pub fn save_config_to_path(config: &Config, config_path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = config_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let toml_string = toml::to_string_pretty(config)?;
    fs::write(config_path, toml_string)?;

    Ok(())
}

// Get the path to the config file
#[must_use]
pub fn get_config_file_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        return PathBuf::from(path);
    }

    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("blockfall").join("config.toml")
    } else {
        PathBuf::from(CONFIG_FILE_PATH)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "config I/O error: {err}"),
            ConfigError::Parse(err) => write!(f, "invalid config file: {err}"),
            ConfigError::Serialize(err) => write!(f, "could not serialize config: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Parse(err) => Some(err),
            ConfigError::Serialize(err) => Some(err),
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::Serialize(err)
    }
}
