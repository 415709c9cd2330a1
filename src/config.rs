use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::hotp::MAX_DIGITS;

const CONFIG_DIR: &str = "twof";
const CONFIG_FILE: &str = "config.toml";

pub const DEFAULT_KEYCHAIN: &str = "2f.keychain";
pub const DEFAULT_SECURITY_COMMAND: &str = "security";
pub const DEFAULT_DIGITS: u32 = 6;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub keychain: String,
    pub security_command: String,
    pub default_digits: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            keychain: DEFAULT_KEYCHAIN.to_string(),
            security_command: DEFAULT_SECURITY_COMMAND.to_string(),
            default_digits: DEFAULT_DIGITS,
        }
    }
}

/// `<config dir>/twof/config.toml`, when the platform has a config dir.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

impl Config {
    /// Reads the config file, a missing file means defaults.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;

        Ok(config)
    }

    pub fn load_default() -> Result<Config, ConfigError> {
        match default_path() {
            Some(path) => Config::load(&path),
            None => Ok(Config::default()),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.default_digits == 0 || self.default_digits > MAX_DIGITS {
            return Err(ConfigError::Validation {
                field: "default_digits",
                reason: format!("{} is not between 1 and {}", self.default_digits, MAX_DIGITS),
            });
        }
        if self.keychain.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "keychain",
                reason: String::from("must not be empty"),
            });
        }
        if self.security_command.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "security_command",
                reason: String::from("must not be empty"),
            });
        }
        Ok(())
    }
}
