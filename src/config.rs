//! Application configuration management.
//!
//! Settings are layered with `figment`, later layers winning:
//!
//! 1. Built-in defaults ([`Config::default`])
//! 2. A TOML file: the path given with `--config`, or
//!    `<platform config dir>/config.toml` when it exists
//! 3. Command-line flags (applied by the caller with [`Config::merge_cli`])
//!
//! Example file:
//!
//! ```toml
//! chunk_size = 4096
//! tree_depth = 2
//! on_error = "skip"
//! default_path = "/srv/share"
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::providers::{Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::Cli;
use crate::output::DEFAULT_TREE_DEPTH;
use crate::scanner::{ErrorPolicy, DEFAULT_CHUNK_SIZE};

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    /// The file could not be parsed or a value has the wrong type.
    #[error("Invalid configuration: {0}")]
    Parse(#[from] Box<figment::Error>),

    /// A value parsed but is out of range.
    #[error("Invalid value for {key}: {reason}")]
    Invalid {
        /// Offending key
        key: &'static str,
        /// Why it was rejected
        reason: String,
    },
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Bytes read per chunk while hashing.
    pub chunk_size: usize,
    /// Default depth for the tree view.
    pub tree_depth: usize,
    /// What to do with unreadable entries during a scan.
    pub on_error: ErrorPolicy,
    /// Path scanned when `scan` is given no argument and nothing was scanned yet.
    pub default_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            tree_depth: DEFAULT_TREE_DEPTH,
            on_error: ErrorPolicy::Abort,
            default_path: None,
        }
    }
}

impl Config {
    /// Load the configuration.
    ///
    /// With `explicit` set, that file must exist. Otherwise the default
    /// platform path is used if present, and built-in defaults if not.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file is missing (explicit path only),
    /// malformed, or holds out-of-range values.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) if !path.exists() => Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => Self::load_from(path),
            None => match Self::default_file() {
                Some(path) if path.exists() => Self::load_from(&path),
                _ => {
                    log::debug!("No config file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    /// Load defaults overlaid with the TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on parse failure or invalid values.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        log::debug!("Loading config from {}", path.display());
        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply command-line overrides on top of the loaded values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if an override is out of range.
    pub fn merge_cli(mut self, cli: &Cli) -> Result<Self, ConfigError> {
        if let Some(chunk_size) = cli.chunk_size {
            self.chunk_size = usize::try_from(chunk_size).map_err(|_| ConfigError::Invalid {
                key: "chunk_size",
                reason: format!("{chunk_size} does not fit in memory"),
            })?;
        }
        if cli.skip_errors {
            self.on_error = ErrorPolicy::Skip;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size == 0 {
            return Err(ConfigError::Invalid {
                key: "chunk_size",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// The platform-specific config file location, if one can be determined.
    #[must_use]
    pub fn default_file() -> Option<PathBuf> {
        ProjectDirs::from("", "", "dirdupe").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
