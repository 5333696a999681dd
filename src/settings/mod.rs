mod errors;
#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};

use ::config::{Config, Environment, File};
use serde::Deserialize;

use crate::engine::{DEFAULT_CHUNK_SIZE, DEFAULT_SKIP_LIMIT};

pub use errors::SettingsError;

/// Base name of the optional configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_NAME: &str = "application";
/// Separates nesting levels in environment variable names.
pub const ENVIRONMENT_SEPARATOR: &str = "__";

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Everything a run needs to know, loaded from an optional file and the
/// environment. `TRANSACTION__INPUT__DIR` sets `transaction.input.dir`.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub transaction: TransactionSettings,
    #[serde(default)]
    pub database: DatabaseSettings
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransactionSettings {
    pub input: DirectorySetting,
    pub completed: DirectorySetting,
    pub error: DirectorySetting,
    #[serde(default)]
    pub chunk: ChunkSettings,
    #[serde(default)]
    pub skip: SkipSettings
}

#[derive(Debug, Clone, Deserialize)]
pub struct DirectorySetting {
    pub dir: PathBuf
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChunkSettings {
    #[serde(default = "default_chunk_size")]
    pub size: usize
}

impl Default for ChunkSettings {
    fn default() -> Self {
        Self { size: DEFAULT_CHUNK_SIZE }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkipSettings {
    /// Unbounded when absent.
    pub limit: Option<usize>
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: DEFAULT_MAX_CONNECTIONS
        }
    }
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_max_connections() -> u32 {
    DEFAULT_MAX_CONNECTIONS
}

impl Settings {
    /// Loads settings from `file` (or `application.*` in the working directory
    /// when present) overlaid with the process environment.
    pub fn load(file: Option<&Path>) -> Result<Self, SettingsError> {
        Self::from_sources(file, Environment::default().separator(ENVIRONMENT_SEPARATOR))
    }

    pub fn from_sources(file: Option<&Path>, environment: Environment) -> Result<Self, SettingsError> {
        let builder = match file {
            Some(path) => Config::builder().add_source(File::from(path).required(true)),
            None => Config::builder().add_source(File::with_name(DEFAULT_CONFIG_NAME).required(false))
        };

        let settings: Settings = builder
            .add_source(environment)
            .build()?
            .try_deserialize()?;

        settings.validate()?;

        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let transaction = &self.transaction;

        for (key, setting) in [
            ("transaction.input.dir", &transaction.input),
            ("transaction.completed.dir", &transaction.completed),
            ("transaction.error.dir", &transaction.error)
        ] {
            if setting.dir.as_os_str().is_empty() {
                return Err(SettingsError::invalid(format!("{key} must not be empty")))
            }
        }

        if transaction.chunk.size == 0 {
            return Err(SettingsError::invalid("transaction.chunk.size must be at least 1"))
        }

        if self.database.max_connections == 0 {
            return Err(SettingsError::invalid("database.max_connections must be at least 1"))
        }

        Ok(())
    }

    pub fn skip_limit(&self) -> usize {
        self.transaction.skip.limit.unwrap_or(DEFAULT_SKIP_LIMIT)
    }
}
