//! Configuration loader for the gate. The file only points at external
//! resources (database location, log directory); the core never computes
//! these paths itself.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

const DEFAULT_DATABASE_DIR: &str = ".";
const DEFAULT_DATABASE_FILE: &str = "latchkey.db";
const DEFAULT_LOG_DIR: &str = "logs";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file unreadable: {0}")]
    Io(String),
    #[error("config parse failed: {0}")]
    Parse(String),
}

#[derive(Debug, Deserialize)]
pub struct RawGateConfig {
    #[serde(rename = "databaseDir")]
    pub database_dir: Option<PathBuf>,
    #[serde(rename = "databaseFile")]
    pub database_file: Option<String>,
    #[serde(rename = "logDir")]
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct GateConfig {
    pub database_dir: PathBuf,
    pub database_file: String,
    pub log_dir: PathBuf,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            database_dir: PathBuf::from(DEFAULT_DATABASE_DIR),
            database_file: DEFAULT_DATABASE_FILE.to_string(),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
        }
    }
}

impl GateConfig {
    /// Full path of the credential database file.
    pub fn database_path(&self) -> PathBuf {
        self.database_dir.join(&self.database_file)
    }
}

/// Loads the JSON configuration file, filling defaults for absent fields.
pub fn load_config(path: impl AsRef<Path>) -> Result<GateConfig, ConfigError> {
    let raw_json = fs::read_to_string(&path).map_err(|e| ConfigError::Io(format!("{e}")))?;
    let raw: RawGateConfig =
        serde_json::from_str(&raw_json).map_err(|e| ConfigError::Parse(format!("{e}")))?;

    let defaults = GateConfig::default();
    Ok(GateConfig {
        database_dir: raw.database_dir.unwrap_or(defaults.database_dir),
        database_file: raw.database_file.unwrap_or(defaults.database_file),
        log_dir: raw.log_dir.unwrap_or(defaults.log_dir),
    })
}
