//! # configs
//!
//! Runtime settings for the Rusty-Tickets binary.
//!
//! Layers, lowest precedence first: built-in defaults, an optional
//! `rusty-tickets.toml` in the working directory, then `RT__`-prefixed
//! environment variables (`RT__STORAGE__DATA_DIR=/var/lib/tickets`).
//! Call [`load_env_file`] first so a `.env` file can feed the environment.

use std::path::PathBuf;

use config::{builder::DefaultState, Config, ConfigBuilder, Environment, File};
use log::{debug, warn};
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

pub const CONFIG_FILE: &str = "rusty-tickets";
pub const ENV_PREFIX: &str = "RT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("couldn't load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// Which `KeyValueStore` the binary opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Files under `data_dir`, kept across runs.
    Local,
    /// In-process only; everything is gone on exit.
    Memory,
}

#[derive(Debug, Deserialize)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    pub data_dir: PathBuf,
}

/// First-run demo data.
#[derive(Debug, Deserialize)]
pub struct SeedSettings {
    pub enabled: bool,
    pub demo_tickets: bool,
    pub email: String,
    pub password: SecretString,
    pub name: String,
}

/// What became of the `.env` file. Kept so it can be logged once a logger
/// is installed.
#[derive(Debug)]
pub enum EnvFile {
    Loaded(PathBuf),
    Missing,
    Unreadable(String),
}

impl EnvFile {
    fn from_result(result: Result<PathBuf, dotenvy::Error>) -> Self {
        match result {
            Ok(path) => Self::Loaded(path),
            Err(e) if e.not_found() => Self::Missing,
            Err(e) => Self::Unreadable(e.to_string()),
        }
    }

    pub fn log(&self) {
        match self {
            Self::Loaded(path) => debug!("loaded {path:?}"),
            Self::Missing => debug!("no .env file"),
            Self::Unreadable(e) => warn!("ignoring unreadable .env: {e}"),
        }
    }
}

/// Loads `.env` from the working directory (or a parent) into the process
/// environment.
pub fn load_env_file() -> EnvFile {
    EnvFile::from_result(dotenvy::dotenv())
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    /// Default `env_logger` filter; `RUST_LOG` still wins.
    pub log_level: String,
    pub storage: StorageSettings,
    pub seed: SeedSettings,
}

impl Settings {
    /// Loads the optional config file and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_sources(
            File::with_name(CONFIG_FILE).required(false),
            environment(),
        )
    }

    /// Defaults overlaid with `file`, then `env`.
    pub fn from_sources<F>(file: F, env: Environment) -> Result<Self, ConfigError>
    where
        F: config::Source + Send + Sync + 'static,
    {
        let settings = defaults()?
            .add_source(file)
            .add_source(env)
            .build()?
            .try_deserialize()?;

        Ok(settings)
    }
}

/// `RT__SECTION__KEY` environment variables.
pub fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
    Config::builder()
        .set_default("log_level", "info")?
        .set_default("storage.backend", "local")?
        .set_default("storage.data_dir", "./data/store")?
        .set_default("seed.enabled", true)?
        .set_default("seed.demo_tickets", true)?
        .set_default("seed.email", "test@test.com")?
        .set_default("seed.password", "password123")?
        .set_default("seed.name", "Test User")
}
