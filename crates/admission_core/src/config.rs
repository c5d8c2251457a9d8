//! Runtime configuration.
//!
//! # Responsibility
//! - Resolve credential location, collection name and logging settings.
//! - Read overrides from the process environment and an optional `.env`.
//!
//! # Invariants
//! - `log_dir` and `credentials_path` are absolute after resolution.
//! - `collection` always satisfies `store::validate_collection_name`.

use crate::credentials::{resource_path, DEFAULT_CREDENTIAL_FILE};
use crate::logging::default_log_level;
use crate::store::validate_collection_name;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DEFAULT_COLLECTION: &str = "admissions";
pub const DEFAULT_LOG_DIR_NAME: &str = "logs";

pub const ENV_CREDENTIALS: &str = "ADMISSION_CREDENTIALS";
pub const ENV_RESOURCE_DIR: &str = "ADMISSION_RESOURCE_DIR";
pub const ENV_COLLECTION: &str = "ADMISSION_COLLECTION";
pub const ENV_LOG_LEVEL: &str = "ADMISSION_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "ADMISSION_LOG_DIR";

#[derive(Debug)]
pub enum ConfigError {
    DotEnv(dotenvy::Error),
    CurrentDir(std::io::Error),
    InvalidCollection(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DotEnv(err) => write!(f, "failed to load .env file: {err}"),
            Self::CurrentDir(err) => write!(f, "cannot resolve current directory: {err}"),
            Self::InvalidCollection(name) => write!(
                f,
                "invalid collection name `{name}`; expected non-empty text without `/`"
            ),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::DotEnv(err) => Some(err),
            Self::CurrentDir(err) => Some(err),
            Self::InvalidCollection(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub credentials_path: PathBuf,
    pub collection: String,
    pub log_level: String,
    pub log_dir: PathBuf,
}

impl AppConfig {
    /// Loads `.env` when present, then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                return Err(ConfigError::DotEnv(err));
            }
        }
        let cwd = std::env::current_dir().map_err(ConfigError::CurrentDir)?;
        Self::from_lookup(|key| std::env::var(key).ok(), &cwd)
    }

    /// Builds a config from a key lookup, resolving relative paths
    /// against `cwd`.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        cwd: &Path,
    ) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let resource_dir = non_empty(ENV_RESOURCE_DIR).map(|dir| absolutize(cwd, dir));
        let credential_file =
            non_empty(ENV_CREDENTIALS).unwrap_or_else(|| DEFAULT_CREDENTIAL_FILE.to_string());
        let credentials_path = resource_path(
            resource_dir.as_deref().unwrap_or(cwd),
            Path::new(credential_file.trim()),
        );

        let mut config = Self {
            credentials_path,
            collection: DEFAULT_COLLECTION.to_string(),
            log_level: non_empty(ENV_LOG_LEVEL)
                .unwrap_or_else(|| default_log_level().to_string()),
            log_dir: non_empty(ENV_LOG_DIR)
                .map(|dir| absolutize(cwd, dir))
                .unwrap_or_else(|| cwd.join(DEFAULT_LOG_DIR_NAME)),
        };

        if let Some(collection) = non_empty(ENV_COLLECTION) {
            config.set_collection(&collection)?;
        }
        Ok(config)
    }

    pub fn set_collection(&mut self, name: &str) -> Result<(), ConfigError> {
        let normalized = validate_collection_name(name)
            .map_err(|_| ConfigError::InvalidCollection(name.to_string()))?;
        self.collection = normalized.to_string();
        Ok(())
    }
}

fn absolutize(cwd: &Path, value: String) -> PathBuf {
    let path = PathBuf::from(value.trim());
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}
