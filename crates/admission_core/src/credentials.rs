//! Startup credential loading and store connection.
//!
//! # Responsibility
//! - Read the credential artifact once and check its shape.
//! - Open the store it points at and bind it to the credential's project.
//!
//! # Invariants
//! - Every failure here is a `StartupError`; callers report it once and exit.
//! - Credential contents (keys, emails) are never logged.

use crate::db::{bind_project, open_db, DbError};
use log::{error, info};
use rusqlite::Connection;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DEFAULT_CREDENTIAL_FILE: &str = "serviceAccountKey.json";
const SERVICE_ACCOUNT_TYPE: &str = "service_account";

/// Fatal startup failure. There is no retry.
#[derive(Debug)]
pub enum StartupError {
    MissingCredential {
        path: PathBuf,
        source: std::io::Error,
    },
    InvalidCredential {
        path: PathBuf,
        reason: String,
    },
    Store {
        path: PathBuf,
        source: DbError,
    },
}

impl Display for StartupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingCredential { path, source } => write!(
                f,
                "Could not find key at:\n{}\n\nError: {source}",
                path.display()
            ),
            Self::InvalidCredential { path, reason } => write!(
                f,
                "Invalid key at:\n{}\n\nError: {reason}",
                path.display()
            ),
            Self::Store { path, source } => write!(
                f,
                "Could not open store at:\n{}\n\nError: {source}",
                path.display()
            ),
        }
    }
}

impl Error for StartupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MissingCredential { source, .. } => Some(source),
            Self::Store { source, .. } => Some(source),
            Self::InvalidCredential { .. } => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CredentialFile {
    #[serde(rename = "type")]
    kind: String,
    project_id: String,
    client_email: String,
    #[serde(default)]
    database_path: Option<String>,
}

/// Parsed credential authorizing access to one project's store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreCredentials {
    pub project_id: String,
    pub client_email: String,
    /// Absolute location of the store file.
    pub database_path: PathBuf,
}

impl StoreCredentials {
    /// Reads and checks the credential artifact at `path`.
    ///
    /// A relative `database_path` resolves against the credential's own
    /// directory; when absent it defaults to `<project_id>.sqlite3`.
    pub fn load(path: &Path) -> Result<Self, StartupError> {
        let raw = std::fs::read_to_string(path).map_err(|source| {
            StartupError::MissingCredential {
                path: path.to_path_buf(),
                source,
            }
        })?;
        let invalid = |reason: String| StartupError::InvalidCredential {
            path: path.to_path_buf(),
            reason,
        };

        let file: CredentialFile =
            serde_json::from_str(&raw).map_err(|err| invalid(err.to_string()))?;

        if file.kind != SERVICE_ACCOUNT_TYPE {
            return Err(invalid(format!(
                "expected type `{SERVICE_ACCOUNT_TYPE}`, got `{}`",
                file.kind
            )));
        }
        let project_id = file.project_id.trim().to_string();
        if project_id.is_empty() {
            return Err(invalid("project_id cannot be empty".to_string()));
        }
        if !file.client_email.contains('@') {
            return Err(invalid("client_email is not an email address".to_string()));
        }

        let database_file = file
            .database_path
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| format!("{project_id}.sqlite3"));
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

        Ok(Self {
            project_id,
            client_email: file.client_email,
            database_path: resource_path(base_dir, Path::new(database_file.trim())),
        })
    }

    /// Opens the store and binds it to this credential's project.
    pub fn connect(&self) -> Result<Connection, StartupError> {
        let store_error = |source: DbError| StartupError::Store {
            path: self.database_path.clone(),
            source,
        };

        let conn = open_db(&self.database_path).map_err(store_error)?;
        bind_project(&conn, &self.project_id).map_err(store_error)?;
        info!("event=store_connect module=credentials status=ok");
        Ok(conn)
    }
}

/// Loads the credential at `path` and connects to its store.
pub fn connect(path: &Path) -> Result<(StoreCredentials, Connection), StartupError> {
    let result = StoreCredentials::load(path)
        .and_then(|credentials| credentials.connect().map(|conn| (credentials, conn)));
    if let Err(err) = &result {
        error!(
            "event=startup module=credentials status=error error_code={}",
            startup_error_code(err)
        );
    }
    result
}

/// Joins `relative` onto `base` unless it is already absolute.
pub fn resource_path(base: &Path, relative: &Path) -> PathBuf {
    if relative.is_absolute() {
        relative.to_path_buf()
    } else {
        base.join(relative)
    }
}

fn startup_error_code(err: &StartupError) -> &'static str {
    match err {
        StartupError::MissingCredential { .. } => "credential_missing",
        StartupError::InvalidCredential { .. } => "credential_invalid",
        StartupError::Store { .. } => "store_open_failed",
    }
}
