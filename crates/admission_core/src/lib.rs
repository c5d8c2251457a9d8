//! Core domain logic for the student admission record manager.
//! This crate is the single source of truth for admission invariants.

pub mod config;
pub mod controller;
pub mod credentials;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;
pub mod validation;

pub use config::{AppConfig, ConfigError};
pub use controller::{AdmissionController, AppState, Notice, NoticeLevel, View};
pub use credentials::{StartupError, StoreCredentials};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::admission::{
    AdmissionEntry, AdmissionForm, AdmissionRecord, DocumentId, FormField, Gender, Stream,
};
pub use repo::admission_repo::{
    AdmissionRepository, DocumentAdmissionRepository, RepoError, RepoResult,
};
pub use service::admission_service::{AdmissionService, ServiceError};
pub use store::{
    Document, DocumentFields, DocumentStore, SqliteDocumentStore, StoreError, StoreResult,
};
pub use validation::{is_complete, is_valid_email, is_valid_phone, validate_form, ValidationError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
