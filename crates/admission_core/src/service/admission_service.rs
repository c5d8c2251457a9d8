//! Admission use-case service.
//!
//! # Responsibility
//! - Turn raw form input into validated records before persistence.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - No repository write is issued for input that fails validation.
//! - Update re-validates the full form, same as submit.
//! - Service layer remains storage-agnostic.

use crate::model::admission::{AdmissionEntry, AdmissionForm, DocumentId};
use crate::repo::admission_repo::{AdmissionRepository, RepoError};
use crate::validation::{validate_form, ValidationError};
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for admission use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Input rejected before reaching storage.
    Validation(ValidationError),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

/// Admission service facade over repository implementations.
pub struct AdmissionService<R: AdmissionRepository> {
    repo: R,
}

impl<R: AdmissionRepository> AdmissionService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Validates `form` and creates a new record.
    ///
    /// Returns the store-assigned id.
    pub fn submit(&self, form: &AdmissionForm) -> Result<DocumentId, ServiceError> {
        let record = validate_form(form).inspect_err(|err| {
            warn!("event=admission_submit module=service status=rejected reason={err:?}");
        })?;
        Ok(self.repo.create(&record)?)
    }

    /// Lists every stored record in store order.
    pub fn list_all(&self) -> Result<Vec<AdmissionEntry>, ServiceError> {
        Ok(self.repo.list_all()?)
    }

    /// Validates `form` and overwrites all fields of record `id`.
    pub fn update(&self, id: &DocumentId, form: &AdmissionForm) -> Result<(), ServiceError> {
        let record = validate_form(form).inspect_err(|err| {
            warn!("event=admission_update module=service status=rejected id={id} reason={err:?}");
        })?;
        Ok(self.repo.update(id, &record)?)
    }

    /// Deletes record `id`. Absent ids are not an error.
    pub fn delete(&self, id: &DocumentId) -> Result<(), ServiceError> {
        Ok(self.repo.delete(id)?)
    }
}
