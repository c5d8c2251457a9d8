//! Admission repository contract and document-store implementation.
//!
//! # Responsibility
//! - Provide create/list/update/delete over admission records.
//! - Translate records to and from the stored field map.
//!
//! # Invariants
//! - Write paths call `AdmissionRecord::validate()` before any store call.
//! - Read paths skip (and log) stored documents that are not valid
//!   records; the remaining records still list.
//! - Stored values equal submitted values exactly.

use crate::model::admission::{
    AdmissionEntry, AdmissionRecord, DocumentId, FormField, Gender, Stream,
};
use crate::store::{Document, DocumentFields, DocumentStore, StoreError};
use crate::validation::ValidationError;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Store(StoreError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted admission data: {message}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Repository interface for admission CRUD operations.
pub trait AdmissionRepository {
    fn create(&self, record: &AdmissionRecord) -> RepoResult<DocumentId>;
    fn list_all(&self) -> RepoResult<Vec<AdmissionEntry>>;
    fn update(&self, id: &DocumentId, record: &AdmissionRecord) -> RepoResult<()>;
    fn delete(&self, id: &DocumentId) -> RepoResult<()>;
}

/// Admission repository backed by any `DocumentStore`.
pub struct DocumentAdmissionRepository<S: DocumentStore> {
    store: S,
}

impl<S: DocumentStore> DocumentAdmissionRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: DocumentStore> AdmissionRepository for DocumentAdmissionRepository<S> {
    fn create(&self, record: &AdmissionRecord) -> RepoResult<DocumentId> {
        record.validate()?;
        let started_at = Instant::now();

        match self.store.add(&record_to_fields(record)) {
            Ok(id) => {
                info!(
                    "event=admission_create module=repo status=ok id={} duration_ms={}",
                    id,
                    started_at.elapsed().as_millis()
                );
                Ok(id)
            }
            Err(err) => {
                error!(
                    "event=admission_create module=repo status=error error_code=store_add_failed error={}",
                    err
                );
                Err(err.into())
            }
        }
    }

    fn list_all(&self) -> RepoResult<Vec<AdmissionEntry>> {
        let started_at = Instant::now();
        let documents = self.store.stream().inspect_err(|err| {
            error!(
                "event=admission_list module=repo status=error error_code=store_stream_failed error={}",
                err
            );
        })?;

        let mut entries = Vec::with_capacity(documents.len());
        let mut skipped = 0usize;
        for document in &documents {
            match parse_document(document) {
                Ok(entry) => entries.push(entry),
                Err(_) => {
                    skipped += 1;
                    warn!(
                        "event=admission_list module=repo status=skipped id={} error_code=invalid_document",
                        document.id
                    );
                }
            }
        }

        info!(
            "event=admission_list module=repo status=ok count={} skipped={} duration_ms={}",
            entries.len(),
            skipped,
            started_at.elapsed().as_millis()
        );
        Ok(entries)
    }

    fn update(&self, id: &DocumentId, record: &AdmissionRecord) -> RepoResult<()> {
        record.validate()?;

        self.store
            .update(id, &record_to_fields(record))
            .inspect_err(|err| {
                error!(
                    "event=admission_update module=repo status=error id={} error={}",
                    id, err
                );
            })?;

        info!("event=admission_update module=repo status=ok id={id}");
        Ok(())
    }

    fn delete(&self, id: &DocumentId) -> RepoResult<()> {
        self.store.delete(id).inspect_err(|err| {
            error!(
                "event=admission_delete module=repo status=error id={} error={}",
                id, err
            );
        })?;

        info!("event=admission_delete module=repo status=ok id={id}");
        Ok(())
    }
}

fn record_to_fields(record: &AdmissionRecord) -> DocumentFields {
    FormField::ALL
        .into_iter()
        .map(|field| {
            let value = match field {
                FormField::Name => record.name.clone(),
                FormField::Email => record.email.clone(),
                FormField::Contact => record.contact.clone(),
                FormField::Gender => record.gender.as_str().to_string(),
                FormField::Stream => record.stream.as_str().to_string(),
            };
            (field.label().to_string(), value)
        })
        .collect()
}

fn parse_document(document: &Document) -> RepoResult<AdmissionEntry> {
    let text = |field: FormField| -> RepoResult<String> {
        document
            .fields
            .get(field.label())
            .cloned()
            .ok_or_else(|| {
                RepoError::InvalidData(format!(
                    "document {} has no `{}` field",
                    document.id,
                    field.label()
                ))
            })
    };

    let gender_text = text(FormField::Gender)?;
    let gender = Gender::parse(&gender_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid gender `{gender_text}` in document {}",
            document.id
        ))
    })?;

    let stream_text = text(FormField::Stream)?;
    let stream = Stream::parse(&stream_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid stream `{stream_text}` in document {}",
            document.id
        ))
    })?;

    let record = AdmissionRecord {
        name: text(FormField::Name)?,
        email: text(FormField::Email)?,
        contact: text(FormField::Contact)?,
        gender,
        stream,
    };
    record.validate().map_err(|err| {
        RepoError::InvalidData(format!("document {} failed validation: {err}", document.id))
    })?;

    Ok(AdmissionEntry {
        id: document.id.clone(),
        record,
    })
}

#[cfg(test)]
mod tests {
    use super::{parse_document, record_to_fields, RepoError};
    use crate::model::admission::{AdmissionRecord, DocumentId, Gender, Stream};
    use crate::store::Document;

    fn record() -> AdmissionRecord {
        AdmissionRecord {
            name: "Asha Rao".to_string(),
            email: "asha@example.in".to_string(),
            contact: "+919876543210".to_string(),
            gender: Gender::Female,
            stream: Stream::Commerce,
        }
    }

    #[test]
    fn fields_use_capitalized_keys() {
        let fields = record_to_fields(&record());
        assert_eq!(fields.get("Name").map(String::as_str), Some("Asha Rao"));
        assert_eq!(fields.get("Gender").map(String::as_str), Some("Female"));
        assert_eq!(fields.get("Stream").map(String::as_str), Some("Commerce"));
        assert_eq!(fields.len(), 5);
    }

    #[test]
    fn parse_rejects_unknown_stream() {
        let mut fields = record_to_fields(&record());
        fields.insert("Stream".to_string(), "Sci".to_string());
        let document = Document {
            id: DocumentId::parse("doc-1").unwrap(),
            fields,
        };

        let err = parse_document(&document).unwrap_err();
        assert!(matches!(err, RepoError::InvalidData(message) if message.contains("Sci")));
    }

    #[test]
    fn parse_rejects_missing_field() {
        let mut fields = record_to_fields(&record());
        fields.remove("Email");
        let document = Document {
            id: DocumentId::parse("doc-2").unwrap(),
            fields,
        };

        assert!(matches!(
            parse_document(&document),
            Err(RepoError::InvalidData(_))
        ));
    }
}
