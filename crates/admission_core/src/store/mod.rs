//! Document store contract and implementations.
//!
//! # Responsibility
//! - Define the minimal schemaless CRUD contract the repository consumes.
//! - Keep store-specific details (SQL, body encoding) behind that contract.
//!
//! # Invariants
//! - One store handle addresses exactly one named collection.
//! - Document ids are issued by the store and never reused.
//! - `delete` of an absent document is not an error.
//! - `update` of an absent document is an error.

use crate::db::DbError;
use crate::model::admission::DocumentId;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod sqlite_store;

pub use sqlite_store::SqliteDocumentStore;

/// Schemaless document body: field name to string value.
pub type DocumentFields = BTreeMap<String, String>;

pub type StoreResult<T> = Result<T, StoreError>;

/// One stored document as returned by `DocumentStore::stream`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: DocumentId,
    pub fields: DocumentFields,
}

#[derive(Debug)]
pub enum StoreError {
    /// Connectivity failure or rejected write.
    Db(DbError),
    DocumentNotFound(DocumentId),
    InvalidCollection(String),
    /// Stored body could not be encoded or decoded.
    Encoding(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::DocumentNotFound(id) => write!(f, "no document to update: {id}"),
            Self::InvalidCollection(name) => write!(f, "invalid collection name: `{name}`"),
            Self::Encoding(err) => write!(f, "invalid document body: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encoding(err) => Some(err),
            Self::DocumentNotFound(_) | Self::InvalidCollection(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encoding(value)
    }
}

/// Minimal CRUD contract over one document collection.
pub trait DocumentStore {
    /// Appends a document and returns its new id.
    fn add(&self, fields: &DocumentFields) -> StoreResult<DocumentId>;
    /// Returns every document currently in the collection, in store order.
    fn stream(&self) -> StoreResult<Vec<Document>>;
    /// Merges `fields` into an existing document.
    fn update(&self, id: &DocumentId, fields: &DocumentFields) -> StoreResult<()>;
    /// Removes a document. Absent documents are ignored.
    fn delete(&self, id: &DocumentId) -> StoreResult<()>;
}

impl<S: DocumentStore + ?Sized> DocumentStore for &S {
    fn add(&self, fields: &DocumentFields) -> StoreResult<DocumentId> {
        (**self).add(fields)
    }

    fn stream(&self) -> StoreResult<Vec<Document>> {
        (**self).stream()
    }

    fn update(&self, id: &DocumentId, fields: &DocumentFields) -> StoreResult<()> {
        (**self).update(id, fields)
    }

    fn delete(&self, id: &DocumentId) -> StoreResult<()> {
        (**self).delete(id)
    }
}

/// Checks a collection name: non-empty after trim and free of `/`.
pub fn validate_collection_name(name: &str) -> StoreResult<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.contains('/') {
        return Err(StoreError::InvalidCollection(name.to_string()));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::validate_collection_name;

    #[test]
    fn collection_name_rules() {
        assert_eq!(validate_collection_name(" admissions ").unwrap(), "admissions");
        assert!(validate_collection_name("").is_err());
        assert!(validate_collection_name("a/b").is_err());
    }
}
