#![allow(dead_code)]

use admission_core::db::DbError;
use admission_core::{
    AdmissionForm, Document, DocumentFields, DocumentId, DocumentStore, StoreError, StoreResult,
};
use std::cell::Cell;
use std::rc::Rc;

pub fn valid_form() -> AdmissionForm {
    AdmissionForm {
        name: "Asha Rao".to_string(),
        email: "asha.rao@example.com".to_string(),
        contact: "+919876543210".to_string(),
        gender: "Female".to_string(),
        stream: "Science".to_string(),
    }
}

pub fn second_form() -> AdmissionForm {
    AdmissionForm {
        name: "Vikram Singh".to_string(),
        email: "vikram@school.in".to_string(),
        contact: "+911234567890".to_string(),
        gender: "Male".to_string(),
        stream: "Commerce".to_string(),
    }
}

/// Shared switch that takes a wrapped store offline.
#[derive(Clone, Default)]
pub struct Outage(Rc<Cell<bool>>);

impl Outage {
    pub fn set(&self, offline: bool) {
        self.0.set(offline);
    }

    fn check(&self) -> StoreResult<()> {
        if self.0.get() {
            return Err(StoreError::Db(DbError::Sqlite(
                rusqlite::Error::InvalidQuery,
            )));
        }
        Ok(())
    }
}

/// Wraps a store and fails every call while the outage switch is on.
/// Counts `add` calls so tests can assert nothing reached the store.
pub struct FlakyStore<S> {
    inner: S,
    outage: Outage,
    adds: Rc<Cell<usize>>,
}

impl<S: DocumentStore> FlakyStore<S> {
    pub fn new(inner: S, outage: Outage, adds: Rc<Cell<usize>>) -> Self {
        Self {
            inner,
            outage,
            adds,
        }
    }
}

impl<S: DocumentStore> DocumentStore for FlakyStore<S> {
    fn add(&self, fields: &DocumentFields) -> StoreResult<DocumentId> {
        self.adds.set(self.adds.get() + 1);
        self.outage.check()?;
        self.inner.add(fields)
    }

    fn stream(&self) -> StoreResult<Vec<Document>> {
        self.outage.check()?;
        self.inner.stream()
    }

    fn update(&self, id: &DocumentId, fields: &DocumentFields) -> StoreResult<()> {
        self.outage.check()?;
        self.inner.update(id, fields)
    }

    fn delete(&self, id: &DocumentId) -> StoreResult<()> {
        self.outage.check()?;
        self.inner.delete(id)
    }
}
