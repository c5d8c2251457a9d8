mod common;

use admission_core::db::open_db_in_memory;
use admission_core::{
    validate_form, AdmissionRepository, AdmissionService, DocumentAdmissionRepository,
    DocumentId, DocumentStore, FormField, RepoError, ServiceError, SqliteDocumentStore,
    StoreError, ValidationError,
};
use common::{second_form, valid_form, FlakyStore, Outage};
use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

#[test]
fn create_then_list_roundtrips_fields_exactly() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteDocumentStore::new(&conn, "admissions").unwrap();
    let repo = DocumentAdmissionRepository::new(store);

    let record = validate_form(&valid_form()).unwrap();
    let id = repo.create(&record).unwrap();
    assert!(!id.as_str().is_empty());

    let entries = repo.list_all().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, id);
    assert_eq!(entries[0].record, record);
}

#[test]
fn list_preserves_creation_order_and_requeries() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteDocumentStore::new(&conn, "admissions").unwrap();
    let service = AdmissionService::new(DocumentAdmissionRepository::new(store));

    assert!(service.list_all().unwrap().is_empty());

    let first = service.submit(&valid_form()).unwrap();
    let second = service.submit(&second_form()).unwrap();
    assert_ne!(first, second);

    let ids: Vec<DocumentId> = service
        .list_all()
        .unwrap()
        .into_iter()
        .map(|entry| entry.id)
        .collect();
    assert_eq!(ids, vec![first, second]);
}

#[test]
fn update_overwrites_target_and_leaves_others_alone() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteDocumentStore::new(&conn, "admissions").unwrap();
    let service = AdmissionService::new(DocumentAdmissionRepository::new(store));

    let target = service.submit(&valid_form()).unwrap();
    let other = service.submit(&second_form()).unwrap();

    let mut edited = valid_form();
    edited.name = "Asha R.".to_string();
    edited.email = "asha@college.in".to_string();
    edited.contact = "+910000000000".to_string();
    edited.gender = "Female".to_string();
    edited.stream = "Arts".to_string();
    service.update(&target, &edited).unwrap();

    let entries = service.list_all().unwrap();
    let updated = entries.iter().find(|entry| entry.id == target).unwrap();
    assert_eq!(updated.record, validate_form(&edited).unwrap());

    let untouched = entries.iter().find(|entry| entry.id == other).unwrap();
    assert_eq!(untouched.record, validate_form(&second_form()).unwrap());
    assert_eq!(entries.len(), 2);
}

#[test]
fn update_missing_document_is_store_error() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteDocumentStore::new(&conn, "admissions").unwrap();
    let service = AdmissionService::new(DocumentAdmissionRepository::new(store));

    let missing = DocumentId::parse("does-not-exist").unwrap();
    let err = service.update(&missing, &valid_form()).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Repo(RepoError::Store(StoreError::DocumentNotFound(id))) if id == missing
    ));
    assert!(service.list_all().unwrap().is_empty());
}

#[test]
fn update_revalidates_before_writing() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteDocumentStore::new(&conn, "admissions").unwrap();
    let service = AdmissionService::new(DocumentAdmissionRepository::new(store));

    let id = service.submit(&valid_form()).unwrap();
    let mut bad = valid_form();
    bad.contact = "12345".to_string();

    let err = service.update(&id, &bad).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::InvalidPhone)
    ));

    let entries = service.list_all().unwrap();
    assert_eq!(entries[0].record.contact, "+919876543210");
}

#[test]
fn delete_removes_record_and_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteDocumentStore::new(&conn, "admissions").unwrap();
    let service = AdmissionService::new(DocumentAdmissionRepository::new(store));

    let gone = service.submit(&valid_form()).unwrap();
    let kept = service.submit(&second_form()).unwrap();

    service.delete(&gone).unwrap();
    service.delete(&gone).unwrap();

    let entries = service.list_all().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, kept);
}

#[test]
fn empty_field_never_reaches_the_store() {
    let conn = open_db_in_memory().unwrap();
    let adds = Rc::new(Cell::new(0));
    let store = FlakyStore::new(
        SqliteDocumentStore::new(&conn, "admissions").unwrap(),
        Outage::default(),
        Rc::clone(&adds),
    );
    let service = AdmissionService::new(DocumentAdmissionRepository::new(store));

    for field in FormField::ALL {
        let mut form = valid_form();
        form.set_field(field, "");
        let err = service.submit(&form).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    assert_eq!(adds.get(), 0);
    assert!(service.list_all().unwrap().is_empty());
}

#[test]
fn store_outage_surfaces_as_store_error_without_partial_results() {
    let conn = open_db_in_memory().unwrap();
    let outage = Outage::default();
    let store = FlakyStore::new(
        SqliteDocumentStore::new(&conn, "admissions").unwrap(),
        outage.clone(),
        Rc::new(Cell::new(0)),
    );
    let service = AdmissionService::new(DocumentAdmissionRepository::new(store));
    let id = service.submit(&valid_form()).unwrap();

    outage.set(true);
    assert!(matches!(
        service.list_all(),
        Err(ServiceError::Repo(RepoError::Store(_)))
    ));
    assert!(matches!(
        service.submit(&second_form()),
        Err(ServiceError::Repo(RepoError::Store(_)))
    ));
    assert!(service.delete(&id).is_err());

    outage.set(false);
    let entries = service.list_all().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, id);
}

#[test]
fn malformed_stored_document_is_skipped_and_valid_ones_still_list() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteDocumentStore::new(&conn, "admissions").unwrap();
    let repo = DocumentAdmissionRepository::new(store);

    let first = repo.create(&validate_form(&valid_form()).unwrap()).unwrap();

    let mut fields = BTreeMap::new();
    fields.insert("Name".to_string(), "Legacy".to_string());
    fields.insert("Email".to_string(), "legacy@example.com".to_string());
    fields.insert("Contact".to_string(), "+919999999999".to_string());
    fields.insert("Gender".to_string(), "Other".to_string());
    fields.insert("Stream".to_string(), "Science".to_string());
    let legacy = repo.store().add(&fields).unwrap();

    let mut partial = BTreeMap::new();
    partial.insert("Name".to_string(), "No Email".to_string());
    repo.store().add(&partial).unwrap();

    let second = repo.create(&validate_form(&second_form()).unwrap()).unwrap();

    let entries = repo.list_all().unwrap();
    let ids: Vec<_> = entries.iter().map(|entry| entry.id.clone()).collect();
    assert_eq!(ids, vec![first, second]);
    assert!(!ids.contains(&legacy));
    assert_eq!(repo.store().stream().unwrap().len(), 4);
}
