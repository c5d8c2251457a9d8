use admission_core::db::migrations::latest_version;
use admission_core::db::{open_db, open_db_in_memory, DbError};
use admission_core::{DocumentFields, DocumentId, DocumentStore, SqliteDocumentStore, StoreError};
use rusqlite::Connection;

fn fields(pairs: &[(&str, &str)]) -> DocumentFields {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "documents");
    assert_table_exists(&conn, "store_meta");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("admissions.sqlite3");

    let conn_first = open_db(&path).unwrap();
    let store = SqliteDocumentStore::new(&conn_first, "admissions").unwrap();
    let id = store.add(&fields(&[("Name", "Asha")])).unwrap();
    drop(store);
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let store = SqliteDocumentStore::new(&conn_second, "admissions").unwrap();
    let documents = store.stream().unwrap();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].id, id);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn update_merges_given_keys_and_keeps_others() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteDocumentStore::new(&conn, "admissions").unwrap();

    let id = store
        .add(&fields(&[("Name", "Asha"), ("Stream", "Science")]))
        .unwrap();
    store.update(&id, &fields(&[("Stream", "Arts")])).unwrap();

    let documents = store.stream().unwrap();
    assert_eq!(
        documents[0].fields,
        fields(&[("Name", "Asha"), ("Stream", "Arts")])
    );
}

#[test]
fn update_of_absent_document_fails_and_writes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteDocumentStore::new(&conn, "admissions").unwrap();
    let missing = DocumentId::parse("missing").unwrap();

    let err = store.update(&missing, &fields(&[("Name", "x")])).unwrap_err();
    assert!(matches!(err, StoreError::DocumentNotFound(id) if id == missing));
    assert!(store.stream().unwrap().is_empty());
}

#[test]
fn delete_of_absent_document_succeeds() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteDocumentStore::new(&conn, "admissions").unwrap();

    store.delete(&DocumentId::parse("never-existed").unwrap()).unwrap();
}

#[test]
fn collections_are_isolated() {
    let conn = open_db_in_memory().unwrap();
    let admissions = SqliteDocumentStore::new(&conn, "admissions").unwrap();
    let archive = SqliteDocumentStore::new(&conn, "archive").unwrap();

    let id = admissions.add(&fields(&[("Name", "Asha")])).unwrap();
    assert!(archive.stream().unwrap().is_empty());

    archive.delete(&id).unwrap();
    assert_eq!(admissions.stream().unwrap().len(), 1);
    assert!(archive.update(&id, &fields(&[("Name", "x")])).is_err());
}

#[test]
fn invalid_collection_name_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    assert!(matches!(
        SqliteDocumentStore::new(&conn, "admissions/2024"),
        Err(StoreError::InvalidCollection(_))
    ));
}

#[test]
fn generated_ids_are_unique_and_non_empty() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteDocumentStore::new(&conn, "admissions").unwrap();

    let first = store.add(&fields(&[("Name", "a")])).unwrap();
    let second = store.add(&fields(&[("Name", "a")])).unwrap();
    assert_ne!(first, second);
    assert_eq!(first.as_str().len(), 32);
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
