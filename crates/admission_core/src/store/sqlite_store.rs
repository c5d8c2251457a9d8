//! SQLite-backed document store.
//!
//! # Responsibility
//! - Persist schemaless documents as JSON bodies in the `documents` table.
//! - Issue random document ids on `add`.
//!
//! # Invariants
//! - Listing order is insertion order (`seq ASC`).
//! - Every write is a single statement or a single transaction.

use super::{
    validate_collection_name, Document, DocumentFields, DocumentStore, StoreError, StoreResult,
};
use crate::model::admission::DocumentId;
use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

/// Document store over one collection of an open SQLite connection.
pub struct SqliteDocumentStore<'conn> {
    conn: &'conn Connection,
    collection: String,
}

impl<'conn> SqliteDocumentStore<'conn> {
    /// Creates a store handle for `collection`.
    ///
    /// # Errors
    /// - `InvalidCollection` when the name is empty or contains `/`.
    pub fn new(conn: &'conn Connection, collection: &str) -> StoreResult<Self> {
        let collection = validate_collection_name(collection)?.to_string();
        Ok(Self { conn, collection })
    }

    pub fn collection(&self) -> &str {
        self.collection.as_str()
    }
}

impl DocumentStore for SqliteDocumentStore<'_> {
    fn add(&self, fields: &DocumentFields) -> StoreResult<DocumentId> {
        let body = serde_json::to_string(fields)?;
        let id = DocumentId::from_store(Uuid::new_v4().simple().to_string());

        self.conn.execute(
            "INSERT INTO documents (collection, id, fields) VALUES (?1, ?2, ?3);",
            params![self.collection, id.as_str(), body],
        )?;

        debug!(
            "event=doc_add module=store status=ok collection={} id={}",
            self.collection, id
        );
        Ok(id)
    }

    fn stream(&self) -> StoreResult<Vec<Document>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, fields
             FROM documents
             WHERE collection = ?1
             ORDER BY seq ASC;",
        )?;
        let mut rows = stmt.query([self.collection.as_str()])?;
        let mut documents = Vec::new();

        while let Some(row) = rows.next()? {
            let body: String = row.get("fields")?;
            documents.push(Document {
                id: DocumentId::from_store(row.get("id")?),
                fields: serde_json::from_str(&body)?,
            });
        }

        Ok(documents)
    }

    fn update(&self, id: &DocumentId, fields: &DocumentFields) -> StoreResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        let existing: Option<String> = tx
            .query_row(
                "SELECT fields FROM documents WHERE collection = ?1 AND id = ?2;",
                params![self.collection, id.as_str()],
                |row| row.get(0),
            )
            .optional()?;

        let Some(existing) = existing else {
            return Err(StoreError::DocumentNotFound(id.clone()));
        };

        let mut merged: DocumentFields = serde_json::from_str(&existing)?;
        merged.extend(fields.iter().map(|(key, value)| (key.clone(), value.clone())));

        tx.execute(
            "UPDATE documents
             SET
                fields = ?1,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE collection = ?2 AND id = ?3;",
            params![serde_json::to_string(&merged)?, self.collection, id.as_str()],
        )?;
        tx.commit()?;

        debug!(
            "event=doc_update module=store status=ok collection={} id={}",
            self.collection, id
        );
        Ok(())
    }

    fn delete(&self, id: &DocumentId) -> StoreResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM documents WHERE collection = ?1 AND id = ?2;",
            params![self.collection, id.as_str()],
        )?;

        info!(
            "event=doc_delete module=store status=ok collection={} id={} existed={}",
            self.collection,
            id,
            changed > 0
        );
        Ok(())
    }
}
