//! Project binding for store files.

use super::{DbError, DbResult};
use log::{info, warn};
use rusqlite::{params, Connection, OptionalExtension};

const PROJECT_KEY: &str = "project_id";

/// Binds the store to `project_id` on first use, then enforces it.
///
/// # Errors
/// - `ProjectMismatch` when the store is already bound to another project.
pub fn bind_project(conn: &Connection, project_id: &str) -> DbResult<()> {
    match bound_project(conn)? {
        Some(bound) if bound == project_id => Ok(()),
        Some(bound) => {
            warn!("event=project_bind module=db status=error error_code=project_mismatch");
            Err(DbError::ProjectMismatch {
                bound,
                requested: project_id.to_string(),
            })
        }
        None => {
            conn.execute(
                "INSERT INTO store_meta (key, value) VALUES (?1, ?2);",
                params![PROJECT_KEY, project_id],
            )?;
            info!("event=project_bind module=db status=ok first_bind=true");
            Ok(())
        }
    }
}

/// Returns the project this store is bound to, if any.
pub fn bound_project(conn: &Connection) -> DbResult<Option<String>> {
    let value = conn
        .query_row(
            "SELECT value FROM store_meta WHERE key = ?1;",
            [PROJECT_KEY],
            |row| row.get::<_, String>(0),
        )
        .optional()?;
    Ok(value)
}
