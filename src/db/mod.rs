// Database layer: SQLite storage for collected headlines.
//
// We use rusqlite with the "bundled" feature so there's no system SQLite
// dependency. The database file lives wherever THREATLENS_DB_PATH points
// (defaults to ./threatlens.db).

pub mod models;
pub mod queries;
pub mod schema;
pub mod sqlite;
pub mod traits;

pub use sqlite::SqliteStore;
pub use traits::RecordStore;

use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;

/// Open (or create) the database and run migrations.
///
/// Called by `threatlens init` and by every command that writes records.
pub fn initialize(db_path: &str) -> Result<Connection> {
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory for database: {}", db_path))?;
        }
    }

    let conn = Connection::open(db_path)
        .with_context(|| format!("Failed to open database at {}", db_path))?;

    // WAL lets the web readers proceed while the collector writes
    conn.pragma_update(None, "journal_mode", "WAL")?;

    schema::create_tables(&conn)?;

    Ok(conn)
}

/// Open an existing database (fails if it doesn't exist yet).
pub fn open(db_path: &str) -> Result<Connection> {
    if !Path::new(db_path).exists() {
        anyhow::bail!(
            "Database not found at {}. Run `threatlens init` first.",
            db_path
        );
    }

    let conn = Connection::open(db_path)
        .with_context(|| format!("Failed to open database at {}", db_path))?;

    conn.pragma_update(None, "journal_mode", "WAL")?;
    // Older files may predate the latest migration
    schema::create_tables(&conn)?;

    Ok(conn)
}

/// Open an existing database behind the RecordStore trait.
pub fn open_store(db_path: &str) -> Result<Arc<dyn RecordStore>> {
    let conn = open(db_path)?;
    Ok(Arc::new(SqliteStore::new(conn)))
}

/// Create (if needed) and open the database behind the RecordStore trait.
pub fn initialize_store(db_path: &str) -> Result<Arc<dyn RecordStore>> {
    let conn = initialize(db_path)?;
    Ok(Arc::new(SqliteStore::new(conn)))
}
