//! Database connection and schema management.

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use crate::{DatabaseError, DatabaseErrorKind, DatabaseResult};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Open a SQLite connection.
///
/// `database_url` is a file path or `:memory:`.
///
/// # Errors
///
/// Returns an error if the database cannot be opened.
#[instrument]
pub fn establish_connection(database_url: &str) -> DatabaseResult<SqliteConnection> {
    debug!("Opening SQLite connection");
    SqliteConnection::establish(database_url)
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Connection(e.to_string())))
}

/// Create the catalog tables if they are missing.
///
/// # Errors
///
/// Returns an error if a migration fails to apply.
#[instrument(skip(conn))]
pub fn run_migrations(conn: &mut SqliteConnection) -> DatabaseResult<()> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Migration(e.to_string())))?;
    info!(count = applied.len(), "Applied catalog migrations");
    Ok(())
}

/// Drop the catalog tables.
///
/// # Errors
///
/// Returns an error if a migration fails to revert.
#[instrument(skip(conn))]
pub fn revert_migrations(conn: &mut SqliteConnection) -> DatabaseResult<()> {
    let reverted = conn
        .revert_all_migrations(MIGRATIONS)
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Migration(e.to_string())))?;
    info!(count = reverted.len(), "Reverted catalog migrations");
    Ok(())
}
