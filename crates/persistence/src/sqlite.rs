// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Connection setup for the mapping store.
//!
//! Everything the Diesel DSL cannot say lives here: PRAGMAs, the embedded
//! migrations and `last_insert_rowid()`.

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

use crate::error::PersistenceError;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Journal mode applied when a connection is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Journal {
    /// `SQLite`'s default rollback journal; used for in-memory stores.
    Rollback,
    /// Write-ahead logging; used for file-backed stores.
    WriteAhead,
}

#[derive(QueryableByName)]
struct ForeignKeysPragma {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

/// Opens the store at `database_url` and brings its schema up to date.
///
/// Foreign keys are switched on before migrating, and the connection is
/// rejected if the PRAGMA did not take.
///
/// # Errors
///
/// Returns an error if the connection, a PRAGMA or a migration fails.
pub fn open(database_url: &str, journal: Journal) -> Result<SqliteConnection, PersistenceError> {
    info!(database_url, ?journal, "Opening mapping store");

    let mut conn: SqliteConnection = SqliteConnection::establish(database_url)?;

    pragma(&mut conn, "PRAGMA foreign_keys = ON")?;
    if journal == Journal::WriteAhead {
        pragma(&mut conn, "PRAGMA journal_mode = WAL")?;
    }

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?;
    debug!(count = applied.len(), "Migrations applied");

    if !foreign_keys_enabled(&mut conn)? {
        return Err(PersistenceError::ForeignKeyEnforcementNotEnabled);
    }

    Ok(conn)
}

/// Reports whether the connection enforces foreign keys.
///
/// # Errors
///
/// Returns an error if the PRAGMA query fails.
pub fn foreign_keys_enabled(conn: &mut SqliteConnection) -> Result<bool, PersistenceError> {
    let row: ForeignKeysPragma = diesel::sql_query("PRAGMA foreign_keys").get_result(conn)?;
    Ok(row.foreign_keys != 0)
}

/// Rowid of the most recent insert on this connection.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn last_insert_rowid(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(diesel::select(sql::<BigInt>("last_insert_rowid()")).get_result(conn)?)
}

fn pragma(conn: &mut SqliteConnection, statement: &str) -> Result<(), PersistenceError> {
    diesel::sql_query(statement)
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("{statement}: {e}")))?;
    Ok(())
}
