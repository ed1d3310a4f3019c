//! SQLite schema for the `author` and `article` tables.
//!
//! The schema has no migrations: [`reset_schema`] drops every known table
//! and recreates it from the DDL below. Any existing data is lost.

use std::time::Duration;

use rusqlite::Connection;

use crate::error::Result;

// ---------------------------------------------------------------------------
// DDL constants
// ---------------------------------------------------------------------------

const CREATE_AUTHOR: &str = "\
CREATE TABLE author (
  id INTEGER PRIMARY KEY,
  name TEXT,
  age INTEGER
)";

// No ON DELETE CASCADE: removing an author's articles is an explicit step
// of `AuthorStore::delete_author`. The FK still rejects orphaned references.
const CREATE_ARTICLE: &str = "\
CREATE TABLE article (
  id INTEGER PRIMARY KEY,
  title TEXT,
  content TEXT,
  author_id INTEGER,
  FOREIGN KEY (author_id) REFERENCES author(id)
)";

const CREATE_INDEXES: &[&str] = &["CREATE INDEX idx_article_author ON article(author_id)"];

/// Dependents first, so dropping never trips the foreign key.
const DROP_TABLES: &[&str] = &[
    "DROP TABLE IF EXISTS article",
    "DROP TABLE IF EXISTS author",
];

/// Tables owned by this schema, in creation order.
pub const TABLES: &[&str] = &["author", "article"];

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Apply per-connection settings. SQLite keeps `foreign_keys` per
/// connection, so the pool runs this on every connection it opens.
pub fn configure_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.pragma_update(None, "foreign_keys", "ON")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    Ok(())
}

/// Drop all known tables, recreate them, and commit.
///
/// Runs in one transaction: either the fresh, empty schema is in place
/// afterwards or nothing changed.
pub fn reset_schema(conn: &Connection) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    for ddl in DROP_TABLES {
        tx.execute_batch(ddl)?;
    }
    tx.execute_batch(CREATE_AUTHOR)?;
    tx.execute_batch(CREATE_ARTICLE)?;
    for ddl in CREATE_INDEXES {
        tx.execute_batch(ddl)?;
    }
    tx.commit()?;
    tracing::info!("schema reset: dropped and recreated {:?}", TABLES);
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
