//! Typed reads and writes over one SQLite session.
//!
//! An [`AuthorStore`] holds one pooled connection. It is checked out per
//! unit of work by [`crate::db::Database::session`] and goes back to the
//! pool when dropped. Every query goes through `prepare_cached`, so the
//! statement cache stays warm across sessions on the same connection.

use rusqlite::{params, OptionalExtension};

use crate::db::converters::{row_to_article, row_to_author, ARTICLE_COLUMNS, AUTHOR_COLUMNS};
use crate::db::database::PooledConnection;
use crate::db::schema::reset_schema;
use crate::error::Result;
use crate::types::{Article, Author};

// ---------------------------------------------------------------------------
// DeleteOutcome
// ---------------------------------------------------------------------------

/// What [`AuthorStore::delete_author`] removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub author_deleted: bool,
    pub articles_deleted: usize,
}

// ---------------------------------------------------------------------------
// AuthorStore
// ---------------------------------------------------------------------------

pub struct AuthorStore {
    conn: PooledConnection,
}

impl std::fmt::Debug for AuthorStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorStore").finish_non_exhaustive()
    }
}

impl Drop for AuthorStore {
    fn drop(&mut self) {
        tracing::debug!("store session returned to pool");
    }
}

const INSERT_AUTHOR_SQL: &str = "INSERT INTO author (id, name, age) VALUES (?1, ?2, ?3)";

const INSERT_ARTICLE_SQL: &str = "\
INSERT INTO article (id, title, content, author_id) VALUES (?1, ?2, ?3, ?4)";

impl AuthorStore {
    /// Wrap a connection checked out of the pool.
    pub fn from_pooled(conn: PooledConnection) -> Self {
        tracing::debug!("store session checked out");
        Self { conn }
    }

    #[cfg(test)]
    pub(crate) fn connection(&self) -> &rusqlite::Connection {
        &self.conn
    }

    /// Drop and recreate both tables. Destroys all data.
    pub fn reset_schema(&self) -> Result<()> {
        reset_schema(&self.conn)
    }

    // -------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------

    /// Every author, unfiltered, in the order SQLite returns them.
    pub fn all_authors(&self) -> Result<Vec<Author>> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!("SELECT {AUTHOR_COLUMNS} FROM author"))?;
        let rows = stmt.query_map([], row_to_author)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Every article, unfiltered, in the order SQLite returns them.
    pub fn all_articles(&self) -> Result<Vec<Article>> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!("SELECT {ARTICLE_COLUMNS} FROM article"))?;
        let rows = stmt.query_map([], row_to_article)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn get_author(&self, id: i64) -> Result<Option<Author>> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!("SELECT {AUTHOR_COLUMNS} FROM author WHERE id = ?1"))?;
        Ok(stmt.query_row(params![id], row_to_author).optional()?)
    }

    /// Articles whose `author_id` is `author_id`.
    pub fn articles_by_author(&self, author_id: i64) -> Result<Vec<Article>> {
        let mut stmt = self.conn.prepare_cached(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM article WHERE author_id = ?1"
        ))?;
        let rows = stmt.query_map(params![author_id], row_to_article)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    // -------------------------------------------------------------------
    // Writes
    // -------------------------------------------------------------------

    /// Insert an author. Fails on a duplicate id.
    pub fn insert_author(&self, author: &Author) -> Result<()> {
        let mut stmt = self.conn.prepare_cached(INSERT_AUTHOR_SQL)?;
        stmt.execute(params![author.id, author.name, author.age])?;
        Ok(())
    }

    /// Insert an article. Fails on a duplicate id or an `author_id` that
    /// does not name an existing author.
    pub fn insert_article(&self, article: &Article) -> Result<()> {
        let mut stmt = self.conn.prepare_cached(INSERT_ARTICLE_SQL)?;
        stmt.execute(params![
            article.id,
            article.title,
            article.content,
            article.author_id,
        ])?;
        Ok(())
    }

    /// Insert authors and articles inside a single transaction.
    ///
    /// Authors go in first so articles can reference them.
    pub fn insert_all(&self, authors: &[Author], articles: &[Article]) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut ins_author = tx.prepare_cached(INSERT_AUTHOR_SQL)?;
            for author in authors {
                ins_author.execute(params![author.id, author.name, author.age])?;
            }
            let mut ins_article = tx.prepare_cached(INSERT_ARTICLE_SQL)?;
            for article in articles {
                ins_article.execute(params![
                    article.id,
                    article.title,
                    article.content,
                    article.author_id,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// Delete an author together with every article that references it.
    ///
    /// Articles first, then the author, in one transaction: a failure in
    /// either step leaves both tables untouched.
    pub fn delete_author(&self, id: i64) -> Result<DeleteOutcome> {
        let tx = self.conn.unchecked_transaction()?;
        let (articles_deleted, authors_deleted) = {
            let mut del_articles =
                tx.prepare_cached("DELETE FROM article WHERE author_id = ?1")?;
            let articles = del_articles.execute(params![id])?;

            let mut del_author = tx.prepare_cached("DELETE FROM author WHERE id = ?1")?;
            let authors = del_author.execute(params![id])?;
            (articles, authors)
        };
        tx.commit()?;

        tracing::info!(
            author_id = id,
            articles_deleted,
            "deleted author with its articles"
        );
        Ok(DeleteOutcome {
            author_deleted: authors_deleted > 0,
            articles_deleted,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::database::{Database, MEMORY_URL};
    use crate::error::AuthorshipError;
    use pretty_assertions::assert_eq as pa_eq;

    /// Spin up an in-memory store with the schema applied.
    ///
    /// The store keeps its connection checked out, so the database lives
    /// as long as the returned session even after the pool handle drops.
    fn setup() -> AuthorStore {
        let db = Database::open(MEMORY_URL).expect("in-memory open should succeed");
        let store = db.session().expect("checkout should succeed");
        store.reset_schema().expect("schema reset should succeed");
        store
    }

    fn seeded() -> AuthorStore {
        let store = setup();
        store
            .insert_all(
                &[Author::new(1, "Ada", 30), Author::new(2, "Grace", 45)],
                &[
                    Article::new(10, "Engines", "Notes on engines", Some(1)),
                    Article::new(11, "Loops", "On loops", Some(1)),
                    Article::new(12, "Compilers", "A-0", Some(2)),
                    Article::new(13, "Anonymous", "No byline", None),
                ],
            )
            .unwrap();
        store
    }

    #[test]
    fn empty_store_returns_empty_lists() {
        let store = setup();
        assert!(store.all_authors().unwrap().is_empty());
        assert!(store.all_articles().unwrap().is_empty());
    }

    #[test]
    fn all_authors_returns_every_row() {
        let store = seeded();
        let authors = store.all_authors().unwrap();
        pa_eq!(
            authors,
            vec![Author::new(1, "Ada", 30), Author::new(2, "Grace", 45)]
        );
    }

    #[test]
    fn all_articles_includes_orphans() {
        let store = seeded();
        let articles = store.all_articles().unwrap();
        assert_eq!(articles.len(), 4);
        assert!(articles.iter().any(|a| a.id == 13 && a.author_id.is_none()));
    }

    #[test]
    fn get_author_hit_and_miss() {
        let store = seeded();
        assert_eq!(store.get_author(2).unwrap(), Some(Author::new(2, "Grace", 45)));
        assert_eq!(store.get_author(99).unwrap(), None);
    }

    #[test]
    fn articles_by_author_filters_on_reference() {
        let store = seeded();
        let ada = store.articles_by_author(1).unwrap();
        assert_eq!(ada.len(), 2);
        assert!(ada.iter().all(|a| a.author_id == Some(1)));
        assert!(store.articles_by_author(99).unwrap().is_empty());
    }

    #[test]
    fn nullable_columns_round_trip_as_none() {
        let store = setup();
        store
            .insert_author(&Author {
                id: 1,
                name: None,
                age: None,
            })
            .unwrap();
        let author = store.get_author(1).unwrap().unwrap();
        assert_eq!(author.name, None);
        assert_eq!(author.age, None);
    }

    #[test]
    fn duplicate_author_id_is_rejected() {
        let store = seeded();
        let err = store.insert_author(&Author::new(1, "Other", 1)).unwrap_err();
        assert!(matches!(err, AuthorshipError::Sqlite(_)));
    }

    #[test]
    fn dangling_author_reference_is_rejected() {
        let store = setup();
        let err = store
            .insert_article(&Article::new(1, "T", "C", Some(42)))
            .unwrap_err();
        assert!(matches!(err, AuthorshipError::Sqlite(_)));
        assert!(store.all_articles().unwrap().is_empty());
    }

    #[test]
    fn insert_all_is_atomic() {
        let store = setup();
        let result = store.insert_all(
            &[Author::new(1, "Ada", 30)],
            &[Article::new(1, "T", "C", Some(7))],
        );
        assert!(result.is_err());
        assert!(store.all_authors().unwrap().is_empty(), "author insert must roll back");
    }

    #[test]
    fn delete_author_cascades_to_articles() {
        let store = seeded();
        let outcome = store.delete_author(1).unwrap();
        assert_eq!(
            outcome,
            DeleteOutcome {
                author_deleted: true,
                articles_deleted: 2,
            }
        );

        let remaining: Vec<i64> = store.all_articles().unwrap().iter().map(|a| a.id).collect();
        assert_eq!(remaining, vec![12, 13]);
        assert_eq!(store.get_author(1).unwrap(), None);
    }

    #[test]
    fn delete_missing_author_is_a_no_op() {
        let store = seeded();
        let outcome = store.delete_author(99).unwrap();
        assert!(!outcome.author_deleted);
        assert_eq!(outcome.articles_deleted, 0);
        assert_eq!(store.all_articles().unwrap().len(), 4);
    }

    #[test]
    fn plain_author_delete_without_cascade_is_refused() {
        let store = seeded();
        let direct = store.conn.execute("DELETE FROM author WHERE id = 1", []);
        assert!(direct.is_err(), "FK must block deleting a referenced author");
    }
}
