//! Row-to-record mapping for the `author` and `article` tables.
//!
//! Column order matches the `SELECT` lists in [`crate::db::store`].

use rusqlite::Row;

use crate::types::{Article, Author};

/// Columns selected for every author query, in the order read below.
pub const AUTHOR_COLUMNS: &str = "id, name, age";

/// Columns selected for every article query, in the order read below.
pub const ARTICLE_COLUMNS: &str = "id, title, content, author_id";

pub fn row_to_author(row: &Row<'_>) -> rusqlite::Result<Author> {
    Ok(Author {
        id: row.get(0)?,
        name: row.get(1)?,
        age: row.get(2)?,
    })
}

pub fn row_to_article(row: &Row<'_>) -> rusqlite::Result<Article> {
    Ok(Article {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        author_id: row.get(3)?,
    })
}
