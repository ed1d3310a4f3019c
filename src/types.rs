//! Row types for the two persisted entities.
//!
//! These are plain records mirroring the `author` and `article` tables one
//! column per field. The GraphQL layer wraps them; it never adds columns.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Author
// ---------------------------------------------------------------------------

/// A row of the `author` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: i64,
    pub name: Option<String>,
    pub age: Option<i32>,
}

impl Author {
    pub fn new(id: i64, name: impl Into<String>, age: i32) -> Self {
        Self {
            id,
            name: Some(name.into()),
            age: Some(age),
        }
    }
}

// ---------------------------------------------------------------------------
// Article
// ---------------------------------------------------------------------------

/// A row of the `article` table.
///
/// `author_id` is nullable: an article may exist without an author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    pub title: Option<String>,
    pub content: Option<String>,
    pub author_id: Option<i64>,
}

impl Article {
    pub fn new(
        id: i64,
        title: impl Into<String>,
        content: impl Into<String>,
        author_id: Option<i64>,
    ) -> Self {
        Self {
            id,
            title: Some(title.into()),
            content: Some(content.into()),
            author_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn author_serializes_with_nullable_fields() {
        let author = Author {
            id: 7,
            name: None,
            age: Some(41),
        };
        let json = serde_json::to_value(&author).unwrap();
        assert_eq!(json, serde_json::json!({"id": 7, "name": null, "age": 41}));
    }

    #[test]
    fn orphan_article_has_no_author() {
        let article = Article::new(1, "T", "C", None);
        assert!(article.author_id.is_none());
        assert_eq!(article.title.as_deref(), Some("T"));
    }
}
