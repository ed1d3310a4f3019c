//! GraphQL object types for the two entities.
//!
//! Scalars come straight from the wrapped row. Relationship fields fetch
//! lazily through the request's session: each requested `author` or
//! `articles` field issues its own query.

use async_graphql::{Context, Object, Result, ID};

use crate::api::session;
use crate::types::{Article, Author};

/// The GraphQL `Article` type.
#[derive(Debug, Clone)]
pub struct ArticleNode(pub Article);

/// The GraphQL `Author` type.
#[derive(Debug, Clone)]
pub struct AuthorNode(pub Author);

/// Shape used by every list field: `[T]` with nullable items.
pub type NullableList<T> = Option<Vec<Option<T>>>;

pub(crate) fn nullable_list<R, T>(rows: Vec<R>, wrap: impl Fn(R) -> T) -> NullableList<T> {
    Some(rows.into_iter().map(|row| Some(wrap(row))).collect())
}

#[Object(name = "Article")]
impl ArticleNode {
    async fn id(&self) -> Option<ID> {
        Some(ID::from(self.0.id.to_string()))
    }

    async fn title(&self) -> Option<&str> {
        self.0.title.as_deref()
    }

    async fn content(&self) -> Option<&str> {
        self.0.content.as_deref()
    }

    /// The author this article references, if any.
    async fn author(&self, ctx: &Context<'_>) -> Result<Option<AuthorNode>> {
        let Some(author_id) = self.0.author_id else {
            return Ok(None);
        };
        let author = session(ctx)?.with_store(|store| store.get_author(author_id))?;
        Ok(author.map(AuthorNode))
    }
}

#[Object(name = "Author")]
impl AuthorNode {
    async fn id(&self) -> Option<ID> {
        Some(ID::from(self.0.id.to_string()))
    }

    async fn name(&self) -> Option<&str> {
        self.0.name.as_deref()
    }

    async fn age(&self) -> Option<i32> {
        self.0.age
    }

    /// Every article whose author is this author.
    async fn articles(&self, ctx: &Context<'_>) -> Result<NullableList<ArticleNode>> {
        let id = self.0.id;
        let articles = session(ctx)?.with_store(|store| store.articles_by_author(id))?;
        Ok(nullable_list(articles, ArticleNode))
    }
}
