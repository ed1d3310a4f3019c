//! Root query type.

use async_graphql::{Context, Object, Result};

use crate::api::session;
use crate::api::types::{nullable_list, ArticleNode, AuthorNode, NullableList};

/// Read-only root. Neither field takes arguments: each is one unfiltered,
/// unordered fetch of its table.
#[derive(Debug, Default, Clone, Copy)]
pub struct QueryRoot;

#[Object(name = "Query")]
impl QueryRoot {
    /// All articles.
    async fn articles(&self, ctx: &Context<'_>) -> Result<NullableList<ArticleNode>> {
        let articles = session(ctx)?.with_store(|store| store.all_articles())?;
        Ok(nullable_list(articles, ArticleNode))
    }

    /// All authors.
    async fn authors(&self, ctx: &Context<'_>) -> Result<NullableList<AuthorNode>> {
        let authors = session(ctx)?.with_store(|store| store.all_authors())?;
        Ok(nullable_list(authors, AuthorNode))
    }
}
