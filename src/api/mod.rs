//! GraphQL query layer.
//!
//! - [`query`] — the `Query` root with `articles` and `authors`
//! - [`types`] — the `Article` and `Author` object types
//!
//! The schema carries no store of its own. [`execute`] checks out one
//! session per request, injects it as request data, and hands it back to
//! the pool when execution finishes.

pub mod query;
pub mod types;

use std::sync::Mutex;

use async_graphql::{
    Context, EmptyMutation, EmptySubscription, Request, Response, Schema, ServerError, Value,
};

use crate::db::{AuthorStore, Database};
use crate::error::Result;

pub use query::QueryRoot;
pub use types::{ArticleNode, AuthorNode};

/// The full, read-only schema.
pub type AuthorshipSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

pub fn build_schema() -> AuthorshipSchema {
    Schema::build(QueryRoot, EmptyMutation, EmptySubscription).finish()
}

// ---------------------------------------------------------------------------
// Per-request session
// ---------------------------------------------------------------------------

/// One request's store session, shared by all of its resolvers.
///
/// Resolvers take the lock only for the duration of a single query.
pub struct RequestSession {
    store: Mutex<AuthorStore>,
}

impl RequestSession {
    pub fn new(store: AuthorStore) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }

    pub(crate) fn with_store<T>(&self, f: impl FnOnce(&AuthorStore) -> Result<T>) -> Result<T> {
        let store = self.store.lock().unwrap_or_else(|e| e.into_inner());
        f(&store)
    }
}

pub(crate) fn session<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a RequestSession> {
    ctx.data::<RequestSession>()
}

// ---------------------------------------------------------------------------
// Execution
// ---------------------------------------------------------------------------

/// Execute one GraphQL request on a session checked out of `db`.
///
/// A request either resolves completely or fails: when any error was
/// raised, `data` is discarded and only the errors are returned.
pub async fn execute(
    schema: &AuthorshipSchema,
    db: &Database,
    request: impl Into<Request>,
) -> Response {
    let request = request.into();
    let store = match db.session() {
        Ok(store) => store,
        Err(e) => {
            tracing::warn!("could not open store session: {e}");
            return Response::from_errors(vec![ServerError::new(e.to_string(), None)]);
        }
    };

    let mut response = schema
        .execute(request.data(RequestSession::new(store)))
        .await;

    if response.is_err() {
        for err in &response.errors {
            tracing::warn!("graphql request failed: {}", err.message);
        }
        response.data = Value::Null;
    }
    response
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
