//! HTTP transport for the GraphQL schema, built on axum.
//!
//! Routes `/graphql` and `/` identically: `POST` executes a GraphQL
//! document, `GET` serves the GraphiQL explorer (when enabled).
//!
//! Usage: `authorship serve --listen 0.0.0.0:5000`

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;

use crate::api::{build_schema, execute, AuthorshipSchema};
use crate::db::Database;

/// Shared state cloned into every handler. Holds the store handle, never a
/// session: sessions are opened per request by [`execute`].
#[derive(Clone)]
pub struct AppState {
    schema: AuthorshipSchema,
    db: Database,
    graphiql: bool,
}

impl AppState {
    pub fn new(db: Database, graphiql: bool) -> Self {
        Self {
            schema: build_schema(),
            db,
            graphiql,
        }
    }
}

/// Build the router serving both GraphQL mount points.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/graphql", get(explorer).post(graphql))
        .route("/", get(explorer).post(graphql))
        .with_state(state)
}

async fn graphql(State(state): State<AppState>, request: GraphQLRequest) -> GraphQLResponse {
    execute(&state.schema, &state.db, request.into_inner())
        .await
        .into()
}

async fn explorer(State(state): State<AppState>, uri: Uri) -> Response {
    if !state.graphiql {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }
    Html(GraphiQLSource::build().endpoint(uri.path()).finish()).into_response()
}

/// Serve the GraphQL API on `addr` until Ctrl-C.
pub async fn run_http_server(
    db: Database,
    addr: &str,
    graphiql: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = router(AppState::new(db, graphiql));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("GraphQL server listening on http://{}/graphql", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down HTTP server");
        })
        .await?;

    Ok(())
}
