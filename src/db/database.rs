//! The shared store handle.
//!
//! A [`Database`] wraps an `r2d2` pool bound to one connection string and
//! is cloned into every request handler. Each unit of work checks out an
//! [`AuthorStore`] with [`Database::session`]; dropping the store returns
//! its connection to the pool.

use std::time::Duration;

use r2d2_sqlite::SqliteConnectionManager;

use crate::db::schema::configure_connection;
use crate::db::store::AuthorStore;
use crate::error::Result;

/// Sentinel connection string for a private in-memory database.
pub const MEMORY_URL: &str = ":memory:";

/// Upper bound on open connections for a file database.
pub const DEFAULT_POOL_SIZE: u32 = 8;

/// How long a session checkout waits for a free connection.
const CHECKOUT_TIMEOUT: Duration = Duration::from_secs(30);

pub type ConnectionPool = r2d2::Pool<SqliteConnectionManager>;
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

#[derive(Clone)]
pub struct Database {
    pool: ConnectionPool,
    in_memory: bool,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.pool.state();
        f.debug_struct("Database")
            .field("in_memory", &self.in_memory)
            .field("connections", &state.connections)
            .field("idle", &state.idle_connections)
            .finish()
    }
}

impl Database {
    /// Build a pool for `url` and check that the store can be opened.
    ///
    /// `:memory:` gets a pool of exactly one connection that is never
    /// retired: that connection is the database, and sessions take turns
    /// on it. Anything else is a filesystem path or a `file:` URI.
    pub fn open(url: &str) -> Result<Self> {
        if url == MEMORY_URL {
            return Self::new_in_memory();
        }
        let manager =
            SqliteConnectionManager::file(url).with_init(|conn| configure_connection(conn));
        // Fail fast on an unreachable store instead of on the first request.
        drop(r2d2::ManageConnection::connect(&manager)?);

        let pool = r2d2::Pool::builder()
            .max_size(DEFAULT_POOL_SIZE)
            .min_idle(Some(1))
            .connection_timeout(CHECKOUT_TIMEOUT)
            .build(manager)?;
        tracing::debug!(url, max_size = DEFAULT_POOL_SIZE, "opened database pool");
        Ok(Self {
            pool,
            in_memory: false,
        })
    }

    fn new_in_memory() -> Result<Self> {
        let manager =
            SqliteConnectionManager::memory().with_init(|conn| configure_connection(conn));
        let pool = r2d2::Pool::builder()
            .max_size(1)
            .min_idle(Some(1))
            .idle_timeout(None)
            .max_lifetime(None)
            .connection_timeout(CHECKOUT_TIMEOUT)
            .build(manager)?;
        tracing::debug!("opened in-memory database");
        Ok(Self {
            pool,
            in_memory: true,
        })
    }

    /// Check out a session. Blocks while every pooled connection is in use.
    pub fn session(&self) -> Result<AuthorStore> {
        Ok(AuthorStore::from_pooled(self.pool.get()?))
    }

    /// Drop and recreate the schema. Destroys all data.
    pub fn initialize(&self) -> Result<()> {
        self.session()?.reset_schema()
    }

    #[cfg(test)]
    pub(crate) fn pool_state(&self) -> r2d2::State {
        self.pool.state()
    }
}
