//! Crate-wide error type.

use thiserror::Error;

/// Every failure the data access layer, config loader, or server can raise.
///
/// None of these are recovered locally. Store errors raised inside a
/// resolver surface as GraphQL errors through their `Display` output.
#[derive(Debug, Error)]
pub enum AuthorshipError {
    /// Connectivity failures and constraint violations from SQLite.
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// No pooled connection became free in time, or the pool could not
    /// reach its minimum size.
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// Unreadable config file or an invalid config value.
    #[error("config error: {0}")]
    Config(String),
}

impl From<serde_yaml::Error> for AuthorshipError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Config(e.to_string())
    }
}

pub type Result<T, E = AuthorshipError> = std::result::Result<T, E>;
