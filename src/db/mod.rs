//! Data access layer: schema, store handle, and per-request sessions.
//!
//! - [`schema`] — DDL, connection settings, and destructive schema reset
//! - [`database`] — the shared [`Database`] pool handle bound to one connection string
//! - [`store`] — [`AuthorStore`], one session's typed reads and writes
//! - [`converters`] — row mapping helpers

pub mod converters;
pub mod database;
pub mod schema;
pub mod store;

pub use database::Database;
pub use store::AuthorStore;
