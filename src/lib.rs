//! Authorship: a read-only GraphQL API over authors and their articles.
//!
//! The data access layer ([`db`]) owns the SQLite schema and per-request
//! sessions; the query layer ([`api`]) exposes them as GraphQL and is served
//! over HTTP by [`http`].

pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod observability;
pub mod types;
