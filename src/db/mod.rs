//! Database module: connection pool, schema bootstrap, existence checks and
//! per-resource queries.
//!
//! Layout:
//! - `sqlite.rs`: pool setup and the `HubStorage` handle
//! - `schema.rs`: reading the external DDL script
//! - `lookup.rs`: the closed set of (table, column) existence lookups
//! - `models.rs`: Rust structs mirroring DB rows and request payloads
//! - `queries/`: one `impl HubStorage` block per table

pub mod lookup;
pub mod models;
pub mod queries;
pub mod schema;
pub mod sqlite;

pub use lookup::Lookup;
pub use sqlite::{HubStorage, SqlitePool, connect};
