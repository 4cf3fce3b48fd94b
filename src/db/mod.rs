//! Database module: row models, schema and the statement-per-connection store.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite)
//! - `sqlite.rs`: the `Store` executing parameterized statements

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{Application, NewApplication, NewUser, User, UserId};
pub use schema::SQLITE_INIT;
pub use sqlite::{Param, Store};
