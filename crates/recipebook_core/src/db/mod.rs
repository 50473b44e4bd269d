//! SQLite file that stands in for the browser's `localStorage`.
//!
//! # Invariants
//! - One table, `local_storage`, keyed by slot name.
//! - Schema level is tracked in `PRAGMA user_version` and only moves forward.
//! - `SqliteStorage` never sees a connection whose schema is not current.

mod open;
pub mod schema;

pub use open::{open_db, open_db_in_memory};
