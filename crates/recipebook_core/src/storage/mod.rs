//! Durable key-value slots, shaped after browser `localStorage`.
//!
//! # Responsibility
//! - Define the `KeyValueStorage` contract consumed by the starred store.
//! - Provide a durable SQLite implementation and an in-memory test double.
//!
//! # Invariants
//! - `set_item` replaces the whole value of one key in a single write.
//! - A missing key reads as `Ok(None)`, never as an error.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

pub type StorageResult<T> = Result<T, StorageError>;

/// Failures raised by a storage backend or while preparing one.
#[derive(Debug)]
pub enum StorageError {
    Sqlite(rusqlite::Error),
    /// The slot database was written by a newer build; nothing was touched.
    SchemaTooNew { found: u32, supported: u32 },
    Encode(serde_json::Error),
    /// Backend could not produce the value of `key` (locked medium, injected fault).
    ReadFailed { key: String, reason: String },
    /// Backend refused the write (quota, read-only medium, injected fault).
    WriteRejected { key: String, reason: String },
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "slot database error: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "slot database schema {found} is newer than this build supports ({supported})"
            ),
            Self::Encode(err) => write!(f, "failed to encode storage value: {err}"),
            Self::ReadFailed { key, reason } => {
                write!(f, "storage failed to read `{key}`: {reason}")
            }
            Self::WriteRejected { key, reason } => {
                write!(f, "storage rejected write to `{key}`: {reason}")
            }
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::SchemaTooNew { .. } | Self::ReadFailed { .. } | Self::WriteRejected { .. } => {
                None
            }
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// String-keyed, string-valued durable storage.
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for &T {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set_item(key, value)
    }
}
