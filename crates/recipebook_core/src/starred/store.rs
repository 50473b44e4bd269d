//! Durable starred-id set over a single storage slot.
//!
//! # Invariants
//! - The slot holds a JSON array of recipe ids.
//! - Reads fail soft: absent, `null` or unparseable values read as empty.
//!   `read_strict` keeps that, but passes backend failures up so a
//!   read-modify-write never replaces the slot from a failed read.
//! - Writes replace the full array in one storage call and propagate errors.

use crate::model::recipe::{RecipeId, StarredSet};
use crate::storage::{KeyValueStorage, StorageResult};
use log::{debug, warn};

/// Fixed storage key shared by every list view of one installation.
pub const STARRED_STORAGE_KEY: &str = "starredRecipes";

/// Starred-set persistence wrapper around an injected storage backend.
pub struct StarredStore<S: KeyValueStorage> {
    storage: S,
}

impl<S: KeyValueStorage> StarredStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Reads the current starred set. Never fails.
    pub fn read(&self) -> StarredSet {
        self.read_strict().unwrap_or_else(|err| {
            warn!(
                "event=starred_read module=starred status=error error_code=storage_read_failed error={err}"
            );
            StarredSet::new()
        })
    }

    /// Reads the current starred set, failing only when the backend does.
    pub fn read_strict(&self) -> StorageResult<StarredSet> {
        let Some(raw) = self.storage.get_item(STARRED_STORAGE_KEY)? else {
            return Ok(StarredSet::new());
        };

        match serde_json::from_str::<Option<Vec<RecipeId>>>(&raw) {
            Ok(ids) => Ok(ids.unwrap_or_default().into_iter().collect()),
            Err(err) => {
                warn!(
                    "event=starred_read module=starred status=error error_code=slot_unparseable error={err}"
                );
                Ok(StarredSet::new())
            }
        }
    }

    /// Replaces the persisted set with `ids`.
    pub fn write(&self, ids: &StarredSet) -> StorageResult<()> {
        let encoded = serde_json::to_string(&ids.iter().collect::<Vec<_>>())?;
        self.storage.set_item(STARRED_STORAGE_KEY, &encoded)?;
        debug!(
            "event=starred_write module=starred status=ok count={}",
            ids.len()
        );
        Ok(())
    }

    pub fn contains(&self, id: &RecipeId) -> bool {
        self.read().contains(id)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
