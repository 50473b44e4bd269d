//! Local handler for the client-only `updateRecipeStarred` mutation.
//!
//! # Contract
//! - Input is the desired state, not a delta.
//! - Adding a present id and removing an absent id are no-ops on the set.
//! - Storage read and write failures propagate to the caller; the slot is
//!   never rewritten from a set that could not be read.

use super::store::StarredStore;
use crate::model::recipe::RecipeId;
use crate::storage::{KeyValueStorage, StorageResult};
use log::info;
use serde::{Deserialize, Serialize};

/// Synthetic `Recipe`-typed fragment returned by the local mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarredResult {
    #[serde(rename = "__typename")]
    pub typename: String,
    pub is_starred: bool,
}

impl StarredResult {
    fn recipe(is_starred: bool) -> Self {
        Self {
            typename: "Recipe".to_string(),
            is_starred,
        }
    }
}

/// Sets the starred state of `id` to `is_starred` in the durable store.
pub fn update_recipe_starred<S: KeyValueStorage>(
    store: &StarredStore<S>,
    id: &RecipeId,
    is_starred: bool,
) -> StorageResult<StarredResult> {
    let mut starred = store.read_strict()?;
    let changed = if is_starred {
        starred.insert(id.clone())
    } else {
        starred.remove(id)
    };
    store.write(&starred)?;

    info!(
        "event=recipe_starred module=starred status=ok is_starred={is_starred} changed={changed} count={}",
        starred.len()
    );
    Ok(StarredResult::recipe(is_starred))
}
