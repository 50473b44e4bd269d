//! `isStarred` field resolution for recipe entities.
//!
//! # Invariants
//! - Resolution is a pure function of the starred set; the store is only read.
//! - `RecipeRecord` inputs are never modified; views are built alongside.

use super::store::StarredStore;
use crate::model::recipe::{RecipeId, RecipeRecord, RecipeView};
use crate::storage::KeyValueStorage;

/// Resolves `isStarred` for one recipe id against the current store contents.
pub fn resolve_is_starred<S: KeyValueStorage>(store: &StarredStore<S>, id: &RecipeId) -> bool {
    store.contains(id)
}

/// Builds read views for one list evaluation.
///
/// When `requested` is false the field is left unresolved (`None`) and the
/// store is not consulted at all.
pub fn resolve_recipes<S: KeyValueStorage>(
    store: &StarredStore<S>,
    records: &[RecipeRecord],
    requested: bool,
) -> Vec<RecipeView> {
    let starred = requested.then(|| store.read());

    records
        .iter()
        .map(|record| RecipeView {
            id: record.id.clone(),
            title: record.title.clone(),
            is_starred: starred.as_ref().map(|set| set.contains(&record.id)),
        })
        .collect()
}
