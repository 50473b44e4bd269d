//! Normalized in-memory cache for server-sourced recipe data.
//!
//! # Responsibility
//! - Store each recipe entity once, keyed by id.
//! - Store list query results as id references per vegetarian partition.
//!
//! # Invariants
//! - Only server fields are cached; `isStarred` is never stored here.
//! - Writing a list replaces that partition's references wholesale and
//!   merges entities, so a recipe present in several results exists once.
//! - References never point at a missing entity.

use crate::model::recipe::{RecipeId, RecipeRecord};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Default)]
pub struct NormalizedCache {
    entities: BTreeMap<RecipeId, RecipeRecord>,
    lists: BTreeMap<bool, Vec<RecipeId>>,
}

impl NormalizedCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the cached `recipes(vegetarian)` result.
    ///
    /// Duplicate ids within `records` keep their first position.
    pub fn write_list(&mut self, vegetarian: bool, records: &[RecipeRecord]) {
        let mut seen = BTreeSet::new();
        let mut refs = Vec::with_capacity(records.len());
        for record in records {
            self.entities.insert(record.id.clone(), record.clone());
            if seen.insert(record.id.clone()) {
                refs.push(record.id.clone());
            }
        }
        self.lists.insert(vegetarian, refs);
    }

    /// Merges one entity, e.g. the payload of `addRecipe`.
    pub fn write_entity(&mut self, record: &RecipeRecord) {
        self.entities.insert(record.id.clone(), record.clone());
    }

    /// Reads a cached list, `None` when the partition was never fetched.
    pub fn read_list(&self, vegetarian: bool) -> Option<Vec<RecipeRecord>> {
        let refs = self.lists.get(&vegetarian)?;
        Some(
            refs.iter()
                .filter_map(|id| self.entities.get(id).cloned())
                .collect(),
        )
    }

    pub fn entity(&self, id: &RecipeId) -> Option<&RecipeRecord> {
        self.entities.get(id)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn has_list(&self, vegetarian: bool) -> bool {
        self.lists.contains_key(&vegetarian)
    }

    pub fn clear(&mut self) {
        self.entities.clear();
        self.lists.clear();
    }
}
